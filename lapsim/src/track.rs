/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of lap-crane.
 *
 * lap-crane is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * lap-crane is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with lap-crane. If not, see <https://www.gnu.org/licenses/>.
 */

//! Tracks made of straights and constant-radius corners, and their
//! discretisation into one curvature sample per solver step.

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};
use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use utils::numeric::is_positive_finite;

use crate::error::{Error, ErrorKind, Result};
use crate::file_utils::{DataFormat, load_data_file};

/// Radii at or above this (m) are treated as straights
pub const STRAIGHT_RADIUS_THRESHOLD: f64 = 1e12;

const STRAIGHT_KEYWORD: &str = "straight";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RadiusData", into = "RadiusData")]
pub enum Radius {
    Straight,
    Curve(f64)
}

impl Radius {
    pub fn from_metres(metres: f64) -> Radius {
        if metres >= STRAIGHT_RADIUS_THRESHOLD {
            Radius::Straight
        } else {
            Radius::Curve(metres)
        }
    }

    pub fn metres(&self) -> Option<f64> {
        match self {
            Radius::Straight => None,
            Radius::Curve(metres) => Some(*metres)
        }
    }

    pub fn is_straight(&self) -> bool {
        matches!(self, Radius::Straight)
    }
}

impl Display for Radius {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Radius::Straight => write!(f, "{}", STRAIGHT_KEYWORD),
            Radius::Curve(metres) => write!(f, "R{}", metres)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RadiusData {
    Metres(f64),
    Keyword(String)
}

impl TryFrom<RadiusData> for Radius {
    type Error = String;

    fn try_from(value: RadiusData) -> std::result::Result<Self, Self::Error> {
        match value {
            RadiusData::Metres(metres) => Ok(Radius::from_metres(metres)),
            RadiusData::Keyword(word) if word.eq_ignore_ascii_case(STRAIGHT_KEYWORD) => Ok(Radius::Straight),
            RadiusData::Keyword(word) => Err(format!("Unknown radius '{}'", word))
        }
    }
}

impl From<Radius> for RadiusData {
    fn from(value: Radius) -> Self {
        match value {
            Radius::Straight => RadiusData::Keyword(STRAIGHT_KEYWORD.to_string()),
            Radius::Curve(metres) => RadiusData::Metres(metres)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    length: f64,
    radius: Radius
}

impl Segment {
    pub fn new(length: f64, radius: Radius) -> Segment {
        Segment { length, radius }
    }

    pub fn straight(length: f64) -> Segment {
        Segment::new(length, Radius::Straight)
    }

    pub fn curve(length: f64, radius: f64) -> Segment {
        Segment::new(length, Radius::from_metres(radius))
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn radius(&self) -> Radius {
        self.radius
    }

    /// Number of solver samples this segment covers at `step` metres
    pub fn step_count(&self, step: f64) -> usize {
        (self.length / step).ceil() as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    segments: Vec<Segment>
}

impl Track {
    pub fn new(segments: Vec<Segment>) -> Result<Track> {
        let track = Track { segments };
        track.validate()?;
        Ok(track)
    }

    /// 300 m straight, 100 m R50, 200 m straight, 150 m R30
    pub fn example() -> Track {
        Track {
            segments: vec![
                Segment::straight(300.0),
                Segment::curve(100.0, 50.0),
                Segment::straight(200.0),
                Segment::curve(150.0, 30.0),
            ]
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Track> {
        let track: Track = load_data_file(path)?;
        track.validate()?;
        info!("Loaded {} track segments from {}", track.segments.len(), path.display());
        Ok(track)
    }

    pub fn from_json_str(data: &str) -> Result<Track> {
        Track::decode(data, DataFormat::Json)
    }

    pub fn from_toml_str(data: &str) -> Result<Track> {
        Track::decode(data, DataFormat::Toml)
    }

    fn decode(data: &str, format: DataFormat) -> Result<Track> {
        let track: Track = format.decode(data)?;
        track.validate()?;
        Ok(track)
    }

    pub fn validate(&self) -> Result<()> {
        for (idx, segment) in self.segments.iter().enumerate() {
            if !is_positive_finite(segment.length) {
                return Err(Error::new(ErrorKind::InvalidTrack,
                                      format!("segment {} length must be positive, got {}", idx, segment.length)));
            }
            if let Radius::Curve(metres) = segment.radius {
                if !is_positive_finite(metres) {
                    return Err(Error::new(ErrorKind::InvalidTrack,
                                          format!("segment {} radius must be positive, got {}", idx, metres)));
                }
            }
        }
        Ok(())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }

    /// One curvature radius per `step` metres of track, in segment order.
    /// Each segment contributes `ceil(length / step)` copies of its radius.
    pub fn discretize(&self, step: f64) -> Result<Vec<Radius>> {
        if !is_positive_finite(step) {
            return Err(Error::new(ErrorKind::InvalidSettings,
                                  format!("step size must be positive, got {}", step)));
        }
        Ok(self.discretize_unchecked(step))
    }

    pub(crate) fn discretize_unchecked(&self, step: f64) -> Vec<Radius> {
        let total = self.segments.iter().map(|s| s.step_count(step)).sum();
        let mut radii = Vec::with_capacity(total);
        for segment in &self.segments {
            radii.extend(std::iter::repeat(segment.radius).take(segment.step_count(step)));
        }
        radii
    }
}
