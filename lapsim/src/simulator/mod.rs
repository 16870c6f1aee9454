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

//! Quasi-steady-state speed profile solver.
//!
//! The lap is solved in three sweeps over the discretised track: the cornering
//! envelope, a forward sweep limited by acceleration from a standing start, and
//! a backward sweep limited by braking. Each sweep can only lower speeds, and
//! one sweep in each direction is enough because every constraint only links
//! neighbouring samples.

mod lap_time;

pub use lap_time::{elapsed_times, lap_time, segment_time};

use serde::{Deserialize, Serialize};
use tracing::debug;
use utils::numeric::is_positive_finite;

use crate::car::model::{DEFAULT_SPEED_CEILING, PerformanceModel};
use crate::car::Vehicle;
use crate::error::{Error, ErrorKind, Result};
use crate::track::{Radius, Track};

pub const DEFAULT_STEP_SIZE: f64 = 1.0; // m
pub const DEFAULT_PENALTY: f64 = 1e6;
pub const DEFAULT_LAP_TIME_LIMIT: f64 = 1e4; // s

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Track distance (m) between speed samples
    pub step_size: f64,
    /// Cornering speed (m/s) substituted for straights and runaway estimates
    pub speed_ceiling: f64,
    /// Reported in place of a lap time that is non-finite or over the limit
    pub penalty: f64,
    /// Lap times (s) above this are treated as failed
    pub lap_time_limit: f64
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            step_size: DEFAULT_STEP_SIZE,
            speed_ceiling: DEFAULT_SPEED_CEILING,
            penalty: DEFAULT_PENALTY,
            lap_time_limit: DEFAULT_LAP_TIME_LIMIT
        }
    }
}

impl SolverSettings {
    pub fn with_step_size(mut self, step_size: f64) -> SolverSettings {
        self.step_size = step_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("step_size", self.step_size),
            ("speed_ceiling", self.speed_ceiling),
            ("penalty", self.penalty),
            ("lap_time_limit", self.lap_time_limit)
        ];
        for (name, value) in checks {
            if !is_positive_finite(value) {
                return Err(Error::new(ErrorKind::InvalidSettings,
                                      format!("{} must be positive, got {}", name, value)));
            }
        }
        Ok(())
    }
}

/// The solved speed trace for one lap
#[derive(Debug, Clone, PartialEq)]
pub struct LapResult {
    lap_time: f64,
    speeds: Vec<f64>,
    envelope: Vec<f64>,
    step_size: f64
}

impl LapResult {
    /// Total elapsed time (s)
    pub fn lap_time(&self) -> f64 {
        self.lap_time
    }

    /// Speed (m/s) at every step along the track
    pub fn speed_profile(&self) -> &[f64] {
        &self.speeds
    }

    /// Cornering speed limit (m/s) at every step along the track
    pub fn cornering_envelope(&self) -> &[f64] {
        &self.envelope
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }

    pub fn top_speed(&self) -> f64 {
        self.speeds.iter().copied().fold(0.0, f64::max)
    }

    /// Slowest speed once the car has left the start line
    pub fn min_rolling_speed(&self) -> Option<f64> {
        self.speeds.iter().skip(1).copied().reduce(f64::min)
    }

    pub fn distances(&self) -> Vec<f64> {
        (0..self.speeds.len()).map(|idx| idx as f64 * self.step_size).collect()
    }

    pub fn elapsed_times(&self) -> Vec<f64> {
        elapsed_times(&self.speeds, self.step_size)
    }
}

pub struct LapSimulator<'a> {
    model: PerformanceModel<'a>,
    track: &'a Track,
    step: f64
}

impl<'a> LapSimulator<'a> {
    pub fn new(vehicle: &'a Vehicle, track: &'a Track, settings: &SolverSettings) -> Result<LapSimulator<'a>> {
        settings.validate()?;
        Ok(LapSimulator {
            model: PerformanceModel::new(vehicle, settings.speed_ceiling),
            track,
            step: settings.step_size
        })
    }

    pub fn performance_model(&self) -> &PerformanceModel<'a> {
        &self.model
    }

    pub fn simulate_lap(&self) -> LapResult {
        let radii = self.track.discretize_unchecked(self.step);
        let envelope = self.cornering_envelope(&radii);
        let mut speeds = envelope.clone();
        if let Some(start) = speeds.first_mut() {
            *start = 0.0;
        }
        self.forward_pass(&mut speeds);
        self.backward_pass(&mut speeds);
        let lap_time = lap_time(&speeds, self.step);

        let result = LapResult { lap_time, speeds, envelope, step_size: self.step };
        debug!("Solved {} samples at {} m steps. Lap time {:.3} s, top speed {:.2} m/s",
               result.len(), self.step, result.lap_time, result.top_speed());
        result
    }

    /// Grip limited speed at each sample. Each corner sample is seeded with the
    /// previous corner sample's speed.
    pub fn cornering_envelope(&self, radii: &[Radius]) -> Vec<f64> {
        let mut envelope = Vec::with_capacity(radii.len());
        let mut guess = 0.0;
        for radius in radii {
            let limit = self.model.max_velocity(*radius, guess);
            // the ceiling on a straight isn't an estimate worth seeding from
            guess = if radius.is_straight() { 0.0 } else { limit };
            envelope.push(limit);
        }
        envelope
    }

    fn forward_pass(&self, speeds: &mut [f64]) {
        for idx in 1..speeds.len() {
            let previous = speeds[idx - 1];
            let acceleration = self.model.max_acceleration(previous);
            let allowed = (previous.powi(2) + 2.0 * acceleration * self.step).sqrt();
            if allowed < speeds[idx] {
                speeds[idx] = allowed;
            }
        }
    }

    fn backward_pass(&self, speeds: &mut [f64]) {
        for idx in (0..speeds.len().saturating_sub(1)).rev() {
            let next = speeds[idx + 1];
            let deceleration = self.model.max_deceleration(next).abs();
            let allowed = (next.powi(2) + 2.0 * deceleration * self.step).sqrt();
            if allowed < speeds[idx] {
                speeds[idx] = allowed;
            }
        }
    }
}

/// Solve one lap of `track` in `vehicle`
pub fn simulate_lap(vehicle: &Vehicle, track: &Track, settings: &SolverSettings) -> Result<LapResult> {
    Ok(LapSimulator::new(vehicle, track, settings)?.simulate_lap())
}

#[cfg(test)]
mod tests {
    use crate::car::aero::AeroProfile;
    use crate::car::Vehicle;
    use crate::error::ErrorKind;
    use crate::simulator::{LapSimulator, simulate_lap, SolverSettings};
    use crate::track::{Segment, Track};

    fn winged_car() -> Vehicle {
        Vehicle::builder(700.0, 1.5, 400000.0, 6000.0)
            .aero(AeroProfile::new(0.5, 0.6, 0.2, 0.3, 1.0, 1.2))
            .build()
            .unwrap()
    }

    #[test]
    fn starts_from_standstill_inside_envelope() {
        let car = winged_car();
        let track = Track::example();
        let result = simulate_lap(&car, &track, &SolverSettings::default()).unwrap();
        assert_eq!(result.len(), 750);
        assert_eq!(result.speed_profile()[0], 0.0);
        for (speed, limit) in result.speed_profile().iter().zip(result.cornering_envelope()) {
            assert!(speed >= &0.0);
            assert!(speed <= limit);
        }
        assert!(result.lap_time().is_finite());
        assert!(result.lap_time() > 0.0);
    }

    #[test]
    fn neighbours_are_reachable() {
        let car = winged_car();
        let track = Track::example();
        let settings = SolverSettings::default();
        let simulator = LapSimulator::new(&car, &track, &settings).unwrap();
        let model = simulator.performance_model();
        let result = simulator.simulate_lap();
        let speeds = result.speed_profile();
        for idx in 1..speeds.len() {
            let accelerating = speeds[idx - 1].powi(2) + 2.0 * model.max_acceleration(speeds[idx - 1]) * settings.step_size;
            assert!(speeds[idx].powi(2) <= accelerating + 1e-6, "can't reach sample {}", idx);
        }
        for idx in 0..speeds.len() - 1 {
            let braking = speeds[idx + 1].powi(2) + 2.0 * model.max_deceleration(speeds[idx + 1]) * settings.step_size;
            assert!(speeds[idx].powi(2) <= braking + 1e-6, "can't stop for sample {}", idx + 1);
        }
    }

    #[test]
    fn brakes_before_corners() {
        let car = Vehicle::example();
        let track = Track::example();
        let result = simulate_lap(&car, &track, &SolverSettings::default()).unwrap();
        let speeds = result.speed_profile();
        let corner_speed = speeds[300];
        assert!(speeds[250] > corner_speed);
        // speed falls monotonically over the braking zone
        let peak = (0..300).max_by(|a, b| speeds[*a].total_cmp(&speeds[*b])).unwrap();
        assert!(peak < 299);
        assert!(speeds[peak..=300].windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn repeat_solves_are_identical() {
        let car = winged_car();
        let track = Track::example();
        let settings = SolverSettings::default();
        let first = simulate_lap(&car, &track, &settings).unwrap();
        let second = simulate_lap(&car, &track, &settings).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn single_point_track() {
        let car = Vehicle::example();
        let track = Track::new(vec![Segment::straight(0.5)]).unwrap();
        let result = simulate_lap(&car, &track, &SolverSettings::default()).unwrap();
        assert_eq!(result.speed_profile(), &[0.0]);
        assert_eq!(result.lap_time(), 0.0);
        assert_eq!(result.min_rolling_speed(), None);
    }

    #[test]
    fn empty_track() {
        let car = Vehicle::example();
        let track = Track::new(Vec::new()).unwrap();
        let result = simulate_lap(&car, &track, &SolverSettings::default()).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.lap_time(), 0.0);
        assert_eq!(result.top_speed(), 0.0);
    }

    #[test]
    fn rejects_invalid_settings() {
        let car = Vehicle::example();
        let track = Track::example();
        let settings = SolverSettings::default().with_step_size(0.0);
        assert_eq!(simulate_lap(&car, &track, &settings).unwrap_err().kind(), ErrorKind::InvalidSettings);
        let settings = SolverSettings { speed_ceiling: -1.0, ..SolverSettings::default() };
        assert!(simulate_lap(&car, &track, &settings).is_err());
    }

    #[test]
    fn time_axis_matches_profile() {
        let car = Vehicle::example();
        let track = Track::example();
        let result = simulate_lap(&car, &track, &SolverSettings::default().with_step_size(2.0)).unwrap();
        let distances = result.distances();
        let elapsed = result.elapsed_times();
        assert_eq!(distances.len(), result.len());
        assert_eq!(elapsed.len(), result.len());
        assert_eq!(distances[10], 20.0);
        assert!((elapsed.last().unwrap() - result.lap_time()).abs() < 1e-9);
    }

    #[test]
    fn tight_hairpin_stays_finite() {
        let car = winged_car();
        let track = Track::new(vec![
            Segment::straight(100.0),
            Segment::curve(5.0, 1e-6),
            Segment::straight(100.0),
        ]).unwrap();
        let result = simulate_lap(&car, &track, &SolverSettings::default()).unwrap();
        assert!(result.speed_profile().iter().all(|v| v.is_finite()));
        assert!(result.speed_profile()[102] < 0.01);
        assert!(result.lap_time().is_finite());
    }
}
