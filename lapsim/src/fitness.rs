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

//! Lap time as a fitness value for outer parameter searches.
//!
//! An optimiser can hand over any candidate vector, including physically
//! absurd ones. Every evaluation yields a finite number, either the lap time
//! or the configured penalty.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use statrs::statistics::Statistics;
use tracing::{debug, warn};
use utils::numeric::linspace;

use crate::car::Vehicle;
use crate::error::{Error, ErrorKind, Result};
use crate::simulator::{LapSimulator, SolverSettings};
use crate::track::Track;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SetupParameter {
    Power,
    BrakeForce,
    Mass,
    TireGrip,
    ClAlphaFront,
    ClAlphaRear,
    CdAlphaFront,
    CdAlphaRear,
    FrontWingArea,
    RearWingArea
}

impl SetupParameter {
    /// Candidate vectors are laid out in this order
    pub const ALL: [SetupParameter; 10] = [
        SetupParameter::Power,
        SetupParameter::BrakeForce,
        SetupParameter::Mass,
        SetupParameter::TireGrip,
        SetupParameter::ClAlphaFront,
        SetupParameter::ClAlphaRear,
        SetupParameter::CdAlphaFront,
        SetupParameter::CdAlphaRear,
        SetupParameter::FrontWingArea,
        SetupParameter::RearWingArea
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SetupParameter::Power => "power",
            SetupParameter::BrakeForce => "brake_force",
            SetupParameter::Mass => "mass",
            SetupParameter::TireGrip => "tire_grip",
            SetupParameter::ClAlphaFront => "cl_alpha_front",
            SetupParameter::ClAlphaRear => "cl_alpha_rear",
            SetupParameter::CdAlphaFront => "cd_alpha_front",
            SetupParameter::CdAlphaRear => "cd_alpha_rear",
            SetupParameter::FrontWingArea => "fw_area",
            SetupParameter::RearWingArea => "rw_area"
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            SetupParameter::Power => "W",
            SetupParameter::BrakeForce => "N",
            SetupParameter::Mass => "kg",
            SetupParameter::TireGrip => "",
            SetupParameter::ClAlphaFront | SetupParameter::ClAlphaRear |
            SetupParameter::CdAlphaFront | SetupParameter::CdAlphaRear => "m^2/rad",
            SetupParameter::FrontWingArea | SetupParameter::RearWingArea => "m^2"
        }
    }

    /// Range (min, max) explored by the setup search
    pub fn search_bounds(&self) -> (f64, f64) {
        match self {
            SetupParameter::Power => (300000.0, 650000.0),
            SetupParameter::BrakeForce => (3000.0, 10000.0),
            SetupParameter::Mass => (600.0, 900.0),
            SetupParameter::TireGrip => (0.1, 2.0),
            SetupParameter::ClAlphaFront | SetupParameter::ClAlphaRear |
            SetupParameter::CdAlphaFront | SetupParameter::CdAlphaRear => (0.1, 1.0),
            SetupParameter::FrontWingArea | SetupParameter::RearWingArea => (0.1, 2.0)
        }
    }
}

impl Display for SetupParameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SetupParameter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SetupParameter::ALL.iter()
            .find(|param| param.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| Error::new(ErrorKind::ArgumentError,
                                      format!("Unknown setup parameter '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSample {
    pub value: f64,
    pub lap_time: f64,
    pub penalised: bool
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepReport {
    parameter: SetupParameter,
    samples: Vec<SweepSample>
}

impl SweepReport {
    pub fn parameter(&self) -> SetupParameter {
        self.parameter
    }

    pub fn samples(&self) -> &[SweepSample] {
        &self.samples
    }

    fn valid_lap_times(&self) -> Vec<f64> {
        self.samples.iter().filter(|s| !s.penalised).map(|s| s.lap_time).collect()
    }

    /// Fastest sample that wasn't penalised
    pub fn best(&self) -> Option<SweepSample> {
        self.samples.iter()
            .filter(|s| !s.penalised)
            .copied()
            .min_by(|a, b| a.lap_time.total_cmp(&b.lap_time))
    }

    pub fn mean_lap_time(&self) -> Option<f64> {
        let lap_times = self.valid_lap_times();
        if lap_times.is_empty() {
            return None;
        }
        Some(lap_times.iter().mean())
    }

    pub fn lap_time_std_dev(&self) -> Option<f64> {
        let lap_times = self.valid_lap_times();
        if lap_times.len() < 2 {
            return None;
        }
        Some(lap_times.iter().std_dev())
    }
}

/// Evaluates candidate setups of a base vehicle around a fixed track.
/// Holds no mutable state, so one evaluator can be shared across threads.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    base_vehicle: Vehicle,
    track: Track,
    settings: SolverSettings
}

impl FitnessEvaluator {
    pub fn new(base_vehicle: Vehicle, track: Track, settings: SolverSettings) -> Result<FitnessEvaluator> {
        settings.validate()?;
        base_vehicle.validate()?;
        track.validate()?;
        Ok(FitnessEvaluator { base_vehicle, track, settings })
    }

    pub fn base_vehicle(&self) -> &Vehicle {
        &self.base_vehicle
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Builds the vehicle described by `candidate`, which must hold one value
    /// per [`SetupParameter::ALL`] entry in that order
    pub fn candidate_vehicle(&self, candidate: &[f64]) -> Result<Vehicle> {
        if candidate.len() != SetupParameter::ALL.len() {
            return Err(Error::new(ErrorKind::ArgumentError,
                                  format!("Expected {} candidate values, got {}",
                                          SetupParameter::ALL.len(), candidate.len())));
        }
        self.apply(SetupParameter::ALL.iter().copied().zip(candidate.iter().copied()))
    }

    /// Applies a set of parameter replacements to the base vehicle
    pub fn apply<I>(&self, changes: I) -> Result<Vehicle>
        where I: IntoIterator<Item=(SetupParameter, f64)>
    {
        let mut vehicle = self.base_vehicle.clone();
        for (parameter, value) in changes {
            vehicle = vehicle.with_parameter(parameter, value)?;
        }
        Ok(vehicle)
    }

    /// Lap time for `candidate`, or the penalty if the candidate isn't usable
    pub fn evaluate(&self, candidate: &[f64]) -> f64 {
        match self.candidate_vehicle(candidate) {
            Ok(vehicle) => self.lap_time_for(&vehicle),
            Err(e) => {
                warn!("Rejected candidate {:?}. {}", candidate, e);
                self.settings.penalty
            }
        }
    }

    pub fn lap_time_for(&self, vehicle: &Vehicle) -> f64 {
        match LapSimulator::new(vehicle, &self.track, &self.settings) {
            Ok(simulator) => self.penalise(simulator.simulate_lap().lap_time()),
            Err(e) => {
                warn!("Couldn't simulate vehicle. {}", e);
                self.settings.penalty
            }
        }
    }

    /// Passes `lap_time` through if it is usable, otherwise the penalty
    pub fn penalise(&self, lap_time: f64) -> f64 {
        if lap_time.is_finite() && lap_time <= self.settings.lap_time_limit {
            lap_time
        } else {
            warn!("Lap time {} is unusable, reporting penalty {}", lap_time, self.settings.penalty);
            self.settings.penalty
        }
    }

    pub fn is_penalty(&self, fitness: f64) -> bool {
        fitness == self.settings.penalty
    }

    /// Lap times across `steps` evenly spaced values of `parameter`
    pub fn sweep(&self, parameter: SetupParameter, from: f64, to: f64, steps: usize) -> Result<SweepReport> {
        if steps == 0 {
            return Err(Error::new(ErrorKind::ArgumentError, String::from("A sweep needs at least one step")));
        }
        if !from.is_finite() || !to.is_finite() {
            return Err(Error::new(ErrorKind::ArgumentError,
                                  format!("Sweep range {} to {} isn't finite", from, to)));
        }
        let samples = linspace(from, to, steps).into_iter().map(|value| {
            let lap_time = match self.apply([(parameter, value)]) {
                Ok(vehicle) => self.lap_time_for(&vehicle),
                Err(e) => {
                    warn!("Skipping {} = {}. {}", parameter, value, e);
                    self.settings.penalty
                }
            };
            debug!("Sweep {} = {} -> {}", parameter, value, lap_time);
            SweepSample { value, lap_time, penalised: self.is_penalty(lap_time) }
        }).collect();
        Ok(SweepReport { parameter, samples })
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use crate::car::Vehicle;
    use crate::error::ErrorKind;
    use crate::fitness::{FitnessEvaluator, SetupParameter};
    use crate::simulator::SolverSettings;
    use crate::track::{Segment, Track};

    fn evaluator() -> FitnessEvaluator {
        FitnessEvaluator::new(Vehicle::example(), Track::example(), SolverSettings::default()).unwrap()
    }

    fn mid_candidate() -> Vec<f64> {
        SetupParameter::ALL.iter().map(|p| {
            let (low, high) = p.search_bounds();
            0.5 * (low + high)
        }).collect()
    }

    #[test]
    fn parses_parameter_names() {
        assert_eq!("power".parse::<SetupParameter>().unwrap(), SetupParameter::Power);
        assert_eq!(" FW_AREA ".parse::<SetupParameter>().unwrap(), SetupParameter::FrontWingArea);
        assert_eq!("wings".parse::<SetupParameter>().unwrap_err().kind(), ErrorKind::ArgumentError);
        for param in SetupParameter::ALL {
            assert_eq!(param.to_string().parse::<SetupParameter>().unwrap(), param);
        }
    }

    #[test]
    fn evaluates_candidate_vector() {
        let evaluator = evaluator();
        let candidate = mid_candidate();
        let vehicle = evaluator.candidate_vehicle(&candidate).unwrap();
        assert_eq!(vehicle.power(), 475000.0);
        assert_eq!(vehicle.aero().rw_area(), 1.05);
        let fitness = evaluator.evaluate(&candidate);
        assert!(fitness.is_finite());
        assert!(!evaluator.is_penalty(fitness));
        assert_eq!(fitness, evaluator.lap_time_for(&vehicle));
    }

    #[test]
    fn invalid_candidates_get_penalty() {
        let evaluator = evaluator();
        assert_eq!(evaluator.evaluate(&[400000.0]), 1e6);
        let mut candidate = mid_candidate();
        candidate[2] = -700.0;
        assert_eq!(evaluator.evaluate(&candidate), 1e6);
        candidate[2] = f64::NAN;
        assert_eq!(evaluator.evaluate(&candidate), 1e6);
    }

    #[test]
    fn unusable_lap_times_get_penalty() {
        let evaluator = evaluator();
        assert_eq!(evaluator.penalise(f64::NAN), 1e6);
        assert_eq!(evaluator.penalise(f64::INFINITY), 1e6);
        assert_eq!(evaluator.penalise(2e4), 1e6);
        assert_eq!(evaluator.penalise(42.0), 42.0);
    }

    #[test]
    fn absurd_lap_is_penalised() {
        // a hairpin of almost zero radius takes far longer than the limit
        let track = Track::new(vec![
            Segment::straight(50.0),
            Segment::curve(200.0, 1e-6),
        ]).unwrap();
        let evaluator = FitnessEvaluator::new(Vehicle::example(), track, SolverSettings::default()).unwrap();
        assert_eq!(evaluator.evaluate(&mid_candidate()), 1e6);
    }

    #[test]
    fn sweep_reports_statistics() {
        let evaluator = evaluator();
        let report = evaluator.sweep(SetupParameter::Power, 300000.0, 650000.0, 5).unwrap();
        assert_eq!(report.samples().len(), 5);
        assert_eq!(report.samples()[0].value, 300000.0);
        assert_eq!(report.samples()[4].value, 650000.0);
        let best = report.best().unwrap();
        let worst = report.samples().iter().map(|s| s.lap_time).fold(0.0, f64::max);
        let mean = report.mean_lap_time().unwrap();
        assert!(best.lap_time <= mean && mean <= worst);
        assert!(report.lap_time_std_dev().unwrap() >= 0.0);
    }

    #[test]
    fn sweep_marks_invalid_values() {
        let evaluator = evaluator();
        let report = evaluator.sweep(SetupParameter::Mass, -100.0, 700.0, 3).unwrap();
        assert!(report.samples()[0].penalised);
        assert!(!report.samples()[1].penalised);
        assert!(!report.samples()[2].penalised);
        // the lighter car is quicker
        assert_eq!(report.best().unwrap().value, 300.0);
        assert!(report.mean_lap_time().unwrap() < 1e6);
        let single = evaluator.sweep(SetupParameter::Mass, 700.0, 900.0, 1).unwrap();
        assert_eq!(single.samples().len(), 1);
        assert!(single.lap_time_std_dev().is_none());
        assert!(evaluator.sweep(SetupParameter::Mass, 600.0, 900.0, 0).is_err());
    }

    #[test]
    fn parallel_evaluations_agree() {
        let evaluator = evaluator();
        let candidate = mid_candidate();
        let expected = evaluator.evaluate(&candidate);
        thread::scope(|scope| {
            let handles: Vec<_> = (0..4).map(|_| scope.spawn(|| evaluator.evaluate(&candidate))).collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
