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

//! Quasi-steady-state lap time simulation of a point-mass car.
//!
//! A [`Track`] is cut into fixed-length steps, the car's grip, power, braking
//! and aerodynamic limits are applied at every step and the resulting speed
//! trace is integrated into a lap time. [`fitness`] wraps the solver for
//! setup optimisers.

pub mod error;
pub mod file_utils;
pub mod car;
pub mod track;
pub mod simulator;
pub mod fitness;

pub use car::Vehicle;
pub use car::aero::AeroProfile;
pub use car::model::PerformanceModel;
pub use error::{Error, ErrorKind, Result};
pub use fitness::{FitnessEvaluator, SetupParameter, SweepReport};
pub use simulator::{LapResult, LapSimulator, SolverSettings, simulate_lap};
pub use track::{Radius, Segment, Track};
