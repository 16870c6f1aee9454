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

mod performance;

pub(crate) const GRAVITY: f64 = 9.81; // m/s^2
pub(crate) const AIR_DENSITY: f64 = 1.225; // Air density in kg/m³ (at sea level)

/// Successive fixed-point estimates closer than this are considered converged
pub const FIXED_POINT_TOLERANCE: f64 = 1e-3;
/// Fixed-point loops return their last estimate once this many iterations have run
pub const FIXED_POINT_MAX_ITERATIONS: usize = 10;

/// Numerical guard (m/s) substituted for cornering speeds that aren't finite.
/// This is not a physical limit, straight-line speed is bounded by the
/// acceleration and braking passes.
pub const DEFAULT_SPEED_CEILING: f64 = 1000.0;

pub use performance::PerformanceModel;
