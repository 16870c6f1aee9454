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

use tracing::trace;
use crate::car::model::{FIXED_POINT_MAX_ITERATIONS, FIXED_POINT_TOLERANCE, GRAVITY};
use crate::car::Vehicle;
use crate::track::Radius;

/// Longitudinal and lateral limits of a [`Vehicle`], all coupled to speed
/// through aerodynamic drag and downforce.
///
/// None of the limits fail. Non-finite intermediate results degrade to the
/// configured speed ceiling and every result is finite and non-negative.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceModel<'a> {
    vehicle: &'a Vehicle,
    speed_ceiling: f64
}

impl<'a> PerformanceModel<'a> {
    pub fn new(vehicle: &'a Vehicle, speed_ceiling: f64) -> PerformanceModel<'a> {
        PerformanceModel { vehicle, speed_ceiling }
    }

    pub fn vehicle(&self) -> &Vehicle {
        self.vehicle
    }

    pub fn speed_ceiling(&self) -> f64 {
        self.speed_ceiling
    }

    pub fn weight(&self) -> f64 {
        self.vehicle.mass() * GRAVITY
    }

    pub fn traction_limited_force(&self) -> f64 {
        self.vehicle.tire_grip() * self.weight()
    }

    /// The driving force the engine can put down at `speed`. From standstill
    /// the power limit is unbounded so only traction applies.
    pub fn available_drive_force(&self, speed: f64) -> f64 {
        let traction_limit = self.traction_limited_force();
        if speed > 0.0 {
            traction_limit.min(self.vehicle.power() / speed)
        } else {
            traction_limit
        }
    }

    /// Largest longitudinal acceleration (m/s^2) at `speed`. Drag alone never
    /// decelerates the car, the result is clamped at zero.
    pub fn max_acceleration(&self, speed: f64) -> f64 {
        let net_force = self.available_drive_force(speed) - self.vehicle.aero().drag(speed);
        let acceleration = net_force / self.vehicle.mass();
        if acceleration.is_finite() {
            acceleration.max(0.0)
        } else {
            0.0
        }
    }

    /// Magnitude of the largest braking deceleration (m/s^2) at `speed`.
    ///
    /// Load transfer onto the front axle depends on the deceleration itself, so
    /// this iterates from the brake system limit until successive estimates
    /// agree within [`FIXED_POINT_TOLERANCE`]. After [`FIXED_POINT_MAX_ITERATIONS`]
    /// the last estimate is returned as is.
    pub fn max_deceleration(&self, speed: f64) -> f64 {
        let vehicle = self.vehicle;
        let mass = vehicle.mass();
        let static_axle_load = 0.5 * (self.weight() + vehicle.aero().downforce(speed));
        let brake_limit = vehicle.brake_force() / mass;
        let front_bias = vehicle.brake_bias();
        let rear_bias = 1.0 - front_bias;
        let transfer_ratio = vehicle.cg_height() / vehicle.wheelbase();

        let mut estimate = brake_limit;
        for _ in 0..FIXED_POINT_MAX_ITERATIONS {
            let load_transfer = mass * estimate * transfer_ratio;
            let front_limit = self.axle_grip_deceleration(static_axle_load + load_transfer, front_bias);
            let rear_limit = self.axle_grip_deceleration(static_axle_load - load_transfer, rear_bias);
            let next = brake_limit.min(front_limit).min(rear_limit);
            let delta = (next - estimate).abs();
            estimate = next;
            if delta < FIXED_POINT_TOLERANCE {
                return estimate.max(0.0);
            }
        }
        trace!("Braking load transfer didn't converge at {:.3} m/s, using {:.4} m/s^2", speed, estimate);
        estimate.max(0.0)
    }

    fn axle_grip_deceleration(&self, axle_load: f64, bias_fraction: f64) -> f64 {
        if bias_fraction <= 0.0 {
            // this axle does no braking so it can't be the one that locks
            return f64::INFINITY;
        }
        (self.vehicle.tire_grip() * axle_load.max(0.0)) / (self.vehicle.mass() * bias_fraction)
    }

    /// Maximum cornering speed (m/s) for `radius`.
    ///
    /// Downforce depends on speed and the grip limited speed depends on downforce,
    /// so this iterates from `speed_guess` with the same tolerance and cap as
    /// [`PerformanceModel::max_deceleration`]. Straights, and any estimate that
    /// isn't finite or exceeds the speed ceiling, resolve to the speed ceiling.
    pub fn max_velocity(&self, radius: Radius, speed_guess: f64) -> f64 {
        let radius = match radius {
            Radius::Straight => return self.speed_ceiling,
            Radius::Curve(metres) => metres
        };
        let mass = self.vehicle.mass();
        let weight = self.weight();
        let grip = self.vehicle.tire_grip();

        let mut estimate = speed_guess;
        for _ in 0..FIXED_POINT_MAX_ITERATIONS {
            let grip_force = grip * (weight + self.vehicle.aero().downforce(estimate));
            let next = (grip_force * radius / mass).sqrt();
            if !next.is_finite() || next >= self.speed_ceiling {
                trace!("Cornering speed for radius {} m exceeded the speed ceiling", radius);
                return self.speed_ceiling;
            }
            let delta = (next - estimate).abs();
            estimate = next;
            if delta < FIXED_POINT_TOLERANCE {
                return estimate;
            }
        }
        trace!("Cornering speed for radius {} m didn't converge, using {:.4} m/s", radius, estimate);
        estimate
    }
}
