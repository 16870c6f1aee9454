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

//! Wing aerodynamics as pure functions of speed.
//!
//! Lift and drag coefficients are derived from per-wing slopes against the
//! wing angle of attack (degrees). Past the stall angle the lift slope
//! reverses, drag keeps an induced quadratic term. Downforce and drag both
//! scale with `v^2` and are never negative.

use serde::{Deserialize, Serialize};
use utils::numeric::is_non_negative_finite;
use crate::car::model::AIR_DENSITY;
use crate::error::{Error, ErrorKind, Result};

const STALL_ANGLE: f64 = 15.0;
const POST_STALL_LIFT_LOSS: f64 = 0.3;
const INDUCED_DRAG_FACTOR: f64 = 0.3;
const MAX_ANGLE_OF_ATTACK: f64 = 90.0;

pub const DEFAULT_ANGLE_OF_ATTACK: f64 = 4.0;

fn default_angle_of_attack() -> f64 {
    DEFAULT_ANGLE_OF_ATTACK
}

fn default_air_density() -> f64 {
    AIR_DENSITY
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AeroProfile {
    cl_alpha_front: f64,
    cl_alpha_rear: f64,
    cd_alpha_front: f64,
    cd_alpha_rear: f64,
    fw_area: f64,
    rw_area: f64,
    #[serde(default = "default_angle_of_attack")]
    aoa_front: f64,
    #[serde(default = "default_angle_of_attack")]
    aoa_rear: f64,
    #[serde(default = "default_air_density")]
    air_density: f64
}

impl Default for AeroProfile {
    fn default() -> Self {
        AeroProfile::none()
    }
}

impl AeroProfile {
    pub fn new(cl_alpha_front: f64,
               cl_alpha_rear: f64,
               cd_alpha_front: f64,
               cd_alpha_rear: f64,
               fw_area: f64,
               rw_area: f64) -> AeroProfile {
        AeroProfile {
            cl_alpha_front,
            cl_alpha_rear,
            cd_alpha_front,
            cd_alpha_rear,
            fw_area,
            rw_area,
            aoa_front: DEFAULT_ANGLE_OF_ATTACK,
            aoa_rear: DEFAULT_ANGLE_OF_ATTACK,
            air_density: AIR_DENSITY
        }
    }

    /// A profile that produces neither drag nor downforce
    pub fn none() -> AeroProfile {
        AeroProfile::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn with_angles_of_attack(mut self, aoa_front: f64, aoa_rear: f64) -> AeroProfile {
        self.aoa_front = aoa_front;
        self.aoa_rear = aoa_rear;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let coefficients = [
            ("cl_alpha_front", self.cl_alpha_front),
            ("cl_alpha_rear", self.cl_alpha_rear),
            ("cd_alpha_front", self.cd_alpha_front),
            ("cd_alpha_rear", self.cd_alpha_rear),
            ("fw_area", self.fw_area),
            ("rw_area", self.rw_area),
            ("air_density", self.air_density)
        ];
        for (name, value) in coefficients {
            if !is_non_negative_finite(value) {
                return Err(Error::new(ErrorKind::InvalidVehicle,
                                      format!("aero {} must be a non-negative number, got {}", name, value)));
            }
        }
        for (name, angle) in [("aoa_front", self.aoa_front), ("aoa_rear", self.aoa_rear)] {
            if !(is_non_negative_finite(angle) && angle <= MAX_ANGLE_OF_ATTACK) {
                return Err(Error::new(ErrorKind::InvalidVehicle,
                                      format!("aero {} must be within 0-{} degrees, got {}",
                                              name, MAX_ANGLE_OF_ATTACK, angle)));
            }
        }
        Ok(())
    }

    pub fn cl_alpha_front(&self) -> f64 { self.cl_alpha_front }
    pub fn cl_alpha_rear(&self) -> f64 { self.cl_alpha_rear }
    pub fn cd_alpha_front(&self) -> f64 { self.cd_alpha_front }
    pub fn cd_alpha_rear(&self) -> f64 { self.cd_alpha_rear }
    pub fn fw_area(&self) -> f64 { self.fw_area }
    pub fn rw_area(&self) -> f64 { self.rw_area }
    pub fn aoa_front(&self) -> f64 { self.aoa_front }
    pub fn aoa_rear(&self) -> f64 { self.aoa_rear }
    pub fn air_density(&self) -> f64 { self.air_density }

    pub(crate) fn set_cl_alpha_front(&mut self, value: f64) { self.cl_alpha_front = value }
    pub(crate) fn set_cl_alpha_rear(&mut self, value: f64) { self.cl_alpha_rear = value }
    pub(crate) fn set_cd_alpha_front(&mut self, value: f64) { self.cd_alpha_front = value }
    pub(crate) fn set_cd_alpha_rear(&mut self, value: f64) { self.cd_alpha_rear = value }
    pub(crate) fn set_fw_area(&mut self, value: f64) { self.fw_area = value }
    pub(crate) fn set_rw_area(&mut self, value: f64) { self.rw_area = value }

    pub fn front_lift_coefficient(&self) -> f64 {
        lift_coefficient(self.cl_alpha_front, self.aoa_front)
    }

    pub fn rear_lift_coefficient(&self) -> f64 {
        lift_coefficient(self.cl_alpha_rear, self.aoa_rear)
    }

    pub fn front_drag_coefficient(&self) -> f64 {
        drag_coefficient(self.cd_alpha_front, self.aoa_front)
    }

    pub fn rear_drag_coefficient(&self) -> f64 {
        drag_coefficient(self.cd_alpha_rear, self.aoa_rear)
    }

    /// Combined lift coefficient-area (m^2) of both wings, never negative
    pub fn lift_area(&self) -> f64 {
        (self.front_lift_coefficient() * self.fw_area + self.rear_lift_coefficient() * self.rw_area).max(0.0)
    }

    /// Combined drag coefficient-area (m^2) of both wings, never negative
    pub fn drag_area(&self) -> f64 {
        (self.front_drag_coefficient() * self.fw_area + self.rear_drag_coefficient() * self.rw_area).max(0.0)
    }

    /// Downforce (N) at `speed` (m/s)
    pub fn downforce(&self, speed: f64) -> f64 {
        self.dynamic_pressure(speed) * self.lift_area()
    }

    /// Drag force (N) at `speed` (m/s)
    pub fn drag(&self, speed: f64) -> f64 {
        self.dynamic_pressure(speed) * self.drag_area()
    }

    fn dynamic_pressure(&self, speed: f64) -> f64 {
        0.5 * self.air_density * speed.powi(2)
    }
}

fn lift_coefficient(slope: f64, angle_of_attack: f64) -> f64 {
    if angle_of_attack > STALL_ANGLE {
        slope * (STALL_ANGLE - POST_STALL_LIFT_LOSS * (angle_of_attack - STALL_ANGLE))
    } else {
        slope * angle_of_attack
    }
}

fn drag_coefficient(slope: f64, angle_of_attack: f64) -> f64 {
    slope * angle_of_attack + (slope * INDUCED_DRAG_FACTOR) * angle_of_attack.powi(2)
}

#[cfg(test)]
mod tests {
    use crate::car::aero::AeroProfile;
    use crate::error::ErrorKind;

    fn test_profile() -> AeroProfile {
        AeroProfile::new(0.5, 0.6, 0.2, 0.3, 1.0, 1.2)
    }

    #[test]
    fn zero_speed_produces_no_force() {
        let aero = test_profile();
        assert_eq!(aero.drag(0.0), 0.0);
        assert_eq!(aero.downforce(0.0), 0.0);
    }

    #[test]
    fn no_aero_produces_no_force() {
        let aero = AeroProfile::none();
        assert_eq!(aero.drag(80.0), 0.0);
        assert_eq!(aero.downforce(80.0), 0.0);
    }

    #[test]
    fn forces_scale_with_speed_squared() {
        let aero = test_profile();
        let ratio = aero.downforce(40.0) / aero.downforce(20.0);
        assert!((ratio - 4.0).abs() < 1e-9);
        let ratio = aero.drag(30.0) / aero.drag(10.0);
        assert!((ratio - 9.0).abs() < 1e-9);
    }

    #[test]
    fn forces_are_non_decreasing() {
        let aero = test_profile();
        let mut last_drag = 0.0;
        let mut last_downforce = 0.0;
        for speed in (0..100).map(|v| v as f64) {
            assert!(aero.drag(speed) >= last_drag);
            assert!(aero.downforce(speed) >= last_downforce);
            last_drag = aero.drag(speed);
            last_downforce = aero.downforce(speed);
        }
    }

    #[test]
    fn coefficients_follow_angle_of_attack() {
        let aero = test_profile().with_angles_of_attack(4.0, 10.0);
        assert!((aero.front_lift_coefficient() - 2.0).abs() < 1e-12);
        assert!((aero.rear_lift_coefficient() - 6.0).abs() < 1e-12);
        // 0.2 * 4 + 0.06 * 16
        assert!((aero.front_drag_coefficient() - 1.76).abs() < 1e-12);
    }

    #[test]
    fn lift_drops_past_stall() {
        let peak = test_profile().with_angles_of_attack(15.0, 15.0);
        let stalled = test_profile().with_angles_of_attack(25.0, 25.0);
        assert!(stalled.front_lift_coefficient() < peak.front_lift_coefficient());
        // 0.5 * (15 - 0.3 * 10)
        assert!((stalled.front_lift_coefficient() - 6.0).abs() < 1e-12);
        assert!(stalled.front_drag_coefficient() > peak.front_drag_coefficient());
    }

    #[test]
    fn deep_stall_never_produces_lift() {
        let aero = test_profile().with_angles_of_attack(90.0, 90.0);
        assert!(aero.front_lift_coefficient() < 0.0);
        assert_eq!(aero.lift_area(), 0.0);
        assert_eq!(aero.downforce(50.0), 0.0);
    }

    #[test]
    fn rejects_negative_coefficients() {
        let aero = AeroProfile::new(-0.1, 0.5, 0.5, 0.5, 1.0, 1.0);
        assert_eq!(aero.validate().unwrap_err().kind(), ErrorKind::InvalidVehicle);
    }

    #[test]
    fn rejects_out_of_range_angles() {
        let aero = test_profile().with_angles_of_attack(4.0, 95.0);
        assert!(aero.validate().is_err());
        let aero = test_profile().with_angles_of_attack(f64::NAN, 4.0);
        assert!(aero.validate().is_err());
        assert!(test_profile().validate().is_ok());
    }
}
