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

pub mod aero;
pub mod model;

use std::path::Path;
use serde::{Deserialize, Serialize};
use tracing::info;
use utils::numeric::{is_non_negative_finite, is_positive_finite, is_valid_fraction};

use crate::car::aero::AeroProfile;
use crate::error::{Error, ErrorKind, Result};
use crate::file_utils::{DataFormat, load_data_file};
use crate::fitness::SetupParameter;

pub const DEFAULT_BRAKE_BIAS: f64 = 0.6;
pub const DEFAULT_WHEELBASE: f64 = 3.0; // m
pub const DEFAULT_CG_HEIGHT: f64 = 0.3; // m

fn default_brake_bias() -> f64 {
    DEFAULT_BRAKE_BIAS
}

fn default_wheelbase() -> f64 {
    DEFAULT_WHEELBASE
}

fn default_cg_height() -> f64 {
    DEFAULT_CG_HEIGHT
}

/// A point-mass car. Parameters are fixed for the duration of a solve, changing
/// one means building a new, re-validated, `Vehicle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    mass: f64,
    tire_grip: f64,
    power: f64,
    brake_force: f64,
    #[serde(default = "default_brake_bias")]
    brake_bias: f64,
    #[serde(default = "default_wheelbase")]
    wheelbase: f64,
    #[serde(default = "default_cg_height")]
    cg_height: f64,
    #[serde(default)]
    aero: AeroProfile
}

impl Vehicle {
    /// - `mass`: kg
    /// - `tire_grip`: tyre-road friction coefficient
    /// - `power`: peak engine power in W
    /// - `brake_force`: peak brake system force in N
    pub fn builder(mass: f64, tire_grip: f64, power: f64, brake_force: f64) -> VehicleBuilder {
        VehicleBuilder::new(mass, tire_grip, power, brake_force)
    }

    /// 700 kg, 1.5 grip, 400 kW, 6000 N of brakes and no wings
    pub fn example() -> Vehicle {
        Vehicle {
            mass: 700.0,
            tire_grip: 1.5,
            power: 400000.0,
            brake_force: 6000.0,
            brake_bias: DEFAULT_BRAKE_BIAS,
            wheelbase: DEFAULT_WHEELBASE,
            cg_height: DEFAULT_CG_HEIGHT,
            aero: AeroProfile::none()
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Vehicle> {
        let vehicle: Vehicle = load_data_file(path)?;
        vehicle.validate()?;
        info!("Loaded vehicle from {}", path.display());
        Ok(vehicle)
    }

    pub fn from_json_str(data: &str) -> Result<Vehicle> {
        Vehicle::decode(data, DataFormat::Json)
    }

    pub fn from_toml_str(data: &str) -> Result<Vehicle> {
        Vehicle::decode(data, DataFormat::Toml)
    }

    fn decode(data: &str, format: DataFormat) -> Result<Vehicle> {
        let vehicle: Vehicle = format.decode(data)?;
        vehicle.validate()?;
        Ok(vehicle)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("mass", self.mass),
            ("tire_grip", self.tire_grip),
            ("wheelbase", self.wheelbase)
        ];
        for (name, value) in positive {
            if !is_positive_finite(value) {
                return Err(invalid_vehicle(format!("{} must be positive, got {}", name, value)));
            }
        }
        let non_negative = [
            ("power", self.power),
            ("brake_force", self.brake_force),
            ("cg_height", self.cg_height)
        ];
        for (name, value) in non_negative {
            if !is_non_negative_finite(value) {
                return Err(invalid_vehicle(format!("{} must not be negative, got {}", name, value)));
            }
        }
        if !is_valid_fraction(self.brake_bias) {
            return Err(invalid_vehicle(format!("brake_bias must be within 0-1, got {}", self.brake_bias)));
        }
        self.aero.validate()
    }

    pub fn mass(&self) -> f64 { self.mass }
    pub fn tire_grip(&self) -> f64 { self.tire_grip }
    pub fn power(&self) -> f64 { self.power }
    pub fn brake_force(&self) -> f64 { self.brake_force }
    pub fn brake_bias(&self) -> f64 { self.brake_bias }
    pub fn wheelbase(&self) -> f64 { self.wheelbase }
    pub fn cg_height(&self) -> f64 { self.cg_height }
    pub fn aero(&self) -> &AeroProfile { &self.aero }

    /// Current value of a tunable setup parameter
    pub fn parameter(&self, parameter: SetupParameter) -> f64 {
        match parameter {
            SetupParameter::Power => self.power,
            SetupParameter::BrakeForce => self.brake_force,
            SetupParameter::Mass => self.mass,
            SetupParameter::TireGrip => self.tire_grip,
            SetupParameter::ClAlphaFront => self.aero.cl_alpha_front(),
            SetupParameter::ClAlphaRear => self.aero.cl_alpha_rear(),
            SetupParameter::CdAlphaFront => self.aero.cd_alpha_front(),
            SetupParameter::CdAlphaRear => self.aero.cd_alpha_rear(),
            SetupParameter::FrontWingArea => self.aero.fw_area(),
            SetupParameter::RearWingArea => self.aero.rw_area()
        }
    }

    /// A copy of this vehicle with `parameter` replaced by `value`
    pub fn with_parameter(&self, parameter: SetupParameter, value: f64) -> Result<Vehicle> {
        let mut vehicle = self.clone();
        match parameter {
            SetupParameter::Power => vehicle.power = value,
            SetupParameter::BrakeForce => vehicle.brake_force = value,
            SetupParameter::Mass => vehicle.mass = value,
            SetupParameter::TireGrip => vehicle.tire_grip = value,
            SetupParameter::ClAlphaFront => vehicle.aero.set_cl_alpha_front(value),
            SetupParameter::ClAlphaRear => vehicle.aero.set_cl_alpha_rear(value),
            SetupParameter::CdAlphaFront => vehicle.aero.set_cd_alpha_front(value),
            SetupParameter::CdAlphaRear => vehicle.aero.set_cd_alpha_rear(value),
            SetupParameter::FrontWingArea => vehicle.aero.set_fw_area(value),
            SetupParameter::RearWingArea => vehicle.aero.set_rw_area(value)
        }
        vehicle.validate()?;
        Ok(vehicle)
    }

    pub fn with_aero(&self, aero: AeroProfile) -> Result<Vehicle> {
        let mut vehicle = self.clone();
        vehicle.aero = aero;
        vehicle.validate()?;
        Ok(vehicle)
    }
}

fn invalid_vehicle(details: String) -> Error {
    Error::new(ErrorKind::InvalidVehicle, details)
}

pub struct VehicleBuilder {
    mass: f64,
    tire_grip: f64,
    power: f64,
    brake_force: f64,
    brake_bias: f64,
    wheelbase: f64,
    cg_height: f64,
    aero: AeroProfile
}

impl VehicleBuilder {
    pub fn new(mass: f64, tire_grip: f64, power: f64, brake_force: f64) -> Self {
        Self {
            mass,
            tire_grip,
            power,
            brake_force,
            brake_bias: DEFAULT_BRAKE_BIAS,
            wheelbase: DEFAULT_WHEELBASE,
            cg_height: DEFAULT_CG_HEIGHT,
            aero: AeroProfile::none()
        }
    }

    pub fn brake_bias(mut self, front_fraction: f64) -> Self {
        self.brake_bias = front_fraction;
        self
    }

    pub fn wheelbase(mut self, metres: f64) -> Self {
        self.wheelbase = metres;
        self
    }

    pub fn cg_height(mut self, metres: f64) -> Self {
        self.cg_height = metres;
        self
    }

    pub fn aero(mut self, aero: AeroProfile) -> Self {
        self.aero = aero;
        self
    }

    pub fn build(self) -> Result<Vehicle> {
        let vehicle = Vehicle {
            mass: self.mass,
            tire_grip: self.tire_grip,
            power: self.power,
            brake_force: self.brake_force,
            brake_bias: self.brake_bias,
            wheelbase: self.wheelbase,
            cg_height: self.cg_height,
            aero: self.aero
        };
        vehicle.validate()?;
        Ok(vehicle)
    }
}

#[cfg(test)]
mod tests {
    use crate::car::{DEFAULT_BRAKE_BIAS, DEFAULT_CG_HEIGHT, DEFAULT_WHEELBASE, Vehicle};
    use crate::car::aero::AeroProfile;
    use crate::error::ErrorKind;
    use crate::fitness::SetupParameter;

    #[test]
    fn json_defaults_missing_fields() {
        let car = Vehicle::from_json_str(
            r#"{ "mass": 750, "tire_grip": 1.4, "power": 350000, "brake_force": 5000 }"#
        ).unwrap();
        assert_eq!(car.mass(), 750.0);
        assert_eq!(car.brake_bias(), DEFAULT_BRAKE_BIAS);
        assert_eq!(car.wheelbase(), DEFAULT_WHEELBASE);
        assert_eq!(car.cg_height(), DEFAULT_CG_HEIGHT);
        assert_eq!(car.aero(), &AeroProfile::none());
    }

    #[test]
    fn toml_with_aero_table() {
        let car = Vehicle::from_toml_str(r#"
            mass = 700.0
            tire_grip = 1.5
            power = 400000.0
            brake_force = 6000.0
            brake_bias = 0.55

            [aero]
            cl_alpha_front = 0.5
            cl_alpha_rear = 0.6
            cd_alpha_front = 0.2
            cd_alpha_rear = 0.3
            fw_area = 1.0
            rw_area = 1.2
            aoa_rear = 6.0
        "#).unwrap();
        assert_eq!(car.brake_bias(), 0.55);
        assert_eq!(car.aero().rw_area(), 1.2);
        assert_eq!(car.aero().aoa_front(), 4.0);
        assert_eq!(car.aero().aoa_rear(), 6.0);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(Vehicle::builder(0.0, 1.5, 400000.0, 6000.0).build().unwrap_err().kind(),
                   ErrorKind::InvalidVehicle);
        assert!(Vehicle::builder(700.0, 0.0, 400000.0, 6000.0).build().is_err());
        assert!(Vehicle::builder(700.0, 1.5, -1.0, 6000.0).build().is_err());
        assert!(Vehicle::builder(700.0, 1.5, 400000.0, 6000.0).wheelbase(0.0).build().is_err());
        assert!(Vehicle::builder(700.0, 1.5, 400000.0, 6000.0).brake_bias(1.2).build().is_err());
        assert!(Vehicle::builder(700.0, 1.5, 400000.0, 6000.0).cg_height(-0.1).build().is_err());
        assert!(Vehicle::builder(f64::NAN, 1.5, 400000.0, 6000.0).build().is_err());
        assert!(Vehicle::from_json_str(r#"{ "mass": -5, "tire_grip": 1.4, "power": 1, "brake_force": 1 }"#).is_err());
    }

    #[test]
    fn missing_required_field_is_decode_error() {
        let err = Vehicle::from_json_str(r#"{ "mass": 700 }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::JsonDecodeError);
    }

    #[test]
    fn parameter_replacement() {
        let car = Vehicle::example();
        let heavier = car.with_parameter(SetupParameter::Mass, 850.0).unwrap();
        assert_eq!(heavier.mass(), 850.0);
        assert_eq!(car.mass(), 700.0);
        assert_eq!(heavier.parameter(SetupParameter::Mass), 850.0);

        let winged = car.with_parameter(SetupParameter::RearWingArea, 1.5).unwrap();
        assert_eq!(winged.aero().rw_area(), 1.5);
        assert_eq!(winged.parameter(SetupParameter::RearWingArea), 1.5);

        assert!(car.with_parameter(SetupParameter::TireGrip, -1.0).is_err());
        assert!(car.with_parameter(SetupParameter::ClAlphaFront, f64::INFINITY).is_err());
    }

    #[test]
    fn every_parameter_round_trips() {
        let car = Vehicle::example();
        for parameter in SetupParameter::ALL {
            let updated = car.with_parameter(parameter, 0.75).unwrap();
            assert_eq!(updated.parameter(parameter), 0.75, "{}", parameter);
        }
    }
}
