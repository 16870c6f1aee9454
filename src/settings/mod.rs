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

use std::fs;
use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use lapsim::SolverSettings;
use lapsim::simulator::{DEFAULT_LAP_TIME_LIMIT, DEFAULT_PENALTY, DEFAULT_STEP_SIZE};
use lapsim::car::model::DEFAULT_SPEED_CEILING;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GlobalSettings {
    step_size: f64,
    speed_ceiling: f64,
    penalty: f64,
    lap_time_limit: f64
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            step_size: DEFAULT_STEP_SIZE,
            speed_ceiling: DEFAULT_SPEED_CEILING,
            penalty: DEFAULT_PENALTY,
            lap_time_limit: DEFAULT_LAP_TIME_LIMIT
        }
    }
}

impl GlobalSettings {
    const STEP_SIZE: &'static str = "step_size";
    const SPEED_CEILING: &'static str = "speed_ceiling";
    const PENALTY: &'static str = "penalty";
    const LAP_TIME_LIMIT: &'static str = "lap_time_limit";
    const CONFIG_FILENAME: &'static str = "lap-crane-conf";
    const ENV_PREFIX: &'static str = "LAPSIM";

    pub fn load() -> Result<Self, ConfigError> {
        GlobalSettings::load_from(GlobalSettings::CONFIG_FILENAME)
    }

    /// Defaults, overlaid by the optional settings file `config_name` (any
    /// extension the config crate understands) and then `LAPSIM_*` environment
    /// variables. A settings file that can't be read falls back to the defaults.
    pub fn load_from(config_name: &str) -> Result<Self, ConfigError> {
        let builder = GlobalSettings::builder_with_defaults()?;
        match builder
            .add_source(config::File::with_name(config_name).required(false))
            .add_source(config::Environment::with_prefix(GlobalSettings::ENV_PREFIX))
            .build() {
            Ok(settings) => {
                settings.try_deserialize()
            }
            Err(e) => {
                warn!("Failed to load settings. {}", e.to_string());
                let settings = GlobalSettings::builder_with_defaults()?.build()?;
                settings.try_deserialize()
            }
        }
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default(GlobalSettings::STEP_SIZE, DEFAULT_STEP_SIZE)?
            .set_default(GlobalSettings::SPEED_CEILING, DEFAULT_SPEED_CEILING)?
            .set_default(GlobalSettings::PENALTY, DEFAULT_PENALTY)?
            .set_default(GlobalSettings::LAP_TIME_LIMIT, DEFAULT_LAP_TIME_LIMIT)
    }

    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    pub fn set_step_size(&mut self, step_size: f64) {
        self.step_size = step_size;
    }

    pub fn solver_settings(&self) -> SolverSettings {
        SolverSettings {
            step_size: self.step_size,
            speed_ceiling: self.speed_ceiling,
            penalty: self.penalty,
            lap_time_limit: self.lap_time_limit
        }
    }

    pub fn to_toml(&self) -> std::io::Result<String> {
        toml::to_string(&self).map_err(|_e| {
            std::io::Error::new(std::io::ErrorKind::Other, "Failed to encode settings to toml")
        })
    }

    pub fn write(&self) -> std::io::Result<()> {
        let filename = format!("{}.toml", GlobalSettings::CONFIG_FILENAME);
        fs::write(&filename, self.to_toml()?)?;
        info!("Settings written to {}", filename);
        Ok(())
    }
}
