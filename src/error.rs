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

use std::io;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("io error. {0}")]
    IoError(#[from] io::Error),
    #[error("{0}")]
    SimulationError(#[from] lapsim::Error),
    #[error("settings error. {0}")]
    SettingsError(#[from] config::ConfigError),
    #[error("csv error. {0}")]
    CsvError(#[from] csv::Error),
    #[error("failed to write `{0}`. `{1}`")]
    FailedToWrite(String, String)
}
