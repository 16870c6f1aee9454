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
use std::path::Path;
use serde::de::DeserializeOwned;
use crate::error::{Error, ErrorKind, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DataFormat {
    Json,
    Toml
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<DataFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(DataFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(DataFormat::Toml),
            _ => Err(Error::new(ErrorKind::UnsupportedFormat,
                                format!("{} isn't a .json or .toml file", path.display())))
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, data: &str) -> Result<T> {
        match self {
            DataFormat::Json => Ok(serde_json::from_str(data)?),
            DataFormat::Toml => Ok(toml::from_str(data)?)
        }
    }
}

pub fn load_data_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = DataFormat::from_path(path)?;
    let data = fs::read_to_string(path).map_err(|err| {
        Error::new(ErrorKind::IOError, format!("Couldn't open {}. {}", path.display(), err.to_string()))
    })?;
    format.decode(&data)
}
