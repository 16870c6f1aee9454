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

use std::{error, fmt, io, result};
use std::fmt::{Display, Formatter};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    details: String
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, details: String) -> Error {
        Error { kind, details }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.kind.as_str(), self.details)
    }
}

impl error::Error for Error {}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::new(ErrorKind::IOError, format!("{}. {}", e.to_string(), e.kind().to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::new(ErrorKind::JsonDecodeError, e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::new(ErrorKind::TomlDecodeError, e.to_string())
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ErrorKind {
    InvalidVehicle,
    InvalidTrack,
    InvalidSettings,
    IOError,
    JsonDecodeError,
    TomlDecodeError,
    UnsupportedFormat,
    ArgumentError
}

impl ErrorKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidVehicle => "invalid vehicle",
            ErrorKind::InvalidTrack => "invalid track",
            ErrorKind::InvalidSettings => "invalid solver settings",
            ErrorKind::IOError => "io error",
            ErrorKind::JsonDecodeError => "json decode error",
            ErrorKind::TomlDecodeError => "toml decode error",
            ErrorKind::UnsupportedFormat => "unsupported file format",
            ErrorKind::ArgumentError => "argument error"
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{Error, ErrorKind};

    #[test]
    fn display_includes_kind_and_details() {
        let err = Error::new(ErrorKind::InvalidVehicle, String::from("mass must be positive, got 0"));
        assert_eq!(err.to_string(), "invalid vehicle - mass must be positive, got 0");
        assert_eq!(err.kind(), ErrorKind::InvalidVehicle);
    }

    #[test]
    fn json_errors_are_classified() {
        let json_err = serde_json::from_str::<f64>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.kind(), ErrorKind::JsonDecodeError);
    }
}
