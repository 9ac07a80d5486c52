//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
}

/// A validated athlete identifier.
///
/// Athlete IDs must be non-empty strings. They come from the result feed
/// (or the mock presets) and are the key used to select athletes in
/// head-to-head projections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AthleteId(String);

impl AthleteId {
    /// Creates a new ID after validation.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::Empty {
                field: "athlete ID",
            });
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AthleteId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AthleteId> for String {
    fn from(id: AthleteId) -> Self {
        id.0
    }
}

impl fmt::Display for AthleteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AthleteId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result status for one athlete on one distance.
///
/// Only [`RaceStatus::Ok`] contributes a timed result; every other status
/// excludes the distance from points and totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RaceStatus {
    /// A regular timed result.
    #[default]
    Ok,
    /// Did not start.
    Dns,
    /// Did not finish.
    Dnf,
    /// Disqualified.
    Dq,
}

impl RaceStatus {
    /// Canonical wire code for this status.
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Dns => "DNS",
            Self::Dnf => "DNF",
            Self::Dq => "DQ",
        }
    }

    /// Whether this status carries a countable time.
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Lenient decoding for external data: an unknown code is treated as a
    /// disqualification so that a bad feed never counts phantom results.
    pub fn from_code(code: &str) -> Self {
        code.parse().unwrap_or_else(|_| {
            tracing::warn!(status = code, "unknown race status treated as DQ");
            Self::Dq
        })
    }
}

impl fmt::Display for RaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

impl FromStr for RaceStatus {
    type Err = UnknownRaceStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OK" => Ok(Self::Ok),
            "DNS" => Ok(Self::Dns),
            "DNF" => Ok(Self::Dnf),
            "DQ" => Ok(Self::Dq),
            _ => Err(UnknownRaceStatus(s.to_string())),
        }
    }
}

impl Serialize for RaceStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_code())
    }
}

impl<'de> Deserialize<'de> for RaceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_code(&s))
    }
}

/// Error type for unknown race status strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRaceStatus(String);

impl fmt::Display for UnknownRaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown race status: {}", self.0)
    }
}

impl std::error::Error for UnknownRaceStatus {}
