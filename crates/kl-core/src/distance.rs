//! Distance configuration per discipline and gender.
//!
//! Points normalize a raw time to a per-500m scale, so every distance
//! carries a divisor of `meters / 500`. The sets below mirror the national
//! championship programmes the tool was built for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
///
/// These indicate a bug in the caller's static configuration, not a data
/// condition; they are rejected eagerly.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The distance key was empty.
    #[error("distance key cannot be empty")]
    EmptyKey,

    /// The distance length was zero.
    #[error("distance {key} has zero meters")]
    ZeroMeters { key: String },

    /// An unknown discipline or gender code.
    #[error("unknown {field}: {value}")]
    UnknownCode { field: &'static str, value: String },
}

/// One configured race distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distance {
    /// Unique key within a distance set (e.g. `d1_1000`).
    pub key: String,
    /// Race length in meters.
    pub meters: u32,
    /// Display label (e.g. `1st 1000m`).
    pub label: String,
    /// Points divisor: `meters / 500`.
    pub divisor: f64,
}

impl Distance {
    /// Creates a validated distance; the divisor is derived from the length.
    pub fn new(
        key: impl Into<String>,
        meters: u32,
        label: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if meters == 0 {
            return Err(ConfigError::ZeroMeters { key });
        }
        Ok(Self {
            divisor: f64::from(meters) / 500.0,
            key,
            meters,
            label: label.into(),
        })
    }
}

/// Championship discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Sprint,
    Allround,
}

impl Discipline {
    /// Short code used in config files and flags.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sprint => "sprint",
            Self::Allround => "allround",
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sprint => "NK Sprint",
            Self::Allround => "NK Allround",
        }
    }
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Discipline {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sprint" => Ok(Self::Sprint),
            "allround" => Ok(Self::Allround),
            _ => Err(ConfigError::UnknownCode {
                field: "discipline",
                value: s.to_string(),
            }),
        }
    }
}

/// Competition gender category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    /// Short code used in config files and flags.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Men => "men",
            Self::Women => "women",
        }
    }

    /// Display label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Men => "Men",
            Self::Women => "Women",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(Self::Men),
            "women" => Ok(Self::Women),
            _ => Err(ConfigError::UnknownCode {
                field: "gender",
                value: s.to_string(),
            }),
        }
    }
}

/// Internal constructor for the built-in sets; lengths below are non-zero.
fn dist(key: &str, meters: u32, label: &str) -> Distance {
    Distance {
        key: key.to_string(),
        meters,
        label: label.to_string(),
        divisor: f64::from(meters) / 500.0,
    }
}

/// Returns the configured distance set for a discipline/gender combination.
///
/// Sprint runs two 500m/1000m pairs for both categories; allround runs
/// 500/1500/5000/10000 for men and 500/1500/3000/5000 for women. The last
/// distance of an allround set is the final distance subject to
/// qualification.
pub fn distance_set(discipline: Discipline, gender: Gender) -> Vec<Distance> {
    match (discipline, gender) {
        (Discipline::Sprint, _) => vec![
            dist("d1_500", 500, "1st 500m"),
            dist("d1_1000", 1000, "1st 1000m"),
            dist("d2_500", 500, "2nd 500m"),
            dist("d2_1000", 1000, "2nd 1000m"),
        ],
        (Discipline::Allround, Gender::Men) => vec![
            dist("d1_500", 500, "500m"),
            dist("d1_1500", 1500, "1500m"),
            dist("d1_5000", 5000, "5000m"),
            dist("d1_10000", 10000, "10000m"),
        ],
        (Discipline::Allround, Gender::Women) => vec![
            dist("d1_500", 500, "500m"),
            dist("d1_1500", 1500, "1500m"),
            dist("d1_3000", 3000, "3000m"),
            dist("d1_5000", 5000, "5000m"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisor_is_meters_per_500() {
        let d = Distance::new("d1_1000", 1000, "1st 1000m").unwrap();
        assert!((d.divisor - 2.0).abs() < f64::EPSILON);

        let d = Distance::new("d1_10000", 10000, "10000m").unwrap();
        assert!((d.divisor - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert_eq!(Distance::new("", 500, "500m"), Err(ConfigError::EmptyKey));
        assert_eq!(
            Distance::new("d1_500", 0, "500m"),
            Err(ConfigError::ZeroMeters {
                key: "d1_500".to_string()
            })
        );
    }

    #[test]
    fn sprint_sets_have_two_pairs() {
        for gender in [Gender::Men, Gender::Women] {
            let set = distance_set(Discipline::Sprint, gender);
            assert_eq!(set.len(), 4);
            assert_eq!(set[0].meters, 500);
            assert_eq!(set[1].meters, 1000);
            assert_eq!(set[2].meters, 500);
            assert_eq!(set[3].meters, 1000);
        }
    }

    #[test]
    fn allround_sets_differ_by_gender() {
        let men = distance_set(Discipline::Allround, Gender::Men);
        assert_eq!(
            men.iter().map(|d| d.meters).collect::<Vec<_>>(),
            vec![500, 1500, 5000, 10000]
        );

        let women = distance_set(Discipline::Allround, Gender::Women);
        assert_eq!(
            women.iter().map(|d| d.meters).collect::<Vec<_>>(),
            vec![500, 1500, 3000, 5000]
        );
    }

    #[test]
    fn keys_are_unique_within_each_set() {
        for discipline in [Discipline::Sprint, Discipline::Allround] {
            for gender in [Gender::Men, Gender::Women] {
                let set = distance_set(discipline, gender);
                let mut keys: Vec<_> = set.iter().map(|d| d.key.as_str()).collect();
                keys.sort_unstable();
                keys.dedup();
                assert_eq!(keys.len(), set.len());
            }
        }
    }

    #[test]
    fn codes_roundtrip() {
        assert_eq!("sprint".parse::<Discipline>().unwrap(), Discipline::Sprint);
        assert_eq!(
            "allround".parse::<Discipline>().unwrap(),
            Discipline::Allround
        );
        assert!("marathon".parse::<Discipline>().is_err());

        assert_eq!("men".parse::<Gender>().unwrap(), Gender::Men);
        assert_eq!("women".parse::<Gender>().unwrap(), Gender::Women);
        assert!("x".parse::<Gender>().is_err());
    }
}
