use std::{fmt, str::FromStr};

use thiserror::Error;
use uom::si::{
    f64::Time,
    time::{day, hour, minute, second},
};

/// Error returned when a time unit name is not recognized.
///
/// Unit names enter the system wherever a series declares its timing in
/// text form (configuration files, store metadata). There is no implicit
/// fallback: an unrecognized name always fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized time unit \"{name}\"")]
pub struct UnknownUnitError {
    /// The name that failed to parse.
    pub name: String,
}

/// The time unit a series record declares its validity window in.
///
/// A closed set: simulations normalize everything to seconds internally,
/// and series data in the wild uses one of these four units. Conversion is
/// routed through [`uom`], so the factors are exactly 1, 60, 3600, and
/// 86400 seconds per unit.
///
/// Parsing accepts both singular and plural lowercase names:
///
/// ```
/// use freshet_core::units::TimeUnit;
///
/// assert_eq!("hours".parse::<TimeUnit>().unwrap(), TimeUnit::Hours);
/// assert_eq!("hour".parse::<TimeUnit>().unwrap(), TimeUnit::Hours);
/// assert!("fortnights".parse::<TimeUnit>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum TimeUnit {
    #[cfg_attr(feature = "serde-derive", serde(alias = "second"))]
    Seconds,
    #[cfg_attr(feature = "serde-derive", serde(alias = "minute"))]
    Minutes,
    #[cfg_attr(feature = "serde-derive", serde(alias = "hour"))]
    Hours,
    #[cfg_attr(feature = "serde-derive", serde(alias = "day"))]
    Days,
}

impl TimeUnit {
    /// Converts a quantity expressed in this unit into canonical time.
    #[must_use]
    pub fn to_time(self, value: f64) -> Time {
        match self {
            Self::Seconds => Time::new::<second>(value),
            Self::Minutes => Time::new::<minute>(value),
            Self::Hours => Time::new::<hour>(value),
            Self::Days => Time::new::<day>(value),
        }
    }

    /// Converts a canonical time into a quantity expressed in this unit.
    ///
    /// Exact multiplicative inverse of [`to_time`](Self::to_time) for the
    /// same unit.
    #[must_use]
    pub fn from_time(self, time: Time) -> f64 {
        match self {
            Self::Seconds => time.get::<second>(),
            Self::Minutes => time.get::<minute>(),
            Self::Hours => time.get::<hour>(),
            Self::Days => time.get::<day>(),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
            Self::Days => "days",
        };
        f.write_str(name)
    }
}

impl FromStr for TimeUnit {
    type Err = UnknownUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "second" | "seconds" => Ok(Self::Seconds),
            "minute" | "minutes" => Ok(Self::Minutes),
            "hour" | "hours" => Ok(Self::Hours),
            "day" | "days" => Ok(Self::Days),
            other => Err(UnknownUnitError {
                name: other.to_owned(),
            }),
        }
    }
}

/// Converts a quantity in the named unit into seconds.
///
/// # Errors
///
/// Returns an [`UnknownUnitError`] if `unit` is not a recognized name.
pub fn to_seconds(unit: &str, value: f64) -> Result<f64, UnknownUnitError> {
    Ok(unit.parse::<TimeUnit>()?.to_time(value).get::<second>())
}

/// Converts a quantity in seconds into the named unit.
///
/// # Errors
///
/// Returns an [`UnknownUnitError`] if `unit` is not a recognized name.
pub fn from_seconds(unit: &str, seconds: f64) -> Result<f64, UnknownUnitError> {
    Ok(unit.parse::<TimeUnit>()?.from_time(Time::new::<second>(seconds)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const ALL: [TimeUnit; 4] = [
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
    ];

    #[test]
    fn conversion_factors_match_the_unit_table() {
        assert_relative_eq!(TimeUnit::Seconds.to_time(1.0).get::<second>(), 1.0);
        assert_relative_eq!(TimeUnit::Minutes.to_time(1.0).get::<second>(), 60.0);
        assert_relative_eq!(TimeUnit::Hours.to_time(1.0).get::<second>(), 3600.0);
        assert_relative_eq!(TimeUnit::Days.to_time(1.0).get::<second>(), 86400.0);
    }

    #[test]
    fn round_trip_is_exact_for_every_unit() {
        for unit in ALL {
            for value in [0.0, 1.0, 2.0, 7.5, 24.0, 365.0, 1e6] {
                assert_eq!(unit.from_time(unit.to_time(value)), value);
            }
        }
    }

    #[test]
    fn parses_singular_and_plural_names() {
        assert_eq!("seconds".parse::<TimeUnit>().unwrap(), TimeUnit::Seconds);
        assert_eq!("second".parse::<TimeUnit>().unwrap(), TimeUnit::Seconds);
        assert_eq!("minutes".parse::<TimeUnit>().unwrap(), TimeUnit::Minutes);
        assert_eq!("minute".parse::<TimeUnit>().unwrap(), TimeUnit::Minutes);
        assert_eq!("hours".parse::<TimeUnit>().unwrap(), TimeUnit::Hours);
        assert_eq!("hour".parse::<TimeUnit>().unwrap(), TimeUnit::Hours);
        assert_eq!("days".parse::<TimeUnit>().unwrap(), TimeUnit::Days);
        assert_eq!("day".parse::<TimeUnit>().unwrap(), TimeUnit::Days);
    }

    #[test]
    fn unrecognized_names_fail_both_string_conversions() {
        let err = to_seconds("weeks", 1.0).unwrap_err();
        assert_eq!(err.name, "weeks");

        let err = from_seconds("Weeks", 1.0).unwrap_err();
        assert_eq!(err.name, "Weeks");
    }

    #[test]
    fn string_conversions_agree_with_the_typed_api() {
        assert_relative_eq!(to_seconds("hours", 2.0).unwrap(), 7200.0);
        assert_relative_eq!(from_seconds("minutes", 90.0).unwrap(), 1.5);
        assert_relative_eq!(to_seconds("seconds", 5.0).unwrap(), 5.0);
    }

    #[test]
    fn display_uses_plural_names() {
        for unit in ALL {
            assert_eq!(unit.to_string().parse::<TimeUnit>().unwrap(), unit);
        }
        assert_eq!(TimeUnit::Days.to_string(), "days");
    }
}
