use std::ops::Deref;

use thiserror::Error;
use uom::si::{f64::Time, time::second};

/// Error returned when constructing an invalid [`StepSize`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum StepSizeError {
    #[error("step size must be greater than zero, got {0} s")]
    NotPositive(f64),
}

/// A strictly positive time increment used to advance the simulation clock.
///
/// Zero, negative, and NaN durations never construct, so the driver's loop
/// is guaranteed to make forward progress with any `StepSize` it is handed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct StepSize(Time);

impl StepSize {
    /// Creates a step size from a canonical [`Time`] value.
    ///
    /// # Errors
    ///
    /// Returns [`StepSizeError::NotPositive`] unless the duration is
    /// strictly greater than zero.
    pub fn from_time(time: Time) -> Result<Self, StepSizeError> {
        let seconds = time.get::<second>();
        if seconds > 0.0 {
            Ok(Self(time))
        } else {
            Err(StepSizeError::NotPositive(seconds))
        }
    }

    /// Creates a step size from a duration in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`StepSizeError::NotPositive`] unless `seconds` is strictly
    /// greater than zero.
    pub fn from_seconds(seconds: f64) -> Result<Self, StepSizeError> {
        Self::from_time(Time::new::<second>(seconds))
    }

    /// Consumes the step size and returns the underlying [`Time`].
    #[must_use]
    pub fn into_inner(self) -> Time {
        self.0
    }
}

impl TryFrom<Time> for StepSize {
    type Error = StepSizeError;

    fn try_from(time: Time) -> Result<Self, Self::Error> {
        Self::from_time(time)
    }
}

impl Deref for StepSize {
    type Target = Time;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
