use thiserror::Error;
use uom::si::{f64::Time, time::second};

/// Error returned when attempting to build a window whose bounds are not a
/// valid half-open interval.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid half-open interval: start ({start}) must be less than end ({end})")]
pub struct InvalidIntervalError {
    /// The rejected lower bound.
    pub start: f64,
    /// The rejected upper bound.
    pub end: f64,
}

/// A half-open validity interval `[start, end)` in canonical time.
///
/// Both bounds are supplied together and validated atomically: a zero-width
/// or inverted interval never constructs, so every `TimeWindow` in existence
/// satisfies `start < end`. Non-finite bounds fail the same comparison and
/// are rejected as well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    start: Time,
    end: Time,
}

impl TimeWindow {
    /// Creates a window from canonical time bounds.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidIntervalError`] unless `start < end`.
    pub fn new(start: Time, end: Time) -> Result<Self, InvalidIntervalError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(InvalidIntervalError {
                start: start.get::<second>(),
                end: end.get::<second>(),
            })
        }
    }

    /// Creates a window from bounds given in seconds.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidIntervalError`] unless `start < end`.
    pub fn from_seconds(start: f64, end: f64) -> Result<Self, InvalidIntervalError> {
        Self::new(Time::new::<second>(start), Time::new::<second>(end))
    }

    /// The inclusive lower bound.
    #[must_use]
    pub fn start(&self) -> Time {
        self.start
    }

    /// The exclusive upper bound.
    #[must_use]
    pub fn end(&self) -> Time {
        self.end
    }

    /// The width of the window, always positive.
    #[must_use]
    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    /// Returns `true` if `clock` falls within `[start, end)`.
    ///
    /// A pure comparison: start inclusive, end exclusive.
    #[must_use]
    pub fn contains(&self, clock: Time) -> bool {
        self.start <= clock && clock < self.end
    }
}

/// A payload paired with the validity window it was resolved for.
///
/// This is the value the simulation loop caches between steps. It is
/// immutable once constructed: the window and payload are only readable,
/// and a fresh resolution produces a replacement rather than mutating the
/// cached value.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeWindowed<P> {
    window: TimeWindow,
    payload: P,
}

impl<P> TimeWindowed<P> {
    /// Pairs a payload with its validity window.
    #[must_use]
    pub fn new(window: TimeWindow, payload: P) -> Self {
        Self { window, payload }
    }

    /// The validity window.
    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.window
    }

    /// The inclusive start of validity.
    #[must_use]
    pub fn start(&self) -> Time {
        self.window.start
    }

    /// The exclusive end of validity.
    #[must_use]
    pub fn end(&self) -> Time {
        self.window.end
    }

    /// The resolved payload.
    #[must_use]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the value and returns its payload.
    #[must_use]
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Returns `true` if the cached payload is still valid at `clock`.
    ///
    /// The sole predicate the simulation loop uses to decide whether a new
    /// resolution is required: `true` exactly on `[start, end)`.
    #[must_use]
    pub fn is_valid_for(&self, clock: Time) -> bool {
        self.window.contains(clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(value: f64) -> Time {
        Time::new::<second>(value)
    }

    #[test]
    fn zero_width_window_fails() {
        let err = TimeWindow::from_seconds(5.0, 5.0).unwrap_err();
        assert_eq!(err, InvalidIntervalError { start: 5.0, end: 5.0 });
    }

    #[test]
    fn inverted_window_fails() {
        assert!(TimeWindow::from_seconds(10.0, 3.0).is_err());
    }

    #[test]
    fn non_finite_bounds_fail() {
        assert!(TimeWindow::from_seconds(f64::NAN, 10.0).is_err());
        assert!(TimeWindow::from_seconds(0.0, f64::NAN).is_err());
    }

    #[test]
    fn contains_is_inclusive_start_exclusive_end() {
        let window = TimeWindow::from_seconds(10.0, 20.0).unwrap();

        assert!(!window.contains(secs(9.999)));
        assert!(window.contains(secs(10.0)));
        assert!(window.contains(secs(15.0)));
        assert!(!window.contains(secs(20.0)));
        assert!(!window.contains(secs(25.0)));
    }

    #[test]
    fn is_valid_for_matches_the_window() {
        let value = TimeWindowed::new(TimeWindow::from_seconds(0.0, 10.0).unwrap(), "payload");

        assert!(value.is_valid_for(secs(0.0)));
        assert!(value.is_valid_for(secs(9.5)));
        assert!(!value.is_valid_for(secs(10.0)));
        assert!(!value.is_valid_for(secs(-1.0)));
    }

    #[test]
    fn accessors_expose_the_resolved_parts() {
        let window = TimeWindow::from_seconds(0.0, 60.0).unwrap();
        let value = TimeWindowed::new(window, vec![1.0, 2.0]);

        assert_eq!(value.start(), secs(0.0));
        assert_eq!(value.end(), secs(60.0));
        assert_eq!(value.window().duration(), secs(60.0));
        assert_eq!(value.payload(), &vec![1.0, 2.0]);
        assert_eq!(value.into_payload(), vec![1.0, 2.0]);
    }
}
