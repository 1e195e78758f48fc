use thiserror::Error;
use uom::si::{f64::Time, time::second};

use crate::{
    series::TemporalSeries,
    window::{InvalidIntervalError, TimeWindowed},
};

/// Errors raised while resolving the active record for a simulation clock.
///
/// Neither variant is retryable: resolving again with the same inputs
/// cannot succeed, so both are fatal for the simulation step that
/// triggered them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// The simulation clock falls outside the series' temporal coverage,
    /// or inside a gap between records.
    #[error("no record covers simulation time {clock_seconds} s")]
    NoActiveRecord {
        /// The uncovered clock, in seconds.
        clock_seconds: f64,
    },

    /// The matched record's window failed canonical conversion.
    #[error(transparent)]
    Interval(#[from] InvalidIntervalError),
}

/// Resolves the record covering `clock` into a time-windowed value.
///
/// The clock is converted into the series' native unit, the series is
/// queried for records overlapping that instant, and the first match (the
/// series answers in ascending order of window start) is converted back to
/// canonical time using the record's *own* native unit. Consecutive
/// records form a half-open partition by construction upstream; this
/// function reports the first match and does not repair gaps or overlaps.
///
/// The query is the only interaction with the series, and it is read-only.
///
/// # Errors
///
/// - [`ResolveError::NoActiveRecord`] if no record covers `clock`.
/// - [`ResolveError::Interval`] if the matched record's window is empty
///   after conversion.
pub fn resolve<S>(series: &S, clock: Time) -> Result<TimeWindowed<S::Payload>, ResolveError>
where
    S: TemporalSeries,
{
    let instant = series.native_unit().from_time(clock);

    let record = series
        .query_overlapping(instant)
        .into_iter()
        .next()
        .ok_or(ResolveError::NoActiveRecord {
            clock_seconds: clock.get::<second>(),
        })?;

    let window = record.canonical_window()?;
    Ok(TimeWindowed::new(window, record.into_payload()))
}

/// A time-variant input held by the simulation loop.
///
/// Owns a series and the single cached [`TimeWindowed`] value most recently
/// resolved from it. Each step asks [`at`](Self::at) for the value covering
/// the current clock; while the cached window still covers the clock no
/// query is issued, and on a miss the cache is replaced with a fresh
/// resolution. A failed resolution leaves no cached value behind.
pub struct TimeVariantInput<S: TemporalSeries> {
    series: S,
    current: Option<TimeWindowed<S::Payload>>,
}

impl<S: TemporalSeries> TimeVariantInput<S> {
    /// Wraps a series with an empty cache; the first [`at`](Self::at) call
    /// always resolves.
    #[must_use]
    pub fn new(series: S) -> Self {
        Self {
            series,
            current: None,
        }
    }

    /// The underlying series.
    #[must_use]
    pub fn series(&self) -> &S {
        &self.series
    }

    /// The cached value, if any resolution has succeeded yet.
    #[must_use]
    pub fn current(&self) -> Option<&TimeWindowed<S::Payload>> {
        self.current.as_ref()
    }

    /// Returns the value valid at `clock`, resolving only on a cache miss.
    ///
    /// # Errors
    ///
    /// Propagates [`ResolveError`] when a fresh resolution is required and
    /// fails; the stale cached value is discarded in that case.
    pub fn at(&mut self, clock: Time) -> Result<&TimeWindowed<S::Payload>, ResolveError> {
        let active = match self.current.take() {
            Some(cached) if cached.is_valid_for(clock) => cached,
            _ => resolve(&self.series, clock)?,
        };
        Ok(self.current.insert(active))
    }
}
