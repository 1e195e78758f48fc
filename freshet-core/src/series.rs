use crate::{
    units::TimeUnit,
    window::{InvalidIntervalError, TimeWindow},
};

/// One named entry of a time-indexed series.
///
/// A record declares its own native time unit and a half-open validity
/// window `[start, end)` expressed in that unit. Records are read-only once
/// built; the payload travels with the record until resolution claims it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord<P> {
    name: String,
    unit: TimeUnit,
    start: f64,
    end: f64,
    payload: P,
}

impl<P> SeriesRecord<P> {
    /// Creates a record with a validity window in its native unit.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidIntervalError`] unless `start < end`.
    pub fn new(
        name: impl Into<String>,
        unit: TimeUnit,
        start: f64,
        end: f64,
        payload: P,
    ) -> Result<Self, InvalidIntervalError> {
        if start < end {
            Ok(Self {
                name: name.into(),
                unit,
                start,
                end,
                payload,
            })
        } else {
            Err(InvalidIntervalError { start, end })
        }
    }

    /// The record's name within its series.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unit the record's own window is expressed in.
    ///
    /// A per-record attribute: records within one series may declare
    /// different units, and conversions must use each record's own.
    #[must_use]
    pub fn native_unit(&self) -> TimeUnit {
        self.unit
    }

    /// The inclusive window start, in the record's native unit.
    #[must_use]
    pub fn native_start(&self) -> f64 {
        self.start
    }

    /// The exclusive window end, in the record's native unit.
    #[must_use]
    pub fn native_end(&self) -> f64 {
        self.end
    }

    /// The record's payload.
    #[must_use]
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Consumes the record and returns its payload.
    #[must_use]
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// The record's validity window converted to canonical time, using the
    /// record's own native unit.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidIntervalError`] if the converted bounds collapse
    /// to an empty interval.
    pub fn canonical_window(&self) -> Result<TimeWindow, InvalidIntervalError> {
        TimeWindow::new(self.unit.to_time(self.start), self.unit.to_time(self.end))
    }
}

/// Read-only access to a time-indexed series of records.
///
/// The store behind this trait is a black box: it may be an embedded
/// collection, a database binding, or anything else that can report which
/// records cover an instant. Implementations declare the unit query
/// instants are expressed in and answer overlap queries in ascending order
/// of window start.
pub trait TemporalSeries {
    /// The payload type carried by this series' records.
    type Payload;

    /// The unit in which query instants are expressed.
    fn native_unit(&self) -> TimeUnit;

    /// Records whose native window contains `instant`, ascending by window
    /// start. An empty result means no record covers the instant.
    ///
    /// `instant` is expressed in the series' [`native_unit`], not in
    /// canonical time.
    ///
    /// [`native_unit`]: Self::native_unit
    fn query_overlapping(&self, instant: f64) -> Vec<SeriesRecord<Self::Payload>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Time, time::second};

    #[test]
    fn record_rejects_an_empty_window() {
        let err = SeriesRecord::new("empty", TimeUnit::Hours, 2.0, 2.0, ()).unwrap_err();
        assert_eq!(err.start, 2.0);
        assert_eq!(err.end, 2.0);
    }

    #[test]
    fn record_rejects_an_inverted_window() {
        assert!(SeriesRecord::new("backwards", TimeUnit::Hours, 3.0, 1.0, ()).is_err());
    }

    #[test]
    fn accessors_report_native_values() {
        let record = SeriesRecord::new("rain", TimeUnit::Minutes, 5.0, 20.0, 42).unwrap();

        assert_eq!(record.name(), "rain");
        assert_eq!(record.native_unit(), TimeUnit::Minutes);
        assert_eq!(record.native_start(), 5.0);
        assert_eq!(record.native_end(), 20.0);
        assert_eq!(record.payload(), &42);
        assert_eq!(record.into_payload(), 42);
    }

    #[test]
    fn canonical_window_uses_the_records_own_unit() {
        let record = SeriesRecord::new("rain", TimeUnit::Hours, 1.0, 2.5, ()).unwrap();
        let window = record.canonical_window().unwrap();

        assert_eq!(window.start(), Time::new::<second>(3600.0));
        assert_eq!(window.end(), Time::new::<second>(9000.0));
    }
}
