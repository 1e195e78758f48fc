use thiserror::Error;
use uom::si::time::second as second_unit;

use freshet_core::{SeriesRecord, TemporalSeries, TimeUnit, TimeWindow};

/// Error returned when constructing a [`MemorySeries`] from invalid records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// Two records' validity windows overlap once normalized to canonical
    /// time.
    #[error("records \"{first}\" and \"{second}\" have overlapping validity windows")]
    Overlap {
        /// The earlier of the two conflicting records.
        first: String,
        /// The later of the two conflicting records.
        second: String,
    },
}

/// An in-memory time-indexed series of records.
///
/// The embedded stand-in for an external time-series store. Construction
/// sorts records by the canonical start of their windows and rejects
/// overlaps, so queries can rely on ascending order and at most one match.
/// Gaps between records are permitted; a query inside a gap simply returns
/// nothing, and resolution reports the missing coverage rather than
/// repairing it.
///
/// Overlap is checked in canonical seconds, so records declaring different
/// native units are compared correctly.
#[derive(Debug, Clone)]
pub struct MemorySeries<P> {
    unit: TimeUnit,
    records: Vec<SeriesRecord<P>>,
}

impl<P> MemorySeries<P> {
    /// Creates a series answering queries in `unit`.
    ///
    /// Records may be given in any order; the stored series is ordered by
    /// increasing canonical window start.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::Overlap`] if any two records' canonical
    /// windows share an instant.
    pub fn new(
        unit: TimeUnit,
        records: impl IntoIterator<Item = SeriesRecord<P>>,
    ) -> Result<Self, SeriesError> {
        let mut records: Vec<_> = records.into_iter().collect();
        records.sort_by(|a, b| canonical_start(a).total_cmp(&canonical_start(b)));

        if let Some(pair) = records
            .windows(2)
            .find(|pair| canonical_start(&pair[1]) < canonical_end(&pair[0]))
        {
            return Err(SeriesError::Overlap {
                first: pair[0].name().to_owned(),
                second: pair[1].name().to_owned(),
            });
        }

        Ok(Self { unit, records })
    }

    /// The stored records, ascending by canonical window start.
    #[must_use]
    pub fn records(&self) -> &[SeriesRecord<P>] {
        &self.records
    }

    /// The canonical window from the first record's start to the last
    /// record's end, or `None` for an empty series.
    ///
    /// The covered span may still contain gaps between records.
    #[must_use]
    pub fn span(&self) -> Option<TimeWindow> {
        let first = self.records.first()?;
        let last = self.records.last()?;
        TimeWindow::new(
            first.native_unit().to_time(first.native_start()),
            last.native_unit().to_time(last.native_end()),
        )
        .ok()
    }

    /// The number of records in the series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the series holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn canonical_start<P>(record: &SeriesRecord<P>) -> f64 {
    record
        .native_unit()
        .to_time(record.native_start())
        .get::<second_unit>()
}

fn canonical_end<P>(record: &SeriesRecord<P>) -> f64 {
    record
        .native_unit()
        .to_time(record.native_end())
        .get::<second_unit>()
}

impl<P: Clone> TemporalSeries for MemorySeries<P> {
    type Payload = P;

    fn native_unit(&self) -> TimeUnit {
        self.unit
    }

    fn query_overlapping(&self, instant: f64) -> Vec<SeriesRecord<P>> {
        let clock = self.unit.to_time(instant);
        self.records
            .iter()
            .filter(|record| {
                let unit = record.native_unit();
                unit.to_time(record.native_start()) <= clock
                    && clock < unit.to_time(record.native_end())
            })
            .cloned()
            .collect()
    }
}
