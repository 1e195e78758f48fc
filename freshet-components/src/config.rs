use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use freshet_core::{InvalidIntervalError, SeriesRecord, TimeUnit};

use crate::memory::{MemorySeries, SeriesError};

/// Declarative description of one series record.
///
/// The payload is referenced by the record's name and supplied separately
/// when the series is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordConfig {
    /// Name of the record, and of the payload paired with it.
    pub name: String,
    /// Unit of the record's own validity window.
    pub unit: TimeUnit,
    /// Inclusive window start, in `unit`.
    pub start: f64,
    /// Exclusive window end, in `unit`.
    pub end: f64,
}

/// Declarative description of a whole series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    /// Unit the series answers queries in.
    pub unit: TimeUnit,
    /// The records of the series, in any order.
    pub records: Vec<RecordConfig>,
}

/// Error returned when building a series from its configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// A configured record has no payload with a matching name.
    #[error("no payload named \"{0}\" was provided")]
    MissingPayload(String),

    /// A configured record's window is empty or inverted.
    #[error(transparent)]
    Window(#[from] InvalidIntervalError),

    /// The configured records do not form a valid series.
    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl SeriesConfig {
    /// Pairs each configured record with its named payload and builds the
    /// series.
    ///
    /// # Errors
    ///
    /// - [`BuildError::MissingPayload`] if a record's name has no entry in
    ///   `payloads`.
    /// - [`BuildError::Window`] if a record's window is invalid.
    /// - [`BuildError::Series`] if the records overlap.
    pub fn build<P>(self, mut payloads: HashMap<String, P>) -> Result<MemorySeries<P>, BuildError> {
        let mut records = Vec::with_capacity(self.records.len());

        for entry in self.records {
            let payload = payloads
                .remove(&entry.name)
                .ok_or_else(|| BuildError::MissingPayload(entry.name.clone()))?;
            records.push(SeriesRecord::new(
                entry.name,
                entry.unit,
                entry.start,
                entry.end,
                payload,
            )?);
        }

        Ok(MemorySeries::new(self.unit, records)?)
    }
}
