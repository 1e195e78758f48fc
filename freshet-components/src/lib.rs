//! Concrete building blocks for Freshet simulations: an in-memory series
//! store, declarative series configuration, and a raster grid payload.

pub mod config;
pub mod grid;
pub mod memory;

pub use config::{BuildError, RecordConfig, SeriesConfig};
pub use grid::Grid;
pub use memory::{MemorySeries, SeriesError};
