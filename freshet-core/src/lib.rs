//! Temporal input resolution for step-driven simulations.
//!
//! A simulation advancing over discrete steps asks, once per step, for the
//! time-series record valid at its current clock. This crate provides the
//! pieces of that loop: a closed set of [time units](units::TimeUnit)
//! normalized to seconds, validated half-open [validity
//! windows](window::TimeWindow), the [resolver](resolve::resolve) that
//! matches a clock against a [series](series::TemporalSeries), the
//! [cached input](resolve::TimeVariantInput) that re-resolves only when its
//! window expires, and the [driver](simulation::Simulation) and
//! [messenger](messenger::Messenger) that run a model across a span while
//! reporting progress.

pub mod messenger;
pub mod resolve;
pub mod series;
pub mod simulation;
pub mod units;
pub mod window;

pub use messenger::{ErrorStrategy, FatalError, Messenger, Verbosity};
pub use resolve::{ResolveError, TimeVariantInput, resolve};
pub use series::{SeriesRecord, TemporalSeries};
pub use simulation::{Model, Progress, RunError, Simulation, StepSize, StepSizeError};
pub use units::{TimeUnit, UnknownUnitError, from_seconds, to_seconds};
pub use window::{InvalidIntervalError, TimeWindow, TimeWindowed};
