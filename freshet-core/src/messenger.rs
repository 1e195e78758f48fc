//! Progress and diagnostics sink for simulation runs.
//!
//! A [`Messenger`] is constructed once with an explicit [`Verbosity`] and an
//! [`ErrorStrategy`] and is the single place run-time output goes through.
//! Output is best effort: I/O failures while reporting never fail the
//! simulation.

use std::{
    fmt,
    io::{self, Write},
    process,
};

use jiff::SignedDuration;
use thiserror::Error;
use uom::si::{f64::Time, time::second};

use crate::simulation::Progress;

/// Trailing blanks appended to each line so a shorter message fully
/// overwrites a longer progress line left behind by a carriage return.
const PAD: &str = "                    ";

/// Error carrying an escalated fatal message.
///
/// Produced by [`Messenger::fatal`] when the sink was configured with
/// [`ErrorStrategy::Escalate`]; the caller decides how far it propagates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FatalError {
    /// The escalated message.
    pub message: String,
}

/// How much a [`Messenger`] reports.
///
/// Tiers are ordered: a sink at some tier also emits everything below it.
/// `Quiet` still shows the bare progress percentage; warnings are emitted
/// at every tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Verbosity {
    /// Progress percentage only.
    Quiet,
    /// Informational messages and the detailed progress line.
    Message,
    /// Per-step detail.
    Verbose,
    /// Everything, including internal diagnostics.
    Debug,
}

/// What a [`Messenger`] does with fatal conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ErrorStrategy {
    /// Return a typed [`FatalError`] and let the caller recover or abort.
    Escalate,
    /// Print the message and terminate the process.
    #[default]
    Abort,
}

/// Leveled text sink for simulation progress and diagnostics.
///
/// Verbosity and the fatal-path behavior are fixed at construction; there
/// is no process-wide state. Output goes to stderr unless an alternate
/// writer is injected with [`with_output`](Self::with_output).
pub struct Messenger {
    verbosity: Verbosity,
    on_fatal: ErrorStrategy,
    output: Box<dyn Write + Send>,
}

impl Messenger {
    /// Creates a sink writing to stderr.
    #[must_use]
    pub fn new(verbosity: Verbosity, on_fatal: ErrorStrategy) -> Self {
        Self::with_output(verbosity, on_fatal, Box::new(io::stderr()))
    }

    /// Creates a sink writing to `output` instead of stderr.
    #[must_use]
    pub fn with_output(
        verbosity: Verbosity,
        on_fatal: ErrorStrategy,
        output: Box<dyn Write + Send>,
    ) -> Self {
        Self {
            verbosity,
            on_fatal,
            output,
        }
    }

    /// The configured verbosity.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Returns `true` if fatal conditions escalate instead of aborting.
    ///
    /// Callers forward this flag when deciding whether a failure ends the
    /// whole run or is returned for recovery.
    #[must_use]
    pub fn raises_on_error(&self) -> bool {
        self.on_fatal == ErrorStrategy::Escalate
    }

    /// Emits an informational message (tier [`Verbosity::Message`]).
    pub fn message(&mut self, text: &str) {
        self.emit(Verbosity::Message, text);
    }

    /// Emits a detailed message (tier [`Verbosity::Verbose`]).
    pub fn verbose(&mut self, text: &str) {
        self.emit(Verbosity::Verbose, text);
    }

    /// Emits a diagnostic message (tier [`Verbosity::Debug`]).
    pub fn debug(&mut self, text: &str) {
        self.emit(Verbosity::Debug, text);
    }

    /// Emits a warning. Warnings are never filtered by verbosity.
    pub fn warning(&mut self, text: &str) {
        let _ = writeln!(self.output, "WARNING: {text}{PAD}");
    }

    /// Reports run advancement for the current clock.
    ///
    /// At [`Verbosity::Quiet`] this is a bare percentage; at
    /// [`Verbosity::Message`] and above it includes the simulated time and
    /// an ETA extrapolated from wall-clock progress. The line ends with a
    /// carriage return so the next report overwrites it in place.
    pub fn percent(&mut self, progress: &Progress, clock: Time) {
        let advance = 100.0 * progress.fraction(clock);
        let line = if self.verbosity == Verbosity::Quiet {
            format!("{advance:.1}%\r")
        } else {
            let sim = SignedDuration::from_secs(clock.get::<second>() as i64);
            let eta = progress.eta(clock);
            format!("Time: {sim:#}  Advance: {advance:.1}%  ETA: {eta:#}{PAD}\r")
        };
        let _ = self.output.write_all(line.as_bytes());
        let _ = self.output.flush();
    }

    /// Handles a fatal condition according to the configured strategy.
    ///
    /// With [`ErrorStrategy::Escalate`] this returns a [`FatalError`] for
    /// the caller to propagate. With [`ErrorStrategy::Abort`] the message
    /// is printed with an `ERROR: ` prefix and the process terminates with
    /// a nonzero status; this function does not return in that case.
    pub fn fatal(&mut self, text: &str) -> FatalError {
        match self.on_fatal {
            ErrorStrategy::Escalate => FatalError {
                message: text.to_owned(),
            },
            ErrorStrategy::Abort => {
                let _ = writeln!(self.output, "ERROR: {text}{PAD}");
                let _ = self.output.flush();
                process::exit(1);
            }
        }
    }

    fn emit(&mut self, tier: Verbosity, text: &str) {
        if self.verbosity >= tier {
            let _ = writeln!(self.output, "{text}{PAD}");
        }
    }
}

impl fmt::Debug for Messenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messenger")
            .field("verbosity", &self.verbosity)
            .field("on_fatal", &self.on_fatal)
            .finish_non_exhaustive()
    }
}
