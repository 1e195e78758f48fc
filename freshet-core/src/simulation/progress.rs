use std::time::Instant;

use jiff::SignedDuration;
use uom::si::{f64::Time, time::second};

use crate::window::TimeWindow;

/// Tracks advancement of a run through its simulated span.
///
/// Pairs the simulated span with the wall-clock instant the run began, so
/// reporting can show both the completed fraction and a wall-clock ETA.
#[derive(Debug, Clone)]
pub struct Progress {
    span: TimeWindow,
    begun: Instant,
}

impl Progress {
    /// Starts tracking a run over `span`, stamping the wall-clock start.
    #[must_use]
    pub fn new(span: TimeWindow) -> Self {
        Self {
            span,
            begun: Instant::now(),
        }
    }

    /// The simulated span being tracked.
    #[must_use]
    pub fn span(&self) -> TimeWindow {
        self.span
    }

    /// Fraction of the simulated span completed at `clock`, in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self, clock: Time) -> f64 {
        let advanced = (clock - self.span.start()).get::<second>();
        let total = self.span.duration().get::<second>();
        (advanced / total).clamp(0.0, 1.0)
    }

    /// Estimated wall-clock time remaining at `clock`.
    ///
    /// Extrapolates from the wall-clock time spent per simulated second so
    /// far. Before any simulated progress exists there is no rate to
    /// extrapolate from and the estimate is zero.
    #[must_use]
    pub fn eta(&self, clock: Time) -> SignedDuration {
        let advanced = (clock - self.span.start()).get::<second>();
        if advanced <= 0.0 {
            return SignedDuration::ZERO;
        }

        let rate = self.begun.elapsed().as_secs_f64() / advanced;
        let remaining = (self.span.end() - clock).get::<second>().max(0.0);
        SignedDuration::from_secs((remaining * rate) as i64)
    }
}
