mod progress;
mod step_size;

pub use progress::Progress;
pub use step_size::{StepSize, StepSizeError};

use thiserror::Error;
use uom::si::f64::Time;

use crate::{messenger::Messenger, window::TimeWindow};

/// A physical model advanced over discrete simulation steps.
///
/// The driver calls [`advance`](Self::advance) once per step, synchronously,
/// from a single control loop. Implementations resolve their time-variant
/// inputs inside `advance` (typically through a
/// [`TimeVariantInput`](crate::resolve::TimeVariantInput)) and update their
/// own state.
pub trait Model {
    /// The error type returned when a step fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Advances the model by one step of size `dt` at simulation time
    /// `clock`.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type; a step either completes or
    /// fails as a whole.
    fn advance(&mut self, clock: Time, dt: Time) -> Result<(), Self::Error>;
}

/// Error returned when a simulation run fails and the messenger is
/// configured to escalate.
#[derive(Debug, Error)]
pub enum RunError<E>
where
    E: std::error::Error + 'static,
{
    /// The model failed to advance a step.
    #[error("model error: {0}")]
    Model(#[source] E),
}

/// Drives a [`Model`] from the start of a simulated span to its end.
///
/// Each iteration reports progress through the [`Messenger`], advances the
/// model by one step, and moves the clock forward. The final step is
/// shortened when the remaining span is smaller than the step size, so the
/// run lands exactly on the span's end.
pub struct Simulation<M> {
    model: M,
    span: TimeWindow,
    dt: StepSize,
    clock: Time,
}

impl<M: Model> Simulation<M> {
    /// Creates a run over `span` advancing in steps of `dt`, with the clock
    /// positioned at the span's start.
    #[must_use]
    pub fn new(model: M, span: TimeWindow, dt: StepSize) -> Self {
        Self {
            model,
            span,
            dt,
            clock: span.start(),
        }
    }

    /// The model being driven.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// The current simulation clock.
    #[must_use]
    pub fn clock(&self) -> Time {
        self.clock
    }

    /// The simulated span this run covers.
    #[must_use]
    pub fn span(&self) -> TimeWindow {
        self.span
    }

    /// Consumes the run and returns the model.
    #[must_use]
    pub fn into_model(self) -> M {
        self.model
    }

    /// Runs from the current clock to the end of the span.
    ///
    /// A model failure is routed through the messenger's fatal path: with
    /// [`ErrorStrategy::Abort`](crate::messenger::ErrorStrategy::Abort) the
    /// process terminates there, and with
    /// [`ErrorStrategy::Escalate`](crate::messenger::ErrorStrategy::Escalate)
    /// the typed error is returned to the caller. No automatic retry in
    /// either case.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Model`] when a step fails and the messenger
    /// escalates.
    pub fn run(&mut self, messenger: &mut Messenger) -> Result<(), RunError<M::Error>> {
        let progress = Progress::new(self.span);

        while self.clock < self.span.end() {
            messenger.percent(&progress, self.clock);

            let remaining = self.span.end() - self.clock;
            let dt = if remaining < *self.dt {
                remaining
            } else {
                *self.dt
            };

            if let Err(err) = self.model.advance(self.clock, dt) {
                if messenger.raises_on_error() {
                    return Err(RunError::Model(err));
                }
                messenger.fatal(&err.to_string());
            }

            self.clock += dt;
        }

        messenger.percent(&progress, self.clock);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use thiserror::Error;
    use uom::si::time::second;

    use crate::messenger::{ErrorStrategy, Verbosity};

    fn secs(value: f64) -> Time {
        Time::new::<second>(value)
    }

    fn quiet_messenger() -> Messenger {
        Messenger::with_output(
            Verbosity::Quiet,
            ErrorStrategy::Escalate,
            Box::new(Vec::<u8>::new()),
        )
    }

    /// Records every `(clock, dt)` pair the driver hands it.
    #[derive(Default)]
    struct Recorder {
        steps: Vec<(f64, f64)>,
    }

    impl Model for Recorder {
        type Error = Infallible;

        fn advance(&mut self, clock: Time, dt: Time) -> Result<(), Self::Error> {
            self.steps
                .push((clock.get::<second>(), dt.get::<second>()));
            Ok(())
        }
    }

    #[derive(Debug, Error)]
    #[error("failed at {0} s")]
    struct FailAt(f64);

    struct FailingModel {
        fail_at: f64,
    }

    impl Model for FailingModel {
        type Error = FailAt;

        fn advance(&mut self, clock: Time, _dt: Time) -> Result<(), Self::Error> {
            let seconds = clock.get::<second>();
            if seconds >= self.fail_at {
                Err(FailAt(seconds))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn steps_cover_the_whole_span() {
        let span = TimeWindow::from_seconds(0.0, 20.0).unwrap();
        let dt = StepSize::from_seconds(5.0).unwrap();
        let mut sim = Simulation::new(Recorder::default(), span, dt);

        sim.run(&mut quiet_messenger()).unwrap();

        assert_eq!(
            sim.model().steps,
            vec![(0.0, 5.0), (5.0, 5.0), (10.0, 5.0), (15.0, 5.0)]
        );
        assert_eq!(sim.clock(), secs(20.0));
    }

    #[test]
    fn final_step_is_shortened_to_land_on_the_span_end() {
        let span = TimeWindow::from_seconds(0.0, 10.0).unwrap();
        let dt = StepSize::from_seconds(4.0).unwrap();
        let mut sim = Simulation::new(Recorder::default(), span, dt);

        sim.run(&mut quiet_messenger()).unwrap();

        assert_eq!(
            sim.model().steps,
            vec![(0.0, 4.0), (4.0, 4.0), (8.0, 2.0)]
        );
        assert_eq!(sim.clock(), secs(10.0));
    }

    #[test]
    fn model_failure_escalates_as_a_run_error() {
        let span = TimeWindow::from_seconds(0.0, 30.0).unwrap();
        let dt = StepSize::from_seconds(10.0).unwrap();
        let mut sim = Simulation::new(FailingModel { fail_at: 20.0 }, span, dt);

        let err = sim.run(&mut quiet_messenger()).unwrap_err();

        let RunError::Model(source) = err;
        assert_eq!(source.0, 20.0);
        // The clock stays where the failing step began.
        assert_eq!(sim.clock(), secs(20.0));
    }
}
