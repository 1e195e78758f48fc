//! Drives a small basin model fed by a time-variant rainfall series.
//!
//! Two rainfall records cover the first six hours of the run: a one-hour
//! burst followed by five hours of steady drizzle. The model resolves the
//! active raster once per window and accumulates depth; progress is
//! reported to stderr.
//!
//! Run with: `cargo run --example rainfall`

use std::collections::HashMap;

use freshet_components::{Grid, MemorySeries, RecordConfig, SeriesConfig};
use freshet_core::{
    ErrorStrategy, Messenger, Model, ResolveError, Simulation, StepSize, TimeUnit,
    TimeVariantInput, TimeWindow, Verbosity,
};
use uom::si::{
    f64::Time,
    time::{hour, second},
};

/// Accumulates rainfall depth from whichever raster is currently active.
struct Basin {
    rainfall: TimeVariantInput<MemorySeries<Grid>>,
    depth_mm: f64,
}

impl Model for Basin {
    type Error = ResolveError;

    fn advance(&mut self, clock: Time, dt: Time) -> Result<(), Self::Error> {
        let active = self.rainfall.at(clock)?;
        let intensity = active.payload().mean(); // mm per hour
        self.depth_mm += intensity * dt.get::<hour>();
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SeriesConfig {
        unit: TimeUnit::Hours,
        records: vec![
            RecordConfig {
                name: "burst".to_owned(),
                unit: TimeUnit::Hours,
                start: 0.0,
                end: 1.0,
            },
            RecordConfig {
                name: "steady".to_owned(),
                unit: TimeUnit::Hours,
                start: 1.0,
                end: 6.0,
            },
        ],
    };
    let payloads = HashMap::from([
        ("burst".to_owned(), Grid::filled(4, 4, 35.0)),
        ("steady".to_owned(), Grid::filled(4, 4, 4.0)),
    ]);
    let rainfall = TimeVariantInput::new(config.build(payloads)?);

    let span = TimeWindow::new(Time::new::<hour>(0.0), Time::new::<hour>(6.0))?;
    let dt = StepSize::from_seconds(300.0)?;

    let mut messenger = Messenger::new(Verbosity::Message, ErrorStrategy::Escalate);
    let mut simulation = Simulation::new(
        Basin {
            rainfall,
            depth_mm: 0.0,
        },
        span,
        dt,
    );

    simulation.run(&mut messenger)?;
    eprintln!();

    let basin = simulation.model();
    println!(
        "simulated {} s of rainfall, accumulated depth {:.1} mm",
        simulation.clock().get::<second>(),
        basin.depth_mm
    );
    Ok(())
}
