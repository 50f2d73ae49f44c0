//! Presentation loop (core B): the sole reader of the inter-core channel.
//!
//! [`Presentation`] owns the latest-value table, the display and the
//! actuators. Nothing else can reach them: the whole struct is moved into
//! the core-B thread at boot.
//!
//! ```text
//!  SampleReader ──▶ ┌──────────────────────────────┐ ──▶ DisplayPort (full redraw)
//!                   │ Readings → rules::evaluate   │
//!                   └──────────────────────────────┘ ──▶ ActuatorPort (on change)
//! ```

use log::{debug, error, info};

use crate::channel::SampleReader;
use crate::config::SystemConfig;
use crate::error::ProtocolError;
use crate::protocol::Sample;

use super::ports::{ActuatorPort, DisplayPort};
use super::readings::Readings;
use super::rules::{self, Actuation};
use super::screen;

pub struct Presentation<D, A> {
    readings: Readings,
    display: D,
    actuators: A,
    config: SystemConfig,
    /// Last actuation written to the outputs.
    applied: Option<Actuation>,
    received: u64,
    rejected: u64,
}

impl<D: DisplayPort, A: ActuatorPort> Presentation<D, A> {
    /// Table starts all-unknown. Nothing is written to the hardware until
    /// [`start`](Self::start).
    pub fn new(display: D, actuators: A, config: SystemConfig) -> Self {
        Self {
            readings: Readings::new(),
            display,
            actuators,
            config,
            applied: None,
            received: 0,
            rejected: 0,
        }
    }

    /// Apply the initial profile and draw the placeholder screen.
    pub fn start(&mut self) {
        info!("Presentation started");
        self.refresh();
    }

    /// Decode one sample into the table, re-evaluate and redraw.
    pub fn handle(&mut self, sample: Sample) {
        self.received += 1;
        debug!("PRES | <- {}", sample);
        self.readings.apply(sample);
        self.refresh();
    }

    /// Block for one sample pair and process it.
    ///
    /// A pair that fails to decode is logged and dropped; the table, the
    /// outputs and the screen are left as they were.
    pub fn step(&mut self, reader: &mut SampleReader<'_>) -> Result<(), ProtocolError> {
        match reader.recv() {
            Ok(sample) => {
                self.handle(sample);
                Ok(())
            }
            Err(e) => {
                self.rejected += 1;
                error!("PRES | dropped pair: {}", e);
                Err(e)
            }
        }
    }

    /// Run forever. The channel pop is the only suspension point.
    pub fn run(mut self, reader: &mut SampleReader<'_>) -> ! {
        self.start();
        loop {
            let _ = self.step(reader);
        }
    }

    /// Evaluate the rules on the full table, write outputs if the profile
    /// changed, redraw the whole screen.
    pub fn refresh(&mut self) {
        let actuation = rules::evaluate(&self.readings, &self.config);
        if self.applied != Some(actuation) {
            info!(
                "PRES | T={:?} U={:?} | leds={:?} buzzer={}",
                self.readings.temperature_c,
                self.readings.humidity_percent,
                actuation.indicators,
                if actuation.buzzer { "ON (ALARM)" } else { "off" },
            );
            self.actuators.set_indicators(actuation.indicators);
            self.actuators.set_buzzer(actuation.buzzer);
            self.applied = Some(actuation);
        }
        screen::render(&mut self.display, &self.readings, &actuation, &self.config);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    pub fn applied(&self) -> Option<Actuation> {
        self.applied
    }

    /// Samples accepted since startup.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Pairs dropped because they did not decode.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn actuators(&self) -> &A {
        &self.actuators
    }
}
