//! Acquisition loop (core A): the sole writer of the inter-core channel.
//!
//! Each iteration services every sensor whose own cadence has elapsed:
//!
//! | Source      | Due when                                  | Sends                          |
//! |-------------|-------------------------------------------|--------------------------------|
//! | Continuous  | `climate_interval_ms` since last read     | one reading per quantity, or one failure per quantity |
//! | Analog      | `joystick_interval_ms` since last read    | raw count                      |
//! | Identity    | `tag_poll_interval_ms`, outside cooldown  | tag / tag failure, only if a tag is present |
//!
//! Timestamps are wrapping `u32` milliseconds; a source never read before is
//! due immediately.

use log::{debug, info, warn};

use crate::channel::SampleSink;
use crate::config::SystemConfig;
use crate::protocol::Sample;

use super::ports::{AnalogSensor, Clock, ContinuousSensor, IdentitySensor};

type BoxedContinuous = Box<dyn ContinuousSensor + Send>;
type BoxedAnalog = Box<dyn AnalogSensor + Send>;
type BoxedIdentity = Box<dyn IdentitySensor + Send>;

/// Per-source cadence bookkeeping.
#[derive(Debug, Clone, Copy)]
struct Cadence {
    interval_ms: u32,
    last_ms: Option<u32>,
}

impl Cadence {
    fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    fn is_due(&self, now_ms: u32) -> bool {
        self.last_ms
            .is_none_or(|last| now_ms.wrapping_sub(last) >= self.interval_ms)
    }

    fn mark(&mut self, now_ms: u32) {
        self.last_ms = Some(now_ms);
    }
}

struct Polled<S> {
    sensor: S,
    cadence: Cadence,
}

struct IdentitySource {
    sensor: BoxedIdentity,
    cadence: Cadence,
    cooldown_ms: u32,
    /// Start of the current cooldown, if one is running.
    cooldown_since: Option<u32>,
}

impl IdentitySource {
    fn cooling_down(&mut self, now_ms: u32) -> bool {
        match self.cooldown_since {
            Some(since) if now_ms.wrapping_sub(since) < self.cooldown_ms => true,
            Some(_) => {
                self.cooldown_since = None;
                false
            }
            None => false,
        }
    }
}

/// Owns every sensor of the deployment.
pub struct Acquisition {
    continuous: Vec<Polled<BoxedContinuous>>,
    analog: Vec<Polled<BoxedAnalog>>,
    identity: Option<IdentitySource>,
    climate_interval_ms: u32,
    joystick_interval_ms: u32,
    tag_poll_interval_ms: u32,
    tag_cooldown_ms: u32,
    sent: u64,
}

impl Acquisition {
    /// Empty deployment using the cadences from `config`.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            continuous: Vec::new(),
            analog: Vec::new(),
            identity: None,
            climate_interval_ms: config.climate_interval_ms,
            joystick_interval_ms: config.joystick_interval_ms,
            tag_poll_interval_ms: config.tag_poll_interval_ms,
            tag_cooldown_ms: config.tag_cooldown_ms,
            sent: 0,
        }
    }

    #[must_use]
    pub fn with_continuous(mut self, sensor: impl ContinuousSensor + Send + 'static) -> Self {
        self.continuous.push(Polled {
            sensor: Box::new(sensor),
            cadence: Cadence::new(self.climate_interval_ms),
        });
        self
    }

    #[must_use]
    pub fn with_analog(mut self, sensor: impl AnalogSensor + Send + 'static) -> Self {
        self.analog.push(Polled {
            sensor: Box::new(sensor),
            cadence: Cadence::new(self.joystick_interval_ms),
        });
        self
    }

    /// Attach the (single) identity reader, replacing any previous one.
    #[must_use]
    pub fn with_identity(mut self, sensor: impl IdentitySensor + Send + 'static) -> Self {
        self.identity = Some(IdentitySource {
            sensor: Box::new(sensor),
            cadence: Cadence::new(self.tag_poll_interval_ms),
            cooldown_ms: self.tag_cooldown_ms,
            cooldown_since: None,
        });
        self
    }

    /// Samples sent since construction.
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// One loop iteration. Returns the number of samples sent.
    pub fn tick(&mut self, now_ms: u32, sink: &mut impl SampleSink) -> usize {
        let mut count = 0;
        let mut emit = |sample: Sample| {
            debug!("ACQ | -> {}", sample);
            sink.send(sample);
            count += 1;
        };

        for polled in &mut self.continuous {
            if !polled.cadence.is_due(now_ms) {
                continue;
            }
            polled.cadence.mark(now_ms);
            match polled.sensor.read() {
                Ok(readout) => {
                    for (quantity, value) in readout {
                        emit(Sample::reading(quantity, value));
                    }
                }
                Err(e) => {
                    let quantities = polled.sensor.quantities();
                    warn!("ACQ | {:?} read failed: {}", quantities, e);
                    for &quantity in quantities {
                        emit(Sample::ReadFailed(quantity));
                    }
                }
            }
        }

        for polled in &mut self.analog {
            if !polled.cadence.is_due(now_ms) {
                continue;
            }
            polled.cadence.mark(now_ms);
            let axis = polled.sensor.axis();
            let raw = polled.sensor.read();
            emit(Sample::Analog { axis, raw });
        }

        if let Some(source) = self.identity.as_mut() {
            if !source.cooling_down(now_ms) && source.cadence.is_due(now_ms) {
                source.cadence.mark(now_ms);
                if source.sensor.poll_presence() {
                    let sample = match source.sensor.read_identity() {
                        Ok(id) => {
                            info!("ACQ | tag {} presented", id);
                            Sample::Tag(id)
                        }
                        Err(e) => {
                            warn!("ACQ | tag present but unreadable: {}", e);
                            Sample::TagReadFailed
                        }
                    };
                    emit(sample);
                    if source.cooldown_ms > 0 {
                        source.cooldown_since = Some(now_ms);
                    }
                }
            }
        }

        self.sent += count as u64;
        count
    }

    /// Run forever: tick, call `idle`, sleep `period_ms`.
    pub fn run(
        mut self,
        sink: &mut impl SampleSink,
        clock: &impl Clock,
        period_ms: u32,
        mut idle: impl FnMut(),
    ) -> ! {
        info!(
            "Acquisition running: {} continuous, {} analog, identity={}",
            self.continuous.len(),
            self.analog.len(),
            self.identity.is_some()
        );
        loop {
            self.tick(clock.now_ms(), sink);
            idle();
            std::thread::sleep(std::time::Duration::from_millis(u64::from(period_ms)));
        }
    }
}
