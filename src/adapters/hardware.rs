//! Hardware adapter: bridges the indicator LEDs and the buzzer to
//! [`ActuatorPort`].
//!
//! Owned by the presentation loop; this is the only module on core B that
//! touches actual hardware. On non-espidf targets the underlying drivers
//! use cfg-gated simulation stubs.

use crate::app::ports::{ActuatorPort, Indicators};
use crate::drivers::buzzer::BuzzerDriver;
use crate::drivers::status_led::StatusLed;

/// Concrete adapter that combines all actuators behind the port trait.
pub struct HardwareAdapter {
    led: StatusLed,
    buzzer: BuzzerDriver,
}

impl HardwareAdapter {
    pub fn new(led: StatusLed, buzzer: BuzzerDriver) -> Self {
        Self { led, buzzer }
    }

    pub fn indicators(&self) -> Indicators {
        self.led.current()
    }

    pub fn is_buzzing(&self) -> bool {
        self.buzzer.is_sounding()
    }

    /// Everything dark and silent.
    pub fn all_off(&mut self) {
        self.led.off();
        self.buzzer.off();
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_indicators(&mut self, indicators: Indicators) {
        self.led.set(indicators);
    }

    fn set_buzzer(&mut self, on: bool) {
        if on {
            self.buzzer.on();
        } else {
            self.buzzer.off();
        }
    }
}
