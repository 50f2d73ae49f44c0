//! Passive piezo buzzer driver.
//!
//! The tone frequency is fixed by the LEDC timer configured in hw_init;
//! this driver only gates the channel between 50 % duty and silence.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty register via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Silent,
    Sounding,
}

pub struct BuzzerDriver {
    state: BuzzerState,
}

impl Default for BuzzerDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl BuzzerDriver {
    pub fn new() -> Self {
        Self {
            state: BuzzerState::Silent,
        }
    }

    pub fn on(&mut self) {
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, pins::BUZZER_DUTY);
        self.state = BuzzerState::Sounding;
    }

    pub fn off(&mut self) {
        hw_init::ledc_set(hw_init::LEDC_CH_BUZZER, 0);
        self.state = BuzzerState::Silent;
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        self.state == BuzzerState::Sounding
    }
}
