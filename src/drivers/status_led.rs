//! Indicator LED driver.
//!
//! Three discrete LEDs (red, green, blue) on plain GPIO outputs; each is
//! either fully on or off.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the three GPIOs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::app::ports::Indicators;
use crate::drivers::hw_init;
use crate::pins;

pub struct StatusLed {
    current: Indicators,
}

impl Default for StatusLed {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusLed {
    pub fn new() -> Self {
        Self {
            current: Indicators::OFF,
        }
    }

    pub fn set(&mut self, indicators: Indicators) {
        hw_init::gpio_write(pins::LED_R_GPIO, indicators.red);
        hw_init::gpio_write(pins::LED_G_GPIO, indicators.green);
        hw_init::gpio_write(pins::LED_B_GPIO, indicators.blue);
        self.current = indicators;
    }

    pub fn off(&mut self) {
        self.set(Indicators::OFF);
    }

    pub fn current(&self) -> Indicators {
        self.current
    }
}
