//! Two-axis analog joystick (potentiometers on ADC1).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from static atomics for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use crate::app::ports::AnalogSensor;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::protocol::Axis;

/// Centre of the 12-bit range.
pub const CENTRE: u16 = 2048;

static SIM_X: AtomicU16 = AtomicU16::new(CENTRE);
static SIM_Y: AtomicU16 = AtomicU16::new(CENTRE);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_axis(axis: Axis, raw: u16) {
    let cell = match axis {
        Axis::X => &SIM_X,
        Axis::Y => &SIM_Y,
    };
    cell.store(raw.min(4095), Ordering::Relaxed);
}

pub struct JoystickAxis {
    axis: Axis,
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    channel: u32,
}

impl JoystickAxis {
    pub fn new(axis: Axis, adc_channel: u32) -> Self {
        Self {
            axis,
            channel: adc_channel,
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        match self.axis {
            Axis::X => SIM_X.load(Ordering::Relaxed),
            Axis::Y => SIM_Y.load(Ordering::Relaxed),
        }
    }
}

impl AnalogSensor for JoystickAxis {
    fn axis(&self) -> Axis {
        self.axis
    }

    fn read(&mut self) -> u16 {
        self.read_adc()
    }
}
