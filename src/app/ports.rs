//! Port traits: the hexagonal boundary between the two loops and the hardware.
//!
//! ```text
//!   sensor drivers ──▶ ContinuousSensor / AnalogSensor / IdentitySensor ──▶ Acquisition
//!   Presentation ──▶ DisplayPort / ActuatorPort ──▶ OLED, LEDs, buzzer
//! ```
//!
//! Drivers and adapters implement these traits; the loops consume them via
//! generics or trait objects and never touch a register themselves.

use heapless::Vec;

use crate::error::SensorError;
use crate::protocol::{Axis, Quantity, TagId};

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapters: hardware → acquisition loop)
// ───────────────────────────────────────────────────────────────

/// Every quantity a single continuous-sensor transaction can yield.
pub type Readout = Vec<(Quantity, f32), 3>;

/// A sensor sampled by bus transaction (temperature, humidity, pressure).
pub trait ContinuousSensor {
    /// Quantities this device is responsible for. On a failed read the
    /// acquisition loop reports one failure sample for each of them.
    fn quantities(&self) -> &'static [Quantity];

    /// Perform one blocking transaction and return the physical values.
    fn read(&mut self) -> Result<Readout, SensorError>;
}

/// An analog input that always produces a raw count.
pub trait AnalogSensor {
    fn axis(&self) -> Axis;

    fn read(&mut self) -> u16;
}

/// An event-driven proximity reader.
pub trait IdentitySensor {
    /// Non-blocking check for a tag in the field.
    fn poll_presence(&mut self) -> bool;

    /// Read the tag; only called after `poll_presence` returned `true`.
    fn read_identity(&mut self) -> Result<TagId, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Output ports (driven adapters: presentation loop → hardware)
// ───────────────────────────────────────────────────────────────

/// Monochrome text/graphics panel.
///
/// Draw calls only touch the frame buffer; nothing is visible until
/// [`flush`](Self::flush).
pub trait DisplayPort {
    fn clear(&mut self);

    fn draw_text(&mut self, text: &str, x: u8, y: u8);

    /// Outline rectangle with its top-left corner at `(x, y)`.
    fn draw_rect(&mut self, x: u8, y: u8, width: u8, height: u8);

    fn draw_line(&mut self, x0: u8, y0: u8, x1: u8, y1: u8);

    fn flush(&mut self);
}

/// On/off state of the three indicator LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indicators {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Indicators {
    pub const OFF: Self = Self {
        red: false,
        green: false,
        blue: false,
    };

    /// The LEDs that mix into `led`.
    pub fn lit(led: crate::config::Led) -> Self {
        use crate::config::Led;
        Self {
            red: matches!(led, Led::Red | Led::Magenta),
            green: matches!(led, Led::Green | Led::Cyan),
            blue: matches!(led, Led::Blue | Led::Cyan | Led::Magenta),
        }
    }
}

/// Discrete outputs with no feedback.
pub trait ActuatorPort {
    fn set_indicators(&mut self, indicators: Indicators);

    fn set_buzzer(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Time
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock. Wraps at `u32::MAX`; callers compare with
/// `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}
