//! Sample protocol carried over the inter-core channel.
//!
//! A [`Sample`] travels as exactly two 32-bit words: the kind word first,
//! then the payload word. Each kind owns one payload convention:
//!
//! | Kind word | Kind                | Payload                               |
//! |-----------|---------------------|---------------------------------------|
//! | `0x01`    | `Temperature`       | °C × 100, truncated, i32              |
//! | `0x02`    | `Humidity`          | %RH × 100, truncated, i32             |
//! | `0x03`    | `Pressure`          | hPa × 100, truncated, i32             |
//! | `0x10`    | `JoystickX`         | raw ADC count (≤ `u16::MAX`)          |
//! | `0x11`    | `JoystickY`         | raw ADC count (≤ `u16::MAX`)          |
//! | `0x20`    | `Tag`               | 4 tag bytes, big-endian               |
//! | `0x21`    | `TagReadFailed`     | 0                                     |
//! | `0x81`    | `TemperatureFailed` | 0                                     |
//! | `0x82`    | `HumidityFailed`    | 0                                     |
//! | `0x83`    | `PressureFailed`    | 0                                     |
//!
//! Nothing outside this module ever sees a raw kind or payload word.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Fixed-point scale shared by every continuous quantity.
pub const FIXED_POINT_SCALE: f32 = 100.0;

// ───────────────────────────────────────────────────────────────
// Value domains
// ───────────────────────────────────────────────────────────────

/// A continuously varying physical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Degrees Celsius.
    Temperature,
    /// Relative humidity, percent.
    Humidity,
    /// Barometric pressure, hPa.
    Pressure,
}

impl Quantity {
    pub fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "C",
            Self::Humidity => "%",
            Self::Pressure => "hPa",
        }
    }
}

/// Joystick axis read through the ADC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Four-byte identity read from a proximity tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TagId(pub [u8; 4]);

impl TagId {
    /// Pack the tag into one channel word (big-endian).
    pub fn to_word(self) -> u32 {
        u32::from_be_bytes(self.0)
    }

    /// Unpack a channel word in the same byte order [`to_word`](Self::to_word) uses.
    pub fn from_word(word: u32) -> Self {
        Self(word.to_be_bytes())
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a:02X}{b:02X}{c:02X}{d:02X}")
    }
}

// ───────────────────────────────────────────────────────────────
// Fixed-point helpers
// ───────────────────────────────────────────────────────────────

/// Scale a physical value by 100 and truncate toward zero.
pub fn to_centi(value: f32) -> i32 {
    (value * FIXED_POINT_SCALE) as i32
}

/// Recover the physical value from its ×100 encoding.
pub fn from_centi(centi: i32) -> f32 {
    centi as f32 / FIXED_POINT_SCALE
}

// ───────────────────────────────────────────────────────────────
// Kind discriminator
// ───────────────────────────────────────────────────────────────

/// Discriminator word sent ahead of every payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Kind {
    Temperature = 0x01,
    Humidity = 0x02,
    Pressure = 0x03,
    JoystickX = 0x10,
    JoystickY = 0x11,
    Tag = 0x20,
    TagReadFailed = 0x21,
    TemperatureFailed = 0x81,
    HumidityFailed = 0x82,
    PressureFailed = 0x83,
}

impl Kind {
    pub fn word(self) -> u32 {
        self as u32
    }

    pub fn from_word(word: u32) -> Result<Self, ProtocolError> {
        match word {
            0x01 => Ok(Self::Temperature),
            0x02 => Ok(Self::Humidity),
            0x03 => Ok(Self::Pressure),
            0x10 => Ok(Self::JoystickX),
            0x11 => Ok(Self::JoystickY),
            0x20 => Ok(Self::Tag),
            0x21 => Ok(Self::TagReadFailed),
            0x81 => Ok(Self::TemperatureFailed),
            0x82 => Ok(Self::HumidityFailed),
            0x83 => Ok(Self::PressureFailed),
            other => Err(ProtocolError::UnknownKind(other)),
        }
    }

    fn reading(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Temperature => Self::Temperature,
            Quantity::Humidity => Self::Humidity,
            Quantity::Pressure => Self::Pressure,
        }
    }

    fn failure(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Temperature => Self::TemperatureFailed,
            Quantity::Humidity => Self::HumidityFailed,
            Quantity::Pressure => Self::PressureFailed,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Sample
// ───────────────────────────────────────────────────────────────

/// One discriminated unit of sensor data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// A continuous reading in fixed-point hundredths.
    Reading { quantity: Quantity, centi: i32 },
    /// The sensor responsible for `quantity` failed its transaction.
    ReadFailed(Quantity),
    /// Raw joystick ADC count.
    Analog { axis: Axis, raw: u16 },
    /// A tag was presented and read.
    Tag(TagId),
    /// A tag was presented but could not be read.
    TagReadFailed,
}

impl Sample {
    /// Build a continuous reading from its physical value.
    pub fn reading(quantity: Quantity, value: f32) -> Self {
        Self::Reading {
            quantity,
            centi: to_centi(value),
        }
    }

    pub fn kind(&self) -> Kind {
        match *self {
            Self::Reading { quantity, .. } => Kind::reading(quantity),
            Self::ReadFailed(quantity) => Kind::failure(quantity),
            Self::Analog { axis: Axis::X, .. } => Kind::JoystickX,
            Self::Analog { axis: Axis::Y, .. } => Kind::JoystickY,
            Self::Tag(_) => Kind::Tag,
            Self::TagReadFailed => Kind::TagReadFailed,
        }
    }

    /// Encode as `[kind, payload]`, in push order.
    pub fn encode(&self) -> [u32; 2] {
        let payload = match *self {
            Self::Reading { centi, .. } => centi as u32,
            Self::Analog { raw, .. } => u32::from(raw),
            Self::Tag(id) => id.to_word(),
            Self::ReadFailed(_) | Self::TagReadFailed => 0,
        };
        [self.kind().word(), payload]
    }

    /// Decode a `(kind, payload)` pair popped off the channel.
    pub fn decode(kind: u32, payload: u32) -> Result<Self, ProtocolError> {
        let bad = || ProtocolError::BadPayload { kind, payload };
        let sample = match Kind::from_word(kind)? {
            Kind::Temperature => Self::Reading {
                quantity: Quantity::Temperature,
                centi: payload as i32,
            },
            Kind::Humidity => Self::Reading {
                quantity: Quantity::Humidity,
                centi: payload as i32,
            },
            Kind::Pressure => Self::Reading {
                quantity: Quantity::Pressure,
                centi: payload as i32,
            },
            Kind::JoystickX => Self::Analog {
                axis: Axis::X,
                raw: u16::try_from(payload).map_err(|_| bad())?,
            },
            Kind::JoystickY => Self::Analog {
                axis: Axis::Y,
                raw: u16::try_from(payload).map_err(|_| bad())?,
            },
            Kind::Tag => Self::Tag(TagId::from_word(payload)),
            Kind::TagReadFailed if payload == 0 => Self::TagReadFailed,
            Kind::TemperatureFailed if payload == 0 => Self::ReadFailed(Quantity::Temperature),
            Kind::HumidityFailed if payload == 0 => Self::ReadFailed(Quantity::Humidity),
            Kind::PressureFailed if payload == 0 => Self::ReadFailed(Quantity::Pressure),
            Kind::TagReadFailed
            | Kind::TemperatureFailed
            | Kind::HumidityFailed
            | Kind::PressureFailed => return Err(bad()),
        };
        Ok(sample)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Reading { quantity, centi } => {
                write!(f, "{:?}={:.2}{}", quantity, from_centi(centi), quantity.unit())
            }
            Self::ReadFailed(quantity) => write!(f, "{quantity:?}=FAILED"),
            Self::Analog { axis, raw } => write!(f, "Joystick{axis:?}={raw}"),
            Self::Tag(id) => write!(f, "Tag={id}"),
            Self::TagReadFailed => write!(f, "Tag=FAILED"),
        }
    }
}
