//! Latest-value state table.
//!
//! Owned by the presentation loop and mutated nowhere else. One slot per
//! kind of data; every slot starts [`Slot::Unknown`] and is overwritten by
//! each new sample of its kind.

use crate::protocol::{Axis, Quantity, Sample, TagId, from_centi};

/// The last thing heard about one kind of data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Slot<T> {
    /// Nothing received yet. Never to be read as zero.
    #[default]
    Unknown,
    Value(T),
    /// The most recent sample for this slot was a failure signal.
    Failed,
}

impl<T: Copy> Slot<T> {
    pub fn value(&self) -> Option<T> {
        match self {
            Self::Value(v) => Some(*v),
            Self::Unknown | Self::Failed => None,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Per-kind latest values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Readings {
    pub temperature_c: Slot<f32>,
    pub humidity_percent: Slot<f32>,
    pub pressure_hpa: Slot<f32>,
    pub joystick_x: Slot<u16>,
    pub joystick_y: Slot<u16>,
    pub tag: Slot<TagId>,
}

impl Readings {
    /// All slots unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `sample` into its slot, replacing whatever was there.
    pub fn apply(&mut self, sample: Sample) {
        match sample {
            Sample::Reading { quantity, centi } => {
                *self.climate_mut(quantity) = Slot::Value(from_centi(centi));
            }
            Sample::ReadFailed(quantity) => *self.climate_mut(quantity) = Slot::Failed,
            Sample::Analog { axis, raw } => *self.axis_mut(axis) = Slot::Value(raw),
            Sample::Tag(id) => self.tag = Slot::Value(id),
            Sample::TagReadFailed => self.tag = Slot::Failed,
        }
    }

    pub fn climate(&self, quantity: Quantity) -> Slot<f32> {
        match quantity {
            Quantity::Temperature => self.temperature_c,
            Quantity::Humidity => self.humidity_percent,
            Quantity::Pressure => self.pressure_hpa,
        }
    }

    fn climate_mut(&mut self, quantity: Quantity) -> &mut Slot<f32> {
        match quantity {
            Quantity::Temperature => &mut self.temperature_c,
            Quantity::Humidity => &mut self.humidity_percent,
            Quantity::Pressure => &mut self.pressure_hpa,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut Slot<u16> {
        match axis {
            Axis::X => &mut self.joystick_x,
            Axis::Y => &mut self.joystick_y,
        }
    }
}
