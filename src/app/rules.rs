//! Actuation rules: pure decisions over the latest-value table.
//!
//! Two independent rules feed one set of outputs:
//!
//! | Rule      | Input slots                       | Result                          |
//! |-----------|-----------------------------------|---------------------------------|
//! | Threshold | temperature, humidity, (pressure) | `Alarm` if any value `>=` limit |
//! | Identity  | tag                               | allow-listed colour or `Neutral`|
//!
//! Composition: `Alarm` wins; otherwise an observed tag decides the LEDs
//! (a tag colour is never red or green); otherwise the normal (green)
//! profile. The buzzer follows `Alarm` only.

use crate::config::{KnownTag, SystemConfig};
use crate::protocol::Quantity;

use super::ports::Indicators;
use super::readings::{Readings, Slot};

/// Outcome of the threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClimateProfile {
    Normal,
    Alarm,
}

/// Outcome of the identity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessProfile<'a> {
    Granted(&'a KnownTag),
    /// Unlisted tag or failed read.
    Neutral,
}

/// Everything the presentation loop needs to drive outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actuation {
    pub indicators: Indicators,
    pub buzzer: bool,
}

impl Actuation {
    pub const NORMAL: Self = Self {
        indicators: Indicators {
            red: false,
            green: true,
            blue: false,
        },
        buzzer: false,
    };

    pub const ALARM: Self = Self {
        indicators: Indicators {
            red: true,
            green: false,
            blue: false,
        },
        buzzer: true,
    };

    pub const NEUTRAL: Self = Self {
        indicators: Indicators::OFF,
        buzzer: false,
    };
}

/// Inclusive per-quantity thresholds, OR-combined. Unknown and failed slots
/// never trip the alarm.
pub fn climate_profile(readings: &Readings, config: &SystemConfig) -> ClimateProfile {
    let limits = [
        (Quantity::Temperature, Some(config.temperature_alarm_c)),
        (Quantity::Humidity, Some(config.humidity_alarm_percent)),
        (Quantity::Pressure, config.pressure_alarm_hpa),
    ];
    let tripped = limits.iter().any(|&(quantity, limit)| {
        match (readings.climate(quantity).value(), limit) {
            (Some(value), Some(limit)) => value >= limit,
            _ => false,
        }
    });
    if tripped {
        ClimateProfile::Alarm
    } else {
        ClimateProfile::Normal
    }
}

/// `None` until the tag slot has seen anything.
pub fn access_profile<'a>(readings: &Readings, config: &'a SystemConfig) -> Option<AccessProfile<'a>> {
    match readings.tag {
        Slot::Unknown => None,
        Slot::Failed => Some(AccessProfile::Neutral),
        Slot::Value(id) => Some(
            config
                .known_tags
                .iter()
                .find(|known| known.id == id)
                .map_or(AccessProfile::Neutral, AccessProfile::Granted),
        ),
    }
}

/// Combine both rules into the outputs to apply.
pub fn evaluate(readings: &Readings, config: &SystemConfig) -> Actuation {
    if climate_profile(readings, config) == ClimateProfile::Alarm {
        return Actuation::ALARM;
    }
    match access_profile(readings, config) {
        Some(AccessProfile::Granted(known)) => Actuation {
            indicators: Indicators::lit(known.led),
            buzzer: false,
        },
        Some(AccessProfile::Neutral) => Actuation::NEUTRAL,
        None => Actuation::NORMAL,
    }
}
