//! System configuration parameters
//!
//! All tunable parameters for the TwinCore station. There is no persistent
//! store: the firmware boots with [`SystemConfig::default`] and validates it
//! before either loop starts.

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::protocol::TagId;

/// Maximum number of entries in the tag allow-list.
pub const MAX_KNOWN_TAGS: usize = 4;

/// Colour shown on the RGB indicator. The mixed colours light two LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Led {
    Red,
    Green,
    Blue,
    Cyan,
    Magenta,
}

impl Led {
    /// Red is the alarm colour and green the normal one.
    pub fn is_reserved(self) -> bool {
        matches!(self, Self::Red | Self::Green)
    }
}

/// An allow-listed tag and the indicator it lights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownTag {
    pub id: TagId,
    /// Short name shown on the display (at most 8 bytes, cut on a char
    /// boundary).
    pub label: String<8>,
    pub led: Led,
}

impl KnownTag {
    pub fn new(id: [u8; 4], label: &str, led: Led) -> Self {
        let mut l = String::new();
        for c in label.chars() {
            if l.push(c).is_err() {
                break;
            }
        }
        Self {
            id: TagId(id),
            label: l,
            led,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Alarm thresholds (inclusive) ---
    /// Temperature (°C) at or above which the alarm profile is selected
    pub temperature_alarm_c: f32,
    /// Relative humidity (%) at or above which the alarm profile is selected
    pub humidity_alarm_percent: f32,
    /// Pressure (hPa) alarm; `None` = pressure is displayed but not monitored
    pub pressure_alarm_hpa: Option<f32>,

    // --- Identity ---
    /// Tags that unlock an indicator LED
    pub known_tags: Vec<KnownTag, MAX_KNOWN_TAGS>,
    /// Pause after a tag event before the reader is polled again (ms)
    pub tag_cooldown_ms: u32,

    // --- Cadences ---
    /// Temperature / humidity / pressure read interval (ms)
    pub climate_interval_ms: u32,
    /// Joystick ADC read interval (ms)
    pub joystick_interval_ms: u32,
    /// Tag presence poll interval (ms)
    pub tag_poll_interval_ms: u32,
    /// Sleep between acquisition loop iterations (ms)
    pub acquisition_period_ms: u32,

    // --- Peripherals ---
    /// Sensor I2C bus clock (Hz)
    pub i2c_frequency_hz: u32,
    /// Buzzer tone (Hz)
    pub buzzer_frequency_hz: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let mut known_tags = Vec::new();
        let _ = known_tags.push(KnownTag::new([0x00, 0xFC, 0x95, 0x7C], "TAG A", Led::Blue));
        let _ = known_tags.push(KnownTag::new([0xC0, 0x33, 0xC3, 0x80], "TAG B", Led::Cyan));

        Self {
            // Thresholds
            temperature_alarm_c: 32.0,
            humidity_alarm_percent: 55.0,
            pressure_alarm_hpa: None,

            // Identity
            known_tags,
            tag_cooldown_ms: 2000,

            // Cadences
            climate_interval_ms: 500,  // 2 Hz
            joystick_interval_ms: 100, // 10 Hz
            tag_poll_interval_ms: 100,
            acquisition_period_ms: 20,

            // Peripherals
            i2c_frequency_hz: 400_000,
            buzzer_frequency_hz: 3500,
        }
    }
}

impl SystemConfig {
    /// Reject values that would make the loops misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.temperature_alarm_c.is_finite() {
            return Err(ConfigError::ValidationFailed("temperature_alarm_c must be finite"));
        }
        if !(0.0..=100.0).contains(&self.humidity_alarm_percent) {
            return Err(ConfigError::ValidationFailed(
                "humidity_alarm_percent must be within 0..=100",
            ));
        }
        if let Some(p) = self.pressure_alarm_hpa {
            if !(p.is_finite() && p > 0.0) {
                return Err(ConfigError::ValidationFailed("pressure_alarm_hpa must be positive"));
            }
        }
        if self.climate_interval_ms == 0
            || self.joystick_interval_ms == 0
            || self.tag_poll_interval_ms == 0
        {
            return Err(ConfigError::ValidationFailed("sensor intervals must be non-zero"));
        }
        if self.acquisition_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("acquisition_period_ms must be non-zero"));
        }
        if self.buzzer_frequency_hz == 0 || self.i2c_frequency_hz == 0 {
            return Err(ConfigError::ValidationFailed("peripheral frequencies must be non-zero"));
        }
        for (i, tag) in self.known_tags.iter().enumerate() {
            if tag.id == TagId::default() {
                return Err(ConfigError::ValidationFailed("all-zero tag cannot be allow-listed"));
            }
            if tag.led.is_reserved() {
                return Err(ConfigError::ValidationFailed(
                    "allow-listed tags cannot use the alarm or normal colour",
                ));
            }
            if self.known_tags[..i].iter().any(|t| t.id == tag.id) {
                return Err(ConfigError::ValidationFailed("duplicate tag in allow-list"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(SystemConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_thresholds_match_the_station() {
        let c = SystemConfig::default();
        assert!((c.temperature_alarm_c - 32.0).abs() < f32::EPSILON);
        assert!((c.humidity_alarm_percent - 55.0).abs() < f32::EPSILON);
        assert!(c.pressure_alarm_hpa.is_none());
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = SystemConfig::default();
        assert!(
            c.acquisition_period_ms < c.joystick_interval_ms,
            "loop must spin faster than the fastest sensor cadence"
        );
        assert!(c.tag_cooldown_ms > c.tag_poll_interval_ms);
    }

    #[test]
    fn rejects_zero_interval() {
        let c = SystemConfig {
            climate_interval_ms: 0,
            ..SystemConfig::default()
        };
        assert!(matches!(c.validate(), Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn rejects_zero_tag_and_duplicates() {
        let mut c = SystemConfig::default();
        c.known_tags.clear();
        let _ = c.known_tags.push(KnownTag::new([0; 4], "ZERO", Led::Red));
        assert!(c.validate().is_err());

        let mut c = SystemConfig::default();
        let dup = c.known_tags[0].clone();
        let _ = c.known_tags.push(dup);
        assert!(c.validate().is_err());
    }

    #[test]
    fn tag_colours_differ_from_base_profiles() {
        let c = SystemConfig::default();
        assert!(c.known_tags.iter().all(|t| !t.led.is_reserved()));
        assert_ne!(c.known_tags[0].led, c.known_tags[1].led);

        let mut c = SystemConfig::default();
        c.known_tags[0].led = Led::Green;
        assert!(matches!(c.validate(), Err(ConfigError::ValidationFailed(_))));
    }

    #[test]
    fn label_is_truncated() {
        let t = KnownTag::new([1, 2, 3, 4], "VERY LONG LABEL", Led::Red);
        assert_eq!(t.label.as_str(), "VERY LON");
    }

    #[test]
    fn label_truncation_respects_char_boundaries() {
        // 'É' is two bytes: the eighth byte falls inside the fourth one.
        let t = KnownTag::new([1, 2, 3, 4], "CAFÉÉÉÉ", Led::Red);
        assert_eq!(t.label.as_str(), "CAFÉÉ");

        let t = KnownTag::new([1, 2, 3, 4], "ÉÉÉÉÉ", Led::Red);
        assert_eq!(t.label.as_str(), "ÉÉÉÉ");
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert!((c.temperature_alarm_c - c2.temperature_alarm_c).abs() < 0.001);
        assert_eq!(c.known_tags, c2.known_tags);
        assert_eq!(c.tag_cooldown_ms, c2.tag_cooldown_ms);
    }
}
