//! GPIO / peripheral pin assignments for the TwinCore station board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensor I²C bus (AHT20 + BMP280 share one controller)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;

// ---------------------------------------------------------------------------
// Joystick (ADC1)
// ---------------------------------------------------------------------------

/// X axis: ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const JOYSTICK_X_GPIO: i32 = 1;
/// Y axis: ADC1 channel 1 (GPIO 2 on ESP32-S3).
pub const JOYSTICK_Y_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Indicator LEDs (discrete, active HIGH)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 13;
pub const LED_G_GPIO: i32 = 11;
pub const LED_B_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Buzzer (passive piezo on LEDC)
// ---------------------------------------------------------------------------

pub const BUZZER_GPIO: i32 = 21;
/// Square wave at 50 % duty with an 8-bit timer.
pub const BUZZER_DUTY: u8 = 128;

// ---------------------------------------------------------------------------
// Maintenance button (active-low with pull-up)
// ---------------------------------------------------------------------------

/// BOOT strap button. A falling edge requests the ROM download mode.
pub const MAINTENANCE_GPIO: i32 = 0;
