//! Sensor drivers: each one implements a port from [`crate::app::ports`].
//!
//! | Driver       | Port               | Quantities                |
//! |--------------|--------------------|---------------------------|
//! | `bmp280`     | `ContinuousSensor` | temperature, pressure     |
//! | `aht20`      | `ContinuousSensor` | humidity                  |
//! | `joystick`   | `AnalogSensor`     | X / Y raw counts          |
//! | `tag_reader` | `IdentitySensor`   | 4-byte tag UID            |
//!
//! The two I2C parts share one controller through [`shared_bus::SharedBus`].

pub mod aht20;
pub mod bmp280;
pub mod joystick;
pub mod shared_bus;
pub mod tag_reader;

#[cfg(test)]
pub(crate) mod mock_bus;
