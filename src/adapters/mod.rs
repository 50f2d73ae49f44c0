//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter           | Implements    | Connects to                  |
//! |-------------------|---------------|------------------------------|
//! | `hardware`        | ActuatorPort  | LED GPIOs, buzzer LEDC       |
//! | `console_display` | DisplayPort   | Serial log output            |
//! | `time`            | Clock         | ESP32 system timer           |

pub mod console_display;
pub mod hardware;
pub mod time;
