//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod buzzer;
pub mod hw_init;
pub mod maintenance;
pub mod status_led;
pub mod task_pin;
