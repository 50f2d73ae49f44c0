//! Application core: both loops and the pure logic between them.
//!
//! The acquisition loop and the presentation loop only meet at the
//! inter-core channel. All interaction with hardware happens through the
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod acquisition;
pub mod ports;
pub mod presentation;
pub mod readings;
pub mod rules;
pub mod screen;
