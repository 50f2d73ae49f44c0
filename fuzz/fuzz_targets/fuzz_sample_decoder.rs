//! Fuzz target: `Sample::decode` → presentation pipeline
//!
//! Interprets arbitrary bytes as a stream of little-endian `(kind, payload)`
//! word pairs, as the presentation loop would pop them, and asserts that
//! decoding never panics, that accepted pairs re-encode to themselves, and
//! that the table, the rules and the screen accept whatever decodes.
//!
//! cargo fuzz run fuzz_sample_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use twincore::adapters::console_display::ConsoleDisplay;
use twincore::adapters::hardware::HardwareAdapter;
use twincore::app::presentation::Presentation;
use twincore::config::SystemConfig;
use twincore::drivers::buzzer::BuzzerDriver;
use twincore::drivers::status_led::StatusLed;
use twincore::protocol::Sample;

fuzz_target!(|data: &[u8]| {
    let actuators = HardwareAdapter::new(StatusLed::new(), BuzzerDriver::new());
    let mut presentation =
        Presentation::new(ConsoleDisplay::new(), actuators, SystemConfig::default());
    presentation.start();

    for pair in data.chunks_exact(8) {
        let kind = u32::from_le_bytes([pair[0], pair[1], pair[2], pair[3]]);
        let payload = u32::from_le_bytes([pair[4], pair[5], pair[6], pair[7]]);
        if let Ok(sample) = Sample::decode(kind, payload) {
            assert_eq!(sample.encode(), [kind, payload], "decode must be canonical");
            presentation.handle(sample);
        }
    }

    // Buzzer follows the alarm profile exactly.
    let applied = presentation.applied().expect("start() applies a profile");
    assert_eq!(presentation.actuators().is_buzzing(), applied.buzzer);
});
