//! Screen layout for the 128×64 panel.
//!
//! ```text
//!  ┌──────────────────────────────┐
//!  │ TWINCORE STN  /  !! ALARM !! │  y=6
//!  │ X2048   Y1987                │  y=16
//!  ├──────────────┬───────────────┤  y=25
//!  │ BMP280       │ AHT20         │  y=28
//!  ├──────────────┼───────────────┤  y=37
//!  │ 32.0C        │ 56.0%         │  y=41
//!  │ 1013hPa      │ TAG A         │  y=52
//!  └──────────────┴───────────────┘
//! ```
//!
//! Rendering is a pure function of the table and the selected actuation, so
//! two redraws without a new sample produce identical frames.

use core::fmt::Write;

use heapless::String;

use crate::config::SystemConfig;

use super::ports::DisplayPort;
use super::readings::{Readings, Slot};
use super::rules::{AccessProfile, Actuation, access_profile};

type Cell = String<16>;

const TITLE: &str = "TWINCORE STN";
const ALARM_TITLE: &str = "!! ALARM !!";
const LABELS: &str = "BMP280  AHT20";

/// Clear, draw the static frame, draw every slot, flush.
pub fn render(
    display: &mut impl DisplayPort,
    readings: &Readings,
    actuation: &Actuation,
    config: &SystemConfig,
) {
    display.clear();

    // Static frame
    display.draw_rect(3, 3, 122, 60);
    display.draw_line(3, 25, 123, 25);
    display.draw_line(3, 37, 123, 37);
    display.draw_line(63, 25, 63, 60);
    display.draw_text(LABELS, 10, 28);

    // Header
    let title = if actuation.buzzer { ALARM_TITLE } else { TITLE };
    display.draw_text(title, 8, 6);
    display.draw_text(&axis_cell('X', readings.joystick_x), 10, 16);
    display.draw_text(&axis_cell('Y', readings.joystick_y), 66, 16);

    // Values
    display.draw_text(&climate_cell(readings.temperature_c, 1, "C"), 14, 41);
    display.draw_text(&climate_cell(readings.humidity_percent, 1, "%"), 73, 41);
    display.draw_text(&climate_cell(readings.pressure_hpa, 0, "hPa"), 14, 52);
    display.draw_text(&tag_cell(readings, config), 73, 52);

    display.flush();
}

/// `"32.0C"`, `"--.-C"` before the first sample, `"ERR"` after a failure.
pub fn climate_cell(slot: Slot<f32>, decimals: usize, unit: &str) -> Cell {
    let mut cell = Cell::new();
    let _ = match slot {
        Slot::Value(v) => write!(cell, "{v:.decimals$}{unit}"),
        Slot::Unknown if decimals == 0 => write!(cell, "--{unit}"),
        Slot::Unknown => write!(cell, "--.-{unit}"),
        Slot::Failed => write!(cell, "ERR"),
    };
    cell
}

fn axis_cell(name: char, slot: Slot<u16>) -> Cell {
    let mut cell = Cell::new();
    let _ = match slot {
        Slot::Value(raw) => write!(cell, "{name}{raw}"),
        Slot::Unknown | Slot::Failed => write!(cell, "{name}----"),
    };
    cell
}

/// Granted label, `"DENIED"` for an unlisted tag, `"NO TAG"` after a failed read.
pub fn tag_cell(readings: &Readings, config: &SystemConfig) -> Cell {
    let mut cell = Cell::new();
    let _ = match (readings.tag, access_profile(readings, config)) {
        (_, Some(AccessProfile::Granted(known))) => cell.push_str(&known.label),
        (Slot::Failed, _) => cell.push_str("NO TAG"),
        (Slot::Value(_), _) => cell.push_str("DENIED"),
        (Slot::Unknown, _) => cell.push_str("--"),
    };
    cell
}
