//! Mock hardware for integration tests.
//!
//! Records every actuator and display call so tests can assert on the full
//! command history without touching real GPIO/PWM registers, and provides
//! scripted sensors for the acquisition side.

use std::collections::VecDeque;

use twincore::app::ports::{
    ActuatorPort, AnalogSensor, ContinuousSensor, DisplayPort, IdentitySensor, Indicators, Readout,
};
use twincore::error::SensorError;
use twincore::protocol::{Axis, Quantity, TagId};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCall {
    Indicators(Indicators),
    Buzzer(bool),
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn indicators(&self) -> Indicators {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Indicators(i) => Some(*i),
                ActuatorCall::Buzzer(_) => None,
            })
            .unwrap_or(Indicators::OFF)
    }

    pub fn buzzer_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Buzzer(on) => Some(*on),
                ActuatorCall::Indicators(_) => None,
            })
            .unwrap_or(false)
    }
}

impl ActuatorPort for MockHardware {
    fn set_indicators(&mut self, indicators: Indicators) {
        self.calls.push(ActuatorCall::Indicators(indicators));
    }

    fn set_buzzer(&mut self, on: bool) {
        self.calls.push(ActuatorCall::Buzzer(on));
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear,
    Text(String, u8, u8),
    Rect(u8, u8, u8, u8),
    Line(u8, u8, u8, u8),
    Flush,
}

/// Keeps every flushed frame as the list of calls that produced it.
#[derive(Default)]
pub struct MockDisplay {
    current: Vec<DrawCall>,
    pub frames: Vec<Vec<DrawCall>>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> &[DrawCall] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn text_at(&self, x: u8, y: u8) -> Option<&str> {
        self.last_frame().iter().find_map(|c| match c {
            DrawCall::Text(t, tx, ty) if *tx == x && *ty == y => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn shows(&self, text: &str) -> bool {
        self.last_frame()
            .iter()
            .any(|c| matches!(c, DrawCall::Text(t, _, _) if t == text))
    }
}

impl DisplayPort for MockDisplay {
    fn clear(&mut self) {
        self.current = vec![DrawCall::Clear];
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) {
        self.current.push(DrawCall::Text(text.to_string(), x, y));
    }

    fn draw_rect(&mut self, x: u8, y: u8, width: u8, height: u8) {
        self.current.push(DrawCall::Rect(x, y, width, height));
    }

    fn draw_line(&mut self, x0: u8, y0: u8, x1: u8, y1: u8) {
        self.current.push(DrawCall::Line(x0, y0, x1, y1));
    }

    fn flush(&mut self) {
        self.current.push(DrawCall::Flush);
        self.frames.push(std::mem::take(&mut self.current));
    }
}

// ── Scripted sensors ──────────────────────────────────────────

/// Returns the scripted results in order, then repeats the last one.
pub struct ScriptedClimate {
    quantities: &'static [Quantity],
    script: VecDeque<Result<Vec<f32>, SensorError>>,
    last: Result<Vec<f32>, SensorError>,
}

#[allow(dead_code)]
impl ScriptedClimate {
    pub fn new(
        quantities: &'static [Quantity],
        script: impl IntoIterator<Item = Result<Vec<f32>, SensorError>>,
    ) -> Self {
        Self {
            quantities,
            script: script.into_iter().collect(),
            last: Err(SensorError::Busy),
        }
    }
}

impl ContinuousSensor for ScriptedClimate {
    fn quantities(&self) -> &'static [Quantity] {
        self.quantities
    }

    fn read(&mut self) -> Result<Readout, SensorError> {
        if let Some(next) = self.script.pop_front() {
            self.last = next;
        }
        let values = self.last.clone()?;
        let mut readout = Readout::new();
        for (q, v) in self.quantities.iter().zip(values) {
            let _ = readout.push((*q, v));
        }
        Ok(readout)
    }
}

pub struct FixedAxis(pub Axis, pub u16);

impl AnalogSensor for FixedAxis {
    fn axis(&self) -> Axis {
        self.0
    }

    fn read(&mut self) -> u16 {
        self.1
    }
}

/// Presents each scripted tag once, then the field stays empty.
pub struct ScriptedTags {
    pending: VecDeque<Option<TagId>>,
}

#[allow(dead_code)]
impl ScriptedTags {
    /// `None` entries model a tag that could not be read.
    pub fn new(tags: impl IntoIterator<Item = Option<TagId>>) -> Self {
        Self {
            pending: tags.into_iter().collect(),
        }
    }
}

impl IdentitySensor for ScriptedTags {
    fn poll_presence(&mut self) -> bool {
        !self.pending.is_empty()
    }

    fn read_identity(&mut self) -> Result<TagId, SensorError> {
        match self.pending.pop_front() {
            Some(Some(id)) => Ok(id),
            _ => Err(SensorError::TagRead),
        }
    }
}
