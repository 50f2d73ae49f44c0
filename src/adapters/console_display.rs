//! Console display adapter.
//!
//! Implements [`DisplayPort`] by recording every draw call into a frame
//! buffer and, on flush, mirroring the text rows to the log. A frame
//! identical to the previous one is not logged again, so the serial console
//! only shows screen changes.
//!
//! The OLED panel driver implements the same trait.

use heapless::{String, Vec};
use log::info;

use crate::app::ports::DisplayPort;

/// Upper bound on draw calls per frame.
pub const MAX_OPS: usize = 24;

pub type Text = String<24>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Text { text: Text, x: u8, y: u8 },
    Rect { x: u8, y: u8, width: u8, height: u8 },
    Line { x0: u8, y0: u8, x1: u8, y1: u8 },
}

pub type Frame = Vec<DrawOp, MAX_OPS>;

#[derive(Default)]
pub struct ConsoleDisplay {
    pending: Frame,
    shown: Frame,
    flushes: u32,
    changes: u32,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last flushed frame.
    pub fn frame(&self) -> &Frame {
        &self.shown
    }

    /// Text of the last flushed frame, grouped into rows by y and ordered
    /// left to right.
    pub fn text_rows(&self) -> std::vec::Vec<std::string::String> {
        let mut texts: std::vec::Vec<(u8, u8, &str)> = self
            .shown
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, x, y } => Some((*y, *x, text.as_str())),
                _ => None,
            })
            .collect();
        texts.sort_unstable();

        let mut rows: std::vec::Vec<(u8, std::string::String)> = std::vec::Vec::new();
        for (y, _, text) in texts {
            match rows.last_mut() {
                Some((row_y, row)) if *row_y == y => {
                    row.push_str(" | ");
                    row.push_str(text);
                }
                _ => rows.push((y, text.into())),
            }
        }
        rows.into_iter().map(|(_, row)| row).collect()
    }

    pub fn flushes(&self) -> u32 {
        self.flushes
    }

    /// Flushes whose frame differed from the one before.
    pub fn changes(&self) -> u32 {
        self.changes
    }

    fn record(&mut self, op: DrawOp) {
        // A frame never exceeds MAX_OPS with the station layout; extra ops
        // are dropped rather than growing the buffer.
        let _ = self.pending.push(op);
    }
}

impl DisplayPort for ConsoleDisplay {
    fn clear(&mut self) {
        self.pending.clear();
    }

    fn draw_text(&mut self, text: &str, x: u8, y: u8) {
        let mut t = Text::new();
        for c in text.chars() {
            if t.push(c).is_err() {
                break;
            }
        }
        self.record(DrawOp::Text { text: t, x, y });
    }

    fn draw_rect(&mut self, x: u8, y: u8, width: u8, height: u8) {
        self.record(DrawOp::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn draw_line(&mut self, x0: u8, y0: u8, x1: u8, y1: u8) {
        self.record(DrawOp::Line { x0, y0, x1, y1 });
    }

    fn flush(&mut self) {
        self.flushes += 1;
        if self.pending == self.shown {
            return;
        }
        self.shown = self.pending.clone();
        self.changes += 1;
        for row in self.text_rows() {
            info!("DISP | {}", row);
        }
    }
}
