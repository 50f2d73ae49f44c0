//! Proximity-tag mailbox.
//!
//! The RFID front-end (its own task or an interrupt handler) deposits each
//! tag it sees here with [`present_tag`] or [`present_unreadable_tag`];
//! [`TagReader`] hands it to the acquisition loop through the
//! [`IdentitySensor`] port. Only the latest presentation is kept.
//!
//! This firmware does not ship the RFID front-end. On the device nothing
//! calls [`present_tag`] until the reader's driver task is added, so the
//! identity source stays silent and the tag slot stays unknown.
//!
//! Lock-free: the tag word and the state are separate atomics, the state is
//! published last with `Release` ordering.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use crate::app::ports::IdentitySensor;
use crate::error::SensorError;
use crate::protocol::TagId;

const EMPTY: u8 = 0;
const PRESENT: u8 = 1;
const UNREADABLE: u8 = 2;

static TAG_WORD: AtomicU32 = AtomicU32::new(0);
static TAG_STATE: AtomicU8 = AtomicU8::new(EMPTY);

/// A tag entered the field and its UID was read.
pub fn present_tag(id: TagId) {
    TAG_WORD.store(id.to_word(), Ordering::Relaxed);
    TAG_STATE.store(PRESENT, Ordering::Release);
}

/// A tag entered the field but anticollision/select failed.
pub fn present_unreadable_tag() {
    TAG_STATE.store(UNREADABLE, Ordering::Release);
}

#[derive(Default)]
pub struct TagReader;

impl TagReader {
    pub fn new() -> Self {
        Self
    }
}

impl IdentitySensor for TagReader {
    fn poll_presence(&mut self) -> bool {
        TAG_STATE.load(Ordering::Acquire) != EMPTY
    }

    fn read_identity(&mut self) -> Result<TagId, SensorError> {
        match TAG_STATE.swap(EMPTY, Ordering::AcqRel) {
            PRESENT => Ok(TagId::from_word(TAG_WORD.load(Ordering::Relaxed))),
            _ => Err(SensorError::TagRead),
        }
    }
}
