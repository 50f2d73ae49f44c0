//! Inter-core sample channel.
//!
//! A bounded FIFO of 32-bit words between the acquisition core (writer) and
//! the presentation core (reader). Pushing blocks while the FIFO is full and
//! popping blocks while it is empty; there are no timeouts, so a stalled
//! reader stalls the writer instead of losing data.
//!
//! ```text
//! ┌──────────────┐  kind, payload  ┌───────────────┐  kind, payload  ┌────────────────┐
//! │ SampleWriter │───────────────▶│  FIFO (8 w)   │───────────────▶│  SampleReader  │
//! │   (core A)   │                 │  embassy-sync │                 │    (core B)    │
//! └──────────────┘                 └───────────────┘                 └────────────────┘
//! ```
//!
//! The FIFO itself has no notion of message boundaries. Pairing is enforced
//! by the endpoint types: word-level push/pop are private, the writer only
//! sends whole [`Sample`]s and the reader only receives whole samples, and
//! [`InterCoreChannel::split`] hands out exactly one of each.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use futures_lite::future::block_on;

use crate::error::ProtocolError;
use crate::protocol::Sample;

/// FIFO depth in words (four samples in flight).
pub const FIFO_DEPTH: usize = 8;

type WordFifo = Channel<CriticalSectionRawMutex, u32, FIFO_DEPTH>;

/// Anything the acquisition loop can hand samples to.
pub trait SampleSink {
    fn send(&mut self, sample: Sample);
}

/// The word FIFO shared by the two cores.
pub struct InterCoreChannel {
    fifo: WordFifo,
}

impl Default for InterCoreChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl InterCoreChannel {
    pub const fn new() -> Self {
        Self {
            fifo: Channel::new(),
        }
    }

    /// Split into the single writer and the single reader.
    ///
    /// Takes `&mut self` so the borrow checker guarantees no second pair of
    /// endpoints exists while these are alive.
    pub fn split(&mut self) -> (SampleWriter<'_>, SampleReader<'_>) {
        let fifo = &self.fifo;
        (SampleWriter { fifo }, SampleReader { fifo })
    }
}

/// Writer endpoint, owned by the acquisition loop.
pub struct SampleWriter<'a> {
    fifo: &'a WordFifo,
}

impl SampleWriter<'_> {
    fn push(&self, word: u32) {
        block_on(self.fifo.send(word));
    }
}

impl SampleSink for SampleWriter<'_> {
    /// Push the kind word then the payload word, blocking while full.
    fn send(&mut self, sample: Sample) {
        let [kind, payload] = sample.encode();
        self.push(kind);
        self.push(payload);
    }
}

/// Reader endpoint, owned by the presentation loop.
pub struct SampleReader<'a> {
    fifo: &'a WordFifo,
}

impl SampleReader<'_> {
    fn pop(&self) -> u32 {
        block_on(self.fifo.receive())
    }

    /// Pop one kind/payload pair, blocking until both words are available.
    pub fn recv(&mut self) -> Result<Sample, ProtocolError> {
        let kind = self.pop();
        let payload = self.pop();
        Sample::decode(kind, payload)
    }

    /// Non-blocking variant: `None` if no complete pair is queued yet.
    ///
    /// Only whole pairs are taken; a lone kind word stays queued until its
    /// payload arrives.
    pub fn try_recv(&mut self) -> Option<Result<Sample, ProtocolError>> {
        if self.fifo.len() < 2 {
            return None;
        }
        Some(self.recv())
    }
}
