//! Per-derivation progress state
//!
//! Exactly one block is in progress at a time. Its accumulator is written
//! only by folding one PRF output at a time, in iteration order.

use paced_hashing::Digest;

/// Where a derivation is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, no slice performed and not yet started
    Idle,
    /// Working on `block` (1-based) with `iteration` PRF evaluations folded
    Running {
        /// Current block index, starting at 1
        block: u32,
        /// Iterations completed within the current block
        iteration: u32,
    },
    /// Terminal; the key has been delivered
    Done,
}

/// Mutable state of one block computation
#[derive(Debug, Clone)]
pub(crate) struct DerivationState {
    block: u32,
    iterations_done: u32,
    accumulator: Digest,
    previous: Option<Digest>,
    finished: bool,
}

impl DerivationState {
    pub(crate) fn new() -> Self {
        Self {
            block: 1,
            iterations_done: 0,
            accumulator: Digest::ZERO,
            previous: None,
            finished: false,
        }
    }

    pub(crate) fn block(&self) -> u32 {
        self.block
    }

    pub(crate) fn iterations_done(&self) -> u32 {
        self.iterations_done
    }

    /// Last PRF output of this block; `None` before its first iteration
    pub(crate) fn previous(&self) -> Option<&Digest> {
        self.previous.as_ref()
    }

    pub(crate) fn accumulator(&self) -> &Digest {
        &self.accumulator
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// `T ^= U`, then remember `U` for chaining
    pub(crate) fn fold(&mut self, output: Digest) {
        self.accumulator ^= output;
        self.previous = Some(output);
        self.iterations_done += 1;
    }

    /// Move to the next block with a fresh accumulator
    pub(crate) fn advance_block(&mut self) {
        self.block += 1;
        self.iterations_done = 0;
        self.accumulator = Digest::ZERO;
        self.previous = None;
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
        self.previous = None;
    }
}
