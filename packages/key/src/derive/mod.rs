//! PBKDF2 derivation engine
//!
//! - [`config`] - slice size, text packing width, block index encoding
//! - [`engine`] - the resumable state machine and its step function
//! - [`pads`] - HMAC pad keys and the PRF
//! - [`state`] - per-block progress state

pub mod config;
pub mod engine;
pub mod pads;
mod runner;
pub mod state;

pub use config::{BlockIndexEncoding, Pbkdf2Config, DEFAULT_ITERATIONS_PER_CHUNK};
pub use engine::{Pbkdf2Engine, StepStatus, HASH_LEN, MAX_BLOCKS};
pub use pads::PadKeys;
pub use state::Phase;
