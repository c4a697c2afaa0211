//! # Paced Key Derivation
//!
//! PBKDF2-HMAC-SHA1 (RFC 2898) that never monopolizes its host. The
//! derivation advances in bounded slices; between slices control returns
//! to the scheduler, so a high iteration count costs latency elsewhere only
//! in slice-sized pieces.
//!
//! ## Features
//!
//! - **Resumable**: [`Pbkdf2Engine::step`] performs one slice and returns
//! - **Async**: [`Pbkdf2Engine::derive_key`] runs on tokio with progress and
//!   completion callbacks, and can be cancelled between slices
//! - **Streaming**: [`Pbkdf2Engine::progress_stream`] yields progress events
//! - **Configurable**: slice size, text packing width and block index encoding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use paced_key::Kdf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), paced_key::KdfError> {
//! let key = Kdf::pbkdf2()
//!     .with_iterations(4096)
//!     .with_key_length(20)
//!     .on_progress(|fraction| println!("{:.0}%", fraction * 100.0))
//!     .derive("password", "salt")
//!     .await?;
//!
//! assert_eq!(key.to_hex(), "4b007901b765489abead49d926f721d065a429c1");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod async_result;
pub mod derive;
pub mod error;
pub mod key_result;
pub mod material;

pub use api::{Kdf, Pbkdf2Builder, Pbkdf2BuilderWithHandler};
pub use async_result::{
    DerivationEvent, DerivationHandle, DerivationHandleWithHandler, DerivationStream,
};
pub use derive::{
    BlockIndexEncoding, Pbkdf2Config, Pbkdf2Engine, Phase, StepStatus,
    DEFAULT_ITERATIONS_PER_CHUNK, HASH_LEN, MAX_BLOCKS,
};
pub use error::{KdfError, Result};
pub use key_result::DerivedKey;
pub use material::KeyMaterial;

pub use paced_common::{on_error, on_progress, on_result, LoggingTransformer};
pub use paced_hashing::{CharWidth, Sha1Words, WordHash};
pub use paced_task::CancellationToken;
