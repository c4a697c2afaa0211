//! Incremental PBKDF2 engine (RFC 2898) over HMAC-SHA1
//!
//! The engine is a plain state machine. [`Pbkdf2Engine::step`] performs at
//! most one slice of `iterations_per_chunk` PRF evaluations and reports
//! where the derivation stands; hosts decide when to call it again.

use paced_hashing::codec::big_endian;
use paced_hashing::{CharWidth, PackedText, Sha1Words, WordHash, DIGEST_BYTES};
use paced_task::{CooperativeTask, Step, Steppable};
use std::time::Instant;

use super::config::{BlockIndexEncoding, Pbkdf2Config};
use super::pads::PadKeys;
use super::state::{DerivationState, Phase};
use crate::material::KeyMaterial;
use crate::{DerivedKey, KdfError, Result};

/// Length in bytes of one PRF output (`hLen`)
pub const HASH_LEN: usize = DIGEST_BYTES;

/// Largest block count RFC 2898 allows (`2^32 - 1`)
pub const MAX_BLOCKS: u64 = u32::MAX as u64;

/// Outcome of one call to [`Pbkdf2Engine::step`]
#[derive(Debug, Clone, PartialEq)]
pub enum StepStatus {
    /// More slices are needed; `progress` is the fraction completed
    Running {
        /// Fraction of all PRF iterations completed, in `[0, 1]`
        progress: f64,
    },
    /// The derivation finished
    Done(DerivedKey),
}

/// Resumable PBKDF2 derivation
///
/// Generic over the hash primitive; [`Sha1Words`] gives PBKDF2-HMAC-SHA1.
pub struct Pbkdf2Engine<H = Sha1Words> {
    hash: H,
    pads: PadKeys,
    salt_units: Vec<u16>,
    salt_width: CharWidth,
    config: Pbkdf2Config,
    iterations: u32,
    key_length: usize,
    total_blocks: u32,
    state: DerivationState,
    derived: Vec<u8>,
    started: Option<Instant>,
    progress: f64,
}

impl Pbkdf2Engine<Sha1Words> {
    /// Create a PBKDF2-HMAC-SHA1 engine with the default configuration
    ///
    /// # Errors
    ///
    /// - `KdfError::InvalidIterations` if `iterations` is zero
    /// - `KdfError::InvalidKeyLength` if `key_length` is zero
    /// - `KdfError::KeyLengthTooLarge` if the key needs more than `2^32 - 1` blocks
    pub fn new(
        password: impl Into<KeyMaterial>,
        salt: impl Into<KeyMaterial>,
        iterations: u32,
        key_length: usize,
    ) -> Result<Self> {
        Self::with_config(password, salt, iterations, key_length, Pbkdf2Config::default())
    }

    /// Create a PBKDF2-HMAC-SHA1 engine with an explicit configuration
    ///
    /// # Errors
    ///
    /// As [`Pbkdf2Engine::new`], plus `KdfError::InvalidConfig` for an
    /// invalid configuration.
    pub fn with_config(
        password: impl Into<KeyMaterial>,
        salt: impl Into<KeyMaterial>,
        iterations: u32,
        key_length: usize,
        config: Pbkdf2Config,
    ) -> Result<Self> {
        Self::with_hash(Sha1Words, password, salt, iterations, key_length, config)
    }
}

impl<H: WordHash> Pbkdf2Engine<H> {
    /// Create an engine over an arbitrary word hash
    ///
    /// All validation and HMAC key setup happen here, before any slice runs.
    ///
    /// # Errors
    ///
    /// As [`Pbkdf2Engine::with_config`], plus hash errors from key shortening.
    pub fn with_hash(
        hash: H,
        password: impl Into<KeyMaterial>,
        salt: impl Into<KeyMaterial>,
        iterations: u32,
        key_length: usize,
        config: Pbkdf2Config,
    ) -> Result<Self> {
        if iterations == 0 {
            return Err(KdfError::InvalidIterations);
        }
        if key_length == 0 {
            return Err(KdfError::InvalidKeyLength);
        }
        config.validate()?;

        let blocks = key_length.div_ceil(HASH_LEN) as u64;
        let total_blocks =
            u32::try_from(blocks).map_err(|_| KdfError::KeyLengthTooLarge { blocks })?;

        if config.block_index == BlockIndexEncoding::Legacy
            && total_blocks > BlockIndexEncoding::LEGACY_EXACT_LIMIT
        {
            tracing::warn!(
                total_blocks,
                "Legacy block index encoding diverges from RFC 2898 past block 15"
            );
        }

        let password = password.into();
        let salt = salt.into();
        let pads = PadKeys::derive(&hash, &password.pack(config.char_width))?;

        tracing::debug!(
            iterations,
            key_length,
            total_blocks,
            chunk = config.iterations_per_chunk,
            shortened = pads.was_shortened(),
            "PBKDF2 engine ready"
        );

        Ok(Self {
            hash,
            pads,
            salt_width: salt.effective_width(config.char_width),
            salt_units: salt.code_units(),
            config,
            iterations,
            key_length,
            total_blocks,
            state: DerivationState::new(),
            derived: Vec::new(),
            started: None,
            progress: 0.0,
        })
    }

    /// Advance by at most one slice
    ///
    /// The elapsed-time clock starts on the first call unless
    /// [`Pbkdf2Engine::start_timer`] already started it.
    ///
    /// # Errors
    ///
    /// Returns `KdfError::AlreadyComplete` once the key has been delivered,
    /// or a hash error from the PRF.
    pub fn step(&mut self) -> Result<StepStatus> {
        self.advance()
    }

    /// Drive the engine to completion on the calling thread
    ///
    /// # Errors
    ///
    /// Same as [`Pbkdf2Engine::step`].
    pub fn run_to_completion<P>(self, on_progress: P) -> Result<DerivedKey>
    where
        P: FnMut(f64),
    {
        CooperativeTask::new(self).run_blocking(on_progress)
    }

    /// Start the elapsed-time clock if it is not running yet
    pub fn start_timer(&mut self) {
        self.started.get_or_insert_with(Instant::now);
    }

    /// Current lifecycle phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.state.is_finished() {
            Phase::Done
        } else if self.started.is_none() {
            Phase::Idle
        } else {
            Phase::Running {
                block: self.state.block(),
                iteration: self.state.iterations_done(),
            }
        }
    }

    /// Last reported fraction of work completed
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Number of blocks (`l` in RFC 2898)
    #[must_use]
    pub fn total_blocks(&self) -> u32 {
        self.total_blocks
    }

    /// Iteration count (`c` in RFC 2898)
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Requested key length in bytes (`dkLen` in RFC 2898)
    #[must_use]
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &Pbkdf2Config {
        &self.config
    }

    /// Whether the password exceeded one hash block and was pre-hashed
    #[must_use]
    pub fn key_was_shortened(&self) -> bool {
        self.pads.was_shortened()
    }

    fn advance(&mut self) -> Result<StepStatus> {
        if self.state.is_finished() {
            return Err(KdfError::AlreadyComplete);
        }
        let started = *self.started.get_or_insert_with(Instant::now);

        let remaining = self.iterations - self.state.iterations_done();
        for _ in 0..remaining.min(self.config.iterations_per_chunk) {
            let output = match self.state.previous() {
                Some(previous) => self.pads.mac_digest(&self.hash, previous)?,
                None => self.pads.mac(&self.hash, &self.first_message())?,
            };
            self.state.fold(output);
        }

        let block = self.state.block();
        let done = self.state.iterations_done();
        self.progress = (f64::from(block - 1) + f64::from(done) / f64::from(self.iterations))
            / f64::from(self.total_blocks);
        tracing::trace!(block, done, progress = self.progress, "PBKDF2 slice complete");

        if done < self.iterations {
            return Ok(StepStatus::Running {
                progress: self.progress,
            });
        }

        let block_bytes = self.state.accumulator().to_bytes();
        if block < self.total_blocks {
            self.derived.extend_from_slice(&block_bytes);
            tracing::debug!(block, total_blocks = self.total_blocks, "PBKDF2 block complete");
            self.state.advance_block();
            return Ok(StepStatus::Running {
                progress: self.progress,
            });
        }

        let tail = self.key_length - self.derived.len();
        self.derived.extend_from_slice(&block_bytes[..tail]);
        self.state.finish();

        let elapsed = started.elapsed();
        paced_common::LoggingTransformer::log_derivation_complete(
            self.key_length,
            self.iterations,
            elapsed,
        );
        Ok(StepStatus::Done(DerivedKey::new(
            std::mem::take(&mut self.derived),
            elapsed,
        )))
    }

    /// `S || INT(i)` for the current block, packed at the salt's width
    fn first_message(&self) -> PackedText {
        let mut units = Vec::with_capacity(self.salt_units.len() + 4);
        units.extend_from_slice(&self.salt_units);
        units.extend(self.config.block_index.encode(self.state.block()));
        big_endian::pack_units(&units, self.salt_width)
    }
}

impl<H: WordHash> Steppable for Pbkdf2Engine<H> {
    type Output = DerivedKey;
    type Error = KdfError;

    fn step(&mut self) -> Result<Step<DerivedKey>> {
        Ok(match self.advance()? {
            StepStatus::Running { .. } => Step::Pending,
            StepStatus::Done(key) => Step::Ready(key),
        })
    }

    fn progress(&self) -> f64 {
        self.progress
    }
}

impl<H> std::fmt::Debug for Pbkdf2Engine<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pbkdf2Engine")
            .field("iterations", &self.iterations)
            .field("key_length", &self.key_length)
            .field("total_blocks", &self.total_blocks)
            .field("config", &self.config)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            Pbkdf2Engine::new("p", "s", 0, 20),
            Err(KdfError::InvalidIterations)
        ));
        assert!(matches!(
            Pbkdf2Engine::new("p", "s", 1, 0),
            Err(KdfError::InvalidKeyLength)
        ));
        assert!(matches!(
            Pbkdf2Engine::with_config("p", "s", 1, 20, Pbkdf2Config::default().with_chunk_size(0)),
            Err(KdfError::InvalidConfig(_))
        ));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_rejects_key_length_past_block_limit() {
        let too_long = (MAX_BLOCKS as usize) * HASH_LEN + 1;
        assert!(matches!(
            Pbkdf2Engine::new("p", "s", 1, too_long),
            Err(KdfError::KeyLengthTooLarge { blocks }) if blocks == MAX_BLOCKS + 1
        ));
    }

    #[test]
    fn test_block_count_rounds_up() {
        assert_eq!(Pbkdf2Engine::new("p", "s", 1, 1).expect("engine").total_blocks(), 1);
        assert_eq!(Pbkdf2Engine::new("p", "s", 1, 20).expect("engine").total_blocks(), 1);
        assert_eq!(Pbkdf2Engine::new("p", "s", 1, 21).expect("engine").total_blocks(), 2);
    }

    #[test]
    fn test_phases_and_terminal_state() {
        let mut engine = Pbkdf2Engine::with_config(
            "password",
            "salt",
            25,
            20,
            Pbkdf2Config::default().with_chunk_size(10),
        )
        .expect("engine");
        assert_eq!(engine.phase(), Phase::Idle);

        assert!(matches!(engine.step(), Ok(StepStatus::Running { .. })));
        assert_eq!(
            engine.phase(),
            Phase::Running {
                block: 1,
                iteration: 10
            }
        );
        assert!(matches!(engine.step(), Ok(StepStatus::Running { .. })));
        let key = match engine.step().expect("final slice") {
            StepStatus::Done(key) => key,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(key.len(), 20);
        assert_eq!(engine.phase(), Phase::Done);
        assert!(matches!(engine.step(), Err(KdfError::AlreadyComplete)));
    }

    #[test]
    fn test_rfc6070_first_vector() {
        let key = Pbkdf2Engine::new("password", "salt", 1, 20)
            .expect("engine")
            .run_to_completion(|_| {})
            .expect("derivation");
        assert_eq!(key.to_hex(), "0c60c80f961f0e71f3a9b524af6012062fe037a6");
    }
}
