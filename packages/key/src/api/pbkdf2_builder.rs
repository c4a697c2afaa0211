//! PBKDF2 builder

use paced_hashing::CharWidth;

use crate::{
    BlockIndexEncoding, DerivationHandle, DerivationHandleWithHandler, DerivedKey,
    KeyMaterial, Pbkdf2Config, Pbkdf2Engine, Result,
};

/// Iteration count used when none is given
pub const DEFAULT_ITERATIONS: u32 = 1_000;

/// Key length in bytes used when none is given; one SHA-1 block
pub const DEFAULT_KEY_LENGTH: usize = 20;

type ProgressHandler = Box<dyn FnMut(f64) + Send + 'static>;

/// PBKDF2 builder
///
/// Parameters are validated when the engine is built, so a bad iteration
/// count surfaces from `derive` or `build` rather than from the setter.
pub struct Pbkdf2Builder {
    iterations: u32,
    key_length: usize,
    config: Pbkdf2Config,
    progress: ProgressHandler,
}

/// PBKDF2 builder with result handler
pub struct Pbkdf2BuilderWithHandler<F> {
    builder: Pbkdf2Builder,
    handler: F,
}

impl Default for Pbkdf2Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Pbkdf2Builder {
    /// Create a builder with default parameters
    #[must_use]
    pub fn new() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_length: DEFAULT_KEY_LENGTH,
            config: Pbkdf2Config::default(),
            progress: Box::new(paced_common::on_progress),
        }
    }

    /// Set the iteration count
    #[must_use]
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the derived key length in bytes
    #[must_use]
    pub fn with_key_length(mut self, key_length: usize) -> Self {
        self.key_length = key_length;
        self
    }

    /// Replace the whole engine configuration
    #[must_use]
    pub fn with_config(mut self, config: Pbkdf2Config) -> Self {
        self.config = config;
        self
    }

    /// Set PRF iterations per slice
    #[must_use]
    pub fn with_chunk_size(mut self, iterations_per_chunk: u32) -> Self {
        self.config = self.config.with_chunk_size(iterations_per_chunk);
        self
    }

    /// Set the text packing width
    #[must_use]
    pub fn with_char_width(mut self, char_width: CharWidth) -> Self {
        self.config = self.config.with_char_width(char_width);
        self
    }

    /// Set the block index encoding
    #[must_use]
    pub fn with_block_index(mut self, block_index: BlockIndexEncoding) -> Self {
        self.config = self.config.with_block_index(block_index);
        self
    }

    /// Observe progress after every slice
    #[must_use]
    pub fn on_progress<P>(mut self, handler: P) -> Self
    where
        P: FnMut(f64) + Send + 'static,
    {
        self.progress = Box::new(handler);
        self
    }

    /// Add `on_result` handler
    #[must_use]
    pub fn on_result<F, T>(self, handler: F) -> Pbkdf2BuilderWithHandler<F>
    where
        F: FnOnce(Result<DerivedKey>) -> T,
    {
        Pbkdf2BuilderWithHandler {
            builder: self,
            handler,
        }
    }

    /// Build the engine without starting it
    ///
    /// # Errors
    ///
    /// Returns the engine's validation errors.
    pub fn build(
        self,
        password: impl Into<KeyMaterial>,
        salt: impl Into<KeyMaterial>,
    ) -> Result<Pbkdf2Engine> {
        Pbkdf2Engine::with_config(password, salt, self.iterations, self.key_length, self.config)
    }

    /// Start the derivation on the current tokio runtime
    ///
    /// Invalid parameters produce a handle that resolves to the error.
    #[must_use]
    pub fn derive(
        self,
        password: impl Into<KeyMaterial>,
        salt: impl Into<KeyMaterial>,
    ) -> DerivationHandle {
        let Self {
            iterations,
            key_length,
            config,
            progress,
        } = self;
        match Pbkdf2Engine::with_config(password, salt, iterations, key_length, config) {
            Ok(engine) => engine.derive_key(progress, |_, _| {}),
            Err(e) => DerivationHandle::error(e),
        }
    }
}

impl<F, T> Pbkdf2BuilderWithHandler<F>
where
    F: FnOnce(Result<DerivedKey>) -> T,
{
    /// Start the derivation; the returned future resolves through the handler
    pub fn derive(
        self,
        password: impl Into<KeyMaterial>,
        salt: impl Into<KeyMaterial>,
    ) -> DerivationHandleWithHandler<F> {
        self.builder.derive(password, salt).on_result(self.handler)
    }
}
