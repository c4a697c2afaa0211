//! Structured logging bootstrap
//!
//! Provides env_logger-based logging. Library crates emit `tracing` events;
//! with tracing's `log` feature enabled and no subscriber installed those
//! events are forwarded to the `log` facade and printed by `env_logger`.

use log::info;
use std::sync::Once;
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Logging bootstrap and secure logging helpers
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging (call once at application startup)
    ///
    /// Configure levels via the `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - engine construction and block completion
    /// - `RUST_LOG=trace` - every chunk
    /// - `RUST_LOG=paced_key=info` - completion summaries only
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; repeated initialization is ignored.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a finished derivation without exposing key material
    pub fn log_derivation_complete(key_len: usize, iterations: u32, elapsed: Duration) {
        info!(
            "PBKDF2 derivation complete (key_len: {key_len}, iterations: {iterations}, elapsed: {elapsed:?})"
        );
    }

    /// Log a failed derivation with its error type and message
    ///
    /// Derivation errors carry parameters and state, never key material.
    pub fn log_derivation_error<E: std::error::Error>(operation: &str, error: &E) {
        log::error!("{}", Self::failure_message(operation, error));
    }

    fn failure_message<E: std::error::Error>(operation: &str, error: &E) -> String {
        format!(
            "Key derivation failed: {operation}: {error} (error_type: {})",
            std::any::type_name::<E>()
        )
    }
}
