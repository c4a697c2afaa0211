//! Common infrastructure shared by the paced crates
//!
//! This crate provides:
//! - Logging bootstrap through `env_logger` (library code emits `tracing` events,
//!   which reach `log` through tracing's `log` feature)
//! - Default `on_result` / `on_progress` / `on_error` handlers used by the
//!   derivation builders when the caller does not supply their own

pub mod handlers;
pub mod logging;

pub use handlers::{on_error, on_progress, on_result};
pub use logging::LoggingTransformer;
