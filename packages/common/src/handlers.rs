//! Default handler functions for result, progress and error processing
//!
//! Builders accept caller-supplied closures; these are the pass-through
//! defaults they fall back on.

/// Default result handler that logs completion and passes the result through
pub fn on_result<T>(result: T) -> T {
    tracing::debug!("Derivation completed");
    result
}

/// Default progress handler that traces the reported fraction
pub fn on_progress(fraction: f64) {
    tracing::trace!(fraction, "Derivation progress");
}

/// Default error handler that logs errors before passing them through
pub fn on_error<T: std::fmt::Debug>(error: T) -> T {
    tracing::warn!("Error occurred: {error:?}");
    error
}
