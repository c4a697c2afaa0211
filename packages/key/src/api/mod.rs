//! Fluent derivation API
//!
//! Usage: `Kdf::pbkdf2().with_iterations(4096).on_result(handler).derive(password, salt).await`

pub mod kdf_entry;
pub mod pbkdf2_builder;

pub use kdf_entry::Kdf;
pub use pbkdf2_builder::{Pbkdf2Builder, Pbkdf2BuilderWithHandler};
