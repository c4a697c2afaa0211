//! Byte/word packing conventions
//!
//! The two submodules implement opposite byte orders and share no helpers.

pub mod big_endian;
pub mod little_endian;
