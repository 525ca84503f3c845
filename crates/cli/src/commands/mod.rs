//! CLI command implementations.

pub mod actions;
pub mod export;
pub mod format;
pub mod validate;
