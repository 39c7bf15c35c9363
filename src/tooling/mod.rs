//! CLI tooling for the taxonomy engine.

pub mod cli;
pub mod format;
