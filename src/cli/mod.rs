//! Command-line surface: argument parsing and diagnostics.

pub mod args;
pub mod constants;
