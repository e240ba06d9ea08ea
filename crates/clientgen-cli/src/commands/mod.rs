//! Command implementations for the clientgen CLI.
//!
//! Each command module resolves its inputs, runs the operation, and prints
//! its report in the requested output format.

pub mod common;
pub mod completions;
pub mod generate;
pub mod init_config;
pub mod validate;
