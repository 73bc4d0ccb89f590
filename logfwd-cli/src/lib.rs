//! logfwd CLI library.
//!
//! Exposes the command modules for integration testing.
//! In production, `logfwd` is used as a binary (main.rs).

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
