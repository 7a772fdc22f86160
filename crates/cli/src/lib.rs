//! Trackgate command line library.
//!
//! Holds configuration and the command implementations so the binary and
//! the integration tests share them.

pub mod commands;
pub mod config;
