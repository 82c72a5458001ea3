//! Infrastructure layer
//!
//! This module handles the outside world:
//! - TUI foundation (real and in-memory terminals)
//! - CLI argument processing
//! - Configuration loading

pub mod cli;
pub mod config;
pub mod tui;
