//! Presentation layer
//!
//! This module contains UI widgets and their configuration:
//! - Drawer, overlay and demo content widgets
//! - Configuration (styles, keybindings)

pub mod config;
pub mod widgets;
