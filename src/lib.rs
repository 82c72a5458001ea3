//! # Slidedrawer
//!
//! A sliding side drawer for terminal user interfaces, built with Ratatui.
//!
//! The drawer is a panel anchored to the left or right edge that slides in
//! and out on a damped spring, with a dimming overlay over the rest of the
//! screen. Clicking the overlay closes it.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::time::{Duration, Instant};
//!
//! use slidedrawer::model::drawer::{Drawer, DrawerProps, Phase};
//! use slidedrawer::model::position::Placement;
//!
//! let props = DrawerProps::default()
//!     .placement(Placement::Right)
//!     .drawer_width(250.0);
//! let mut drawer = Drawer::new(props, 400.0);
//! assert_eq!(drawer.offset().x, 400.0);
//!
//! let start = Instant::now();
//! drawer.open(start);
//! drawer.tick(start + Duration::from_secs(2));
//! assert_eq!(drawer.phase(), Phase::Open);
//! assert_eq!(drawer.offset().x, 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Spring animation and drawer state
//! - [`presentation`] - Widgets, styles and keybindings
//! - [`infrastructure`] - Terminal, CLI and configuration
//! - [`integration`] - Host loop tying the above together
//! - [`utils`] - Logging, panic handling and paths

pub mod action;
pub mod infrastructure;
pub mod integration;
pub mod model;
pub mod presentation;
pub mod utils;

/// Result type used throughout the library
pub type Result<T> = color_eyre::eyre::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
