//! Integration layer
//!
//! Wires terminal events, the drawer model and the widgets together.

pub mod app_runner;
pub mod coalescer;
