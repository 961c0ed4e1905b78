//! Task timer library
//!
//! Core components for the terminal task timer.

pub mod app;
pub mod effects;
pub mod event;
pub mod state;
pub mod store;
pub mod ui;
