//! `health-guard` library crate.
//!
//! The binary (`hg`) is a thin wrapper around this library so that:
//!
//! - feature mapping and model dispatch are testable without a terminal
//! - the TUI and the scripting commands share one prediction path
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod features;
pub mod forms;
pub mod logging;
pub mod models;
pub mod posture;
pub mod report;
pub mod tui;
