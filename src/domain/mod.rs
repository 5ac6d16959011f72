//! Domain types used throughout the application.
//!
//! This module defines:
//!
//! - the clinical domains (`Domain`) and their canned result messages
//! - navigation pages (`Page`)
//! - classifier output (`Label`) and what a submission produced (`Outcome`)

pub mod types;

pub use types::*;
