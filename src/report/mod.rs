//! Reporting utilities: field tables, prediction summaries, registry status.

pub mod format;

pub use format::*;
