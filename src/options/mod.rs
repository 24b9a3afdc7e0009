//! Option processing.
//!
//! Orchestrates candidate rc-file discovery, parsing into the shared option
//! table, startup-option reconciliation against the command line, and the
//! final argument-vector synthesis handed to the downstream dispatcher.

mod processor;
mod startup;
mod synthesis;

pub use processor::OptionProcessor;
pub use startup::{StartupError, StartupOptions};
