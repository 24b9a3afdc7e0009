//! Forge launcher - startup-configuration resolution for the forge build tool.
//!
//! The launcher cascades rc files, merges their declarations with
//! command-line overrides, and produces a single, deterministically ordered
//! argument vector, annotated with provenance, for the downstream command
//! dispatcher.

pub mod error;
pub mod explain;
pub mod host;
pub mod options;
pub mod workspace;

pub use error::LauncherError;
pub use explain::InvocationPlan;
pub use options::{OptionProcessor, StartupOptions};
