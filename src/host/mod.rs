//! Host-environment collaborators.
//!
//! Thin wrappers over the process boundary: terminal capability queries,
//! path conversion for the downstream consumer, readability checks, and the
//! inherited-environment snapshot. The resolution logic proper never touches
//! the OS directly except through this module.

mod paths;
mod terminal;

pub use paths::{can_read, convert_path, convert_path_list, make_absolute};
pub use terminal::{is_editor_terminal, is_standard_terminal, terminal_columns};

/// Snapshot of the inherited environment as name/value pairs.
///
/// Variables whose name or value is not valid Unicode are skipped; they
/// cannot be represented in the textual hand-off format.
pub fn client_environment() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
        .collect()
}
