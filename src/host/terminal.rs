//! Terminal capability queries.
//!
//! Stack: `is-terminal` for tty detection, `terminal_size` for the column
//! count. Results feed the slot-0 bootstrap overrides in the synthesized
//! argument vector.

use is_terminal::IsTerminal;
use std::env;
use std::io;

/// True when the session is connected to an interactive terminal: a sane
/// `TERM`, and both stdout and stderr attached to a tty.
pub fn is_standard_terminal() -> bool {
    match env::var("TERM") {
        Ok(term) if term != "dumb" && term != "emacs" => {}
        _ => return false,
    }
    io::stdout().is_terminal() && io::stderr().is_terminal()
}

/// Width of the controlling terminal in columns, defaulting to 80 when the
/// query fails (e.g. output is redirected).
pub fn terminal_columns() -> u16 {
    terminal_size::terminal_size()
        .map(|(width, _)| width.0)
        .unwrap_or(80)
}

/// True when the session runs inside an editor terminal (emacs shell
/// buffers set `EMACS=t` or `INSIDE_EMACS`).
pub fn is_editor_terminal() -> bool {
    env::var("EMACS").map(|v| v == "t").unwrap_or(false) || env::var("INSIDE_EMACS").is_ok()
}
