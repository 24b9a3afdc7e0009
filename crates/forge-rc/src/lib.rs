//! Cascading rc-file grammar for the forge launcher.
//!
//! An rc file is a line-oriented configuration file: `#` comments,
//! `\`-continued lines, and one directive per logical line, plus an
//! `import` directive for splicing in other rc files. Parsing all the
//! rc files of one invocation accumulates a single ordered option table
//! in which every value is tagged with the file that contributed it.

mod error;
mod file;
mod table;
mod tokenize;

pub use error::RcError;
pub use file::{ParseSession, RcFile, WORKSPACE_PREFIX};
pub use table::{OptionTable, RcOption};
pub use tokenize::{logical_lines, tokenize_line};

/// Directive name reserved for flags that configure the launcher itself.
/// Every other directive is forwarded opaquely to the downstream command.
pub const STARTUP_DIRECTIVE: &str = "startup";
