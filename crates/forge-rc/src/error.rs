//! Error types for rc-file parsing.

use thiserror::Error;

/// Failures raised while parsing rc files.
///
/// All variants are fatal: the first failure aborts the whole resolution and
/// propagates unchanged to the caller.
#[derive(Debug, Error)]
pub enum RcError {
    /// The caller checked readability before handing the file over, so a
    /// read failure during parsing is an internal inconsistency rather than
    /// a user error.
    #[error("Unexpected error reading rc file '{path}'")]
    UnexpectedRead { path: String },

    /// Malformed `import` line: wrong argument count, or a workspace-relative
    /// path with no workspace to resolve it against.
    #[error("Invalid import declaration in rc file '{path}': '{line}'")]
    BadImportSyntax { path: String, line: String },

    /// A file re-imports one of its own ancestors. The cycle lists the
    /// import stack in traversal order.
    #[error("Import loop detected:\n{}", format_cycle(.cycle))]
    ImportCycle { cycle: Vec<String> },
}

fn format_cycle(cycle: &[String]) -> String {
    cycle
        .iter()
        .map(|file| format!("  {}\n", file))
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_cycle_lists_stack_in_order() {
        let err = RcError::ImportCycle {
            cycle: vec!["/a/.forgerc".to_string(), "/b/.forgerc".to_string()],
        };
        let message = err.to_string();
        assert!(message.starts_with("Import loop detected:\n"));
        assert!(message.contains("  /a/.forgerc\n  /b/.forgerc\n"));
    }

    #[test]
    fn test_bad_import_names_file_and_line() {
        let err = RcError::BadImportSyntax {
            path: "/w/.forgerc".to_string(),
            line: "import a b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid import declaration in rc file '/w/.forgerc': 'import a b'"
        );
    }
}
