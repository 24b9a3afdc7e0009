//! Rc-file representation and recursive import expansion.
//!
//! `ParseSession` is the explicit context threaded through recursive parse
//! calls: it owns the file list and the shared option table, and nothing in
//! this crate touches ambient global state. Cycle detection rides on a
//! transient stack of in-progress filenames.

use crate::error::RcError;
use crate::table::{OptionTable, RcOption};
use crate::tokenize::{logical_lines, tokenize_line};
use crate::STARTUP_DIRECTIVE;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;

/// Prefix marking an import path as workspace-relative.
pub const WORKSPACE_PREFIX: &str = "%workspace%/";

/// One configuration file, identified by its normalized path and its position
/// in global discovery order. Top-level candidates and nested imports share
/// one index sequence; an index is never reused or renumbered.
#[derive(Debug, Clone, Serialize)]
pub struct RcFile {
    filename: String,
    index: usize,
    /// SHA-256 of the raw file bytes, recorded when the file is parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    sha256: Option<String>,
}

impl RcFile {
    fn new(filename: String, index: usize) -> Self {
        Self {
            filename,
            index,
            sha256: None,
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn sha256(&self) -> Option<&str> {
        self.sha256.as_deref()
    }
}

/// Owns the rc-file list and the option table accumulated over one
/// invocation. One session backs one launcher run; partial results are never
/// read out of a session whose parse failed.
#[derive(Debug, Default)]
pub struct ParseSession {
    files: Vec<RcFile>,
    table: OptionTable,
}

impl ParseSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level rc file, assigning the next global index.
    pub fn add_file(&mut self, filename: impl Into<String>) -> usize {
        let index = self.files.len();
        self.files.push(RcFile::new(filename.into(), index));
        index
    }

    /// All known rc files, in ascending index order.
    pub fn files(&self) -> &[RcFile] {
        &self.files
    }

    pub fn table(&self) -> &OptionTable {
        &self.table
    }

    /// Parse the file at `file_index`, recursively expanding imports
    /// depth-first. New files encountered through `import` are appended to
    /// the session's file list with sequential indices.
    pub fn parse(&mut self, workspace: &str, file_index: usize) -> Result<(), RcError> {
        let mut import_stack = vec![self.files[file_index].filename().to_string()];
        self.parse_with_stack(workspace, file_index, &mut import_stack)
    }

    fn parse_with_stack(
        &mut self,
        workspace: &str,
        file_index: usize,
        import_stack: &mut Vec<String>,
    ) -> Result<(), RcError> {
        let filename = self.files[file_index].filename().to_string();
        log::debug!("parsing rc file '{}' (index {})", filename, file_index);

        let bytes = fs::read(&filename).map_err(|_| RcError::UnexpectedRead {
            path: filename.clone(),
        })?;
        self.files[file_index].sha256 = Some(hex::encode(Sha256::digest(&bytes)));
        let contents = String::from_utf8_lossy(&bytes).into_owned();

        // Echoed after the whole file is parsed; file-local, not part of
        // the table.
        let mut startup_words: Vec<String> = Vec::new();

        for line in logical_lines(&contents) {
            if line.is_empty() {
                continue;
            }
            let words = tokenize_line(&line);
            if words.is_empty() {
                continue;
            }

            if words[0] == "import" {
                if words.len() != 2 {
                    return Err(RcError::BadImportSyntax {
                        path: filename,
                        line,
                    });
                }
                let target = match resolve_import(workspace, &words[1]) {
                    Some(target) => target,
                    None => {
                        return Err(RcError::BadImportSyntax {
                            path: filename,
                            line,
                        })
                    }
                };
                if import_stack.contains(&target) {
                    return Err(RcError::ImportCycle {
                        cycle: import_stack.clone(),
                    });
                }

                let child_index = self.add_file(target.clone());
                import_stack.push(target);
                self.parse_with_stack(workspace, child_index, import_stack)?;
                import_stack.pop();
            } else {
                let directive = &words[0];
                for word in &words[1..] {
                    self.table
                        .push(directive, RcOption::new(file_index, word.clone()));
                    if directive == STARTUP_DIRECTIVE {
                        startup_words.push(word.clone());
                    }
                }
            }
        }

        if !startup_words.is_empty() {
            eprintln!(
                "INFO: Reading 'startup' options from {}: {}",
                filename,
                startup_words.join(" ")
            );
        }
        Ok(())
    }
}

/// Rewrite a `%workspace%/`-prefixed import path against the workspace root.
/// Returns `None` when the prefix is present but no workspace is available.
fn resolve_import(workspace: &str, path: &str) -> Option<String> {
    match path.strip_prefix(WORKSPACE_PREFIX) {
        Some(_) if workspace.is_empty() => None,
        Some(rest) => Some(format!("{}/{}", workspace.trim_end_matches('/'), rest)),
        None => Some(path.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_rc(dir: &TempDir, name: &str, contents: &str) -> String {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_resolve_import_passthrough() {
        assert_eq!(
            resolve_import("/ws", "/etc/forge.rc"),
            Some("/etc/forge.rc".to_string())
        );
    }

    #[test]
    fn test_resolve_import_workspace_relative() {
        assert_eq!(
            resolve_import("/ws", "%workspace%/tools/forge.rc"),
            Some("/ws/tools/forge.rc".to_string())
        );
    }

    #[test]
    fn test_resolve_import_without_workspace_fails() {
        assert_eq!(resolve_import("", "%workspace%/tools/forge.rc"), None);
    }

    #[test]
    fn test_parse_collects_tagged_options() {
        let dir = TempDir::new().unwrap();
        let rc = write_rc(&dir, "a.rc", "build --jobs 4\nstartup --batch\n");

        let mut session = ParseSession::new();
        let index = session.add_file(&rc);
        session.parse("", index).unwrap();

        let build = session.table().get("build");
        assert_eq!(build.len(), 2);
        assert_eq!(build[0].value, "--jobs");
        assert_eq!(build[1].value, "4");
        assert!(build.iter().all(|o| o.rcfile_index == 0));
        assert_eq!(session.table().get(STARTUP_DIRECTIVE).len(), 1);
    }

    #[test]
    fn test_parse_records_digest() {
        let dir = TempDir::new().unwrap();
        let rc = write_rc(&dir, "a.rc", "build --jobs 4\n");

        let mut session = ParseSession::new();
        let index = session.add_file(&rc);
        session.parse("", index).unwrap();

        let digest = session.files()[0].sha256().unwrap();
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_import_assigns_depth_first_indices() {
        let dir = TempDir::new().unwrap();
        let inner = write_rc(&dir, "inner.rc", "build --from-inner\n");
        let outer = write_rc(
            &dir,
            "outer.rc",
            &format!("build --before\nimport {}\nbuild --after\n", inner),
        );

        let mut session = ParseSession::new();
        let index = session.add_file(&outer);
        session.parse("", index).unwrap();

        assert_eq!(session.files().len(), 2);
        assert_eq!(session.files()[1].filename(), inner);
        let values: Vec<_> = session
            .table()
            .get("build")
            .iter()
            .map(|o| (o.rcfile_index, o.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![(0, "--before"), (1, "--from-inner"), (0, "--after")]
        );
    }

    #[test]
    fn test_self_import_is_a_cycle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("loop.rc");
        fs::write(&path, format!("import {}\n", path.to_string_lossy())).unwrap();

        let mut session = ParseSession::new();
        let index = session.add_file(path.to_string_lossy().to_string());
        let err = session.parse("", index).unwrap_err();
        assert!(matches!(err, RcError::ImportCycle { .. }));
    }

    #[test]
    fn test_import_with_two_arguments_is_rejected() {
        let dir = TempDir::new().unwrap();
        let rc = write_rc(&dir, "bad.rc", "import one two\n");

        let mut session = ParseSession::new();
        let index = session.add_file(&rc);
        let err = session.parse("", index).unwrap_err();
        assert!(matches!(err, RcError::BadImportSyntax { .. }));
        assert!(err.to_string().contains("import one two"));
    }

    #[test]
    fn test_missing_file_is_unexpected_read() {
        let mut session = ParseSession::new();
        let index = session.add_file("/nonexistent/path/.forgerc");
        let err = session.parse("", index).unwrap_err();
        assert!(matches!(err, RcError::UnexpectedRead { .. }));
    }

    #[test]
    fn test_comments_and_blanks_contribute_nothing() {
        let dir = TempDir::new().unwrap();
        let rc = write_rc(&dir, "empty.rc", "# a comment\n\n   \n# another\n");

        let mut session = ParseSession::new();
        let index = session.add_file(&rc);
        session.parse("", index).unwrap();
        assert!(session.table().is_empty());
    }
}
