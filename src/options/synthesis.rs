//! Downstream argument-vector synthesis.
//!
//! The rc-file contents, client environment, and terminal state are folded
//! into one flat vector of annotated flags the downstream command consumes
//! positionally. The block layout is contractual:
//!
//! 1. `--rc_source=client` plus the slot-0 terminal bootstrap overrides.
//! 2. One `--rc_source=<path>` per parsed rc file, in index order.
//! 3. One `--default_override=<slot>:<directive>=<value>` per table entry,
//!    where slot is the contributing file's index plus one (slot 0 is
//!    reserved for the client pseudo-source).
//! 4. The client environment (`--client_env=`), or `--ignore_client_env` in
//!    batch mode.
//! 5. `--client_cwd=` and, inside an editor terminal, `--emacs`.

use crate::host;
use forge_rc::{ParseSession, STARTUP_DIRECTIVE};

pub(crate) fn rcfile_args_and_options(
    session: &ParseSession,
    batch: bool,
    cwd: &str,
) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();

    result.push("--rc_source=client".to_string());
    result.push(format!(
        "--default_override=0:common=--isatty={}",
        host::is_standard_terminal() as u8
    ));
    result.push(format!(
        "--default_override=0:common=--terminal_columns={}",
        host::terminal_columns()
    ));

    for file in session.files() {
        result.push(format!(
            "--rc_source={}",
            host::convert_path(file.filename())
        ));
    }

    for (directive, options) in session.table().iter() {
        // Startup words were consumed during reconciliation and never reach
        // the downstream command.
        if directive == STARTUP_DIRECTIVE {
            continue;
        }
        for option in options {
            result.push(format!(
                "--default_override={}:{}={}",
                option.rcfile_index + 1,
                directive,
                option.value
            ));
        }
    }

    if batch {
        result.push("--ignore_client_env".to_string());
    } else {
        for (name, value) in host::client_environment() {
            let value = match name.as_str() {
                "PATH" => host::convert_path_list(&value),
                "TMP" => host::convert_path(&value),
                _ => value,
            };
            result.push(format!("--client_env={}={}", name, value));
        }
    }

    result.push(format!("--client_cwd={}", host::convert_path(cwd)));

    if host::is_editor_terminal() {
        result.push("--emacs".to_string());
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_still_emits_bootstrap_block() {
        let session = ParseSession::new();
        let args = rcfile_args_and_options(&session, true, "/work");

        assert_eq!(args[0], "--rc_source=client");
        assert!(args[1].starts_with("--default_override=0:common=--isatty="));
        assert!(args[2].starts_with("--default_override=0:common=--terminal_columns="));
        assert!(args.contains(&"--ignore_client_env".to_string()));
        assert!(args.contains(&"--client_cwd=/work".to_string()));
    }

    #[test]
    fn test_batch_suppresses_client_env() {
        let session = ParseSession::new();
        let args = rcfile_args_and_options(&session, true, "/");
        assert!(!args.iter().any(|a| a.starts_with("--client_env=")));

        let args = rcfile_args_and_options(&session, false, "/");
        assert!(!args.contains(&"--ignore_client_env".to_string()));
    }
}
