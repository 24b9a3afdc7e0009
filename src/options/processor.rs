//! Resolution orchestration.
//!
//! `OptionProcessor` drives one launcher invocation end to end: discover the
//! candidate rc files, parse them into the shared option table, reconcile
//! startup options (rc-sourced first, command line last), then synthesize
//! the argument vector handed to the downstream command.

use crate::error::LauncherError;
use crate::host;
use crate::options::startup::{
    get_nullary_option, get_unary_option, is_arg, NO_MASTER_RC_FLAGS, RC_FILE_FLAGS,
};
use crate::options::synthesis;
use crate::options::StartupOptions;
use crate::workspace;
use forge_rc::{ParseSession, STARTUP_DIRECTIVE};
use std::collections::HashSet;

/// One-shot resolver: construct, call [`parse_options`] once, then read the
/// resolved state through the accessors.
///
/// [`parse_options`]: OptionProcessor::parse_options
pub struct OptionProcessor {
    session: ParseSession,
    startup_options: StartupOptions,
    args: Vec<String>,
    command: String,
    command_arguments: Vec<String>,
    /// Count of command-line tokens consumed as startup options, excluding
    /// the program name.
    startup_args: usize,
    parsed: bool,
}

impl OptionProcessor {
    pub fn new(defaults: StartupOptions) -> Self {
        Self {
            session: ParseSession::new(),
            startup_options: defaults,
            args: Vec::new(),
            command: String::new(),
            command_arguments: Vec::new(),
            startup_args: 0,
            parsed: false,
        }
    }

    /// The resolved command verb; empty when the invocation named none.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The fully synthesized downstream argument vector.
    pub fn command_arguments(&self) -> &[String] {
        &self.command_arguments
    }

    pub fn startup_options(&self) -> &StartupOptions {
        &self.startup_options
    }

    /// The parse session backing this run: file list and option table.
    pub fn session(&self) -> &ParseSession {
        &self.session
    }

    /// Number of command-line startup-option tokens (program name excluded).
    pub fn startup_args(&self) -> usize {
        self.startup_args
    }

    /// Resolve everything for one invocation.
    ///
    /// `args` is the full argument vector including the program name;
    /// `workspace` is the enclosing workspace root or empty; `cwd` is the
    /// client working directory reported downstream.
    pub fn parse_options(
        &mut self,
        args: &[String],
        workspace: &str,
        cwd: &str,
    ) -> Result<(), LauncherError> {
        if self.parsed {
            return Err(LauncherError::AlreadyParsed);
        }
        self.parsed = true;
        self.args = args.to_vec();

        // Rc selection flags act before any rc file is read, so they are
        // scanned out of the raw argv up front. The scan covers the whole
        // argument list, command token included, so a selection flag placed
        // after the command still takes effect. First explicit rc flag wins.
        let mut explicit_rc: Option<String> = None;
        let mut use_master_rc = true;
        for i in 1..args.len() {
            let arg = args[i].as_str();
            let next = args.get(i + 1).map(String::as_str);
            if explicit_rc.is_none() {
                if let Some(value) = RC_FILE_FLAGS
                    .iter()
                    .find_map(|flag| get_unary_option(arg, next, flag))
                {
                    explicit_rc = Some(value.to_string());
                }
            }
            if NO_MASTER_RC_FLAGS
                .iter()
                .any(|flag| get_nullary_option(arg, flag))
            {
                use_master_rc = false;
            }
        }

        StartupOptions::validate_args(args)?;

        let mut candidates: Vec<String> = Vec::new();
        if use_master_rc {
            candidates.extend(workspace::candidate_master_rc_paths(workspace));
        }
        candidates.push(find_user_rc(explicit_rc.as_deref(), workspace)?);

        // Same file reachable through several candidate slots is parsed once,
        // at its first position.
        let mut seen: HashSet<String> = HashSet::new();
        for candidate in candidates {
            if candidate.is_empty() || !seen.insert(candidate.clone()) {
                continue;
            }
            let index = self.session.add_file(candidate);
            self.session.parse(workspace, index)?;
        }

        self.parse_startup_options()?;

        if self.startup_args + 1 >= self.args.len() {
            // Startup options but no command: valid, resolves to the empty
            // command with no arguments.
            return Ok(());
        }
        self.command = self.args[self.startup_args + 1].clone();
        self.command_arguments =
            synthesis::rcfile_args_and_options(&self.session, self.startup_options.batch, cwd);
        self.command_arguments
            .extend_from_slice(&self.args[self.startup_args + 2..]);
        Ok(())
    }

    /// Replay `startup` directives from the rc files, then walk the leading
    /// command-line flags. Later assignments win, so the command line
    /// overrides every rc declaration.
    fn parse_startup_options(&mut self) -> Result<(), LauncherError> {
        let rc_startup: Vec<(usize, String)> = self
            .session
            .table()
            .get(STARTUP_DIRECTIVE)
            .iter()
            .map(|option| (option.rcfile_index, option.value.clone()))
            .collect();

        let mut i = 0;
        while i + 1 < rc_startup.len() {
            let (file_index, ref word) = rc_startup[i];
            let rcfile = self.session.files()[file_index].filename().to_string();
            let next = rc_startup[i + 1].1.clone();
            if self.startup_options.process_arg(word, &next, &rcfile)? {
                i += 1;
            }
            i += 1;
        }
        if i < rc_startup.len() && is_arg(&rc_startup[i].1) {
            // A trailing unary flag has no successor to consume; offering the
            // empty string lets packed forms still apply. A bare trailing
            // non-flag token is ignored rather than rejected.
            let (file_index, ref word) = rc_startup[i];
            let rcfile = self.session.files()[file_index].filename().to_string();
            self.startup_options.process_arg(word, "", &rcfile)?;
        }

        let mut i = 1;
        if !self.args.is_empty() {
            while i + 1 < self.args.len() && is_arg(&self.args[i]) {
                let arg = self.args[i].clone();
                let next = self.args[i + 1].clone();
                if self.startup_options.process_arg(&arg, &next, "")? {
                    i += 1;
                }
                i += 1;
            }
            if i < self.args.len() && is_arg(&self.args[i]) {
                let arg = self.args[i].clone();
                self.startup_options.process_arg(&arg, "", "")?;
                i += 1;
            }
        }
        self.startup_args = i - 1;
        Ok(())
    }
}

/// Resolve the user rc file: the explicit `--forgerc` path if given (must be
/// readable), else the workspace copy, else the home-directory copy. The
/// empty string means "no user rc".
fn find_user_rc(explicit: Option<&str>, workspace: &str) -> Result<String, LauncherError> {
    if let Some(path) = explicit {
        let absolute = host::make_absolute(path);
        if !host::can_read(&absolute) {
            return Err(LauncherError::UnreadableRcFile { path: absolute });
        }
        return Ok(absolute);
    }

    if !workspace.is_empty() {
        let candidate = format!(
            "{}/{}",
            workspace.trim_end_matches('/'),
            workspace::RC_BASENAME
        );
        if host::can_read(&candidate) {
            return Ok(candidate);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let candidate = home
            .join(workspace::RC_BASENAME)
            .to_string_lossy()
            .into_owned();
        if host::can_read(&candidate) {
            return Ok(candidate);
        }
    }

    Ok(String::new())
}

// TODO: honor a FORGE_SYSTEM_RC override for the /etc candidate so tests can
// exercise the system slot hermetically.
