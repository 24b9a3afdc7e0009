//! Workspace layout.
//!
//! Fixed names and discovery rules for the places rc files live: the
//! workspace sentinel, the user rc basename, and the master rc candidates.

use crate::host;
use std::env;
use std::path::Path;

/// File marking the root directory of a forge workspace.
pub const WORKSPACE_SENTINEL: &str = ".forgeroot";

/// Basename of a user rc file, looked up workspace-relative then
/// home-relative.
pub const RC_BASENAME: &str = ".forgerc";

/// Basename of a master rc file (workspace `tools/`, launcher-adjacent, or
/// system-wide).
pub const MASTER_RC_BASENAME: &str = "forge.rc";

/// Walk up from `start` to the first directory containing the workspace
/// sentinel. Returns the empty string when no workspace encloses `start`.
pub fn find_workspace(start: &Path) -> String {
    let mut dir = Some(start);
    while let Some(d) = dir {
        if d.join(WORKSPACE_SENTINEL).is_file() {
            return d.to_string_lossy().into_owned();
        }
        dir = d.parent();
    }
    String::new()
}

/// Candidate master rc paths in precedence order: the workspace `tools/`
/// copy, the copy next to the launcher binary, then the system-wide copy.
/// Unreadable candidates are dropped here; the caller only dedups.
pub fn candidate_master_rc_paths(workspace: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    if !workspace.is_empty() {
        candidates.push(
            Path::new(workspace)
                .join("tools")
                .join(MASTER_RC_BASENAME)
                .to_string_lossy()
                .into_owned(),
        );
    }
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            candidates.push(dir.join(MASTER_RC_BASENAME).to_string_lossy().into_owned());
        }
    }
    #[cfg(unix)]
    candidates.push(format!("/etc/{}", MASTER_RC_BASENAME));

    candidates.retain(|path| host::can_read(path));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_find_workspace_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(WORKSPACE_SENTINEL), "").unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_workspace(&nested),
            dir.path().to_string_lossy().into_owned()
        );
    }

    #[test]
    fn test_find_workspace_without_sentinel_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_workspace(dir.path()), "");
    }

    #[test]
    fn test_workspace_master_candidate_requires_readable_file() {
        let dir = TempDir::new().unwrap();
        let workspace = dir.path().to_string_lossy().into_owned();

        // No tools/forge.rc yet: the workspace candidate is dropped.
        let before = candidate_master_rc_paths(&workspace);
        assert!(!before.iter().any(|p| p.starts_with(&workspace)));

        let tools = dir.path().join("tools");
        fs::create_dir_all(&tools).unwrap();
        fs::write(tools.join(MASTER_RC_BASENAME), "build --jobs 2\n").unwrap();

        let after = candidate_master_rc_paths(&workspace);
        assert!(after.iter().any(|p| p.starts_with(&workspace)));
        // The workspace copy has the highest precedence.
        assert!(after[0].starts_with(&workspace));
    }
}
