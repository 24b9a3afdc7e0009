//! Path utilities bridging the launcher and the downstream consumer.

use std::env;
use std::fs;
use std::path::Path;

/// True when `path` names an existing regular file this process can open
/// for reading.
pub fn can_read(path: &str) -> bool {
    Path::new(path).is_file() && fs::File::open(path).is_ok()
}

/// Absolute form of `path`, resolved against the current working directory
/// when relative. The path is not canonicalized: symlinks and `..` segments
/// are preserved, so the string matches what the user wrote.
pub fn make_absolute(path: &str) -> String {
    let p = Path::new(path);
    if p.is_absolute() {
        path.to_string()
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(p).to_string_lossy().into_owned())
            .unwrap_or_else(|_| path.to_string())
    }
}

/// Convert a single path to the form the downstream dispatcher expects.
///
/// On unix this is the identity. On windows, backslashes are normalized to
/// forward slashes. The dispatcher compares these strings literally, so the
/// unix behavior must stay bit-for-bit stable.
pub fn convert_path(path: &str) -> String {
    if cfg!(windows) {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}

/// Convert a path-list value (e.g. `$PATH`), normalizing each element while
/// keeping the platform's list separator.
///
/// A single windows path like `c:/foo` is also a valid unix path list
/// (`["c", "/foo"]`), which is why single-path values must go through
/// [`convert_path`] instead.
pub fn convert_path_list(paths: &str) -> String {
    let separator = if cfg!(windows) { ';' } else { ':' };
    paths
        .split(separator)
        .map(convert_path)
        .collect::<Vec<_>>()
        .join(&separator.to_string())
}
