//! Local path helpers shared by the remote registry and the planner.

use std::env;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` against the current user's home directory.
pub fn expand_tilde(path: &str) -> String {
    let home = dirs::home_dir().map(|p| p.to_string_lossy().into_owned());
    expand_tilde_with_home(path, home.as_deref())
}

/// Expand a leading `~` using the provided home directory.
///
/// If `home` is None, returns the path unchanged. `~user` forms are not
/// supported and pass through untouched.
pub fn expand_tilde_with_home(path: &str, home: Option<&str>) -> String {
    if !path.starts_with('~') {
        return path.to_string();
    }

    let Some(home) = home else {
        return path.to_string();
    };

    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{}", home, rest)
    } else {
        path.to_string()
    }
}

/// Resolve a user-supplied path to an absolute, normalized string.
///
/// Tilde-expands first, then canonicalizes so symlinked working copies land
/// on the real prefixes stored in remote records. A path that does not exist
/// yet is still a legitimate sync target, so it is normalized lexically
/// against the current directory instead of failing.
pub fn absolutize(path: &str) -> io::Result<String> {
    let expanded = expand_tilde(path);
    let candidate = PathBuf::from(&expanded);

    let resolved = match std::fs::canonicalize(&candidate) {
        Ok(real) => real,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let base = if candidate.is_absolute() {
                candidate
            } else {
                env::current_dir()?.join(candidate)
            };
            normalize_lexically(&base)
        }
        Err(err) => return Err(err),
    };

    Ok(resolved.to_string_lossy().into_owned())
}

/// Collapse `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
