//! Longest-prefix translation of local paths to destination paths.

use crate::remotes::Remote;

use super::PlanError;

/// Resolve the destination path for `local_path` on `remote`.
///
/// Mappings are scanned longest prefix first (equal lengths lexicographic,
/// which keeps the scan deterministic; unique keys mean two distinct
/// equal-length prefixes can never both match). The first key that is a
/// string prefix of `local_path` wins; the destination is the mapped value
/// joined with the rest of the path. The remainder keeps its own shape — it
/// is never re-rooted, so a mapped value of `""` (an SSH remote's home)
/// yields a home-relative destination.
pub fn resolve_destination(remote: &Remote, local_path: &str) -> Result<String, PlanError> {
    for (prefix, replacement) in remote.sorted_paths() {
        if !local_path.starts_with(prefix) {
            continue;
        }

        let remainder = local_path[prefix.len()..].trim_start_matches('/');
        let dest = if remainder.is_empty() {
            replacement.to_string()
        } else if replacement.is_empty() {
            remainder.to_string()
        } else if replacement.ends_with('/') {
            format!("{replacement}{remainder}")
        } else {
            format!("{replacement}/{remainder}")
        };

        tracing::debug!(
            path = %local_path,
            prefix = %prefix,
            dest = %dest,
            "resolved destination"
        );
        return Ok(dest);
    }

    Err(PlanError::NoMappingRule {
        remote: remote.name.clone(),
        path: local_path.to_string(),
    })
}
