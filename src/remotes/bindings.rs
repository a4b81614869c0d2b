//! Last-used-remote cache keyed by absolute local path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which remote each local path was last planned against.
///
/// Stored as a flat JSON object (`{"/home/alice/notes": "laptop"}`).
/// Recorded as a side effect of planning, whether or not the plan is
/// executed, so a later `sy <path>` without a remote name reuses the
/// previous destination. Entries are never removed automatically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryBindings {
    bindings: BTreeMap<String, String>,
}

impl DirectoryBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remote name last used for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.bindings.get(path).map(String::as_str)
    }

    /// Record `remote` as the destination for `path`, replacing any
    /// previous entry.
    pub fn record(&mut self, path: &str, remote: &str) {
        self.bindings
            .insert(path.to_string(), remote.to_string());
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, r)| (p.as_str(), r.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
