//! Remote records and the named-remote registry.
//!
//! The registry is stored as a JSON object keyed by remote name:
//!
//! ```json
//! {
//!     "laptop": {
//!         "type": "ssh",
//!         "url": "alice@laptop.local",
//!         "port": 2222,
//!         "paths": { "/home/alice": "" }
//!     },
//!     "backup": {
//!         "type": "file",
//!         "url": "localhost",
//!         "port": null,
//!         "paths": { "/home/alice": "/mnt/backup/alice" }
//!     }
//! }
//! ```
//!
//! `type` is a closed enumeration; a registry containing an unknown kind is
//! rejected when the document is parsed, not when the remote is used.
//! `local` survives as a legacy spelling of `file`.
//!
//! Besides stored records, [`RemoteRegistry::resolve`] synthesizes transient
//! remotes from endpoint-like names (`alice@host`, `ssh://host:2222`,
//! `file:///mnt/backup`), so one-off destinations need no prior
//! registration. Synthesized records are never written back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Errors from registry lookups and mutations.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("remote '{0}' is not defined")]
    NotDefined(String),

    #[error("source path '{path}' is not mapped on remote '{remote}'")]
    UnmappedPath { remote: String, path: String },

    #[error("invalid remote: {0}")]
    Validation(String),

    #[error("could not determine the home directory")]
    NoHomeDir,

    #[error("failed to resolve local path: {0}")]
    Path(#[from] std::io::Error),
}

/// Transport kind of a remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteKind {
    /// Reached over SSH; destinations render as `url:path`.
    Ssh,
    /// A directory tree on this machine; destinations are bare paths.
    File,
    /// Legacy spelling of `file`, kept so old registries still load.
    Local,
}

impl RemoteKind {
    /// True for remotes whose destination lives on the local filesystem.
    pub fn is_local_fs(self) -> bool {
        matches!(self, RemoteKind::File | RemoteKind::Local)
    }

    /// True for SSH-transported remotes.
    pub fn is_ssh(self) -> bool {
        matches!(self, RemoteKind::Ssh)
    }
}

impl std::fmt::Display for RemoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ssh => write!(f, "ssh"),
            Self::File => write!(f, "file"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// A named synchronization endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Remote {
    /// Registry key; not serialized (the enclosing map carries it).
    #[serde(skip)]
    pub name: String,

    /// Transport kind.
    #[serde(rename = "type")]
    pub kind: RemoteKind,

    /// Hostname or `user@host` for SSH remotes, `localhost` otherwise.
    pub url: String,

    /// SSH port; `None` means the default.
    #[serde(default)]
    pub port: Option<u16>,

    /// Local path prefix -> destination path prefix.
    ///
    /// Keys are unique by construction; matching order is derived at use
    /// (longest prefix first).
    #[serde(default)]
    pub paths: BTreeMap<String, String>,
}

impl Remote {
    /// Create an SSH remote with no path mappings.
    pub fn ssh(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RemoteKind::Ssh,
            url: url.into(),
            port: None,
            paths: BTreeMap::new(),
        }
    }

    /// Create a local directory-tree remote with no path mappings.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: RemoteKind::File,
            url: "localhost".into(),
            port: None,
            paths: BTreeMap::new(),
        }
    }

    /// Port to put on command lines, if any.
    ///
    /// 22 is the OpenSSH default, so an explicit 22 emits no flag either.
    pub fn effective_port(&self) -> Option<u16> {
        self.port.filter(|p| *p != 22)
    }

    /// Path mappings ordered for matching: longest prefix first, equal
    /// lengths lexicographic. Unique keys mean two distinct equal-length
    /// prefixes can never both match one path; the secondary order just
    /// keeps enumeration deterministic.
    pub fn sorted_paths(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .paths
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Validate a record. The registry calls this on load and after every
    /// mutation.
    pub fn validate(&self) -> Result<(), RemoteError> {
        if self.name.is_empty() {
            return Err(RemoteError::Validation("remote name cannot be empty".into()));
        }
        if self.name.contains('/') || self.name.contains('\\') {
            return Err(RemoteError::Validation(format!(
                "remote name '{}' cannot contain path separators",
                self.name
            )));
        }
        if self.url.is_empty() {
            return Err(RemoteError::Validation(format!(
                "remote '{}' has an empty url",
                self.name
            )));
        }
        if self.paths.keys().any(|k| k.is_empty()) {
            return Err(RemoteError::Validation(format!(
                "remote '{}' has an empty path-mapping prefix",
                self.name
            )));
        }
        Ok(())
    }

    /// Build a transient remote from an endpoint-like name, if it is one.
    ///
    /// Recognized shapes: `user@host`, `ssh://host[:port]`, and
    /// `file://<path>`. The default mapping roots the caller's home
    /// directory at the remote home (`""` for SSH; the given directory for
    /// `file://`).
    pub fn synthesize(spec: &str) -> Result<Option<Remote>, RemoteError> {
        if let Some(rest) = spec.strip_prefix("file://") {
            if rest.is_empty() {
                return Ok(None);
            }
            let mut remote = Remote::file(spec);
            remote
                .paths
                .insert(home_dir_string()?, paths::absolutize(rest)?);
            return Ok(Some(remote));
        }

        let (url, port) = match spec.strip_prefix("ssh://") {
            Some(rest) if !rest.is_empty() => match rest.rsplit_once(':') {
                Some((host, port)) if !host.is_empty() => match port.parse::<u16>() {
                    Ok(port) => (host.to_string(), Some(port)),
                    Err(_) => (rest.to_string(), None),
                },
                _ => (rest.to_string(), None),
            },
            Some(_) => return Ok(None),
            None if spec.contains('@') => (spec.to_string(), None),
            None => return Ok(None),
        };

        let mut remote = Remote::ssh(spec, url);
        remote.port = port;
        remote.paths.insert(home_dir_string()?, String::new());
        Ok(Some(remote))
    }
}

fn home_dir_string() -> Result<String, RemoteError> {
    dirs::home_dir()
        .map(|p| p.to_string_lossy().into_owned())
        .ok_or(RemoteError::NoHomeDir)
}

/// Keyed collection of [`Remote`] records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteRegistry {
    remotes: BTreeMap<String, Remote>,
}

impl RemoteRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy each map key into its record's `name` field. Must run after
    /// deserialization, before validation.
    pub fn hydrate(&mut self) {
        for (name, remote) in &mut self.remotes {
            remote.name = name.clone();
        }
    }

    /// Validate every record.
    pub fn validate(&self) -> Result<(), RemoteError> {
        for remote in self.remotes.values() {
            remote.validate()?;
        }
        Ok(())
    }

    /// Look up a stored remote.
    pub fn get(&self, name: &str) -> Option<&Remote> {
        self.remotes.get(name)
    }

    /// Resolve a name to a remote record: a stored one, or a transient
    /// record synthesized from an endpoint-like name.
    pub fn resolve(&self, name: &str) -> Result<Remote, RemoteError> {
        if let Some(remote) = self.remotes.get(name) {
            return Ok(remote.clone());
        }
        if let Some(remote) = Remote::synthesize(name)? {
            tracing::debug!(remote = %name, kind = %remote.kind, "synthesized transient remote");
            return Ok(remote);
        }
        Err(RemoteError::NotDefined(name.to_string()))
    }

    /// Insert a fully-formed record, keyed by its name. Replaces any
    /// existing remote with the same name.
    pub fn insert(&mut self, remote: Remote) -> Result<(), RemoteError> {
        remote.validate()?;
        self.remotes.insert(remote.name.clone(), remote);
        Ok(())
    }

    /// Register (or replace) a remote from a URL, the way `sy-remote add`
    /// does: a URL containing `@` becomes an SSH remote whose home maps to
    /// the remote home; anything else becomes a `file` alias rooted at that
    /// directory.
    pub fn add(&mut self, name: &str, url: &str, port: Option<u16>) -> Result<(), RemoteError> {
        let home = home_dir_string()?;
        let remote = if url.contains('@') {
            let mut remote = Remote::ssh(name, url);
            remote.port = port;
            remote.paths.insert(home, String::new());
            remote
        } else {
            let mut remote = Remote::file(name);
            remote.paths.insert(home, paths::absolutize(url)?);
            remote
        };
        self.insert(remote)
    }

    /// Delete a remote. Errors if the name is unknown.
    pub fn remove(&mut self, name: &str) -> Result<Remote, RemoteError> {
        self.remotes
            .remove(name)
            .ok_or_else(|| RemoteError::NotDefined(name.to_string()))
    }

    /// Add (or update) one path mapping on a stored remote.
    pub fn add_path(&mut self, name: &str, source: &str, dest: &str) -> Result<(), RemoteError> {
        if source.is_empty() {
            return Err(RemoteError::Validation(
                "source prefix cannot be empty".into(),
            ));
        }
        let remote = self
            .remotes
            .get_mut(name)
            .ok_or_else(|| RemoteError::NotDefined(name.to_string()))?;
        remote.paths.insert(source.to_string(), dest.to_string());
        Ok(())
    }

    /// Remove one path mapping from a stored remote.
    pub fn remove_path(&mut self, name: &str, source: &str) -> Result<(), RemoteError> {
        let remote = self
            .remotes
            .get_mut(name)
            .ok_or_else(|| RemoteError::NotDefined(name.to_string()))?;
        if remote.paths.remove(source).is_none() {
            return Err(RemoteError::UnmappedPath {
                remote: name.to_string(),
                path: source.to_string(),
            });
        }
        Ok(())
    }

    /// Iterate stored remotes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Remote)> {
        self.remotes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(name: &str, remote: Remote) -> RemoteRegistry {
        let mut registry = RemoteRegistry::new();
        registry.remotes.insert(name.to_string(), remote);
        registry.hydrate();
        registry
    }

    #[test]
    fn test_resolve_stored_remote() {
        let registry = registry_with("laptop", Remote::ssh("laptop", "alice@laptop.local"));
        let remote = registry.resolve("laptop").unwrap();
        assert_eq!(remote.name, "laptop");
        assert!(remote.kind.is_ssh());
    }

    #[test]
    fn test_resolve_unknown_name_fails() {
        let registry = RemoteRegistry::new();
        let err = registry.resolve("nas").unwrap_err();
        assert!(matches!(err, RemoteError::NotDefined(_)));
        assert_eq!(err.to_string(), "remote 'nas' is not defined");
    }

    #[test]
    fn test_synthesize_user_at_host() {
        let remote = Remote::synthesize("alice@backup.example.com")
            .unwrap()
            .expect("endpoint-like name");
        assert_eq!(remote.name, "alice@backup.example.com");
        assert_eq!(remote.url, "alice@backup.example.com");
        assert!(remote.kind.is_ssh());
        assert_eq!(remote.port, None);
        // Home maps to the remote home.
        let home = dirs::home_dir().unwrap().to_string_lossy().into_owned();
        assert_eq!(remote.paths.get(&home).map(String::as_str), Some(""));
    }

    #[test]
    fn test_synthesize_ssh_scheme_with_port() {
        let remote = Remote::synthesize("ssh://alice@host:2222")
            .unwrap()
            .expect("scheme name");
        assert_eq!(remote.url, "alice@host");
        assert_eq!(remote.port, Some(2222));
        assert_eq!(remote.name, "ssh://alice@host:2222");
    }

    #[test]
    fn test_synthesize_ssh_scheme_without_port() {
        let remote = Remote::synthesize("ssh://host").unwrap().expect("scheme");
        assert_eq!(remote.url, "host");
        assert_eq!(remote.port, None);
    }

    #[test]
    fn test_synthesize_file_scheme() {
        let tmp = tempfile::tempdir().unwrap();
        let spec = format!("file://{}", tmp.path().display());
        let remote = Remote::synthesize(&spec).unwrap().expect("file scheme");
        assert!(remote.kind.is_local_fs());
        assert_eq!(remote.url, "localhost");
        let home = dirs::home_dir().unwrap().to_string_lossy().into_owned();
        let mapped = remote.paths.get(&home).unwrap();
        assert_eq!(mapped, &tmp.path().canonicalize().unwrap().to_string_lossy());
    }

    #[test]
    fn test_synthesize_plain_name_is_none() {
        assert!(Remote::synthesize("laptop").unwrap().is_none());
        assert!(Remote::synthesize("ssh://").unwrap().is_none());
        assert!(Remote::synthesize("file://").unwrap().is_none());
    }

    #[test]
    fn test_add_dispatches_on_url_shape() {
        let tmp = tempfile::tempdir().unwrap();
        let mut registry = RemoteRegistry::new();

        registry.add("laptop", "alice@laptop.local", Some(2222)).unwrap();
        let laptop = registry.get("laptop").unwrap();
        assert!(laptop.kind.is_ssh());
        assert_eq!(laptop.url, "alice@laptop.local");
        assert_eq!(laptop.port, Some(2222));

        registry
            .add("backup", tmp.path().to_str().unwrap(), None)
            .unwrap();
        let backup = registry.get("backup").unwrap();
        assert!(backup.kind.is_local_fs());
        assert_eq!(backup.url, "localhost");
        assert_eq!(backup.port, None);
    }

    #[test]
    fn test_remove_unknown_remote_fails() {
        let mut registry = RemoteRegistry::new();
        assert!(matches!(
            registry.remove("gone"),
            Err(RemoteError::NotDefined(_))
        ));
    }

    #[test]
    fn test_path_mapping_mutations() {
        let mut registry = registry_with("laptop", Remote::ssh("laptop", "alice@laptop.local"));

        registry.add_path("laptop", "/home/alice", "").unwrap();
        registry
            .add_path("laptop", "/home/alice/work", "/srv/work")
            .unwrap();
        assert_eq!(registry.get("laptop").unwrap().paths.len(), 2);

        // Updating an existing prefix keeps keys unique.
        registry
            .add_path("laptop", "/home/alice/work", "/srv/work2")
            .unwrap();
        assert_eq!(registry.get("laptop").unwrap().paths.len(), 2);

        registry.remove_path("laptop", "/home/alice/work").unwrap();
        let err = registry.remove_path("laptop", "/home/alice/work").unwrap_err();
        assert!(matches!(err, RemoteError::UnmappedPath { .. }));
        assert!(err.to_string().contains("/home/alice/work"));
    }

    #[test]
    fn test_add_path_on_unknown_remote_fails() {
        let mut registry = RemoteRegistry::new();
        assert!(matches!(
            registry.add_path("nas", "/a", "/b"),
            Err(RemoteError::NotDefined(_))
        ));
    }

    #[test]
    fn test_sorted_paths_longest_first_then_lexicographic() {
        let mut remote = Remote::ssh("laptop", "alice@laptop.local");
        remote.paths.insert("/home/u".into(), "/r".into());
        remote.paths.insert("/home/u/proj".into(), "/rp".into());
        remote.paths.insert("/data/b".into(), "/db".into());
        remote.paths.insert("/data/a".into(), "/da".into());

        let order: Vec<&str> = remote.sorted_paths().iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec!["/home/u/proj", "/data/a", "/data/b", "/home/u"]);
    }

    #[test]
    fn test_effective_port_treats_22_as_default() {
        let mut remote = Remote::ssh("laptop", "alice@laptop.local");
        assert_eq!(remote.effective_port(), None);
        remote.port = Some(22);
        assert_eq!(remote.effective_port(), None);
        remote.port = Some(2222);
        assert_eq!(remote.effective_port(), Some(2222));
    }

    #[test]
    fn test_registry_json_roundtrip_keyed_by_name() {
        let mut registry = registry_with("laptop", Remote::ssh("laptop", "alice@laptop.local"));
        registry.add_path("laptop", "/home/alice", "").unwrap();

        let json = serde_json::to_string_pretty(&registry).unwrap();
        // The record itself carries no name; the map key does.
        assert!(json.contains("\"laptop\""));
        assert!(!json.contains("\"name\""));
        assert!(json.contains("\"type\": \"ssh\""));

        let mut back: RemoteRegistry = serde_json::from_str(&json).unwrap();
        back.hydrate();
        back.validate().unwrap();
        assert_eq!(back.get("laptop").unwrap().name, "laptop");
        assert_eq!(back.get("laptop").unwrap().paths.len(), 1);
    }

    #[test]
    fn test_legacy_local_kind_still_loads() {
        let json = r#"{
            "old": { "type": "local", "url": "localhost", "port": null,
                     "paths": { "/home/alice": "/mnt/old" } }
        }"#;
        let mut registry: RemoteRegistry = serde_json::from_str(json).unwrap();
        registry.hydrate();
        registry.validate().unwrap();
        let old = registry.get("old").unwrap();
        assert_eq!(old.kind, RemoteKind::Local);
        assert!(old.kind.is_local_fs());
    }

    #[test]
    fn test_unknown_kind_rejected_at_load() {
        let json = r#"{ "bad": { "type": "carrier-pigeon", "url": "x", "paths": {} } }"#;
        assert!(serde_json::from_str::<RemoteRegistry>(json).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_records() {
        let mut remote = Remote::ssh("a/b", "alice@host");
        assert!(remote.validate().is_err());
        remote.name = "ok".into();
        remote.url = String::new();
        assert!(remote.validate().is_err());
        remote.url = "alice@host".into();
        remote.paths.insert(String::new(), "/x".into());
        assert!(remote.validate().is_err());
    }
}
