//! On-disk configuration stores.
//!
//! Everything lives under one directory, `$XDG_CONFIG_HOME/sy` (falling
//! back to the platform config dir):
//!
//! - `remotes.json`     — named remote records ([`RemoteRegistry`])
//! - `directories.json` — last-used remote per local path ([`DirectoryBindings`])
//! - `ignore`           — glob patterns read by the directory-sync tool
//!
//! Stores are whole-document JSON: loaded once per invocation, mutated in
//! memory, and written back through a temp file and rename so a crash never
//! leaves a truncated store behind.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::remotes::{DirectoryBindings, RemoteError, RemoteRegistry};

/// Errors that can occur when loading or saving the configuration stores.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not determine config directory")]
    NoConfigDir,

    #[error(transparent)]
    Invalid(#[from] RemoteError),
}

/// Owns the config directory and the load/save lifecycle of the stores
/// inside it. The planning core never touches these files itself; it takes
/// the loaded records as arguments and hands mutated ones back.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the default config directory.
    ///
    /// Respects `$XDG_CONFIG_HOME` first (important for testing and Linux
    /// users), then falls back to the platform config dir, e.g.
    /// `~/.config/sy` on Linux.
    pub fn open_default() -> Result<Self, ConfigError> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(Self::with_root(PathBuf::from(xdg_config).join("sy")));
        }

        dirs::config_dir()
            .map(|p| Self::with_root(p.join("sy")))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Store rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn remotes_path(&self) -> PathBuf {
        self.root.join("remotes.json")
    }

    pub fn bindings_path(&self) -> PathBuf {
        self.root.join("directories.json")
    }

    pub fn ignore_path(&self) -> PathBuf {
        self.root.join("ignore")
    }

    /// Load the remote registry. A missing file is an empty registry.
    ///
    /// Hydration copies each record's map key into its `name` field;
    /// validation rejects inconsistent records (and, via serde, unknown
    /// remote kinds) at load time rather than at use time.
    pub fn load_remotes(&self) -> Result<RemoteRegistry, ConfigError> {
        let path = self.remotes_path();
        if !path.exists() {
            return Ok(RemoteRegistry::new());
        }

        let content = std::fs::read_to_string(&path)?;
        let mut registry: RemoteRegistry = serde_json::from_str(&content)?;
        registry.hydrate();
        registry.validate()?;
        Ok(registry)
    }

    pub fn save_remotes(&self, registry: &RemoteRegistry) -> Result<(), ConfigError> {
        self.write_document(&self.remotes_path(), registry)
    }

    /// Load the directory-binding cache. A missing file is an empty cache.
    pub fn load_bindings(&self) -> Result<DirectoryBindings, ConfigError> {
        let path = self.bindings_path();
        if !path.exists() {
            return Ok(DirectoryBindings::new());
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_bindings(&self, bindings: &DirectoryBindings) -> Result<(), ConfigError> {
        self.write_document(&self.bindings_path(), bindings)
    }

    fn write_document<T: serde::Serialize>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.root)?;

        let content = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;

        tracing::debug!(path = %path.display(), "wrote config document");
        Ok(())
    }
}
