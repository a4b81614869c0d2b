//! Directory/file/missing classification for sync targets.

use std::path::Path;

use crate::remotes::Remote;

use super::command::CommandLine;

/// What a sync target turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Directory,
    File,
    /// Neither side has the object yet (or the probe could not tell).
    Missing,
}

/// Classifies sync targets, locally when possible and over SSH otherwise.
#[derive(Debug, Clone)]
pub struct Prober {
    /// SSH connection timeout in seconds.
    connect_timeout: u64,
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}

impl Prober {
    pub fn new() -> Self {
        Self {
            connect_timeout: 10,
        }
    }

    /// Set the SSH connection timeout.
    pub fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout = seconds;
        self
    }

    /// Classify the object at `local_path` / its mapped `dest_path`.
    ///
    /// A local path that exists answers the question directly. Otherwise the
    /// destination decides: a filesystem check for `file`/`local` remotes, a
    /// remote `test -d` for SSH remotes. A destination that exists nowhere is
    /// `Missing`, which callers treat with file semantics (parent directories
    /// get created as part of the plan).
    pub fn classify(&self, remote: &Remote, local_path: &str, dest_path: &str) -> Location {
        let local = Path::new(local_path);
        if local.exists() {
            return if local.is_dir() {
                Location::Directory
            } else {
                Location::File
            };
        }

        if remote.kind.is_local_fs() {
            let dest = Path::new(dest_path);
            if dest.is_dir() {
                Location::Directory
            } else if dest.exists() {
                Location::File
            } else {
                Location::Missing
            }
        } else {
            self.probe_ssh_dir(remote, dest_path)
        }
    }

    /// The `ssh … test -d` invocation used to probe an SSH remote.
    ///
    /// The trailing token is interpreted by the remote shell, so the path is
    /// quoted there; everything else is plain argv.
    pub fn ssh_probe_command(&self, remote: &Remote, dest_path: &str) -> CommandLine {
        let timeout = format!("ConnectTimeout={}", self.connect_timeout);
        let mut cmd = CommandLine::new("ssh").args([
            "-o",
            "BatchMode=yes",
            "-o",
            timeout.as_str(),
            "-o",
            "StrictHostKeyChecking=accept-new",
        ]);
        if let Some(port) = remote.effective_port() {
            cmd = cmd.arg("-p").arg(port.to_string());
        }
        cmd.arg("--")
            .arg(&remote.url)
            .arg(format!("test -d {}", shell_words::quote(dest_path)))
    }

    /// Run the remote directory test. Exit 0 means directory; anything else
    /// is treated as missing — a transport failure must not abort planning,
    /// it just downgrades to file semantics.
    fn probe_ssh_dir(&self, remote: &Remote, dest_path: &str) -> Location {
        let cmd = self.ssh_probe_command(remote, dest_path);
        tracing::debug!(command = %cmd, "probing remote directory");

        match cmd.to_command().output() {
            Ok(output) if output.status.success() => Location::Directory,
            Ok(output) => {
                // ssh itself reports 255; a clean `test -d` miss is 1.
                if output.status.code() == Some(255) {
                    tracing::warn!(
                        remote = %remote.name,
                        path = %dest_path,
                        stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                        "ssh probe failed, assuming destination is missing"
                    );
                }
                Location::Missing
            }
            Err(err) => {
                tracing::warn!(
                    remote = %remote.name,
                    error = %err,
                    "could not run ssh probe, assuming destination is missing"
                );
                Location::Missing
            }
        }
    }
}
