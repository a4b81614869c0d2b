//! Assembly of sync plans from a classified target and run-mode options.

use crate::remotes::{DirectoryBindings, Remote};

use super::command::CommandLine;
use super::mapper;
use super::probe::{Location, Prober};
use super::PlanError;

/// How the directory-sync tool resolves changes made on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ResolveMode {
    /// Keep the local side's version of a conflicting change.
    Local,
    /// Keep the remote side's version.
    Remote,
    /// Let the tool ask about each conflict.
    #[default]
    Prompt,
}

impl std::fmt::Display for ResolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
            Self::Prompt => write!(f, "prompt"),
        }
    }
}

/// Run-mode options that shape a plan's command vectors.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Preview only; every emitted command is non-mutating.
    pub dry_run: bool,
    /// Verbose flags on the file-copy passes.
    pub verbose: bool,
    /// Let the directory-sync tool prompt instead of auto-confirming.
    pub interactive: bool,
    /// Conflict resolution for directory syncs.
    pub resolve: ResolveMode,
    /// Propagate deletions when syncing directories.
    pub mirror: bool,
}

/// What one planned command does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Idempotent `mkdir -p` for the destination's parent directory.
    EnsureDestDir,
    /// One bidirectional `bsync` invocation.
    DirectorySync,
    /// Timestamp-gated copy, local to destination.
    PushFile,
    /// Timestamp-gated copy, destination to local.
    PullFile,
}

/// One step of a plan: a command vector and what it is for.
#[derive(Debug, Clone)]
pub struct Action {
    pub kind: ActionKind,
    pub command: CommandLine,
}

/// An ordered, ready-to-execute synchronization plan for one local path.
///
/// Order is significant: actions run strictly in sequence, and for single
/// files the push pass must land before the pull pass reads timestamps.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    /// Absolute local path being synchronized.
    pub local_path: String,
    /// Destination as handed to the tools (`url:path` or a bare path).
    pub destination: String,
    /// How the target was classified.
    pub location: Location,
    /// Descriptive lines printed before the commands run.
    pub headers: Vec<String>,
    /// Commands in execution order.
    pub actions: Vec<Action>,
}

/// Turns "sync this path with that remote" into a [`SyncPlan`].
#[derive(Debug, Clone, Default)]
pub struct PlanBuilder {
    options: SyncOptions,
    prober: Prober,
}

impl PlanBuilder {
    pub fn new(options: SyncOptions) -> Self {
        Self {
            options,
            prober: Prober::new(),
        }
    }

    /// Replace the location prober (timeout tuning).
    pub fn with_prober(mut self, prober: Prober) -> Self {
        self.prober = prober;
        self
    }

    /// Build the plan for `local_path` against `remote`.
    ///
    /// Also records the directory binding for `local_path`, whether or not
    /// the plan is ever executed; dry runs and show-plan runs remember their
    /// destination too.
    pub fn plan(
        &self,
        local_path: &str,
        remote: &Remote,
        bindings: &mut DirectoryBindings,
    ) -> Result<SyncPlan, PlanError> {
        let dest_path = mapper::resolve_destination(remote, local_path)?;

        bindings.record(local_path, &remote.name);

        let dest_arg = if remote.kind.is_ssh() {
            format!("{}:{}", remote.url, dest_path)
        } else {
            dest_path.clone()
        };

        let location = self.prober.classify(remote, local_path, &dest_path);

        let mut headers = vec![format!("# SYNC LOCAL      {local_path}")];
        if remote.kind.is_ssh() {
            headers.push(format!("# WITH REMOTE     {dest_arg}"));
        } else {
            headers.push(format!("# WITH LOCAL      {dest_arg}"));
        }

        let actions = match location {
            Location::Directory => vec![self.directory_action(remote, local_path, &dest_arg)],
            Location::File | Location::Missing => {
                self.file_actions(remote, local_path, &dest_path, &dest_arg)
            }
        };

        tracing::debug!(
            path = %local_path,
            remote = %remote.name,
            location = ?location,
            actions = actions.len(),
            "assembled sync plan"
        );

        Ok(SyncPlan {
            local_path: local_path.to_string(),
            destination: dest_arg,
            location,
            headers,
            actions,
        })
    }

    /// One `bsync` invocation covers the whole directory tree.
    fn directory_action(&self, remote: &Remote, local_path: &str, dest_arg: &str) -> Action {
        let mut cmd = CommandLine::new("bsync").arg("-d");

        if self.options.dry_run {
            cmd = cmd.arg("-n");
        } else if self.options.interactive {
            // No auto flag; the tool prompts for every change.
        } else {
            cmd = cmd.arg("-b");
        }

        match self.options.resolve {
            ResolveMode::Local => cmd = cmd.args(["--prefer", "local"]),
            ResolveMode::Remote => cmd = cmd.args(["--prefer", "remote"]),
            ResolveMode::Prompt => {}
        }

        if self.options.mirror {
            cmd = cmd.arg("--mirror");
        }

        if remote.kind.is_ssh()
            && let Some(port) = remote.effective_port()
        {
            cmd = cmd.arg("-p").arg(port.to_string());
        }

        Action {
            kind: ActionKind::DirectorySync,
            command: cmd.arg(local_path).arg(dest_arg),
        }
    }

    /// Two rsync passes synchronize a single file.
    ///
    /// Push then pull, both `-ptu` (keep permissions and mtimes, update only
    /// if newer): a one-shot bidirectional sync could erase a file that
    /// exists on only one side, but update-if-newer in both directions never
    /// deletes, so whichever side is most recent wins.
    fn file_actions(
        &self,
        remote: &Remote,
        local_path: &str,
        dest_path: &str,
        dest_arg: &str,
    ) -> Vec<Action> {
        let mut actions = Vec::new();

        let mut common = CommandLine::new("rsync").arg("-ptu");
        if self.options.verbose {
            common = common.arg("-v");
        }
        if self.options.dry_run {
            common = common.arg("-n");
        }

        let dest_dir = dest_parent(dest_path);

        if remote.kind.is_ssh() {
            let transport = match remote.effective_port() {
                Some(port) => format!("ssh -p {port}"),
                None => "ssh".to_string(),
            };
            common = common.arg("-e").arg(transport);

            // Remote parent creation rides along with the rsync invocation;
            // there is no separate remote-side step. Skipped in dry runs so
            // the printed plan stays non-mutating.
            if !self.options.dry_run
                && let Some(dir) = dest_dir
            {
                common = common
                    .arg("--rsync-path")
                    .arg(format!("mkdir -p {}; rsync", shell_words::quote(dir)));
            }
        } else if !self.options.dry_run
            && let Some(dir) = dest_dir
        {
            actions.push(Action {
                kind: ActionKind::EnsureDestDir,
                command: CommandLine::new("mkdir").arg("-p").arg(dir),
            });
        }

        actions.push(Action {
            kind: ActionKind::PushFile,
            command: common.clone().arg(local_path).arg(dest_arg),
        });
        actions.push(Action {
            kind: ActionKind::PullFile,
            command: common.arg(dest_arg).arg(local_path),
        });

        actions
    }
}

/// Parent directory of a destination path, if it has one worth creating.
///
/// A bare filename resolves against the remote home (ssh) or the working
/// directory, and a file directly under the root needs no `mkdir`; both
/// return `None`.
fn dest_parent(path: &str) -> Option<&str> {
    match path.rsplit_once('/') {
        Some(("", _)) | None => None,
        Some((dir, _)) => Some(dir),
    }
}
