//! Argument trees for the `sy` and `sy-remote` binaries.

use clap::{Parser, Subcommand};

use crate::plan::{ResolveMode, SyncOptions};

/// sy - plan and run file synchronization against named remotes
#[derive(Parser, Debug)]
#[command(name = "sy")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Remotes and path mappings are managed with 'sy-remote'.")]
pub struct SyArgs {
    /// Files or directories to synchronize (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<String>,

    /// Remote to sync with; omitted, each path reuses its last destination
    #[arg(short, long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Override the remote's SSH port for this invocation
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Preview only; every planned command is non-mutating
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the planned commands and exit without running them
    #[arg(long)]
    pub show_plan: bool,

    /// Print commands as they run and pass -v to the file-copy passes
    #[arg(short, long)]
    pub verbose: bool,

    /// Let the directory-sync tool prompt for each change
    #[arg(short, long)]
    pub interactive: bool,

    /// How directory syncs resolve changes made on both sides
    #[arg(long, value_enum, value_name = "SIDE", conflicts_with_all = ["prefer_local", "prefer_remote"])]
    pub resolve: Option<ResolveMode>,

    /// Shorthand for --resolve local
    #[arg(long, conflicts_with = "prefer_remote")]
    pub prefer_local: bool,

    /// Shorthand for --resolve remote
    #[arg(long)]
    pub prefer_remote: bool,

    /// Propagate deletions when syncing directories
    #[arg(long)]
    pub mirror: bool,

    /// List remembered path-to-remote bindings and exit
    #[arg(short, long)]
    pub list: bool,
}

impl SyArgs {
    /// Effective conflict resolution, folding the shorthand flags in.
    pub fn resolve_mode(&self) -> ResolveMode {
        if self.prefer_local {
            ResolveMode::Local
        } else if self.prefer_remote {
            ResolveMode::Remote
        } else {
            self.resolve.unwrap_or_default()
        }
    }

    /// Planner options for this invocation.
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            dry_run: self.dry_run,
            verbose: self.verbose,
            interactive: self.interactive,
            resolve: self.resolve_mode(),
            mirror: self.mirror,
        }
    }
}

/// sy-remote - manage the remotes `sy` syncs with
#[derive(Parser, Debug)]
#[command(name = "sy-remote")]
#[command(author, version, about, long_about = None)]
pub struct SyRemoteArgs {
    #[command(subcommand)]
    pub command: RemoteCommand,
}

#[derive(Subcommand, Debug)]
pub enum RemoteCommand {
    /// Register a remote (a URL containing '@' becomes SSH; anything else a
    /// local directory alias)
    Add {
        /// Name to register the remote under
        name: String,

        /// SSH endpoint (user@host) or a local directory
        url: String,

        /// SSH port to connect on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print one remote, or the whole registry, as JSON
    View {
        /// Remote to show; omitted, the whole registry is printed
        name: Option<String>,
    },

    /// List remotes with their path mappings
    List,

    /// Open the registry in $EDITOR; the result is validated before it is
    /// saved
    Edit,

    /// Delete a remote
    Remove {
        /// Remote to delete
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Manage a remote's path mappings
    #[command(subcommand)]
    Path(PathCommand),

    /// Open the ignore-pattern list in $EDITOR
    Ignore,
}

#[derive(Subcommand, Debug)]
pub enum PathCommand {
    /// Map a local path prefix onto a destination prefix
    Add {
        /// Remote to add the mapping to
        name: String,

        /// Local path prefix
        source: String,

        /// Destination prefix ('' means the remote home)
        dest: String,
    },

    /// Show a remote's mappings, longest prefix first
    List {
        /// Remote to show
        name: String,
    },

    /// Remove a mapping by its local prefix
    Remove {
        /// Remote to remove the mapping from
        name: String,

        /// Local path prefix of the mapping
        source: String,
    },
}
