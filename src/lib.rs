//! Synchronization planner for `sy`.
//!
//! `sy` keeps directories and single files in step with named remotes —
//! SSH hosts or local directory trees — by planning invocations of external
//! tools rather than transferring anything itself: one `bsync` run for a
//! directory, or a push/pull pair of `rsync` copies for a single file.
//!
//! # Safety
//!
//! **IMPORTANT**: single-file plans are two-pass and update-if-newer in both
//! directions (`rsync -ptu`), never deleting. A one-shot bidirectional sync
//! of a single file could erase it when it exists on only one side; push
//! followed by pull cannot.
//!
//! # Architecture
//!
//! - **config**: typed store for the JSON config documents
//! - **remotes**: remote records, registry lookup/synthesis, directory bindings
//! - **plan**: path remapping, location probing, command-plan assembly
//! - **exec**: ordered, blocking execution of a plan's command vectors
//! - **cli** / **commands**: clap argument trees and the two binaries' flows
//!
//! # Example
//!
//! ```rust,ignore
//! use sy::plan::{PlanBuilder, SyncOptions};
//!
//! let remote = registry.resolve("laptop")?;
//! let plan = PlanBuilder::new(SyncOptions::default())
//!     .plan("/home/alice/notes", &remote, &mut bindings)?;
//! for action in &plan.actions {
//!     println!("{}", action.command);
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod exec;
pub mod ignore;
pub mod paths;
pub mod plan;
pub mod remotes;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber for a binary entrypoint.
///
/// Diagnostics go to stderr so plan text on stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .init();
}
