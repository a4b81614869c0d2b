//! Sync planning: destination mapping, location probing, plan assembly.
//!
//! Planning turns "sync path P with remote R" into an ordered list of
//! command vectors without running anything. Execution is a separate
//! concern (see [`crate::exec`]).
//!
//! # Architecture
//!
//! - **command**: typed argv vector with display-only shell quoting
//! - **mapper**: longest-prefix translation of local paths to destinations
//! - **probe**: directory/file/missing classification, locally or over SSH
//! - **builder**: the decision logic that assembles the plan
//!
//! # Usage
//!
//! ```rust,ignore
//! use sy::plan::{PlanBuilder, SyncOptions};
//!
//! let builder = PlanBuilder::new(SyncOptions::default());
//! let plan = builder.plan("/home/alice/notes", &remote, &mut bindings)?;
//!
//! for line in &plan.headers {
//!     println!("{line}");
//! }
//! for action in &plan.actions {
//!     println!("{}", action.command);
//! }
//! ```

use thiserror::Error;

pub mod builder;
pub mod command;
pub mod mapper;
pub mod probe;

pub use builder::{Action, ActionKind, PlanBuilder, ResolveMode, SyncOptions, SyncPlan};
pub use command::CommandLine;
pub use mapper::resolve_destination;
pub use probe::{Location, Prober};

/// Errors that abort planning for a path.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error(
        "There is no rule to remap path '{path}' on '{remote}'\n\
         Try: 'sy-remote path add {remote} <SRC_PREFIX> <DEST_PREFIX>'"
    )]
    NoMappingRule { remote: String, path: String },
}
