//! Remote endpoints and the per-directory remote memory.
//!
//! A [`Remote`](registry::Remote) names a synchronization endpoint — an SSH
//! host or a local directory tree — together with the path-prefix mappings
//! that translate local paths into destination paths. The registry is the
//! keyed collection persisted in `remotes.json`; directory bindings remember
//! which remote each local path was last synced with so later invocations
//! can omit `--remote`.

pub mod bindings;
pub mod registry;

pub use bindings::DirectoryBindings;
pub use registry::{Remote, RemoteError, RemoteKind, RemoteRegistry};
