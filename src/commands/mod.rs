//! Handlers behind the two binaries: `sy` plans and runs synchronizations,
//! `sy-remote` manages the registry those plans are built from.

pub mod remote;
pub mod sync;
