//! Repository trait definitions (ports).
//!
//! The flow store and its query execution live outside this workspace.
//! The core crate never depends on any specific storage technology.

pub mod flow;
