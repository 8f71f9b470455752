//! Git operations for Notemirror
//!
//! This module provides repository discovery and access to git notes.

pub(crate) mod notes;
mod repo;

pub use notes::AnnotatedCommit;
pub use repo::GitRepo;
