//! Notemirror Core - review requests stored as git notes
//!
//! This crate defines the review request model, its JSON note encoding, and
//! a git-notes backed store for reading and writing requests.

pub mod config;
pub mod error;
pub mod git;
pub mod repository;
pub mod review;

pub use config::Config;
pub use error::{Error, Result};
pub use git::{AnnotatedCommit, GitRepo};
pub use repository::{Note, NotesRef};
pub use review::{decode_all_valid, Request};
