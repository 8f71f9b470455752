//! Review module for code review requests stored as git notes
//!
//! This module provides the review request model, its note encoding, and
//! helpers that load and store requests through a [`GitRepo`](crate::GitRepo).

pub mod request;
pub mod store;

pub use request::{decode_all_valid, reviews_ref, Request, NOTES_REF};
pub use store::{list_requests, load_requests, write_request, CommitRequest};
