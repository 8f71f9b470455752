//! CLI command implementations

pub mod list;
pub mod request;
pub mod show;

pub use list::ListArgs;
pub use request::RequestArgs;
pub use show::ShowArgs;

use std::fmt::Display;

use notemirror_core::Request;

/// Print a review request in the human readable listing format
pub(crate) fn print_request(commit: impl Display, request: &Request) {
    println!("commit {}", commit);
    println!("  Target:    {}", request.target_ref);
    if !request.review_ref.is_empty() {
        println!("  Review:    {}", request.review_ref);
    }
    if !request.requester.is_empty() {
        println!("  Requester: {}", request.requester);
    }
    if !request.reviewers.is_empty() {
        println!("  Reviewers: {}", request.reviewers.join(", "));
    }
    if !request.description.is_empty() {
        println!();
        for line in request.description.lines() {
            println!("    {}", line);
        }
    }
    println!();
}
