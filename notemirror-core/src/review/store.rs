//! Loading and storing review requests through git notes

use git2::Oid;
use tracing::{debug, info};

use super::request::{decode_all_valid, Request};
use crate::git::GitRepo;
use crate::repository::NotesRef;
use crate::{Error, Result};

/// A valid review request together with the commit it is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    pub commit: Oid,
    pub request: Request,
}

/// Load the valid review requests attached to a revision
pub fn load_requests(repo: &GitRepo, notes_ref: &NotesRef, revision: &str) -> Result<Vec<Request>> {
    let notes = repo.get_notes(notes_ref, revision)?;
    let requests = decode_all_valid(&notes);
    debug!(
        revision,
        notes = notes.len(),
        requests = requests.len(),
        "Loaded review requests"
    );
    Ok(requests)
}

/// Load every valid review request under `notes_ref`
///
/// Commits are visited in commit id order; requests on the same commit keep
/// the order in which they were appended.
pub fn list_requests(repo: &GitRepo, notes_ref: &NotesRef) -> Result<Vec<CommitRequest>> {
    let requests = repo
        .list_annotated(notes_ref)?
        .into_iter()
        .flat_map(|annotated| {
            let commit = annotated.commit;
            decode_all_valid(&annotated.notes)
                .into_iter()
                .map(move |request| CommitRequest { commit, request })
        })
        .collect();
    Ok(requests)
}

/// Encode a review request and append it to the notes of a revision
///
/// Requests without a target ref would be skipped by every reader, so they
/// are refused here rather than written.
pub fn write_request(
    repo: &GitRepo,
    notes_ref: &NotesRef,
    revision: &str,
    request: &Request,
) -> Result<Oid> {
    if !request.is_valid() {
        return Err(Error::InvalidRequest(
            "a target ref is required".to_string(),
        ));
    }

    let note = request.encode()?;
    let note_id = repo.append_note(notes_ref, revision, &note)?;
    info!(
        revision,
        target_ref = %request.target_ref,
        reviewers = request.reviewers.len(),
        "Wrote review request"
    );
    Ok(note_id)
}
