//! Reading and appending git notes
//!
//! A git note attached to a commit may hold several entries, one per line.
//! Entries are returned as opaque [`Note`] values; interpreting them is left
//! to the caller.

use git2::{ErrorCode, Oid, Signature};
use tracing::{debug, info};

use super::GitRepo;
use crate::repository::{split_notes, Note, NotesRef};
use crate::{Error, Result};

const FALLBACK_NAME: &str = "notemirror";
const FALLBACK_EMAIL: &str = "notemirror@localhost";

/// A commit carrying a note, along with the note's entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedCommit {
    /// Annotated commit id
    pub commit: Oid,
    /// Entries of the note attached to the commit
    pub notes: Vec<Note>,
}

impl GitRepo {
    /// Get the note entries attached to a revision
    ///
    /// Returns an empty list when the commit has no note or the notes ref
    /// does not exist yet.
    pub fn get_notes(&self, notes_ref: &NotesRef, revision: &str) -> Result<Vec<Note>> {
        let commit = self.resolve_commit(revision)?;
        self.notes_for_commit(notes_ref, commit)
    }

    /// List every commit carrying a note under `notes_ref`, ordered by commit id
    pub fn list_annotated(&self, notes_ref: &NotesRef) -> Result<Vec<AnnotatedCommit>> {
        let iter = match self.inner().notes(Some(notes_ref.as_str())) {
            Ok(iter) => iter,
            Err(e) if e.code() == ErrorCode::NotFound => {
                debug!(%notes_ref, "Notes ref does not exist");
                return Ok(Vec::new());
            }
            Err(e) => return Err(Error::Git(e)),
        };

        let mut annotated = Vec::new();
        for entry in iter {
            let (_note_id, commit) = entry?;
            let notes = self.notes_for_commit(notes_ref, commit)?;
            annotated.push(AnnotatedCommit { commit, notes });
        }
        annotated.sort_by(|a, b| a.commit.cmp(&b.commit));

        Ok(annotated)
    }

    /// Append a note entry to a revision
    ///
    /// The entry becomes a new line after any existing note content.
    pub fn append_note(&self, notes_ref: &NotesRef, revision: &str, note: &Note) -> Result<Oid> {
        let entry = std::str::from_utf8(note.as_bytes())
            .map_err(|_| Error::Other("Note content is not valid UTF-8".to_string()))?;
        if entry.contains('\n') {
            return Err(Error::Other(
                "Note content must be a single line".to_string(),
            ));
        }

        let commit = self.resolve_commit(revision)?;
        let existing = match self.inner().find_note(Some(notes_ref.as_str()), commit) {
            Ok(existing) => Some(existing.message_bytes().to_vec()),
            Err(e) if e.code() == ErrorCode::NotFound => None,
            Err(e) => return Err(Error::Git(e)),
        };

        let content = match existing {
            Some(bytes) => {
                let mut text = String::from_utf8(bytes).map_err(|_| {
                    Error::Other(format!("Existing note on {} is not valid UTF-8", commit))
                })?;
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(entry);
                text
            }
            None => entry.to_string(),
        };

        let signature = self.signature()?;
        let note_id = self.inner().note(
            &signature,
            &signature,
            Some(notes_ref.as_str()),
            commit,
            &content,
            true,
        )?;

        info!(%notes_ref, %commit, %note_id, "Appended note");
        Ok(note_id)
    }

    fn notes_for_commit(&self, notes_ref: &NotesRef, commit: Oid) -> Result<Vec<Note>> {
        match self.inner().find_note(Some(notes_ref.as_str()), commit) {
            Ok(note) => Ok(split_notes(note.message_bytes())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(Vec::new()),
            Err(e) => Err(Error::Git(e)),
        }
    }

    fn signature(&self) -> Result<Signature<'static>> {
        match self.inner().signature() {
            Ok(signature) => Ok(signature),
            Err(e) => {
                debug!(error = %e, "No configured identity, using fallback signature");
                Ok(Signature::now(FALLBACK_NAME, FALLBACK_EMAIL)?)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    /// Create a repository with a single empty commit, returning its id
    pub(crate) fn init_repo() -> (TempDir, Oid) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        let head = commit(&repo, "initial");
        (dir, head)
    }

    /// Add an empty commit on top of HEAD
    pub(crate) fn commit(repo: &Repository, message: &str) -> Oid {
        let signature = repo.signature().unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
            .unwrap()
    }

    fn reviews() -> NotesRef {
        NotesRef::from("refs/notes/devtools/reviews")
    }

    #[test]
    fn test_get_notes_without_notes_ref() {
        let (dir, _) = init_repo();
        let repo = GitRepo::open(dir.path()).unwrap();

        assert!(repo.get_notes(&reviews(), "HEAD").unwrap().is_empty());
        assert!(repo.list_annotated(&reviews()).unwrap().is_empty());
    }

    #[test]
    fn test_append_and_get_notes() {
        let (dir, head) = init_repo();
        let repo = GitRepo::open(dir.path()).unwrap();

        repo.append_note(&reviews(), "HEAD", &Note::from("first")).unwrap();
        repo.append_note(&reviews(), &head.to_string(), &Note::from("second"))
            .unwrap();

        let notes = repo.get_notes(&reviews(), "HEAD").unwrap();
        assert_eq!(notes, vec![Note::from("first"), Note::from("second")]);

        let raw = repo
            .inner()
            .find_note(Some("refs/notes/devtools/reviews"), head)
            .unwrap();
        assert_eq!(raw.message(), Some("first\nsecond"));
    }

    #[test]
    fn test_append_keeps_foreign_content() {
        let (dir, head) = init_repo();
        let git = Repository::open(dir.path()).unwrap();
        let signature = git.signature().unwrap();
        git.note(
            &signature,
            &signature,
            Some("refs/notes/devtools/reviews"),
            head,
            "{\"status\":\"ok\"}\n",
            false,
        )
        .unwrap();

        let repo = GitRepo::open(dir.path()).unwrap();
        repo.append_note(&reviews(), "HEAD", &Note::from("new")).unwrap();

        let notes = repo.get_notes(&reviews(), "HEAD").unwrap();
        assert_eq!(notes, vec![Note::from("{\"status\":\"ok\"}"), Note::from("new")]);
    }

    #[test]
    fn test_append_rejects_multiline_note() {
        let (dir, _) = init_repo();
        let repo = GitRepo::open(dir.path()).unwrap();

        let result = repo.append_note(&reviews(), "HEAD", &Note::from("a\nb"));
        assert!(matches!(result, Err(Error::Other(_))));
        assert!(repo.get_notes(&reviews(), "HEAD").unwrap().is_empty());
    }

    #[test]
    fn test_append_rejects_non_utf8_note() {
        let (dir, _) = init_repo();
        let repo = GitRepo::open(dir.path()).unwrap();

        let result = repo.append_note(&reviews(), "HEAD", &Note::from(vec![0xff, 0xfe]));
        assert!(result.is_err());
    }

    #[test]
    fn test_notes_refs_are_separate() {
        let (dir, _) = init_repo();
        let repo = GitRepo::open(dir.path()).unwrap();
        let other = NotesRef::from("refs/notes/devtools/ci");

        repo.append_note(&other, "HEAD", &Note::from("ci entry")).unwrap();

        assert!(repo.get_notes(&reviews(), "HEAD").unwrap().is_empty());
        assert_eq!(repo.get_notes(&other, "HEAD").unwrap().len(), 1);
    }

    #[test]
    fn test_list_annotated() {
        let (dir, first) = init_repo();
        let git = Repository::open(dir.path()).unwrap();
        let second = commit(&git, "second");
        let _unannotated = commit(&git, "third");

        let repo = GitRepo::open(dir.path()).unwrap();
        repo.append_note(&reviews(), &first.to_string(), &Note::from("one"))
            .unwrap();
        repo.append_note(&reviews(), &second.to_string(), &Note::from("two"))
            .unwrap();

        let annotated = repo.list_annotated(&reviews()).unwrap();
        assert_eq!(annotated.len(), 2);
        assert!(annotated.windows(2).all(|w| w[0].commit < w[1].commit));

        let for_first = annotated.iter().find(|a| a.commit == first).unwrap();
        assert_eq!(for_first.notes, vec![Note::from("one")]);
        let for_second = annotated.iter().find(|a| a.commit == second).unwrap();
        assert_eq!(for_second.notes, vec![Note::from("two")]);
    }
}
