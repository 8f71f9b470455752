//! Git repository detection and operations

use std::path::{Path, PathBuf};

use git2::{Oid, Repository};

use crate::{Error, Result};

/// A git repository wrapper providing notemirror-specific operations
pub struct GitRepo {
    /// The underlying git2 repository
    repo: Repository,
    /// Work tree root, or the git directory for bare repositories
    root: PathBuf,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// This will search upward from the given path to find the repository root.
    /// Bare repositories are accepted since notes live in the object store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let repo = Repository::discover(path).map_err(|e| open_error(path, e))?;

        let root = repo
            .workdir()
            .unwrap_or_else(|| repo.path())
            .to_path_buf();

        Ok(Self { repo, root })
    }

    /// Get the repository root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a revision (branch, tag, sha, `HEAD~2`, ...) to a commit id
    pub fn resolve_commit(&self, revision: &str) -> Result<Oid> {
        let object = self.repo.revparse_single(revision).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                Error::Other(format!("Unknown revision: {}", revision))
            } else {
                Error::Git(e)
            }
        })?;

        let commit = object.peel_to_commit().map_err(|_| {
            Error::Other(format!("Revision '{}' does not point to a commit", revision))
        })?;

        Ok(commit.id())
    }

    /// Get access to the underlying git2 repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }
}

fn open_error(path: &Path, e: git2::Error) -> Error {
    if e.code() == git2::ErrorCode::NotFound {
        Error::Config(format!(
            "Not a git repository: {}. Run 'git init' first or navigate to a git repository.",
            path.display()
        ))
    } else {
        Error::Git(e)
    }
}
