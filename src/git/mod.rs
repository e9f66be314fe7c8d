//! Git operations abstraction layer
//!
//! The release workflow depends on the [Repository] trait rather than on a
//! concrete backend so it can be driven against a scripted repository in
//! tests.
//!
//! - [repository::GitRepository]: the real backend. Read-only queries go
//!   through `git2`; anything that mutates the repository or talks to a
//!   remote runs the system `git` binary with an argument array, so the
//!   user's credential helpers and hooks apply.
//! - [mock::MockRepository]: records every call and can be told to fail.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::GitRepository;

use crate::error::Result;
use std::path::Path;

/// Operations the release workflow needs from a repository
pub trait Repository {
    /// Root of the working tree; document paths are resolved against it.
    fn work_tree(&self) -> &Path;

    /// Resolves a revision (`HEAD`, `master`, `origin/master`, a tag) to a
    /// full commit hash.
    ///
    /// # Returns
    /// * `Ok(String)` - 40-character hex object id
    /// * `Err` - If the revision does not exist
    fn resolve(&self, refname: &str) -> Result<String>;

    /// Whether the working tree has modified, staged, or untracked
    /// (non-ignored) paths.
    fn has_uncommitted_changes(&self) -> Result<bool>;

    /// `git add <path>`
    fn stage(&self, path: &Path) -> Result<()>;

    /// `git commit -m <message>`
    fn commit(&self, message: &str) -> Result<()>;

    /// Creates a lightweight tag on HEAD.
    fn create_tag(&self, name: &str) -> Result<()>;

    fn delete_tag(&self, name: &str) -> Result<()>;

    /// Checks out a branch, or a tag in detached mode.
    fn checkout(&self, target: &str) -> Result<()>;

    /// Checks out a branch, discarding local changes to tracked files.
    fn force_checkout(&self, target: &str) -> Result<()>;

    /// `git push <remote> <refname>`
    fn push(&self, remote: &str, refname: &str) -> Result<()>;

    fn reset_hard(&self, target: &str) -> Result<()>;

    fn reset_soft(&self, target: &str) -> Result<()>;

    /// Subject line of the HEAD commit.
    fn head_subject(&self) -> Result<String>;
}
