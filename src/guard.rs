//! Preconditions checked before the repository is touched.

use crate::config::Settings;
use crate::error::{ExpoBumpError, Result};
use crate::git::Repository;
use log::debug;

/// Resolves `refname`, turning a lookup failure into a usage error.
fn hash_for<R: Repository>(repo: &R, refname: &str) -> Result<String> {
    repo.resolve(refname).map_err(|e| {
        debug!("cannot resolve {}: {}", refname, e);
        ExpoBumpError::usage(format!(
            "Git couldn't find the branch: \"{}\"; please ensure it exists",
            refname
        ))
    })
}

/// Ensures the release branch is checked out, pushed, and clean.
///
/// Checks run in a fixed order and the first failing one is reported:
/// 1. `HEAD` must be at the tip of the configured branch
/// 2. The branch must match `<remote>/<branch>`
/// 3. The working tree must have no modified or untracked files
pub fn ensure_clean_branch<R: Repository>(repo: &R, settings: &Settings) -> Result<()> {
    let branch_hash = hash_for(repo, &settings.branch)?;

    if hash_for(repo, "HEAD")? != branch_hash {
        return Err(ExpoBumpError::usage(format!(
            "You need to be on the \"{}\" branch to run this script",
            settings.branch
        )));
    }

    if branch_hash != hash_for(repo, &settings.remote_branch())? {
        return Err(ExpoBumpError::usage("You need to push your changes first"));
    }

    if repo.has_uncommitted_changes()? {
        return Err(ExpoBumpError::usage(
            "You have uncommited changes! Commit them before running this script",
        ));
    }

    Ok(())
}
