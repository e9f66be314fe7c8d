use crate::error::{ExpoBumpError, Result};
use git2::{Repository as Git2Repo, StatusOptions};
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Repository backed by `git2` for queries and the `git` binary for changes
pub struct GitRepository {
    repo: Git2Repo,
    work_tree: PathBuf,
}

impl GitRepository {
    /// Open or discover a git repository containing `path`
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Self::from_git2(repo)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Result<Self> {
        let work_tree = repo
            .workdir()
            .ok_or_else(|| ExpoBumpError::usage("expo-bump cannot run in a bare repository"))?
            .to_path_buf();
        Ok(GitRepository { repo, work_tree })
    }

    /// Base `git` command for this working tree.
    ///
    /// Detached-HEAD advice is turned off because checking out the release
    /// tag is expected.
    fn git_cmd(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(&self.work_tree);
        cmd.arg("-c").arg("advice.detachedHead=false");
        cmd
    }

    /// Runs `git <args>` and returns its stdout.
    fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let command = std::iter::once("git".to_string())
            .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ");
        debug!("running {}", command);

        let output = self.git_cmd().args(&args).output()?;

        if !output.status.success() {
            return Err(ExpoBumpError::Command {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl super::Repository for GitRepository {
    fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    fn resolve(&self, refname: &str) -> Result<String> {
        let object = self.repo.revparse_single(refname)?;
        let commit = object.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);
        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(!statuses.is_empty())
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.run([OsStr::new("add"), OsStr::new("--"), path.as_os_str()])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run(["commit", "-m", message])?;
        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.run(["tag", name])?;
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.run(["tag", "-d", name])?;
        Ok(())
    }

    fn checkout(&self, target: &str) -> Result<()> {
        self.run(["checkout", target])?;
        Ok(())
    }

    fn force_checkout(&self, target: &str) -> Result<()> {
        self.run(["checkout", "--force", target])?;
        Ok(())
    }

    fn push(&self, remote: &str, refname: &str) -> Result<()> {
        self.run(["push", remote, refname])?;
        Ok(())
    }

    fn reset_hard(&self, target: &str) -> Result<()> {
        self.run(["reset", "--hard", target])?;
        Ok(())
    }

    fn reset_soft(&self, target: &str) -> Result<()> {
        self.run(["reset", "--soft", target])?;
        Ok(())
    }

    fn head_subject(&self) -> Result<String> {
        Ok(self.run(["show", "-s", "--format=%s"])?.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use tempfile::TempDir;

    #[test]
    fn test_discover_outside_repository_fails() {
        let dir = TempDir::new().unwrap();
        // Only meaningful when the temp dir is not itself inside a checkout.
        if Git2Repo::discover(dir.path()).is_err() {
            assert!(GitRepository::discover(dir.path()).is_err());
        }
    }

    #[test]
    fn test_bare_repository_is_rejected() {
        let dir = TempDir::new().unwrap();
        Git2Repo::init_bare(dir.path()).unwrap();
        let err = GitRepository::discover(dir.path()).err().unwrap();
        assert!(err.is_usage());
    }

    #[test]
    fn test_resolve_unknown_ref_fails() {
        let dir = TempDir::new().unwrap();
        let repo = GitRepository::from_git2(Git2Repo::init(dir.path()).unwrap()).unwrap();
        assert!(repo.resolve("no-such-branch").is_err());
        assert!(!repo.has_uncommitted_changes().unwrap());

        std::fs::write(dir.path().join("untracked.txt"), "x").unwrap();
        assert!(repo.has_uncommitted_changes().unwrap());
    }
}
