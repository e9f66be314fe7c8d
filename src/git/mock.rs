use crate::error::{ExpoBumpError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Mock repository for testing without actual git operations
///
/// Every mutating call is appended to an operation log such as
/// `"commit Tag 1.0.0"` or `"push origin master"`. A call can be made to
/// fail by registering its log line (or a prefix of it) with [fail_on].
///
/// [fail_on]: MockRepository::fail_on
pub struct MockRepository {
    work_tree: PathBuf,
    refs: HashMap<String, String>,
    dirty: bool,
    subject: String,
    fail_on: Vec<String>,
    ops: RefCell<Vec<String>>,
    tags: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository rooted at `work_tree`
    pub fn new(work_tree: impl Into<PathBuf>) -> Self {
        MockRepository {
            work_tree: work_tree.into(),
            refs: HashMap::new(),
            dirty: false,
            subject: String::new(),
            fail_on: Vec::new(),
            ops: RefCell::new(Vec::new()),
            tags: RefCell::new(Vec::new()),
        }
    }

    /// Point a revision name at a hash
    pub fn set_ref(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.refs.insert(name.into(), hash.into());
    }

    /// `HEAD`, `<branch>` and `<remote>/<branch>` all at `hash`
    pub fn in_sync(mut self, remote: &str, branch: &str, hash: &str) -> Self {
        self.set_ref("HEAD", hash);
        self.set_ref(branch, hash);
        self.set_ref(format!("{}/{}", remote, branch), hash);
        self
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Subject returned by [Repository::head_subject]
    pub fn set_head_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    /// Make any operation whose log line starts with `op` fail
    pub fn fail_on(&mut self, op: impl Into<String>) {
        self.fail_on.push(op.into());
    }

    /// Operations recorded so far, in call order
    pub fn ops(&self) -> Vec<String> {
        self.ops.borrow().clone()
    }

    /// Tags currently present
    pub fn tags(&self) -> Vec<String> {
        self.tags.borrow().clone()
    }

    fn record(&self, op: String) -> Result<()> {
        let failing = self.fail_on.iter().any(|f| op.starts_with(f.as_str()));
        self.ops.borrow_mut().push(op.clone());
        if failing {
            return Err(ExpoBumpError::Command {
                command: format!("git {}", op),
                stderr: "mock failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Repository for MockRepository {
    fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    fn resolve(&self, refname: &str) -> Result<String> {
        self.refs.get(refname).cloned().ok_or_else(|| ExpoBumpError::Command {
            command: format!("git rev-parse --verify {}", refname),
            stderr: "Needed a single revision".to_string(),
        })
    }

    fn has_uncommitted_changes(&self) -> Result<bool> {
        Ok(self.dirty)
    }

    fn stage(&self, path: &Path) -> Result<()> {
        self.record(format!("add {}", path.display()))
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(format!("commit {}", message))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(format!("tag {}", name))?;
        self.tags.borrow_mut().push(name.to_string());
        Ok(())
    }

    fn delete_tag(&self, name: &str) -> Result<()> {
        self.record(format!("tag -d {}", name))?;
        self.tags.borrow_mut().retain(|t| t != name);
        Ok(())
    }

    fn checkout(&self, target: &str) -> Result<()> {
        self.record(format!("checkout {}", target))
    }

    fn force_checkout(&self, target: &str) -> Result<()> {
        self.record(format!("checkout --force {}", target))
    }

    fn push(&self, remote: &str, refname: &str) -> Result<()> {
        self.record(format!("push {} {}", remote, refname))
    }

    fn reset_hard(&self, target: &str) -> Result<()> {
        self.record(format!("reset --hard {}", target))
    }

    fn reset_soft(&self, target: &str) -> Result<()> {
        self.record(format!("reset --soft {}", target))
    }

    fn head_subject(&self) -> Result<String> {
        Ok(self.subject.clone())
    }
}
