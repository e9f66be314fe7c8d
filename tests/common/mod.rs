// Shared fixtures: a working repository with a bare `origin` next to it.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const APP_JSON: &str = r#"{
  "expo": {
    "name": "demo",
    "slug": "demo",
    "version": "2.0.0",
    "android": {
      "package": "com.example.demo",
      "versionCode": 5
    },
    "ios": {
      "bundleIdentifier": "com.example.demo",
      "buildNumber": "2.0.0"
    }
  }
}
"#;

pub struct Fixture {
    _tmp: TempDir,
    pub root: PathBuf,
    pub work: PathBuf,
    pub remote: PathBuf,
    pub initial: String,
}

/// Runs git in `dir` and returns trimmed stdout, panicking on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("Failed to execute git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

/// Like [git] but returns `None` instead of panicking.
pub fn try_git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Creates `work/` on branch `master` with `app.json` committed and pushed
/// to `remote.git`.
pub fn setup(app_json: &str) -> Fixture {
    let tmp = TempDir::new().expect("Could not create temp dir");
    let root = tmp.path().to_path_buf();
    let remote = root.join("remote.git");
    let work = root.join("work");
    fs::create_dir(&remote).unwrap();
    fs::create_dir(&work).unwrap();

    git(&remote, &["init", "--bare", "--quiet"]);
    git(&work, &["init", "--quiet"]);
    git(&work, &["symbolic-ref", "HEAD", "refs/heads/master"]);
    git(&work, &["config", "user.name", "Test User"]);
    git(&work, &["config", "user.email", "test@example.com"]);
    git(&work, &["config", "commit.gpgsign", "false"]);
    git(&work, &["config", "tag.gpgsign", "false"]);

    fs::write(work.join("app.json"), app_json).unwrap();
    git(&work, &["add", "app.json"]);
    git(&work, &["commit", "--quiet", "-m", "Initial commit"]);
    git(&work, &["remote", "add", "origin", remote.to_str().unwrap()]);
    git(&work, &["push", "--quiet", "origin", "master"]);

    let initial = git(&work, &["rev-parse", "HEAD"]);
    Fixture {
        _tmp: tmp,
        root,
        work,
        remote,
        initial,
    }
}

impl Fixture {
    pub fn head(&self) -> String {
        git(&self.work, &["rev-parse", "HEAD"])
    }

    pub fn subjects(&self, count: usize) -> Vec<String> {
        git(&self.work, &["log", &format!("-{}", count), "--format=%s"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn local_tag(&self, tag: &str) -> Option<String> {
        try_git(&self.work, &["rev-parse", "--verify", "--quiet", &format!("refs/tags/{}", tag)])
    }

    pub fn remote_ref(&self, refname: &str) -> Option<String> {
        try_git(&self.remote, &["rev-parse", "--verify", "--quiet", refname])
    }

    pub fn app_json(&self) -> String {
        fs::read_to_string(self.work.join("app.json")).unwrap()
    }

    /// Writes a settings file outside the working tree and returns its path.
    pub fn settings_file(&self, publish_command: &[&str]) -> PathBuf {
        let path = self.root.join("expobump.toml");
        let command = publish_command
            .iter()
            .map(|part| format!("{:?}", part))
            .collect::<Vec<_>>()
            .join(", ");
        fs::write(
            &path,
            format!(
                "remote = \"origin\"\nbranch = \"master\"\npublish_command = [{}]\n",
                command
            ),
        )
        .unwrap();
        path
    }
}
