//! Main release workflow orchestration logic
//!
//! Runs one bump-tag-publish cycle against a [Repository]. The CLI builds
//! [RunOptions] and [Settings] once and hands them in; nothing here depends
//! on clap or on the terminal directly.

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Settings;
use crate::domain::{baseline_after, ReleaseType};
use crate::error::{ExpoBumpError, Result};
use crate::git::Repository;
use crate::guard::ensure_clean_branch;
use crate::manifest::{Manifest, PlatformFlags};
use crate::publish::Publisher;
use crate::ui::{self, Prompt, PUBLISH_PROMPT};

/// Options for one invocation
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunOptions {
    pub release_type: ReleaseType,

    /// Document to bump, relative to the repository root
    pub file: Option<PathBuf>,

    /// The document is an `exp.json`: the whole file is the Expo config
    pub exp: bool,

    /// Increment `android.versionCode`
    pub android: bool,

    /// Set `ios.buildNumber` to the new version
    pub ios: bool,

    /// Publish without asking
    pub publish: bool,

    /// Also write the bumped document here, relative to the repository root
    pub cpy: Option<PathBuf>,

    /// Pre-release identifier for the pre-release types
    pub preid: Option<String>,
}

impl RunOptions {
    /// `--file`, or `exp.json` / `app.json` depending on `--exp`.
    pub fn file_name(&self) -> PathBuf {
        match &self.file {
            Some(file) => file.clone(),
            None if self.exp => PathBuf::from("exp.json"),
            None => PathBuf::from("app.json"),
        }
    }

    fn platforms(&self) -> PlatformFlags {
        PlatformFlags {
            android: self.android,
            ios: self.ios,
        }
    }
}

/// How a release run ended
#[derive(Debug)]
pub enum Outcome {
    /// Tag and branch were published and pushed
    Published { tag: String },

    /// The user declined to publish; local changes were reverted
    Declined { tag: String },

    /// A publish step failed; local changes were reverted
    Failed { tag: String, error: ExpoBumpError },
}

impl Outcome {
    pub fn tag(&self) -> &str {
        match self {
            Outcome::Published { tag } | Outcome::Declined { tag } | Outcome::Failed { tag, .. } => {
                tag
            }
        }
    }

    /// Process exit code for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Published { .. } | Outcome::Declined { .. } => 0,
            Outcome::Failed { .. } => 1,
        }
    }
}

/// Main release workflow
///
/// 1. Check the branch is checked out, pushed and clean
/// 2. Bump the document and write it (plus the optional copy)
/// 3. Commit `Tag <version>` and tag it
/// 4. For stable releases, commit a `Bump to <next>-pre` baseline
/// 5. Confirm, then publish and push, or revert
///
/// Failures in steps 1-4 are returned as errors with nothing rolled back.
/// Failures while publishing are reported through [Outcome::Failed] after
/// the revert has run.
pub fn run_release<R, P, Q>(
    repo: &R,
    publisher: &P,
    prompt: &Q,
    settings: &Settings,
    options: &RunOptions,
) -> Result<Outcome>
where
    R: Repository,
    P: Publisher,
    Q: Prompt,
{
    ensure_clean_branch(repo, settings)?;

    let path = repo.work_tree().join(options.file_name());
    let mut manifest = Manifest::load(&path, options.exp)?;

    let bump = manifest.bump(
        options.release_type,
        options.preid.as_deref(),
        options.platforms(),
    )?;
    manifest.save(&path)?;
    if let Some(cpy) = &options.cpy {
        manifest.save(&repo.work_tree().join(cpy))?;
    }

    let tag = bump.new_version.to_string();
    ui::display_bump(&bump.old_version, &tag);

    commit_and_tag(repo, &path, &tag)?;

    let stable = options.release_type.is_stable();
    if stable {
        let baseline = baseline_after(&bump.new_version)?;
        manifest.set_version(&baseline)?;
        manifest.save(&path)?;
        repo.stage(&path)?;
        repo.commit(&format!("Bump to {}", baseline))?;
        info!("committed baseline {}", baseline);
    }

    let proceed = if options.publish {
        Ok(true)
    } else {
        prompt.confirm(PUBLISH_PROMPT)
    };

    match proceed.and_then(|proceed| {
        if proceed {
            publish_release(repo, publisher, settings, &manifest, &path, &tag, stable).map(|_| true)
        } else {
            Ok(false)
        }
    }) {
        Ok(true) => {
            ui::display_success(&format!("Published {}", tag));
            Ok(Outcome::Published { tag })
        }
        Ok(false) => {
            revert(repo, settings, &tag)?;
            Ok(Outcome::Declined { tag })
        }
        Err(e) => {
            debug!("publishing {} failed: {:?}", tag, e);
            ui::display_error(&e.to_string());
            if let Err(revert_err) = revert(repo, settings, &tag) {
                debug!("revert failed: {:?}", revert_err);
                ui::display_error(&format!("Revert failed: {}", revert_err));
            }
            Ok(Outcome::Failed { tag, error: e })
        }
    }
}

fn commit_and_tag<R: Repository>(repo: &R, path: &Path, tag: &str) -> Result<()> {
    repo.stage(path)?;
    repo.commit(&format!("Tag {}", tag))?;
    repo.create_tag(tag)?;
    info!("created tag {}", tag);
    Ok(())
}

/// Publishes the tagged release and pushes tag and branch.
fn publish_release<R, P>(
    repo: &R,
    publisher: &P,
    settings: &Settings,
    manifest: &Manifest,
    path: &Path,
    tag: &str,
    stable: bool,
) -> Result<()>
where
    R: Repository,
    P: Publisher,
{
    manifest.save(path)?;

    ui::display_status(&format!("Publishing {}", tag));
    repo.checkout(tag)?;
    publisher.publish()?;
    repo.push(&settings.remote, tag)?;

    repo.checkout(&settings.branch)?;

    if stable {
        // Re-create the baseline commit so it does not share the tag
        // commit's timestamp.
        let subject = repo.head_subject()?;
        repo.reset_soft("HEAD^")?;
        repo.commit(&subject)?;
    }

    repo.push(&settings.remote, &settings.branch)?;
    Ok(())
}

/// Deletes the release tag and resets the branch to `<remote>/<branch>`.
///
/// A failed publish can leave HEAD detached on the tag with tracked files
/// modified, so the branch is force-checked-out before the reset.
pub fn revert<R: Repository>(repo: &R, settings: &Settings, tag: &str) -> Result<()> {
    repo.delete_tag(tag)?;
    repo.force_checkout(&settings.branch)?;
    repo.reset_hard(&settings.remote_branch())?;
    ui::display_reverted();
    info!("reverted to {}", settings.remote_branch());
    Ok(())
}
