//! Semantic version increments
//!
//! Follows the increment rules of the npm `semver` package so that versions
//! written by expo-bump match what the JavaScript tooling around an Expo app
//! expects. Parsing and ordering come from the `semver` crate.

use crate::domain::ReleaseType;
use crate::error::{ExpoBumpError, Result};
use semver::{BuildMetadata, Prerelease, Version};

/// Suffix appended to the development baseline after a stable release
pub const BASELINE_SUFFIX: &str = "pre";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Identifier {
    Numeric(u64),
    Alpha(String),
}

impl Identifier {
    fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<u64>() {
                return Identifier::Numeric(n);
            }
        }
        Identifier::Alpha(raw.to_string())
    }

    fn render(&self) -> String {
        match self {
            Identifier::Numeric(n) => n.to_string(),
            Identifier::Alpha(s) => s.clone(),
        }
    }
}

fn identifiers(pre: &Prerelease) -> Vec<Identifier> {
    if pre.is_empty() {
        return Vec::new();
    }
    pre.as_str().split('.').map(Identifier::parse).collect()
}

fn to_prerelease(ids: &[Identifier]) -> Result<Prerelease> {
    if ids.is_empty() {
        return Ok(Prerelease::EMPTY);
    }
    let joined = ids
        .iter()
        .map(Identifier::render)
        .collect::<Vec<_>>()
        .join(".");
    Prerelease::new(&joined)
        .map_err(|e| ExpoBumpError::version(format!("Invalid pre-release '{}': {}", joined, e)))
}

/// Parses a version string, accepting a leading `v` the way npm does.
pub fn parse(raw: &str) -> Result<Version> {
    let trimmed = raw.trim();
    let clean = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(clean)
        .map_err(|e| ExpoBumpError::version(format!("Invalid version '{}': {}", raw, e)))
}

/// Bumps the pre-release part in place.
///
/// The last numeric identifier is incremented, or `0` is appended when there
/// is none. A `preid` resets the pre-release to `<preid>.0` unless it already
/// starts with that identifier followed by a number.
fn bump_pre(pre: &mut Vec<Identifier>, preid: Option<&str>) {
    let last_numeric = pre
        .iter()
        .rposition(|id| matches!(id, Identifier::Numeric(_)));
    match last_numeric {
        Some(i) => {
            if let Identifier::Numeric(n) = &mut pre[i] {
                *n += 1;
            }
        }
        None => pre.push(Identifier::Numeric(0)),
    }

    if let Some(preid) = preid {
        let reset = match pre.first() {
            Some(Identifier::Alpha(first)) if first == preid => {
                !matches!(pre.get(1), Some(Identifier::Numeric(_)))
            }
            _ => true,
        };
        if reset {
            *pre = vec![
                Identifier::Alpha(preid.to_string()),
                Identifier::Numeric(0),
            ];
        }
    }
}

/// Computes the version that follows `version` for the given release type.
///
/// # Arguments
/// * `version` - Current version
/// * `release` - Release type to apply
/// * `preid` - Optional pre-release identifier (e.g. "beta") for pre-release types
///
/// # Example
/// ```ignore
/// let v = parse("1.2.3")?;
/// assert_eq!(increment(&v, ReleaseType::Minor, None)?.to_string(), "1.3.0");
/// assert_eq!(increment(&v, ReleaseType::PreRelease, None)?.to_string(), "1.2.4-0");
/// ```
pub fn increment(version: &Version, release: ReleaseType, preid: Option<&str>) -> Result<Version> {
    let mut pre = identifiers(&version.pre);
    let (mut major, mut minor, mut patch) = (version.major, version.minor, version.patch);

    match release {
        ReleaseType::Major => {
            if minor != 0 || patch != 0 || pre.is_empty() {
                major += 1;
            }
            minor = 0;
            patch = 0;
            pre.clear();
        }
        ReleaseType::Minor => {
            if patch != 0 || pre.is_empty() {
                minor += 1;
            }
            patch = 0;
            pre.clear();
        }
        ReleaseType::Patch => {
            if pre.is_empty() {
                patch += 1;
            }
            pre.clear();
        }
        ReleaseType::PreMajor => {
            major += 1;
            minor = 0;
            patch = 0;
            pre.clear();
            bump_pre(&mut pre, preid);
        }
        ReleaseType::PreMinor => {
            minor += 1;
            patch = 0;
            pre.clear();
            bump_pre(&mut pre, preid);
        }
        ReleaseType::PrePatch => {
            patch += 1;
            pre.clear();
            bump_pre(&mut pre, preid);
        }
        ReleaseType::PreRelease => {
            if pre.is_empty() {
                patch += 1;
            }
            bump_pre(&mut pre, preid);
        }
    }

    Ok(Version {
        major,
        minor,
        patch,
        pre: to_prerelease(&pre)?,
        build: BuildMetadata::EMPTY,
    })
}

/// Development baseline committed after a stable release: the next patch
/// version with a `-pre` suffix (`2.1.0` -> `2.1.1-pre`).
pub fn baseline_after(released: &Version) -> Result<Version> {
    let mut next = increment(released, ReleaseType::Patch, None)?;
    next.pre = Prerelease::new(BASELINE_SUFFIX)
        .map_err(|e| ExpoBumpError::version(format!("Invalid baseline suffix: {}", e)))?;
    Ok(next)
}
