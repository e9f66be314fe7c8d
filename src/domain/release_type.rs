use crate::error::{ExpoBumpError, Result};
use std::fmt;
use std::str::FromStr;

/// Kind of version increment requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    PreMajor,
    PreMinor,
    PrePatch,
    PreRelease,
}

impl ReleaseType {
    /// All release types, stable ones first
    pub const ALL: [ReleaseType; 7] = [
        ReleaseType::Major,
        ReleaseType::Minor,
        ReleaseType::Patch,
        ReleaseType::PreMajor,
        ReleaseType::PreMinor,
        ReleaseType::PrePatch,
        ReleaseType::PreRelease,
    ];

    /// Stable types produce a version with no pre-release suffix and are
    /// followed by a `-pre` baseline commit.
    pub fn is_stable(&self) -> bool {
        matches!(
            self,
            ReleaseType::Major | ReleaseType::Minor | ReleaseType::Patch
        )
    }

    pub fn is_prerelease(&self) -> bool {
        !self.is_stable()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::PreMajor => "premajor",
            ReleaseType::PreMinor => "preminor",
            ReleaseType::PrePatch => "prepatch",
            ReleaseType::PreRelease => "prerelease",
        }
    }
}

impl Default for ReleaseType {
    fn default() -> Self {
        ReleaseType::Patch
    }
}

impl FromStr for ReleaseType {
    type Err = ExpoBumpError;

    fn from_str(s: &str) -> Result<Self> {
        ReleaseType::ALL
            .iter()
            .copied()
            .find(|release| release.as_str() == s)
            .ok_or_else(|| {
                ExpoBumpError::usage(format!(
                    "Unknown release type '{}': expected one of major, minor, patch, premajor, preminor, prepatch, prerelease",
                    s
                ))
            })
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
