//! The app configuration document (`app.json` / `exp.json`).
//!
//! The document is kept as a [`serde_json::Value`] so that keys expo-bump
//! does not know about survive a round trip untouched and in their original
//! order.

use crate::domain::{version, ReleaseType};
use crate::error::{ExpoBumpError, Result};
use log::debug;
use semver::Version;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Which of the platform-specific counters to update alongside `version`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformFlags {
    pub android: bool,
    pub ios: bool,
}

/// Result of a version bump
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bump {
    pub old_version: String,
    pub new_version: Version,
}

/// A loaded configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Value,
    /// When set, the whole document is the Expo config; otherwise it lives under `expo`.
    exp: bool,
}

impl Manifest {
    /// Reads and parses the document at `path`.
    pub fn load(path: &Path, exp: bool) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            ExpoBumpError::manifest(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::from_slice(&bytes, exp)
    }

    pub fn from_slice(bytes: &[u8], exp: bool) -> Result<Self> {
        let root: Value = serde_json::from_slice(bytes)?;
        let manifest = Manifest { root, exp };
        // Fail early on a document that has no usable version.
        manifest.version()?;
        Ok(manifest)
    }

    fn target(&self) -> Result<&Map<String, Value>> {
        let node = if self.exp {
            &self.root
        } else {
            self.root
                .get("expo")
                .ok_or_else(|| ExpoBumpError::manifest("Missing \"expo\" key"))?
        };
        node.as_object()
            .ok_or_else(|| ExpoBumpError::manifest("Expo config must be a JSON object"))
    }

    fn target_mut(&mut self) -> Result<&mut Map<String, Value>> {
        let node = if self.exp {
            &mut self.root
        } else {
            self.root
                .get_mut("expo")
                .ok_or_else(|| ExpoBumpError::manifest("Missing \"expo\" key"))?
        };
        node.as_object_mut()
            .ok_or_else(|| ExpoBumpError::manifest("Expo config must be a JSON object"))
    }

    /// The raw `version` string of the Expo config.
    pub fn version_str(&self) -> Result<&str> {
        self.target()?
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| ExpoBumpError::manifest("\"version\" must be a string"))
    }

    pub fn version(&self) -> Result<Version> {
        version::parse(self.version_str()?)
    }

    pub fn set_version(&mut self, next: &Version) -> Result<()> {
        self.target_mut()?
            .insert("version".to_string(), Value::String(next.to_string()));
        Ok(())
    }

    /// `android.versionCode`, if an `android` block is present.
    pub fn android_version_code(&self) -> Option<i64> {
        self.target()
            .ok()?
            .get("android")?
            .get("versionCode")?
            .as_i64()
    }

    /// `ios.buildNumber`, if an `ios` block is present.
    pub fn ios_build_number(&self) -> Option<&str> {
        self.target().ok()?.get("ios")?.get("buildNumber")?.as_str()
    }

    /// Applies `release` to the document in memory.
    ///
    /// With `platforms.android`, an existing `android` block gets its
    /// `versionCode` incremented by one. With `platforms.ios`, an existing
    /// `ios` block gets `buildNumber` set to the new version. Absent blocks
    /// are left alone.
    pub fn bump(
        &mut self,
        release: ReleaseType,
        preid: Option<&str>,
        platforms: PlatformFlags,
    ) -> Result<Bump> {
        let old_version = self.version_str()?.to_string();
        let new_version = version::increment(&self.version()?, release, preid)?;
        self.set_version(&new_version)?;

        let target = self.target_mut()?;

        if platforms.android {
            if let Some(android) = target.get_mut("android").and_then(Value::as_object_mut) {
                let code = android
                    .get("versionCode")
                    .and_then(Value::as_i64)
                    .ok_or_else(|| {
                        ExpoBumpError::manifest("\"android.versionCode\" must be an integer")
                    })?;
                android.insert("versionCode".to_string(), Value::from(code + 1));
            }
        }

        if platforms.ios {
            if let Some(ios) = target.get_mut("ios").and_then(Value::as_object_mut) {
                ios.insert(
                    "buildNumber".to_string(),
                    Value::String(new_version.to_string()),
                );
            }
        }

        debug!("bumped {} -> {} ({})", old_version, new_version, release);
        Ok(Bump {
            old_version,
            new_version,
        })
    }

    /// Pretty-printed JSON with two-space indentation and a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.root)?;
        out.push('\n');
        Ok(out)
    }

    /// Writes the whole document to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!("writing {}", path.display());
        fs::write(path, self.to_json()?).map_err(|e| {
            ExpoBumpError::manifest(format!("Cannot write {}: {}", path.display(), e))
        })
    }
}
