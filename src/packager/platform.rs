//! Platform target identifiers and host-platform resolution.
//!
//! A platform target combines an OS family with an architecture suffix, e.g.
//! `linux64` or `win32`. The family is derived by stripping the trailing
//! digits from the identifier, so every target maps to exactly one family.

use crate::packager::error::{Error, Result};
use serde::Deserialize;

/// An OS family + architecture identifier such as `"linux64"` or `"osx64"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct PlatformTarget(String);

impl PlatformTarget {
    /// Creates a platform target from its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the full identifier, e.g. `"linux64"`.
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Returns the OS family, derived by stripping trailing digits.
    ///
    /// `"linux64"` → `"linux"`, `"win32"` → `"win"`.
    pub fn family(&self) -> &str {
        self.0.trim_end_matches(|c: char| c.is_ascii_digit())
    }
}

impl std::fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlatformTarget {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Returns the platform targets suitable for the given host OS.
///
/// Used when the caller supplies no explicit platform list: the concrete
/// 32-/64-bit variants for the OS the packager itself runs on are
/// substituted. Accepts both Rust (`std::env::consts::OS`) and Node-style
/// host names since configuration may carry either.
///
/// # Errors
///
/// [`Error::UnsupportedHostPlatform`] if the host OS has no known target set.
pub fn suitable_platforms(host_os: &str) -> Result<Vec<PlatformTarget>> {
    let ids: &[&str] = match host_os {
        "macos" | "darwin" => &["osx64"],
        "linux" => &["linux32", "linux64"],
        "windows" | "win32" => &["win32", "win64"],
        other => return Err(Error::UnsupportedHostPlatform(other.to_string())),
    };
    Ok(ids.iter().map(|id| PlatformTarget::new(*id)).collect())
}

/// Returns the platform targets suitable for the OS this process runs on.
pub fn host_platforms() -> Result<Vec<PlatformTarget>> {
    suitable_platforms(std::env::consts::OS)
}
