//! Options passed through to the external build collaborator.

use crate::packager::platform::PlatformTarget;
use serde::Deserialize;
use std::path::PathBuf;

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

/// Inputs for the external build tool, read back by the orchestrator after
/// the build completes.
///
/// The packager only interprets `app_name`, `app_version`, `build_dir` and
/// `platforms`; everything else is handed to the collaborator opaquely.
#[derive(Clone, Debug, Deserialize)]
pub struct BuildOptions {
    /// Application name; also names the per-platform build output directory.
    pub app_name: String,

    /// Application version string, possibly carrying a `-flavor` suffix.
    pub app_version: String,

    /// Directory build artifacts are written to and packages are emitted to.
    ///
    /// Default: `build`
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Side cache directory used by the build collaborator.
    ///
    /// Default: `~/.appdist/cache`
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Platform targets to build and package for.
    ///
    /// Empty means "resolve from the host OS" at packaging time.
    #[serde(default)]
    pub platforms: Vec<PlatformTarget>,

    /// Source file globs handed to the build collaborator.
    ///
    /// Empty means "everything under the working directory except the build
    /// and cache directories".
    #[serde(default)]
    pub files: Vec<String>,

    /// Icon path consumed by the desktop-file pre-action.
    #[serde(default)]
    pub icon: Option<PathBuf>,

    /// Short description consumed by the desktop-file pre-action.
    #[serde(default)]
    pub description: Option<String>,
}

impl BuildOptions {
    /// Creates options with defaults for everything but name and version.
    pub fn new(app_name: impl Into<String>, app_version: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            app_version: app_version.into(),
            build_dir: default_build_dir(),
            cache_dir: None,
            platforms: Vec::new(),
            files: Vec::new(),
            icon: None,
            description: None,
        }
    }

    /// Returns the cache directory, defaulting under the user's home.
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".appdist")
                .join("cache")
        })
    }

    /// Returns the file globs, substituting the default include/exclude list
    /// when the caller gave none.
    ///
    /// The default takes everything under the working directory while
    /// excluding the build output and cache directories.
    pub fn resolved_file_globs(&self) -> Vec<String> {
        if !self.files.is_empty() {
            return self.files.clone();
        }
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        vec![
            format!("{}/**", cwd.display()),
            format!("!{}/**", self.build_dir.display()),
            format!("!{}/**", self.resolved_cache_dir().display()),
        ]
    }

    /// Directory holding one platform's build output:
    /// `<build_dir>/<app_name>/<platform>`.
    pub fn platform_output_dir(&self, platform: &PlatformTarget) -> PathBuf {
        self.build_dir.join(&self.app_name).join(platform.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_globs_exclude_build_and_cache_dirs() {
        let mut options = BuildOptions::new("App", "1.0.0");
        options.cache_dir = Some(PathBuf::from("cache"));

        let globs = options.resolved_file_globs();
        assert_eq!(globs.len(), 3);
        assert!(globs[0].ends_with("/**"));
        assert_eq!(globs[1], "!build/**");
        assert_eq!(globs[2], "!cache/**");
    }

    #[test]
    fn explicit_globs_are_passed_through() {
        let mut options = BuildOptions::new("App", "1.0.0");
        options.files = vec!["src/**".to_string()];
        assert_eq!(options.resolved_file_globs(), vec!["src/**".to_string()]);
    }

    #[test]
    fn platform_output_dir_nests_app_and_platform() {
        let options = BuildOptions::new("App", "1.0.0");
        assert_eq!(
            options.platform_output_dir(&PlatformTarget::new("linux64")),
            PathBuf::from("build/App/linux64")
        );
    }
}
