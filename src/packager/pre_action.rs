//! Pre-packaging actions applied to a platform build output directory.
//!
//! A pre-action mutates the build output before any package job for that
//! platform reads it. Exactly one action is defined: generating a
//! freedesktop.org desktop entry for Linux targets. Each action writes
//! exactly one file and must not touch anything else in the directory.

use crate::packager::error::{Error, ErrorExt, Result};
use crate::packager::reporter::{Event, Reporter};
use serde::de::{self, Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::io::AsyncWriteExt;

/// A named preparatory transformation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreAction {
    /// Write a `.desktop` launcher entry into the build output directory.
    DesktopFile,
}

impl PreAction {
    /// Returns the configuration token for this action.
    pub fn token(&self) -> &'static str {
        match self {
            PreAction::DesktopFile => "desktop_file",
        }
    }
}

impl std::fmt::Display for PreAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for PreAction {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "desktop_file" => Ok(PreAction::DesktopFile),
            other => Err(Error::InvalidPreActionType(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for PreAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(de::Error::custom)
    }
}

/// Application metadata a pre-action draws from.
///
/// `version` is the base version; a pre-release flavor split off the version
/// string is carried separately for consumers that want it (e.g. a future
/// installer backend).
#[derive(Clone, Debug)]
pub struct PreActionContext {
    /// Application name, also the executable name inside the build output.
    pub app_name: String,
    /// Base application version (flavor stripped).
    pub version: String,
    /// Pre-release flavor tag, if the version string carried one.
    pub flavor: Option<String>,
    /// Short description used for the desktop entry comment.
    pub description: Option<String>,
    /// Icon path, written into the entry when present.
    pub icon: Option<PathBuf>,
}

/// Runs one pre-action against a platform build output directory.
pub async fn run_pre_action(
    action: PreAction,
    build_output_dir: &Path,
    context: &PreActionContext,
    platform: &str,
    reporter: &dyn Reporter,
) -> Result<()> {
    match action {
        PreAction::DesktopFile => write_desktop_file(build_output_dir, context).await?,
    }
    reporter.report(Event::PreActionFinished {
        platform: platform.to_string(),
        action,
    });
    Ok(())
}

/// Writes `<app_name>.desktop` into the build output directory.
async fn write_desktop_file(build_output_dir: &Path, context: &PreActionContext) -> Result<()> {
    let desktop_path = build_output_dir.join(format!("{}.desktop", context.app_name));
    log::debug!("Writing desktop entry {}", desktop_path.display());

    let mut file = tokio::fs::File::create(&desktop_path)
        .await
        .fs_context("creating desktop entry", &desktop_path)?;

    file.write_all(b"[Desktop Entry]\n").await?;
    file.write_all(b"Type=Application\n").await?;
    file.write_all(format!("Name={}\n", context.app_name).as_bytes())
        .await?;
    file.write_all(format!("Version={}\n", context.version).as_bytes())
        .await?;
    file.write_all(format!("Exec={}\n", context.app_name).as_bytes())
        .await?;

    if let Some(icon) = &context.icon {
        file.write_all(format!("Icon={}\n", icon.display()).as_bytes())
            .await?;
    }
    if let Some(description) = &context.description {
        file.write_all(format!("Comment={description}\n").as_bytes())
            .await?;
    }

    file.write_all(b"Terminal=false\n").await?;
    file.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::reporter::test_support::MemoryReporter;
    use std::fs;
    use tempfile::tempdir;

    fn context() -> PreActionContext {
        PreActionContext {
            app_name: "App".to_string(),
            version: "1.2.0".to_string(),
            flavor: Some("beta".to_string()),
            description: Some("An example app".to_string()),
            icon: Some(PathBuf::from("icon.png")),
        }
    }

    #[test]
    fn unknown_action_token_is_invalid() {
        match "make_icons".parse::<PreAction>() {
            Err(Error::InvalidPreActionType(token)) => assert_eq!(token, "make_icons"),
            other => panic!("expected InvalidPreActionType, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn desktop_file_is_the_only_file_written() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("App"), "binary").unwrap();
        let reporter = MemoryReporter::default();

        run_pre_action(
            PreAction::DesktopFile,
            dir.path(),
            &context(),
            "linux64",
            &reporter,
        )
        .await
        .unwrap();

        let contents = fs::read_to_string(dir.path().join("App.desktop")).unwrap();
        assert!(contents.starts_with("[Desktop Entry]\n"));
        assert!(contents.contains("Name=App\n"));
        assert!(contents.contains("Version=1.2.0\n"));
        assert!(contents.contains("Exec=App\n"));
        assert!(contents.contains("Icon=icon.png\n"));
        assert!(contents.contains("Comment=An example app\n"));

        // Only the pre-existing binary and the new entry remain
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
        assert_eq!(
            reporter.events(),
            vec![Event::PreActionFinished {
                platform: "linux64".to_string(),
                action: PreAction::DesktopFile,
            }]
        );
    }
}
