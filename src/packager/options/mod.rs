//! Configuration structures for packaging runs.
//!
//! Two logical sections: build options handed to the external build
//! collaborator, and packaging options controlling which artifacts are
//! produced per target. Both deserialize from a single config file.

mod build;
pub mod name;
mod package;

pub use build::BuildOptions;
pub use package::{DEFAULT_PACKAGE_NAME, PackageOptions, PackageOverrides, TargetConfig};

use crate::packager::error::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration file contents.
#[derive(Debug, Deserialize)]
pub struct PackagerConfig {
    /// Options for the external build collaborator.
    pub build: BuildOptions,

    /// Packaging option overrides, overlaid onto built-in defaults.
    #[serde(default)]
    pub package: PackageOverrides,
}

impl PackagerConfig {
    /// Loads a configuration file, dispatching on extension: `.json` is
    /// parsed as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .context(&format!("reading config file {}", path.display()))?;

        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&raw).context("parsing JSON config")
        } else {
            toml::from_str(&raw).context("parsing TOML config")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn toml_config_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("appdist.toml");
        fs::write(
            &path,
            r#"
                [build]
                app_name = "App"
                app_version = "1.2.0-beta"
                platforms = ["linux64"]

                [package]
                current_os_only = false

                [package.linux.packages]
                zip = true
            "#,
        )
        .unwrap();

        let config = PackagerConfig::load(&path).unwrap();
        assert_eq!(config.build.app_name, "App");
        assert_eq!(config.build.platforms.len(), 1);
        assert!(config.package.targets.contains_key("linux"));
    }

    #[test]
    fn json_config_is_parsed_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("appdist.json");
        fs::write(
            &path,
            r#"{
                "build": { "app_name": "App", "app_version": "1.0.0" },
                "package": { "package_name": "%a%-%p%" }
            }"#,
        )
        .unwrap();

        let config = PackagerConfig::load(&path).unwrap();
        assert_eq!(config.package.package_name.as_deref(), Some("%a%-%p%"));
    }
}
