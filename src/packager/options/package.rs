//! Packaging options: per-target package-type and pre-action configuration.
//!
//! Configuration is layered. Built-in defaults exist per OS family; user
//! entries overlay them key-by-key, never replacing a whole target block.
//! At lookup time the OS-family layer and the exact-platform layer are
//! merged as a union: both fire if both enable something.

use crate::packager::package_type::PackageType;
use crate::packager::platform::PlatformTarget;
use crate::packager::pre_action::PreAction;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Default package-name template: `<app>-<version>-<platform>`.
pub const DEFAULT_PACKAGE_NAME: &str = "%a%-%v%-%p%";

/// Enabled pre-actions and package types for one target key.
///
/// A target key is either an OS family (`"linux"`) or an exact platform
/// identifier (`"linux64"`).
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct TargetConfig {
    /// Pre-action → enabled.
    #[serde(default)]
    pub pre: BTreeMap<PreAction, bool>,

    /// Package type → enabled.
    #[serde(default)]
    pub packages: BTreeMap<PackageType, bool>,
}

impl TargetConfig {
    /// Overlays `other` onto `self` entry-by-entry.
    fn overlay(&mut self, other: &TargetConfig) {
        for (&action, &enabled) in &other.pre {
            self.pre.insert(action, enabled);
        }
        for (&package_type, &enabled) in &other.packages {
            self.packages.insert(package_type, enabled);
        }
    }
}

/// User-supplied packaging options, overlaid onto the built-in defaults.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PackageOverrides {
    /// Package-name template override.
    #[serde(default)]
    pub package_name: Option<String>,

    /// Restrict packaging to platforms suitable for the host OS.
    #[serde(default)]
    pub current_os_only: Option<bool>,

    /// Per-target configuration overrides, keyed by OS family or exact
    /// platform identifier.
    #[serde(default, flatten)]
    pub targets: BTreeMap<String, TargetConfig>,
}

/// Fully-merged packaging options for one orchestration pass.
#[derive(Clone, Debug)]
pub struct PackageOptions {
    /// Package-name template with `%a%`, `%v%`, `%p%` placeholders.
    pub package_name: String,

    /// Ignore the configured platform list and package for the host OS only.
    pub current_os_only: bool,

    /// Per-target configuration, keyed by OS family or exact platform id.
    pub targets: BTreeMap<String, TargetConfig>,
}

impl Default for PackageOptions {
    /// Built-in defaults: Linux gets a desktop entry plus deb and tar.gz,
    /// macOS gets pkg and zip, Windows gets inno_setup and zip.
    fn default() -> Self {
        let mut targets = BTreeMap::new();

        targets.insert(
            "linux".to_string(),
            TargetConfig {
                pre: BTreeMap::from([(PreAction::DesktopFile, true)]),
                packages: BTreeMap::from([
                    (PackageType::Deb, true),
                    (PackageType::Rpm, false),
                    (PackageType::Tar, false),
                    (PackageType::TarGz, true),
                    (PackageType::Zip, false),
                ]),
            },
        );
        targets.insert(
            "osx".to_string(),
            TargetConfig {
                pre: BTreeMap::new(),
                packages: BTreeMap::from([
                    (PackageType::Pkg, true),
                    (PackageType::Tar, false),
                    (PackageType::TarGz, false),
                    (PackageType::Zip, true),
                ]),
            },
        );
        targets.insert(
            "win".to_string(),
            TargetConfig {
                pre: BTreeMap::new(),
                packages: BTreeMap::from([
                    (PackageType::InnoSetup, true),
                    (PackageType::Tar, false),
                    (PackageType::TarGz, false),
                    (PackageType::Zip, true),
                ]),
            },
        );

        Self {
            package_name: DEFAULT_PACKAGE_NAME.to_string(),
            current_os_only: false,
            targets,
        }
    }
}

impl PackageOptions {
    /// Merges user overrides over the built-in defaults, key-by-key.
    ///
    /// A user target block only touches the entries it names; the rest of
    /// the default block survives.
    pub fn from_user(overrides: PackageOverrides) -> Self {
        let mut options = Self::default();

        if let Some(package_name) = overrides.package_name {
            options.package_name = package_name;
        }
        if let Some(current_os_only) = overrides.current_os_only {
            options.current_os_only = current_os_only;
        }
        for (key, config) in &overrides.targets {
            options
                .targets
                .entry(key.clone())
                .or_default()
                .overlay(config);
        }

        options
    }

    /// Pre-actions enabled for a platform: the union of its OS-family entry
    /// and its exact-platform entry.
    pub fn enabled_pre_actions(&self, platform: &PlatformTarget) -> Vec<PreAction> {
        let mut enabled = BTreeSet::new();
        for key in [platform.family(), platform.id()] {
            if let Some(config) = self.targets.get(key) {
                for (&action, &on) in &config.pre {
                    if on {
                        enabled.insert(action);
                    }
                }
            }
        }
        enabled.into_iter().collect()
    }

    /// Package types enabled for a platform: the union of its OS-family
    /// entry and its exact-platform entry. Exact-platform entries supplement
    /// family entries, they do not replace them.
    pub fn enabled_packages(&self, platform: &PlatformTarget) -> Vec<PackageType> {
        let mut enabled = BTreeSet::new();
        for key in [platform.family(), platform.id()] {
            if let Some(config) = self.targets.get(key) {
                for (&package_type, &on) in &config.packages {
                    if on {
                        enabled.insert(package_type);
                    }
                }
            }
        }
        enabled.into_iter().collect()
    }
}
