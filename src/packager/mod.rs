//! Core packaging engine.
//!
//! Packages a built desktop application bundle into distributable artifacts
//! per target platform:
//!
//! 1. The external build collaborator ([`BuildTool`]) produces per-platform
//!    build output under `<build_dir>/<app>/<platform>`.
//! 2. The [`Packager`] resolves the platform set, runs enabled pre-actions
//!    (e.g. desktop entry generation) against each build output directory,
//!    and dispatches enabled package types.
//! 3. Archive types (tar, tar.gz, zip) are compressed by the archive
//!    builder; installer types (deb, rpm, pkg, inno_setup) are reserved and
//!    skipped with a notice.
//!
//! All jobs run as independent tokio tasks, joined into one aggregate
//! result.

pub mod archive;
pub mod build_tool;
pub mod error;
pub mod options;
pub mod orchestrator;
pub mod package_type;
pub mod platform;
pub mod pre_action;
pub mod reporter;

pub use archive::{ArchiveFormat, build_archive};
pub use build_tool::{BuildTool, CommandBuildTool};
pub use error::{Context, Error, ErrorExt, Result};
pub use options::{BuildOptions, PackageOptions, PackageOverrides, PackagerConfig, TargetConfig};
pub use orchestrator::Packager;
pub use package_type::{PackageType, make_package};
pub use platform::{PlatformTarget, host_platforms, suitable_platforms};
pub use pre_action::{PreAction, PreActionContext, run_pre_action};
pub use reporter::{Event, LogReporter, Reporter};
