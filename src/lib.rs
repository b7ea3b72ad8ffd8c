//! Multi-platform packager for built desktop application bundles.
//!
//! Takes the per-platform build output of an external build tool and turns
//! it into distributable artifacts:
//! - compressed archives (tar, tar.gz, zip)
//! - stubs for OS installer formats (deb, rpm, pkg, inno_setup), reserved
//!   for future backends
//!
//! Packaging runs as concurrent, independently-failing jobs joined into a
//! single aggregate result. It can be used both as a CLI tool and as a
//! library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{AppdistError, CliError};
pub use packager::{BuildOptions, PackageOverrides, Packager, PackagerConfig};
