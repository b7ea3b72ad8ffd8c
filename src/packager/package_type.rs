//! Package types and the dispatcher routing them to backends.
//!
//! Routing is an exhaustive match over the closed [`PackageType`] enum rather
//! than a string switch: installer formats are explicit reserved variants, so
//! adding a real backend later only touches [`make_package`], not the
//! orchestrator's dispatch loop.

use crate::packager::archive::{self, ArchiveFormat};
use crate::packager::error::{Error, Result};
use crate::packager::reporter::{Event, Reporter};
use serde::de::{self, Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The kind of artifact a packaging job produces.
///
/// Installer formats (deb, rpm, pkg, inno_setup) are reserved: requesting one
/// succeeds as a no-op after an informational notice, and callers must not
/// treat that as evidence a package was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PackageType {
    /// Debian package (reserved, not yet implemented).
    Deb,
    /// RPM package (reserved, not yet implemented).
    Rpm,
    /// macOS installer package (reserved, not yet implemented).
    Pkg,
    /// Inno Setup Windows installer (reserved, not yet implemented).
    InnoSetup,
    /// Uncompressed tar archive.
    Tar,
    /// Gzipped tar archive.
    TarGz,
    /// Zip archive.
    Zip,
}

impl PackageType {
    /// Returns the configuration token for this package type.
    pub fn token(&self) -> &'static str {
        match self {
            PackageType::Deb => "deb",
            PackageType::Rpm => "rpm",
            PackageType::Pkg => "pkg",
            PackageType::InnoSetup => "inno_setup",
            PackageType::Tar => "tar",
            PackageType::TarGz => "tar.gz",
            PackageType::Zip => "zip",
        }
    }

    /// Returns the archive format for archive kinds, `None` for reserved
    /// installer kinds.
    pub fn archive_format(&self) -> Option<ArchiveFormat> {
        match self {
            PackageType::Tar => Some(ArchiveFormat::Tar),
            PackageType::TarGz => Some(ArchiveFormat::TarGz),
            PackageType::Zip => Some(ArchiveFormat::Zip),
            PackageType::Deb | PackageType::Rpm | PackageType::Pkg | PackageType::InnoSetup => {
                None
            }
        }
    }

    /// Whether this type is reserved for a future installer backend.
    pub fn is_reserved(&self) -> bool {
        self.archive_format().is_none()
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for PackageType {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "deb" => Ok(PackageType::Deb),
            "rpm" => Ok(PackageType::Rpm),
            "pkg" => Ok(PackageType::Pkg),
            "inno_setup" => Ok(PackageType::InnoSetup),
            "tar" => Ok(PackageType::Tar),
            "tar.gz" => Ok(PackageType::TarGz),
            "zip" => Ok(PackageType::Zip),
            other => Err(Error::UnknownPackageType(other.to_string())),
        }
    }
}

// Configuration keys are the same tokens the dispatcher understands, so
// deserialization goes through FromStr for a single error path.
impl<'de> Deserialize<'de> for PackageType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(de::Error::custom)
    }
}

/// Creates a package of the given type from a platform build directory.
///
/// Archive kinds delegate to the archive builder, writing to `output_base`
/// plus the format extension, and return the created path. Reserved kinds
/// emit a [`Event::ReservedPackageType`] notice and return `Ok(None)` without
/// touching the filesystem.
pub async fn make_package(
    package_type: PackageType,
    input_dir: &Path,
    output_base: &Path,
    platform: &str,
    reporter: &dyn Reporter,
) -> Result<Option<PathBuf>> {
    match package_type.archive_format() {
        Some(format) => {
            let path = archive::build_archive(format, input_dir, output_base).await?;
            reporter.report(Event::ArchiveCreated {
                platform: platform.to_string(),
                path: path.clone(),
            });
            Ok(Some(path))
        }
        None => {
            reporter.report(Event::ReservedPackageType {
                platform: platform.to_string(),
                package_type,
            });
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::reporter::test_support::MemoryReporter;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn tokens_round_trip_through_from_str() {
        for ty in [
            PackageType::Deb,
            PackageType::Rpm,
            PackageType::Pkg,
            PackageType::InnoSetup,
            PackageType::Tar,
            PackageType::TarGz,
            PackageType::Zip,
        ] {
            assert_eq!(ty.token().parse::<PackageType>().unwrap(), ty);
        }
    }

    #[test]
    fn unknown_token_carries_the_offending_token() {
        match "msi".parse::<PackageType>() {
            Err(Error::UnknownPackageType(token)) => assert_eq!(token, "msi"),
            other => panic!("expected UnknownPackageType, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn reserved_types_succeed_without_creating_output() {
        let input = tempdir().unwrap();
        fs::write(input.path().join("app"), "bin").unwrap();
        let out = tempdir().unwrap();
        let reporter = MemoryReporter::default();

        for ty in [
            PackageType::Deb,
            PackageType::Rpm,
            PackageType::Pkg,
            PackageType::InnoSetup,
        ] {
            let result = make_package(ty, input.path(), &out.path().join("app"), "linux64", &reporter)
                .await
                .unwrap();
            assert_eq!(result, None);
        }

        // Nothing written, but every skip was announced
        assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
        let reserved = reporter
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::ReservedPackageType { .. }))
            .count();
        assert_eq!(reserved, 4);
    }

    #[tokio::test]
    async fn archive_types_delegate_to_the_archive_builder() {
        let input = tempdir().unwrap();
        fs::write(input.path().join("app"), "bin").unwrap();
        let out = tempdir().unwrap();
        let reporter = MemoryReporter::default();

        let path = make_package(
            PackageType::TarGz,
            input.path(),
            &out.path().join("app-1.0.0-linux64"),
            "linux64",
            &reporter,
        )
        .await
        .unwrap()
        .expect("archive kinds produce a path");

        assert_eq!(path, out.path().join("app-1.0.0-linux64.tar.gz"));
        assert!(path.exists());
        assert!(reporter
            .events()
            .iter()
            .any(|e| matches!(e, Event::ArchiveCreated { .. })));
    }
}
