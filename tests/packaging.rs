//! End-to-end packaging runs against the public library surface.

use appdist::packager::options::TargetConfig;
use appdist::packager::{
    BuildOptions, BuildTool, Event, PackageOverrides, PackageType, Packager, PreAction, Reporter,
    Result,
};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// Build collaborator that treats the pre-seeded build directory as its
/// finished output.
struct PrebuiltTool {
    options: BuildOptions,
}

impl BuildTool for PrebuiltTool {
    fn options(&self) -> &BuildOptions {
        &self.options
    }

    async fn build(&self) -> Result<()> {
        Ok(())
    }

    async fn run(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct CollectingReporter {
    events: Mutex<Vec<Event>>,
}

impl Reporter for CollectingReporter {
    fn report(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

fn seed_build_output(build_dir: &Path, app: &str, platform: &str) {
    let dir = build_dir.join(app).join(platform);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(app), "binary contents").unwrap();
    fs::create_dir_all(dir.join("resources")).unwrap();
    fs::write(dir.join("resources/data.json"), "{}").unwrap();
}

#[tokio::test]
async fn default_linux_run_produces_targz_and_skips_deb() {
    let root = tempdir().unwrap();
    let build_dir = root.path().join("build");
    seed_build_output(&build_dir, "Demo", "linux64");

    let mut build = BuildOptions::new("Demo", "0.3.1");
    build.build_dir = build_dir.clone();
    build.platforms = vec!["linux64".into()];
    build.description = Some("Demo application".to_string());

    let reporter = Arc::new(CollectingReporter::default());
    let packager = Packager::new(PrebuiltTool { options: build }, PackageOverrides::default())
        .with_reporter(reporter.clone());

    packager.build().await.unwrap();
    packager.package().await.unwrap();

    // Linux defaults: deb (reserved, skipped) + tar.gz (produced).
    let archive = build_dir.join("Demo-0.3.1-linux64.tar.gz");
    assert!(archive.exists());
    assert!(!build_dir.join("Demo-0.3.1-linux64.deb").exists());

    let events = reporter.events.lock().unwrap().clone();
    assert!(events.contains(&Event::BuildFinished));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::ReservedPackageType {
            package_type: PackageType::Deb,
            ..
        }
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        Event::PreActionFinished {
            action: PreAction::DesktopFile,
            ..
        }
    )));
    assert!(events.last() == Some(&Event::PackagingFinished));

    // The archive holds the build contents at its root, desktop entry
    // included: the pre-action settled before the package job read the dir.
    let decoder = flate2::read::GzDecoder::new(File::open(&archive).unwrap());
    let mut tar = tar::Archive::new(decoder);
    let names: Vec<String> = tar
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().any(|n| n == "Demo"), "{names:?}");
    assert!(names.iter().any(|n| n == "resources/data.json"), "{names:?}");
    assert!(names.iter().any(|n| n == "Demo.desktop"), "{names:?}");
}

#[tokio::test]
async fn multi_platform_run_packages_every_platform() {
    let root = tempdir().unwrap();
    let build_dir = root.path().join("build");
    for platform in ["linux32", "linux64", "win64"] {
        seed_build_output(&build_dir, "Demo", platform);
    }

    let mut build = BuildOptions::new("Demo", "1.0.0-rc1");
    build.build_dir = build_dir.clone();
    build.platforms = vec!["linux32".into(), "linux64".into(), "win64".into()];

    let mut overrides = PackageOverrides::default();
    // Disable the reserved formats so only archives remain.
    overrides.targets.insert(
        "linux".to_string(),
        TargetConfig {
            pre: BTreeMap::new(),
            packages: BTreeMap::from([(PackageType::Deb, false)]),
        },
    );
    overrides.targets.insert(
        "win".to_string(),
        TargetConfig {
            pre: BTreeMap::new(),
            packages: BTreeMap::from([(PackageType::InnoSetup, false)]),
        },
    );

    let packager = Packager::new(PrebuiltTool { options: build }, overrides);
    packager.package().await.unwrap();

    // Flavor "rc1" stays out of the artifact names.
    assert!(build_dir.join("Demo-1.0.0-linux32.tar.gz").exists());
    assert!(build_dir.join("Demo-1.0.0-linux64.tar.gz").exists());
    assert!(build_dir.join("Demo-1.0.0-win64.zip").exists());
}
