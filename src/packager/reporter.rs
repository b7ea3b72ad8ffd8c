//! Progress reporting for packaging runs.
//!
//! The orchestrator emits [`Event`]s through an injected [`Reporter`] instead
//! of writing to the process console, so library consumers and tests can
//! observe progress without capturing output. The default [`LogReporter`]
//! forwards everything to the `log` facade.

use crate::packager::package_type::PackageType;
use crate::packager::pre_action::PreAction;
use std::path::PathBuf;

/// A progress event emitted during a packaging run.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// The external build collaborator was invoked.
    BuildStarted,
    /// The external build collaborator completed successfully.
    BuildFinished,
    /// Packaging started for the listed platform identifiers.
    PackagingStarted {
        /// Resolved platform identifiers, in launch order.
        platforms: Vec<String>,
    },
    /// A pre-action finished mutating a platform's build output directory.
    PreActionFinished {
        /// Platform the action ran for.
        platform: String,
        /// The action that completed.
        action: PreAction,
    },
    /// A reserved (not yet implemented) package type was requested.
    ///
    /// Informational only: no artifact was produced and the run continues.
    ReservedPackageType {
        /// Platform the package was requested for.
        platform: String,
        /// The reserved package type.
        package_type: PackageType,
    },
    /// An archive artifact was written.
    ArchiveCreated {
        /// Platform the archive was built for.
        platform: String,
        /// Path of the created archive.
        path: PathBuf,
    },
    /// A launched job failed.
    ///
    /// Emitted for every failure beyond the first, which is surfaced as the
    /// aggregate result instead.
    JobFailed {
        /// Platform the failing job belonged to.
        platform: String,
        /// Rendered failure message.
        message: String,
    },
    /// All launched jobs settled successfully.
    PackagingFinished,
}

/// Observer for packaging progress.
pub trait Reporter: Send + Sync {
    /// Receives one progress event.
    fn report(&self, event: Event);
}

/// Default reporter forwarding events to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, event: Event) {
        match event {
            Event::BuildStarted => log::info!("Building app..."),
            Event::BuildFinished => log::info!("Build finished"),
            Event::PackagingStarted { platforms } => {
                log::info!("Packaging app for {}", platforms.join(", "));
            }
            Event::PreActionFinished { platform, action } => {
                log::info!("[{platform}] pre-action {action} finished");
            }
            Event::ReservedPackageType {
                platform,
                package_type,
            } => {
                log::info!("[{platform}] {package_type} support coming soon, skipping");
            }
            Event::ArchiveCreated { platform, path } => {
                log::info!("[{platform}] created {}", path.display());
            }
            Event::JobFailed { platform, message } => {
                log::warn!("[{platform}] job failed: {message}");
            }
            Event::PackagingFinished => log::info!("Packaging finished"),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::Mutex;

    /// Collects events in memory for assertions.
    #[derive(Debug, Default)]
    pub struct MemoryReporter {
        events: Mutex<Vec<Event>>,
    }

    impl MemoryReporter {
        pub fn events(&self) -> Vec<Event> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Reporter for MemoryReporter {
        fn report(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
    }
}
