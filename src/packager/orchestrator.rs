//! Packaging orchestration.
//!
//! The [`Packager`] owns the merged packaging options for one invocation.
//! `package()` resolves the platform set, plans the enabled pre-actions and
//! package jobs per platform, launches everything as independent tokio tasks
//! and joins them into a single aggregate result.
//!
//! Ordering: platforms run concurrently with no ordering between them. Within
//! one platform, every pre-action is joined before any package job is
//! launched, because pre-actions mutate the very directory package jobs read.
//! On failure the orchestrator still drains every launched job, then surfaces
//! the first failure in launch order; the rest are logged and reported, not
//! silently discarded.

use crate::packager::build_tool::BuildTool;
use crate::packager::error::{Error, Result};
use crate::packager::options::{
    BuildOptions, PackageOptions, PackageOverrides, name,
};
use crate::packager::package_type::{self, PackageType};
use crate::packager::platform::{self, PlatformTarget};
use crate::packager::pre_action::{self, PreAction, PreActionContext};
use crate::packager::reporter::{Event, LogReporter, Reporter};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// All work planned for one platform in one orchestration pass.
#[derive(Clone, Debug)]
struct PlatformPlan {
    platform: PlatformTarget,
    /// Build output directory the jobs read (and pre-actions mutate).
    input_dir: PathBuf,
    /// Resolved package path without extension.
    output_base: PathBuf,
    pre_actions: Vec<PreAction>,
    packages: Vec<PackageType>,
    context: PreActionContext,
}

/// Packaging orchestrator.
///
/// Wraps an external [`BuildTool`] collaborator and packages its per-platform
/// build output according to the merged [`PackageOptions`]. No state is
/// retained across invocations; each `package()` call plans its jobs afresh.
pub struct Packager<B: BuildTool> {
    build_tool: B,
    options: PackageOptions,
    reporter: Arc<dyn Reporter>,
}

impl<B: BuildTool> Packager<B> {
    /// Creates a packager, overlaying user packaging options onto the
    /// built-in per-OS defaults key-by-key.
    pub fn new(build_tool: B, overrides: PackageOverrides) -> Self {
        Self {
            build_tool,
            options: PackageOptions::from_user(overrides),
            reporter: Arc::new(LogReporter),
        }
    }

    /// Replaces the progress reporter (default: [`LogReporter`]).
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Returns the merged packaging options.
    pub fn package_options(&self) -> &PackageOptions {
        &self.options
    }

    /// Returns the build collaborator's options.
    pub fn build_options(&self) -> &BuildOptions {
        self.build_tool.options()
    }

    /// Builds the application via the external collaborator.
    pub async fn build(&self) -> Result<()> {
        self.reporter.report(Event::BuildStarted);
        self.build_tool.build().await?;
        self.reporter.report(Event::BuildFinished);
        Ok(())
    }

    /// Launches the built application without packaging it.
    pub async fn run(&self) -> Result<()> {
        self.build_tool.run().await
    }

    /// Packages the build output for every resolved platform.
    ///
    /// Completes with no payload once every launched job settled
    /// successfully; otherwise fails with the first error in launch order
    /// after all jobs settled.
    pub async fn package(&self) -> Result<()> {
        let platforms = self.resolve_platforms()?;
        self.reporter.report(Event::PackagingStarted {
            platforms: platforms.iter().map(|p| p.id().to_string()).collect(),
        });

        // Plan first: configuration errors surface before anything launches.
        let mut plans = Vec::with_capacity(platforms.len());
        for platform in &platforms {
            plans.push(self.plan_platform(platform)?);
        }

        let mut handles: Vec<(String, JoinHandle<Result<()>>)> =
            Vec::with_capacity(plans.len());
        for plan in plans {
            let id = plan.platform.id().to_string();
            let reporter = Arc::clone(&self.reporter);
            handles.push((id, tokio::spawn(run_platform(plan, reporter))));
        }

        let mut failures: Vec<(String, Error)> = Vec::new();
        for (platform, handle) in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => failures.push((platform, e)),
                Err(e) => failures.push((
                    platform.clone(),
                    Error::GenericError(format!("packaging task for {platform} panicked: {e}")),
                )),
            }
        }

        let mut failures = failures.into_iter();
        match failures.next() {
            None => {
                self.reporter.report(Event::PackagingFinished);
                Ok(())
            }
            Some((platform, first)) => {
                log::error!("[{platform}] packaging failed: {first}");
                for (platform, error) in failures {
                    self.reporter.report(Event::JobFailed {
                        platform,
                        message: error.to_string(),
                    });
                }
                Err(first)
            }
        }
    }

    /// Resolves the platform set for this invocation.
    ///
    /// An explicitly supplied list is used as-is; an empty list or the
    /// "current OS only" flag substitutes the variants suitable for the host
    /// OS, which fails with [`Error::UnsupportedHostPlatform`] on hosts with
    /// no known target set.
    fn resolve_platforms(&self) -> Result<Vec<PlatformTarget>> {
        let requested = &self.build_tool.options().platforms;
        if requested.is_empty() || self.options.current_os_only {
            platform::host_platforms()
        } else {
            Ok(requested.clone())
        }
    }

    /// Plans the pre-actions and package jobs for one platform.
    fn plan_platform(&self, platform: &PlatformTarget) -> Result<PlatformPlan> {
        let build = self.build_tool.options();
        let package_name = name::resolve_package_name(
            &self.options.package_name,
            &build.app_name,
            &build.app_version,
            platform.id(),
        )?;
        let (version, flavor) = name::split_version(&build.app_version);

        Ok(PlatformPlan {
            platform: platform.clone(),
            input_dir: build.platform_output_dir(platform),
            output_base: build.build_dir.join(package_name),
            pre_actions: self.options.enabled_pre_actions(platform),
            packages: self.options.enabled_packages(platform),
            context: PreActionContext {
                app_name: build.app_name.clone(),
                version: version.to_string(),
                flavor: flavor.map(str::to_string),
                description: build.description.clone(),
                icon: build.icon.clone(),
            },
        })
    }
}

/// Runs all of one platform's jobs: pre-actions first, joined as a hard
/// barrier, then the package jobs.
async fn run_platform(plan: PlatformPlan, reporter: Arc<dyn Reporter>) -> Result<()> {
    let platform = plan.platform.id().to_string();

    let pre_handles: Vec<JoinHandle<Result<()>>> = plan
        .pre_actions
        .iter()
        .map(|&action| {
            let input = plan.input_dir.clone();
            let context = plan.context.clone();
            let platform = platform.clone();
            let reporter = Arc::clone(&reporter);
            tokio::spawn(async move {
                pre_action::run_pre_action(action, &input, &context, &platform, reporter.as_ref())
                    .await
            })
        })
        .collect();

    // Every pre-action must be observed-complete before package jobs read
    // the build output directory.
    if let Some(first) = settle(&platform, pre_handles).await {
        return Err(first);
    }

    let package_handles: Vec<JoinHandle<Result<()>>> = plan
        .packages
        .iter()
        .map(|&ty| {
            let input = plan.input_dir.clone();
            let output_base = plan.output_base.clone();
            let platform = platform.clone();
            let reporter = Arc::clone(&reporter);
            tokio::spawn(async move {
                package_type::make_package(ty, &input, &output_base, &platform, reporter.as_ref())
                    .await
                    .map(|_| ())
            })
        })
        .collect();

    match settle(&platform, package_handles).await {
        Some(first) => Err(first),
        None => Ok(()),
    }
}

/// Awaits every handle in launch order and returns the first failure, if
/// any, logging the remainder.
async fn settle(platform: &str, handles: Vec<JoinHandle<Result<()>>>) -> Option<Error> {
    let mut failures = Vec::new();
    for handle in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => failures.push(e),
            Err(e) => failures.push(Error::GenericError(format!(
                "job for {platform} panicked: {e}"
            ))),
        }
    }

    let mut failures = failures.into_iter();
    let first = failures.next()?;
    for error in failures {
        log::warn!("[{platform}] additional failure: {error}");
    }
    Some(first)
}
