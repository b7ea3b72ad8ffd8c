//! External build collaborator.
//!
//! The packager does not compile or assemble the application itself; it
//! invokes an external build tool and waits for it, then reads the tool's
//! options back to locate per-platform build output. The collaborator is
//! opaque: any failure it reports is propagated unmodified as
//! [`Error::Build`].

use crate::packager::error::{Error, Result};
use crate::packager::options::BuildOptions;
use std::path::PathBuf;

/// Interface the orchestrator consumes from the build collaborator.
pub trait BuildTool: Send + Sync {
    /// The resolved build options, readable after [`BuildTool::build`]
    /// completes.
    fn options(&self) -> &BuildOptions;

    /// Builds the application into per-platform output directories.
    fn build(&self) -> impl Future<Output = Result<()>> + Send;

    /// Launches the built application without packaging it.
    fn run(&self) -> impl Future<Output = Result<()>> + Send;
}

/// Build collaborator backed by an external builder program.
///
/// The program is invoked once per operation with the resolved options on
/// its command line; a non-zero exit status is a build failure.
#[derive(Clone, Debug)]
pub struct CommandBuildTool {
    program: PathBuf,
    options: BuildOptions,
}

impl CommandBuildTool {
    /// Creates a collaborator invoking `program` with the given options.
    pub fn new(program: impl Into<PathBuf>, options: BuildOptions) -> Self {
        Self {
            program: program.into(),
            options,
        }
    }

    async fn invoke(&self, subcommand: &str) -> Result<()> {
        let platforms: Vec<&str> = self
            .options
            .platforms
            .iter()
            .map(|p| p.id())
            .collect();

        let mut command = tokio::process::Command::new(&self.program);
        command
            .arg(subcommand)
            .arg("--app-name")
            .arg(&self.options.app_name)
            .arg("--app-version")
            .arg(&self.options.app_version)
            .arg("--build-dir")
            .arg(&self.options.build_dir)
            .arg("--cache-dir")
            .arg(self.options.resolved_cache_dir())
            .arg("--platforms")
            .arg(platforms.join(","))
            .args(self.options.resolved_file_globs());

        log::debug!("Invoking build tool: {command:?}");

        let status = command
            .status()
            .await
            .map_err(|e| Error::Build(format!("failed to spawn {}: {e}", self.program.display())))?;

        if !status.success() {
            return Err(Error::Build(format!(
                "{} {subcommand} exited with {status}",
                self.program.display()
            )));
        }
        Ok(())
    }
}

impl BuildTool for CommandBuildTool {
    fn options(&self) -> &BuildOptions {
        &self.options
    }

    async fn build(&self) -> Result<()> {
        self.invoke("build").await
    }

    async fn run(&self) -> Result<()> {
        self.invoke("run").await
    }
}
