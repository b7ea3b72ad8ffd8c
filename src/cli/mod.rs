//! Command line interface for appdist.
//!
//! Thin wrapper over the core packaging engine: loads the configuration
//! file, wires up the external build collaborator and runs the requested
//! operation.

mod args;

pub use args::Args;

use crate::error::{CliError, Result};
use crate::packager::{CommandBuildTool, Packager, PackagerConfig};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    if let Err(reason) = args.validate() {
        return Err(CliError::InvalidArguments { reason }.into());
    }

    let config = PackagerConfig::load(&args.config)?;
    let mut build_options = config.build;

    // Resolve the platform set up front so the build collaborator and the
    // packager agree on it.
    if build_options.platforms.is_empty()
        || config.package.current_os_only.unwrap_or(false)
    {
        build_options.platforms = crate::packager::host_platforms()?;
    }

    let build_tool = CommandBuildTool::new(args.builder.clone(), build_options);
    let packager = Packager::new(build_tool, config.package);

    if args.run {
        packager.run().await?;
        return Ok(0);
    }

    if !args.skip_build {
        packager.build().await?;
    }
    packager.package().await?;

    Ok(0)
}
