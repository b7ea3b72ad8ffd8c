//! Command line argument parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Packages built desktop application bundles into distributable artifacts
#[derive(Parser, Debug)]
#[command(
    name = "appdist",
    version,
    about = "Packages built desktop application bundles into distributable artifacts",
    long_about = "Invokes an external build tool, then packages its per-platform build output
into distributable artifacts (tar, tar.gz, zip; installer formats reserved).

Usage:
  appdist --config appdist.toml --builder ./builder
  appdist --config appdist.json --builder ./builder --skip-build
  appdist --config appdist.toml --builder ./builder --run

Packages are emitted next to the build output, named from the configured
package-name template."
)]
pub struct Args {
    /// Configuration file (TOML or JSON, chosen by extension)
    #[arg(short, long, value_name = "FILE", default_value = "appdist.toml")]
    pub config: PathBuf,

    /// External builder program invoked to build the application
    #[arg(short, long, value_name = "PROGRAM", env = "APPDIST_BUILDER")]
    pub builder: PathBuf,

    /// Package existing build output without rebuilding
    #[arg(long)]
    pub skip_build: bool,

    /// Build and launch the application instead of packaging it
    #[arg(long)]
    pub run: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.run && self.skip_build {
            return Err("--run and --skip-build are mutually exclusive".to_string());
        }
        if !self.config.exists() {
            return Err(format!("config file not found: {}", self.config.display()));
        }
        Ok(())
    }
}
