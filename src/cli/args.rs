//! Command line argument parsing and validation.
//!
//! Without flags the packager behaves like the release script it replaces:
//! run it from the build project root and it packages Linux, then macOS.

use crate::bundler::{ArchiverKind, Platform};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Creates the openLCA Linux and macOS distribution packages
#[derive(Parser, Debug)]
#[command(
    name = "olca_packager",
    version,
    about = "Creates the openLCA Linux and macOS distribution packages",
    long_about = "Creates the openLCA Linux and macOS distribution packages from the
pre-built application zips, the bundled JRE, the legal files and the .ini templates.

Usage:
  olca_packager
  olca_packager --platform linux
  olca_packager --root ../olca-app-build --archiver 7zip
  olca_packager --date 2024-03-07 --keep-staging"
)]
pub struct Args {
    /// Build project root; every relative location is resolved against it
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Configuration file [default: <ROOT>/packager.toml when present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Platform to package; repeat for several [default: linux, macos]
    #[arg(long, value_enum, value_name = "PLATFORM")]
    pub platform: Vec<Platform>,

    /// Archiver back end [default: native, or the configured one]
    #[arg(long, value_enum, value_name = "ARCHIVER")]
    pub archiver: Option<ArchiverKind>,

    /// Date used in package names instead of today (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Keep the per-platform staging directories after packing
    #[arg(long)]
    pub keep_staging: bool,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only show errors
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}' ({})", value, e))
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("--verbose and --quiet cannot be used together".to_string());
        }

        for (i, platform) in self.platform.iter().enumerate() {
            if self.platform[..i].contains(platform) {
                return Err(format!("platform {} given more than once", platform));
            }
        }

        if !self.root.is_dir() {
            return Err(format!(
                "project root {} is not a directory",
                self.root.display()
            ));
        }

        Ok(())
    }

    /// Default `env_logger` filter for the chosen verbosity.
    ///
    /// Warnings and failures already reach the console through
    /// [`OutputManager`](super::OutputManager), so logs only show with
    /// `--verbose`. `RUST_LOG` still takes precedence.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "off" }
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl RuntimeConfig {
    /// Create runtime configuration
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            output: super::OutputManager::new(verbose, quiet),
        }
    }

    /// Print message
    pub fn println(&self, message: &str) {
        let _ = self.output.println(message);
    }

    /// Print verbose message (only with --verbose)
    pub fn verbose_println(&self, message: &str) {
        let _ = self.output.verbose(message);
    }

    /// Print error message (always shown)
    pub fn error_println(&self, message: &str) {
        self.output.error(message);
    }

    /// Print warning message
    pub fn warning_println(&self, message: &str) {
        let _ = self.output.warn(message);
    }

    /// Print success message
    pub fn success_println(&self, message: &str) {
        let _ = self.output.success(message);
    }

    /// Print a section header
    pub fn section(&self, title: &str) {
        let _ = self.output.section(title);
    }

    /// Print indented text
    pub fn indent(&self, message: &str) {
        let _ = self.output.indent(message);
    }

    /// Check if verbose output is enabled
    pub fn is_verbose(&self) -> bool {
        self.output.is_verbose()
    }
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self::new(args.verbose, args.quiet)
    }
}
