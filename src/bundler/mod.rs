//! Distribution package assembly for openLCA.
//!
//! Turns pre-built per-platform application zips, a bundled JRE, license
//! files and `.ini` templates into `.tar.gz` distribution packages.
//!
//! # Output
//!
//! | Platform | Package | Staging |
//! |----------|---------|---------|
//! | Linux | `packages/openLCA_linux_<version>_<date>.tar.gz` | `packages/linux` |
//! | macOS | `packages/openLCA_macOS_<version>_<date>.tar.gz` | `packages/macos` |
//!
//! An intermediate `.tar` is kept next to each `.tar.gz`.
//!
//! # Integration
//!
//! ```no_run
//! use olca_packager::bundler::{Bundler, SettingsBuilder};
//!
//! # async fn example() -> olca_packager::bundler::Result<()> {
//! let settings = SettingsBuilder::new().root(".").build()?;
//! let report = Bundler::new(settings)?.run().await?;
//! std::process::exit(report.exit_code());
//! # }
//! ```

#![warn(missing_docs)]

pub mod archive;
mod builder;
mod checksum;
mod error;
pub mod platform;
mod report;
mod settings;
pub mod template;
pub mod utils;

// Public re-exports
pub use archive::{AnyArchiver, ArchiveStatus, Archiver, ArchiverKind, NativeArchiver, SevenZip};
pub use builder::Bundler;
pub use checksum::calculate_sha256;
pub use error::{Context, Error, ErrorExt, Result};
pub use platform::Platform;
pub use report::{PackagingReport, PlatformOutcome, PlatformReport, Warning};
pub use settings::{PlatformInputs, Settings, SettingsBuilder, default_seven_zip};

/// A created distribution package.
///
/// # Fields
///
/// - `platform`: The platform the package targets
/// - `paths`: The `.tar.gz` package followed by the intermediate `.tar`
/// - `size`: Size of the `.tar.gz` in bytes
/// - `checksum`: SHA-256 of the `.tar.gz`
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Target platform.
    pub platform: Platform,

    /// Paths of all files created for this package, compressed archive first.
    pub paths: Vec<std::path::PathBuf>,

    /// Size of the compressed archive in bytes.
    pub size: u64,

    /// SHA-256 checksum of the compressed archive.
    ///
    /// Can be published alongside the package for users to verify downloads.
    pub checksum: String,
}
