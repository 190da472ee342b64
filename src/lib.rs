//! # olca_packager
//!
//! Creates the openLCA distribution packages for Linux and macOS from the
//! pre-built Eclipse application zips of a build project.
//!
//! ## Features
//!
//! - **Version label**: `<version>_<YYYY-MM-DD>` from `build.properties`
//! - **Platform assemblers**: JRE, legal files and `.ini` placed per platform
//! - **Two archivers**: in-process zip/tar/gzip or an external 7-Zip
//! - **Per-platform isolation**: a failed platform does not stop the next one
//!
//! ## Usage
//!
//! ```bash
//! olca_packager                         # package Linux and macOS
//! olca_packager --platform linux        # Linux only
//! olca_packager --archiver 7zip         # use the bundled 7za
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

// Core modules
pub mod bundler;
pub mod cli;
pub mod config;
pub mod error;
pub mod version;

// Re-export main types for public API
pub use bundler::{BundledArtifact, Bundler, PackagingReport, Platform, Settings, SettingsBuilder};
pub use cli::Args;
pub use config::PackagerConfig;
pub use error::{CliError, ConfigError, PackagerError, Result};
pub use version::{parse_version, resolve_version, version_label};
