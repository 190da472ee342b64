//! Top-level error types for olca_packager.
//!
//! Packaging failures of a single platform are not errors at this level;
//! they end up in the [`PackagingReport`](crate::bundler::PackagingReport).
//! [`PackagerError`] covers what stops the whole run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for olca_packager operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for olca_packager operations
#[derive(Error, Debug)]
pub enum PackagerError {
    /// Bundler errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    /// Configuration file errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid configuration
    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        /// Configuration file
        path: PathBuf,
        /// TOML error
        #[source]
        source: toml::de::Error,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl PackagerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as BundlerError;

        match self {
            PackagerError::Bundler(e) => match e.root_cause() {
                BundlerError::Fs {
                    context: "reading properties file",
                    path,
                    ..
                } => vec![
                    "Run the packager from the openLCA build project root or pass --root".to_string(),
                    format!("Check that {} exists", path.display()),
                ],
                BundlerError::ToolNotFound(tool) => vec![
                    format!("Install 7-Zip or place the executable at {}", tool),
                    "Use the built-in archiver: --archiver native".to_string(),
                ],
                _ => vec!["Check the error message above for specific details".to_string()],
            },
            PackagerError::Config(ConfigError::Parse { path, .. }) => vec![
                format!("Fix or remove {}", path.display()),
                "Accepted keys: product_name, version_key, properties_file, output_dir, archiver, \
                 seven_zip, readme, licenses_dir, [linux], [macos]"
                    .to_string(),
            ],
            PackagerError::Config(ConfigError::Read { path, .. }) => {
                vec![format!("Check that {} exists and is readable", path.display())]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
