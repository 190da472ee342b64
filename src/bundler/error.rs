//! Error types for packaging operations.
//!
//! Provides contextual error chaining, filesystem errors that carry the
//! offending path, and the lookup/archiver failures that abort a platform.
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages
//!
//! # Example
//!
//! ```no_run
//! use olca_packager::bundler::{Context, ErrorExt, Result};
//! use std::path::Path;
//!
//! fn read_template(path: &Path) -> Result<String> {
//!     let text = std::fs::read_to_string(path)
//!         .fs_context("reading template", path)?;
//!     text.lines()
//!         .next()
//!         .map(str::to_string)
//!         .context("template is empty")
//! }
//! ```

use crate::bundler::template::TemplateError;
use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned by the packager.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying readme")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Child process could not be spawned.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// The archiver ran but reported failure.
    #[error("archiver failed while {operation} (exit code: {code:?})")]
    ArchiverFailed {
        /// What the archiver was asked to do
        operation: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// External archiver binary could not be located.
    #[error("archiver executable not found: {0}")]
    ToolNotFound(String),

    /// A required input matched nothing.
    #[error("could not find {what} (pattern: {pattern})")]
    NotFound {
        /// Human-readable description of the input, e.g. "Linux package"
        what: String,
        /// Glob pattern that was searched
        pattern: String,
    },

    /// A required input matched more than one path.
    #[error("found {} candidates for {what} (pattern: {pattern}): {}", .matches.len(), display_paths(.matches))]
    Ambiguous {
        /// Human-readable description of the input
        what: String,
        /// Glob pattern that was searched
        pattern: String,
        /// Every path that matched
        matches: Vec<PathBuf>,
    },

    /// Archive format not recognised from the file name.
    #[error("unsupported archive format: {0}")]
    UnsupportedArchive(PathBuf),

    /// Template filling failed.
    #[error("{0}")]
    Template(#[from] TemplateError),

    /// Generic I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Error walking a directory tree.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// ZIP archive extraction error.
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Invalid glob pattern.
    #[error("{0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob execution error.
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the packager's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying readme".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

impl Error {
    /// Returns the innermost error, skipping [`Error::Context`] wrappers.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Context(_, inner) => inner.root_cause(),
            other => other,
        }
    }

    /// True when the error comes from a required input that was not found.
    pub fn is_missing_input(&self) -> bool {
        matches!(
            self.root_cause(),
            Error::NotFound { .. } | Error::Ambiguous { .. }
        )
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::error::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
