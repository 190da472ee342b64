//! Outcome of a packaging run.
//!
//! Platform failures and non-fatal warnings are collected here instead of
//! being printed and forgotten, so the caller can pick an exit status.

use crate::bundler::{BundledArtifact, Error, platform::Platform};

/// Non-fatal problem noticed while packaging a platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// Platform being packaged.
    pub platform: Platform,
    /// Description of the problem.
    pub message: String,
}

/// Result of packaging one platform.
#[derive(Debug)]
pub enum PlatformOutcome {
    /// The package was created.
    Packaged(BundledArtifact),
    /// Packaging stopped at the given error.
    Failed(Error),
}

/// Per-platform entry of a [`PackagingReport`].
#[derive(Debug)]
pub struct PlatformReport {
    /// Platform this entry describes.
    pub platform: Platform,
    /// What happened.
    pub outcome: PlatformOutcome,
}

/// Summary of a whole run.
#[derive(Debug)]
pub struct PackagingReport {
    /// Version resolved from the properties file (may be empty).
    pub version: String,
    /// `<version>_<date>` label used in package names.
    pub label: String,
    /// One entry per selected platform, in packaging order.
    pub platforms: Vec<PlatformReport>,
    /// Warnings from all platforms.
    pub warnings: Vec<Warning>,
}

impl PackagingReport {
    /// Creates an empty report.
    pub fn new(version: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            label: label.into(),
            platforms: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Artifacts of every packaged platform.
    pub fn artifacts(&self) -> impl Iterator<Item = &BundledArtifact> {
        self.platforms.iter().filter_map(|p| match &p.outcome {
            PlatformOutcome::Packaged(artifact) => Some(artifact),
            PlatformOutcome::Failed(_) => None,
        })
    }

    /// Failed platforms with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (Platform, &Error)> {
        self.platforms.iter().filter_map(|p| match &p.outcome {
            PlatformOutcome::Failed(e) => Some((p.platform, e)),
            PlatformOutcome::Packaged(_) => None,
        })
    }

    /// True when every selected platform was packaged.
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Process exit code for this report: 0 on full success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }
}
