//! Packaging orchestration.
//!
//! The [`Bundler`]:
//! 1. Recreates the output root
//! 2. Resolves the version and builds the `<version>_<date>` label
//! 3. Runs each selected platform assembler in order
//! 4. Records size and SHA-256 of every package
//! 5. Returns a [`PackagingReport`]
//!
//! A platform failure is recorded in the report and the next platform still
//! runs. Only an unreadable properties file or an output root that cannot be
//! prepared abort the whole run.
//!
//! # Example
//!
//! ```no_run
//! use olca_packager::bundler::{Bundler, SettingsBuilder};
//!
//! # async fn example() -> olca_packager::bundler::Result<()> {
//! let settings = SettingsBuilder::new().root("olca-app-build").build()?;
//! let bundler = Bundler::new(settings)?;
//! let report = bundler.run().await?;
//!
//! for artifact in report.artifacts() {
//!     println!("Created: {} ({} bytes)", artifact.paths[0].display(), artifact.size);
//!     println!("SHA256: {}", artifact.checksum);
//! }
//! # Ok(())
//! # }
//! ```

use crate::bail;
use crate::bundler::{
    BundledArtifact, Result, Settings,
    archive::{AnyArchiver, Archiver},
    checksum::calculate_sha256,
    error::{Context, ErrorExt},
    platform::{self, Platform},
    report::{PackagingReport, PlatformOutcome, PlatformReport, Warning},
    utils::fs,
};
use crate::version::{resolve_version, version_label};

/// Main packaging orchestrator.
pub struct Bundler<A = AnyArchiver> {
    settings: Settings,
    archiver: A,
}

impl<A: std::fmt::Debug> std::fmt::Debug for Bundler<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bundler")
            .field("settings", &self.settings)
            .field("archiver", &self.archiver)
            .finish()
    }
}

impl Bundler<AnyArchiver> {
    /// Creates a bundler using the archiver selected in `settings`.
    ///
    /// # Errors
    ///
    /// Fails when 7-Zip is selected but cannot be located.
    pub fn new(settings: Settings) -> Result<Self> {
        let archiver = AnyArchiver::for_kind(settings.archiver(), &settings.seven_zip())?;
        Ok(Self { settings, archiver })
    }
}

impl<A: Archiver> Bundler<A> {
    /// Creates a bundler with an explicit archiver.
    pub fn with_archiver(settings: Settings, archiver: A) -> Self {
        Self { settings, archiver }
    }

    /// Returns a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Packages every selected platform.
    pub async fn run(&self) -> Result<PackagingReport> {
        log::info!("Create the distribution packages");

        let output_dir = self.settings.output_dir();
        fs::create_dir_all(&output_dir, true)
            .await
            .context("failed to prepare output directory")?;

        let version =
            resolve_version(&self.settings.properties_file(), self.settings.version_key()).await?;
        let label = version_label(&version, self.settings.date());
        log::info!("Package label: {}", label);

        let mut report = PackagingReport::new(version, label.clone());
        for &platform in self.settings.platforms() {
            let mut warnings = Vec::new();
            let outcome = match self.bundle_platform(platform, &label, &mut warnings).await {
                Ok(artifact) => {
                    log::info!("✓ Created {} package: {}", platform, artifact.paths[0].display());
                    PlatformOutcome::Packaged(artifact)
                }
                Err(e) => {
                    log::error!("{} packaging failed: {}", platform, e);
                    PlatformOutcome::Failed(e)
                }
            };
            report
                .warnings
                .extend(warnings.into_iter().map(|message| Warning { platform, message }));
            report.platforms.push(PlatformReport { platform, outcome });
        }

        Ok(report)
    }

    /// Packages one platform and collects artifact metadata.
    pub async fn bundle_platform(
        &self,
        platform: Platform,
        label: &str,
        warnings: &mut Vec<String>,
    ) -> Result<BundledArtifact> {
        let paths = match platform {
            Platform::Linux => {
                platform::linux::bundle_project(&self.settings, &self.archiver, label).await?
            }
            Platform::MacOs => {
                platform::macos::bundle_project(&self.settings, &self.archiver, label, warnings)
                    .await?
            }
        };

        let Some(package) = paths.first() else {
            bail!(
                "{} assembler returned no paths - this indicates a packager bug",
                platform
            );
        };
        let size = tokio::fs::metadata(package)
            .await
            .fs_context("reading package metadata", package)?
            .len();
        let checksum = calculate_sha256(package).await?;

        Ok(BundledArtifact {
            platform,
            paths,
            size,
            checksum,
        })
    }
}
