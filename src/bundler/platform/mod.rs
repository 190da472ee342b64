//! Platform-specific bundle assembly.
//!
//! Each target platform has its own assembler that turns a pre-built
//! application zip into a distribution tarball.
//!
//! | Platform | Input | Module |
//! |----------|-------|--------|
//! | Linux | `openlca_*-linux.gtk.x86_64.zip` | [`linux`] |
//! | macOS | `openlca_*-macosx.cocoa.x86_64.zip` | [`macos`] |
//!
//! Assemblers do not depend on the host OS: both platforms can be packaged
//! from any machine.

pub mod linux;
pub mod macos;

use crate::bundler::{
    archive::Archiver,
    error::{Context, Result},
    settings::Settings,
    utils::{fs, lookup},
};
use std::fmt;
use std::path::{Path, PathBuf};

/// Fixed name of the runtime directory inside a bundle.
pub const RUNTIME_DIR: &str = "jre";

/// Target platforms for distribution packages.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux GTK x86_64 build.
    Linux,
    /// macOS Cocoa x86_64 build.
    #[value(name = "macos")]
    MacOs,
}

impl Platform {
    /// Every platform in packaging order.
    pub const ALL: [Platform; 2] = [Platform::Linux, Platform::MacOs];

    /// Name shown to users and in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::MacOs => "macOS",
        }
    }

    /// Tag embedded in package file names.
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macOS",
        }
    }

    /// Name of the staging directory below the output root.
    pub fn staging_name(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Locates and extracts the single application zip for `platform` into `dest_dir`.
pub(crate) async fn extract_bundle<A: Archiver>(
    settings: &Settings,
    archiver: &A,
    platform: Platform,
    dest_dir: &Path,
) -> Result<()> {
    let app_pack = lookup::find_single(
        &settings.bundle_pattern(platform),
        &format!("{} package", platform),
    )?;
    archiver
        .extract(&app_pack, dest_dir)
        .await?
        .ensure_success(format!("extracting {}", app_pack.display()))
}

/// Extracts the platform runtime into `app_dir` and renames it to [`RUNTIME_DIR`].
///
/// Returns the final runtime directory.
pub(crate) async fn install_runtime<A: Archiver>(
    settings: &Settings,
    archiver: &A,
    platform: Platform,
    app_dir: &Path,
) -> Result<PathBuf> {
    let runtime_tar = lookup::find_single(
        &settings.runtime_pattern(platform),
        &format!("JRE for {}", platform),
    )?;
    archiver
        .extract(&runtime_tar, app_dir)
        .await?
        .ensure_success(format!("extracting {}", runtime_tar.display()))?;

    let extracted = lookup::find_single(
        &app_dir.join(format!("*{}*", RUNTIME_DIR)),
        "extracted JRE directory",
    )?;
    let runtime_dir = app_dir.join(RUNTIME_DIR);
    if extracted != runtime_dir {
        fs::rename(&extracted, &runtime_dir)
            .await
            .context("failed to rename JRE directory")?;
    }
    Ok(runtime_dir)
}

/// Packs everything below `content_dir` and removes `staging` unless kept.
pub(crate) async fn pack_and_clean<A: Archiver>(
    settings: &Settings,
    archiver: &A,
    platform: Platform,
    label: &str,
    content_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let source_glob = content_dir.join("*").to_string_lossy().into_owned();
    let paths = archiver
        .pack(&source_glob, &settings.package_base(platform, label))
        .await
        .context("failed to create distribution package")?;

    let staging = settings.staging_dir(platform);
    if settings.keep_staging() {
        log::info!("Keeping staging directory {}", staging.display());
    } else {
        fs::remove_dir_all(&staging).await?;
    }
    Ok(paths)
}
