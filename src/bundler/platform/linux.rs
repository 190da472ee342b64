//! Linux distribution package (`openLCA_linux_<label>.tar.gz`).

use super::{Platform, extract_bundle, install_runtime, pack_and_clean};
use crate::bundler::{
    archive::Archiver,
    error::{Context, Result},
    settings::Settings,
    utils::fs,
};
use std::path::PathBuf;

/// Bundles the Linux package.
///
/// # Process
///
/// 1. Extracts the Linux application zip into `packages/linux`
/// 2. Copies the Linux `.ini`, the readme and the license tree into the app
/// 3. Extracts the Linux JRE into the app and renames it to `jre`
/// 4. Packs `packages/linux/*` as `.tar` and `.tar.gz`
/// 5. Removes `packages/linux`
///
/// Returns the `.tar.gz` path followed by the `.tar` path.
pub async fn bundle_project<A: Archiver>(
    settings: &Settings,
    archiver: &A,
    label: &str,
) -> Result<Vec<PathBuf>> {
    let platform = Platform::Linux;
    let staging = settings.staging_dir(platform);
    log::info!("Packaging {} in {}", platform, staging.display());

    extract_bundle(settings, archiver, platform, &staging).await?;
    let app_dir = staging.join(settings.product_name());

    // copy ini and licenses
    let ini = app_dir.join(format!("{}.ini", settings.product_name()));
    fs::copy_file(&settings.ini_template(platform), &ini)
        .await
        .context("failed to copy Linux ini file")?;
    fs::copy_into(&settings.readme(), &app_dir)
        .await
        .context("failed to copy readme")?;
    fs::copy_dir(&settings.licenses_dir(), &app_dir.join("licenses"))
        .await
        .context("failed to copy licenses")?;

    install_runtime(settings, archiver, platform, &app_dir).await?;

    pack_and_clean(settings, archiver, platform, label, &staging).await
}
