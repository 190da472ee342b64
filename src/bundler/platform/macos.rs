//! macOS distribution package (`openLCA_macOS_<label>.tar.gz`).
//!
//! The Eclipse build ships configuration, p2 and plugins next to the
//! `openLCA.app` bundle; they are moved inside it so the app is
//! self-contained, and the launcher `.ini` is generated for the plugin
//! versions actually present.

use super::{Platform, extract_bundle, install_runtime, pack_and_clean};
use crate::bundler::{
    archive::Archiver,
    error::{Context, Result},
    settings::Settings,
    template,
    utils::{fs, lookup},
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Entries moved from the extracted root into the `.app` bundle.
pub const RELOCATED_ENTRIES: [&str; 5] = [
    "configuration",
    "p2",
    "plugins",
    ".eclipseproduct",
    "artifacts.xml",
];

/// Bundles the macOS package.
///
/// # Process
///
/// 1. Extracts the macOS application zip into `packages/macos`
/// 2. Moves [`RELOCATED_ENTRIES`] into `openLCA/openLCA.app`; missing
///    entries are recorded in `warnings` and skipped
/// 3. Drops stale p2 `.lock` files
/// 4. Extracts the macOS JRE into the app and renames it to `jre`
/// 5. Renders the macOS `.ini` template with the launcher jar and library
///    names into `Contents/MacOS`
/// 6. Packs `packages/macos/openLCA/*` as `.tar` and `.tar.gz`
/// 7. Removes `packages/macos`
///
/// Returns the `.tar.gz` path followed by the `.tar` path.
pub async fn bundle_project<A: Archiver>(
    settings: &Settings,
    archiver: &A,
    label: &str,
    warnings: &mut Vec<String>,
) -> Result<Vec<PathBuf>> {
    let platform = Platform::MacOs;
    let staging = settings.staging_dir(platform);
    log::info!("Packaging {} in {}", platform, staging.display());

    extract_bundle(settings, archiver, platform, &staging).await?;
    let root_dir = staging.join(settings.product_name());
    let app_dir = root_dir.join(format!("{}.app", settings.product_name()));

    for entry in RELOCATED_ENTRIES {
        let source = root_dir.join(entry);
        if !source.exists() {
            let message = format!("File or folder {} does not exist", source.display());
            log::warn!("{}", message);
            warnings.push(message);
            continue;
        }
        log::info!("Move {} to {}", source.display(), app_dir.display());
        fs::move_into(&source, &app_dir)
            .await
            .with_context(|| format!("failed to move {} into the app bundle", entry))?;
    }

    let locks = fs::remove_files_named(&app_dir.join("p2"), ".lock").await?;
    if locks > 0 {
        log::debug!("Removed {} p2 lock file(s)", locks);
    }

    install_runtime(settings, archiver, platform, &app_dir).await?;

    write_launcher_ini(settings, &app_dir).await?;

    pack_and_clean(settings, archiver, platform, label, &root_dir).await
}

/// Renders the macOS `.ini` into `<app>/Contents/MacOS/<product>.ini`.
async fn write_launcher_ini(settings: &Settings, app_dir: &Path) -> Result<PathBuf> {
    let plugins = app_dir.join("plugins");
    let launcher_jar = lookup::find_single(&plugins.join("*launcher*.jar"), "launcher jar")?;
    let launcher_lib = lookup::find_single(
        &plugins.join("*launcher.cocoa.macosx*"),
        "launcher library",
    )?;

    let values = HashMap::from([
        ("launcher_jar", file_name(&launcher_jar)?),
        ("launcher_lib", file_name(&launcher_lib)?),
    ]);
    let ini_file = app_dir
        .join("Contents")
        .join("MacOS")
        .join(format!("{}.ini", settings.product_name()));

    template::render_to_file(&settings.ini_template(Platform::MacOs), &values, &ini_file)
        .await
        .context("failed to write macOS ini file")?;
    Ok(ini_file)
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))
}
