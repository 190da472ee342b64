//! Package command implementation.
//!
//! Layers defaults, `packager.toml` and flags into [`Settings`], runs the
//! bundler and prints one section per platform.

use crate::bundler::{Bundler, PackagingReport, PlatformOutcome, Settings, SettingsBuilder};
use crate::cli::{Args, RuntimeConfig};
use crate::config::PackagerConfig;
use crate::error::{CliError, Result};

/// Execute the package command
pub(super) async fn execute_package(args: &Args, config: &RuntimeConfig) -> Result<i32> {
    let settings = create_settings(args, config)?;
    config.verbose_println(&format!(
        "Packaging {} with the {} archiver",
        settings
            .platforms()
            .iter()
            .map(|p| p.display_name())
            .collect::<Vec<_>>()
            .join(", "),
        settings.archiver()
    ));

    let bundler = Bundler::new(settings)?;
    let report = bundler.run().await?;

    print_report(&report, config);
    Ok(report.exit_code())
}

/// Builds settings from defaults, the configuration file and flags, in that order.
pub(super) fn create_settings(args: &Args, config: &RuntimeConfig) -> Result<Settings> {
    let (file_config, origin) = PackagerConfig::discover(&args.root, args.config.as_deref())?;
    if let Some(path) = &origin {
        config.verbose_println(&format!("Using configuration {}", path.display()));
    }

    let mut builder = file_config
        .apply(SettingsBuilder::new().root(&args.root))
        .keep_staging(args.keep_staging);
    if !args.platform.is_empty() {
        builder = builder.platforms(args.platform.clone());
    }
    if let Some(kind) = args.archiver {
        builder = builder.archiver(kind);
    }
    if let Some(date) = args.date {
        builder = builder.date(date);
    }

    builder.build().map_err(|e| {
        CliError::InvalidArguments {
            reason: e.to_string(),
        }
        .into()
    })
}

fn print_report(report: &PackagingReport, config: &RuntimeConfig) {
    config.verbose_println(&format!(
        "Version '{}', label {}",
        report.version, report.label
    ));

    for entry in &report.platforms {
        config.section(entry.platform.display_name());

        for warning in report.warnings.iter().filter(|w| w.platform == entry.platform) {
            config.warning_println(&warning.message);
        }

        match &entry.outcome {
            PlatformOutcome::Packaged(artifact) => {
                let size_mb = artifact.size as f64 / 1_048_576.0;
                config.success_println(&format!("{} package created", entry.platform));
                for path in &artifact.paths {
                    config.indent(&format!("📦 {}", path.display()));
                }
                config.indent(&format!("📏 {:.2} MB", size_mb));
                config.indent(&format!("🔐 SHA256: {}", artifact.checksum));
            }
            PlatformOutcome::Failed(e) => {
                config.error_println(&format!("ERROR: {}: {}", entry.platform, e));
            }
        }
    }

    let created = report.artifacts().count();
    let failed = report.platforms.len() - created;
    config.println("");
    if failed == 0 {
        config.success_println(&format!("Created {} package(s)", created));
    } else {
        config.error_println(&format!(
            "{} of {} platform(s) failed",
            failed,
            report.platforms.len()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{ArchiverKind, Platform};
    use clap::Parser;
    use std::path::Path;

    fn args(root: &Path, extra: &[&str]) -> Args {
        let root = root.to_string_lossy().into_owned();
        let mut argv = vec!["olca_packager", "--root", root.as_str(), "-q"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flags_override_the_configuration_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("packager.toml"),
            "archiver = \"7zip\"\noutput_dir = \"dist\"\n",
        )
        .unwrap();
        let config = RuntimeConfig::new(false, true);

        let from_file = create_settings(&args(dir.path(), &[]), &config).unwrap();
        assert_eq!(from_file.archiver(), ArchiverKind::SevenZip);
        assert_eq!(from_file.output_dir(), dir.path().join("dist"));

        let overridden = create_settings(
            &args(dir.path(), &["--archiver", "native", "--platform", "macos"]),
            &config,
        )
        .unwrap();
        assert_eq!(overridden.archiver(), ArchiverKind::Native);
        assert_eq!(overridden.platforms(), &[Platform::MacOs]);
        assert_eq!(overridden.output_dir(), dir.path().join("dist"));
    }

    #[test]
    fn keep_staging_flag_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let config = RuntimeConfig::new(false, true);
        let settings = create_settings(&args(dir.path(), &["--keep-staging"]), &config).unwrap();
        assert!(settings.keep_staging());
    }
}
