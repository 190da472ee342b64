//! 7-Zip command line back end.

use super::{ArchiveStatus, Archiver};
use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};
use tokio::process::Command;

/// Executable names searched on `PATH` when the configured binary is missing.
const FALLBACK_NAMES: [&str; 2] = ["7za", "7z"];

/// Wrapper around the `7za` executable.
#[derive(Clone, Debug)]
pub struct SevenZip {
    binary: PathBuf,
}

impl SevenZip {
    /// Uses `binary` as-is without checking that it exists.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Resolves the executable: `configured` when it exists, otherwise the
    /// first of `7za`, `7z` found on `PATH`.
    pub fn locate(configured: &Path) -> Result<Self> {
        if configured.is_file() {
            log::debug!("Using configured 7-Zip at {}", configured.display());
            return Ok(Self::new(configured));
        }
        for name in FALLBACK_NAMES {
            match which::which(name) {
                Ok(path) => {
                    log::debug!("Found {} at: {}", name, path.display());
                    return Ok(Self::new(path));
                }
                Err(e) => log::debug!("{} not found in PATH: {}", name, e),
            }
        }
        Err(Error::ToolNotFound(format!(
            "{} (also searched PATH for {})",
            configured.display(),
            FALLBACK_NAMES.join(", ")
        )))
    }

    /// Path of the executable in use.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    async fn run(&self, args: Vec<OsString>) -> Result<ArchiveStatus> {
        let command_line = format!(
            "{} {}",
            self.binary.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );
        log::debug!("Running: {}", command_line);

        let status = Command::new(&self.binary)
            .args(&args)
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: command_line.clone(),
                error,
            })?;

        let status = ArchiveStatus::from(status);
        log::info!("{} exited with {:?}", command_line, status.code);
        Ok(status)
    }
}

fn output_flag(dest_dir: &Path) -> OsString {
    let mut flag = OsString::from("-o");
    flag.push(dest_dir.as_os_str());
    flag
}

impl Archiver for SevenZip {
    async fn extract(&self, archive: &Path, dest_dir: &Path) -> Result<ArchiveStatus> {
        log::info!("unzip {} to {}", archive.display(), dest_dir.display());
        tokio::fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating extraction directory", dest_dir)?;
        self.run(vec![
            "x".into(),
            archive.as_os_str().to_owned(),
            output_flag(dest_dir),
            "-y".into(),
        ])
        .await
    }

    async fn create_tar(&self, source_glob: &str, output: &Path) -> Result<ArchiveStatus> {
        self.run(vec![
            "a".into(),
            "-ttar".into(),
            output.as_os_str().to_owned(),
            source_glob.into(),
        ])
        .await
    }

    async fn gzip(&self, input: &Path, output: &Path) -> Result<ArchiveStatus> {
        self.run(vec![
            "a".into(),
            "-tgzip".into(),
            output.as_os_str().to_owned(),
            input.as_os_str().to_owned(),
        ])
        .await
    }
}
