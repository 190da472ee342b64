//! Archive extraction and packing.
//!
//! Two back ends implement [`Archiver`]:
//!
//! | Back end | Extraction | Packing | Requires |
//! |----------|------------|---------|----------|
//! | [`NativeArchiver`] | zip, tar, tar.gz | tar + gzip | nothing |
//! | [`SevenZip`] | anything 7-Zip reads | `-ttar` + `-tgzip` | `7za` executable |
//!
//! Every invocation yields an [`ArchiveStatus`]. The caller decides whether a
//! failed status is fatal; the packaging steps treat it as fatal to the
//! platform being assembled.

mod native;
mod seven_zip;

pub use native::NativeArchiver;
pub use seven_zip::SevenZip;

use crate::bundler::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Exit status of one archiver invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchiveStatus {
    /// Process exit code. `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ArchiveStatus {
    /// Status of an in-process operation that completed.
    pub const SUCCESS: ArchiveStatus = ArchiveStatus { code: Some(0) };

    /// True for exit code 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Converts a failed status into [`Error::ArchiverFailed`].
    pub fn ensure_success(self, operation: impl Into<String>) -> Result<()> {
        if self.success() {
            Ok(())
        } else {
            Err(Error::ArchiverFailed {
                operation: operation.into(),
                code: self.code,
            })
        }
    }
}

impl From<std::process::ExitStatus> for ArchiveStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Archive operations used by the platform assemblers.
#[allow(async_fn_in_trait)]
pub trait Archiver {
    /// Extracts `archive` into `dest_dir`, creating it if absent.
    async fn extract(&self, archive: &Path, dest_dir: &Path) -> Result<ArchiveStatus>;

    /// Creates an uncompressed tar at `output` from every path matching `source_glob`.
    ///
    /// Each match is stored under its own file name; directories are added recursively.
    async fn create_tar(&self, source_glob: &str, output: &Path) -> Result<ArchiveStatus>;

    /// Gzip-compresses `input` into `output`.
    async fn gzip(&self, input: &Path, output: &Path) -> Result<ArchiveStatus>;

    /// Packs `source_glob` into `<output_base>.tar` and `<output_base>.tar.gz`.
    ///
    /// Returns the `.tar.gz` path followed by the intermediate `.tar` path.
    async fn pack(&self, source_glob: &str, output_base: &Path) -> Result<Vec<PathBuf>> {
        let tar_path = with_suffix(output_base, ".tar");
        let tar_gz_path = with_suffix(output_base, ".tar.gz");

        log::info!("targz {} to {}", source_glob, output_base.display());
        self.create_tar(source_glob, &tar_path)
            .await?
            .ensure_success(format!("creating {}", tar_path.display()))?;
        self.gzip(&tar_path, &tar_gz_path)
            .await?
            .ensure_success(format!("compressing {}", tar_gz_path.display()))?;

        Ok(vec![tar_gz_path, tar_path])
    }
}

/// Appends `suffix` to the file name of `base` (no extension replacement).
///
/// `openLCA_linux_2.1.0_2024-03-07` keeps its dots when `.tar` is added.
pub fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Selectable archiver back end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ArchiverKind {
    /// In-process zip/tar/gzip.
    #[default]
    Native,
    /// External 7-Zip command line tool.
    #[serde(rename = "7zip", alias = "sevenzip")]
    #[value(name = "7zip", alias = "sevenzip")]
    SevenZip,
}

impl fmt::Display for ArchiverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiverKind::Native => write!(f, "native"),
            ArchiverKind::SevenZip => write!(f, "7zip"),
        }
    }
}

/// Archiver chosen at runtime.
#[derive(Clone, Debug)]
pub enum AnyArchiver {
    /// See [`NativeArchiver`].
    Native(NativeArchiver),
    /// See [`SevenZip`].
    SevenZip(SevenZip),
}

impl AnyArchiver {
    /// Builds the archiver for `kind`; `seven_zip` is the configured 7-Zip location.
    pub fn for_kind(kind: ArchiverKind, seven_zip: &Path) -> Result<Self> {
        Ok(match kind {
            ArchiverKind::Native => AnyArchiver::Native(NativeArchiver),
            ArchiverKind::SevenZip => AnyArchiver::SevenZip(SevenZip::locate(seven_zip)?),
        })
    }
}

impl Archiver for AnyArchiver {
    async fn extract(&self, archive: &Path, dest_dir: &Path) -> Result<ArchiveStatus> {
        match self {
            AnyArchiver::Native(a) => a.extract(archive, dest_dir).await,
            AnyArchiver::SevenZip(a) => a.extract(archive, dest_dir).await,
        }
    }

    async fn create_tar(&self, source_glob: &str, output: &Path) -> Result<ArchiveStatus> {
        match self {
            AnyArchiver::Native(a) => a.create_tar(source_glob, output).await,
            AnyArchiver::SevenZip(a) => a.create_tar(source_glob, output).await,
        }
    }

    async fn gzip(&self, input: &Path, output: &Path) -> Result<ArchiveStatus> {
        match self {
            AnyArchiver::Native(a) => a.gzip(input, output).await,
            AnyArchiver::SevenZip(a) => a.gzip(input, output).await,
        }
    }
}
