//! Host path separator normalization.
//!
//! Path constants are written POSIX-style; these helpers rewrite them for
//! hosts whose separator is not `/`.

use crate::bundler::error::{ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Replaces every `/` with the host separator when it differs from `/`.
pub fn normalize(path: &str) -> String {
    normalize_for(path, MAIN_SEPARATOR)
}

/// Normalizes `path` and converts it into a [`PathBuf`].
pub fn native_path(path: &str) -> PathBuf {
    PathBuf::from(normalize(path))
}

/// Makes `path` absolute and resolves `.` and `..` without touching the disk.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving path", path)?
        .into_owned())
}

/// Leading components of a glob pattern up to the first one with a wildcard.
///
/// `builds/openlca_*.zip` yields `builds`.
pub fn literal_prefix(pattern: &Path) -> PathBuf {
    pattern
        .components()
        .take_while(|c| {
            !c.as_os_str()
                .to_string_lossy()
                .contains(['*', '?', '['])
        })
        .collect()
}

fn normalize_for(path: &str, separator: char) -> String {
    if separator == '/' {
        path.to_string()
    } else {
        path.replace('/', &separator.to_string())
    }
}
