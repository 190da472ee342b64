//! Single-match glob lookups.
//!
//! Every required input (platform bundle, runtime archive, launcher
//! artifacts) is located by a glob that must match exactly one path.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Returns every path matching `pattern`, sorted.
pub fn find_all(pattern: &Path) -> Result<Vec<PathBuf>> {
    let pattern_str = pattern.to_string_lossy();
    let mut matches = glob::glob(&pattern_str)?.collect::<std::result::Result<Vec<_>, _>>()?;
    matches.sort();
    Ok(matches)
}

/// Resolves `pattern` to exactly one path.
///
/// `what` names the input in the error, e.g. "Linux package".
pub fn find_single(pattern: &Path, what: &str) -> Result<PathBuf> {
    let mut matches = find_all(pattern)?;
    match matches.len() {
        0 => Err(Error::NotFound {
            what: what.to_string(),
            pattern: pattern.display().to_string(),
        }),
        1 => {
            let found = matches.remove(0);
            log::debug!("Resolved {} -> {}", what, found.display());
            Ok(found)
        }
        _ => Err(Error::Ambiguous {
            what: what.to_string(),
            pattern: pattern.display().to_string(),
            matches,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn single_match_is_returned() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("openlca_2.1-linux.gtk.x86_64.zip"), b"").unwrap();
        fs::write(dir.path().join("openlca_2.1-macosx.cocoa.x86_64.zip"), b"").unwrap();

        let found = find_single(&dir.path().join("openlca_*-linux.gtk.x86_64.zip"), "Linux package").unwrap();
        assert_eq!(found, dir.path().join("openlca_2.1-linux.gtk.x86_64.zip"));
    }

    #[test]
    fn no_match_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_single(&dir.path().join("jre-*-linux-x64.tar"), "JRE for Linux").unwrap_err();
        assert!(matches!(err, Error::NotFound { ref what, .. } if what == "JRE for Linux"));
    }

    #[test]
    fn several_matches_are_ambiguous() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("jre-8u1-linux-x64.tar"), b"").unwrap();
        fs::write(dir.path().join("jre-8u2-linux-x64.tar"), b"").unwrap();

        match find_single(&dir.path().join("jre-*-linux-x64.tar"), "JRE for Linux") {
            Err(Error::Ambiguous { matches, .. }) => assert_eq!(matches.len(), 2),
            other => panic!("expected ambiguity, got {other:?}"),
        }
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let err = find_all(Path::new("builds/[*.zip")).unwrap_err();
        assert!(matches!(err, Error::GlobPattern(_)));
    }
}
