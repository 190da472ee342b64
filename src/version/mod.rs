//! Version resolution from `build.properties` and the output label.
//!
//! The label combines the resolved version with a calendar date,
//! e.g. `2.1.0_2024-03-07`, and is embedded in every package name.

use crate::bundler::{ErrorExt, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::path::Path;

/// Default key of the version line in `build.properties`.
pub const DEFAULT_VERSION_KEY: &str = "openlca_version_id";

/// Returns the version value from properties `text`.
///
/// The first line whose trimmed text starts with `key` wins; its value is the
/// trimmed text after the first `=`. Yields an empty string when no line
/// matches or the matching line has no `=`.
pub fn parse_version(text: &str, key: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|line| line.starts_with(key))
        .and_then(|line| line.split_once('='))
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Reads `properties` and resolves the version stored under `key`.
pub async fn resolve_version(properties: &Path, key: &str) -> Result<String> {
    let text = tokio::fs::read_to_string(properties)
        .await
        .fs_context("reading properties file", properties)?;
    let version = parse_version(&text, key);

    if version.is_empty() {
        log::warn!("No '{}' entry found in {}", key, properties.display());
    } else if let Err(e) = semver::Version::parse(&version) {
        log::debug!("Version '{}' is not semver ({}); using it verbatim", version, e);
    }
    Ok(version)
}

/// Builds the `<version>_<YYYY>-<MM>-<DD>` label.
pub fn version_label(version: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}-{:02}-{:02}",
        version,
        date.year(),
        date.month(),
        date.day()
    )
}

/// Today's date in the local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
