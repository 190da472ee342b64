//! `packager.toml` project configuration.
//!
//! Every key is optional; anything left out keeps its built-in default.
//! CLI flags are applied on top of the file by the caller.

use crate::bundler::{ArchiverKind, Platform, PlatformInputs, SettingsBuilder};
use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up in the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "packager.toml";

/// Per-platform overrides (`[linux]`, `[macos]`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PlatformConfig {
    /// Glob of the application zip.
    pub bundle: Option<String>,
    /// Glob of the runtime tar.
    pub runtime: Option<String>,
    /// `.ini` template location.
    pub ini_template: Option<String>,
}

impl PlatformConfig {
    /// Fills unset keys from the defaults of `platform`.
    pub fn resolve(&self, platform: Platform) -> PlatformInputs {
        let defaults = PlatformInputs::defaults_for(platform);
        PlatformInputs {
            bundle: self.bundle.clone().unwrap_or(defaults.bundle),
            runtime: self.runtime.clone().unwrap_or(defaults.runtime),
            ini_template: self.ini_template.clone().unwrap_or(defaults.ini_template),
        }
    }
}

/// Contents of `packager.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackagerConfig {
    /// Product name, e.g. `openLCA`.
    pub product_name: Option<String>,
    /// Version key in the properties file.
    pub version_key: Option<String>,
    /// Properties file location.
    pub properties_file: Option<String>,
    /// Output root.
    pub output_dir: Option<String>,
    /// Archiver back end.
    pub archiver: Option<ArchiverKind>,
    /// 7-Zip executable location.
    pub seven_zip: Option<String>,
    /// Readme copied into bundles.
    pub readme: Option<String>,
    /// License directory copied into bundles.
    pub licenses_dir: Option<String>,
    /// Linux overrides.
    pub linux: Option<PlatformConfig>,
    /// macOS overrides.
    pub macos: Option<PlatformConfig>,
}

impl PackagerConfig {
    /// Parses configuration text. `origin` is only used in error messages.
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| {
            ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// Loads configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Loads `explicit` when given, else `<root>/packager.toml` when present,
    /// else the defaults.
    ///
    /// An explicit file that does not exist is an error; a missing
    /// `packager.toml` is not.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidate = root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            log::debug!("Using configuration {}", candidate.display());
            Ok((Self::load(&candidate)?, Some(candidate)))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// Copies every configured value into `builder`.
    pub fn apply(&self, mut builder: SettingsBuilder) -> SettingsBuilder {
        if let Some(name) = &self.product_name {
            builder = builder.product_name(name);
        }
        if let Some(key) = &self.version_key {
            builder = builder.version_key(key);
        }
        if let Some(path) = &self.properties_file {
            builder = builder.properties_file(path);
        }
        if let Some(path) = &self.output_dir {
            builder = builder.output_dir(path);
        }
        if let Some(kind) = self.archiver {
            builder = builder.archiver(kind);
        }
        if let Some(path) = &self.seven_zip {
            builder = builder.seven_zip(path);
        }
        if let Some(path) = &self.readme {
            builder = builder.readme(path);
        }
        if let Some(path) = &self.licenses_dir {
            builder = builder.licenses_dir(path);
        }
        if let Some(linux) = &self.linux {
            builder = builder.platform_inputs(Platform::Linux, linux.resolve(Platform::Linux));
        }
        if let Some(macos) = &self.macos {
            builder = builder.platform_inputs(Platform::MacOs, macos.resolve(Platform::MacOs));
        }
        builder
    }
}
