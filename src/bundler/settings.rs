//! Configuration structures for packaging runs.
//!
//! [`Settings`] is immutable once built. It is assembled by
//! [`SettingsBuilder`] from built-in defaults, an optional
//! [`PackagerConfig`](crate::config::PackagerConfig) file and CLI overrides.
//!
//! All relative locations are POSIX-style strings resolved against the
//! project root after separator normalization.

use crate::bundler::{
    archive::ArchiverKind,
    platform::Platform,
    utils::path::{absolute, literal_prefix, native_path},
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Inputs consumed when packaging one platform.
///
/// # Examples
///
/// ```no_run
/// use olca_packager::bundler::PlatformInputs;
///
/// let linux = PlatformInputs {
///     bundle: "builds/openlca_*-linux.gtk.x86_64.zip".into(),
///     runtime: "runtime/jre/jre-*-linux-x64.tar".into(),
///     ini_template: "templates/openLCA_Linux.ini".into(),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformInputs {
    /// Glob of the pre-built application zip.
    pub bundle: String,
    /// Glob of the runtime tar.
    pub runtime: String,
    /// `.ini` template copied or rendered into the bundle.
    pub ini_template: String,
}

impl PlatformInputs {
    /// Default inputs for `platform`.
    pub fn defaults_for(platform: Platform) -> Self {
        match platform {
            Platform::Linux => Self {
                bundle: "builds/openlca_*-linux.gtk.x86_64.zip".into(),
                runtime: "runtime/jre/jre-*-linux-x64.tar".into(),
                ini_template: "templates/openLCA_Linux.ini".into(),
            },
            Platform::MacOs => Self {
                bundle: "builds/openlca_*-macosx.cocoa.x86_64.zip".into(),
                runtime: "runtime/jre/jre-*-macosx-x64.tar".into(),
                ini_template: "templates/openLCA_macOS.ini".into(),
            },
        }
    }
}

/// Default location of the bundled 7-Zip executable.
pub fn default_seven_zip() -> &'static str {
    if cfg!(windows) { "7zip/7za.exe" } else { "7zip/7za" }
}

/// Main packaging configuration.
#[derive(Clone, Debug)]
pub struct Settings {
    root: PathBuf,
    product_name: String,
    version_key: String,
    properties_file: String,
    output_dir: String,
    readme: String,
    licenses_dir: String,
    linux: PlatformInputs,
    macos: PlatformInputs,
    archiver: ArchiverKind,
    seven_zip: String,
    platforms: Vec<Platform>,
    date: Option<NaiveDate>,
    keep_staging: bool,
}

impl Settings {
    /// Project root every relative location is resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a POSIX-style relative location against the root.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(native_path(relative))
    }

    /// Product name used as package prefix and application directory name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Key of the version line in the properties file.
    pub fn version_key(&self) -> &str {
        &self.version_key
    }

    /// Path of `build.properties`.
    pub fn properties_file(&self) -> PathBuf {
        self.resolve(&self.properties_file)
    }

    /// Output root holding staging directories and final packages.
    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    /// Scratch directory for `platform`, e.g. `packages/linux`.
    pub fn staging_dir(&self, platform: Platform) -> PathBuf {
        self.output_dir().join(platform.staging_name())
    }

    /// Package path without extension, e.g. `packages/openLCA_linux_2.1.0_2024-03-07`.
    pub fn package_base(&self, platform: Platform, label: &str) -> PathBuf {
        self.output_dir()
            .join(format!("{}_{}_{}", self.product_name, platform.tag(), label))
    }

    /// Readme copied into every bundle.
    pub fn readme(&self) -> PathBuf {
        self.resolve(&self.readme)
    }

    /// License directory copied into every bundle.
    pub fn licenses_dir(&self) -> PathBuf {
        self.resolve(&self.licenses_dir)
    }

    /// Raw inputs for `platform`.
    pub fn inputs(&self, platform: Platform) -> &PlatformInputs {
        match platform {
            Platform::Linux => &self.linux,
            Platform::MacOs => &self.macos,
        }
    }

    /// Resolved glob of the application zip for `platform`.
    pub fn bundle_pattern(&self, platform: Platform) -> PathBuf {
        self.resolve(&self.inputs(platform).bundle)
    }

    /// Resolved glob of the runtime tar for `platform`.
    pub fn runtime_pattern(&self, platform: Platform) -> PathBuf {
        self.resolve(&self.inputs(platform).runtime)
    }

    /// Resolved `.ini` template for `platform`.
    pub fn ini_template(&self, platform: Platform) -> PathBuf {
        self.resolve(&self.inputs(platform).ini_template)
    }

    /// Selected archiver back end.
    pub fn archiver(&self) -> ArchiverKind {
        self.archiver
    }

    /// Configured 7-Zip executable.
    pub fn seven_zip(&self) -> PathBuf {
        self.resolve(&self.seven_zip)
    }

    /// Platforms to package, in order.
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Date embedded in the label; today when not fixed.
    pub fn date(&self) -> NaiveDate {
        self.date.unwrap_or_else(crate::version::today)
    }

    /// Whether staging directories survive packing.
    pub fn keep_staging(&self) -> bool {
        self.keep_staging
    }

    /// Rejects an output root whose erasure would delete project inputs.
    ///
    /// The output root is wiped at the start of every run, so it must not be
    /// the project root, one of its parents, or a directory holding any input.
    fn check_output_dir(&self) -> crate::bundler::Result<()> {
        let output = absolute(&self.output_dir())?;
        let root = absolute(&self.root)?;
        if root.starts_with(&output) {
            crate::bail!(
                "output directory {} must not be the project root or one of its parents",
                output.display()
            );
        }

        let mut inputs = vec![
            ("properties file", self.properties_file()),
            ("readme", self.readme()),
            ("licenses directory", self.licenses_dir()),
            ("7-Zip executable", self.seven_zip()),
        ];
        for platform in Platform::ALL {
            inputs.push(("application bundles", self.bundle_pattern(platform)));
            inputs.push(("runtime archives", self.runtime_pattern(platform)));
            inputs.push(("ini template", self.ini_template(platform)));
        }

        for (what, location) in inputs {
            let location = absolute(&literal_prefix(&location))?;
            if location.starts_with(&output) {
                crate::bail!(
                    "output directory {} would delete the {} at {}",
                    output.display(),
                    what,
                    location.display()
                );
            }
        }
        Ok(())
    }
}

/// Builder for constructing [`Settings`].
///
/// # Examples
///
/// ```no_run
/// use olca_packager::bundler::{Platform, SettingsBuilder};
///
/// # fn example() -> olca_packager::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .root("/work/olca-app-build")
///     .platforms(vec![Platform::Linux])
///     .build()?;
/// assert_eq!(settings.product_name(), "openLCA");
/// # Ok(())
/// # }
/// ```
#[derive(Default, Clone, Debug)]
pub struct SettingsBuilder {
    root: Option<PathBuf>,
    product_name: Option<String>,
    version_key: Option<String>,
    properties_file: Option<String>,
    output_dir: Option<String>,
    readme: Option<String>,
    licenses_dir: Option<String>,
    linux: Option<PlatformInputs>,
    macos: Option<PlatformInputs>,
    archiver: Option<ArchiverKind>,
    seven_zip: Option<String>,
    platforms: Option<Vec<Platform>>,
    date: Option<NaiveDate>,
    keep_staging: bool,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project root. Default: current directory.
    pub fn root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the product name. Default: `openLCA`.
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Sets the version key. Default: `openlca_version_id`.
    pub fn version_key(mut self, key: impl Into<String>) -> Self {
        self.version_key = Some(key.into());
        self
    }

    /// Sets the properties file. Default: `build.properties`.
    pub fn properties_file(mut self, path: impl Into<String>) -> Self {
        self.properties_file = Some(path.into());
        self
    }

    /// Sets the output root. Default: `packages`.
    pub fn output_dir(mut self, path: impl Into<String>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Sets the readme. Default: `legal/OPENLCA_README.txt`.
    pub fn readme(mut self, path: impl Into<String>) -> Self {
        self.readme = Some(path.into());
        self
    }

    /// Sets the license directory. Default: `legal/licenses`.
    pub fn licenses_dir(mut self, path: impl Into<String>) -> Self {
        self.licenses_dir = Some(path.into());
        self
    }

    /// Overrides the inputs of one platform.
    pub fn platform_inputs(mut self, platform: Platform, inputs: PlatformInputs) -> Self {
        match platform {
            Platform::Linux => self.linux = Some(inputs),
            Platform::MacOs => self.macos = Some(inputs),
        }
        self
    }

    /// Selects the archiver. Default: [`ArchiverKind::Native`].
    pub fn archiver(mut self, kind: ArchiverKind) -> Self {
        self.archiver = Some(kind);
        self
    }

    /// Sets the 7-Zip executable location.
    pub fn seven_zip(mut self, path: impl Into<String>) -> Self {
        self.seven_zip = Some(path.into());
        self
    }

    /// Restricts packaging to `platforms`. Default: Linux, then macOS.
    pub fn platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = Some(platforms);
        self
    }

    /// Fixes the label date. Default: today.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Keeps staging directories after packing.
    pub fn keep_staging(mut self, keep: bool) -> Self {
        self.keep_staging = keep;
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Fails when the platform list is empty or names a platform twice, and
    /// when the output root would cover the project root or any input.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        let platforms = self.platforms.unwrap_or_else(|| Platform::ALL.to_vec());
        if platforms.is_empty() {
            crate::bail!("at least one platform must be selected");
        }
        for (i, platform) in platforms.iter().enumerate() {
            if platforms[..i].contains(platform) {
                crate::bail!("platform {} selected more than once", platform);
            }
        }

        let settings = Settings {
            root: self.root.unwrap_or_else(|| PathBuf::from(".")),
            product_name: self.product_name.unwrap_or_else(|| "openLCA".into()),
            version_key: self
                .version_key
                .unwrap_or_else(|| crate::version::DEFAULT_VERSION_KEY.into()),
            properties_file: self
                .properties_file
                .unwrap_or_else(|| "build.properties".into()),
            output_dir: self.output_dir.unwrap_or_else(|| "packages".into()),
            readme: self
                .readme
                .unwrap_or_else(|| "legal/OPENLCA_README.txt".into()),
            licenses_dir: self
                .licenses_dir
                .unwrap_or_else(|| "legal/licenses".into()),
            linux: self
                .linux
                .unwrap_or_else(|| PlatformInputs::defaults_for(Platform::Linux)),
            macos: self
                .macos
                .unwrap_or_else(|| PlatformInputs::defaults_for(Platform::MacOs)),
            archiver: self.archiver.unwrap_or_default(),
            seven_zip: self
                .seven_zip
                .unwrap_or_else(|| default_seven_zip().into()),
            platforms,
            date: self.date,
            keep_staging: self.keep_staging,
        };
        settings.check_output_dir()?;
        Ok(settings)
    }
}
