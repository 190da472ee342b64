//! End-to-end packaging runs against a fixture build project.

use chrono::NaiveDate;
use flate2::read::GzDecoder;
use olca_packager::bundler::{
    Bundler, NativeArchiver, Platform, PlatformOutcome, Settings, SettingsBuilder,
};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

const LAUNCHER_JAR: &str = "org.eclipse.equinox.launcher_1.6.400.v20210924-0641.jar";
const LAUNCHER_LIB: &str = "org.eclipse.equinox.launcher.cocoa.macosx.x86_64_1.2.700.v20220509-1244";

const MACOS_INI: &str = "-startup\r\n../Eclipse/plugins/{launcher_jar}\r\n--launcher.library\r\n../Eclipse/plugins/{launcher_lib}\r\n-vm\r\n../Eclipse/jre/Contents/Home/bin/java\r\n";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
    let options = zip::write::SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

fn write_runtime_tar(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut builder = tar::Builder::new(File::create(path).unwrap());
    let data = b"#!/bin/sh\n";
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o755);
    header.set_cksum();
    builder
        .append_data(&mut header, "jre1.8.0_282/bin/java", &data[..])
        .unwrap();
    builder.finish().unwrap();
}

/// Minimal openLCA build project with inputs for both platforms.
fn build_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(&root.join("build.properties"), "# build\nopenlca_version_id = 2.1.0\n");
    write(&root.join("legal/OPENLCA_README.txt"), "readme");
    write(&root.join("legal/licenses/epl-2.0.txt"), "EPL");
    write(&root.join("templates/openLCA_Linux.ini"), "-vm\njre/bin/java\n");
    write(&root.join("templates/openLCA_macOS.ini"), MACOS_INI);

    write_zip(
        &root.join("builds/openlca_2.1.0-linux.gtk.x86_64.zip"),
        &[
            ("openLCA/openLCA", "elf"),
            ("openLCA/plugins/olca-app.jar", "jar"),
        ],
    );
    let launcher_jar = format!("openLCA/plugins/{LAUNCHER_JAR}");
    let launcher_lib = format!("openLCA/plugins/{LAUNCHER_LIB}/eclipse_11801.so");
    write_zip(
        &root.join("builds/openlca_2.1.0-macosx.cocoa.x86_64.zip"),
        &[
            ("openLCA/openLCA.app/Contents/Info.plist", "plist"),
            ("openLCA/openLCA.app/Contents/MacOS/openLCA", "mach-o"),
            ("openLCA/configuration/config.ini", "osgi"),
            ("openLCA/p2/.lock", ""),
            ("openLCA/p2/org.eclipse.equinox.p2.engine/.lock", ""),
            ("openLCA/p2/org.eclipse.equinox.p2.engine/profile.txt", "profile"),
            (launcher_jar.as_str(), "jar"),
            (launcher_lib.as_str(), "so"),
        ],
    );

    write_runtime_tar(&root.join("runtime/jre/jre-8u282-linux-x64.tar"));
    write_runtime_tar(&root.join("runtime/jre/jre-8u282-macosx-x64.tar"));
    dir
}

fn settings(root: &Path, platforms: Vec<Platform>, keep_staging: bool) -> Settings {
    SettingsBuilder::new()
        .root(root)
        .platforms(platforms)
        .date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
        .keep_staging(keep_staging)
        .build()
        .unwrap()
}

fn entries<R: Read>(reader: R) -> Vec<String> {
    let mut archive = tar::Archive::new(reader);
    archive
        .entries()
        .unwrap()
        .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[tokio::test]
async fn linux_package_contains_app_runtime_and_legal_files() {
    let project = build_project();
    let root = project.path();
    let bundler = Bundler::with_archiver(
        settings(root, vec![Platform::Linux], false),
        NativeArchiver,
    );

    let report = bundler.run().await.unwrap();

    assert!(report.is_success(), "{:?}", report.platforms);
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.version, "2.1.0");
    assert_eq!(report.label, "2.1.0_2024-03-07");
    assert!(report.warnings.is_empty());

    let tar_gz = root.join("packages/openLCA_linux_2.1.0_2024-03-07.tar.gz");
    let tar = root.join("packages/openLCA_linux_2.1.0_2024-03-07.tar");
    assert!(tar_gz.is_file());
    assert!(tar.is_file());
    assert!(!root.join("packages/linux").exists());

    let artifact = report.artifacts().next().unwrap();
    assert_eq!(artifact.paths, vec![tar_gz.clone(), tar.clone()]);
    assert_eq!(artifact.size, fs::metadata(&tar_gz).unwrap().len());
    assert_eq!(artifact.checksum.len(), 64);

    let names = entries(GzDecoder::new(File::open(&tar_gz).unwrap()));
    for expected in [
        "openLCA/openLCA",
        "openLCA/openLCA.ini",
        "openLCA/OPENLCA_README.txt",
        "openLCA/licenses/epl-2.0.txt",
        "openLCA/jre/bin/java",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {expected} in {names:?}");
    }
    assert!(!names.iter().any(|n| n.contains("jre1.8.0_282")));
    assert_eq!(names, entries(File::open(&tar).unwrap()));
}

#[tokio::test]
async fn macos_package_relocates_into_app_and_renders_ini() {
    let project = build_project();
    let root = project.path();
    let bundler = Bundler::with_archiver(
        settings(root, vec![Platform::MacOs], true),
        NativeArchiver,
    );

    let report = bundler.run().await.unwrap();

    assert!(report.is_success(), "{:?}", report.platforms);
    let missing: Vec<_> = report.warnings.iter().map(|w| w.message.as_str()).collect();
    assert_eq!(missing.len(), 2, "{missing:?}");
    assert!(missing[0].contains(".eclipseproduct") && missing[0].contains("does not exist"));
    assert!(missing[1].contains("artifacts.xml"));
    assert!(report.warnings.iter().all(|w| w.platform == Platform::MacOs));

    let app = root.join("packages/macos/openLCA/openLCA.app");
    let ini = fs::read_to_string(app.join("Contents/MacOS/openLCA.ini")).unwrap();
    assert_eq!(
        ini,
        format!(
            "-startup\n../Eclipse/plugins/{LAUNCHER_JAR}\n--launcher.library\n../Eclipse/plugins/{LAUNCHER_LIB}\n-vm\n../Eclipse/jre/Contents/Home/bin/java\n"
        )
    );
    assert!(app.join("jre/bin/java").is_file());
    assert!(app.join("configuration/config.ini").is_file());
    assert!(!app.join("p2/.lock").exists());
    assert!(!app.join("p2/org.eclipse.equinox.p2.engine/.lock").exists());
    assert!(app.join("p2/org.eclipse.equinox.p2.engine/profile.txt").is_file());
    assert!(!root.join("packages/macos/openLCA/plugins").exists());

    let tar_gz = root.join("packages/openLCA_macOS_2.1.0_2024-03-07.tar.gz");
    let names = entries(GzDecoder::new(File::open(&tar_gz).unwrap()));
    assert!(names.iter().all(|n| n.starts_with("openLCA.app")), "{names:?}");
    assert!(names.iter().any(|n| n == "openLCA.app/Contents/MacOS/openLCA.ini"));
    assert!(names.iter().any(|n| n == &format!("openLCA.app/plugins/{LAUNCHER_JAR}")));
}

#[tokio::test]
async fn failed_platform_does_not_stop_the_next_one() {
    let project = build_project();
    let root = project.path();
    fs::remove_file(root.join("builds/openlca_2.1.0-linux.gtk.x86_64.zip")).unwrap();
    let bundler = Bundler::with_archiver(
        settings(root, vec![Platform::Linux, Platform::MacOs], false),
        NativeArchiver,
    );

    let report = bundler.run().await.unwrap();

    assert_eq!(report.exit_code(), 1);
    match &report.platforms[0].outcome {
        PlatformOutcome::Failed(e) => {
            assert!(e.is_missing_input());
            assert!(e.to_string().contains("Linux package"));
        }
        PlatformOutcome::Packaged(_) => panic!("Linux must fail without its bundle"),
    }
    assert!(matches!(report.platforms[1].outcome, PlatformOutcome::Packaged(_)));
    assert!(root.join("packages/openLCA_macOS_2.1.0_2024-03-07.tar.gz").is_file());
    assert!(!root.join("packages/openLCA_linux_2.1.0_2024-03-07.tar.gz").exists());
}

#[tokio::test]
async fn ambiguous_runtime_fails_the_platform() {
    let project = build_project();
    let root = project.path();
    write_runtime_tar(&root.join("runtime/jre/jre-11.0.2-linux-x64.tar"));
    let bundler = Bundler::with_archiver(
        settings(root, vec![Platform::Linux], false),
        NativeArchiver,
    );

    let report = bundler.run().await.unwrap();

    let (platform, err) = report.failures().next().unwrap();
    assert_eq!(platform, Platform::Linux);
    assert!(err.to_string().contains("found 2 candidates"), "{err}");
}

#[tokio::test]
async fn missing_version_key_yields_empty_version_label() {
    let project = build_project();
    let root = project.path();
    write(&root.join("build.properties"), "other_key = 1\n");
    let bundler = Bundler::with_archiver(
        settings(root, vec![Platform::Linux], false),
        NativeArchiver,
    );

    let report = bundler.run().await.unwrap();

    assert_eq!(report.version, "");
    assert_eq!(report.label, "_2024-03-07");
    assert!(root.join("packages/openLCA_linux__2024-03-07.tar.gz").is_file());
}

#[tokio::test]
async fn missing_launcher_artifacts_fail_macos() {
    let project = build_project();
    let root = project.path();
    write_zip(
        &root.join("builds/openlca_2.1.0-macosx.cocoa.x86_64.zip"),
        &[
            ("openLCA/openLCA.app/Contents/MacOS/openLCA", "mach-o"),
            ("openLCA/configuration/config.ini", "osgi"),
            ("openLCA/plugins/olca-app.jar", "jar"),
        ],
    );
    let bundler = Bundler::with_archiver(
        settings(root, vec![Platform::MacOs], false),
        NativeArchiver,
    );

    let report = bundler.run().await.unwrap();

    assert_eq!(report.exit_code(), 1);
    let (platform, err) = report.failures().next().unwrap();
    assert_eq!(platform, Platform::MacOs);
    assert!(err.is_missing_input());
    assert!(err.to_string().contains("launcher jar"), "{err}");
    assert!(!root.join("packages/openLCA_macOS_2.1.0_2024-03-07.tar.gz").exists());
    assert!(!root.join("packages/openLCA_macOS_2.1.0_2024-03-07.tar").exists());
    assert!(root.join("packages/macos").is_dir());
}

#[test]
fn output_dir_over_the_project_leaves_inputs_alone() {
    let project = build_project();
    let root = project.path();

    for output_dir in [".", "", "builds"] {
        let result = SettingsBuilder::new()
            .root(root)
            .output_dir(output_dir)
            .build();
        assert!(result.is_err(), "output_dir {output_dir:?} was accepted");
    }

    assert!(root.join("build.properties").is_file());
    assert!(root.join("builds/openlca_2.1.0-linux.gtk.x86_64.zip").is_file());
    assert!(root.join("runtime/jre").is_dir());
    assert!(root.join("legal/licenses").is_dir());
}

#[tokio::test]
async fn macos_template_may_omit_the_launcher_library() {
    let project = build_project();
    let root = project.path();
    write(
        &root.join("templates/openLCA_macOS.ini"),
        "-startup\r\n../Eclipse/plugins/{launcher_jar}\r\n",
    );
    let bundler = Bundler::with_archiver(
        settings(root, vec![Platform::MacOs], true),
        NativeArchiver,
    );

    let report = bundler.run().await.unwrap();

    assert!(report.is_success(), "{:?}", report.platforms);
    let ini = fs::read_to_string(
        root.join("packages/macos/openLCA/openLCA.app/Contents/MacOS/openLCA.ini"),
    )
    .unwrap();
    assert_eq!(ini, format!("-startup\n../Eclipse/plugins/{LAUNCHER_JAR}\n"));
}
