//! In-process archiver built on the `zip`, `tar` and `flate2` crates.

use super::{ArchiveStatus, Archiver};
use crate::bundler::{
    error::{Error, ErrorExt, Result},
    utils::lookup,
};
use flate2::{Compression, read::GzDecoder, write::GzEncoder};
use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Archiver that needs no external tools.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeArchiver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Zip,
    Tar,
    TarGz,
}

fn detect_format(archive: &Path) -> Result<Format> {
    let name = archive
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name.ends_with(".zip") {
        Ok(Format::Zip)
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        Ok(Format::TarGz)
    } else if name.ends_with(".tar") {
        Ok(Format::Tar)
    } else {
        Err(Error::UnsupportedArchive(archive.to_path_buf()))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::GenericError(format!("Join error: {}", e)))?
}

impl Archiver for NativeArchiver {
    async fn extract(&self, archive: &Path, dest_dir: &Path) -> Result<ArchiveStatus> {
        log::info!("unzip {} to {}", archive.display(), dest_dir.display());
        let format = detect_format(archive)?;
        tokio::fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating extraction directory", dest_dir)?;

        let archive = archive.to_path_buf();
        let dest_dir = dest_dir.to_path_buf();
        run_blocking(move || {
            let file = File::open(&archive).fs_context("opening archive", &archive)?;
            match format {
                Format::Zip => {
                    let mut zip = zip::ZipArchive::new(BufReader::new(file))?;
                    zip.extract(&dest_dir)?;
                }
                Format::Tar => {
                    tar::Archive::new(BufReader::new(file))
                        .unpack(&dest_dir)
                        .fs_context("unpacking tar into", &dest_dir)?;
                }
                Format::TarGz => {
                    tar::Archive::new(GzDecoder::new(BufReader::new(file)))
                        .unpack(&dest_dir)
                        .fs_context("unpacking tar.gz into", &dest_dir)?;
                }
            }
            Ok(())
        })
        .await?;

        Ok(ArchiveStatus::SUCCESS)
    }

    async fn create_tar(&self, source_glob: &str, output: &Path) -> Result<ArchiveStatus> {
        let sources = lookup::find_all(Path::new(source_glob))?;
        if sources.is_empty() {
            return Err(Error::NotFound {
                what: "files to pack".into(),
                pattern: source_glob.to_string(),
            });
        }
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating output directory", parent)?;
        }

        let output = output.to_path_buf();
        run_blocking(move || write_tar(&sources, &output)).await?;
        Ok(ArchiveStatus::SUCCESS)
    }

    async fn gzip(&self, input: &Path, output: &Path) -> Result<ArchiveStatus> {
        let input = input.to_path_buf();
        let output = output.to_path_buf();
        run_blocking(move || {
            let mut src = File::open(&input).fs_context("opening tar file", &input)?;
            let dest = File::create(&output).fs_context("creating tar.gz file", &output)?;
            let mut encoder = GzEncoder::new(BufWriter::new(dest), Compression::default());
            io::copy(&mut src, &mut encoder)?;
            let mut finished = encoder.finish()?;
            finished.flush()?;
            Ok(())
        })
        .await?;
        Ok(ArchiveStatus::SUCCESS)
    }
}

fn write_tar(sources: &[PathBuf], output: &Path) -> Result<()> {
    let file = File::create(output).fs_context("creating tar file", output)?;
    let mut builder = tar::Builder::new(BufWriter::new(file));
    builder.follow_symlinks(false);

    for source in sources {
        let name = source
            .file_name()
            .ok_or_else(|| Error::GenericError(format!("{source:?} has no file name")))?;
        if source.is_dir() {
            builder
                .append_dir_all(name, source)
                .fs_context("adding directory to tar", source)?;
        } else {
            builder
                .append_path_with_name(source, name)
                .fs_context("adding file to tar", source)?;
        }
    }

    let mut writer = builder.into_inner()?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for (name, content) in entries {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    fn tar_entries(path: &Path) -> Vec<String> {
        let mut archive = tar::Archive::new(File::open(path).unwrap());
        let mut names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn detects_formats_from_names() {
        assert_eq!(detect_format(Path::new("a/openlca_2-linux.gtk.x86_64.zip")).unwrap(), Format::Zip);
        assert_eq!(detect_format(Path::new("jre-8-linux-x64.tar")).unwrap(), Format::Tar);
        assert_eq!(detect_format(Path::new("x.TAR.GZ")).unwrap(), Format::TarGz);
        assert!(matches!(
            detect_format(Path::new("x.7z")),
            Err(Error::UnsupportedArchive(_))
        ));
    }

    #[tokio::test]
    async fn extracts_zip_creating_destination() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("bundle.zip");
        write_zip(&zip_path, &[("openLCA/openLCA", "bin"), ("openLCA/plugins/a.jar", "jar")]);
        let dest = dir.path().join("packages/linux");

        let status = NativeArchiver.extract(&zip_path, &dest).await.unwrap();

        assert!(status.success());
        assert_eq!(fs::read_to_string(dest.join("openLCA/plugins/a.jar")).unwrap(), "jar");
    }

    #[tokio::test]
    async fn pack_writes_tar_and_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("linux");
        fs::create_dir_all(staging.join("openLCA/jre/bin")).unwrap();
        fs::write(staging.join("openLCA/jre/bin/java"), "java").unwrap();
        fs::write(staging.join("openLCA/openLCA.ini"), "-vm").unwrap();

        let glob = format!("{}/*", staging.display());
        let base = dir.path().join("openLCA_linux_2.1.0_2024-03-07");
        let paths = NativeArchiver.pack(&glob, &base).await.unwrap();

        assert_eq!(paths[0], dir.path().join("openLCA_linux_2.1.0_2024-03-07.tar.gz"));
        assert_eq!(paths[1], dir.path().join("openLCA_linux_2.1.0_2024-03-07.tar"));

        let names = tar_entries(&paths[1]);
        assert!(names.contains(&"openLCA/jre/bin/java".to_string()));
        assert!(names.contains(&"openLCA/openLCA.ini".to_string()));

        let mut decoded = Vec::new();
        GzDecoder::new(File::open(&paths[0]).unwrap())
            .read_to_end(&mut decoded)
            .unwrap();
        assert_eq!(decoded, fs::read(&paths[1]).unwrap());
    }

    #[tokio::test]
    async fn pack_with_no_sources_fails() {
        let dir = tempfile::tempdir().unwrap();
        let glob = format!("{}/empty/*", dir.path().display());
        let err = NativeArchiver
            .pack(&glob, &dir.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(!dir.path().join("out.tar").exists());
    }

    #[tokio::test]
    async fn extracts_tar_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir_all(src.join("jre1.8.0_202/bin")).unwrap();
        fs::write(src.join("jre1.8.0_202/bin/java"), "java").unwrap();
        let tar_path = dir.path().join("jre-8u202-linux-x64.tar");
        write_tar(&[src.join("jre1.8.0_202")], &tar_path).unwrap();

        let dest = dir.path().join("openLCA");
        NativeArchiver.extract(&tar_path, &dest).await.unwrap();

        assert!(dest.join("jre1.8.0_202/bin/java").is_file());
    }
}
