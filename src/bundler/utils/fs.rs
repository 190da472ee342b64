//! File system utilities for packaging.
//!
//! Provides file operations with automatic directory creation,
//! symlink preservation, and path-carrying errors.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .await
            .fs_context("removing directory", path)
    } else {
        Ok(())
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file to", to)?;
    Ok(())
}

/// Copies a file into `dir`, keeping its file name.
pub async fn copy_into(from: &Path, dir: &Path) -> Result<PathBuf> {
    let name = from
        .file_name()
        .ok_or_else(|| Error::GenericError(format!("{from:?} has no file name")))?;
    let to = dir.join(name);
    copy_file(from, &to).await?;
    Ok(to)
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!("{from:?} is not a Directory")));
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent)?;
    }

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry?;
        debug_assert!(entry.path().starts_with(from));
        let rel_path = entry.path().strip_prefix(from)?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_symlink() {
            let target = fs::read_link(entry.path()).await?;
            if entry.path().is_dir() {
                symlink_dir(&target, &dest_path)?;
            } else {
                symlink_file(&target, &dest_path)?;
            }
        } else if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)
                .await
                .fs_context("creating directory", &dest_path)?;
        } else {
            fs::copy(entry.path(), &dest_path)
                .await
                .fs_context("copying file to", &dest_path)?;
        }
    }

    Ok(())
}

/// Moves a file or directory into `target_dir`, keeping its name.
///
/// Creates `target_dir` when missing. Falls back to copy-and-delete when a
/// plain rename is not possible (e.g. across devices).
pub async fn move_into(from: &Path, target_dir: &Path) -> Result<PathBuf> {
    let name = from
        .file_name()
        .ok_or_else(|| Error::GenericError(format!("{from:?} has no file name")))?;
    fs::create_dir_all(target_dir)
        .await
        .fs_context("creating directory", target_dir)?;
    let dest = target_dir.join(name);

    if let Err(e) = fs::rename(from, &dest).await {
        log::debug!(
            "Rename {} -> {} failed ({}); copying instead",
            from.display(),
            dest.display(),
            e
        );
        if from.is_dir() {
            copy_dir(from, &dest).await?;
            fs::remove_dir_all(from)
                .await
                .fs_context("removing moved directory", from)?;
        } else {
            copy_file(from, &dest).await?;
            fs::remove_file(from)
                .await
                .fs_context("removing moved file", from)?;
        }
    }
    Ok(dest)
}

/// Renames `from` to `to`.
pub async fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).await.fs_context("renaming to", to)
}

/// Deletes every regular file named `file_name` below `root`.
///
/// Returns the number of files removed.
pub async fn remove_files_named(root: &Path, file_name: &str) -> Result<usize> {
    if !root.exists() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in walkdir::WalkDir::new(root) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == file_name {
            fs::remove_file(entry.path())
                .await
                .fs_context("removing file", entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}
