//! File system utilities for bundling.
//!
//! Thin async wrappers that attach the offending path to every error.

use crate::bundler::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Copies a regular file byte-for-byte, replacing any existing file at `to`.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to).await.fs_context("copying file", from)?;
    log::debug!("Copied {} -> {}", from.display(), to.display());
    Ok(())
}

/// Sets the Unix permission bits of `path` to `mode`.
#[cfg(unix)]
pub async fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .await
        .fs_context("setting permissions of", path)
}

/// Sets the Unix permission bits of `path` to `mode`.
#[cfg(not(unix))]
pub async fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Moves a file, falling back to copy + remove when `from` and `to` live on
/// different filesystems.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "{} and {} are on different filesystems, copying instead",
                from.display(),
                to.display()
            );
            fs::copy(from, to).await.fs_context("copying artifact to", to)?;
            fs::remove_file(from)
                .await
                .fs_context("removing raw artifact", from)
        }
        Err(e) => Err(e).fs_context("moving artifact", from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_overwrites_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        std::fs::write(&src, b"new").unwrap();
        std::fs::write(&dst, b"old contents").unwrap();

        copy_file(&src, &dst).await.unwrap();
        assert_eq!(std::fs::read(&dst).unwrap(), b"new");
    }

    #[tokio::test]
    async fn copy_of_missing_file_names_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = copy_file(&missing, &dir.path().join("x")).await.unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn set_mode_applies_exact_bits() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        std::fs::write(&file, b"").unwrap();

        set_mode(&file, 0o777).await.unwrap();
        let mode = std::fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o777);
    }

    #[tokio::test]
    async fn remove_dir_all_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        remove_dir_all(&dir.path().join("a")).await.unwrap();
        remove_dir_all(&dir.path().join("a")).await.unwrap();
        assert!(!dir.path().join("a").exists());
    }

    #[tokio::test]
    async fn move_file_renames() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("Demo-x86_64.AppImage");
        let to_dir = dir.path().join("out");
        std::fs::create_dir(&to_dir).unwrap();
        std::fs::write(&from, b"image").unwrap();

        let to = to_dir.join("Demo-x86_64.AppImage");
        move_file(&from, &to).await.unwrap();
        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"image");
    }
}
