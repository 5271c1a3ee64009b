//! Copies the icon, executable, resource and extra files into the AppDir.

use super::{control::ICON_FILE_NAME, stage::Stage};
use crate::bundler::{
    error::{Context, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Mode given to the main executable, both the caller's file and the copy.
const EXECUTABLE_MODE: u32 = 0o777;

/// Returns the final path component of `path` as UTF-8.
pub fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("{} has no usable file name", path.display()))
}

/// Fills the staged AppDir.
///
/// Files land in `usr/bin` under their own base names. Later files
/// overwrite earlier ones with the same name; extra files are copied after
/// the executable and the resource, so they win collisions with those too.
///
/// The caller's executable is chmod'ed 0777 in place before it is copied.
pub async fn materialize(
    stage: &Stage,
    icon: &Path,
    executable: &Path,
    resource: &Path,
    extra_files: &[PathBuf],
) -> Result<()> {
    fs::copy_file(icon, &stage.app_dir().join(ICON_FILE_NAME)).await?;

    fs::set_mode(executable, EXECUTABLE_MODE).await?;
    let staged_executable = stage.bin_dir().join(file_name(executable)?);
    fs::copy_file(executable, &staged_executable).await?;
    fs::set_mode(&staged_executable, EXECUTABLE_MODE).await?;

    fs::copy_file(resource, &stage.bin_dir().join(file_name(resource)?)).await?;

    for extra in extra_files {
        fs::copy_file(extra, &stage.bin_dir().join(file_name(extra)?)).await?;
    }

    log::debug!(
        "Copied {} payload file(s) into {}",
        2 + extra_files.len(),
        stage.bin_dir().display()
    );
    Ok(())
}
