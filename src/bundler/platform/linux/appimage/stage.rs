//! Ephemeral staging directory holding the AppDir.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix of every stage directory created in the working directory.
pub const STAGE_PREFIX: &str = ".temp";

/// Uniquely named temporary directory owned by one in-flight build.
///
/// The directory is removed when the stage is dropped, so every early
/// return in the pipeline cleans up. A removal failure on that path is only
/// logged: the error that caused the early return is the one reported.
/// The success path calls [`Stage::release`] instead, which does report.
/// Either way a directory that is already gone counts as removed.
#[derive(Debug)]
pub struct Stage {
    dir: Option<TempDir>,
    root: PathBuf,
    app_dir: PathBuf,
    bin_dir: PathBuf,
}

impl Stage {
    /// Creates `<work_dir>/.tempXXXXXX/<program_name>.AppDir/usr/bin`.
    pub async fn create(work_dir: &Path, program_name: &str) -> Result<Self> {
        let parent = work_dir.to_path_buf();
        let dir = tokio::task::spawn_blocking(move || {
            tempfile::Builder::new()
                .prefix(STAGE_PREFIX)
                .tempdir_in(parent)
        })
        .await
        .map_err(|e| Error::GenericError(format!("stage creation task failed: {e}")))?
        .fs_context("creating stage directory in", work_dir)?;

        let app_dir = dir.path().join(format!("{program_name}.AppDir"));
        let bin_dir = app_dir.join("usr").join("bin");

        // Guard is live from here on; the directory goes away if creating
        // the AppDir layout fails.
        let stage = Self {
            root: dir.path().to_path_buf(),
            dir: Some(dir),
            app_dir,
            bin_dir,
        };

        tokio::fs::create_dir(&stage.app_dir)
            .await
            .fs_context("creating AppDir", &stage.app_dir)?;
        tokio::fs::create_dir_all(&stage.bin_dir)
            .await
            .fs_context("creating AppDir structure", &stage.bin_dir)?;

        log::debug!("Staging AppDir at {}", stage.app_dir.display());
        Ok(stage)
    }

    /// Root of the stage directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// `<program_name>.AppDir`
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// `<program_name>.AppDir/usr/bin`
    pub fn bin_dir(&self) -> &Path {
        &self.bin_dir
    }

    /// Removes the stage directory, reporting failure.
    ///
    /// A stage that is already gone counts as removed.
    pub async fn release(mut self) -> Result<()> {
        match self.dir.take() {
            Some(dir) => fs::remove_dir_all(&dir.keep()).await,
            None => Ok(()),
        }
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        // Best-effort: never replaces the error that got us here.
        if let Some(dir) = self.dir.take()
            && let Err(e) = dir.close()
            && e.kind() != std::io::ErrorKind::NotFound
        {
            log::warn!(
                "Failed to remove stage directory {}: {}",
                self.root.display(),
                e
            );
        }
    }
}
