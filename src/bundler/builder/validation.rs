//! Input path validation.
//!
//! Runs before anything is written to disk. Reports only the first missing
//! path.

use crate::bundler::settings::BuildRequest;
use crate::error::BuildError;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Request paths after validation, all absolute.
#[derive(Debug, Clone)]
pub struct ValidatedPaths {
    pub executable: PathBuf,
    pub resource: PathBuf,
    pub out_dir: PathBuf,
    pub extra_files: Vec<PathBuf>,
    pub icon: PathBuf,
}

fn absolute(path: &Path) -> Result<PathBuf, BuildError> {
    path.absolutize()
        .map(|p| p.into_owned())
        .map_err(|e| BuildError::Unknown(format!("resolving {}: {}", path.display(), e)))
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Checks executable, resource, output directory, each extra file and the
/// icon, in that order.
pub async fn validate(request: &BuildRequest) -> Result<ValidatedPaths, BuildError> {
    if !is_file(request.executable()).await {
        return Err(BuildError::path_not_found("File", request.executable()));
    }
    if !is_file(request.resource()).await {
        return Err(BuildError::path_not_found("File", request.resource()));
    }
    if !is_dir(request.out_dir()).await {
        return Err(BuildError::path_not_found("Folder", request.out_dir()));
    }

    let mut extra_files = Vec::with_capacity(request.extra_files().len());
    for file in request.extra_files() {
        let file = absolute(file)?;
        if !is_file(&file).await {
            return Err(BuildError::path_not_found("File", file));
        }
        extra_files.push(file);
    }

    let icon = &request.metadata().icon;
    if !is_file(icon).await {
        return Err(BuildError::path_not_found("Icon", icon));
    }

    Ok(ValidatedPaths {
        executable: absolute(request.executable())?,
        resource: absolute(request.resource())?,
        out_dir: absolute(request.out_dir())?,
        extra_files,
        icon: absolute(icon)?,
    })
}
