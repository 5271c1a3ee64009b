//! AppImage bundler - portable Linux applications.
//!
//! # Process
//!
//! 1. Creates a uniquely named stage directory holding `<name>.AppDir/usr/bin`
//! 2. Writes `AppRun` and the `.desktop` entry
//! 3. Copies icon, executable, resource and extra files
//! 4. Invokes the architecture's packaging tool
//! 5. Removes the stage and moves the AppImage into the output directory
//!
//! A stage that cannot be removed after a successful tool run fails the
//! build and discards the raw AppImage.
//!
//! The stage is removed on every exit path; see [`stage::Stage`].

pub mod control;
pub mod payload;
pub mod stage;
pub mod tool;

use crate::bundler::{settings::TargetArch, utils::fs};
use crate::error::BuildError;
use std::path::{Path, PathBuf};
use std::time::Duration;

use self::{stage::Stage, tool::Invocation};

/// Mode of the relocated AppImage.
const ARTIFACT_MODE: u32 = 0o755;

/// Inputs of the AppImage pipeline, after validation and path resolution.
#[derive(Debug)]
pub struct Assembly<'a> {
    pub metadata: &'a crate::bundler::AppMetadata,
    pub executable: &'a Path,
    pub resource: &'a Path,
    pub extra_files: &'a [PathBuf],
    pub icon: &'a Path,
    /// Absolute output directory
    pub out_dir: &'a Path,
    /// Absolute directory for the stage and the tool's raw output
    pub work_dir: &'a Path,
    /// Requested architecture, unparsed
    pub arch: &'a str,
    pub tools_dir: Option<&'a Path>,
    pub verbose: bool,
    pub timeout: Option<Duration>,
}

/// Bundles the validated inputs as an AppImage.
///
/// Returns the absolute path of the relocated artifact.
pub async fn bundle_project(assembly: &Assembly<'_>) -> Result<PathBuf, BuildError> {
    let program_name = &assembly.metadata.program_name;
    log::info!("Building AppImage for {}", program_name);

    let stage = Stage::create(assembly.work_dir, program_name).await?;

    let executable_name = payload::file_name(assembly.executable)?;
    control::write_control_files(stage.app_dir(), assembly.metadata, executable_name).await?;
    payload::materialize(
        &stage,
        assembly.icon,
        assembly.executable,
        assembly.resource,
        assembly.extra_files,
    )
    .await?;

    // Stage already exists: returning here drops it.
    let arch: TargetArch = assembly
        .arch
        .parse()
        .map_err(BuildError::UnsupportedArchitecture)?;
    log::debug!("Using architecture: {}", arch);

    let tool = tool::resolve_tool(assembly.tools_dir, arch)?;
    Invocation {
        tool: &tool,
        arch,
        app_dir: stage.app_dir(),
        work_dir: assembly.work_dir,
        verbose: assembly.verbose,
        timeout: assembly.timeout,
    }
    .run()
    .await?;

    let file_name = tool::artifact_file_name(program_name, arch);
    let raw_artifact = assembly.work_dir.join(&file_name);

    // Nothing is reported unless the stage is gone, so the raw artifact
    // must not outlive a failed release either.
    if let Err(e) = stage.release().await {
        if let Err(rm) = tokio::fs::remove_file(&raw_artifact).await {
            log::warn!("Failed to remove {}: {}", raw_artifact.display(), rm);
        }
        return Err(e.into());
    }

    // Mode is set before the move: once the file is in out_dir the build
    // can no longer fail.
    fs::set_mode(&raw_artifact, ARTIFACT_MODE).await?;

    let artifact = assembly.out_dir.join(&file_name);
    fs::move_file(&raw_artifact, &artifact).await?;

    log::info!("✓ Created AppImage: {}", artifact.display());
    Ok(artifact)
}
