//! The immutable build request.

use super::AppMetadata;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything one AppImage build needs, constructed via
/// [`BuildRequestBuilder`](super::BuildRequestBuilder).
///
/// A request is never mutated by the build. Paths the pipeline normalizes
/// (extra files, output directory) are resolved into separate values.
#[derive(Clone, Debug)]
pub struct BuildRequest {
    executable: PathBuf,
    resource: PathBuf,
    extra_files: Vec<PathBuf>,
    out_dir: PathBuf,
    metadata: AppMetadata,
    /// Raw requested architecture; parsed inside the pipeline.
    arch: String,
    verbose_tool_output: bool,
    tools_dir: Option<PathBuf>,
    work_dir: Option<PathBuf>,
    tool_timeout: Option<Duration>,
}

impl BuildRequest {
    /// Main executable copied to `usr/bin` and started by `AppRun`.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Resource payload copied next to the executable.
    pub fn resource(&self) -> &Path {
        &self.resource
    }

    /// Additional files copied into `usr/bin`, in order.
    pub fn extra_files(&self) -> &[PathBuf] {
        &self.extra_files
    }

    /// Directory the finished `.AppImage` is moved into.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Presentation metadata.
    pub fn metadata(&self) -> &AppMetadata {
        &self.metadata
    }

    /// Program name, already sanitized.
    pub fn program_name(&self) -> &str {
        &self.metadata.program_name
    }

    /// Requested target architecture as given by the caller.
    pub fn arch(&self) -> &str {
        &self.arch
    }

    /// Whether the packaging tool's stdout/stderr are shown.
    pub fn verbose_tool_output(&self) -> bool {
        self.verbose_tool_output
    }

    /// Directory holding the packaging tool binaries, if overridden.
    pub fn tools_dir(&self) -> Option<&Path> {
        self.tools_dir.as_deref()
    }

    /// Directory used for staging and for the tool's raw output.
    ///
    /// None means the process working directory at build time.
    pub fn work_dir(&self) -> Option<&Path> {
        self.work_dir.as_deref()
    }

    /// Upper bound on the packaging tool's run time. None waits forever.
    pub fn tool_timeout(&self) -> Option<Duration> {
        self.tool_timeout
    }

    /// Creates a new BuildRequest (used by BuildRequestBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        executable: PathBuf,
        resource: PathBuf,
        extra_files: Vec<PathBuf>,
        out_dir: PathBuf,
        metadata: AppMetadata,
        arch: String,
        verbose_tool_output: bool,
        tools_dir: Option<PathBuf>,
        work_dir: Option<PathBuf>,
        tool_timeout: Option<Duration>,
    ) -> Self {
        Self {
            executable,
            resource,
            extra_files,
            out_dir,
            metadata,
            arch,
            verbose_tool_output,
            tools_dir,
            work_dir,
            tool_timeout,
        }
    }
}
