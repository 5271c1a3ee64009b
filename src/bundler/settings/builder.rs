//! Builder for constructing a BuildRequest.

use super::{AppMetadata, BuildRequest, metadata::sanitize_program_name};
use crate::bundler::error::{Context, Error};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builder for constructing [`BuildRequest`].
///
/// Only checks that required fields are present. Whether the paths exist is
/// decided by the build itself, which reports `PATH_NOT_FOUND`.
///
/// # Examples
///
/// ```no_run
/// use neu_appimage::bundler::{AppMetadata, BuildRequestBuilder, Category};
///
/// # fn example() -> neu_appimage::bundler::Result<()> {
/// let request = BuildRequestBuilder::new()
///     .executable("dist/demo-linux_x64")
///     .resource("dist/resources.neu")
///     .out_dir("dist")
///     .metadata(AppMetadata {
///         program_name: "Demo".into(),
///         icon: "assets/icon.png".into(),
///         categories: vec![Category::Utility],
///         ..Default::default()
///     })
///     .arch("x86_64")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct BuildRequestBuilder {
    executable: Option<PathBuf>,
    resource: Option<PathBuf>,
    extra_files: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    metadata: Option<AppMetadata>,
    arch: Option<String>,
    verbose_tool_output: bool,
    tools_dir: Option<PathBuf>,
    work_dir: Option<PathBuf>,
    tool_timeout: Option<Duration>,
}

impl BuildRequestBuilder {
    /// Creates a new request builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the main executable.
    ///
    /// # Required
    pub fn executable<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.executable = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the resource payload.
    ///
    /// # Required
    pub fn resource<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.resource = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets extra files to copy into `usr/bin`.
    ///
    /// Default: Empty
    pub fn extra_files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.extra_files = files
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();
        self
    }

    /// Sets the directory that receives the finished AppImage.
    ///
    /// # Required
    pub fn out_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.out_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets presentation metadata.
    ///
    /// # Required
    pub fn metadata(mut self, metadata: AppMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the target architecture (`x86_64`, `i386`, `x64` or `x32`).
    ///
    /// Unknown values are accepted here and rejected by the build with
    /// `UNSUPPORTED_ARCHITECTURE`.
    ///
    /// # Required
    pub fn arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = Some(arch.into());
        self
    }

    /// Shows the packaging tool's output.
    ///
    /// Default: false
    pub fn verbose_tool_output(mut self, verbose: bool) -> Self {
        self.verbose_tool_output = verbose;
        self
    }

    /// Overrides the directory the packaging tools are looked up in.
    ///
    /// Default: `$APPIMAGETOOL_DIR`, then `<exe dir>/../appimagetool`
    pub fn tools_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.tools_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the directory used for staging and raw tool output.
    ///
    /// Default: process working directory
    pub fn work_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.work_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Kills the packaging tool if it runs longer than `timeout`.
    ///
    /// Default: None (wait indefinitely)
    pub fn tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = Some(timeout);
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, if the program name
    /// is empty after sanitizing, if no category is given, or if the icon
    /// path is empty.
    pub fn build(self) -> crate::bundler::Result<BuildRequest> {
        let mut metadata = self.metadata.context("metadata is required")?;

        metadata.program_name = sanitize_program_name(&metadata.program_name);
        if metadata.program_name.is_empty() {
            return Err(Error::MissingField("program name"));
        }
        if metadata.categories.is_empty() {
            return Err(Error::MissingField("at least one category"));
        }
        if metadata.icon.as_os_str().is_empty() {
            return Err(Error::MissingField("icon"));
        }

        Ok(BuildRequest::new(
            self.executable.ok_or(Error::MissingField("executable"))?,
            self.resource.ok_or(Error::MissingField("resource"))?,
            self.extra_files,
            self.out_dir.ok_or(Error::MissingField("out_dir"))?,
            metadata,
            self.arch.ok_or(Error::MissingField("arch"))?,
            self.verbose_tool_output,
            self.tools_dir,
            self.work_dir,
            self.tool_timeout,
        ))
    }
}
