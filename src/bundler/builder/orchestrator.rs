//! Main bundler orchestration and error boundary.
//!
//! This module provides the [`Bundler`] that runs host checks and input
//! validation, then hands the request to the AppImage pipeline and turns
//! every failure into a [`BuildError`].

use super::validation::validate;
use crate::bundler::{
    Host,
    platform::linux::appimage::{self, Assembly},
    settings::BuildRequest,
};
use crate::error::{BuildError, BuildResult};
use path_absolutize::Absolutize;
use std::path::PathBuf;

/// Main bundler orchestrator.
///
/// One [`Bundler::bundle`] call owns one stage directory and produces
/// exactly one [`BuildResult`].
///
/// # Known limitations
///
/// Two concurrent builds with the same program name and architecture in the
/// same working directory race on the tool's output file name. Artifacts of
/// identical inputs are structurally identical but may differ byte-wise if
/// the packaging tool embeds timestamps.
///
/// # Examples
///
/// ```no_run
/// use neu_appimage::bundler::{AppMetadata, BuildRequestBuilder, Bundler, Category};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
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
///
/// match Bundler::new(request).bundle().await {
///     Ok(path) => println!("Created {}", path.display()),
///     Err(e) => eprintln!("{} ({})", e, e.kind()),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    request: BuildRequest,
    host: Host,
}

impl Bundler {
    /// Creates a bundler for the machine this process runs on.
    pub fn new(request: BuildRequest) -> Self {
        Self {
            request,
            host: Host::current(),
        }
    }

    /// Replaces the detected host, e.g. to simulate another platform.
    pub fn with_host(mut self, host: Host) -> Self {
        self.host = host;
        self
    }

    /// Returns the request this bundler builds.
    pub fn request(&self) -> &BuildRequest {
        &self.request
    }

    /// Builds the AppImage.
    ///
    /// Host OS, input paths and host CPU are checked before anything is
    /// written. Later failures remove the stage directory and are reported
    /// as [`BuildError::UnsupportedArchitecture`] or [`BuildError::Unknown`].
    pub async fn bundle(&self) -> BuildResult {
        let result = self.run().await;
        match &result {
            Ok(path) => log::debug!("AppImage build succeeded: {}", path.display()),
            Err(e) => log::debug!("AppImage build failed ({}): {}", e.kind(), e),
        }
        result
    }

    async fn run(&self) -> BuildResult {
        if !self.host.is_linux() {
            return Err(BuildError::UnsupportedOs(self.host.os.to_string()));
        }

        let paths = validate(&self.request).await?;

        if self.host.cpu().is_none() {
            return Err(BuildError::UnsupportedOsArchitecture(
                self.host.arch.to_string(),
            ));
        }

        let work_dir = self.work_dir()?;

        appimage::bundle_project(&Assembly {
            metadata: self.request.metadata(),
            executable: &paths.executable,
            resource: &paths.resource,
            extra_files: &paths.extra_files,
            icon: &paths.icon,
            out_dir: &paths.out_dir,
            work_dir: &work_dir,
            arch: self.request.arch(),
            tools_dir: self.request.tools_dir(),
            verbose: self.request.verbose_tool_output(),
            timeout: self.request.tool_timeout(),
        })
        .await
    }

    /// Absolute directory for staging and raw tool output.
    fn work_dir(&self) -> Result<PathBuf, BuildError> {
        let dir = match self.request.work_dir() {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().map_err(|e| {
                BuildError::Unknown(format!("reading current directory: {e}"))
            })?,
        };
        dir.absolutize()
            .map(|p| p.into_owned())
            .map_err(|e| BuildError::Unknown(format!("resolving {}: {}", dir.display(), e)))
    }
}
