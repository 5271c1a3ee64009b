//! Packaging tool lookup and invocation.
//!
//! The tool is treated as opaque: given `ARCH=<arch>` and an AppDir path it
//! writes `<name>-<arch>.AppImage` into its working directory. The name is
//! computed here the same way so the artifact can be found afterwards.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::TargetArch,
};
use crate::bail;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

/// Environment variable overriding the tool directory.
pub const TOOLS_DIR_ENV: &str = "APPIMAGETOOL_DIR";

/// Generic tool name searched on `PATH` as a last resort.
const GENERIC_TOOL_NAME: &str = "appimagetool";

/// Grace period for the killed tool to be reaped after a timeout.
const KILL_GRACE: Duration = Duration::from_secs(10);

/// File name the packaging tool gives its output for `program_name`.
pub fn artifact_file_name(program_name: &str, arch: TargetArch) -> String {
    format!("{}-{}.AppImage", program_name.replace(' ', "_"), arch)
}

/// Directory the tools ship in when nothing overrides it:
/// `<dir of this executable>/../appimagetool`.
fn default_tools_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.parent()?.join("appimagetool"))
}

/// Finds the packaging tool binary for `arch`.
///
/// Looks in `tools_dir`, then `$APPIMAGETOOL_DIR`, then the installation
/// directory; falls back to a `PATH` search for the variant's file name and
/// finally for plain `appimagetool`.
pub fn resolve_tool(tools_dir: Option<&Path>, arch: TargetArch) -> Result<PathBuf> {
    let file_name = arch.tool_file_name();

    let dir = tools_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(TOOLS_DIR_ENV).map(PathBuf::from))
        .or_else(default_tools_dir);

    if let Some(dir) = &dir {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            log::debug!("Using packaging tool {}", candidate.display());
            return Ok(candidate);
        }
        log::debug!("{} not found", candidate.display());
    }

    for name in [file_name, GENERIC_TOOL_NAME] {
        if let Ok(path) = which::which(name) {
            log::debug!("Using packaging tool {} from PATH", path.display());
            return Ok(path);
        }
    }

    let expected = dir
        .map(|d| d.join(file_name).display().to_string())
        .unwrap_or_else(|| file_name.to_string());
    bail!("packaging tool not found: expected {}", expected)
}

/// How to run the packaging tool.
#[derive(Debug)]
pub struct Invocation<'a> {
    pub tool: &'a Path,
    pub arch: TargetArch,
    pub app_dir: &'a Path,
    pub work_dir: &'a Path,
    pub verbose: bool,
    pub timeout: Option<Duration>,
}

impl Invocation<'_> {
    /// Runs the tool to completion.
    ///
    /// Fails when the tool cannot be started, exits non-zero, or outlives
    /// the timeout (it is killed in that case).
    pub async fn run(&self) -> Result<()> {
        let command_line = format!(
            "ARCH={} {} \"{}\"",
            self.arch,
            self.tool.display(),
            self.app_dir.display()
        );
        log::info!("Running {}", command_line);

        let stdio = || {
            if self.verbose {
                Stdio::inherit()
            } else {
                Stdio::null()
            }
        };

        let mut child = tokio::process::Command::new(self.tool)
            .env("ARCH", self.arch.as_str())
            .arg(self.app_dir)
            .current_dir(self.work_dir)
            .stdin(Stdio::null())
            .stdout(stdio())
            .stderr(stdio())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: command_line.clone(),
                error,
            })?;

        let status = match self.timeout {
            None => child.wait().await,
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_elapsed) => {
                    log::warn!("Packaging tool timed out after {:?}, terminating...", limit);
                    if let Err(e) = child.kill().await {
                        log::warn!("Failed to kill packaging tool: {}", e);
                    }
                    let _ = tokio::time::timeout(KILL_GRACE, child.wait()).await;
                    bail!("command {} timed out after {:?}", command_line, limit);
                }
            },
        }
        .fs_context("waiting for packaging tool", self.tool)?;

        if !status.success() {
            bail!("command failed: {} ({})", command_line, status);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_name_replaces_spaces() {
        assert_eq!(
            artifact_file_name("Demo", TargetArch::X86_64),
            "Demo-x86_64.AppImage"
        );
        assert_eq!(
            artifact_file_name("My Cool App", TargetArch::I386),
            "My_Cool_App-i386.AppImage"
        );
    }

    #[test]
    fn resolves_tool_from_explicit_dir() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("appimagetool-i686.AppImage");
        std::fs::write(&tool, b"#!/bin/sh\n").unwrap();

        let found = resolve_tool(Some(dir.path()), TargetArch::I386).unwrap();
        assert_eq!(found, tool);
    }

    #[cfg(unix)]
    mod process {
        use super::*;
        use std::os::unix::fs::PermissionsExt;

        fn script(dir: &Path, body: &str) -> PathBuf {
            let path = dir.join("tool.sh");
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        fn invocation<'a>(tool: &'a Path, work: &'a Path) -> Invocation<'a> {
            Invocation {
                tool,
                arch: TargetArch::I386,
                app_dir: Path::new("Demo.AppDir"),
                work_dir: work,
                verbose: false,
                timeout: None,
            }
        }

        #[tokio::test]
        async fn passes_arch_and_appdir_in_work_dir() {
            let dir = tempfile::tempdir().unwrap();
            let tool = script(dir.path(), r#"printf '%s %s' "$ARCH" "$1" > seen"#);

            invocation(&tool, dir.path()).run().await.unwrap();

            let seen = std::fs::read_to_string(dir.path().join("seen")).unwrap();
            assert_eq!(seen, "i386 Demo.AppDir");
        }

        #[tokio::test]
        async fn non_zero_exit_is_an_error() {
            let dir = tempfile::tempdir().unwrap();
            let tool = script(dir.path(), "exit 3");

            let err = invocation(&tool, dir.path()).run().await.unwrap_err();
            assert!(err.to_string().contains("command failed"));
        }

        #[tokio::test]
        async fn missing_tool_cannot_start() {
            let dir = tempfile::tempdir().unwrap();
            let tool = dir.path().join("absent");

            let err = invocation(&tool, dir.path()).run().await.unwrap_err();
            assert!(matches!(err, Error::CommandFailed { .. }));
        }

        #[tokio::test]
        async fn hung_tool_is_killed_after_timeout() {
            let dir = tempfile::tempdir().unwrap();
            let tool = script(dir.path(), "exec sleep 30");

            let mut run = invocation(&tool, dir.path());
            run.timeout = Some(Duration::from_millis(200));
            let err = run.run().await.unwrap_err();
            assert!(err.to_string().contains("timed out after 200ms"), "{err}");
        }
    }
}
