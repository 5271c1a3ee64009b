//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use neu_appimage::bundler::{AppMetadata, BuildRequestBuilder, Category};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Stand-in for appimagetool. Writes `<name>-$ARCH.AppImage` into its
/// working directory, containing the sorted AppDir listing followed by the
/// desktop entry, so the artifact describes the AppDir it was built from.
pub const FAKE_TOOL: &str = r#"#!/bin/sh
set -e
appdir="$1"
name=$(basename "$appdir" .AppDir | tr ' ' '_')
out="${name}-${ARCH}.AppImage"
(cd "$appdir" && find . | sort) > "$out"
echo "--" >> "$out"
cat "$appdir"/*.desktop >> "$out"
"#;

/// Tool that deletes the whole stage directory before producing its output.
pub const STAGE_REMOVING_TOOL: &str = r#"#!/bin/sh
set -e
appdir="$1"
name=$(basename "$appdir" .AppDir | tr ' ' '_')
rm -rf "$(dirname "$appdir")"
echo image > "${name}-${ARCH}.AppImage"
"#;

/// Tool that always fails.
pub const FAILING_TOOL: &str = "#!/bin/sh\necho 'squashfs error' >&2\nexit 2\n";

/// Scratch tree for one build: inputs, output dir, work dir, tools dir.
pub struct Workspace {
    root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_tool(FAKE_TOOL)
    }

    pub fn with_tool(script: &str) -> Self {
        let root = TempDir::new().unwrap();
        for dir in ["input", "out", "work", "tools"] {
            std::fs::create_dir(root.path().join(dir)).unwrap();
        }
        let ws = Self { root };
        ws.write_input("demo-linux_x64", b"\x7fELF fake");
        ws.write_input("resources.neu", b"resources");
        ws.write_input("icon.png", b"\x89PNG fake");
        for name in ["appimagetool-x86_64.AppImage", "appimagetool-i686.AppImage"] {
            let tool = ws.tools_dir().join(name);
            std::fs::write(&tool, script).unwrap();
            std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        ws
    }

    pub fn write_input(&self, rel: &str, contents: &[u8]) -> PathBuf {
        let path = self.input(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn input(&self, rel: &str) -> PathBuf {
        self.root.path().join("input").join(rel)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn tools_dir(&self) -> PathBuf {
        self.root.path().join("tools")
    }

    pub fn metadata(&self, name: &str, categories: Vec<Category>) -> AppMetadata {
        AppMetadata {
            program_name: name.into(),
            icon: self.input("icon.png"),
            categories,
            ..Default::default()
        }
    }

    /// Builder with every required field pointing at valid inputs.
    pub fn request(&self) -> BuildRequestBuilder {
        BuildRequestBuilder::new()
            .executable(self.input("demo-linux_x64"))
            .resource(self.input("resources.neu"))
            .out_dir(self.out_dir())
            .metadata(self.metadata("Demo", vec![Category::Utility]))
            .arch("x86_64")
            .tools_dir(self.tools_dir())
            .work_dir(self.work_dir())
    }

    /// Names of the entries left in the work dir.
    pub fn work_dir_entries(&self) -> Vec<String> {
        entries(&self.work_dir())
    }

    /// Names of the entries in the output dir.
    pub fn out_dir_entries(&self) -> Vec<String> {
        entries(&self.out_dir())
    }
}

pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
