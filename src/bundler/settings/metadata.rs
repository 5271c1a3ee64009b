//! Presentation metadata written into the AppDir.

use super::Category;
use std::path::PathBuf;

/// Application metadata used for the desktop entry and the artifact name.
///
/// # Examples
///
/// ```
/// use neu_appimage::bundler::{AppMetadata, Category};
///
/// let metadata = AppMetadata {
///     program_name: "Demo".into(),
///     icon: "assets/icon.png".into(),
///     categories: vec![Category::Utility],
///     ..Default::default()
/// };
/// assert!(metadata.generic_name.is_none());
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct AppMetadata {
    /// Program name. Names the AppDir, the desktop file and the final
    /// artifact.
    pub program_name: String,

    /// Generic name, e.g. "Web Browser".
    ///
    /// Default: None
    #[serde(default)]
    pub generic_name: Option<String>,

    /// Written as the desktop entry `Comment`.
    ///
    /// Default: None
    #[serde(default)]
    pub description: Option<String>,

    /// Free-form version, written as `X-AppImage-Version`.
    ///
    /// Default: None
    #[serde(default)]
    pub version: Option<String>,

    /// Icon image, copied to `applicationIcon.png` inside the AppDir.
    pub icon: PathBuf,

    /// Categories in the order they should appear. Duplicates are kept.
    pub categories: Vec<Category>,

    /// Working directory for the launched program (`Path=`).
    ///
    /// Default: None
    #[serde(default)]
    pub working_dir: Option<String>,
}

/// Makes a program name safe to use as a file name and as a desktop entry
/// value: `/` and control characters become `_`, surrounding whitespace is
/// trimmed.
pub fn sanitize_program_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == '/' || c.is_control() { '_' } else { c })
        .collect()
}
