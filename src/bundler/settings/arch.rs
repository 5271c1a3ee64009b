//! CPU architecture types and utilities.

use std::str::FromStr;

/// Target architecture of the produced AppImage.
///
/// Canonical names are `x86_64` and `i386`. The host-style aliases `x64` and
/// `x32` are accepted when parsing.
///
/// # Examples
///
/// ```
/// use neu_appimage::bundler::TargetArch;
///
/// let arch: TargetArch = "x64".parse().unwrap();
/// assert_eq!(arch, TargetArch::X86_64);
/// assert_eq!(arch.to_string(), "x86_64");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize)]
pub enum TargetArch {
    /// x86_64 / AMD64 (64-bit)
    #[serde(rename = "x86_64", alias = "x64")]
    X86_64,
    /// i386 / i686 (32-bit)
    #[serde(rename = "i386", alias = "x32")]
    I386,
}

impl TargetArch {
    /// Value exported as `ARCH` to the packaging tool; also the suffix of the
    /// produced file name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::I386 => "i386",
        }
    }

    /// File name of the packaging tool variant that builds this architecture.
    pub fn tool_file_name(self) -> &'static str {
        match self {
            Self::X86_64 => "appimagetool-x86_64.AppImage",
            Self::I386 => "appimagetool-i686.AppImage",
        }
    }
}

impl std::fmt::Display for TargetArch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetArch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x86_64" | "x64" => Ok(Self::X86_64),
            "i386" | "x32" => Ok(Self::I386),
            other => Err(other.to_string()),
        }
    }
}
