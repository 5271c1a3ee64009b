//! Host platform detection.
//!
//! The packaging tools are x86 Linux binaries, so a build first checks that
//! the machine it runs on can execute them at all.

/// CPU families able to run one of the packaging tools.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HostArch {
    /// 64-bit x86
    X86_64,
    /// 32-bit x86
    X86,
}

/// Operating system and CPU of the machine running the build.
///
/// Tests construct foreign hosts directly; real builds use [`Host::current`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Host {
    /// Value in the style of `std::env::consts::OS`
    pub os: &'static str,
    /// Value in the style of `std::env::consts::ARCH`
    pub arch: &'static str,
}

impl Host {
    /// The machine this process is running on.
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }

    /// Whether AppImages can be assembled here.
    pub fn is_linux(&self) -> bool {
        self.os == "linux"
    }

    /// Recognized CPU family, or None when no packaging tool can run.
    pub fn cpu(&self) -> Option<HostArch> {
        match self.arch {
            "x86_64" => Some(HostArch::X86_64),
            "x86" => Some(HostArch::X86),
            _ => None,
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::current()
    }
}
