//! freedesktop.org main categories accepted in the desktop entry.

use std::str::FromStr;

/// Application category written to the `Categories=` line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Deserialize)]
pub enum Category {
    Audio,
    Video,
    AudioVideo,
    Development,
    Education,
    Game,
    Graphics,
    Network,
    Office,
    Science,
    Settings,
    System,
    Utility,
}

impl Category {
    /// Every category, in the order `--list-categories` prints them.
    pub const ALL: [Category; 13] = [
        Self::Audio,
        Self::Video,
        Self::AudioVideo,
        Self::Development,
        Self::Education,
        Self::Game,
        Self::Graphics,
        Self::Network,
        Self::Office,
        Self::Science,
        Self::Settings,
        Self::System,
        Self::Utility,
    ];

    /// Spelling used in desktop entries.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "Audio",
            Self::Video => "Video",
            Self::AudioVideo => "AudioVideo",
            Self::Development => "Development",
            Self::Education => "Education",
            Self::Game => "Game",
            Self::Graphics => "Graphics",
            Self::Network => "Network",
            Self::Office => "Office",
            Self::Science => "Science",
            Self::Settings => "Settings",
            Self::System => "System",
            Self::Utility => "Utility",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("invalid category specified \"{s}\""))
    }
}
