use std::path::PathBuf;

use serde::Deserialize;

use crate::library::DEFAULT_EXTENSIONS;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/riffle/config.toml` or `~/.config/riffle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `RIFFLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied at startup, in `[0, 1]`.
    pub default_volume: f32,
    /// Amount added or removed by the volume keys.
    pub volume_step: f32,
    /// How often the audio thread reports playback position (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            default_volume: 0.5,
            volume_step: 0.05,
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Repeat mode at startup.
    pub repeat_mode: RepeatModeSetting,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatModeSetting {
    #[default]
    #[serde(alias = "none", alias = "off", alias = "no_repeat")]
    NoRepeat,
    #[serde(alias = "all", alias = "repeat_all", alias = "loop-all")]
    RepeatAll,
    #[serde(alias = "one", alias = "repeat_one", alias = "loop-one")]
    RepeatOne,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory opened at startup and treated as "home".
    /// Falls back to the platform audio directory.
    pub home: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, dot optional).
    pub extensions: Vec<String>,
    /// Whether to list hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether symlinks are classified by their target.
    pub follow_links: bool,
    /// Whether listings come back sorted by file name instead of OS order.
    pub sort_by_name: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            home: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: true,
            follow_links: true,
            sort_by_name: true,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewSetting {
    #[default]
    List,
    Grid,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered in the header box title.
    pub header_text: String,
    /// Layout of the browser at startup.
    pub view: ViewSetting,
    /// How long notifications stay on screen (milliseconds).
    pub notification_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " riffle ".to_string(),
            view: ViewSetting::List,
            notification_ms: 4000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Where log files are written. Defaults to the XDG state directory.
    pub directory: Option<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "riffle=info,warn".to_string(),
        }
    }
}
