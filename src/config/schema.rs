use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/quaver/config.toml` or `~/.config/quaver/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `QUAVER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub controls: ControlsSettings,
    pub library: LibrarySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Set to false to skip opening an output device (queue-only mode).
    pub enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume at startup, 0..=100.
    pub initial_volume: u8,
    /// How much `+` / `-` change the volume.
    pub volume_step: u8,
    /// How often to check whether the current track has finished (milliseconds).
    pub poll_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: 70,
            volume_step: 5,
            poll_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Text in the pulsing header.
    pub title_text: String,

    /// How long a notice stays on screen (milliseconds).
    pub notice_ms: u64,

    /// Which track fields to show in the now-playing label, and in what order.
    ///
    /// Example: ["artist", "title", "album"]
    pub now_playing_track_fields: Vec<TrackDisplayField>,

    /// Separator used to join `now_playing_track_fields`.
    pub now_playing_track_separator: String,

    pub animation: AnimationSettings,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            title_text: "♪ MY MUSIC PLAYER".to_string(),
            notice_ms: 3000,
            now_playing_track_fields: vec![TrackDisplayField::Artist, TrackDisplayField::Title],
            now_playing_track_separator: " - ".to_string(),
            animation: AnimationSettings::default(),
        }
    }
}

/// Periods of the decorative animations (milliseconds).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Disable to keep the screen static (title, spinner and label pulse).
    pub enabled: bool,
    pub title_pulse_ms: u64,
    pub spinner_ms: u64,
    pub loading_ms: u64,
    pub fade_ms: u64,
    pub label_pulse_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            title_pulse_ms: 100,
            spinner_ms: 80,
            loading_ms: 200,
            fade_ms: 50,
            label_pulse_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Ask before clearing the whole queue.
    pub confirm_clear: bool,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            confirm_clear: true,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackDisplayField {
    Title,
    Artist,
    Album,
    Filename,
    Path,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    /// Also used as the file picker filter.
    pub extensions: Vec<String>,
    /// Whether to follow symlinks when scanning directories.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".into(),
                "wav".into(),
                "ogg".into(),
                "flac".into(),
                "m4a".into(),
            ],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` wins when set.
    pub level: String,
    /// Log file. Defaults to `$XDG_STATE_HOME/quaver/quaver.log`.
    pub path: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
        }
    }
}
