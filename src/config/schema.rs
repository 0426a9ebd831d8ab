use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/duet/config.toml` or `~/.config/duet/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DUET__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub state: StateSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Period of the progress/lyrics update tick (milliseconds, at most 100).
    pub tick_ms: u64,
    /// While nothing plays, query positions only every N ticks.
    pub idle_sample_every: u32,
    /// Spacing assigned to lyric lines without a timestamp (milliseconds).
    pub untimed_cue_spacing_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            idle_sample_every: 10,
            untimed_cue_spacing_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Balance change per `h` / `l` press.
    pub balance_step: u8,
    /// Scrub distance per `H` / `L` press, in percent of the track.
    pub scrub_step: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            balance_step: 5,
            scrub_step: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether the key binding help is shown at the bottom.
    pub show_controls: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ accompaniment + vocals ~ ".to_string(),
            show_controls: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Extensions offered when picking an audio track (case-insensitive, without dot).
    pub audio_extensions: Vec<String>,
    /// Extensions offered when picking a lyric file.
    pub lyric_extensions: Vec<String>,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            audio_extensions: vec![
                "mp3".into(),
                "wav".into(),
                "flac".into(),
                "m4a".into(),
                "ogg".into(),
            ],
            lyric_extensions: vec!["lrc".into(), "txt".into()],
            include_hidden: false,
            max_depth: Some(4),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StateSettings {
    /// Where the remembered files and balance are kept.
    /// Defaults to `$XDG_STATE_HOME/duet/player_state.json`.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `error`, `warn`, `info`, `debug` or `trace`. `DUET_LOG` wins when set.
    pub level: String,
    /// Log file; defaults to `duet.log` next to the state file.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
