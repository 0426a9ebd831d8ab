use std::env;
use std::path::PathBuf;

use log::info;

use crate::audio::{MediaBackend, TrackId};
use crate::config;
use crate::engine::{EngineOptions, Transport};
use crate::state::{JsonStateStore, StateStore};

pub fn engine_options(settings: &config::Settings) -> EngineOptions {
    EngineOptions {
        idle_sample_every: settings.engine.idle_sample_every,
        untimed_cue_spacing_ms: settings.engine.untimed_cue_spacing_ms,
    }
}

/// The JSON store at the configured location, or beside the binary's cwd
/// when no home directory is known.
pub fn state_store(settings: &config::Settings) -> JsonStateStore {
    JsonStateStore::new(
        settings
            .state_path()
            .unwrap_or_else(|| PathBuf::from("player_state.json")),
    )
}

/// Directory the file picker browses: first CLI argument, else the cwd.
pub fn browse_root() -> PathBuf {
    env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Summarize what the previous session left loaded.
pub fn log_restored<B: MediaBackend, S: StateStore>(transport: &Transport<B, S>) {
    for track in TrackId::ALL {
        match transport.track_path(track) {
            Some(p) => info!(
                "{} restored from {} (playing: {})",
                track.label(),
                p.display(),
                transport.is_track_playing(track)
            ),
            None => info!("{} empty", track.label()),
        }
    }
    if let Some(p) = transport.lyric_path() {
        info!("lyrics {} ({} cues)", p.display(), transport.cues().len());
    }
}
