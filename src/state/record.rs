use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::audio::TrackId;
use crate::engine::{BALANCE_CENTER, Balance};

/// Files and balance remembered between sessions.
///
/// Serialized as `{"accompanimentFile": ..., "vocalFile": ..., "lyricFile": ...,
/// "volumeBalance": 50}`. Older records that used `player1_file` /
/// `player2_file` / `volume_balance` are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlaybackConfig {
    #[serde(alias = "player1_file", skip_serializing_if = "Option::is_none")]
    pub accompaniment_file: Option<PathBuf>,
    #[serde(alias = "player2_file", skip_serializing_if = "Option::is_none")]
    pub vocal_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyric_file: Option<PathBuf>,
    /// Raw value as stored; clamped onto `0..=100` when applied.
    #[serde(alias = "volume_balance")]
    pub volume_balance: i64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            accompaniment_file: None,
            vocal_file: None,
            lyric_file: None,
            volume_balance: BALANCE_CENTER as i64,
        }
    }
}

impl PlaybackConfig {
    pub fn track_file(&self, track: TrackId) -> Option<&PathBuf> {
        match track {
            TrackId::Accompaniment => self.accompaniment_file.as_ref(),
            TrackId::Vocal => self.vocal_file.as_ref(),
        }
    }

    pub fn set_track_file(&mut self, track: TrackId, path: Option<PathBuf>) {
        match track {
            TrackId::Accompaniment => self.accompaniment_file = path,
            TrackId::Vocal => self.vocal_file = path,
        }
    }

    pub fn balance(&self) -> Balance {
        Balance::from_i64(self.volume_balance)
    }

    /// Drop paths that no longer exist on disk and return them.
    pub fn prune_missing(&mut self) -> Vec<PathBuf> {
        let mut dropped = Vec::new();
        for slot in [
            &mut self.accompaniment_file,
            &mut self.vocal_file,
            &mut self.lyric_file,
        ] {
            if slot.as_ref().is_some_and(|p| !p.exists()) {
                dropped.extend(slot.take());
            }
        }
        dropped
    }
}
