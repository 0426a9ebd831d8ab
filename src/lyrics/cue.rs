use std::path::Path;

use log::{debug, warn};

use super::parse::parse_cues;

/// A single lyric line and the time it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    pub time_ms: u64,
    pub text: String,
}

impl Cue {
    pub fn new(time_ms: u64, text: impl Into<String>) -> Self {
        Self {
            time_ms,
            text: text.into(),
        }
    }
}

/// The lines around the playhead. Each slot is `None` when there is nothing
/// to show there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LyricLines {
    pub previous: Option<String>,
    pub current: Option<String>,
    pub next: Option<String>,
}

/// An immutable, time-sorted list of cues.
///
/// Reloading a lyric file builds a new sheet; a sheet is never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CueSheet {
    cues: Vec<Cue>,
}

impl CueSheet {
    /// Build a sheet from cues in any order. The sort is stable, so cues that
    /// share a timestamp keep their file order.
    pub fn new(mut cues: Vec<Cue>) -> Self {
        cues.sort_by_key(|c| c.time_ms);
        Self { cues }
    }

    /// Read and parse a lyric file.
    ///
    /// Unreadable files produce an empty sheet and a warning; lyrics are
    /// optional and must never keep the player from working.
    pub fn load(path: &Path, untimed_spacing_ms: u64) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                let sheet = parse_cues(&text, untimed_spacing_ms);
                if sheet.is_empty() {
                    warn!("lyric file {} contains no lines", path.display());
                } else {
                    debug!("loaded {} cues from {}", sheet.len(), path.display());
                }
                sheet
            }
            Err(e) => {
                warn!("failed to read lyric file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    #[cfg(test)]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Index of the active cue: the last cue whose time is `<= now_ms`.
    pub fn active_index(&self, now_ms: i64) -> Option<usize> {
        if now_ms < 0 {
            return None;
        }
        let now = now_ms as u64;
        // Number of cues that have started; the active one is the last of them.
        let started = self.cues.partition_point(|c| c.time_ms <= now);
        started.checked_sub(1)
    }

    /// Resolve the previous/current/next lines at `now_ms`.
    ///
    /// Pure with respect to the sheet: the same time always yields the same
    /// lines.
    pub fn resolve(&self, now_ms: i64) -> LyricLines {
        if self.cues.is_empty() {
            return LyricLines::default();
        }
        let text = |i: usize| self.cues.get(i).map(|c| c.text.clone());

        match self.active_index(now_ms) {
            Some(i) => LyricLines {
                previous: i.checked_sub(1).and_then(text),
                current: text(i),
                next: text(i + 1),
            },
            None => LyricLines {
                previous: None,
                current: None,
                next: text(0),
            },
        }
    }
}
