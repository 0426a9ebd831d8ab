//! Track identifiers and audio errors.

use std::path::PathBuf;

/// One of the two stems the player keeps in sync.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TrackId {
    Accompaniment,
    Vocal,
}

impl TrackId {
    pub const ALL: [TrackId; 2] = [TrackId::Accompaniment, TrackId::Vocal];

    pub fn label(self) -> &'static str {
        match self {
            TrackId::Accompaniment => "accompaniment",
            TrackId::Vocal => "vocal",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("no audio output device: {0}")]
    Output(String),
}
