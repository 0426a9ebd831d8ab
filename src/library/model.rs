use std::path::PathBuf;
use std::time::Duration;

/// Which extension list a scan filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Audio,
    Lyrics,
}

/// One pickable file.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    /// `Artist - Title` when tagged, otherwise the path relative to the scan root.
    pub display: String,
    pub duration: Option<Duration>,
}
