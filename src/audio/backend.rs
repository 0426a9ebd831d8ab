use std::path::Path;

use super::types::AudioError;

/// Per-track media control, as the engine sees it.
///
/// Calls are treated as instantaneous. Positions and durations are in
/// milliseconds; a duration of `0` means "not known yet", never "empty".
pub trait MediaBackend {
    /// Replace the current media with `path`, paused at the start.
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;
    fn play(&mut self);
    fn pause(&mut self);
    /// Stop and rewind to the start.
    fn stop(&mut self);
    fn position_ms(&self) -> u64;
    fn duration_ms(&self) -> u64;
    fn set_position_ms(&mut self, position_ms: u64);
    /// True once playback ran past the end of the media on its own.
    fn is_finished(&self) -> bool;
    /// Volume on a `0..=100` scale.
    fn set_volume(&mut self, volume: u8);
}
