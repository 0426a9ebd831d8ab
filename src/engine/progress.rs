//! Combined progress readout for the two tracks.
//!
//! Both tracks are sampled independently and folded into a single percentage
//! and a `mm:ss / mm:ss` label. The percentage is the plain mean of each
//! track's own ratio, not a duration-weighted one: when the stems differ a lot
//! in length the value has no single physical referent. That is accepted
//! behaviour and kept as is.

use super::time_map::{to_native_position, to_scrub_pct};

/// One live reading of a track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TrackSample {
    pub position_ms: u64,
    /// `0` while the backend has not reported a duration yet.
    pub duration_ms: u64,
}

impl TrackSample {
    pub fn new(position_ms: u64, duration_ms: u64) -> Self {
        Self {
            position_ms,
            duration_ms,
        }
    }

    fn percent(&self) -> Option<u8> {
        to_scrub_pct(self.position_ms, self.duration_ms)
    }
}

/// Aggregated progress of both tracks.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub current_ms: u64,
    pub total_ms: u64,
}

impl Progress {
    pub fn time_text(&self) -> (String, String) {
        (format_mmss(self.current_ms), format_mmss(self.total_ms))
    }
}

/// Fold two optional samples into one progress value.
///
/// Returns `None` when neither track has a known duration; the caller keeps
/// whatever it displayed last.
pub fn aggregate(a: Option<TrackSample>, b: Option<TrackSample>) -> Option<Progress> {
    let pa = a.and_then(|s| s.percent());
    let pb = b.and_then(|s| s.percent());

    let percent = match (pa, pb) {
        (None, None) => return None,
        (Some(p), None) | (None, Some(p)) => p,
        (Some(x), Some(y)) => ((x as u16 + y as u16) / 2) as u8,
    };

    let samples = [a, b];
    let current_ms = samples.iter().flatten().map(|s| s.position_ms).max().unwrap_or(0);
    let total_ms = samples.iter().flatten().map(|s| s.duration_ms).max().unwrap_or(0);

    Some(Progress {
        percent,
        current_ms,
        total_ms,
    })
}

/// Decides on which ticks the backends are actually queried.
///
/// Querying positions can be comparatively expensive, so while nothing plays
/// only every `idle_every`-th tick samples. While either track plays every
/// tick samples.
#[derive(Debug, Clone)]
pub struct SampleThrottle {
    idle_every: u32,
    idle_ticks: u32,
}

impl SampleThrottle {
    pub fn new(idle_every: u32) -> Self {
        Self {
            idle_every: idle_every.max(1),
            idle_ticks: 0,
        }
    }

    pub fn should_sample(&mut self, any_playing: bool) -> bool {
        if any_playing {
            self.idle_ticks = 0;
            return true;
        }
        self.idle_ticks += 1;
        if self.idle_ticks >= self.idle_every {
            self.idle_ticks = 0;
            true
        } else {
            false
        }
    }
}

impl Default for SampleThrottle {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Format milliseconds as `MM:SS`.
pub fn format_mmss(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Time label shown while the progress control is being dragged: the drag
/// position applied to the longest known duration.
pub fn preview_time_text(scrub_pct: u8, total_ms: u64) -> Option<(String, String)> {
    (total_ms > 0).then(|| {
        (
            format_mmss(to_native_position(scrub_pct, total_ms)),
            format_mmss(total_ms),
        )
    })
}
