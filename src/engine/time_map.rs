//! Conversions between the unified 0..=100 scrub position and a track's
//! native millisecond timeline.
//!
//! Each track is mapped independently because the accompaniment and the vocal
//! stem rarely have exactly the same length.

/// Upper bound of the unified scrub scale.
pub const SCRUB_MAX: u8 = 100;

/// Map a scrub percentage onto a track of `duration_ms`.
///
/// The result is rounded to the nearest millisecond and always lies in
/// `0..=duration_ms`. Percentages above 100 are treated as 100.
pub fn to_native_position(scrub_pct: u8, duration_ms: u64) -> u64 {
    let pct = scrub_pct.min(SCRUB_MAX) as f64;
    let pos = (pct / SCRUB_MAX as f64 * duration_ms as f64).round() as u64;
    pos.min(duration_ms)
}

/// Map a native position back onto the scrub scale.
///
/// Returns `None` while the duration is unknown (`0`); callers skip the track
/// for this round instead of dividing by zero.
pub fn to_scrub_pct(position_ms: u64, duration_ms: u64) -> Option<u8> {
    if duration_ms == 0 {
        return None;
    }
    let pct = (position_ms as f64 / duration_ms as f64 * SCRUB_MAX as f64).round();
    Some(pct.min(SCRUB_MAX as f64) as u8)
}
