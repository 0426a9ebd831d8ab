//! Parser for `[mm:ss.cc]text` lyric files.
//!
//! Each line is either timed (one or more leading time tags) or plain text.
//! Plain lines get a synthetic timestamp from their position in the file so
//! they still scroll by, even though the timing is made up.

use std::sync::LazyLock;

use regex::Regex;

use super::cue::{Cue, CueSheet};

/// Synthetic spacing between untimed lines.
pub const DEFAULT_UNTIMED_SPACING_MS: u64 = 3000;

/// `[mm:ss]`, `[mm:ss.c]`, `[mm:ss.cc]` or `[mm:ss.ccc]` (`:` also accepted
/// as the fraction separator).
static TIME_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{1,3}):(\d{1,2})(?:[.:](\d{1,3}))?\]").expect("valid time tag regex")
});

/// Header tags such as `[ar:Artist]` or `[offset:+250]`.
static ID_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(ar|ti|al|au|by|re|ve|length|offset|#):(.*)\]\s*$")
        .expect("valid id tag regex")
});

/// Parse one time tag into milliseconds. Seconds must be below 60.
fn tag_ms(caps: &regex::Captures<'_>) -> Option<u64> {
    let minutes: u64 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(2)?.as_str().parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    let fraction_ms = match caps.get(3) {
        Some(f) => {
            let digits = f.as_str();
            let value: u64 = digits.parse().ok()?;
            match digits.len() {
                1 => value * 100,
                2 => value * 10,
                _ => value,
            }
        }
        None => 0,
    };
    Some(minutes * 60_000 + seconds * 1000 + fraction_ms)
}

/// Split the leading time tags off a line.
///
/// Returns the timestamps (possibly empty) and the remaining text. A tag that
/// looks like a timestamp but does not parse stops tag scanning; the line is
/// then treated as untimed text.
fn split_time_tags(line: &str) -> (Vec<u64>, &str) {
    let mut times = Vec::new();
    let mut rest = line;
    while let Some(caps) = TIME_TAG.captures(rest) {
        let Some(ms) = tag_ms(&caps) else {
            return (Vec::new(), line);
        };
        times.push(ms);
        rest = &rest[caps.get(0).map_or(0, |m| m.end())..];
    }
    (times, rest)
}

/// Parse the signed `[offset:...]` header value.
fn parse_offset(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Parse lyric file contents into a sorted cue sheet.
///
/// Never fails: malformed lines degrade to untimed text, and an empty or
/// completely unusable input yields an empty sheet.
pub fn parse_cues(text: &str, untimed_spacing_ms: u64) -> CueSheet {
    let mut cues: Vec<Cue> = Vec::new();
    let mut timed: Vec<bool> = Vec::new();
    let mut offset_ms: i64 = 0;

    for raw in text.lines() {
        let line = raw.trim_start_matches('\u{feff}').trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = ID_TAG.captures(line) {
            if caps.get(1).map(|m| m.as_str()) == Some("offset") {
                if let Some(v) = caps.get(2).and_then(|m| parse_offset(m.as_str())) {
                    offset_ms = v;
                }
            }
            continue;
        }

        let (times, rest) = split_time_tags(line);
        let text = rest.trim();
        if times.is_empty() {
            let entry = cues.len() as u64;
            cues.push(Cue::new(entry * untimed_spacing_ms, text));
            timed.push(false);
        } else {
            for t in times {
                cues.push(Cue::new(t, text));
                timed.push(true);
            }
        }
    }

    // A positive offset makes lyrics appear sooner.
    if offset_ms != 0 {
        for (cue, is_timed) in cues.iter_mut().zip(&timed) {
            if *is_timed {
                cue.time_ms = (cue.time_ms as i64 - offset_ms).max(0) as u64;
            }
        }
    }

    CueSheet::new(cues)
}
