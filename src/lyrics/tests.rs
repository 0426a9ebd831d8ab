use super::*;
use std::io::Write;

fn abc() -> CueSheet {
    CueSheet::new(vec![
        Cue::new(0, "A"),
        Cue::new(3000, "B"),
        Cue::new(6000, "C"),
    ])
}

#[test]
fn resolve_between_cues_picks_last_started() {
    let lines = abc().resolve(4000);
    assert_eq!(lines.current.as_deref(), Some("B"));
    assert_eq!(lines.previous.as_deref(), Some("A"));
    assert_eq!(lines.next.as_deref(), Some("C"));
}

#[test]
fn resolve_at_first_cue_has_no_previous() {
    let lines = abc().resolve(0);
    assert_eq!(lines.current.as_deref(), Some("A"));
    assert_eq!(lines.previous, None);
    assert_eq!(lines.next.as_deref(), Some("B"));
}

#[test]
fn resolve_before_first_cue_only_shows_next() {
    let lines = abc().resolve(-1);
    assert_eq!(lines.current, None);
    assert_eq!(lines.previous, None);
    assert_eq!(lines.next.as_deref(), Some("A"));

    let late = CueSheet::new(vec![Cue::new(5000, "X"), Cue::new(9000, "Y")]);
    let lines = late.resolve(1000);
    assert_eq!(lines.current, None);
    assert_eq!(lines.next.as_deref(), Some("X"));
}

#[test]
fn resolve_past_last_cue_keeps_last_line_active() {
    let lines = abc().resolve(60_000);
    assert_eq!(lines.current.as_deref(), Some("C"));
    assert_eq!(lines.previous.as_deref(), Some("B"));
    assert_eq!(lines.next, None);
}

#[test]
fn resolve_on_exact_boundary_switches_line() {
    let sheet = abc();
    assert_eq!(sheet.resolve(2999).current.as_deref(), Some("A"));
    assert_eq!(sheet.resolve(3000).current.as_deref(), Some("B"));
}

#[test]
fn resolve_is_idempotent() {
    let sheet = abc();
    let first = sheet.resolve(4000);
    let second = sheet.resolve(4000);
    assert_eq!(first, second);
    // Jumping around does not leave state behind.
    let _ = sheet.resolve(10);
    assert_eq!(sheet.resolve(4000), first);
}

#[test]
fn resolve_empty_sheet_is_all_empty() {
    assert_eq!(CueSheet::default().resolve(1234), LyricLines::default());
}

#[test]
fn parse_timed_and_untimed_lines() {
    let sheet = parse_cues("[01:05.00]Hello\nWorld\n", DEFAULT_UNTIMED_SPACING_MS);
    let cues = sheet.cues();
    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0], Cue::new(3000, "World"));
    assert_eq!(cues[1], Cue::new(65_000, "Hello"));
}

#[test]
fn parse_sorts_by_time() {
    let sheet = parse_cues(
        "[00:10.00]second\n[00:02.50]first\n[00:20.00]third",
        DEFAULT_UNTIMED_SPACING_MS,
    );
    let texts: Vec<&str> = sheet.cues().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
    assert_eq!(sheet.cues()[0].time_ms, 2500);
}

#[test]
fn parse_fraction_widths() {
    let sheet = parse_cues(
        "[00:01]a\n[00:02.5]b\n[00:03.25]c\n[00:04.125]d",
        DEFAULT_UNTIMED_SPACING_MS,
    );
    let times: Vec<u64> = sheet.cues().iter().map(|c| c.time_ms).collect();
    assert_eq!(times, vec![1000, 2500, 3250, 4125]);
}

#[test]
fn parse_repeated_time_tags_share_text() {
    let sheet = parse_cues("[00:01.00][00:30.00]Chorus", DEFAULT_UNTIMED_SPACING_MS);
    assert_eq!(
        sheet.cues(),
        &[Cue::new(1000, "Chorus"), Cue::new(30_000, "Chorus")]
    );
}

#[test]
fn parse_skips_header_tags_and_blank_lines() {
    let text = "[ti:Song]\n[ar:Someone]\n\n[00:01.00]line\n";
    let sheet = parse_cues(text, DEFAULT_UNTIMED_SPACING_MS);
    assert_eq!(sheet.cues(), &[Cue::new(1000, "line")]);
}

#[test]
fn parse_offset_shifts_timed_cues_only() {
    let text = "[offset:+500]\n[00:00.20]early\n[00:02.00]late\nplain";
    let sheet = parse_cues(text, DEFAULT_UNTIMED_SPACING_MS);
    let cues = sheet.cues();
    assert_eq!(cues[0], Cue::new(0, "early"));
    assert_eq!(cues[1], Cue::new(1500, "late"));
    // Third entry in file order, untouched by the offset.
    assert_eq!(cues[2], Cue::new(6000, "plain"));
}

#[test]
fn parse_malformed_tag_falls_back_to_untimed() {
    let sheet = parse_cues("[00:75.00]bad seconds\n[xx:yy]odd", DEFAULT_UNTIMED_SPACING_MS);
    assert_eq!(
        sheet.cues(),
        &[Cue::new(0, "[00:75.00]bad seconds"), Cue::new(3000, "[xx:yy]odd")]
    );
}

#[test]
fn parse_empty_input_is_empty_sheet() {
    assert!(parse_cues("", DEFAULT_UNTIMED_SPACING_MS).is_empty());
    assert!(parse_cues("\n  \n", DEFAULT_UNTIMED_SPACING_MS).is_empty());
}

#[test]
fn load_reads_file_and_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("song.lrc");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "[00:01.00]one").unwrap();
    writeln!(f, "[00:02.00]two").unwrap();
    drop(f);

    let sheet = CueSheet::load(&path, DEFAULT_UNTIMED_SPACING_MS);
    assert_eq!(sheet.len(), 2);

    let missing = CueSheet::load(&dir.path().join("nope.lrc"), DEFAULT_UNTIMED_SPACING_MS);
    assert!(missing.is_empty());
}
