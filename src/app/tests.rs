use super::*;
use crate::audio::TrackId;
use crate::engine::{RenderCmd, TransportLabel, UiEvent};
use crate::library::Entry;
use crate::lyrics::LyricLines;
use std::path::PathBuf;

fn entry(name: &str) -> Entry {
    Entry {
        path: PathBuf::from("/music").join(name),
        display: name.into(),
        duration: None,
    }
}

fn picker(target: PickTarget, names: &[&str]) -> Picker {
    Picker::new(target, names.iter().map(|n| entry(n)).collect())
}

#[test]
fn render_commands_update_labels() {
    let mut app = App::new();
    assert_eq!(app.file_label(TrackId::Vocal), "none");
    assert_eq!(app.time_current, "00:00");

    app.apply_all([
        RenderCmd::SetProgress(42),
        RenderCmd::SetTimeText {
            current: "01:05".into(),
            total: "03:20".into(),
        },
        RenderCmd::SetFileLabel {
            track: TrackId::Vocal,
            name: Some("vox.mp3".into()),
        },
        RenderCmd::SetTransportLabel(TransportLabel::Playing),
        RenderCmd::SetLyricLines(LyricLines {
            previous: None,
            current: Some("Hello".into()),
            next: Some("World".into()),
        }),
    ]);

    assert_eq!(app.progress, 42);
    assert_eq!(app.time_current, "01:05");
    assert_eq!(app.time_total, "03:20");
    assert_eq!(app.file_label(TrackId::Vocal), "vox.mp3");
    assert_eq!(app.file_label(TrackId::Accompaniment), "none");
    assert!(app.is_playing());
    assert_eq!(app.lyrics.current.as_deref(), Some("Hello"));
    assert_eq!(app.file_name(TrackId::Vocal), Some("vox.mp3"));
    assert_eq!(app.file_name(TrackId::Accompaniment), None);

    app.apply(RenderCmd::SetFileLabel {
        track: TrackId::Vocal,
        name: None,
    });
    assert_eq!(app.file_label(TrackId::Vocal), "none");
    assert_eq!(app.file_name(TrackId::Vocal), None);
}

#[test]
fn balance_position_inverts_gains() {
    let mut app = App::new();
    assert_eq!(app.balance_position(), 50);

    for value in [0u8, 1, 25, 49, 50, 51, 75, 99, 100] {
        let gains = crate::engine::Balance::new(value).gains();
        app.apply(RenderCmd::SetBalanceLabel {
            vocal: gains.vocal,
            accompaniment: gains.accompaniment,
        });
        assert_eq!(app.balance_position(), value, "balance {value}");
    }

    app.apply(RenderCmd::SetBalanceLabel {
        vocal: 100,
        accompaniment: 50,
    });
    assert_eq!(app.balance_label(), "vocals 100% | accompaniment 50%");
}

#[test]
fn keyboard_preview_overrides_progress() {
    let mut app = App::new();
    app.apply(RenderCmd::SetProgress(10));
    assert_eq!(app.shown_progress(), 10);
    app.keyboard_scrub = Some(35);
    assert_eq!(app.shown_progress(), 35);
}

#[test]
fn fuzzy_match_simple() {
    let title = "Hello World";
    assert!(Picker::fuzzy_match_positions(title, "hw").is_some());
    assert!(Picker::fuzzy_match_positions(title, "ello").is_some());
    assert!(Picker::fuzzy_match_positions(title, "xyz").is_none());
    assert_eq!(
        Picker::fuzzy_match_positions(title, "HW"),
        Some(vec![0, 6])
    );
}

#[test]
fn picker_filters_and_wraps() {
    let mut p = picker(
        PickTarget::Track(TrackId::Accompaniment),
        &["alpha.mp3", "beta.mp3", "gamma.flac"],
    );
    p.prev();
    assert_eq!(p.selected, 2);
    p.next();
    assert_eq!(p.selected, 0);

    p.push_filter_char('m');
    p.push_filter_char('m');
    // only "gamma.flac" has two m's
    assert_eq!(p.display_indices(), vec![2]);
    assert_eq!(p.selected, 2);

    p.pop_filter_char();
    p.pop_filter_char();
    assert_eq!(p.display_indices().len(), 3);
}

#[test]
fn picker_choose_emits_event_for_target() {
    let mut p = picker(PickTarget::Track(TrackId::Vocal), &["a.mp3", "b.mp3"]);
    p.next();
    assert_eq!(
        p.choose(),
        Some(UiEvent::FileChosen(
            TrackId::Vocal,
            PathBuf::from("/music/b.mp3")
        ))
    );

    let p = picker(PickTarget::Lyrics, &["song.lrc"]);
    assert_eq!(
        p.choose(),
        Some(UiEvent::LyricFileChosen(PathBuf::from("/music/song.lrc")))
    );
}

#[test]
fn picker_with_no_match_chooses_nothing() {
    let mut p = picker(PickTarget::Lyrics, &["song.lrc"]);
    p.push_filter_char('z');
    assert_eq!(p.choose(), None);

    let empty = picker(PickTarget::Lyrics, &[]);
    assert_eq!(empty.choose(), None);
}
