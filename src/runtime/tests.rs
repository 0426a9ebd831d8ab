use super::event_loop::{KeyOutcome, handle_key_event, handle_mouse_event};
use crate::app::{App, Drag, PickTarget, Picker};
use crate::audio::TrackId;
use crate::config::ControlsSettings;
use crate::engine::{RenderCmd, UiEvent};
use crate::library::Entry;
use crate::ui::Areas;
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::path::PathBuf;

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn areas() -> Areas {
    // Bars are 100 cells wide: column 1 is 0%, column 100 is 100%.
    Areas {
        progress: Rect::new(0, 7, 102, 3),
        balance: Rect::new(0, 10, 102, 3),
    }
}

fn controls() -> ControlsSettings {
    ControlsSettings {
        balance_step: 5,
        scrub_step: 10,
    }
}

#[test]
fn transport_keys_map_to_events() {
    let mut app = App::new();
    let c = controls();
    assert_eq!(
        handle_key_event(key(' '), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::PlayPauseClicked])
    );
    assert_eq!(
        handle_key_event(key('p'), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::PlayPauseClicked])
    );
    assert_eq!(
        handle_key_event(key('s'), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::StopClicked])
    );
    assert_eq!(handle_key_event(key('q'), &mut app, &c), KeyOutcome::Quit);
    assert_eq!(
        handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &c
        ),
        KeyOutcome::Quit
    );
    assert_eq!(
        handle_key_event(key('v'), &mut app, &c),
        KeyOutcome::OpenPicker(PickTarget::Track(TrackId::Vocal))
    );
    assert_eq!(
        handle_key_event(key('y'), &mut app, &c),
        KeyOutcome::OpenPicker(PickTarget::Lyrics)
    );
}

#[test]
fn balance_keys_step_from_current_position_and_saturate() {
    let mut app = App::new();
    let c = controls();
    assert_eq!(
        handle_key_event(key('l'), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::BalanceChanged(55)])
    );

    app.apply(RenderCmd::SetBalanceLabel {
        vocal: 4,
        accompaniment: 100,
    });
    assert_eq!(
        handle_key_event(key('h'), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::BalanceChanged(0)])
    );
}

#[test]
fn keyboard_scrub_previews_then_commits() {
    let mut app = App::new();
    app.apply(RenderCmd::SetProgress(30));
    let c = controls();

    assert_eq!(
        handle_key_event(key('L'), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::ScrubPressed, UiEvent::ScrubMoved(40)])
    );
    assert_eq!(app.keyboard_scrub, Some(40));

    assert_eq!(
        handle_key_event(key('L'), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::ScrubMoved(50)])
    );
    // Other keys are ignored while previewing.
    assert_eq!(handle_key_event(key('s'), &mut app, &c), KeyOutcome::Nothing);

    assert_eq!(
        handle_key_event(code(KeyCode::Enter), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::ScrubReleased(50)])
    );
    assert_eq!(app.keyboard_scrub, None);
}

#[test]
fn keyboard_scrub_clamps_and_can_be_cancelled() {
    let mut app = App::new();
    app.apply(RenderCmd::SetProgress(5));
    let c = controls();

    assert_eq!(
        handle_key_event(key('H'), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::ScrubPressed, UiEvent::ScrubMoved(0)])
    );
    assert_eq!(
        handle_key_event(code(KeyCode::Esc), &mut app, &c),
        KeyOutcome::CancelScrub
    );
    assert_eq!(app.keyboard_scrub, None);
}

#[test]
fn picker_keys_filter_and_choose() {
    let mut app = App::new();
    let c = controls();
    let entries = ["one.mp3", "two.mp3"]
        .iter()
        .map(|n| Entry {
            path: PathBuf::from("/m").join(n),
            display: n.to_string(),
            duration: None,
        })
        .collect();
    app.picker = Some(Picker::new(PickTarget::Track(TrackId::Accompaniment), entries));

    // Letters go to the filter instead of triggering bindings.
    assert_eq!(handle_key_event(key('t'), &mut app, &c), KeyOutcome::Nothing);
    assert_eq!(handle_key_event(key('w'), &mut app, &c), KeyOutcome::Nothing);
    assert!(app.picker.is_some());

    assert_eq!(
        handle_key_event(code(KeyCode::Enter), &mut app, &c),
        KeyOutcome::Events(vec![UiEvent::FileChosen(
            TrackId::Accompaniment,
            PathBuf::from("/m/two.mp3")
        )])
    );
    assert!(app.picker.is_none());
}

#[test]
fn picker_escape_closes_without_event() {
    let mut app = App::new();
    app.picker = Some(Picker::new(PickTarget::Lyrics, Vec::new()));
    assert_eq!(
        handle_key_event(code(KeyCode::Esc), &mut app, &controls()),
        KeyOutcome::Nothing
    );
    assert!(app.picker.is_none());
}

#[test]
fn progress_drag_scrubs_and_release_commits() {
    let mut app = App::new();
    let a = areas();

    let down = handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 20, 8), &mut app, &a);
    assert!(down.is_empty());
    assert_eq!(app.drag, Some(Drag::Progress { moved: false }));

    let drag = handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 1, 8), &mut app, &a);
    assert_eq!(drag, vec![UiEvent::ScrubPressed, UiEvent::ScrubMoved(0)]);

    // Drags keep tracking outside the widget.
    let drag = handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 100, 2), &mut app, &a);
    assert_eq!(drag, vec![UiEvent::ScrubMoved(100)]);

    let up = handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 100, 2), &mut app, &a);
    assert_eq!(up, vec![UiEvent::ScrubReleased(100)]);
    assert_eq!(app.drag, None);
}

#[test]
fn progress_press_without_drag_is_a_click() {
    let mut app = App::new();
    let a = areas();
    handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 100, 8), &mut app, &a);
    let up = handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 100, 8), &mut app, &a);
    assert_eq!(up, vec![UiEvent::ScrubClicked(100)]);
}

#[test]
fn balance_click_and_drag() {
    let mut app = App::new();
    let a = areas();
    let down = handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 11), &mut app, &a);
    assert_eq!(down, vec![UiEvent::BalanceClicked(0)]);

    let drag = handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 100, 11), &mut app, &a);
    assert_eq!(drag, vec![UiEvent::BalanceChanged(100)]);

    let up = handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 100, 11), &mut app, &a);
    assert!(up.is_empty());
    assert_eq!(app.drag, None);
}

#[test]
fn mouse_outside_sliders_and_under_popup_is_ignored() {
    let mut app = App::new();
    let a = areas();
    assert!(handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 1), &mut app, &a).is_empty());
    assert_eq!(app.drag, None);

    app.picker = Some(Picker::new(PickTarget::Lyrics, Vec::new()));
    assert!(handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 1, 11), &mut app, &a).is_empty());
}

#[test]
fn drag_released_under_picker_still_commits() {
    let mut app = App::new();
    let a = areas();
    let c = controls();

    handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 20, 8), &mut app, &a);
    let drag = handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 8), &mut app, &a);
    assert_eq!(drag, vec![UiEvent::ScrubPressed, UiEvent::ScrubMoved(29)]);

    assert_eq!(
        handle_key_event(key('a'), &mut app, &c),
        KeyOutcome::OpenPicker(PickTarget::Track(TrackId::Accompaniment))
    );
    app.picker = Some(Picker::new(PickTarget::Track(TrackId::Accompaniment), Vec::new()));

    // Motion under the popup is ignored, the release is not.
    let drag = handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 60, 8), &mut app, &a);
    assert!(drag.is_empty());
    let up = handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 30, 8), &mut app, &a);
    assert_eq!(up, vec![UiEvent::ScrubReleased(29)]);
    assert_eq!(app.drag, None);

    assert_eq!(handle_key_event(code(KeyCode::Esc), &mut app, &c), KeyOutcome::Nothing);
    assert!(app.picker.is_none());
    let down = handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 90, 20), &mut app, &a);
    let up = handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 90, 20), &mut app, &a);
    assert!(down.is_empty() && up.is_empty());
}

#[test]
fn press_after_lost_release_finishes_the_old_drag() {
    let mut app = App::new();
    app.apply(RenderCmd::SetProgress(40));
    let a = areas();

    handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 20, 8), &mut app, &a);
    handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 8), &mut app, &a);

    let down = handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 5, 1), &mut app, &a);
    assert_eq!(down, vec![UiEvent::ScrubReleased(40)]);
    assert_eq!(app.drag, None);
}

#[test]
fn keyboard_scrub_waits_for_mouse_drag() {
    let mut app = App::new();
    let a = areas();
    handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 20, 8), &mut app, &a);
    assert_eq!(handle_key_event(key('L'), &mut app, &controls()), KeyOutcome::Nothing);
    assert_eq!(app.keyboard_scrub, None);
}
