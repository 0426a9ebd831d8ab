use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Drag, PickTarget, Picker};
use crate::audio::{RodioTrack, TrackId, fade_out_together};
use crate::config;
use crate::engine::{Balance, Phase, SCRUB_MAX, Transport, UiEvent};
use crate::library;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::MprisSync;
use crate::state::JsonStateStore;
use crate::ui::{self, Areas};

type Player = Transport<RodioTrack, JsonStateStore>;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Where the file picker scans.
    pub browse_root: PathBuf,
    /// Slider areas from the last draw, for mouse hit-testing.
    pub areas: Areas,
    mpris_sync: MprisSync,
}

impl EventLoopState {
    pub fn new(browse_root: PathBuf) -> Self {
        Self {
            browse_root,
            areas: Areas::default(),
            mpris_sync: MprisSync::default(),
        }
    }
}

/// What a key press asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Nothing,
    Quit,
    Events(Vec<UiEvent>),
    OpenPicker(PickTarget),
    CancelScrub,
}

/// Main terminal event loop: ticks the engine, draws, handles input and
/// MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    transport: &mut Player,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.engine.tick_ms);
    let mut next_tick = Instant::now() + tick;

    loop {
        let now = Instant::now();
        if now >= next_tick {
            app.apply_all(transport.tick());
            next_tick += tick;
            if next_tick <= now {
                // Fell behind (e.g. a slow load); don't burst to catch up.
                next_tick = now + tick;
            }
        }

        state.mpris_sync.update(mpris, transport.phase(), app);

        terminal.draw(|f| {
            state.areas = ui::draw(f, app, &settings.ui, &settings.controls);
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, transport) {
                return Ok(());
            }
        }

        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let outcome = handle_key_event(key, app, &settings.controls);
                    if apply_outcome(outcome, settings, app, transport, state) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    for ev in handle_mouse_event(mouse, app, &state.areas) {
                        app.apply_all(transport.handle(ev));
                    }
                }
                Event::Resize(_, _) => {
                    app.apply_all(transport.handle(UiEvent::WindowResized));
                }
                _ => {}
            }
        }
    }
}

fn quit(settings: &config::Settings, transport: &Player) {
    fade_out_together(
        &[
            transport.backend(TrackId::Accompaniment),
            transport.backend(TrackId::Vocal),
        ],
        Duration::from_millis(settings.audio.quit_fade_out_ms),
    );
}

/// Returns true when the loop should exit.
fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    transport: &mut Player,
) -> bool {
    debug!("MPRIS: {cmd:?}");
    let toggle = match cmd {
        ControlCmd::Quit => {
            quit(settings, transport);
            return true;
        }
        ControlCmd::Play => transport.phase() != Phase::Playing,
        ControlCmd::Pause => transport.phase() == Phase::Playing,
        ControlCmd::PlayPause => true,
        ControlCmd::Stop => {
            app.apply_all(transport.stop_all());
            return false;
        }
    };
    if toggle {
        app.apply_all(transport.toggle_play_pause());
    }
    false
}

/// Returns true when the loop should exit.
fn apply_outcome(
    outcome: KeyOutcome,
    settings: &config::Settings,
    app: &mut App,
    transport: &mut Player,
    state: &EventLoopState,
) -> bool {
    match outcome {
        KeyOutcome::Nothing => {}
        KeyOutcome::Quit => {
            quit(settings, transport);
            return true;
        }
        KeyOutcome::Events(events) => {
            for ev in events {
                app.apply_all(transport.handle(ev));
            }
        }
        KeyOutcome::OpenPicker(target) => {
            let entries = library::scan(&state.browse_root, &settings.library, target.kind());
            debug!("picker {target:?}: {} entries", entries.len());
            app.picker = Some(Picker::new(target, entries));
        }
        KeyOutcome::CancelScrub => app.apply_all(transport.cancel_scrub()),
    }
    false
}

/// Map a key press to an outcome, updating picker and preview state in `app`.
pub fn handle_key_event(
    key: KeyEvent,
    app: &mut App,
    controls: &config::ControlsSettings,
) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }

    if let Some(picker) = app.picker.as_mut() {
        match key.code {
            KeyCode::Esc => app.picker = None,
            KeyCode::Enter => {
                let chosen = picker.choose();
                app.picker = None;
                if let Some(ev) = chosen {
                    return KeyOutcome::Events(vec![ev]);
                }
            }
            KeyCode::Down => picker.next(),
            KeyCode::Up => picker.prev(),
            KeyCode::Backspace => picker.pop_filter_char(),
            KeyCode::Char(c) => picker.push_filter_char(c),
            _ => {}
        }
        return KeyOutcome::Nothing;
    }

    let scrub_step = controls.scrub_step as i16;
    if let Some(pct) = app.keyboard_scrub {
        return match key.code {
            KeyCode::Char('H') => preview(app, pct as i16 - scrub_step),
            KeyCode::Char('L') => preview(app, pct as i16 + scrub_step),
            KeyCode::Enter => {
                app.keyboard_scrub = None;
                KeyOutcome::Events(vec![UiEvent::ScrubReleased(pct)])
            }
            KeyCode::Esc => {
                app.keyboard_scrub = None;
                KeyOutcome::CancelScrub
            }
            _ => KeyOutcome::Nothing,
        };
    }

    let balance_step = controls.balance_step as i16;
    match key.code {
        KeyCode::Char('q') => KeyOutcome::Quit,
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            KeyOutcome::Events(vec![UiEvent::PlayPauseClicked])
        }
        KeyCode::Char('s') => KeyOutcome::Events(vec![UiEvent::StopClicked]),
        KeyCode::Char('a') => KeyOutcome::OpenPicker(PickTarget::Track(TrackId::Accompaniment)),
        KeyCode::Char('v') => KeyOutcome::OpenPicker(PickTarget::Track(TrackId::Vocal)),
        KeyCode::Char('y') => KeyOutcome::OpenPicker(PickTarget::Lyrics),
        KeyCode::Char('h') => nudge_balance(app, -balance_step),
        KeyCode::Char('l') => nudge_balance(app, balance_step),
        // The mouse already owns the progress bar.
        KeyCode::Char('H') | KeyCode::Char('L') if app.drag.is_some() => KeyOutcome::Nothing,
        KeyCode::Char('H') | KeyCode::Char('L') => {
            let delta = if key.code == KeyCode::Char('H') {
                -scrub_step
            } else {
                scrub_step
            };
            let target = app.progress as i16 + delta;
            match preview(app, target) {
                KeyOutcome::Events(mut events) => {
                    events.insert(0, UiEvent::ScrubPressed);
                    KeyOutcome::Events(events)
                }
                other => other,
            }
        }
        _ => KeyOutcome::Nothing,
    }
}

fn preview(app: &mut App, pct: i16) -> KeyOutcome {
    let pct = pct.clamp(0, SCRUB_MAX as i16) as u8;
    app.keyboard_scrub = Some(pct);
    KeyOutcome::Events(vec![UiEvent::ScrubMoved(pct)])
}

fn nudge_balance(app: &App, delta: i16) -> KeyOutcome {
    let value = Balance::new(app.balance_position()).nudged(delta).value();
    KeyOutcome::Events(vec![UiEvent::BalanceChanged(value)])
}

/// Map mouse input on the sliders to UI events.
///
/// On the progress bar a press followed by a release without movement is a
/// click; any drag in between makes it a scrub.
pub fn handle_mouse_event(mouse: MouseEvent, app: &mut App, areas: &Areas) -> Vec<UiEvent> {
    // A popup or a keyboard scrub owns the sliders, but a drag that was
    // already running must still be finished so the engine resumes sampling.
    let blocked = app.picker.is_some() || app.keyboard_scrub.is_some();
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // A release we never saw leaves a drag behind; settle it first.
            let mut out = match app.drag.take() {
                Some(Drag::Progress { moved: true }) => vec![UiEvent::ScrubReleased(app.progress)],
                _ => Vec::new(),
            };
            if blocked {
                return out;
            }
            if ui::contains(areas.progress, col, row) {
                app.drag = Some(Drag::Progress { moved: false });
            } else if ui::contains(areas.balance, col, row) {
                app.drag = Some(Drag::Balance);
                out.extend(ui::slider_pct(areas.balance, col).map(UiEvent::BalanceClicked));
            }
            out
        }
        MouseEventKind::Drag(MouseButton::Left) if !blocked => match app.drag {
            Some(Drag::Progress { moved }) => {
                let Some(pct) = ui::slider_pct(areas.progress, col) else {
                    return Vec::new();
                };
                app.drag = Some(Drag::Progress { moved: true });
                if moved {
                    vec![UiEvent::ScrubMoved(pct)]
                } else {
                    vec![UiEvent::ScrubPressed, UiEvent::ScrubMoved(pct)]
                }
            }
            Some(Drag::Balance) => ui::slider_pct(areas.balance, col)
                .map(UiEvent::BalanceChanged)
                .into_iter()
                .collect(),
            None => Vec::new(),
        },
        MouseEventKind::Up(MouseButton::Left) => match app.drag.take() {
            Some(Drag::Progress { moved: true }) => {
                // Always release, so sampling resumes even off a collapsed bar.
                let pct = ui::slider_pct(areas.progress, col).unwrap_or(app.progress);
                vec![UiEvent::ScrubReleased(pct)]
            }
            Some(Drag::Progress { moved: false }) if !blocked => {
                ui::slider_pct(areas.progress, col)
                    .map(UiEvent::ScrubClicked)
                    .into_iter()
                    .collect()
            }
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}
