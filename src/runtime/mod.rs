use std::sync::mpsc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{RodioTrack, open_output};
use crate::engine::Transport;
use crate::logging;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

#[cfg(test)]
mod tests;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_problem) = settings::load_settings();
    logging::init(&settings);
    if let Some(problem) = settings_problem {
        warn!("{problem}");
    }

    let browse_root = startup::browse_root();
    info!("browsing {}", browse_root.display());

    let store = startup::state_store(&settings);
    info!("player state at {}", store.path().display());

    let stream = open_output()?;
    let mut transport = Transport::new(
        RodioTrack::new(stream.clone()),
        RodioTrack::new(stream),
        store,
        startup::engine_options(&settings),
    );

    let mut app = App::new();
    app.apply_all(transport.restore_from_store());
    startup::log_restored(&transport);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(browse_root);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut transport,
            &mpris,
            &control_rx,
            &mut state,
        )
    })();

    // Persist even when the loop failed.
    transport.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
