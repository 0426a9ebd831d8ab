//! Inbound UI events and outbound render commands.
//!
//! The engine never calls into a widget toolkit: the front-end translates its
//! input into [`UiEvent`]s and applies the [`RenderCmd`]s it gets back.

use std::path::PathBuf;

use crate::audio::TrackId;
use crate::lyrics::LyricLines;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    FileChosen(TrackId, PathBuf),
    LyricFileChosen(PathBuf),
    PlayPauseClicked,
    StopClicked,
    /// The user grabbed the progress control.
    ScrubPressed,
    /// Dragging; preview only, audio is not moved.
    ScrubMoved(u8),
    /// The user let go of the progress control at this position.
    ScrubReleased(u8),
    /// A single click somewhere on the progress control.
    ScrubClicked(u8),
    BalanceChanged(u8),
    BalanceClicked(u8),
    WindowResized,
}

/// Label of the play/pause button.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportLabel {
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCmd {
    SetProgress(u8),
    SetTimeText { current: String, total: String },
    SetLyricLines(LyricLines),
    SetBalanceLabel { vocal: u8, accompaniment: u8 },
    /// `None` renders as "none".
    SetFileLabel { track: TrackId, name: Option<String> },
    SetTransportLabel(TransportLabel),
}
