//! The view model: the last value of every label and slider.

use crate::audio::TrackId;
use crate::engine::{BALANCE_CENTER, RenderCmd, TransportLabel};
use crate::lyrics::LyricLines;

use super::picker::Picker;

/// What the screen shows, built only from render commands.
pub struct App {
    pub progress: u8,
    pub time_current: String,
    pub time_total: String,
    pub lyrics: LyricLines,
    pub vocal_gain: u8,
    pub accompaniment_gain: u8,
    pub accompaniment_file: Option<String>,
    pub vocal_file: Option<String>,
    pub transport: TransportLabel,

    /// Open file chooser, if any.
    pub picker: Option<Picker>,
    /// Keyboard scrub in progress (`H`/`L` pressed, not yet committed).
    pub keyboard_scrub: Option<u8>,
    /// Mouse button held on one of the sliders.
    pub drag: Option<Drag>,
}

/// Which slider the mouse grabbed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Drag {
    /// `moved` turns a press into a drag; a press without it is a click.
    Progress { moved: bool },
    Balance,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            progress: 0,
            time_current: "00:00".to_string(),
            time_total: "00:00".to_string(),
            lyrics: LyricLines::default(),
            vocal_gain: 100,
            accompaniment_gain: 100,
            accompaniment_file: None,
            vocal_file: None,
            transport: TransportLabel::Paused,
            picker: None,
            keyboard_scrub: None,
            drag: None,
        }
    }

    pub fn apply(&mut self, cmd: RenderCmd) {
        match cmd {
            RenderCmd::SetProgress(p) => self.progress = p,
            RenderCmd::SetTimeText { current, total } => {
                self.time_current = current;
                self.time_total = total;
            }
            RenderCmd::SetLyricLines(lines) => self.lyrics = lines,
            RenderCmd::SetBalanceLabel {
                vocal,
                accompaniment,
            } => {
                self.vocal_gain = vocal;
                self.accompaniment_gain = accompaniment;
            }
            RenderCmd::SetFileLabel { track, name } => match track {
                TrackId::Accompaniment => self.accompaniment_file = name,
                TrackId::Vocal => self.vocal_file = name,
            },
            RenderCmd::SetTransportLabel(label) => self.transport = label,
        }
    }

    pub fn apply_all(&mut self, cmds: impl IntoIterator<Item = RenderCmd>) {
        for cmd in cmds {
            self.apply(cmd);
        }
    }

    pub fn file_name(&self, track: TrackId) -> Option<&str> {
        match track {
            TrackId::Accompaniment => self.accompaniment_file.as_deref(),
            TrackId::Vocal => self.vocal_file.as_deref(),
        }
    }

    /// File label, "none" when nothing is loaded.
    pub fn file_label(&self, track: TrackId) -> &str {
        self.file_name(track).unwrap_or("none")
    }

    pub fn balance_label(&self) -> String {
        format!(
            "vocals {}% | accompaniment {}%",
            self.vocal_gain, self.accompaniment_gain
        )
    }

    /// Slider position recovered from the two gains.
    ///
    /// The gain curve ducks exactly one side by `2 * distance from center`,
    /// so the inverse is exact.
    pub fn balance_position(&self) -> u8 {
        if self.vocal_gain < 100 {
            self.vocal_gain / 2
        } else if self.accompaniment_gain < 100 {
            100 - self.accompaniment_gain / 2
        } else {
            BALANCE_CENTER
        }
    }

    pub fn is_playing(&self) -> bool {
        self.transport == TransportLabel::Playing
    }

    /// Position shown on the progress bar: the keyboard preview wins.
    pub fn shown_progress(&self) -> u8 {
        self.keyboard_scrub.unwrap_or(self.progress)
    }
}
