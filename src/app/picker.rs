//! File chooser popup model with fuzzy filtering.

use crate::audio::TrackId;
use crate::engine::UiEvent;
use crate::library::{Entry, FileKind};

/// What the chosen file is for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickTarget {
    Track(TrackId),
    Lyrics,
}

impl PickTarget {
    pub fn kind(self) -> FileKind {
        match self {
            PickTarget::Track(_) => FileKind::Audio,
            PickTarget::Lyrics => FileKind::Lyrics,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PickTarget::Track(TrackId::Accompaniment) => " choose accompaniment ",
            PickTarget::Track(TrackId::Vocal) => " choose vocals ",
            PickTarget::Lyrics => " choose lyrics ",
        }
    }
}

pub struct Picker {
    pub target: PickTarget,
    pub entries: Vec<Entry>,
    /// Index into `entries`.
    pub selected: usize,
    pub filter_query: String,
}

impl Picker {
    pub fn new(target: PickTarget, entries: Vec<Entry>) -> Self {
        Self {
            target,
            entries,
            selected: 0,
            filter_query: String::new(),
        }
    }

    /// Indices of the entries matching the filter, in list order.
    pub fn display_indices(&self) -> Vec<usize> {
        let query = self.filter_query.trim();
        (0..self.entries.len())
            .filter(|&i| {
                query.is_empty()
                    || Self::fuzzy_match_positions(&self.entries[i].display, query).is_some()
            })
            .collect()
    }

    /// Fuzzy/subsequence match: the char positions in `title` that match
    /// `query`, or `None` if it does not match.
    pub fn fuzzy_match_positions(title: &str, query: &str) -> Option<Vec<usize>> {
        if query.is_empty() {
            return Some(Vec::new());
        }

        let mut positions: Vec<usize> = Vec::new();
        let mut title_iter = title.chars().enumerate();

        for qc in query.chars() {
            let qc_low = qc.to_ascii_lowercase();
            loop {
                match title_iter.next() {
                    Some((ti, tc)) if tc.to_ascii_lowercase() == qc_low => {
                        positions.push(ti);
                        break;
                    }
                    Some(_) => continue,
                    None => return None,
                }
            }
        }

        Some(positions)
    }

    /// Move selection to the next visible entry, wrapping around.
    pub fn next(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(p) => display[(p + 1) % display.len()],
            None => display[0],
        };
    }

    /// Move selection to the previous visible entry, wrapping around.
    pub fn prev(&mut self) {
        let display = self.display_indices();
        if display.is_empty() {
            return;
        }
        self.selected = match display.iter().position(|&i| i == self.selected) {
            Some(0) | None => display[display.len() - 1],
            Some(p) => display[p - 1],
        };
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    fn ensure_selected_visible(&mut self) {
        let display = self.display_indices();
        if let Some(&first) = display.first() {
            if !display.contains(&self.selected) {
                self.selected = first;
            }
        } else {
            self.selected = 0;
        }
    }

    /// The event for the highlighted entry, if it is visible.
    pub fn choose(&self) -> Option<UiEvent> {
        if !self.display_indices().contains(&self.selected) {
            return None;
        }
        let path = self.entries.get(self.selected)?.path.clone();
        Some(match self.target {
            PickTarget::Track(track) => UiEvent::FileChosen(track, path),
            PickTarget::Lyrics => UiEvent::LyricFileChosen(path),
        })
    }
}
