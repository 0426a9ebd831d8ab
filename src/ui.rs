//! UI rendering helpers for the terminal user interface.
//!
//! This module renders the player with `ratatui` and maps mouse columns on
//! the two sliders back to 0..=100 positions.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Picker};
use crate::audio::TrackId;
use crate::config::{ControlsSettings, UiSettings};
use crate::engine::format_mmss;

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("s".to_string(), "stop".to_string());
    map.insert("a".to_string(), "accompaniment file".to_string());
    map.insert("v".to_string(), "vocal file".to_string());
    map.insert("y".to_string(), "lyrics file".to_string());
    // h/l and H/L are filled dynamically from config.
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let order = ["space/p", "s", "h/l", "H/L", "a", "v", "y", "q"];
    order
        .iter()
        .filter_map(|k| match *k {
            "h/l" => Some(format!("[h/l] balance -/+{}", controls.balance_step)),
            "H/L" => Some(format!(
                "[H/L] scrub -/+{}% (enter/esc)",
                controls.scrub_step
            )),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Screen regions the event loop hit-tests mouse input against.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub progress: Rect,
    pub balance: Rect,
}

impl Areas {
    pub fn compute(area: Rect, show_controls: bool) -> (Self, [Rect; 5], Option<Rect>) {
        let mut constraints = vec![
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
        ];
        if show_controls {
            constraints.push(Constraint::Length(4));
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let main = [chunks[0], chunks[1], chunks[2], chunks[3], chunks[4]];
        let footer = show_controls.then(|| chunks[5]);
        (
            Self {
                progress: chunks[2],
                balance: chunks[3],
            },
            main,
            footer,
        )
    }
}

/// The cells a bordered slider actually draws its bar into.
fn bar_cells(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// True when `(column, row)` falls inside `area`.
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Map a mouse column on a slider to 0..=100. Columns past either end of the
/// bar clamp to the nearest end, so drags can leave the widget.
pub fn slider_pct(area: Rect, column: u16) -> Option<u8> {
    let bar = bar_cells(area);
    if bar.width == 0 {
        return None;
    }
    if bar.width == 1 {
        return Some(0);
    }
    let offset = column.saturating_sub(bar.x).min(bar.width - 1) as u32;
    let span = (bar.width - 1) as u32;
    Some(((offset * 100 + span / 2) / span) as u8)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn highlighted(title: &str, query: &str) -> String {
    let Some(positions) = Picker::fuzzy_match_positions(title, query) else {
        return title.to_string();
    };
    let mut rendered = String::new();
    let mut pos_iter = positions.into_iter();
    let mut next_pos = pos_iter.next();

    for (ci, ch) in title.chars().enumerate() {
        if next_pos == Some(ci) {
            rendered.extend(ch.to_uppercase());
            next_pos = pos_iter.next();
        } else {
            rendered.push(ch);
        }
    }
    rendered
}

fn draw_picker(frame: &mut Frame, picker: &Picker, over: Rect) {
    let popup_area = centered_rect_sized(72, 16, over);
    frame.render_widget(Clear, popup_area);

    let display = picker.display_indices();
    let list_height = popup_area.height.saturating_sub(2) as usize;
    let total = display.len();
    let sel_pos = display
        .iter()
        .position(|&i| i == picker.selected)
        .unwrap_or(0);
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let query = picker.filter_query.trim();
    let items: Vec<ListItem> = display[start..end]
        .iter()
        .map(|&i| {
            let entry = &picker.entries[i];
            let mut text = highlighted(&entry.display, query);
            if let Some(d) = entry.duration {
                text.push_str(&format!("  [{}]", format_mmss(d.as_millis() as u64)));
            }
            ListItem::new(text)
        })
        .collect();

    let title = if query.is_empty() {
        picker.target.title().to_string()
    } else {
        format!("{}[{}] ", picker.target.title(), query)
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ratatui::widgets::ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, popup_area, &mut state);
}

/// Render the whole player and return the slider areas for hit-testing.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> Areas {
    let (areas, chunks, footer_area) = Areas::compute(frame.area(), ui_settings.show_controls);

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" duet ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Files
    let state_text = if app.is_playing() { "Playing" } else { "Paused" };
    let files = Paragraph::new(vec![
        Line::from(format!(
            "Accompaniment: {}",
            app.file_label(TrackId::Accompaniment)
        )),
        Line::from(format!("Vocals: {}", app.file_label(TrackId::Vocal))),
    ])
    .block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(format!(" files • {state_text} ")),
    );
    frame.render_widget(files, chunks[1]);

    // Progress
    let progress_title = if app.keyboard_scrub.is_some() {
        " progress (enter seeks, esc cancels) "
    } else {
        " progress "
    };
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(progress_title))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(app.shown_progress().min(100) as u16)
        .label(format!("{} / {}", app.time_current, app.time_total));
    frame.render_widget(progress, areas.progress);

    // Balance
    let balance = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" balance "))
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(app.balance_position().min(100) as u16)
        .label(app.balance_label());
    frame.render_widget(balance, areas.balance);

    // Lyrics
    let dim = Style::default().add_modifier(Modifier::DIM);
    let lyrics = Paragraph::new(vec![
        Line::from(Span::styled(
            app.lyrics.previous.clone().unwrap_or_default(),
            dim,
        )),
        Line::from(Span::styled(
            app.lyrics.current.clone().unwrap_or_default(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(app.lyrics.next.clone().unwrap_or_default(), dim)),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" lyrics "))
    .wrap(Wrap { trim: true });
    frame.render_widget(lyrics, chunks[4]);

    if let Some(footer_area) = footer_area {
        let footer = Paragraph::new(controls_text(controls_settings))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" controls ")
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    }),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(footer, footer_area);
    }

    if let Some(picker) = &app.picker {
        let area = frame.area();
        draw_picker(frame, picker, area);
    }

    areas
}
