//! The transport state machine.
//!
//! `Transport` owns both tracks, the balance and the cue sheet. UI events and
//! the periodic tick come in; backend commands go out to the two
//! [`MediaBackend`]s and render commands go back to the caller.
//!
//! Everything runs on one thread. The only ordering rule is between the tick
//! and a scrub drag: while `scrubbing` is set the tick does not sample, so it
//! cannot overwrite the position the user is dragging.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::audio::{MediaBackend, TrackId};
use crate::lyrics::{CueSheet, DEFAULT_UNTIMED_SPACING_MS, LyricLines};
use crate::state::{PlaybackConfig, StateStore};

use super::balance::Balance;
use super::events::{RenderCmd, TransportLabel, UiEvent};
use super::progress::{SampleThrottle, TrackSample, aggregate, preview_time_text};
use super::time_map::{SCRUB_MAX, to_native_position};

/// Macro state of the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Phase {
    /// No file loaded on either track.
    #[default]
    Idle,
    /// At least one file loaded, stopped.
    Ready,
    Playing,
    Paused,
}

/// Scrub/playing flags shared by both tracks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct TransportState {
    /// True iff at least one loaded track is playing.
    pub playing: bool,
    /// Last known position on the unified 0..=100 scale.
    pub scrub_position: u8,
    /// The user is holding the progress control; sampling is suspended.
    pub scrubbing: bool,
}

/// Tunables taken from `[engine]` settings.
#[derive(Copy, Clone, Debug)]
pub struct EngineOptions {
    pub idle_sample_every: u32,
    pub untimed_cue_spacing_ms: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            idle_sample_every: 10,
            untimed_cue_spacing_ms: DEFAULT_UNTIMED_SPACING_MS,
        }
    }
}

struct TrackSlot<B> {
    backend: B,
    path: Option<PathBuf>,
    playing: bool,
    /// Scrub position still to be applied once the duration is known.
    pending_seek: Option<u8>,
}

impl<B: MediaBackend> TrackSlot<B> {
    fn new(backend: B) -> Self {
        Self {
            backend,
            path: None,
            playing: false,
            pending_seek: None,
        }
    }

    fn is_loaded(&self) -> bool {
        self.path.is_some()
    }

    fn sample(&self) -> Option<TrackSample> {
        self.is_loaded().then(|| {
            TrackSample::new(self.backend.position_ms(), self.backend.duration_ms())
        })
    }

    /// Seek to `pct`, or remember it when the duration is not known yet.
    /// Returns whether a seek was issued.
    fn seek_to(&mut self, pct: u8) -> bool {
        if !self.is_loaded() {
            return false;
        }
        let duration = self.backend.duration_ms();
        if duration == 0 {
            self.pending_seek = Some(pct);
            return false;
        }
        self.backend.set_position_ms(to_native_position(pct, duration));
        self.pending_seek = None;
        true
    }

    fn file_name(&self) -> Option<String> {
        self.path.as_deref().map(display_name)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Coordinates play/pause/stop/seek across the accompaniment and vocal tracks.
pub struct Transport<B, S> {
    accompaniment: TrackSlot<B>,
    vocal: TrackSlot<B>,
    phase: Phase,
    state: TransportState,
    balance: Balance,
    lyric_path: Option<PathBuf>,
    cues: CueSheet,
    throttle: SampleThrottle,
    store: S,
    options: EngineOptions,
}

impl<B: MediaBackend, S: StateStore> Transport<B, S> {
    pub fn new(accompaniment: B, vocal: B, store: S, options: EngineOptions) -> Self {
        let mut transport = Self {
            accompaniment: TrackSlot::new(accompaniment),
            vocal: TrackSlot::new(vocal),
            phase: Phase::Idle,
            state: TransportState::default(),
            balance: Balance::default(),
            lyric_path: None,
            cues: CueSheet::default(),
            throttle: SampleThrottle::new(options.idle_sample_every),
            store,
            options,
        };
        transport.apply_gains();
        transport
    }

    fn slot(&self, track: TrackId) -> &TrackSlot<B> {
        match track {
            TrackId::Accompaniment => &self.accompaniment,
            TrackId::Vocal => &self.vocal,
        }
    }

    fn slot_mut(&mut self, track: TrackId) -> &mut TrackSlot<B> {
        match track {
            TrackId::Accompaniment => &mut self.accompaniment,
            TrackId::Vocal => &mut self.vocal,
        }
    }

    fn slots_mut(&mut self) -> [&mut TrackSlot<B>; 2] {
        [&mut self.accompaniment, &mut self.vocal]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn state(&self) -> TransportState {
        self.state
    }

    #[cfg(test)]
    pub fn balance(&self) -> Balance {
        self.balance
    }

    pub fn cues(&self) -> &CueSheet {
        &self.cues
    }

    pub fn track_path(&self, track: TrackId) -> Option<&Path> {
        self.slot(track).path.as_deref()
    }

    pub fn lyric_path(&self) -> Option<&Path> {
        self.lyric_path.as_deref()
    }

    pub fn is_track_playing(&self, track: TrackId) -> bool {
        self.slot(track).playing
    }

    pub fn backend(&self, track: TrackId) -> &B {
        &self.slot(track).backend
    }

    #[cfg(test)]
    pub(crate) fn backend_mut(&mut self, track: TrackId) -> &mut B {
        &mut self.slot_mut(track).backend
    }

    /// The record persisted between sessions.
    pub fn record(&self) -> PlaybackConfig {
        let mut config = PlaybackConfig {
            lyric_file: self.lyric_path.clone(),
            volume_balance: self.balance.value() as i64,
            ..PlaybackConfig::default()
        };
        for track in TrackId::ALL {
            config.set_track_file(track, self.slot(track).path.clone());
        }
        config
    }

    /// Best-effort save; failures are logged and otherwise ignored.
    fn save(&self) {
        if let Err(e) = self.store.save(&self.record()) {
            warn!("failed to save player state: {e}");
        }
    }

    fn transport_label(&self) -> TransportLabel {
        if self.phase == Phase::Playing {
            TransportLabel::Playing
        } else {
            TransportLabel::Paused
        }
    }

    fn any_loaded(&self) -> bool {
        self.accompaniment.is_loaded() || self.vocal.is_loaded()
    }

    /// Re-derive the playing flag and macro state after tracks changed.
    fn settle_phase(&mut self) {
        self.state.playing = self.accompaniment.playing || self.vocal.playing;
        self.phase = match self.phase {
            _ if !self.any_loaded() => Phase::Idle,
            Phase::Idle => Phase::Ready,
            Phase::Playing if !self.state.playing => Phase::Paused,
            p => p,
        };
    }

    fn apply_gains(&mut self) {
        let gains = self.balance.gains();
        self.accompaniment.backend.set_volume(gains.accompaniment);
        self.vocal.backend.set_volume(gains.vocal);
    }

    fn balance_label(&self) -> RenderCmd {
        let gains = self.balance.gains();
        RenderCmd::SetBalanceLabel {
            vocal: gains.vocal,
            accompaniment: gains.accompaniment,
        }
    }

    fn file_label(&self, track: TrackId) -> RenderCmd {
        RenderCmd::SetFileLabel {
            track,
            name: self.slot(track).file_name(),
        }
    }

    /// Load `path` into `track` without saving. Returns whether it loaded.
    fn load_track(&mut self, track: TrackId, path: &Path) -> bool {
        let gains = self.balance.gains();
        let volume = match track {
            TrackId::Accompaniment => gains.accompaniment,
            TrackId::Vocal => gains.vocal,
        };
        let slot = self.slot_mut(track);
        slot.playing = false;
        slot.pending_seek = None;
        match slot.backend.load(path) {
            Ok(()) => {
                slot.path = Some(path.to_path_buf());
                slot.backend.set_volume(volume);
                info!("loaded {} track {}", track.label(), path.display());
                true
            }
            Err(e) => {
                slot.path = None;
                warn!("{} track unavailable: {e}", track.label());
                false
            }
        }
    }

    fn load_lyrics(&mut self, path: Option<PathBuf>) {
        self.cues = match path.as_deref() {
            Some(p) => CueSheet::load(p, self.options.untimed_cue_spacing_ms),
            None => CueSheet::default(),
        };
        self.lyric_path = path;
    }

    /// Sample both tracks now and build progress, time and lyric commands.
    ///
    /// Progress is only rendered when at least one duration is known; the UI
    /// keeps its last value otherwise.
    fn sample_render(&mut self, force_lyrics: bool) -> Vec<RenderCmd> {
        let mut out = Vec::new();
        let a = self.accompaniment.sample();
        let b = self.vocal.sample();

        if let Some(progress) = aggregate(a, b) {
            self.state.scrub_position = progress.percent;
            let (current, total) = progress.time_text();
            out.push(RenderCmd::SetProgress(progress.percent));
            out.push(RenderCmd::SetTimeText { current, total });
        }

        if force_lyrics || !self.cues.is_empty() {
            let now_ms = [a, b]
                .iter()
                .flatten()
                .map(|s| s.position_ms)
                .max()
                .unwrap_or(0);
            out.push(RenderCmd::SetLyricLines(self.resolve_lyrics(now_ms)));
        }
        out
    }

    fn resolve_lyrics(&self, now_ms: u64) -> LyricLines {
        self.cues.resolve(now_ms.min(i64::MAX as u64) as i64)
    }

    /// Apply a persisted record at startup. Paths that vanished are dropped
    /// silently; nothing is saved back.
    pub fn restore(&mut self, mut config: PlaybackConfig) -> Vec<RenderCmd> {
        for gone in config.prune_missing() {
            info!("forgetting missing file {}", gone.display());
        }

        self.balance = config.balance();
        self.apply_gains();

        for track in TrackId::ALL {
            if let Some(path) = config.track_file(track).cloned() {
                self.load_track(track, &path);
            }
        }
        self.load_lyrics(config.lyric_file.take());
        self.settle_phase();
        self.snapshot()
    }

    /// Load the record from the store and apply it. A missing or unreadable
    /// record starts the player empty.
    pub fn restore_from_store(&mut self) -> Vec<RenderCmd> {
        match self.store.load() {
            Ok(Some(config)) => self.restore(config),
            Ok(None) => self.snapshot(),
            Err(e) => {
                warn!("ignoring saved player state: {e}");
                self.snapshot()
            }
        }
    }

    /// Every render command needed to redraw the whole player.
    pub fn snapshot(&mut self) -> Vec<RenderCmd> {
        let mut out = vec![
            self.file_label(TrackId::Accompaniment),
            self.file_label(TrackId::Vocal),
            self.balance_label(),
            RenderCmd::SetTransportLabel(self.transport_label()),
        ];
        if self.state.scrubbing {
            // A redraw mid-drag keeps showing the dragged position.
            out.extend(self.scrub_preview(self.state.scrub_position));
            return out;
        }
        let sampled = self.sample_render(true);
        if !sampled
            .iter()
            .any(|c| matches!(c, RenderCmd::SetProgress(_)))
        {
            out.push(RenderCmd::SetProgress(self.state.scrub_position));
        }
        out.extend(sampled);
        out
    }

    pub fn select_file(&mut self, track: TrackId, path: &Path) -> Vec<RenderCmd> {
        self.load_track(track, path);
        self.settle_phase();
        self.save();

        let mut out = vec![
            self.file_label(track),
            RenderCmd::SetTransportLabel(self.transport_label()),
        ];
        out.extend(self.sample_render(false));
        out
    }

    pub fn select_lyrics(&mut self, path: &Path) -> Vec<RenderCmd> {
        self.load_lyrics(Some(path.to_path_buf()));
        self.save();
        self.sample_render(true)
    }

    pub fn toggle_play_pause(&mut self) -> Vec<RenderCmd> {
        match self.phase {
            Phase::Idle => {}
            Phase::Playing => {
                for slot in self.slots_mut() {
                    if slot.is_loaded() {
                        slot.backend.pause();
                        slot.playing = false;
                    }
                }
                self.phase = Phase::Paused;
            }
            Phase::Ready | Phase::Paused => {
                for slot in self.slots_mut() {
                    if slot.is_loaded() {
                        slot.backend.play();
                        slot.playing = true;
                    }
                }
                self.phase = Phase::Playing;
            }
        }
        self.state.playing = self.accompaniment.playing || self.vocal.playing;
        debug!("transport -> {:?}", self.phase);

        let mut out = vec![RenderCmd::SetTransportLabel(self.transport_label())];
        out.extend(self.sample_render(false));
        out
    }

    pub fn stop_all(&mut self) -> Vec<RenderCmd> {
        for slot in self.slots_mut() {
            if slot.is_loaded() {
                slot.backend.stop();
            }
            slot.playing = false;
            slot.pending_seek = None;
        }
        self.state.playing = false;
        self.state.scrub_position = 0;
        self.phase = if self.any_loaded() {
            Phase::Ready
        } else {
            Phase::Idle
        };
        debug!("transport -> {:?}", self.phase);

        let mut out = vec![
            RenderCmd::SetTransportLabel(self.transport_label()),
            RenderCmd::SetProgress(0),
        ];
        out.extend(self.sample_render(false));
        out
    }

    pub fn begin_scrub(&mut self) -> Vec<RenderCmd> {
        self.state.scrubbing = true;
        Vec::new()
    }

    /// Preview a drag position: the time label follows, the audio does not.
    pub fn move_scrub(&mut self, pct: u8) -> Vec<RenderCmd> {
        let pct = pct.min(SCRUB_MAX);
        self.state.scrub_position = pct;
        self.scrub_preview(pct)
    }

    fn scrub_preview(&self, pct: u8) -> Vec<RenderCmd> {
        let total_ms = [&self.accompaniment, &self.vocal]
            .iter()
            .filter(|s| s.is_loaded())
            .map(|s| s.backend.duration_ms())
            .max()
            .unwrap_or(0);

        let mut out = vec![RenderCmd::SetProgress(pct)];
        if let Some((current, total)) = preview_time_text(pct, total_ms) {
            out.push(RenderCmd::SetTimeText { current, total });
        }
        out
    }

    /// Commit a drag: resume sampling and seek every loaded track.
    pub fn end_scrub(&mut self, pct: u8) -> Vec<RenderCmd> {
        self.state.scrubbing = false;
        self.commit_seek(pct)
    }

    /// Abandon a drag without seeking; the readout snaps back to the audio.
    pub fn cancel_scrub(&mut self) -> Vec<RenderCmd> {
        self.state.scrubbing = false;
        let mut out = self.sample_render(true);
        if !out.iter().any(|c| matches!(c, RenderCmd::SetProgress(_))) {
            out.insert(0, RenderCmd::SetProgress(self.state.scrub_position));
        }
        out
    }

    /// A single click on the progress control seeks right away.
    pub fn click_scrub(&mut self, pct: u8) -> Vec<RenderCmd> {
        self.commit_seek(pct)
    }

    fn commit_seek(&mut self, pct: u8) -> Vec<RenderCmd> {
        let pct = pct.min(SCRUB_MAX);
        self.state.scrub_position = pct;
        for track in TrackId::ALL {
            let slot = self.slot_mut(track);
            if slot.seek_to(pct) {
                debug!("seek {} to {pct}%", track.label());
            } else if slot.pending_seek.is_some() {
                debug!("{} duration unknown, seek deferred", track.label());
            }
        }

        let mut out = vec![RenderCmd::SetProgress(pct)];
        out.extend(self.sample_render(true));
        out
    }

    pub fn set_balance(&mut self, value: u8) -> Vec<RenderCmd> {
        self.balance = Balance::new(value);
        self.apply_gains();
        self.save();
        vec![self.balance_label()]
    }

    /// One periodic update. Expected at a fixed cadence of at least 10 Hz.
    pub fn tick(&mut self) -> Vec<RenderCmd> {
        if self.state.scrubbing {
            return Vec::new();
        }

        let mut out = self.settle_finished();

        for slot in self.slots_mut() {
            if let Some(pct) = slot.pending_seek {
                slot.seek_to(pct);
            }
        }

        if self.throttle.should_sample(self.state.playing) {
            out.extend(self.sample_render(false));
        }
        out
    }

    /// Drop the playing flag of tracks that ran out of audio. Once neither
    /// track plays the transport falls back to Paused.
    fn settle_finished(&mut self) -> Vec<RenderCmd> {
        let before = self.phase;
        for track in TrackId::ALL {
            let slot = self.slot_mut(track);
            if slot.playing && slot.backend.is_finished() {
                slot.playing = false;
                debug!("{} track reached its end", track.label());
            }
        }
        self.settle_phase();
        if self.phase == before {
            return Vec::new();
        }
        debug!("transport -> {:?}", self.phase);
        vec![RenderCmd::SetTransportLabel(self.transport_label())]
    }

    /// Persist the final state. Call once before exiting.
    pub fn shutdown(&mut self) {
        self.save();
    }

    /// Dispatch a UI event to the matching operation.
    pub fn handle(&mut self, event: UiEvent) -> Vec<RenderCmd> {
        match event {
            UiEvent::FileChosen(track, path) => self.select_file(track, &path),
            UiEvent::LyricFileChosen(path) => self.select_lyrics(&path),
            UiEvent::PlayPauseClicked => self.toggle_play_pause(),
            UiEvent::StopClicked => self.stop_all(),
            UiEvent::ScrubPressed => self.begin_scrub(),
            UiEvent::ScrubMoved(pct) => self.move_scrub(pct),
            UiEvent::ScrubReleased(pct) => self.end_scrub(pct),
            UiEvent::ScrubClicked(pct) => self.click_scrub(pct),
            UiEvent::BalanceChanged(v) | UiEvent::BalanceClicked(v) => self.set_balance(v),
            UiEvent::WindowResized => self.snapshot(),
        }
    }
}
