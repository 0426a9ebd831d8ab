use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::backend::MediaBackend;
use super::sink::{create_sink_at, tagged_duration};
use super::types::AudioError;

/// Open the default output device, shared by both tracks.
pub fn open_output() -> Result<Rc<OutputStream>, AudioError> {
    let mut stream = OutputStreamBuilder::open_default_stream()
        .map_err(|e| AudioError::Output(e.to_string()))?;
    // rodio logs to stderr when the stream is dropped, which garbles the TUI.
    stream.log_on_drop(false);
    Ok(Rc::new(stream))
}

/// A single track played through its own `rodio::Sink`.
pub struct RodioTrack {
    stream: Rc<OutputStream>,
    path: Option<PathBuf>,
    sink: Option<Sink>,
    /// Offset added to `Sink::get_pos` after a sink was rebuilt mid-file.
    base: Duration,
    duration: Duration,
    volume: u8,
}

impl RodioTrack {
    pub fn new(stream: Rc<OutputStream>) -> Self {
        Self {
            stream,
            path: None,
            sink: None,
            base: Duration::ZERO,
            duration: Duration::ZERO,
            volume: 100,
        }
    }

    /// Swap in a fresh paused sink starting at `start_at`.
    fn rebuild_at(&mut self, start_at: Duration) -> Result<(), AudioError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        let (sink, total) = create_sink_at(&self.stream, &path, start_at)?;
        sink.set_volume(gain(self.volume));
        if self.duration.is_zero() {
            self.duration = total.unwrap_or(Duration::ZERO);
        }
        self.sink = Some(sink);
        self.base = start_at;
        Ok(())
    }

    fn rebuild_or_unload(&mut self, start_at: Duration) {
        if let Err(e) = self.rebuild_at(start_at) {
            warn!("{e}");
            self.sink = None;
        }
    }

    fn is_playing(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.is_paused() && !s.empty())
    }
}

fn gain(volume: u8) -> f32 {
    volume.min(100) as f32 / 100.0
}

impl MediaBackend for RodioTrack {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.path = Some(path.to_path_buf());
        self.duration = tagged_duration(path).unwrap_or(Duration::ZERO);
        if let Err(e) = self.rebuild_at(Duration::ZERO) {
            self.path = None;
            self.duration = Duration::ZERO;
            return Err(e);
        }
        Ok(())
    }

    fn play(&mut self) {
        // A sink that ran dry has nothing left to play; start over.
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.rebuild_or_unload(Duration::ZERO);
        }
        if let Some(s) = self.sink.as_ref() {
            s.play();
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
    }

    fn stop(&mut self) {
        if self.path.is_some() {
            self.rebuild_or_unload(Duration::ZERO);
        }
    }

    fn position_ms(&self) -> u64 {
        let Some(sink) = self.sink.as_ref() else {
            return 0;
        };
        let mut pos = self.base + sink.get_pos();
        if !self.duration.is_zero() {
            pos = pos.min(self.duration);
        }
        pos.as_millis() as u64
    }

    fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }

    fn set_position_ms(&mut self, position_ms: u64) {
        let target = Duration::from_millis(position_ms);
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        match sink.try_seek(target) {
            Ok(()) => self.base = Duration::ZERO,
            Err(e) => {
                // Not every decoder can seek; rebuild and skip into the file instead.
                debug!("seek failed ({e}), rebuilding sink at {target:?}");
                let was_playing = self.is_playing();
                self.rebuild_or_unload(target);
                if was_playing {
                    if let Some(s) = self.sink.as_ref() {
                        s.play();
                    }
                }
            }
        }
    }

    fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(gain(self.volume));
        }
    }

    fn is_finished(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| !s.is_paused() && s.empty())
    }
}

/// Fade every track out together over `fade_out`, then leave them silent.
///
/// Used when quitting so the music does not cut off abruptly.
pub fn fade_out_together(tracks: &[&RodioTrack], fade_out: Duration) {
    let sinks: Vec<(&Sink, f32)> = tracks
        .iter()
        .filter(|t| t.is_playing())
        .filter_map(|t| t.sink.as_ref().map(|s| (s, gain(t.volume))))
        .collect();
    if sinks.is_empty() {
        return;
    }
    if fade_out.is_zero() {
        for (s, _) in &sinks {
            s.set_volume(0.0);
        }
        return;
    }

    let steps: u32 = 20;
    let step = (fade_out / steps).max(Duration::from_millis(1));
    for i in 1..=steps {
        let t = i as f32 / steps as f32;
        for (s, start) in &sinks {
            s.set_volume(start * (1.0 - t));
        }
        thread::sleep(step);
    }
}
