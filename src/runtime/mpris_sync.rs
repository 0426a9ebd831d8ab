use crate::app::App;
use crate::audio::TrackId;
use crate::engine::Phase;
use crate::mpris::MprisHandle;

/// Last values published to MPRIS, so the shared state is only touched on change.
#[derive(Default)]
pub struct MprisSync {
    phase: Option<Phase>,
    stems: [Option<String>; 2],
}

impl MprisSync {
    pub fn update(&mut self, mpris: &MprisHandle, phase: Phase, app: &App) {
        if self.phase != Some(phase) {
            mpris.set_phase(phase);
            self.phase = Some(phase);
        }
        for (track, seen) in TrackId::ALL.into_iter().zip(self.stems.iter_mut()) {
            let name = app.file_name(track);
            if seen.as_deref() != name {
                *seen = name.map(str::to_string);
                mpris.set_stem(track, seen.clone());
            }
        }
    }
}
