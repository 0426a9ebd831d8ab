//! MPRIS2 surface so media keys and `playerctl` can drive the player.
//!
//! The service runs on its own thread and only forwards [`ControlCmd`]s. The
//! event loop publishes the phase and the two stem names through
//! [`MprisHandle`]; the bus reads them back on demand.

use std::collections::HashMap;
use std::future::pending;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::block_on;
use log::{debug, warn};
use zbus::{connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::audio::TrackId;
use crate::engine::Phase;

pub const BUS_NAME: &str = "org.mpris.MediaPlayer2.duet";
const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const NO_TRACK: &str = "/org/mpris/MediaPlayer2/TrackList/NoTrack";

/// Remote requests, drained by the event loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
}

/// What the bus sees of the player.
#[derive(Debug, Default)]
struct Published {
    phase: Phase,
    accompaniment: Option<String>,
    vocal: Option<String>,
}

impl Published {
    fn status(&self) -> &'static str {
        match self.phase {
            Phase::Idle | Phase::Ready => "Stopped",
            Phase::Playing => "Playing",
            Phase::Paused => "Paused",
        }
    }

    /// The vocal stem names the song; the accompaniment stands in alone.
    fn title(&self) -> &str {
        self.vocal
            .as_deref()
            .or(self.accompaniment.as_deref())
            .unwrap_or_default()
    }

    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut entries: Vec<(&str, Value<'_>)> = vec![
            ("mpris:trackid", ObjectPath::from_static_str_unchecked(NO_TRACK).into()),
            ("xesam:title", self.title().into()),
        ];
        if let Some(name) = self.accompaniment.as_deref() {
            entries.push(("duet:accompaniment", name.into()));
        }
        if let Some(name) = self.vocal.as_deref() {
            entries.push(("duet:vocal", name.into()));
        }
        entries
            .into_iter()
            .filter_map(|(key, value)| {
                OwnedValue::try_from(value)
                    .ok()
                    .map(|v| (key.to_string(), v))
            })
            .collect()
    }
}

type Shared = Arc<Mutex<Published>>;

/// Event loop side of the service.
pub struct MprisHandle {
    shared: Shared,
}

impl MprisHandle {
    fn update(&self, f: impl FnOnce(&mut Published)) {
        if let Ok(mut p) = self.shared.lock() {
            f(&mut p);
        }
    }

    pub fn set_phase(&self, phase: Phase) {
        self.update(|p| p.phase = phase);
    }

    pub fn set_stem(&self, track: TrackId, name: Option<String>) {
        self.update(|p| match track {
            TrackId::Accompaniment => p.accompaniment = name,
            TrackId::Vocal => p.vocal = name,
        });
    }
}

/// Sender shared by both interfaces. A closed channel means the player is
/// shutting down, so failed sends are only logged.
#[derive(Clone)]
struct Remote(Sender<ControlCmd>);

impl Remote {
    fn send(&self, cmd: ControlCmd) {
        if self.0.send(cmd).is_err() {
            debug!("MPRIS: player gone, dropping command");
        }
    }
}

struct RootIface {
    remote: Remote,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        self.remote.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "duet"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        Vec::new()
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        Vec::new()
    }
}

struct PlayerIface {
    remote: Remote,
    shared: Shared,
}

impl PlayerIface {
    fn read<T: Default>(&self, f: impl FnOnce(&Published) -> T) -> T {
        self.shared.lock().map(|p| f(&p)).unwrap_or_default()
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn play(&self) {
        self.remote.send(ControlCmd::Play);
    }

    fn pause(&self) {
        self.remote.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        self.remote.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        self.remote.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> String {
        self.read(|p| p.status().to_string())
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        self.read(Published::metadata)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    // Seeking and track skipping stay on the keyboard and mouse.
    #[zbus(property)]
    fn can_seek(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }
}

async fn serve(remote: Remote, shared: Shared) -> zbus::Result<()> {
    let _connection = connection::Builder::session()?
        .name(BUS_NAME)?
        .serve_at(
            OBJECT_PATH,
            RootIface {
                remote: remote.clone(),
            },
        )?
        .serve_at(OBJECT_PATH, PlayerIface { remote, shared })?
        .build()
        .await?;
    debug!("MPRIS: serving {BUS_NAME}");
    // The connection dispatches in the background for as long as it lives.
    pending::<()>().await;
    Ok(())
}

/// Start the service thread. Without a session bus the player still runs;
/// the handle then just updates state nobody reads.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let shared = Shared::default();
    let remote = Remote(tx);
    let for_bus = shared.clone();
    std::thread::spawn(move || {
        if let Err(e) = block_on(serve(remote, for_bus)) {
            warn!("MPRIS unavailable: {e}");
        }
    });
    MprisHandle { shared }
}

#[cfg(test)]
mod tests;
