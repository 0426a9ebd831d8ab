use super::*;
use std::sync::mpsc;

fn player() -> (PlayerIface, MprisHandle, mpsc::Receiver<ControlCmd>) {
    let shared = Shared::default();
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        remote: Remote(tx),
        shared: shared.clone(),
    };
    (iface, MprisHandle { shared }, rx)
}

fn text(map: &HashMap<String, OwnedValue>, key: &str) -> Option<String> {
    map.get(key).and_then(|v| String::try_from(v.clone()).ok())
}

#[test]
fn playback_status_follows_phase() {
    let (iface, handle, _rx) = player();
    assert_eq!(iface.playback_status(), "Stopped");

    handle.set_phase(Phase::Ready);
    assert_eq!(iface.playback_status(), "Stopped");

    handle.set_phase(Phase::Playing);
    assert_eq!(iface.playback_status(), "Playing");

    handle.set_phase(Phase::Paused);
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn title_prefers_vocal_stem() {
    let (iface, handle, _rx) = player();
    assert_eq!(text(&iface.metadata(), "xesam:title").as_deref(), Some(""));
    assert!(iface.metadata().contains_key("mpris:trackid"));

    handle.set_stem(TrackId::Accompaniment, Some("band.flac".into()));
    assert_eq!(text(&iface.metadata(), "xesam:title").as_deref(), Some("band.flac"));

    handle.set_stem(TrackId::Vocal, Some("vocals.flac".into()));
    let map = iface.metadata();
    assert_eq!(text(&map, "xesam:title").as_deref(), Some("vocals.flac"));
    assert_eq!(text(&map, "duet:accompaniment").as_deref(), Some("band.flac"));
    assert_eq!(text(&map, "duet:vocal").as_deref(), Some("vocals.flac"));

    handle.set_stem(TrackId::Vocal, None);
    let map = iface.metadata();
    assert_eq!(text(&map, "xesam:title").as_deref(), Some("band.flac"));
    assert!(!map.contains_key("duet:vocal"));
}

#[test]
fn methods_forward_control_commands() {
    let (iface, _handle, rx) = player();
    iface.play();
    iface.pause();
    iface.play_pause();
    iface.stop();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::Play,
            ControlCmd::Pause,
            ControlCmd::PlayPause,
            ControlCmd::Stop
        ]
    );
}

#[test]
fn commands_after_shutdown_are_dropped_quietly() {
    let (iface, _handle, rx) = player();
    drop(rx);
    iface.play_pause();
}

#[test]
fn root_quit_forwards_quit() {
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let root = RootIface { remote: Remote(tx) };
    root.quit();
    assert_eq!(rx.try_recv().unwrap(), ControlCmd::Quit);
    assert_eq!(root.identity(), "duet");
}
