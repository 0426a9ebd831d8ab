use super::sink::{open_source, tagged_duration};
use super::*;

#[test]
fn track_ids_are_distinct_and_labelled() {
    assert_eq!(TrackId::ALL.len(), 2);
    assert_ne!(TrackId::ALL[0], TrackId::ALL[1]);
    assert_eq!(TrackId::Accompaniment.label(), "accompaniment");
    assert_eq!(TrackId::Vocal.label(), "vocal");
}

#[test]
fn opening_missing_file_reports_open_error() {
    let dir = tempfile::tempdir().unwrap();
    let Err(err) = open_source(&dir.path().join("missing.mp3")) else {
        panic!("missing file opened");
    };
    assert!(matches!(err, AudioError::Open { .. }));
    assert!(err.to_string().contains("missing.mp3"));
}

#[test]
fn opening_garbage_reports_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.mp3");
    std::fs::write(&path, b"definitely not audio").unwrap();
    let Err(err) = open_source(&path) else {
        panic!("garbage decoded");
    };
    assert!(matches!(err, AudioError::Decode { .. }));
}

#[test]
fn probing_garbage_has_no_duration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.wav");
    std::fs::write(&path, b"RIFF????WAVEnope").unwrap();
    assert_eq!(tagged_duration(&path), None);
}
