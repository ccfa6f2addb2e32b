use std::path::Path;

use super::AudioEngine;
use super::fake::FakeEngine;
use crate::error::EngineError;

#[test]
fn engine_errors_name_the_offending_file() {
    let e = EngineError::Decode {
        path: "/music/broken.mp3".into(),
        reason: "end of stream".to_string(),
    };
    assert_eq!(
        e.to_string(),
        "failed to decode /music/broken.mp3: end of stream"
    );

    let e = EngineError::Open {
        path: "/music/missing.mp3".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    };
    assert!(e.to_string().starts_with("failed to open /music/missing.mp3"));
}

#[test]
fn fake_engine_is_busy_only_while_playing_a_loaded_track() {
    let mut engine = FakeEngine::new();
    assert!(!engine.is_busy());

    engine.load(Path::new("/m/a.mp3")).unwrap();
    assert!(!engine.is_busy());
    engine.play();
    assert!(engine.is_busy());
    engine.pause();
    assert!(!engine.is_busy());
    engine.unpause();
    assert!(engine.is_busy());

    engine.finish_track();
    assert!(!engine.is_busy());
}

#[test]
fn fake_engine_fails_scripted_paths() {
    let mut engine = FakeEngine::new();
    engine.fail_on("/m/bad.mp3");
    assert!(engine.load(Path::new("/m/bad.mp3")).is_err());
    assert_eq!(engine.loaded(), None);
    assert!(engine.load(Path::new("/m/good.mp3")).is_ok());
}
