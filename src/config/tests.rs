use super::load::{default_config_path, default_log_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_quaver_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("QUAVER_CONFIG_PATH", "/tmp/quaver-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/quaver-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("quaver")
            .join("config.toml")
    );
}

#[test]
fn default_paths_fall_back_to_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::remove("XDG_STATE_HOME");
    let _g3 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.config/quaver/config.toml")
    );
    assert_eq!(
        default_log_path().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir/.local/state/quaver/quaver.log")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
enabled = false

[playback]
initial_volume = 40
volume_step = 10
poll_interval_ms = 500

[ui]
title_text = "hello"
notice_ms = 1500
now_playing_track_fields = ["title", "album"]
now_playing_track_separator = " • "

[ui.animation]
enabled = false
spinner_ms = 120

[controls]
confirm_clear = false

[library]
extensions = ["mp3"]
recursive = false
include_hidden = true

[logging]
level = "debug"
path = "/tmp/quaver.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::remove("QUAVER__PLAYBACK__INITIAL_VOLUME");

    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert!(!s.audio.enabled);
    assert_eq!(s.playback.initial_volume, 40);
    assert_eq!(s.playback.volume_step, 10);
    assert_eq!(s.playback.poll_interval_ms, 500);
    assert_eq!(s.ui.title_text, "hello");
    assert_eq!(s.ui.notice_ms, 1500);
    assert!(matches!(s.ui.now_playing_track_fields[0], TrackDisplayField::Title));
    assert!(matches!(s.ui.now_playing_track_fields[1], TrackDisplayField::Album));
    assert_eq!(s.ui.now_playing_track_separator, " • ");
    assert!(!s.ui.animation.enabled);
    assert_eq!(s.ui.animation.spinner_ms, 120);
    // Unset keys keep their defaults.
    assert_eq!(s.ui.animation.fade_ms, 50);
    assert!(!s.controls.confirm_clear);
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(!s.library.recursive);
    assert!(s.library.include_hidden);
    assert_eq!(s.logging.level, "debug");
    assert_eq!(
        s.logging.path.as_deref(),
        Some(std::path::Path::new("/tmp/quaver.log"))
    );
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
initial_volume = 40
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("QUAVER__PLAYBACK__INITIAL_VOLUME", "90");

    let s = Settings::load_from(Some(&cfg_path)).unwrap();
    assert_eq!(s.playback.initial_volume, 90);
}

#[test]
fn missing_config_file_uses_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();

    let s = Settings::load_from(Some(&dir.path().join("nope.toml"))).unwrap();
    assert!(s.audio.enabled);
    assert_eq!(s.playback.initial_volume, 70);
    assert_eq!(s.playback.poll_interval_ms, 1000);
    assert!(s.controls.confirm_clear);
}

#[test]
fn validate_rejects_bad_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.playback.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.poll_interval_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.animation.fade_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.notice_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.volume_step = 101;
    assert!(s.validate().is_err());
    s.playback.volume_step = 100;
    assert!(s.validate().is_ok());
}
