//! Presentation state: cursor, popups, notices and animation values.
//!
//! Playback and queue contents live in the player `Session`; the UI reads
//! them through a `PlayerView` snapshot taken once per frame.

use std::time::{Duration, Instant};

use crate::audio::AudioEngine;
use crate::error::PlayerError;
use crate::library::TrackInfo;
use crate::player::{PlaybackState, PlayerEvent, Session};
use crate::queue::TrackRef;
use crate::ui::animation::{Fade, FadeDirection, LabelPulse, LoadingIndicator, Spinner, TitlePulse};

/// Read-only copy of the session state the renderer needs.
#[derive(Clone, Debug, Default)]
pub struct PlayerView {
    pub queue: Vec<TrackRef>,
    pub state: PlaybackState,
    pub current: Option<TrackRef>,
    pub audio_available: bool,
}

impl PlayerView {
    pub fn of<E: AudioEngine>(session: &Session<E>) -> Self {
        Self {
            queue: session.queue().peek_all(),
            state: session.state(),
            current: session.current().cloned(),
            audio_available: session.audio_available(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// One-shot message shown on the notice line until it expires.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub shown_at: Instant,
}

/// Queue browser popup. Stays on screen while it fades out.
#[derive(Clone, Debug)]
pub struct Browser {
    pub selected: usize,
    pub fade: Fade,
}

impl Browser {
    /// Still accepting keys (not fading out).
    pub fn is_interactive(&self) -> bool {
        self.fade.direction() == FadeDirection::In
    }
}

pub struct App {
    /// Cursor into the queue list.
    pub selected: usize,
    pub browser: Option<Browser>,
    /// Waiting for y/n after `C`.
    pub confirm_clear: bool,
    pub notice: Option<Notice>,
    /// A file pick is in flight.
    pub loading: bool,

    pub now_playing: Option<TrackInfo>,
    pub audio_available: bool,
    /// UI volume, 0..=100.
    pub volume: u8,

    pub title_pulse: TitlePulse,
    pub spinner: Spinner,
    pub loading_indicator: LoadingIndicator,
    pub label_pulse: LabelPulse,
}

impl App {
    pub fn new(volume: u8) -> Self {
        Self {
            selected: 0,
            browser: None,
            confirm_clear: false,
            notice: None,
            loading: false,
            now_playing: None,
            audio_available: true,
            volume: volume.min(100),
            title_pulse: TitlePulse::default(),
            spinner: Spinner::default(),
            loading_indicator: LoadingIndicator::default(),
            label_pulse: LabelPulse::default(),
        }
    }

    /// Move the cursor down, stopping at the last entry.
    pub fn next(&mut self, queue_len: usize) {
        if self.selected + 1 < queue_len {
            self.selected += 1;
        }
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the cursors inside the queue after it shrank.
    pub fn clamp_cursor(&mut self, queue_len: usize) {
        let last = queue_len.saturating_sub(1);
        self.selected = self.selected.min(last);
        if let Some(b) = self.browser.as_mut() {
            b.selected = b.selected.min(last);
        }
    }

    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>, now: Instant) {
        self.notice = Some(Notice {
            level,
            text: text.into(),
            shown_at: now,
        });
    }

    /// Report a failed command on the notice line.
    pub fn notify_error(&mut self, err: &PlayerError, now: Instant) {
        let level = match err {
            PlayerError::EmptyQueue => NoticeLevel::Info,
            PlayerError::IndexOutOfRange { .. } | PlayerError::AudioUnavailable => {
                NoticeLevel::Warning
            }
            PlayerError::Load { .. } => NoticeLevel::Error,
        };
        self.notify(level, err.to_string(), now);
    }

    /// Drop the notice once it has been visible for `ttl`.
    pub fn expire_notice(&mut self, now: Instant, ttl: Duration) {
        let expired = self
            .notice
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= ttl);
        if expired {
            self.notice = None;
        }
    }

    /// React to the events the session recorded. `NowPlaying` is handled by
    /// the runtime since it needs tag lookup.
    pub fn apply_event(&mut self, event: &PlayerEvent, view: &PlayerView, now: Instant) {
        match event {
            PlayerEvent::QueueChanged => self.clamp_cursor(view.queue.len()),
            PlayerEvent::NowPlaying => {
                if view.state != PlaybackState::Playing {
                    self.label_pulse.reset();
                }
                if view.current.is_none() {
                    self.now_playing = None;
                }
            }
            PlayerEvent::AudioUnavailable => {
                self.audio_available = false;
                self.notify(
                    NoticeLevel::Warning,
                    "Audio device not available. Playback controls are disabled.",
                    now,
                );
            }
            PlayerEvent::TrackFailed { track, reason } => {
                self.notify(
                    NoticeLevel::Error,
                    format!("Could not play {}: {reason}", track.name()),
                    now,
                );
            }
        }
    }

    pub fn set_now_playing(&mut self, info: Option<TrackInfo>) {
        self.now_playing = info;
    }

    pub fn volume_up(&mut self, step: u8) -> u8 {
        self.volume = self.volume.saturating_add(step).min(100);
        self.volume
    }

    pub fn volume_down(&mut self, step: u8) -> u8 {
        self.volume = self.volume.saturating_sub(step);
        self.volume
    }

    /// Open the queue browser. An empty queue gets a notice instead.
    pub fn open_browser(&mut self, queue_len: usize, now: Instant) -> bool {
        if queue_len == 0 {
            self.notify(NoticeLevel::Info, "The queue is empty.", now);
            return false;
        }
        self.browser = Some(Browser {
            selected: 0,
            fade: Fade::fade_in(),
        });
        true
    }

    /// Start fading the browser out; it disappears once the fade settles.
    pub fn close_browser(&mut self) {
        if let Some(b) = self.browser.as_mut() {
            b.fade = b.fade.fade_out_from();
        }
    }

    pub fn browser_next(&mut self, queue_len: usize) {
        if let Some(b) = self.browser.as_mut() {
            if b.selected + 1 < queue_len {
                b.selected += 1;
            }
        }
    }

    pub fn browser_prev(&mut self) {
        if let Some(b) = self.browser.as_mut() {
            b.selected = b.selected.saturating_sub(1);
        }
    }

    /// Advance the popup fade. Returns true while a fade is still running.
    pub fn step_fade(&mut self) -> bool {
        let Some(b) = self.browser.as_mut() else {
            return false;
        };
        b.fade.step();
        if !b.fade.is_settled() {
            return true;
        }
        if b.fade.direction() == FadeDirection::Out {
            self.browser = None;
        }
        false
    }

    pub fn browser_is_interactive(&self) -> bool {
        self.browser.as_ref().is_some_and(Browser::is_interactive)
    }
}
