use tracing::{debug, info};

use crate::audio::AudioEngine;
use crate::error::{PlayerError, Result};
use crate::queue::TrackRef;

/// The playback state of the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Wraps a single engine handle. `engine` is `None` when audio failed to
/// initialize; every transport call then fails with `AudioUnavailable`.
pub struct PlaybackController<E> {
    engine: Option<E>,
    current: Option<TrackRef>,
    state: PlaybackState,
    volume: f32,
}

impl<E: AudioEngine> PlaybackController<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine: Some(engine),
            current: None,
            state: PlaybackState::Stopped,
            volume: 1.0,
        }
    }

    /// Controller for a process where audio could not be initialized.
    pub fn unavailable() -> Self {
        Self {
            engine: None,
            current: None,
            state: PlaybackState::Stopped,
            volume: 1.0,
        }
    }

    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current(&self) -> Option<&TrackRef> {
        self.current.as_ref()
    }

    /// Normalized volume in `0.0..=1.0`.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn engine_mut(&mut self) -> Result<&mut E> {
        self.engine.as_mut().ok_or(PlayerError::AudioUnavailable)
    }

    /// Stop whatever is playing, then load and start `track`.
    ///
    /// On a load failure the controller ends up Stopped with no current track.
    pub fn play(&mut self, track: TrackRef) -> Result<()> {
        let volume = self.volume;
        let engine = self.engine_mut()?;
        engine.stop();

        if let Err(source) = engine.load(track.path()) {
            self.current = None;
            self.state = PlaybackState::Stopped;
            return Err(PlayerError::Load { track, source });
        }
        engine.set_volume(volume);
        engine.play();

        info!(track = %track, "playing");
        self.current = Some(track);
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Suspend output. Returns whether anything changed (only from Playing).
    pub fn pause(&mut self) -> Result<bool> {
        let playing = self.state == PlaybackState::Playing;
        let engine = self.engine_mut()?;
        if !playing {
            return Ok(false);
        }
        engine.pause();
        self.state = PlaybackState::Paused;
        debug!("paused");
        Ok(true)
    }

    /// Resume output. Returns whether anything changed (only from Paused).
    pub fn resume(&mut self) -> Result<bool> {
        let paused = self.state == PlaybackState::Paused;
        let engine = self.engine_mut()?;
        if !paused {
            return Ok(false);
        }
        engine.unpause();
        self.state = PlaybackState::Playing;
        debug!("resumed");
        Ok(true)
    }

    /// Halt output and forget the current track. Idempotent.
    pub fn stop(&mut self) -> Result<()> {
        self.engine_mut()?.stop();
        if self.current.take().is_some() {
            info!("stopped");
        }
        self.state = PlaybackState::Stopped;
        Ok(())
    }

    /// Apply a UI volume in `0..=100`. Out-of-range input is clamped and NaN
    /// is treated as silence. The level is kept even without an engine.
    pub fn set_volume(&mut self, level: f32) {
        let level = if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 100.0)
        };
        self.volume = level / 100.0;
        let volume = self.volume;
        if let Some(engine) = self.engine.as_mut() {
            engine.set_volume(volume);
        }
    }

    /// Whether the current track is still producing output. Paused and
    /// Stopped are never busy.
    pub fn is_busy(&self) -> bool {
        match (&self.engine, self.state) {
            (Some(engine), PlaybackState::Playing) => engine.is_busy(),
            _ => false,
        }
    }
}
