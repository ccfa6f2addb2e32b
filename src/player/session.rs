use tracing::{debug, info, warn};

use crate::audio::AudioEngine;
use crate::error::{PlayerError, Result};
use crate::queue::{QueueStore, TrackRef};

use super::controller::{PlaybackController, PlaybackState};
use super::events::PlayerEvent;

/// Queue + controller, owned by the runtime and passed by reference.
pub struct Session<E> {
    queue: QueueStore,
    controller: PlaybackController<E>,
    events: Vec<PlayerEvent>,
}

impl<E: AudioEngine> Session<E> {
    pub fn new(controller: PlaybackController<E>) -> Self {
        let mut events = Vec::new();
        if !controller.is_available() {
            warn!("audio unavailable, running in queue-only mode");
            events.push(PlayerEvent::AudioUnavailable);
        }
        Self {
            queue: QueueStore::new(),
            controller,
            events,
        }
    }

    pub fn queue(&self) -> &QueueStore {
        &self.queue
    }

    pub fn controller(&self) -> &PlaybackController<E> {
        &self.controller
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn current(&self) -> Option<&TrackRef> {
        self.controller.current()
    }

    pub fn audio_available(&self) -> bool {
        self.controller.is_available()
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: PlayerEvent) {
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }

    fn require_audio(&self) -> Result<()> {
        if self.controller.is_available() {
            Ok(())
        } else {
            Err(PlayerError::AudioUnavailable)
        }
    }

    pub fn enqueue(&mut self, track: TrackRef) {
        debug!(track = %track, "enqueue");
        self.queue.enqueue(track);
        self.emit(PlayerEvent::QueueChanged);
    }

    /// Append several tracks in order, returning how many were added.
    pub fn enqueue_many<I>(&mut self, tracks: I) -> usize
    where
        I: IntoIterator<Item = TrackRef>,
    {
        let added = self.queue.enqueue_many(tracks);
        if added > 0 {
            info!(added, total = self.queue.count(), "tracks queued");
            self.emit(PlayerEvent::QueueChanged);
        }
        added
    }

    pub fn remove_at(&mut self, index: usize) -> Result<TrackRef> {
        let track = self.queue.remove_at(index)?;
        info!(index, track = %track, "removed from queue");
        self.emit(PlayerEvent::QueueChanged);
        Ok(track)
    }

    /// Empty the queue. Playback of the current track is not affected.
    pub fn clear(&mut self) -> usize {
        let removed = self.queue.clear();
        if removed > 0 {
            info!(removed, "queue cleared");
            self.emit(PlayerEvent::QueueChanged);
        }
        removed
    }

    /// Play `track`, falling through to the front of the queue when it
    /// cannot be loaded. Each failed attempt consumes a queue entry, so the
    /// loop ends once the queue is empty.
    fn play_masking_failures(&mut self, first: TrackRef) -> Result<()> {
        let mut next = Some(first);
        while let Some(track) = next.take() {
            match self.controller.play(track) {
                Ok(()) => {
                    self.emit(PlayerEvent::NowPlaying);
                    return Ok(());
                }
                Err(PlayerError::Load { track, source }) => {
                    warn!(track = %track, error = %source, "skipping unplayable track");
                    self.events.push(PlayerEvent::TrackFailed {
                        track,
                        reason: source.to_string(),
                    });
                    self.emit(PlayerEvent::NowPlaying);
                    next = self.queue.dequeue_front();
                    if next.is_some() {
                        self.emit(PlayerEvent::QueueChanged);
                    }
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Take the front of the queue and play it.
    fn advance(&mut self) -> Result<()> {
        let track = self.queue.dequeue_front().ok_or(PlayerError::EmptyQueue)?;
        self.emit(PlayerEvent::QueueChanged);
        self.play_masking_failures(track)
    }

    /// Transport play/pause toggle.
    pub fn play_pause(&mut self) -> Result<()> {
        self.require_audio()?;
        match self.controller.state() {
            PlaybackState::Paused => {
                self.controller.resume()?;
                self.emit(PlayerEvent::NowPlaying);
                Ok(())
            }
            PlaybackState::Playing => {
                self.controller.pause()?;
                self.emit(PlayerEvent::NowPlaying);
                Ok(())
            }
            PlaybackState::Stopped => self.advance(),
        }
    }

    /// Skip to the front of the queue. With nothing queued the current track
    /// keeps playing and `EmptyQueue` is reported.
    pub fn next(&mut self) -> Result<()> {
        self.require_audio()?;
        if self.queue.is_empty() {
            return Err(PlayerError::EmptyQueue);
        }
        self.controller.stop()?;
        self.emit(PlayerEvent::NowPlaying);
        self.advance()
    }

    /// Stop playback. The queue is left as it is.
    pub fn stop(&mut self) -> Result<()> {
        self.require_audio()?;
        let was_active = self.controller.current().is_some();
        self.controller.stop()?;
        if was_active {
            self.emit(PlayerEvent::NowPlaying);
        }
        Ok(())
    }

    /// Jump the queue: remove the track at `index` and play it right away.
    pub fn play_at(&mut self, index: usize) -> Result<()> {
        self.require_audio()?;
        let track = self.queue.remove_at(index)?;
        info!(index, track = %track, "playing out of order");
        self.emit(PlayerEvent::QueueChanged);
        self.play_masking_failures(track)
    }

    /// Volume from the UI in `0..=100`.
    pub fn set_volume(&mut self, level: f32) {
        self.controller.set_volume(level);
        debug!(volume = self.controller.volume(), "volume set");
    }

    /// Periodic check for a naturally finished track.
    pub fn poll_tick(&mut self) {
        if self.controller.state() != PlaybackState::Playing || self.controller.is_busy() {
            return;
        }

        debug!("track finished");
        if self.queue.is_empty() {
            if self.controller.stop().is_ok() {
                self.emit(PlayerEvent::NowPlaying);
            }
            return;
        }

        if let Err(e) = self.advance() {
            warn!(error = %e, "auto-advance failed");
        }
    }
}
