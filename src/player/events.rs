use crate::queue::TrackRef;

/// Changes the presentation layer has to react to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Queue contents changed (enqueue, removal, clear or advance).
    QueueChanged,
    /// Current track and/or playback status changed.
    NowPlaying,
    /// Audio could not be initialized. Recorded once, at session start.
    AudioUnavailable,
    /// A track was skipped because it could not be loaded.
    TrackFailed { track: TrackRef, reason: String },
}
