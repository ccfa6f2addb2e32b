//! Error types shared by the audio engine, the queue and the player session.

use std::path::PathBuf;

use thiserror::Error;

use crate::queue::TrackRef;

/// Failures reported by an [`AudioEngine`](crate::audio::AudioEngine).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The output device could not be opened.
    #[error("audio output could not be initialized: {0}")]
    Init(String),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
}

/// Queue store errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("no track at position {index} (queue holds {len})")]
    OutOfRange { index: usize, len: usize },
}

/// Errors surfaced to the user by player commands.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// Audio could not be initialized at startup; transport is disabled.
    #[error("audio device not initialized, playback disabled")]
    AudioUnavailable,

    #[error("could not play {track}: {source}")]
    Load {
        track: TrackRef,
        #[source]
        source: EngineError,
    },

    #[error("no track at position {index} (queue holds {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Nothing queued and nothing loaded. Informational, not a failure state.
    #[error("no more songs in queue")]
    EmptyQueue,
}

impl From<QueueError> for PlayerError {
    fn from(e: QueueError) -> Self {
        match e {
            QueueError::OutOfRange { index, len } => Self::IndexOutOfRange { index, len },
        }
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
