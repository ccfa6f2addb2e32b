//! The playback queue: an in-memory FIFO of track references.
//!
//! Insertion order is playback order. Duplicates are allowed and nothing is
//! validated on the way in; a missing file only shows up when it is loaded.

use std::collections::VecDeque;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::QueueError;

/// Opaque reference to a playable resource (a filesystem path in practice).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TrackRef(PathBuf);

impl TrackRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name used for list rows and labels.
    pub fn name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.display().to_string())
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<PathBuf> for TrackRef {
    fn from(p: PathBuf) -> Self {
        Self(p)
    }
}

impl From<&str> for TrackRef {
    fn from(s: &str) -> Self {
        Self(PathBuf::from(s))
    }
}

#[derive(Debug, Default)]
pub struct QueueStore {
    tracks: VecDeque<TrackRef>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `track` to the back of the queue.
    pub fn enqueue(&mut self, track: TrackRef) {
        self.tracks.push_back(track);
    }

    /// Append every track in order.
    pub fn enqueue_many<I>(&mut self, tracks: I) -> usize
    where
        I: IntoIterator<Item = TrackRef>,
    {
        let before = self.tracks.len();
        self.tracks.extend(tracks);
        self.tracks.len() - before
    }

    /// Remove and return the front track, or `None` when the queue is empty.
    pub fn dequeue_front(&mut self) -> Option<TrackRef> {
        self.tracks.pop_front()
    }

    /// Remove the track at `index`, keeping the order of the rest.
    pub fn remove_at(&mut self, index: usize) -> Result<TrackRef, QueueError> {
        let len = self.tracks.len();
        self.tracks
            .remove(index)
            .ok_or(QueueError::OutOfRange { index, len })
    }

    /// Ordered snapshot for display.
    pub fn peek_all(&self) -> Vec<TrackRef> {
        self.tracks.iter().cloned().collect()
    }

    /// Empty the queue, returning how many tracks were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.tracks.len();
        self.tracks.clear();
        n
    }

    pub fn count(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests;
