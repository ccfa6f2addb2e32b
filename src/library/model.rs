use std::path::PathBuf;
use std::time::Duration;

/// Display metadata for a track, read from its tags when possible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackInfo {
    pub path: PathBuf,
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub duration: Option<Duration>,
    pub display: String,
}
