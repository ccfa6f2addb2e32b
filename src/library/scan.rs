use std::path::{Path, PathBuf};

use lofty::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{LibrarySettings, TrackDisplayField};
use crate::queue::TrackRef;

use super::display::display_from_fields;
use super::model::TrackInfo;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Audio files below `dir`, sorted by path.
fn scan_dir(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut found: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_audio_file(p, settings))
        .collect();

    found.sort();
    found
}

/// Turn command-line paths into queue entries, keeping argument order.
///
/// Directories are walked per `settings`. Anything else is queued as given,
/// without checking that it exists; a bad file surfaces when it is played.
pub fn expand(paths: &[PathBuf], settings: &LibrarySettings) -> Vec<TrackRef> {
    let mut tracks = Vec::new();
    for p in paths {
        if p.is_dir() {
            let found = scan_dir(p, settings);
            if found.is_empty() {
                warn!(dir = %p.display(), "no audio files found");
            }
            debug!(dir = %p.display(), count = found.len(), "scanned directory");
            tracks.extend(found.into_iter().map(TrackRef::from));
        } else {
            tracks.push(TrackRef::new(p.clone()));
        }
    }
    tracks
}

/// Read tags for `track`. Files without readable tags fall back to the file
/// stem as title.
pub fn probe(track: &TrackRef, fields: &[TrackDisplayField], sep: &str) -> TrackInfo {
    let path = track.path();
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist: Option<String> = None;
    let mut album: Option<String> = None;
    let mut duration = None;

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            duration = Some(tagged.properties().duration());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.title() {
                    if !v.trim().is_empty() {
                        title = v.trim().to_string();
                    }
                }
                artist = tag
                    .artist()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
                album = tag
                    .album()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty());
            }
        }
        Err(e) => debug!(track = %track, error = %e, "no readable tags"),
    }

    let display = display_from_fields(
        path,
        &title,
        artist.as_deref(),
        album.as_deref(),
        fields,
        sep,
    );

    TrackInfo {
        path: path.to_path_buf(),
        title,
        artist,
        album,
        duration,
        display,
    }
}
