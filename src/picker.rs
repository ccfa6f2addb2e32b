//! Native file picker run off the UI thread.
//!
//! The dialog blocks until the user closes it, so each request runs on its
//! own worker and posts a single `PickerMsg` back over a channel. Only one
//! request is active at a time. Cancelling marks the request so its result
//! is dropped; the dialog itself stays open until the user dismisses it.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;

use tracing::{debug, warn};

/// Completion message posted by a picker worker.
#[derive(Debug, PartialEq, Eq)]
pub enum PickerMsg {
    Picked { request: u64, paths: Vec<PathBuf> },
    /// The dialog was dismissed without a selection.
    Dismissed { request: u64 },
}

impl PickerMsg {
    fn request(&self) -> u64 {
        match self {
            Self::Picked { request, .. } | Self::Dismissed { request } => *request,
        }
    }
}

struct PickRequest {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

pub struct FilePicker {
    tx: Sender<PickerMsg>,
    next_id: u64,
    active: Option<PickRequest>,
}

impl FilePicker {
    pub fn new(tx: Sender<PickerMsg>) -> Self {
        Self {
            tx,
            next_id: 1,
            active: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Open the native multi-file dialog filtered to `extensions`.
    /// Returns false when a pick is already in flight.
    pub fn open(&mut self, extensions: &[String]) -> bool {
        let exts: Vec<String> = extensions.to_vec();
        self.spawn_with(move || {
            async_io::block_on(async move {
                rfd::AsyncFileDialog::new()
                    .set_title("Select Music")
                    .add_filter("Audio Files", exts.as_slice())
                    .add_filter("All Files", &["*"])
                    .pick_files()
                    .await
                    .map(|files| files.iter().map(|f| f.path().to_path_buf()).collect())
            })
        })
    }

    /// Run `pick` on a worker thread and post its result as a `PickerMsg`.
    pub fn spawn_with<F>(&mut self, pick: F) -> bool
    where
        F: FnOnce() -> Option<Vec<PathBuf>> + Send + 'static,
    {
        if self.active.is_some() {
            return false;
        }

        let id = self.next_id;
        self.next_id += 1;
        let cancelled = Arc::new(AtomicBool::new(false));
        let cancelled_for_worker = cancelled.clone();
        let tx = self.tx.clone();

        let spawned = thread::Builder::new()
            .name(format!("file-picker-{id}"))
            .spawn(move || {
                let msg = match pick() {
                    Some(paths) if !paths.is_empty() => PickerMsg::Picked { request: id, paths },
                    _ => PickerMsg::Dismissed { request: id },
                };
                if cancelled_for_worker.load(Ordering::Acquire) {
                    debug!(request = id, "picker result dropped, request cancelled");
                    return;
                }
                // The receiver is gone when the app is shutting down.
                let _ = tx.send(msg);
            });

        match spawned {
            Ok(_) => {
                debug!(request = id, "file picker opened");
                self.active = Some(PickRequest { id, cancelled });
                true
            }
            Err(e) => {
                warn!(error = %e, "could not start file picker worker");
                false
            }
        }
    }

    /// Abandon the active request, if any.
    pub fn cancel(&mut self) {
        if let Some(req) = self.active.take() {
            req.cancelled.store(true, Ordering::Release);
            debug!(request = req.id, "file picker cancelled");
        }
    }

    /// Match a completion against the active request. Returns the picked
    /// paths (possibly empty for a dismissed dialog) or `None` for a stale
    /// message.
    pub fn accept(&mut self, msg: PickerMsg) -> Option<Vec<PathBuf>> {
        match self.active.as_ref() {
            Some(req) if req.id == msg.request() => {}
            _ => return None,
        }
        self.active = None;
        match msg {
            PickerMsg::Picked { paths, .. } => Some(paths),
            PickerMsg::Dismissed { .. } => Some(Vec::new()),
        }
    }
}
