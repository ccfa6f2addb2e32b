//! Playback core: the controller state machine and the session that ties it
//! to the queue.
//!
//! `PlaybackController` owns the engine handle and tracks the current track
//! and status. `Session` is the object the runtime owns; it implements the
//! user commands, the periodic auto-advance check and the queue browser's
//! "play now", and records `PlayerEvent`s for the UI to pick up.

mod controller;
mod events;
mod session;

pub use controller::*;
pub use events::*;
pub use session::*;
