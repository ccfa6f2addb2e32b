//! Application module: the UI model the renderer and event loop share.
//!
//! `App` holds presentation-only state (cursor, popups, notices, animation
//! values). Queue and playback state are owned by the player session.

mod model;

pub use model::*;
