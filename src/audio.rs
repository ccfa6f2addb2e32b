//! Audio engine abstraction.
//!
//! The player only needs a handful of primitives from the engine: load a
//! file, start/pause/resume/stop output, set the volume and ask whether the
//! loaded track is still producing sound. `RodioEngine` is the real
//! implementation; tests drive the player with a scripted fake.

use std::path::Path;

use crate::error::EngineError;

mod sink;

pub use sink::RodioEngine;

pub trait AudioEngine {
    /// Load `path`, replacing whatever was loaded before. Output starts paused.
    fn load(&mut self, path: &Path) -> Result<(), EngineError>;
    fn play(&mut self);
    fn pause(&mut self);
    fn unpause(&mut self);
    fn stop(&mut self);
    /// `volume` is normalized to `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    /// True while the loaded track still has audio left to play.
    fn is_busy(&self) -> bool;
}

#[cfg(test)]
pub(crate) mod fake;

#[cfg(test)]
mod tests;
