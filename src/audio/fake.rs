//! Scripted engine for tests.
//!
//! The engine is moved into the controller, so its state lives behind a
//! shared handle the test keeps to flip `busy` and inspect calls.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::EngineError;

use super::AudioEngine;

#[derive(Debug, Default)]
pub struct FakeState {
    pub loaded: Option<PathBuf>,
    pub playing: bool,
    pub busy: bool,
    pub volume: f32,
    pub failing: HashSet<PathBuf>,
    pub calls: Vec<String>,
}

#[derive(Clone, Default)]
pub struct FakeEngine {
    pub state: Rc<RefCell<FakeState>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loading `path` fail with a decode error.
    pub fn fail_on(&self, path: &str) {
        self.state.borrow_mut().failing.insert(PathBuf::from(path));
    }

    /// Simulate the loaded track running out.
    pub fn finish_track(&self) {
        self.state.borrow_mut().busy = false;
    }

    pub fn loaded(&self) -> Option<PathBuf> {
        self.state.borrow().loaded.clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }
}

impl AudioEngine for FakeEngine {
    fn load(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut s = self.state.borrow_mut();
        s.calls.push(format!("load {}", path.display()));
        if s.failing.contains(path) {
            s.loaded = None;
            return Err(EngineError::Decode {
                path: path.to_path_buf(),
                reason: "unsupported format".to_string(),
            });
        }
        s.loaded = Some(path.to_path_buf());
        s.playing = false;
        Ok(())
    }

    fn play(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push("play".to_string());
        s.playing = true;
        s.busy = s.loaded.is_some();
    }

    fn pause(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push("pause".to_string());
        s.playing = false;
    }

    fn unpause(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push("unpause".to_string());
        s.playing = true;
    }

    fn stop(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push("stop".to_string());
        s.playing = false;
        s.busy = false;
        s.loaded = None;
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = volume;
    }

    fn is_busy(&self) -> bool {
        let s = self.state.borrow();
        s.playing && s.busy
    }
}
