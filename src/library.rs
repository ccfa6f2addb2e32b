//! Turning paths into queue entries and reading display metadata.
//!
//! `expand` resolves command-line paths (files are taken as given,
//! directories are walked) and `probe` reads tags for the now-playing panel.

mod display;
mod model;
mod scan;

pub use display::display_from_fields;
pub use model::TrackInfo;
pub use scan::{expand, probe};

#[cfg(test)]
mod tests;
