mod app;
mod audio;
mod config;
mod error;
mod library;
mod logging;
mod picker;
mod player;
mod queue;
mod runtime;
mod scheduler;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
