use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "quaver")]
#[command(about = "A queue-first terminal music player")]
#[command(version)]
pub struct Cli {
    /// Files or directories to queue at startup, in order
    pub paths: Vec<PathBuf>,

    /// Starting volume (0-100), overrides playback.initial_volume
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: Option<u8>,

    /// Config file to read instead of the default location
    #[arg(short, long, env = "QUAVER_CONFIG_PATH")]
    pub config: Option<PathBuf>,
}
