use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::Instant;
use tracing::{info, warn};

use crate::app::App;
use crate::library;
use crate::logging;
use crate::player::Session;
use crate::scheduler::Scheduler;

mod cli;
mod event_loop;
mod settings;
mod startup;

use cli::Cli;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (settings, config_problem) = settings::load_settings(cli.config.as_deref());

    if let Some(path) = logging::init(&settings.logging) {
        info!(log = %path.display(), version = env!("CARGO_PKG_VERSION"), "quaver starting");
    }
    if let Some(problem) = config_problem {
        warn!("{problem}");
    }

    let mut session = Session::new(startup::open_controller(&settings.audio));

    let volume = cli.volume.unwrap_or(settings.playback.initial_volume).min(100);
    session.set_volume(f32::from(volume));
    let mut app = App::new(volume);

    if !cli.paths.is_empty() {
        let tracks = library::expand(&cli.paths, &settings.library);
        session.enqueue_many(tracks);
    }

    let mut scheduler = Scheduler::new();
    startup::subscribe_tasks(&mut scheduler, &settings, Instant::now());
    let mut state = event_loop::EventLoopState::new(scheduler);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result =
        event_loop::run(&mut terminal, &settings, &mut app, &mut session, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_arguments_parse_without_paths() {
        let cli = Cli::try_parse_from(["quaver", "--volume", "30"]).unwrap();
        assert!(cli.paths.is_empty());
        assert_eq!(cli.volume, Some(30));
    }
}
