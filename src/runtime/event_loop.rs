use std::sync::mpsc::{Receiver, Sender, channel};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, info};

use crate::app::{App, NoticeLevel, PlayerView};
use crate::audio::AudioEngine;
use crate::config;
use crate::error;
use crate::library;
use crate::picker::{FilePicker, PickerMsg};
use crate::player::{PlaybackState, PlayerEvent, Session};
use crate::scheduler::{Scheduler, Task};
use crate::ui;

/// Upper bound on how long the loop sleeps waiting for input.
const MAX_WAIT: Duration = Duration::from_millis(250);

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    pub scheduler: Scheduler,
    pub picker: FilePicker,
    picker_rx: Receiver<PickerMsg>,
}

impl EventLoopState {
    pub fn new(scheduler: Scheduler) -> Self {
        let (tx, rx): (Sender<PickerMsg>, Receiver<PickerMsg>) = channel();
        Self {
            scheduler,
            picker: FilePicker::new(tx),
            picker_rx: rx,
        }
    }
}

/// Main terminal event loop: timers, picker results, drawing and keys.
/// Returns `Ok(())` when the user quits.
pub fn run<E: AudioEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<E>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();

        while let Ok(msg) = state.picker_rx.try_recv() {
            handle_picker_msg(msg, settings, app, session, state, now);
        }

        for task in state.scheduler.due(now) {
            run_task(task, settings, app, session, state, now);
        }

        sync_events(settings, app, session, now);

        let view = PlayerView::of(session);
        terminal.draw(|f| ui::draw(f, app, &view, &settings.ui))?;

        let timeout = state.scheduler.time_until_next(Instant::now(), MAX_WAIT);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, session, state, Instant::now()) {
                    break;
                }
            }
        }
    }

    state.picker.cancel();
    if session.audio_available() {
        let _ = session.stop();
    }
    info!("quit");
    Ok(())
}

fn handle_picker_msg<E: AudioEngine>(
    msg: PickerMsg,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<E>,
    state: &mut EventLoopState,
    now: Instant,
) {
    let Some(paths) = state.picker.accept(msg) else {
        debug!("stale picker result ignored");
        return;
    };
    app.loading = false;
    state.scheduler.unsubscribe(Task::SpinLoading);

    if paths.is_empty() {
        return;
    }
    let tracks = library::expand(&paths, &settings.library);
    let added = session.enqueue_many(tracks);
    if added > 0 {
        app.notify(NoticeLevel::Info, format!("Added {}.", songs(added)), now);
    }
}

fn run_task<E: AudioEngine>(
    task: Task,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<E>,
    state: &mut EventLoopState,
    now: Instant,
) {
    let playing = session.state() == PlaybackState::Playing;
    match task {
        Task::PollPlayback => session.poll_tick(),
        Task::PulseTitle => app.title_pulse.step(),
        Task::SpinSpinner => {
            if playing {
                app.spinner.step();
            }
        }
        Task::SpinLoading => app.loading_indicator.step(),
        Task::StepFade => {
            if !app.step_fade() {
                state.scheduler.unsubscribe(Task::StepFade);
            }
        }
        Task::PulseLabel => {
            if playing {
                app.label_pulse.step();
            }
        }
        Task::ExpireNotice => {
            app.expire_notice(now, Duration::from_millis(settings.ui.notice_ms));
        }
    }
}

/// Move session events into the UI model. Tags are read only when the
/// current track actually changed.
fn sync_events<E: AudioEngine>(
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<E>,
    now: Instant,
) {
    let events = session.take_events();
    if events.is_empty() {
        return;
    }
    let view = PlayerView::of(session);

    for ev in &events {
        if *ev == PlayerEvent::NowPlaying {
            let known = app.now_playing.as_ref().map(|i| i.path.as_path());
            let current = session.current();
            if current.map(|t| t.path()) != known {
                let ui = &settings.ui;
                let info = current.map(|t| {
                    library::probe(
                        t,
                        &ui.now_playing_track_fields,
                        &ui.now_playing_track_separator,
                    )
                });
                app.set_now_playing(info);
            }
        }
        app.apply_event(ev, &view, now);
    }
}

fn songs(n: usize) -> String {
    if n == 1 {
        "1 song".to_string()
    } else {
        format!("{n} songs")
    }
}

/// Show a failed command on the notice line.
fn report(app: &mut App, result: error::Result<()>, now: Instant) {
    if let Err(e) = result {
        debug!(error = %e, "command rejected");
        app.notify_error(&e, now);
    }
}

fn start_fade(state: &mut EventLoopState, settings: &config::Settings, now: Instant) {
    state.scheduler.subscribe(
        Task::StepFade,
        Duration::from_millis(settings.ui.animation.fade_ms),
        now,
    );
}

fn handle_key_event<E: AudioEngine>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<E>,
    state: &mut EventLoopState,
    now: Instant,
) -> bool {
    let queue_len = session.queue().count();

    if app.confirm_clear {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.confirm_clear = false;
                let removed = session.clear();
                app.notify(NoticeLevel::Info, format!("Cleared {}.", songs(removed)), now);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.confirm_clear = false;
            }
            _ => {}
        }
        return false;
    }

    if app.browser_is_interactive() {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('j') | KeyCode::Down => app.browser_next(queue_len),
            KeyCode::Char('k') | KeyCode::Up => app.browser_prev(),
            KeyCode::Enter => {
                let index = app.browser.as_ref().map(|b| b.selected).unwrap_or(0);
                app.close_browser();
                start_fade(state, settings, now);
                let result = session.play_at(index);
                report(app, result, now);
            }
            KeyCode::Esc | KeyCode::Char('b') => {
                app.close_browser();
                start_fade(state, settings, now);
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('a') => {
            if state.picker.open(&settings.library.extensions) {
                app.loading = true;
                state.scheduler.subscribe(
                    Task::SpinLoading,
                    Duration::from_millis(settings.ui.animation.loading_ms),
                    now,
                );
            } else if state.picker.is_active() {
                app.notify(NoticeLevel::Info, "The file picker is already open.", now);
            } else {
                app.notify(NoticeLevel::Error, "Could not open the file picker.", now);
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            let result = session.play_pause();
            report(app, result, now);
        }
        KeyCode::Char('s') => {
            let result = session.stop();
            report(app, result, now);
        }
        KeyCode::Char('n') | KeyCode::Char('l') => {
            let result = session.next();
            report(app, result, now);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let v = app.volume_up(settings.playback.volume_step);
            session.set_volume(f32::from(v));
        }
        KeyCode::Char('-') => {
            let v = app.volume_down(settings.playback.volume_step);
            session.set_volume(f32::from(v));
        }
        KeyCode::Char('j') | KeyCode::Down => app.next(queue_len),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => {
            if queue_len == 0 {
                app.notify(NoticeLevel::Info, "The queue is empty.", now);
            } else {
                let result = session.play_at(app.selected);
                report(app, result, now);
            }
        }
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => {
            if queue_len == 0 {
                app.notify(NoticeLevel::Info, "The queue is empty.", now);
            } else {
                match session.remove_at(app.selected) {
                    Ok(track) => {
                        app.notify(NoticeLevel::Info, format!("Removed: {}", track.name()), now);
                    }
                    Err(e) => report(app, Err(e), now),
                }
            }
        }
        KeyCode::Char('C') => {
            if queue_len == 0 {
                app.notify(NoticeLevel::Info, "The queue is empty.", now);
            } else if settings.controls.confirm_clear {
                app.confirm_clear = true;
            } else {
                session.clear();
            }
        }
        KeyCode::Char('b') => {
            if app.open_browser(queue_len, now) {
                start_fade(state, settings, now);
            }
        }
        _ => {}
    }

    false
}
