use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::audio::RodioEngine;
use crate::config::{AudioSettings, Settings};
use crate::player::PlaybackController;
use crate::scheduler::{Scheduler, Task};

/// How often the notice line checks for an expired message.
pub const NOTICE_CHECK: Duration = Duration::from_millis(250);

/// Open the output device. Any failure leaves the player in queue-only mode
/// for the rest of the process.
pub fn open_controller(audio: &AudioSettings) -> PlaybackController<RodioEngine> {
    if !audio.enabled {
        info!("audio disabled by config");
        return PlaybackController::unavailable();
    }
    match RodioEngine::init() {
        Ok(engine) => {
            info!("audio output ready");
            PlaybackController::new(engine)
        }
        Err(e) => {
            warn!(error = %e, "audio init failed");
            PlaybackController::unavailable()
        }
    }
}

/// Register the always-on timers. The loading spinner and popup fade are
/// subscribed on demand by the event loop.
pub fn subscribe_tasks(scheduler: &mut Scheduler, settings: &Settings, now: Instant) {
    let ms = Duration::from_millis;
    scheduler.subscribe(
        Task::PollPlayback,
        ms(settings.playback.poll_interval_ms),
        now,
    );
    scheduler.subscribe(Task::ExpireNotice, NOTICE_CHECK, now);

    let anim = &settings.ui.animation;
    if anim.enabled {
        scheduler.subscribe(Task::PulseTitle, ms(anim.title_pulse_ms), now);
        scheduler.subscribe(Task::SpinSpinner, ms(anim.spinner_ms), now);
        scheduler.subscribe(Task::PulseLabel, ms(anim.label_pulse_ms), now);
    }
}
