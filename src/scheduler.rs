//! A single periodic dispatcher for everything that runs on a timer.
//!
//! Subscribers register a task and a period. The event loop asks how long it
//! may sleep, then collects the tasks that are due. A task that fell behind
//! fires once and is rescheduled from `now`; there is no catch-up burst.

use std::time::{Duration, Instant};

/// Work the runtime performs on a timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Task {
    /// Check whether the current track finished and auto-advance.
    PollPlayback,
    PulseTitle,
    SpinSpinner,
    SpinLoading,
    StepFade,
    PulseLabel,
    ExpireNotice,
}

#[derive(Debug)]
struct Subscription {
    task: Task,
    period: Duration,
    next_due: Instant,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    subs: Vec<Subscription>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `task` to fire every `period`, first at `now + period`.
    /// Registering a task again replaces its period.
    pub fn subscribe(&mut self, task: Task, period: Duration, now: Instant) {
        let period = period.max(Duration::from_millis(1));
        self.subs.retain(|s| s.task != task);
        self.subs.push(Subscription {
            task,
            period,
            next_due: now + period,
        });
    }

    pub fn unsubscribe(&mut self, task: Task) {
        self.subs.retain(|s| s.task != task);
    }

    pub fn is_subscribed(&self, task: Task) -> bool {
        self.subs.iter().any(|s| s.task == task)
    }

    /// Tasks due at `now`, in registration order.
    pub fn due(&mut self, now: Instant) -> Vec<Task> {
        let mut fired = Vec::new();
        for sub in self.subs.iter_mut() {
            if sub.next_due <= now {
                fired.push(sub.task);
                sub.next_due = now + sub.period;
            }
        }
        fired
    }

    /// How long the loop may wait before the next task is due, capped at `max`.
    pub fn time_until_next(&self, now: Instant, max: Duration) -> Duration {
        self.subs
            .iter()
            .map(|s| s.next_due.saturating_duration_since(now))
            .min()
            .unwrap_or(max)
            .min(max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn tasks_fire_on_their_own_period() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.subscribe(Task::PollPlayback, ms(1000), t0);
        s.subscribe(Task::PulseTitle, ms(100), t0);

        assert!(s.due(t0).is_empty());
        assert_eq!(s.due(t0 + ms(100)), vec![Task::PulseTitle]);
        assert!(s.due(t0 + ms(150)).is_empty());
        assert_eq!(s.due(t0 + ms(200)), vec![Task::PulseTitle]);
        assert_eq!(
            s.due(t0 + ms(1000)),
            vec![Task::PollPlayback, Task::PulseTitle]
        );
    }

    #[test]
    fn late_task_fires_once_without_catching_up() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.subscribe(Task::SpinSpinner, ms(80), t0);

        assert_eq!(s.due(t0 + ms(1000)), vec![Task::SpinSpinner]);
        assert!(s.due(t0 + ms(1010)).is_empty());
        assert_eq!(s.due(t0 + ms(1080)), vec![Task::SpinSpinner]);
    }

    #[test]
    fn time_until_next_picks_earliest_and_respects_cap() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        assert_eq!(s.time_until_next(t0, ms(250)), ms(250));

        s.subscribe(Task::PollPlayback, ms(1000), t0);
        s.subscribe(Task::StepFade, ms(50), t0);
        assert_eq!(s.time_until_next(t0, ms(250)), ms(50));
        assert_eq!(s.time_until_next(t0 + ms(70), ms(250)), Duration::ZERO);

        s.unsubscribe(Task::StepFade);
        assert_eq!(s.time_until_next(t0, ms(250)), ms(250));
        assert!(!s.is_subscribed(Task::StepFade));
    }

    #[test]
    fn resubscribing_replaces_the_period() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.subscribe(Task::ExpireNotice, ms(3000), t0);
        s.subscribe(Task::ExpireNotice, ms(10), t0);
        assert_eq!(s.due(t0 + ms(10)), vec![Task::ExpireNotice]);
    }
}
