use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, watch},
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::debug;

use super::clock::TimeSource;

/// Callback run whenever the remaining time goes from a positive value to zero.
pub type ExpiryHook = Box<dyn Fn() + Send + Sync>;

/// Default refresh period for running countdowns (20 updates per second).
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Countdown driven by a monotonic [`TimeSource`].
///
/// Every tick recomputes the remaining time from a fixed end timestamp instead of
/// subtracting the tick period, so late wake-ups never accumulate drift. Remaining
/// time and the running flag are published through `watch` channels.
///
/// Going from a positive remaining time to zero runs the optional [`ExpiryHook`]
/// before the zero is published, so no observer can see the zero first.
pub struct CountdownTimer {
    inner: Arc<TimerInner>,
}

struct TimerInner {
    label: &'static str,
    clock: Arc<dyn TimeSource>,
    tick_interval: Duration,
    remaining: watch::Sender<u64>,
    running: watch::Sender<bool>,
    /// Number of times a countdown reached zero.
    expirations: watch::Sender<u64>,
    on_expiry: Option<ExpiryHook>,
    core: Mutex<TimerCore>,
}

/// Mutable countdown fields; only touched while holding the core lock.
#[derive(Default)]
struct TimerCore {
    total_duration_ms: u64,
    target_end_ms: u64,
    /// Bumped whenever the active tick task is invalidated.
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    /// Create a stopped timer with zero remaining time.
    pub fn new(label: &'static str, clock: Arc<dyn TimeSource>, tick_interval: Duration) -> Self {
        Self::build(label, clock, tick_interval, None)
    }

    /// Like [`CountdownTimer::new`], running `hook` whenever the remaining time
    /// goes from a positive value to zero.
    pub fn with_expiry_hook(
        label: &'static str,
        clock: Arc<dyn TimeSource>,
        tick_interval: Duration,
        hook: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self::build(label, clock, tick_interval, Some(Box::new(hook)))
    }

    fn build(
        label: &'static str,
        clock: Arc<dyn TimeSource>,
        tick_interval: Duration,
        on_expiry: Option<ExpiryHook>,
    ) -> Self {
        let (remaining, _) = watch::channel(0);
        let (running, _) = watch::channel(false);
        let (expirations, _) = watch::channel(0);
        Self {
            inner: Arc::new(TimerInner {
                label,
                clock,
                tick_interval: tick_interval.max(Duration::from_millis(1)),
                remaining,
                running,
                expirations,
                on_expiry,
                core: Mutex::new(TimerCore::default()),
            }),
        }
    }

    /// Latest published remaining time in milliseconds.
    pub fn remaining_ms(&self) -> u64 {
        *self.inner.remaining.borrow()
    }

    /// Whether a tick task is currently counting down.
    pub fn is_running(&self) -> bool {
        *self.inner.running.borrow()
    }

    /// Subscribe to subsequent remaining-time updates.
    pub fn subscribe_remaining(&self) -> watch::Receiver<u64> {
        self.inner.remaining.subscribe()
    }

    /// Subscribe to subsequent running-flag updates.
    pub fn subscribe_running(&self) -> watch::Receiver<bool> {
        self.inner.running.subscribe()
    }

    /// Subscribe to the expiry counter, bumped each time a countdown reaches zero
    /// on its own (including a start at zero).
    pub fn subscribe_expirations(&self) -> watch::Receiver<u64> {
        self.inner.expirations.subscribe()
    }

    /// Configure a new full duration, stopping the countdown first if needed.
    pub async fn set_duration(&self, duration_ms: u64) {
        let mut core = self.inner.core.lock().await;
        self.inner.halt(&mut core);
        core.total_duration_ms = duration_ms;
        self.inner.publish_remaining(duration_ms);
        debug!(clock = self.inner.label, duration_ms, "countdown duration set");
    }

    /// Start counting down from the current remaining time. No-op while running.
    pub async fn start(&self) {
        let mut core = self.inner.core.lock().await;
        if core.task.is_some() {
            return;
        }

        let remaining = self.remaining_ms();
        core.target_end_ms = self.inner.clock.now_ms().saturating_add(remaining);
        publish(&self.inner.running, true);

        let generation = core.generation;
        core.task = Some(tokio::spawn(run_ticks(Arc::clone(&self.inner), generation)));
        debug!(clock = self.inner.label, remaining_ms = remaining, "countdown started");
    }

    /// Cancel the tick task. Once this returns no further update is published.
    pub async fn stop(&self) {
        let mut core = self.inner.core.lock().await;
        if self.inner.halt(&mut core) {
            debug!(
                clock = self.inner.label,
                remaining_ms = self.remaining_ms(),
                "countdown stopped"
            );
        }
    }

    /// Stop and restore the remaining time to the last configured duration.
    pub async fn reset(&self) {
        let mut core = self.inner.core.lock().await;
        self.inner.halt(&mut core);
        self.inner.publish_remaining(core.total_duration_ms);
        debug!(
            clock = self.inner.label,
            remaining_ms = core.total_duration_ms,
            "countdown reset"
        );
    }
}

impl TimerInner {
    /// Publish a new remaining time; returns whether it was a positive-to-zero edge.
    fn publish_remaining(&self, value: u64) -> bool {
        let edge = value == 0 && *self.remaining.borrow() > 0;
        if edge {
            if let Some(hook) = &self.on_expiry {
                hook();
            }
        }
        publish(&self.remaining, value);
        edge
    }

    /// Invalidate and abort the active tick task; returns whether one was running.
    fn halt(&self, core: &mut TimerCore) -> bool {
        core.generation = core.generation.wrapping_add(1);
        let was_running = match core.task.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        };
        publish(&self.running, false);
        was_running
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        if let Ok(mut core) = self.inner.core.try_lock() {
            if let Some(task) = core.task.take() {
                task.abort();
            }
        }
    }
}

async fn run_ticks(inner: Arc<TimerInner>, generation: u64) {
    let mut ticker = interval(inner.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let mut core = inner.core.lock().await;
        if core.generation != generation {
            return;
        }

        let remaining = core.target_end_ms.saturating_sub(inner.clock.now_ms());
        if remaining == 0 {
            let from_positive = inner.publish_remaining(0);
            core.generation = core.generation.wrapping_add(1);
            core.task = None;
            publish(&inner.running, false);
            inner
                .expirations
                .send_modify(|count| *count = count.wrapping_add(1));
            debug!(clock = inner.label, from_positive, "countdown expired");
            return;
        }

        inner.publish_remaining(remaining);
    }
}

/// Send `value` only when it differs from the current one.
fn publish<T: PartialEq>(sender: &watch::Sender<T>, value: T) {
    sender.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    use tokio::time::sleep;

    use super::*;
    use crate::timer::clock::TokioClock;

    fn timer() -> CountdownTimer {
        CountdownTimer::new("test", Arc::new(TokioClock::new()), DEFAULT_TICK_INTERVAL)
    }

    /// Clock that only moves when told to.
    struct ManualClock(AtomicU64);

    impl TimeSource for ManualClock {
        fn now_ms(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn expires_at_exactly_zero_and_stops() {
        let timer = timer();
        timer.set_duration(150).await;

        let mut updates = timer.subscribe_remaining();
        let observed = tokio::spawn(async move {
            let mut seen = Vec::new();
            while updates.changed().await.is_ok() {
                let value = *updates.borrow_and_update();
                seen.push(value);
                if value == 0 {
                    break;
                }
            }
            seen
        });

        timer.start().await;
        assert!(timer.is_running());

        sleep(Duration::from_millis(400)).await;

        assert_eq!(timer.remaining_ms(), 0);
        assert!(!timer.is_running());

        let seen = observed.await.unwrap();
        assert_eq!(seen.last(), Some(&0));
        assert!(seen.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_keeps_a_single_countdown() {
        let timer = timer();
        timer.set_duration(5_000).await;

        timer.start().await;
        timer.start().await;
        sleep(Duration::from_millis(1_020)).await;

        assert_eq!(timer.remaining_ms(), 4_000);
        assert!(timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_remaining_time() {
        let timer = timer();
        timer.set_duration(10_000).await;
        timer.start().await;
        sleep(Duration::from_millis(520)).await;

        timer.stop().await;
        let frozen = timer.remaining_ms();
        assert_eq!(frozen, 9_500);

        sleep(Duration::from_millis(1_000)).await;
        assert_eq!(timer.remaining_ms(), frozen);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent() {
        let timer = timer();
        timer.set_duration(3_000).await;
        timer.start().await;
        sleep(Duration::from_millis(120)).await;

        timer.stop().await;
        let once = (timer.remaining_ms(), timer.is_running());
        timer.stop().await;
        assert_eq!((timer.remaining_ms(), timer.is_running()), once);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_restores_last_configured_duration() {
        let timer = timer();
        timer.set_duration(10_000).await;
        timer.set_duration(8_000).await;
        timer.start().await;
        sleep(Duration::from_millis(1_020)).await;
        assert_eq!(timer.remaining_ms(), 7_000);

        timer.reset().await;
        assert_eq!(timer.remaining_ms(), 8_000);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn set_duration_while_running_stops_first() {
        let timer = timer();
        timer.set_duration(10_000).await;
        timer.start().await;
        sleep(Duration::from_millis(220)).await;

        timer.set_duration(24_000).await;
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_ms(), 24_000);

        sleep(Duration::from_millis(500)).await;
        assert_eq!(timer.remaining_ms(), 24_000);
    }

    #[tokio::test(start_paused = true)]
    async fn start_at_zero_expires_immediately() {
        let timer = timer();
        timer.start().await;
        sleep(Duration::from_millis(10)).await;

        assert_eq!(timer.remaining_ms(), 0);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn late_ticks_resync_to_elapsed_time() {
        let clock = Arc::new(ManualClock(AtomicU64::new(0)));
        let timer = CountdownTimer::new("manual", clock.clone(), DEFAULT_TICK_INTERVAL);
        timer.set_duration(10_000).await;
        timer.start().await;

        // Three seconds elapse between two consecutive ticks.
        clock.0.store(3_000, Ordering::SeqCst);
        sleep(Duration::from_millis(60)).await;
        assert_eq!(timer.remaining_ms(), 7_000);

        clock.0.store(12_000, Ordering::SeqCst);
        sleep(Duration::from_millis(60)).await;
        assert_eq!(timer.remaining_ms(), 0);
        assert!(!timer.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn hook_runs_once_per_expiry_from_positive_time() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let timer = CountdownTimer::with_expiry_hook(
            "hooked",
            Arc::new(TokioClock::new()),
            DEFAULT_TICK_INTERVAL,
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );
        let expirations = timer.subscribe_expirations();

        timer.set_duration(120).await;
        timer.start().await;
        sleep(Duration::from_millis(300)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(*expirations.borrow(), 1);

        // Already at zero: expires again without running the hook.
        timer.start().await;
        sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(*expirations.borrow(), 2);

        timer.set_duration(5_000).await;
        timer.set_duration(0).await;
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert_eq!(*expirations.borrow(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn hook_has_run_by_the_time_zero_is_visible() {
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let timer = CountdownTimer::with_expiry_hook(
            "hooked",
            Arc::new(TokioClock::new()),
            DEFAULT_TICK_INTERVAL,
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );
        timer.set_duration(100).await;
        let mut remaining = timer.subscribe_remaining();
        timer.start().await;

        while remaining.changed().await.is_ok() {
            if *remaining.borrow_and_update() == 0 {
                break;
            }
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        timer.set_duration(24_000).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
