//! Central coordinator for scores, both clocks and their buzzers.

use std::{sync::Arc, time::Duration};

use serde_json::{Value, json};
use tokio::{
    sync::{Mutex, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    dao::{
        kv_store::{ScoreboardStore, StoreKey},
        models::SavedSession,
    },
    domain::game_time,
    state::{
        buzzer::{BuzzerFlag, ClockKind},
        score::{ScoreState, Team},
    },
    timer::{CountdownTimer, TimeSource},
};

/// Point-in-time view of one clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStatus {
    /// Remaining time in milliseconds.
    pub remaining_ms: u64,
    /// Whether the clock is counting down.
    pub running: bool,
}

/// Point-in-time view of everything the presentation layer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreboardSnapshot {
    /// Team scores.
    pub score: ScoreState,
    /// Game clock state.
    pub game: ClockStatus,
    /// Shot clock state.
    pub shot: ClockStatus,
    /// Game clock buzzer waiting to be played.
    pub game_buzzer: bool,
    /// Shot clock buzzer waiting to be played.
    pub shot_buzzer: bool,
    /// Whether the "set game time" dialog is shown.
    pub game_time_dialog_open: bool,
}

/// Owns the score, both countdowns and the buzzer flags, and is the only
/// component allowed to mutate them.
///
/// Pausing the game clock also pauses a running shot clock; starting the game
/// clock leaves the shot clock alone, and the shot clock never drives the game
/// clock. Every mutation is written through to the [`ScoreboardStore`].
pub struct ScoreboardController {
    inner: Arc<ControllerInner>,
    watchers: Mutex<Vec<JoinHandle<()>>>,
}

struct ControllerInner {
    score: watch::Sender<ScoreState>,
    game_clock: CountdownTimer,
    shot_clock: CountdownTimer,
    game_buzzer: Arc<BuzzerFlag>,
    shot_buzzer: Arc<BuzzerFlag>,
    game_time_dialog: watch::Sender<bool>,
    store: Arc<dyn ScoreboardStore>,
    /// Serialises mutations so multi-clock rules apply atomically.
    gate: Mutex<()>,
}

impl ScoreboardController {
    /// Build a controller from a previously saved session and resume any clock
    /// that was running.
    pub async fn init(
        saved: SavedSession,
        store: Arc<dyn ScoreboardStore>,
        time: Arc<dyn TimeSource>,
        tick_interval: Duration,
    ) -> Self {
        let (score, _) = watch::channel(ScoreState {
            home: saved.home_score,
            away: saved.away_score,
        });
        let (game_time_dialog, _) = watch::channel(false);
        let game_buzzer = Arc::new(BuzzerFlag::new());
        let shot_buzzer = Arc::new(BuzzerFlag::new());

        let inner = Arc::new(ControllerInner {
            score,
            game_clock: CountdownTimer::with_expiry_hook(
                "game",
                Arc::clone(&time),
                tick_interval,
                raise_on_expiry(Arc::clone(&game_buzzer), ClockKind::Game),
            ),
            shot_clock: CountdownTimer::with_expiry_hook(
                "shot",
                time,
                tick_interval,
                raise_on_expiry(Arc::clone(&shot_buzzer), ClockKind::Shot),
            ),
            game_buzzer,
            shot_buzzer,
            game_time_dialog,
            store,
            gate: Mutex::new(()),
        });

        inner.game_clock.set_duration(saved.game_remaining_ms).await;
        inner.shot_clock.set_duration(saved.shot_remaining_ms).await;

        let watchers = vec![
            spawn_expiry_persister(Arc::clone(&inner), ClockKind::Game),
            spawn_expiry_persister(Arc::clone(&inner), ClockKind::Shot),
        ];

        if saved.game_running {
            inner.game_clock.start().await;
        }
        if saved.shot_running {
            inner.shot_clock.start().await;
        }

        info!(
            home = saved.home_score,
            away = saved.away_score,
            game_remaining_ms = saved.game_remaining_ms,
            shot_remaining_ms = saved.shot_remaining_ms,
            game_running = saved.game_running,
            shot_running = saved.shot_running,
            "scoreboard session restored"
        );

        Self {
            inner,
            watchers: Mutex::new(watchers),
        }
    }

    // ---------------------------------------------------------------------------
    // Observables
    // ---------------------------------------------------------------------------

    /// Current scores.
    pub fn score(&self) -> ScoreState {
        *self.inner.score.borrow()
    }

    /// Subscribe to score changes.
    pub fn subscribe_score(&self) -> watch::Receiver<ScoreState> {
        self.inner.score.subscribe()
    }

    /// Current state of one clock.
    pub fn clock_status(&self, kind: ClockKind) -> ClockStatus {
        let clock = self.inner.clock(kind);
        ClockStatus {
            remaining_ms: clock.remaining_ms(),
            running: clock.is_running(),
        }
    }

    /// Subscribe to a clock's remaining time and running flag.
    pub fn subscribe_clock(&self, kind: ClockKind) -> (watch::Receiver<u64>, watch::Receiver<bool>) {
        let clock = self.inner.clock(kind);
        (clock.subscribe_remaining(), clock.subscribe_running())
    }

    /// Whether the buzzer of `kind` is waiting to be played.
    pub fn buzzer_raised(&self, kind: ClockKind) -> bool {
        self.inner.buzzer(kind).is_raised()
    }

    /// Subscribe to a buzzer flag.
    pub fn subscribe_buzzer(&self, kind: ClockKind) -> watch::Receiver<bool> {
        self.inner.buzzer(kind).subscribe()
    }

    /// Whether the "set game time" dialog is shown.
    pub fn game_time_dialog_open(&self) -> bool {
        *self.inner.game_time_dialog.borrow()
    }

    /// Subscribe to dialog visibility changes.
    pub fn subscribe_game_time_dialog(&self) -> watch::Receiver<bool> {
        self.inner.game_time_dialog.subscribe()
    }

    /// Capture every observable value at once.
    pub fn snapshot(&self) -> ScoreboardSnapshot {
        ScoreboardSnapshot {
            score: self.score(),
            game: self.clock_status(ClockKind::Game),
            shot: self.clock_status(ClockKind::Shot),
            game_buzzer: self.buzzer_raised(ClockKind::Game),
            shot_buzzer: self.buzzer_raised(ClockKind::Shot),
            game_time_dialog_open: self.game_time_dialog_open(),
        }
    }

    // ---------------------------------------------------------------------------
    // Scores
    // ---------------------------------------------------------------------------

    /// Credit `points` to `team`.
    pub async fn add_score(&self, team: Team, points: u32) -> ScoreState {
        let score = self.update_score(|score| score.added(team, points)).await;
        debug!(?team, points, home = score.home, away = score.away, "score added");
        score
    }

    /// Remove one point from `team`, clamped at zero.
    pub async fn undo_score(&self, team: Team) -> ScoreState {
        let score = self.update_score(|score| score.undone(team)).await;
        debug!(?team, home = score.home, away = score.away, "score undone");
        score
    }

    /// Set both scores back to zero.
    pub async fn reset_scores(&self) -> ScoreState {
        let score = self.update_score(|_| ScoreState::default()).await;
        debug!("scores reset");
        score
    }

    async fn update_score(&self, f: impl FnOnce(ScoreState) -> ScoreState) -> ScoreState {
        let _gate = self.inner.gate.lock().await;

        let mut next = ScoreState::default();
        self.inner.score.send_if_modified(|score| {
            next = f(*score);
            let changed = next != *score;
            *score = next;
            changed
        });

        self.inner
            .persist(vec![
                (StoreKey::HomeScore, json!(next.home)),
                (StoreKey::AwayScore, json!(next.away)),
            ])
            .await;
        next
    }

    // ---------------------------------------------------------------------------
    // Clocks
    // ---------------------------------------------------------------------------

    /// Start or stop the game clock. Stopping it also stops a running shot clock.
    pub async fn toggle_game_clock(&self) {
        let _gate = self.inner.gate.lock().await;
        let game = &self.inner.game_clock;
        let shot = &self.inner.shot_clock;

        let mut entries = Vec::new();
        if game.is_running() {
            game.stop().await;
            if shot.is_running() {
                shot.stop().await;
                entries.extend(self.inner.clock_entries(ClockKind::Shot));
                debug!("shot clock paused with the game clock");
            }
            debug!(remaining_ms = game.remaining_ms(), "game clock paused");
        } else {
            game.start().await;
            debug!(remaining_ms = game.remaining_ms(), "game clock started");
        }
        entries.extend(self.inner.clock_entries(ClockKind::Game));

        self.inner.persist(entries).await;
    }

    /// Stop the game clock and restore its last configured duration.
    pub async fn reset_game_clock(&self) {
        let _gate = self.inner.gate.lock().await;
        self.inner.game_clock.reset().await;
        self.inner
            .persist(self.inner.clock_entries(ClockKind::Game))
            .await;
    }

    /// Start or stop the shot clock; the game clock is unaffected.
    pub async fn toggle_shot_clock(&self) {
        let _gate = self.inner.gate.lock().await;
        let shot = &self.inner.shot_clock;

        if shot.is_running() {
            shot.stop().await;
            debug!(remaining_ms = shot.remaining_ms(), "shot clock paused");
        } else {
            shot.start().await;
            debug!(remaining_ms = shot.remaining_ms(), "shot clock started");
        }

        self.inner
            .persist(self.inner.clock_entries(ClockKind::Shot))
            .await;
    }

    /// Stop the shot clock and load a fresh possession of `seconds`.
    pub async fn reset_shot_clock(&self, seconds: u32) {
        let _gate = self.inner.gate.lock().await;
        self.inner
            .shot_clock
            .set_duration(u64::from(seconds) * 1_000)
            .await;
        debug!(seconds, "shot clock reset");

        self.inner
            .persist(self.inner.clock_entries(ClockKind::Shot))
            .await;
    }

    /// Stop the game clock and set it to `minutes:seconds` when the value is
    /// acceptable. Returns `false` and changes nothing otherwise.
    pub async fn set_game_time_if_valid(&self, minutes: i32, seconds: i32) -> bool {
        let Some(duration_ms) = game_time::to_millis(minutes, seconds) else {
            debug!(minutes, seconds, "rejected game time");
            return false;
        };

        let _gate = self.inner.gate.lock().await;
        self.inner.game_clock.set_duration(duration_ms).await;
        debug!(duration_ms, "game time set");

        self.inner
            .persist(self.inner.clock_entries(ClockKind::Game))
            .await;
        true
    }

    // ---------------------------------------------------------------------------
    // Buzzers & dialog
    // ---------------------------------------------------------------------------

    /// Acknowledge the game clock buzzer.
    pub fn consume_game_buzzer(&self) -> bool {
        self.consume_buzzer(ClockKind::Game)
    }

    /// Acknowledge the shot clock buzzer.
    pub fn consume_shot_buzzer(&self) -> bool {
        self.consume_buzzer(ClockKind::Shot)
    }

    /// Acknowledge the buzzer of `kind`; returns whether one was pending.
    pub fn consume_buzzer(&self, kind: ClockKind) -> bool {
        let cleared = self.inner.buzzer(kind).consume();
        if cleared {
            debug!(clock = kind.as_str(), "buzzer consumed");
        }
        cleared
    }

    /// Show the "set game time" dialog.
    pub fn open_game_time_dialog(&self) {
        self.inner.game_time_dialog.send_replace(true);
    }

    /// Hide the "set game time" dialog.
    pub fn close_game_time_dialog(&self) {
        self.inner.game_time_dialog.send_replace(false);
    }

    /// Stop both clocks and background watchers, persisting the final state.
    ///
    /// Running flags are saved as they were before stopping so the next
    /// [`ScoreboardController::init`] resumes the countdowns.
    pub async fn dispose(&self) {
        let _gate = self.inner.gate.lock().await;

        let game_running = self.inner.game_clock.is_running();
        let shot_running = self.inner.shot_clock.is_running();
        self.inner.game_clock.stop().await;
        self.inner.shot_clock.stop().await;

        for watcher in self.watchers.lock().await.drain(..) {
            watcher.abort();
        }

        let score = self.score();
        let session = SavedSession {
            home_score: score.home,
            away_score: score.away,
            game_remaining_ms: self.inner.game_clock.remaining_ms(),
            shot_remaining_ms: self.inner.shot_clock.remaining_ms(),
            game_running,
            shot_running,
        };
        self.inner.persist(session.entries()).await;
        info!("scoreboard disposed");
    }
}

impl Drop for ScoreboardController {
    fn drop(&mut self) {
        if let Ok(mut watchers) = self.watchers.try_lock() {
            for watcher in watchers.drain(..) {
                watcher.abort();
            }
        }
    }
}

impl ControllerInner {
    fn clock(&self, kind: ClockKind) -> &CountdownTimer {
        match kind {
            ClockKind::Game => &self.game_clock,
            ClockKind::Shot => &self.shot_clock,
        }
    }

    fn buzzer(&self, kind: ClockKind) -> &BuzzerFlag {
        match kind {
            ClockKind::Game => &*self.game_buzzer,
            ClockKind::Shot => &*self.shot_buzzer,
        }
    }

    fn clock_entries(&self, kind: ClockKind) -> Vec<(StoreKey, Value)> {
        let clock = self.clock(kind);
        let (remaining_key, running_key) = clock_keys(kind);
        vec![
            (remaining_key, json!(clock.remaining_ms())),
            (running_key, json!(clock.is_running())),
        ]
    }

    /// Write-through persistence; the in-memory state stays authoritative on failure.
    async fn persist(&self, entries: Vec<(StoreKey, Value)>) {
        if entries.is_empty() {
            return;
        }
        if let Err(err) = self.store.put_all(entries).await {
            warn!(error = %err, "failed to persist scoreboard state");
        }
    }
}

fn clock_keys(kind: ClockKind) -> (StoreKey, StoreKey) {
    match kind {
        ClockKind::Game => (StoreKey::GameRemainingMs, StoreKey::GameRunning),
        ClockKind::Shot => (StoreKey::ShotRemainingMs, StoreKey::ShotRunning),
    }
}

/// Expiry hook raising `flag` as soon as the clock reaches zero.
fn raise_on_expiry(flag: Arc<BuzzerFlag>, kind: ClockKind) -> impl Fn() + Send + Sync + 'static {
    move || {
        flag.raise();
        info!(clock = kind.as_str(), "clock expired; buzzer raised");
    }
}

/// Save the stopped clock of `kind` after each expiry of its countdown.
fn spawn_expiry_persister(inner: Arc<ControllerInner>, kind: ClockKind) -> JoinHandle<()> {
    let mut expirations = inner.clock(kind).subscribe_expirations();

    tokio::spawn(async move {
        while expirations.changed().await.is_ok() {
            let _gate = inner.gate.lock().await;
            inner.persist(inner.clock_entries(kind)).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::time::sleep;

    use super::*;
    use crate::{
        dao::kv_store::MemoryStore,
        timer::{DEFAULT_TICK_INTERVAL, TokioClock},
    };

    async fn controller_with(saved: SavedSession) -> (ScoreboardController, MemoryStore) {
        let store = MemoryStore::new();
        let controller = ScoreboardController::init(
            saved,
            Arc::new(store.clone()),
            Arc::new(TokioClock::new()),
            DEFAULT_TICK_INTERVAL,
        )
        .await;
        (controller, store)
    }

    async fn fresh_controller() -> (ScoreboardController, MemoryStore) {
        controller_with(SavedSession::default()).await
    }

    async fn stored(store: &MemoryStore, key: StoreKey) -> Option<Value> {
        store.get(key).await.unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_controller_uses_documented_defaults() {
        let (controller, _) = fresh_controller().await;
        let snapshot = controller.snapshot();

        assert_eq!(snapshot.score, ScoreState { home: 0, away: 0 });
        assert_eq!(
            snapshot.game,
            ClockStatus {
                remaining_ms: 600_000,
                running: false
            }
        );
        assert_eq!(
            snapshot.shot,
            ClockStatus {
                remaining_ms: 24_000,
                running: false
            }
        );
        assert!(!snapshot.game_buzzer && !snapshot.shot_buzzer);
        assert!(!snapshot.game_time_dialog_open);
    }

    #[tokio::test(start_paused = true)]
    async fn scores_accumulate_and_persist() {
        let (controller, store) = fresh_controller().await;

        controller.add_score(Team::Home, 2).await;
        let score = controller.add_score(Team::Home, 3).await;

        assert_eq!(score, ScoreState { home: 5, away: 0 });
        assert_eq!(controller.score(), score);
        assert_eq!(stored(&store, StoreKey::HomeScore).await, Some(json!(5)));
        assert_eq!(stored(&store, StoreKey::AwayScore).await, Some(json!(0)));
    }

    #[tokio::test(start_paused = true)]
    async fn undo_on_fresh_board_stays_at_zero() {
        let (controller, _) = fresh_controller().await;
        let score = controller.undo_score(Team::Home).await;
        assert_eq!(score.home, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_scores_zeroes_both_teams() {
        let (controller, store) = fresh_controller().await;
        controller.add_score(Team::Home, 5).await;
        controller.add_score(Team::Away, 3).await;
        controller.undo_score(Team::Away).await;

        let score = controller.reset_scores().await;
        assert_eq!(score, ScoreState { home: 0, away: 0 });
        assert_eq!(stored(&store, StoreKey::AwayScore).await, Some(json!(0)));
    }

    #[tokio::test(start_paused = true)]
    async fn pausing_game_clock_pauses_shot_clock() {
        let (controller, store) = fresh_controller().await;

        controller.toggle_game_clock().await;
        controller.toggle_shot_clock().await;
        assert!(controller.clock_status(ClockKind::Game).running);
        assert!(controller.clock_status(ClockKind::Shot).running);

        controller.toggle_game_clock().await;
        assert!(!controller.clock_status(ClockKind::Game).running);
        assert!(!controller.clock_status(ClockKind::Shot).running);
        assert_eq!(stored(&store, StoreKey::ShotRunning).await, Some(json!(false)));

        controller.toggle_game_clock().await;
        controller.toggle_shot_clock().await;
        controller.toggle_shot_clock().await;
        assert!(controller.clock_status(ClockKind::Game).running);
        assert!(!controller.clock_status(ClockKind::Shot).running);
    }

    #[tokio::test(start_paused = true)]
    async fn starting_game_clock_leaves_shot_clock_stopped() {
        let (controller, store) = fresh_controller().await;

        controller.toggle_game_clock().await;
        assert!(controller.clock_status(ClockKind::Game).running);
        assert!(!controller.clock_status(ClockKind::Shot).running);
        assert_eq!(stored(&store, StoreKey::GameRunning).await, Some(json!(true)));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_shot_clock_stops_and_loads_new_possession() {
        let (controller, store) = fresh_controller().await;
        controller.toggle_shot_clock().await;
        sleep(Duration::from_millis(2_020)).await;
        assert_eq!(controller.clock_status(ClockKind::Shot).remaining_ms, 22_000);

        controller.reset_shot_clock(14).await;
        assert_eq!(
            controller.clock_status(ClockKind::Shot),
            ClockStatus {
                remaining_ms: 14_000,
                running: false
            }
        );
        assert_eq!(
            stored(&store, StoreKey::ShotRemainingMs).await,
            Some(json!(14_000))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn game_time_is_applied_only_when_valid() {
        let (controller, store) = fresh_controller().await;
        controller.toggle_game_clock().await;

        assert!(!controller.set_game_time_if_valid(10, 60).await);
        assert!(controller.clock_status(ClockKind::Game).running);

        assert!(controller.set_game_time_if_valid(5, 30).await);
        assert_eq!(
            controller.clock_status(ClockKind::Game),
            ClockStatus {
                remaining_ms: 330_000,
                running: false
            }
        );
        assert_eq!(
            stored(&store, StoreKey::GameRemainingMs).await,
            Some(json!(330_000))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn reset_game_clock_restores_last_set_time() {
        let (controller, _) = fresh_controller().await;
        assert!(controller.set_game_time_if_valid(5, 0).await);
        controller.toggle_game_clock().await;
        sleep(Duration::from_millis(3_020)).await;

        controller.reset_game_clock().await;
        assert_eq!(
            controller.clock_status(ClockKind::Game),
            ClockStatus {
                remaining_ms: 300_000,
                running: false
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn expiry_raises_buzzer_exactly_once() {
        let (controller, store) = controller_with(SavedSession {
            shot_remaining_ms: 150,
            ..SavedSession::default()
        })
        .await;

        let raises = Arc::new(AtomicUsize::new(0));
        let mut flag = controller.subscribe_buzzer(ClockKind::Shot);
        let counter = Arc::clone(&raises);
        tokio::spawn(async move {
            while flag.changed().await.is_ok() {
                if *flag.borrow_and_update() {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            }
        });

        controller.toggle_shot_clock().await;
        sleep(Duration::from_millis(400)).await;

        assert_eq!(
            controller.clock_status(ClockKind::Shot),
            ClockStatus {
                remaining_ms: 0,
                running: false
            }
        );
        assert!(controller.buzzer_raised(ClockKind::Shot));
        assert!(!controller.buzzer_raised(ClockKind::Game));
        assert_eq!(stored(&store, StoreKey::ShotRemainingMs).await, Some(json!(0)));
        assert_eq!(stored(&store, StoreKey::ShotRunning).await, Some(json!(false)));

        sleep(Duration::from_millis(1_000)).await;
        assert!(controller.buzzer_raised(ClockKind::Shot));
        assert_eq!(raises.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn consumed_buzzer_does_not_come_back() {
        let (controller, _) = controller_with(SavedSession {
            game_remaining_ms: 100,
            ..SavedSession::default()
        })
        .await;

        controller.toggle_game_clock().await;
        sleep(Duration::from_millis(300)).await;
        assert!(controller.buzzer_raised(ClockKind::Game));

        assert!(controller.consume_game_buzzer());
        assert!(!controller.consume_game_buzzer());

        // Restarting at zero re-expires without a new positive-to-zero edge.
        controller.toggle_game_clock().await;
        sleep(Duration::from_millis(300)).await;
        assert!(!controller.buzzer_raised(ClockKind::Game));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_right_after_expiry_keeps_the_buzzer() {
        let (controller, _) = controller_with(SavedSession {
            shot_remaining_ms: 100,
            ..SavedSession::default()
        })
        .await;

        let (mut remaining, _) = controller.subscribe_clock(ClockKind::Shot);
        controller.toggle_shot_clock().await;
        while remaining.changed().await.is_ok() {
            if *remaining.borrow_and_update() == 0 {
                break;
            }
        }

        controller.reset_shot_clock(24).await;
        assert!(controller.buzzer_raised(ClockKind::Shot));
        assert_eq!(controller.clock_status(ClockKind::Shot).remaining_ms, 24_000);
        assert!(controller.consume_shot_buzzer());
    }

    #[tokio::test(start_paused = true)]
    async fn zeroing_a_clock_by_hand_buzzes_once() {
        let (controller, _) = fresh_controller().await;
        controller.reset_shot_clock(0).await;
        assert!(controller.buzzer_raised(ClockKind::Shot));
        assert!(controller.consume_shot_buzzer());

        controller.reset_shot_clock(0).await;
        assert!(!controller.buzzer_raised(ClockKind::Shot));
    }

    #[tokio::test(start_paused = true)]
    async fn running_clocks_resume_after_restore() {
        let (controller, _) = controller_with(SavedSession {
            home_score: 7,
            away_score: 9,
            game_remaining_ms: 5_000,
            game_running: true,
            ..SavedSession::default()
        })
        .await;

        assert_eq!(controller.score(), ScoreState { home: 7, away: 9 });
        sleep(Duration::from_millis(1_020)).await;
        assert_eq!(
            controller.clock_status(ClockKind::Game),
            ClockStatus {
                remaining_ms: 4_000,
                running: true
            }
        );
        assert!(!controller.clock_status(ClockKind::Shot).running);
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_stops_clocks_and_saves_them_for_resume() {
        let (controller, store) = fresh_controller().await;
        controller.add_score(Team::Away, 4).await;
        controller.toggle_game_clock().await;
        sleep(Duration::from_millis(1_020)).await;

        controller.dispose().await;
        assert!(!controller.clock_status(ClockKind::Game).running);
        assert_eq!(
            stored(&store, StoreKey::GameRemainingMs).await,
            Some(json!(599_000))
        );
        assert_eq!(stored(&store, StoreKey::GameRunning).await, Some(json!(true)));

        let restored = SavedSession::load(&store, SavedSession::default()).await;
        assert_eq!(restored.game_remaining_ms, 599_000);
        assert!(restored.game_running);
        assert!(!restored.shot_running);
        assert_eq!(restored.away_score, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn dialog_flag_toggles() {
        let (controller, _) = fresh_controller().await;
        controller.open_game_time_dialog();
        assert!(controller.game_time_dialog_open());
        controller.close_game_time_dialog();
        assert!(!controller.game_time_dialog_open());
    }
}
