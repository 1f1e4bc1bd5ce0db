//! Plays the buzzer when a clock expires.

use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    services::sse_events,
    state::{ClockKind, SharedState},
};

/// Audio output for the expiry buzzer.
pub trait BuzzerSound: Send + Sync {
    /// Start playing the buzz for `clock`. Must not block.
    fn play(&self, clock: ClockKind);
    /// Free any audio resources; called once on shutdown.
    fn release(&self);
}

/// Buzzer that only writes to the log, for headless deployments.
#[derive(Debug, Default)]
pub struct LogBuzzer;

impl BuzzerSound for LogBuzzer {
    fn play(&self, clock: ClockKind) {
        info!(clock = clock.as_str(), "BZZZT");
    }

    fn release(&self) {
        debug!("log buzzer released");
    }
}

/// Consume a pending buzzer of `kind` and play it. Returns whether it was played.
///
/// Consuming first means a concurrent acknowledgement can never lead to a
/// second playback of the same expiry.
pub fn dispatch(state: &SharedState, sound: &dyn BuzzerSound, kind: ClockKind) -> bool {
    if !state.controller().consume_buzzer(kind) {
        return false;
    }
    sound.play(kind);
    sse_events::broadcast_buzzer_played(state, kind);
    true
}

/// Watch both buzzer flags and dispatch every raise until the controller goes away.
pub async fn run_dispatcher(state: SharedState, sound: Arc<dyn BuzzerSound>) {
    let controller = state.controller();
    let mut game = controller.subscribe_buzzer(ClockKind::Game);
    let mut shot = controller.subscribe_buzzer(ClockKind::Shot);

    // Expiries raised before this task subscribed.
    for kind in [ClockKind::Game, ClockKind::Shot] {
        dispatch(&state, sound.as_ref(), kind);
    }

    loop {
        let (kind, raised) = tokio::select! {
            Ok(()) = game.changed() => (ClockKind::Game, *game.borrow_and_update()),
            Ok(()) = shot.changed() => (ClockKind::Shot, *shot.borrow_and_update()),
            else => break,
        };
        if raised {
            dispatch(&state, sound.as_ref(), kind);
        }
    }
}
