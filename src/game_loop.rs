use std::time::{Duration, Instant};

use log::{info, warn};

use crate::game::{GameState, GameStatus, TickOutcome};
use crate::input::GameInput;
use crate::score::HighScoreStore;

/// Cancellable one-shot deadline for the next tick.
///
/// Holding a single `Option<Instant>` means at most one tick is ever
/// pending; scheduling again replaces the previous deadline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickScheduler {
    deadline: Option<Instant>,
}

impl TickScheduler {
    pub fn schedule(&mut self, now: Instant, interval: Duration) {
        self.deadline = Some(now + interval);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left before the pending tick is due; zero when overdue.
    #[must_use]
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Schedules the tick after one that was due at `previous`.
    ///
    /// Keeps the cadence anchored to `previous` so a late wakeup does not
    /// stretch the next interval. When even that slot has passed, the next
    /// tick is a full interval from `now`; missed ticks are never replayed.
    pub fn schedule_following(&mut self, previous: Instant, interval: Duration, now: Instant) {
        let next = previous + interval;
        self.deadline = Some(if next > now { next } else { now + interval });
    }

    /// Consumes the pending tick if it is due at `now`, returning its deadline.
    pub fn take_due(&mut self, now: Instant) -> Option<Instant> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                Some(deadline)
            }
            _ => None,
        }
    }
}

/// What the front end should do after an input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionEvent {
    Redraw,
    Ignored,
    Quit,
}

/// Owns one game, its high-score store and its tick schedule.
///
/// Inputs and ticks are applied from a single thread; an input received
/// between ticks is visible to the next tick.
#[derive(Debug)]
pub struct GameSession<S: HighScoreStore> {
    state: GameState,
    store: S,
    scheduler: TickScheduler,
}

impl<S: HighScoreStore> GameSession<S> {
    /// Wraps `state`, seeding it with the stored high score.
    ///
    /// An unreadable store counts as a high score of zero.
    pub fn new(mut state: GameState, store: S) -> Self {
        match store.load() {
            Ok(high_score) => state.set_high_score(high_score),
            Err(error) => warn!("could not load high score, starting from 0: {error}"),
        }

        Self {
            state,
            store,
            scheduler: TickScheduler::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies one input event at `now`.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> SessionEvent {
        let changed = match input {
            GameInput::Direction(direction) => self.state.request_direction(direction),
            GameInput::PauseToggle => self.state.toggle_pause(),
            GameInput::Restart => {
                self.state.restart();
                true
            }
            GameInput::Quit => return SessionEvent::Quit,
        };

        self.sync_schedule(now);

        if changed {
            SessionEvent::Redraw
        } else {
            SessionEvent::Ignored
        }
    }

    /// Runs the pending tick if it is due. Returns whether a tick ran.
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.scheduler.take_due(now) else {
            return false;
        };

        // The last food can both set a record and end the game.
        let previous_high_score = self.state.high_score;
        let outcome = self.state.tick();
        if self.state.high_score > previous_high_score {
            self.persist_high_score();
        }
        if let TickOutcome::Died(reason) = outcome {
            info!("final score {} ({reason:?})", self.state.score);
        }

        if self.state.status == GameStatus::Running {
            let interval = Duration::from_millis(self.state.tick_interval_ms);
            self.scheduler.schedule_following(deadline, interval, now);
        }
        self.sync_schedule(now);
        true
    }

    /// How long the front end may wait for input before the next tick.
    #[must_use]
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until(now)
    }

    fn sync_schedule(&mut self, now: Instant) {
        if self.state.status != GameStatus::Running {
            self.scheduler.cancel();
            return;
        }

        if !self.scheduler.is_pending() {
            let interval = Duration::from_millis(self.state.tick_interval_ms);
            self.scheduler.schedule(now, interval);
        }
    }

    fn persist_high_score(&mut self) {
        if let Err(error) = self.store.save(self.state.high_score) {
            warn!("failed to save high score {}: {error}", self.state.high_score);
        }
    }
}
