//! Owns the live session and drives it from frame timestamps.
//!
//! Every mutation of the session goes through this type: frame ticks, player
//! input, the game-over timer and manual restarts. The front end only ever
//! borrows the session to draw it.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::clock::{FixedStepScheduler, Simulation, TimerQueue, TimerToken};

use super::{
    config::GameConfig,
    direction::Direction,
    engine::{GameEngine, StepOutcome},
    grid::Grid,
    state::{GameSession, Phase},
};

/// Notifications for the HUD and metrics, drained once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The score changed; carries the new value
    ScoreChanged(u32),
    /// The tick rate went up
    SpeedChanged(u32),
    /// The player paused or resumed
    PauseToggled(bool),
    /// The snake collided; a fresh game follows after the reset delay
    GameOver { score: u32, length: usize },
    /// A fresh session replaced the previous one
    Reset { tick_rate: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduledTask {
    AutoReset,
}

/// Borrowed view that lets the scheduler tick the engine
struct Ticker<'a> {
    engine: &'a mut GameEngine,
    session: &'a mut GameSession,
    outcomes: &'a mut Vec<StepOutcome>,
}

impl Simulation for Ticker<'_> {
    fn tick_rate(&self) -> u32 {
        self.session.tick_rate
    }

    fn is_paused(&self) -> bool {
        self.session.is_paused()
    }

    fn step(&mut self) {
        let outcome = self.engine.step(self.session);
        self.outcomes.push(outcome);
    }
}

pub struct GameController {
    engine: GameEngine,
    session: GameSession,
    scheduler: FixedStepScheduler,
    timers: TimerQueue<ScheduledTask>,
    pending_reset: Option<TimerToken>,
    /// Timestamp of the latest frame; `None` until the first one
    now: Option<Duration>,
    events: Vec<GameEvent>,
}

impl GameController {
    /// Start a fresh game
    pub fn new(config: GameConfig) -> Self {
        let mut engine = GameEngine::new(config);
        let session = engine.reset();
        Self::with_session(engine, session)
    }

    /// Drive an existing session, for scripted starts
    pub fn with_session(engine: GameEngine, session: GameSession) -> Self {
        info!(
            cols = engine.grid().cols(),
            rows = engine.grid().rows(),
            tick_rate = session.tick_rate,
            "game started"
        );
        let events = vec![
            GameEvent::Reset {
                tick_rate: session.tick_rate,
            },
            GameEvent::ScoreChanged(session.score),
        ];

        Self {
            engine,
            session,
            scheduler: FixedStepScheduler::new(),
            timers: TimerQueue::new(),
            pending_reset: None,
            now: None,
            events,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Whether a game-over reset is waiting to fire
    pub fn reset_pending(&self) -> bool {
        self.pending_reset.is_some()
    }

    /// Process one rendered frame at timestamp `now`.
    ///
    /// Fires due timers first, then runs as many ticks as the elapsed time
    /// allows. Returns the number of ticks executed.
    pub fn frame(&mut self, now: Duration) -> usize {
        self.now = Some(now);

        for (token, task) in self.timers.poll(now) {
            match task {
                ScheduledTask::AutoReset => self.fire_auto_reset(token),
            }
        }

        let mut outcomes = Vec::new();
        let steps = self.scheduler.advance(
            now,
            &mut Ticker {
                engine: &mut self.engine,
                session: &mut self.session,
                outcomes: &mut outcomes,
            },
        );

        for outcome in outcomes {
            self.record(outcome);
        }
        steps
    }

    /// Buffer a turn for the next tick
    pub fn steer(&mut self, direction: Direction) {
        self.session.request_direction(direction);
    }

    /// Pause or resume. Ignored while the game-over flash is showing.
    pub fn toggle_pause(&mut self) {
        let was_paused = self.session.is_paused();
        let paused = self.session.toggle_pause();
        if paused != was_paused {
            debug!(paused, "pause toggled");
            self.events.push(GameEvent::PauseToggled(paused));
        }
    }

    /// Start over immediately, superseding any pending game-over reset
    pub fn restart(&mut self) {
        if let Some(token) = self.pending_reset.take() {
            self.timers.cancel(token);
        }
        info!(score = self.session.score, "restart requested");
        self.install_fresh_session();
    }

    /// Take the notifications gathered since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, outcome: StepOutcome) {
        match outcome {
            StepOutcome::Idle | StepOutcome::Moved => {}
            StepOutcome::Ate {
                score,
                tick_rate,
                sped_up,
            } => {
                self.events.push(GameEvent::ScoreChanged(score));
                if sped_up {
                    self.events.push(GameEvent::SpeedChanged(tick_rate));
                }
            }
            StepOutcome::Collided { at } => {
                let score = self.session.score;
                let length = self.session.snake.len();
                info!(score, length, x = at.x, y = at.y, "game over");
                self.events.push(GameEvent::GameOver { score, length });

                let deadline = self.now.unwrap_or_default() + self.engine.config().reset_delay();
                self.pending_reset = Some(self.timers.schedule(deadline, ScheduledTask::AutoReset));
            }
        }
    }

    fn fire_auto_reset(&mut self, token: TimerToken) {
        if self.pending_reset != Some(token) {
            warn!(?token, "ignoring stale reset timer");
            return;
        }
        self.pending_reset = None;

        if self.session.phase != Phase::Colliding {
            warn!(phase = ?self.session.phase, "reset timer fired outside game over");
            return;
        }
        self.install_fresh_session();
    }

    /// Replace the session wholesale. This is the whole of the resetting
    /// step: the swap happens within one call, so no caller sees a session
    /// between the old game and the new one.
    fn install_fresh_session(&mut self) {
        let retired = std::mem::replace(&mut self.session, self.engine.reset());
        self.scheduler.rebase(self.now);

        debug!(
            previous_phase = ?retired.phase,
            previous_score = retired.score,
            tick_rate = self.session.tick_rate,
            "fresh session installed"
        );
        self.events.push(GameEvent::Reset {
            tick_rate: self.session.tick_rate,
        });
        self.events.push(GameEvent::ScoreChanged(0));
    }
}
