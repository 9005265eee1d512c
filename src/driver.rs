use std::time::{Duration, Instant};

use tracing::debug;

use crate::constants::{BLINK_COUNT, BLINK_STEP};
use crate::game::{Game, GameState, TickOutcome};
use crate::input::Command;

/// Cosmetic flashing of rows that are about to be removed.
///
/// Only drawing looks at this; the game removes the rows on its own timer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blink {
    pub rows: Vec<usize>,
    started: Instant,
}

impl Blink {
    pub fn new(rows: Vec<usize>, started: Instant) -> Self {
        Self { rows, started }
    }

    /// Whether the rows are blanked out at `now`. The first phase hides them,
    /// the next shows them, and so on; after the last phase they stay shown.
    pub fn hidden(&self, now: Instant) -> bool {
        let step = Duration::from_millis(BLINK_STEP).as_millis();
        let phase = now.saturating_duration_since(self.started).as_millis() / step;
        phase < BLINK_COUNT as u128 && phase % 2 == 0
    }
}

/// Runs a [`Game`] against wall-clock time.
///
/// Owns the two timers the game needs: the periodic gravity tick and the
/// one-shot row clear completion.
pub struct Driver {
    game: Game,
    next_tick: Option<Instant>,
    clear_due: Option<Instant>,
    blink: Option<Blink>,
}

impl Driver {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            next_tick: None,
            clear_due: None,
            blink: None,
        }
    }

    /// Starts a fresh game and its gravity timer.
    pub fn start(&mut self, now: Instant) {
        self.game.start();
        self.schedule_tick(now);
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn blink(&self) -> Option<&Blink> {
        self.blink.as_ref()
    }

    /// Fires every timer that is due at `now`.
    pub fn update(&mut self, now: Instant) {
        if let Some(due) = self.clear_due {
            if now >= due {
                self.clear_due = None;
                self.blink = None;
                let outcome = self.game.complete_clear();
                self.after(outcome, now);
            }
        }

        if let Some(due) = self.next_tick {
            if now >= due && self.game.state() == GameState::Running {
                self.next_tick = Some(due + self.game.config().tick_interval);
                let outcome = self.game.tick();
                self.after(outcome, now);
            }
        }
    }

    /// Applies an input command. Returns whether the game changed.
    pub fn apply(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::Left => self.game.move_left(),
            Command::Right => self.game.move_right(),
            Command::Rotate => self.game.rotate(),
            Command::SoftDrop => self.game.soft_drop(),
            Command::HardDrop => self.game.hard_drop() > 0,
            Command::Pause => {
                let changed = self.game.toggle_pause();
                if changed {
                    match self.game.state() {
                        GameState::Paused => self.next_tick = None,
                        _ => self.schedule_tick(now),
                    }
                }
                changed
            }
            Command::Restart => {
                self.game.restart();
                self.blink = None;
                self.schedule_tick(now);
                true
            }
        }
    }

    fn schedule_tick(&mut self, now: Instant) {
        self.next_tick = Some(now + self.game.config().tick_interval);
    }

    fn after(&mut self, outcome: TickOutcome, now: Instant) {
        match outcome {
            TickOutcome::Clearing(rows) => {
                debug!(?rows, "scheduling row clear");
                self.clear_due = Some(now + self.game.config().clear_delay);
                self.blink = Some(Blink::new(rows, now));
            }
            TickOutcome::GameOver => {
                self.next_tick = None;
                self.clear_due = None;
            }
            TickOutcome::Idle | TickOutcome::Fell | TickOutcome::Spawned => {}
        }
    }
}
