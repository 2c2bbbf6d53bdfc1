//! Fixed-timestep tick loop and terminal-state handling.

use super::*;
use crate::game::abilities::AbilityContext;
use crate::game::hazards::decay_traps;
use crate::game::stalker::{StalkerWorld, update_stalkers};
use crate::game::tension::nearest_stalker_distance;

/// Upper bound on ticks simulated by one `advance` call, so a long stall
/// (window drag, debugger) does not fast-forward the chase.
pub const MAX_CATCH_UP_TICKS: u32 = 10;

/// What the intent phase changed, so timers skip counters set this tick.
#[derive(Default)]
struct IntentOutcome {
    dashed: bool,
    hide_started: bool,
    armed: Vec<Pos>,
}

impl Game {
    /// Feeds wall-clock time into the fixed-step clock and runs every whole
    /// tick that fits, up to `MAX_CATCH_UP_TICKS`.
    pub fn advance(&mut self, elapsed_ms: u64) -> AdvanceResult {
        if let Some(outcome) = self.state.outcome() {
            self.accumulator_ms = 0;
            return AdvanceResult {
                simulated_ticks: 0,
                stop_reason: AdvanceStopReason::Finished(outcome),
            };
        }
        let budget = u64::from(MAX_CATCH_UP_TICKS) * TICK_MS;
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms).min(budget);

        let mut steps = 0;
        while self.accumulator_ms >= TICK_MS {
            self.accumulator_ms -= TICK_MS;
            self.tick();
            steps += 1;
            if let Some(outcome) = self.state.outcome() {
                self.accumulator_ms = 0;
                return AdvanceResult {
                    simulated_ticks: steps,
                    stop_reason: AdvanceStopReason::Finished(outcome),
                };
            }
        }
        AdvanceResult { simulated_ticks: steps, stop_reason: AdvanceStopReason::BudgetExhausted }
    }

    /// Runs exactly one simulation step. Returns `false` without touching any
    /// state once the level has ended.
    pub fn tick(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state.tick += 1;
        self.state.player.dash_trail = None;

        let intents = self.pending.take();
        let outcome = self.apply_intents(intents);
        self.advance_timers(&outcome);

        if self.player_collides() {
            self.state.is_caught = true;
        } else {
            let world = StalkerWorld {
                maze: &self.state.maze,
                player: &self.state.player,
                hide_policy: self.config.hide_policy,
            };
            update_stalkers(&mut self.state.stalkers, &world, &mut self.rng, &mut self.log);
        }

        self.refresh_derived();
        self.evaluate_terminal();
        true
    }

    fn apply_intents(&mut self, intents: PendingIntents) -> IntentOutcome {
        let mut outcome = IntentOutcome::default();
        let mut ctx = AbilityContext {
            maze: &mut self.state.maze,
            player: &mut self.state.player,
            config: &self.config,
            log: &mut self.log,
            armed: &mut outcome.armed,
        };
        if let Some(hiding) = intents.hide {
            outcome.hide_started = ctx.set_hiding(hiding) && hiding;
        }
        match intents.ability {
            Some(Intent::Dash(direction)) => outcome.dashed = ctx.try_dash(direction),
            Some(Intent::Bomb(direction)) => {
                ctx.try_bomb(direction);
            }
            Some(Intent::Move(_) | Intent::HideStart | Intent::HideEnd) | None => {}
        }
        if !outcome.dashed
            && let Some(direction) = intents.movement
        {
            ctx.try_move(direction);
        }
        outcome
    }

    fn advance_timers(&mut self, outcome: &IntentOutcome) {
        let player = &mut self.state.player;
        if !outcome.dashed {
            player.dash_cooldown = player.dash_cooldown.saturating_sub(1);
        }
        player.move_cooldown = player.move_cooldown.saturating_sub(1);
        if player.hiding {
            player.hide_ticks = player.hide_ticks.saturating_add(1);
            if !outcome.hide_started {
                player.silent_step_ticks = player.silent_step_ticks.saturating_sub(1);
            }
        }
        decay_traps(&mut self.state.maze, player.pos, &outcome.armed, &mut self.log);
    }

    fn player_collides(&self) -> bool {
        !self.state.player.hiding && self.state.stalker_at(self.state.player.pos).is_some()
    }

    fn refresh_derived(&mut self) {
        let state = &mut self.state;
        state.visibility = Arc::new(compute_visibility(
            &state.maze,
            state.player.pos,
            self.config.vision_radius,
            state.player.hiding,
        ));
        state.stalker_distance =
            nearest_stalker_distance(&state.maze, state.player.pos, &state.stalkers);
        state.tension = tension_from_distance(state.stalker_distance);
    }

    /// Victory wins a same-tick tie with a catch.
    fn evaluate_terminal(&mut self) {
        let tick = self.state.tick;
        if self.state.player.pos == self.state.maze.exit {
            self.state.is_victory = true;
            self.state.is_caught = false;
            self.log.push(LogEvent::ExitReached { tick });
            log::info!("level {} cleared at tick {tick}", self.state.level + 1);
            return;
        }
        if self.state.is_caught || self.player_collides() {
            self.state.is_caught = true;
            let stalker = self.state.stalker_at(self.state.player.pos).unwrap_or_default();
            self.log.push(LogEvent::PlayerCaught { stalker, tick });
            log::info!("caught by stalker {stalker} at tick {tick}");
        }
    }
}
