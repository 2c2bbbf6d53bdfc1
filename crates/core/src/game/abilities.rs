//! Player intent resolution: movement, dash, bomb and hide.
//! Rejected intents return `false` and leave every counter untouched.

use super::*;

pub(super) struct AbilityContext<'a> {
    pub(super) maze: &'a mut Arc<Maze>,
    pub(super) player: &'a mut Player,
    pub(super) config: &'a LevelConfig,
    pub(super) log: &'a mut Vec<LogEvent>,
    /// Traps armed during this tick; their countdown starts next tick.
    pub(super) armed: &'a mut Vec<Pos>,
}

impl AbilityContext<'_> {
    pub(super) fn set_hiding(&mut self, hiding: bool) -> bool {
        if self.player.hiding == hiding {
            return false;
        }
        self.player.hiding = hiding;
        self.player.hide_ticks = 0;
        self.player.move_cooldown = 0;
        if hiding {
            self.player.silent_step_ticks = self.config.hide_policy.silent_step_ticks;
            self.log.push(LogEvent::HideStarted);
        } else {
            self.player.silent_step_ticks = 0;
            self.log.push(LogEvent::HideEnded);
        }
        true
    }

    /// Whether the hide policy lets the player leave the current cell this tick.
    fn hide_allows_movement(&self) -> bool {
        if !self.player.hiding {
            return true;
        }
        match self.config.hide_policy.movement {
            HideMovement::Free => true,
            HideMovement::Frozen => false,
            HideMovement::Slowed { .. } => self.player.move_cooldown == 0,
        }
    }

    fn throttle_hidden_movement(&mut self) {
        if self.player.hiding
            && let HideMovement::Slowed { ticks_per_move } = self.config.hide_policy.movement
        {
            self.player.move_cooldown = ticks_per_move;
        }
    }

    pub(super) fn try_move(&mut self, direction: Direction) -> bool {
        if !self.hide_allows_movement() {
            return false;
        }
        let target = self.player.pos.step(direction);
        if !self.maze.is_walkable(target) {
            return false;
        }
        self.player.pos = target;
        self.throttle_hidden_movement();
        self.enter_cell(target);
        true
    }

    /// Moves up to `dash_distance` cells, stopping before the first blocked
    /// cell or on the exit. A dash that cannot leave the current cell is rejected.
    pub(super) fn try_dash(&mut self, direction: Direction) -> bool {
        if !self.config.dash_enabled
            || self.player.dash_cooldown > 0
            || !self.hide_allows_movement()
        {
            return false;
        }
        let from = self.player.pos;
        let mut path = Vec::new();
        let mut cursor = from;
        for _ in 0..self.config.dash_distance {
            let next = cursor.step(direction);
            if !self.maze.is_walkable(next) {
                break;
            }
            cursor = next;
            path.push(next);
            if self.maze.kind_at(next) == CellKind::Exit {
                break;
            }
        }
        if path.is_empty() {
            return false;
        }
        for pos in path {
            self.player.pos = pos;
            self.enter_cell(pos);
        }
        self.throttle_hidden_movement();
        self.player.dash_cooldown = self.config.dash_cooldown_ticks;
        self.player.dash_trail = Some(DashTrail { from, to: cursor });
        self.log.push(LogEvent::Dashed { from, to: cursor });
        true
    }

    /// Scans outward up to the policy range. Open cells are passed over; the
    /// first eligible cell becomes floor and costs one bomb. An ineligible wall
    /// ends the scan with nothing spent.
    pub(super) fn try_bomb(&mut self, direction: Direction) -> bool {
        if !self.config.bombs_enabled || self.player.bombs == 0 {
            return false;
        }
        let policy = self.config.bomb_policy;
        let mut cursor = self.player.pos;
        for _ in 0..policy.range {
            cursor = cursor.step(direction);
            let Some(cell) = self.maze.cell(cursor).copied() else {
                return false;
            };
            if bomb_can_destroy(self.maze, &cell, policy.targets) {
                Arc::make_mut(self.maze).set_kind(cursor, CellKind::Floor);
                self.player.bombs -= 1;
                self.log.push(LogEvent::BombDetonated { target: cursor, destroyed: cell.kind });
                return true;
            }
            match cell.kind {
                CellKind::Wall => return false,
                CellKind::Floor
                | CellKind::Start
                | CellKind::Exit
                | CellKind::Trap
                | CellKind::Bomb => {}
            }
        }
        false
    }

    fn enter_cell(&mut self, pos: Pos) {
        match self.maze.kind_at(pos) {
            CellKind::Trap if self.maze.trap_phase(pos) == TrapPhase::Dormant => {
                let ticks_remaining = self.config.trap_collapse_ticks;
                Arc::make_mut(self.maze)
                    .set_trap_phase(pos, TrapPhase::Crumbling { ticks_remaining });
                self.armed.push(pos);
                self.log.push(LogEvent::TrapTriggered { pos });
            }
            CellKind::Bomb => {
                Arc::make_mut(self.maze).set_kind(pos, CellKind::Floor);
                self.player.bombs = self.player.bombs.saturating_add(1);
                self.log.push(LogEvent::BombCollected { pos, bombs: self.player.bombs });
            }
            CellKind::Wall
            | CellKind::Floor
            | CellKind::Start
            | CellKind::Exit
            | CellKind::Trap => {}
        }
    }
}

fn bomb_can_destroy(maze: &Maze, cell: &Cell, targets: BombTargets) -> bool {
    match cell.kind {
        CellKind::Wall => {
            matches!(targets, BombTargets::WallsOnly | BombTargets::WallsAndTraps)
                && !maze.is_boundary(cell.pos)
        }
        CellKind::Trap => matches!(targets, BombTargets::TrapsOnly | BombTargets::WallsAndTraps),
        CellKind::Floor | CellKind::Start | CellKind::Exit | CellKind::Bomb => false,
    }
}
