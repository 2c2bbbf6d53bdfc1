use std::fmt;
use std::sync::Arc;

use crate::config::{StalkerProfile, TICK_MS};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub pos: Pos,
    pub kind: CellKind,
    pub trap: TrapPhase,
}

impl Cell {
    pub fn crumbling(&self) -> bool {
        matches!(self.trap, TrapPhase::Crumbling { .. })
    }

    pub fn collapsed(&self) -> bool {
        self.trap == TrapPhase::Collapsed
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
    pub start: Pos,
    pub exit: Pos,
    pub stalker_spawns: Vec<Pos>,
}

impl Maze {
    pub fn filled(width: usize, height: usize, kind: CellKind) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let pos = Pos { y: y as i32, x: x as i32 };
                cells.push(Cell { pos, kind, trap: TrapPhase::Dormant });
            }
        }
        Self {
            width,
            height,
            cells,
            start: Pos { y: 1, x: 1 },
            exit: Pos { y: 1, x: 1 },
            stalker_spawns: Vec::new(),
        }
    }

    /// Parses an ASCII layout: `#` wall, `.` floor, `S` start, `E` exit,
    /// `^` trap, `b` bomb pickup, `G` floor with a stalker spawn.
    pub fn from_rows(rows: &[&str]) -> Result<Self, MazeParseError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(MazeParseError::Empty);
        }
        let mut maze = Self::filled(width, height, CellKind::Wall);
        let mut start = None;
        let mut exit = None;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(MazeParseError::RaggedRow { row: y });
            }
            for (x, glyph) in row.chars().enumerate() {
                let pos = Pos { y: y as i32, x: x as i32 };
                let kind = match glyph {
                    '#' => CellKind::Wall,
                    '.' => CellKind::Floor,
                    'S' => {
                        start = Some(pos);
                        CellKind::Start
                    }
                    'E' => {
                        exit = Some(pos);
                        CellKind::Exit
                    }
                    '^' => CellKind::Trap,
                    'b' => CellKind::Bomb,
                    'G' => {
                        maze.stalker_spawns.push(pos);
                        CellKind::Floor
                    }
                    other => return Err(MazeParseError::UnknownGlyph { glyph: other, pos }),
                };
                maze.set_kind(pos, kind);
            }
        }
        maze.start = start.ok_or(MazeParseError::MissingStart)?;
        maze.exit = exit.ok_or(MazeParseError::MissingExit)?;
        Ok(maze)
    }

    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let pos = Pos { y: y as i32, x: x as i32 };
                        let cell = &self.cells[self.index(pos)];
                        match cell.kind {
                            CellKind::Wall => '#',
                            CellKind::Floor if self.stalker_spawns.contains(&pos) => 'G',
                            CellKind::Floor => '.',
                            CellKind::Start => 'S',
                            CellKind::Exit => 'E',
                            CellKind::Trap if cell.collapsed() => 'O',
                            CellKind::Trap if cell.crumbling() => '~',
                            CellKind::Trap => '^',
                            CellKind::Bomb => 'b',
                        }
                    })
                    .collect()
            })
            .collect()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_boundary(&self, pos: Pos) -> bool {
        pos.x == 0
            || pos.y == 0
            || pos.x as usize == self.width - 1
            || pos.y as usize == self.height - 1
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.in_bounds(pos).then(|| &self.cells[self.index(pos)])
    }

    pub fn kind_at(&self, pos: Pos) -> CellKind {
        self.cell(pos).map_or(CellKind::Wall, |cell| cell.kind)
    }

    pub fn trap_phase(&self, pos: Pos) -> TrapPhase {
        self.cell(pos).map_or(TrapPhase::Dormant, |cell| cell.trap)
    }

    /// Passable for the player and for stalker paths.
    pub fn is_walkable(&self, pos: Pos) -> bool {
        let Some(cell) = self.cell(pos) else {
            return false;
        };
        match cell.kind {
            CellKind::Wall => false,
            CellKind::Floor | CellKind::Start | CellKind::Exit | CellKind::Bomb => true,
            CellKind::Trap => !cell.collapsed(),
        }
    }

    /// Blocks line of sight.
    pub fn is_opaque(&self, pos: Pos) -> bool {
        match self.kind_at(pos) {
            CellKind::Wall => true,
            CellKind::Floor
            | CellKind::Start
            | CellKind::Exit
            | CellKind::Trap
            | CellKind::Bomb => false,
        }
    }

    pub fn set_kind(&mut self, pos: Pos, kind: CellKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx].kind = kind;
        self.cells[idx].trap = TrapPhase::Dormant;
    }

    pub fn set_trap_phase(&mut self, pos: Pos, phase: TrapPhase) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        if self.cells[idx].kind == CellKind::Trap {
            self.cells[idx].trap = phase;
        }
    }

    pub fn count_kind(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| cell.kind == kind).count()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeParseError {
    Empty,
    RaggedRow { row: usize },
    UnknownGlyph { glyph: char, pos: Pos },
    MissingStart,
    MissingExit,
}

impl fmt::Display for MazeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "maze layout is empty"),
            Self::RaggedRow { row } => write!(f, "maze row {row} has a different width"),
            Self::UnknownGlyph { glyph, pos } => {
                write!(f, "unknown maze glyph {glyph:?} at row {} col {}", pos.y, pos.x)
            }
            Self::MissingStart => write!(f, "maze layout has no start cell"),
            Self::MissingExit => write!(f, "maze layout has no exit cell"),
        }
    }
}

impl std::error::Error for MazeParseError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashTrail {
    pub from: Pos,
    pub to: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub bombs: u8,
    pub dash_cooldown: u32,
    pub hiding: bool,
    /// Consecutive ticks the current hide has lasted.
    pub hide_ticks: u32,
    pub silent_step_ticks: u32,
    pub move_cooldown: u32,
    /// Set on the tick a dash lands so renderers can interpolate.
    pub dash_trail: Option<DashTrail>,
}

impl Player {
    pub fn new(pos: Pos, bombs: u8) -> Self {
        Self {
            pos,
            bombs,
            dash_cooldown: 0,
            hiding: false,
            hide_ticks: 0,
            silent_step_ticks: 0,
            move_cooldown: 0,
            dash_trail: None,
        }
    }

    pub fn silent_step(&self) -> bool {
        self.silent_step_ticks > 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stalker {
    pub pos: Pos,
    pub profile: StalkerProfile,
    pub mode: StalkerMode,
    pub last_known: Option<Pos>,
    pub move_counter: u32,
    pub lost_ticks: u32,
    pub heading: Option<Direction>,
}

impl Stalker {
    pub fn new(pos: Pos, profile: StalkerProfile) -> Self {
        Self {
            pos,
            profile,
            mode: StalkerMode::Patrol,
            last_known: None,
            move_counter: 0,
            lost_ticks: 0,
            heading: None,
        }
    }
}

/// Per-cell fog-of-war intensity in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityMap {
    pub width: usize,
    pub height: usize,
    pub alpha: Vec<f32>,
}

impl VisibilityMap {
    pub fn dark(width: usize, height: usize) -> Self {
        Self { width, height, alpha: vec![0.0; width * height] }
    }

    pub fn alpha_at(&self, pos: Pos) -> f32 {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height
        {
            return 0.0;
        }
        self.alpha[(pos.y as usize) * self.width + (pos.x as usize)]
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.alpha_at(pos) > 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Running,
    Victory,
    Caught,
}

/// Read-only per-tick snapshot handed to rendering, audio and HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub level: usize,
    pub maze: Arc<Maze>,
    pub player: Player,
    pub stalkers: Vec<Stalker>,
    pub tick: u64,
    pub visibility: Arc<VisibilityMap>,
    pub stalker_distance: f32,
    pub tension: f32,
    pub is_victory: bool,
    pub is_caught: bool,
}

impl GameState {
    pub fn elapsed_ms(&self) -> u64 {
        self.tick * TICK_MS
    }

    pub fn is_freeze(&self) -> bool {
        self.player.hiding
    }

    pub fn silent_step(&self) -> bool {
        self.player.silent_step()
    }

    pub fn bombs(&self) -> u8 {
        self.player.bombs
    }

    pub fn dash_cooldown(&self) -> u32 {
        self.player.dash_cooldown
    }

    pub fn phase(&self) -> GamePhase {
        if self.is_victory {
            GamePhase::Victory
        } else if self.is_caught {
            GamePhase::Caught
        } else {
            GamePhase::Running
        }
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        match self.phase() {
            GamePhase::Running => None,
            GamePhase::Victory => Some(RunOutcome::Victory),
            GamePhase::Caught => Some(RunOutcome::Caught),
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase() != GamePhase::Running
    }

    pub fn stalker_at(&self, pos: Pos) -> Option<usize> {
        self.stalkers.iter().position(|stalker| stalker.pos == pos)
    }
}
