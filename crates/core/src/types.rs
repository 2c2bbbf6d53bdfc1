use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

/// Four-way grid direction. Declaration order is the pathing tie-break priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub const PRIORITY: [Direction; 4] =
        [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    /// Returns `(dx, dy)` with `y` growing downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Right => (1, 0),
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, -1) => Some(Self::Up),
            (-1, 0) => Some(Self::Left),
            (0, 1) => Some(Self::Down),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Left => Self::Right,
            Self::Down => Self::Up,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Floor,
    Start,
    Exit,
    Trap,
    Bomb,
}

/// Decay stage of a trap cell. Non-trap cells stay `Dormant`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapPhase {
    Dormant,
    Crumbling { ticks_remaining: u32 },
    Collapsed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Move(Direction),
    Dash(Direction),
    Bomb(Direction),
    HideStart,
    HideEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StalkerMode {
    Patrol,
    Pursue,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Victory,
    Caught,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    Finished(RunOutcome),
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_ticks: u32,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    LevelStarted { level: usize, seed: u64 },
    TrapTriggered { pos: Pos },
    TrapCollapsed { pos: Pos },
    BombCollected { pos: Pos, bombs: u8 },
    BombDetonated { target: Pos, destroyed: CellKind },
    Dashed { from: Pos, to: Pos },
    HideStarted,
    HideEnded,
    StalkerModeChanged { stalker: usize, from: StalkerMode, to: StalkerMode },
    ExitReached { tick: u64 },
    PlayerCaught { stalker: usize, tick: u64 },
}
