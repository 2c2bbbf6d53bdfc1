//! Difficulty tiers and the gameplay policies they parameterize.

use std::fmt;

use serde::{Deserialize, Serialize};

pub const LEVEL_COUNT: usize = 5;
/// Fixed simulation step.
pub const TICK_MS: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StalkerProfile {
    /// Ticks between two stalker steps; larger is slower.
    pub ticks_per_move: u32,
    pub detection_radius: u32,
    /// Percent chance that a patrol step homes in on the player.
    pub aggression: u8,
    pub lost_grace_ticks: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BombTargets {
    WallsOnly,
    TrapsOnly,
    WallsAndTraps,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombPolicy {
    pub targets: BombTargets,
    pub range: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HideMovement {
    Free,
    Slowed { ticks_per_move: u32 },
    Frozen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidePolicy {
    pub movement: HideMovement,
    /// Length of the silent-step window opened by each hide.
    pub silent_step_ticks: u32,
    /// Continuous hiding needed before a pursuing stalker loses the scent.
    pub escape_ticks: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub width: usize,
    pub height: usize,
    pub stalkers: Vec<StalkerProfile>,
    pub vision_radius: u32,
    pub trap_density_pct: u8,
    /// Share of dead ends knocked open after carving so the maze has loops.
    pub loop_pct: u8,
    pub bomb_pickups: u8,
    pub starting_bombs: u8,
    pub bombs_enabled: bool,
    pub dash_enabled: bool,
    pub dash_distance: u32,
    pub dash_cooldown_ticks: u32,
    pub trap_collapse_ticks: u32,
    pub bomb_policy: BombPolicy,
    pub hide_policy: HidePolicy,
    pub target_time_ms: u64,
}

impl LevelConfig {
    pub fn validate(&self, level: usize) -> Result<(), ConfigError> {
        if self.width < 5 || self.height < 5 || self.width % 2 == 0 || self.height % 2 == 0 {
            return Err(ConfigError::InvalidDimensions {
                level,
                width: self.width,
                height: self.height,
            });
        }
        if !(1..=2).contains(&self.stalkers.len()) {
            return Err(ConfigError::StalkerCount { level, count: self.stalkers.len() });
        }
        for (stalker, profile) in self.stalkers.iter().enumerate() {
            if profile.ticks_per_move == 0 {
                return Err(ConfigError::ZeroStalkerSpeed { level, stalker });
            }
            check_percent(level, "aggression", profile.aggression)?;
        }
        check_percent(level, "trap_density_pct", self.trap_density_pct)?;
        check_percent(level, "loop_pct", self.loop_pct)?;
        if self.vision_radius == 0 {
            return Err(ConfigError::ZeroVisionRadius { level });
        }
        if let HideMovement::Slowed { ticks_per_move: 0 } = self.hide_policy.movement {
            return Err(ConfigError::ZeroHideSpeed { level });
        }
        Ok(())
    }
}

fn check_percent(level: usize, field: &'static str, value: u8) -> Result<(), ConfigError> {
    if value > 100 {
        return Err(ConfigError::PercentOutOfRange { level, field, value });
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTable {
    pub levels: [LevelConfig; LEVEL_COUNT],
}

impl Default for LevelTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl LevelTable {
    pub fn standard() -> Self {
        Self {
            levels: [
                tier(15, 1, &[stalker(4, 5, 10, 30)], 5, 0, 1, 45_000),
                tier(19, 1, &[stalker(3, 6, 20, 40)], 5, 4, 2, 60_000),
                tier(23, 2, &[stalker(3, 6, 20, 40), stalker(4, 7, 30, 50)], 4, 6, 2, 80_000),
                tier(27, 2, &[stalker(3, 7, 35, 60), stalker(3, 6, 35, 60)], 4, 8, 3, 100_000),
                tier(31, 3, &[stalker(2, 8, 50, 80), stalker(3, 7, 40, 80)], 3, 10, 3, 120_000),
            ],
        }
    }

    /// Level lookup; indices past the last tier clamp to it.
    pub fn get(&self, level: usize) -> &LevelConfig {
        &self.levels[clamp_level(level)]
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (level, config) in self.levels.iter().enumerate() {
            config.validate(level)?;
        }
        Ok(())
    }
}

pub fn clamp_level(level: usize) -> usize {
    level.min(LEVEL_COUNT - 1)
}

fn stalker(
    ticks_per_move: u32,
    detection_radius: u32,
    aggression: u8,
    lost_grace_ticks: u32,
) -> StalkerProfile {
    StalkerProfile { ticks_per_move, detection_radius, aggression, lost_grace_ticks }
}

fn tier(
    size: usize,
    bomb_range: u32,
    stalkers: &[StalkerProfile],
    vision_radius: u32,
    trap_density_pct: u8,
    bomb_pickups: u8,
    target_time_ms: u64,
) -> LevelConfig {
    let hardened = stalkers.len() > 1;
    LevelConfig {
        width: size,
        height: size,
        stalkers: stalkers.to_vec(),
        vision_radius,
        trap_density_pct,
        loop_pct: if hardened { 15 } else { 10 },
        bomb_pickups,
        starting_bombs: 0,
        bombs_enabled: true,
        dash_enabled: true,
        dash_distance: 3,
        dash_cooldown_ticks: if hardened { 40 } else { 30 },
        trap_collapse_ticks: 3,
        bomb_policy: BombPolicy { targets: BombTargets::WallsAndTraps, range: bomb_range },
        hide_policy: HidePolicy {
            movement: HideMovement::Frozen,
            silent_step_ticks: if hardened { 6 } else { 10 },
            escape_ticks: 20,
        },
        target_time_ms,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    InvalidDimensions { level: usize, width: usize, height: usize },
    StalkerCount { level: usize, count: usize },
    ZeroStalkerSpeed { level: usize, stalker: usize },
    PercentOutOfRange { level: usize, field: &'static str, value: u8 },
    ZeroVisionRadius { level: usize },
    ZeroHideSpeed { level: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { level, width, height } => {
                write!(
                    f,
                    "level {level}: maze must be odd-sized and at least 5x5, got {width}x{height}"
                )
            }
            Self::StalkerCount { level, count } => {
                write!(f, "level {level}: expected 1 or 2 stalkers, got {count}")
            }
            Self::ZeroStalkerSpeed { level, stalker } => {
                write!(f, "level {level}: stalker {stalker} has ticks_per_move of 0")
            }
            Self::PercentOutOfRange { level, field, value } => {
                write!(f, "level {level}: {field} must be a percentage, got {value}")
            }
            Self::ZeroVisionRadius { level } => write!(f, "level {level}: vision radius is 0"),
            Self::ZeroHideSpeed { level } => {
                write!(f, "level {level}: slowed hiding needs ticks_per_move of at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
