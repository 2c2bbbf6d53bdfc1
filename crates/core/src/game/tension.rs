//! Proximity danger signal fed to the HUD meter and the audio layer.

use super::*;

/// Distance at which tension reaches zero.
pub const TENSION_FALLOFF_CELLS: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DangerBand {
    Calm,
    Tense,
    Panic,
}

impl DangerBand {
    pub fn from_tension(tension: f32) -> Self {
        if tension > 0.7 {
            Self::Panic
        } else if tension > 0.3 {
            Self::Tense
        } else {
            Self::Calm
        }
    }
}

/// Monotonically decreasing in distance, saturating at 0 and 1.
pub fn tension_from_distance(distance: f32) -> f32 {
    if distance.is_nan() {
        return 0.0;
    }
    (1.0 - distance / TENSION_FALLOFF_CELLS).clamp(0.0, 1.0)
}

/// Distance to the nearest stalker: walkable path length where a path exists,
/// straight-line otherwise, infinite when the level has no stalkers.
pub(super) fn nearest_stalker_distance(maze: &Maze, player: Pos, stalkers: &[Stalker]) -> f32 {
    if stalkers.is_empty() {
        return f32::INFINITY;
    }
    let field = DistanceField::walkable_from(maze, player);
    stalkers
        .iter()
        .map(|stalker| match field.get(stalker.pos) {
            Some(steps) => steps as f32,
            None => euclidean(player, stalker.pos),
        })
        .fold(f32::INFINITY, f32::min)
}
