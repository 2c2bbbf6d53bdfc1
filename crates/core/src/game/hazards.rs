//! Crumbling-trap countdowns.

use super::*;

/// Advances every crumbling trap except those armed this tick. A trap whose
/// countdown has run out collapses once the player is no longer standing on it.
pub(super) fn decay_traps(
    maze: &mut Arc<Maze>,
    player_pos: Pos,
    armed_this_tick: &[Pos],
    log: &mut Vec<LogEvent>,
) {
    let crumbling: Vec<(Pos, u32)> = maze
        .cells
        .iter()
        .filter_map(|cell| match cell.trap {
            TrapPhase::Crumbling { ticks_remaining } if !armed_this_tick.contains(&cell.pos) => {
                Some((cell.pos, ticks_remaining))
            }
            _ => None,
        })
        .collect();
    if crumbling.is_empty() {
        return;
    }

    let maze = Arc::make_mut(maze);
    for (pos, ticks_remaining) in crumbling {
        let remaining = ticks_remaining.saturating_sub(1);
        if remaining == 0 && pos != player_pos {
            maze.set_trap_phase(pos, TrapPhase::Collapsed);
            log.push(LogEvent::TrapCollapsed { pos });
        } else {
            maze.set_trap_phase(pos, TrapPhase::Crumbling { ticks_remaining: remaining });
        }
    }
}
