//! Stable snapshot hashing for replay and determinism checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        let state = &self.state;
        hasher.write_u64(self.level_seed);
        hasher.write_u64(state.tick);
        hasher.write_usize(state.level);
        hasher.write_u8(u8::from(state.is_victory));
        hasher.write_u8(u8::from(state.is_caught));

        let player = &state.player;
        write_pos(&mut hasher, player.pos);
        hasher.write_u8(player.bombs);
        hasher.write_u32(player.dash_cooldown);
        hasher.write_u8(u8::from(player.hiding));
        hasher.write_u32(player.hide_ticks);
        hasher.write_u32(player.silent_step_ticks);
        hasher.write_u32(player.move_cooldown);

        for stalker in &state.stalkers {
            write_pos(&mut hasher, stalker.pos);
            hasher.write_u8(stalker.mode as u8);
            match stalker.last_known {
                Some(pos) => {
                    hasher.write_u8(1);
                    write_pos(&mut hasher, pos);
                }
                None => hasher.write_u8(0),
            }
            hasher.write_u32(stalker.move_counter);
            hasher.write_u32(stalker.lost_ticks);
        }

        for cell in &state.maze.cells {
            hasher.write_u8(cell.kind as u8);
            match cell.trap {
                TrapPhase::Dormant => hasher.write_u8(0),
                TrapPhase::Crumbling { ticks_remaining } => {
                    hasher.write_u8(1);
                    hasher.write_u32(ticks_remaining);
                }
                TrapPhase::Collapsed => hasher.write_u8(2),
            }
        }
        hasher.finish()
    }
}

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.x);
    hasher.write_i32(pos.y);
}
