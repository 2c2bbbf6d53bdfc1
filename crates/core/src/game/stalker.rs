//! Stalker pursuit AI: a Patrol / Pursue / Lost state machine per stalker with
//! breadth-first pathing toward the player's last known cell.
//! Stalkers share no state with each other.

use super::*;

pub(super) struct StalkerWorld<'a> {
    pub(super) maze: &'a Maze,
    pub(super) player: &'a Player,
    pub(super) hide_policy: HidePolicy,
}

pub(super) fn update_stalkers(
    stalkers: &mut [Stalker],
    world: &StalkerWorld<'_>,
    rng: &mut ChaCha8Rng,
    log: &mut Vec<LogEvent>,
) {
    for (index, stalker) in stalkers.iter_mut().enumerate() {
        let previous = stalker.mode;
        perceive(stalker, world);
        if stalker.mode != previous {
            log::trace!("stalker {index} {previous:?} -> {:?}", stalker.mode);
            log.push(LogEvent::StalkerModeChanged {
                stalker: index,
                from: previous,
                to: stalker.mode,
            });
        }
        move_stalker(stalker, world, rng);
    }
}

/// Detection needs the player in range, in sight, not hiding and not silent.
pub(super) fn can_detect(stalker: &Stalker, world: &StalkerWorld<'_>) -> bool {
    let player = world.player;
    !player.hiding
        && !player.silent_step()
        && manhattan(stalker.pos, player.pos) <= stalker.profile.detection_radius
        && has_line_of_sight(world.maze, stalker.pos, player.pos)
}

fn perceive(stalker: &mut Stalker, world: &StalkerWorld<'_>) {
    let player = world.player;
    match stalker.mode {
        StalkerMode::Patrol | StalkerMode::Lost if can_detect(stalker, world) => {
            stalker.mode = StalkerMode::Pursue;
            stalker.last_known = Some(player.pos);
            stalker.lost_ticks = 0;
        }
        StalkerMode::Patrol => {}
        StalkerMode::Lost => {
            stalker.lost_ticks += 1;
            if stalker.lost_ticks >= stalker.profile.lost_grace_ticks {
                stalker.mode = StalkerMode::Patrol;
                stalker.last_known = None;
                stalker.lost_ticks = 0;
            }
        }
        StalkerMode::Pursue => {
            let out_of_range =
                manhattan(stalker.pos, player.pos) > stalker.profile.detection_radius;
            let escaped =
                player.hiding && player.hide_ticks >= world.hide_policy.escape_ticks;
            if player.silent_step() || escaped || out_of_range {
                stalker.mode = StalkerMode::Lost;
                stalker.lost_ticks = 0;
            } else if !player.hiding {
                stalker.last_known = Some(player.pos);
            }
        }
    }
}

fn move_stalker(stalker: &mut Stalker, world: &StalkerWorld<'_>, rng: &mut ChaCha8Rng) {
    stalker.move_counter += 1;
    if stalker.move_counter < stalker.profile.ticks_per_move {
        return;
    }
    stalker.move_counter = 0;

    let chase = match stalker.mode {
        StalkerMode::Pursue | StalkerMode::Lost => stalker
            .last_known
            .filter(|&target| target != stalker.pos)
            .and_then(|target| next_step_toward(world.maze, stalker.pos, target)),
        StalkerMode::Patrol => None,
    };
    let Some(direction) = chase.or_else(|| patrol_step(stalker, world, rng)) else {
        return;
    };
    stalker.pos = stalker.pos.step(direction);
    stalker.heading = Some(direction);
}

/// Wanders without doubling back unless cornered; an aggressive roll homes in
/// on the player instead, unless the player is hiding.
fn patrol_step(
    stalker: &Stalker,
    world: &StalkerWorld<'_>,
    rng: &mut ChaCha8Rng,
) -> Option<Direction> {
    if !world.player.hiding
        && roll_percent(rng, stalker.profile.aggression)
        && let Some(direction) = next_step_toward(world.maze, stalker.pos, world.player.pos)
    {
        return Some(direction);
    }
    let options: Vec<Direction> = Direction::PRIORITY
        .into_iter()
        .filter(|&direction| world.maze.is_walkable(stalker.pos.step(direction)))
        .collect();
    let forward: Vec<Direction> = options
        .iter()
        .copied()
        .filter(|&direction| stalker.heading != Some(direction.opposite()))
        .collect();
    let pool = if forward.is_empty() { options } else { forward };
    if pool.is_empty() {
        return None;
    }
    Some(pool[roll_below(rng, pool.len())])
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::game::test_support::*;

    fn corridor() -> Maze {
        Maze::from_rows(&[
            "###########", //
            "#S........#",
            "#########E#",
            "###########",
        ])
        .expect("fixture")
    }

    fn world<'a>(maze: &'a Maze, player: &'a Player) -> StalkerWorld<'a> {
        StalkerWorld { maze, player, hide_policy: test_config().hide_policy }
    }

    #[test]
    fn patrol_detects_player_in_range_and_sight() {
        let maze = corridor();
        let player = Player::new(Pos { y: 1, x: 2 }, 0);
        let mut stalkers = vec![stalker_at(Pos { y: 1, x: 5 })];
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut log = Vec::new();
        update_stalkers(&mut stalkers, &world(&maze, &player), &mut rng, &mut log);
        assert_eq!(stalkers[0].mode, StalkerMode::Pursue);
        assert_eq!(stalkers[0].last_known, Some(player.pos));
        assert_eq!(
            log,
            vec![LogEvent::StalkerModeChanged {
                stalker: 0,
                from: StalkerMode::Patrol,
                to: StalkerMode::Pursue
            }]
        );
    }

    #[test]
    fn walls_hide_the_player_from_detection() {
        let maze = Maze::from_rows(&[
            "#########", //
            "#S..#...#",
            "#.......#",
            "#......E#",
            "#########",
        ])
        .expect("fixture");
        let player = Player::new(Pos { y: 1, x: 3 }, 0);
        let stalker = stalker_at(Pos { y: 1, x: 5 });
        assert!(!can_detect(&stalker, &world(&maze, &player)));
    }

    #[test]
    fn hiding_player_is_not_detected() {
        let maze = corridor();
        let mut player = Player::new(Pos { y: 1, x: 2 }, 0);
        player.hiding = true;
        let stalker = stalker_at(Pos { y: 1, x: 4 });
        assert!(!can_detect(&stalker, &world(&maze, &player)));
    }

    #[test]
    fn last_known_freezes_while_hiding() {
        let maze = corridor();
        let mut player = Player::new(Pos { y: 1, x: 3 }, 0);
        let mut stalker = stalker_at(Pos { y: 1, x: 6 });
        stalker.mode = StalkerMode::Pursue;
        stalker.last_known = Some(Pos { y: 1, x: 2 });
        player.hiding = true;
        player.hide_ticks = 1;
        perceive(&mut stalker, &world(&maze, &player));
        assert_eq!(stalker.mode, StalkerMode::Pursue);
        assert_eq!(stalker.last_known, Some(Pos { y: 1, x: 2 }));

        player.hiding = false;
        perceive(&mut stalker, &world(&maze, &player));
        assert_eq!(stalker.last_known, Some(player.pos));
    }

    #[test]
    fn silent_step_breaks_pursuit() {
        let maze = corridor();
        let mut player = Player::new(Pos { y: 1, x: 3 }, 0);
        player.hiding = true;
        player.silent_step_ticks = 2;
        let mut stalker = stalker_at(Pos { y: 1, x: 5 });
        stalker.mode = StalkerMode::Pursue;
        stalker.last_known = Some(player.pos);
        perceive(&mut stalker, &world(&maze, &player));
        assert_eq!(stalker.mode, StalkerMode::Lost);
    }

    #[test]
    fn long_hide_breaks_pursuit_without_silent_step() {
        let maze = corridor();
        let mut player = Player::new(Pos { y: 1, x: 3 }, 0);
        player.hiding = true;
        let escape_ticks = test_config().hide_policy.escape_ticks;
        player.hide_ticks = escape_ticks - 1;
        let mut stalker = stalker_at(Pos { y: 1, x: 5 });
        stalker.mode = StalkerMode::Pursue;
        perceive(&mut stalker, &world(&maze, &player));
        assert_eq!(stalker.mode, StalkerMode::Pursue);
        player.hide_ticks = escape_ticks;
        perceive(&mut stalker, &world(&maze, &player));
        assert_eq!(stalker.mode, StalkerMode::Lost);
    }

    #[test]
    fn lost_returns_to_patrol_after_grace() {
        let maze = corridor();
        let mut player = Player::new(Pos { y: 1, x: 1 }, 0);
        player.hiding = true;
        let mut stalker = stalker_at(Pos { y: 1, x: 8 });
        stalker.mode = StalkerMode::Lost;
        stalker.last_known = Some(Pos { y: 1, x: 4 });
        for _ in 1..stalker.profile.lost_grace_ticks {
            perceive(&mut stalker, &world(&maze, &player));
            assert_eq!(stalker.mode, StalkerMode::Lost);
        }
        perceive(&mut stalker, &world(&maze, &player));
        assert_eq!(stalker.mode, StalkerMode::Patrol);
        assert_eq!(stalker.last_known, None);
    }

    #[test]
    fn stalker_moves_once_per_speed_interval() {
        let maze = corridor();
        let player = Player::new(Pos { y: 1, x: 2 }, 0);
        let mut stalker = stalker_at(Pos { y: 1, x: 6 });
        stalker.profile.ticks_per_move = 3;
        stalker.mode = StalkerMode::Pursue;
        stalker.last_known = Some(player.pos);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let w = world(&maze, &player);
        move_stalker(&mut stalker, &w, &mut rng);
        move_stalker(&mut stalker, &w, &mut rng);
        assert_eq!(stalker.pos, Pos { y: 1, x: 6 });
        move_stalker(&mut stalker, &w, &mut rng);
        assert_eq!(stalker.pos, Pos { y: 1, x: 5 });
        assert_eq!(stalker.heading, Some(Direction::Left));
    }

    #[test]
    fn patrol_avoids_doubling_back_in_corridors() {
        let maze = corridor();
        let player = Player::new(Pos { y: 1, x: 1 }, 0);
        let mut stalker = stalker_at(Pos { y: 1, x: 5 });
        stalker.profile.aggression = 0;
        stalker.heading = Some(Direction::Right);
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let w = world(&maze, &player);
        for expected_x in 6..=9 {
            move_stalker(&mut stalker, &w, &mut rng);
            assert_eq!(stalker.pos, Pos { y: 1, x: expected_x });
        }
        // Dead end at (1,9) except the exit below; it keeps going.
        move_stalker(&mut stalker, &w, &mut rng);
        assert_eq!(stalker.pos, Pos { y: 2, x: 9 });
        // Exit is a dead end: the only option is back.
        move_stalker(&mut stalker, &w, &mut rng);
        assert_eq!(stalker.pos, Pos { y: 1, x: 9 });
    }

    #[test]
    fn full_aggression_homes_in_while_patrolling() {
        let maze = corridor();
        let player = Player::new(Pos { y: 1, x: 1 }, 0);
        let mut stalker = stalker_at(Pos { y: 1, x: 8 });
        stalker.profile.aggression = 100;
        stalker.heading = Some(Direction::Right);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        move_stalker(&mut stalker, &world(&maze, &player), &mut rng);
        assert_eq!(stalker.pos, Pos { y: 1, x: 7 });
    }
}
