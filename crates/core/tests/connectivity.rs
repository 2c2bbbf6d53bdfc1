use std::collections::VecDeque;

use stalker_core::mapgen::is_playable;
use stalker_core::{CellKind, Direction, LEVEL_COUNT, LevelTable, Maze, Pos, generate_maze};

const SEEDS_PER_LEVEL: u64 = 100;

/// Plain BFS over every non-wall cell; returns how many cells were reached
/// and whether `exit` was one of them.
fn flood(maze: &Maze) -> (usize, bool) {
    let mut seen = vec![false; maze.width * maze.height];
    let index = |pos: Pos| pos.y as usize * maze.width + pos.x as usize;
    let mut queue = VecDeque::from([maze.start]);
    seen[index(maze.start)] = true;
    let mut reached = 0;
    let mut found_exit = false;
    while let Some(pos) = queue.pop_front() {
        reached += 1;
        found_exit |= pos == maze.exit;
        for direction in Direction::PRIORITY {
            let next = pos.step(direction);
            if maze.in_bounds(next) && maze.kind_at(next) != CellKind::Wall && !seen[index(next)] {
                seen[index(next)] = true;
                queue.push_back(next);
            }
        }
    }
    (reached, found_exit)
}

#[test]
fn every_generated_level_has_a_reachable_exit() {
    let table = LevelTable::standard();
    for level in 0..LEVEL_COUNT {
        let config = table.get(level);
        for seed in 0..SEEDS_PER_LEVEL {
            let maze = generate_maze(config, level, Some(seed)).expect("maze");
            let open = maze.cells.iter().filter(|cell| cell.kind != CellKind::Wall).count();
            let (reached, found_exit) = flood(&maze);
            assert!(found_exit, "level {level} seed {seed}: exit unreachable");
            assert_eq!(reached, open, "level {level} seed {seed}: isolated pocket");
            assert!(is_playable(&maze, config), "level {level} seed {seed}");
        }
    }
}

#[test]
fn generated_levels_keep_their_outer_wall() {
    let table = LevelTable::standard();
    for level in 0..LEVEL_COUNT {
        let config = table.get(level);
        let maze = generate_maze(config, level, Some(level as u64 * 17)).expect("maze");
        assert_eq!((maze.width, maze.height), (config.width, config.height));
        for cell in &maze.cells {
            if maze.is_boundary(cell.pos) {
                assert_eq!(cell.kind, CellKind::Wall, "level {level} at {:?}", cell.pos);
            }
        }
        assert_eq!(maze.count_kind(CellKind::Start), 1);
        assert_eq!(maze.count_kind(CellKind::Exit), 1);
        assert_eq!(maze.stalker_spawns.len(), config.stalkers.len());
    }
}

#[test]
fn stalker_spawns_sit_on_open_floor_away_from_the_start() {
    let table = LevelTable::standard();
    for level in 0..LEVEL_COUNT {
        let config = table.get(level);
        for seed in 0..20 {
            let maze = generate_maze(config, level, Some(seed)).expect("maze");
            for (spawn, profile) in maze.stalker_spawns.iter().zip(&config.stalkers) {
                assert_eq!(maze.kind_at(*spawn), CellKind::Floor);
                let manhattan = (spawn.x - maze.start.x).abs() + (spawn.y - maze.start.y).abs();
                assert!(manhattan > profile.detection_radius as i32, "level {level} seed {seed}");
            }
        }
    }
}
