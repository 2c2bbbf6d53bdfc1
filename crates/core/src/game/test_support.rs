//! Shared fixtures for the `game` test suites.

use super::*;

/// Small, fast tier with predictable knobs.
pub(crate) fn test_config() -> LevelConfig {
    LevelConfig {
        width: 15,
        height: 15,
        stalkers: vec![test_profile()],
        vision_radius: 5,
        trap_density_pct: 0,
        loop_pct: 0,
        bomb_pickups: 0,
        starting_bombs: 0,
        bombs_enabled: true,
        dash_enabled: true,
        dash_distance: 3,
        dash_cooldown_ticks: 5,
        trap_collapse_ticks: 3,
        bomb_policy: BombPolicy { targets: BombTargets::WallsAndTraps, range: 1 },
        hide_policy: HidePolicy {
            movement: HideMovement::Frozen,
            silent_step_ticks: 3,
            escape_ticks: 6,
        },
        target_time_ms: 30_000,
    }
}

pub(crate) fn test_profile() -> StalkerProfile {
    StalkerProfile { ticks_per_move: 1, detection_radius: 5, aggression: 0, lost_grace_ticks: 4 }
}

pub(crate) fn stalker_at(pos: Pos) -> Stalker {
    Stalker::new(pos, test_profile())
}

pub(crate) fn open_room_fixture() -> (Maze, Pos) {
    let mut rows = vec!["#############".to_string()];
    for y in 1..10 {
        let mut row = String::from("#");
        for x in 1..12 {
            row.push(match (y, x) {
                (1, 1) => 'S',
                (9, 11) => 'E',
                _ => '.',
            });
        }
        row.push('#');
        rows.push(row);
    }
    rows.push("#############".to_string());
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    (Maze::from_rows(&refs).expect("open room"), Pos { y: 5, x: 6 })
}

/// Corridor along row 5 with a single wall three cells right of the origin.
pub(crate) fn wall_occlusion_fixture() -> (Maze, Pos) {
    let maze = Maze::from_rows(&[
        "#############",
        "#############",
        "#############",
        "#############",
        "#############",
        "#S...#.....E#",
        "#############",
        "#############",
        "#############",
        "#############",
        "#############",
    ])
    .expect("occlusion corridor");
    (maze, Pos { y: 5, x: 2 })
}

pub(crate) fn generated_maze_fixture(level: usize, seed: u64) -> (Maze, LevelConfig) {
    let levels = LevelTable::standard();
    let config = levels.get(level).clone();
    let maze = MazeGenerator::new(&config, level).generate(seed).expect("generated maze");
    (maze, config)
}

/// Game over an ASCII layout using `test_config`, with one stalker per `G`.
pub(crate) fn game_from_rows(rows: &[&str]) -> Game {
    game_with_config(rows, test_config())
}

pub(crate) fn game_with_config(rows: &[&str], mut config: LevelConfig) -> Game {
    let maze = Maze::from_rows(rows).expect("fixture layout");
    config.width = maze.width;
    config.height = maze.height;
    config.stalkers = vec![test_profile(); maze.stalker_spawns.len()];
    Game::from_maze(config, 0, maze, 7)
}

/// Ticks until the game ends or `limit` ticks pass; returns ticks simulated.
pub(crate) fn run_ticks(game: &mut Game, limit: u32) -> u32 {
    let mut ran = 0;
    while ran < limit && game.tick() {
        ran += 1;
    }
    ran
}
