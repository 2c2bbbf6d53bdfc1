//! End-to-end runs over hand-built layouts using only the public API.

use stalker_core::{
    CellKind, Direction, Game, Intent, LevelConfig, LevelTable, LogEvent, Maze, Pos, RunOutcome,
    TrapPhase,
};

fn level_zero() -> LevelConfig {
    LevelTable::standard().levels[0].clone()
}

fn game(rows: &[&str], config: LevelConfig) -> Game {
    let maze = Maze::from_rows(rows).expect("layout");
    Game::from_maze(config, 0, maze, 11)
}

#[test]
fn ten_moves_along_an_open_corridor() {
    let mut game = game(
        &[
            "################",
            "#S............E#",
            "################",
            "################",
            "################",
            "################",
            "################",
            "################",
            "#G...###########",
            "################",
        ],
        level_zero(),
    );
    let exit = game.state().maze.exit;
    for step in 1..=10 {
        let before = exit.x - game.state().player.pos.x;
        game.submit(Intent::Move(Direction::Right));
        assert!(game.tick());
        let after = exit.x - game.state().player.pos.x;
        assert_eq!(after, before - 1, "move {step} should close one cell");
        assert_eq!(game.state().dash_cooldown(), 0);
    }
    assert_eq!(game.state().player.pos, Pos { y: 1, x: 11 });
    assert!(!game.state().is_terminal());
    assert!(game.state().stalkers[0].pos.y >= 8, "pocketed stalker stays put");
}

#[test]
fn trap_collapses_after_its_countdown_and_rejects_reentry() {
    let mut game = game(&["#########", "#S^....E#", "#########"], level_zero());
    let trap = Pos { y: 1, x: 2 };
    let countdown = game.config().trap_collapse_ticks;

    game.submit(Intent::Move(Direction::Right));
    game.tick();
    assert!(game.state().maze.cell(trap).is_some_and(|cell| cell.crumbling()));

    game.submit(Intent::Move(Direction::Right));
    game.tick();
    for _ in 1..countdown {
        assert!(game.state().maze.cell(trap).is_some_and(|cell| cell.crumbling()));
        game.tick();
    }
    assert_eq!(game.state().maze.trap_phase(trap), TrapPhase::Collapsed);
    assert_eq!(game.state().maze.kind_at(trap), CellKind::Trap);

    game.submit(Intent::Move(Direction::Left));
    game.tick();
    assert_eq!(game.state().player.pos, Pos { y: 1, x: 3 });
    assert!(game.log().contains(&LogEvent::TrapCollapsed { pos: trap }));
}

#[test]
fn stalker_three_cells_away_catches_a_stationary_player() {
    let mut config = level_zero();
    config.stalkers[0].detection_radius = 5;
    let mut game = game(&["##########", "#S..G...E#", "##########"], config);
    assert_eq!(game.state().stalker_distance, 3.0);

    let mut ticks = 0;
    while game.tick() {
        ticks += 1;
        assert!(ticks < 100, "stalker never arrived");
    }
    let state = game.state();
    assert_eq!(state.outcome(), Some(RunOutcome::Caught));
    assert_eq!(state.stalkers[0].pos, state.player.pos);
}

#[test]
fn reaching_the_exit_freezes_the_run() {
    let mut config = level_zero();
    config.starting_bombs = 2;
    let mut game = game(&["#######", "#S...E#", "#######"], config);

    game.submit(Intent::Dash(Direction::Right));
    game.tick();
    game.submit(Intent::Move(Direction::Right));
    game.tick();
    assert!(game.state().is_victory);

    let frozen = game.snapshot();
    assert!(frozen.dash_cooldown() > 0);
    for intent in [Intent::Bomb(Direction::Up), Intent::Dash(Direction::Left), Intent::HideStart] {
        game.submit(intent);
        assert!(!game.tick());
    }
    let result = game.advance(5_000);
    assert_eq!(result.simulated_ticks, 0);
    let state = game.state();
    assert!(state.is_victory);
    assert_eq!(state.bombs(), frozen.bombs());
    assert_eq!(state.dash_cooldown(), frozen.dash_cooldown());
    assert_eq!(state.elapsed_ms(), frozen.elapsed_ms());
    assert_eq!(state, &frozen);
}
