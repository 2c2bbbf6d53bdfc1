//! Stalker pursuit, scent loss and capture through the tick loop.

use super::support::*;

const OPEN_ROOM: &[&str] = &[
    "#########", //
    "#S......#",
    "#.......#",
    "#...G...#",
    "#......E#",
    "#########",
];

#[test]
fn stalker_in_range_catches_a_stationary_player() {
    let mut game = game_from_rows(&[
        "##########", //
        "#S..G...E#",
        "##########",
    ]);
    assert_eq!(game.state().stalker_distance, 3.0);
    run_ticks(&mut game, 20);
    let state = game.state();
    assert!(state.is_caught);
    assert!(!state.is_victory);
    assert_eq!(state.stalkers[0].pos, state.player.pos);
    assert_eq!(state.tension, 1.0);
    assert!(game.log().contains(&LogEvent::PlayerCaught { stalker: 0, tick: 3 }));
}

#[test]
fn walking_into_a_stalker_is_fatal() {
    let mut game = game_from_rows(&[
        "#######", //
        "#SG..E#",
        "#######",
    ]);
    game.submit(Intent::Move(Direction::Right));
    game.tick();
    assert!(game.state().is_caught);
    assert_eq!(game.current_tick(), 1);
}

#[test]
fn last_known_position_freezes_during_hide_and_resumes_after() {
    let mut config = test_config();
    config.hide_policy = HidePolicy {
        movement: HideMovement::Free,
        silent_step_ticks: 0,
        escape_ticks: 100,
    };
    let mut game = game_with_config(OPEN_ROOM, config);
    game.state.stalkers[0].profile.ticks_per_move = 50;

    game.tick();
    assert_eq!(game.state().stalkers[0].mode, StalkerMode::Pursue);
    assert_eq!(game.state().stalkers[0].last_known, Some(Pos { y: 1, x: 1 }));

    game.submit(Intent::Move(Direction::Right));
    game.tick();
    let hide_spot = Pos { y: 1, x: 2 };
    assert_eq!(game.state().stalkers[0].last_known, Some(hide_spot));

    game.submit(Intent::HideStart);
    game.tick();
    for _ in 0..2 {
        game.submit(Intent::Move(Direction::Right));
        game.tick();
        assert!(game.state().is_freeze());
        assert_eq!(game.state().stalkers[0].last_known, Some(hide_spot));
    }
    assert_eq!(game.state().player.pos, Pos { y: 1, x: 4 });

    game.submit(Intent::HideEnd);
    game.tick();
    assert_eq!(game.state().stalkers[0].last_known, Some(Pos { y: 1, x: 4 }));
}

#[test]
fn stalker_reacquires_within_a_tick_of_hide_ending_under_standard_hiding() {
    let mut config = test_config();
    config.hide_policy = LevelTable::standard().get(0).hide_policy;
    let mut game = game_with_config(OPEN_ROOM, config);
    game.state.stalkers[0].profile.ticks_per_move = 50;

    game.tick();
    assert_eq!(game.state().stalkers[0].mode, StalkerMode::Pursue);

    game.submit(Intent::HideStart);
    game.tick();
    for _ in 0..2 {
        game.tick();
        assert_eq!(game.state().stalkers[0].mode, StalkerMode::Lost);
        assert_eq!(game.state().stalkers[0].last_known, Some(Pos { y: 1, x: 1 }));
    }

    game.submit(Intent::HideEnd);
    game.submit(Intent::Move(Direction::Right));
    game.tick();
    let stalker = &game.state().stalkers[0];
    assert_eq!(game.state().player.pos, Pos { y: 1, x: 2 });
    assert_eq!(stalker.mode, StalkerMode::Pursue);
    assert_eq!(stalker.last_known, Some(Pos { y: 1, x: 2 }));
    assert!(game.log().contains(&LogEvent::StalkerModeChanged {
        stalker: 0,
        from: StalkerMode::Lost,
        to: StalkerMode::Pursue,
    }));
}

#[test]
fn silent_step_sends_a_pursuer_into_lost_mode() {
    let mut game = game_from_rows(OPEN_ROOM);
    game.state.stalkers[0].profile.ticks_per_move = 50;
    game.tick();
    assert_eq!(game.state().stalkers[0].mode, StalkerMode::Pursue);

    game.submit(Intent::HideStart);
    game.tick();
    assert_eq!(game.state().stalkers[0].mode, StalkerMode::Lost);
    assert!(game.log().contains(&LogEvent::StalkerModeChanged {
        stalker: 0,
        from: StalkerMode::Pursue,
        to: StalkerMode::Lost,
    }));
}

#[test]
fn hidden_player_is_not_caught_by_a_stalker_on_the_same_cell() {
    let mut game = game_from_rows(OPEN_ROOM);
    game.submit(Intent::HideStart);
    game.tick();
    let player_pos = game.state().player.pos;
    game.state.stalkers[0].pos = player_pos;
    game.state.stalkers[0].profile.ticks_per_move = 50;
    game.tick();
    assert!(!game.state().is_caught);

    game.submit(Intent::HideEnd);
    game.tick();
    assert!(game.state().is_caught);
}

#[test]
fn two_stalkers_track_independently() {
    let mut game = game_from_rows(&[
        "###########", //
        "#S..G#G...#",
        "#.........#",
        "#........E#",
        "###########",
    ]);
    for stalker in &mut game.state.stalkers {
        stalker.profile.ticks_per_move = 50;
    }
    game.tick();
    let modes: Vec<StalkerMode> = game.state().stalkers.iter().map(|s| s.mode).collect();
    assert_eq!(modes, vec![StalkerMode::Pursue, StalkerMode::Patrol]);
}

#[test]
fn stalker_distance_and_tension_update_each_tick() {
    let mut game = game_from_rows(&[
        "############", //
        "#S........GE#",
        "############",
    ]);
    game.state.stalkers[0].profile.ticks_per_move = 50;
    assert_eq!(game.state().stalker_distance, 9.0);
    assert!((game.state().tension - 0.1).abs() < 1e-6);
    game.submit(Intent::Move(Direction::Right));
    game.tick();
    assert_eq!(game.state().stalker_distance, 8.0);
    assert!((game.state().tension - 0.2).abs() < 1e-6);
}
