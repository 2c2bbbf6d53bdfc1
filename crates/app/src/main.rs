mod frame_input;
mod ui_render;

use std::fs;
use std::path::PathBuf;

use app::app_loop::AppState;
use app::audio_session::{AudioSession, LogSink};
use app::best_times_file::BestTimesFile;
use app::seed::{SeedChoice, resolve_launch_from_args};
use app::{format_seed, format_snapshot_hash, reason_code};
use frame_input::capture_frame_input;
use macroquad::prelude::*;
use stalker_core::mapgen::runtime_seed;
use stalker_core::{Game, InputJournal, LevelTable};

fn window_conf() -> Conf {
    Conf {
        window_title: "Maze Stalker".to_owned(),
        window_width: 1280,
        window_height: 720,
        high_dpi: true,
        ..Default::default()
    }
}

fn journal_path(best_times_path: Option<&PathBuf>) -> Option<PathBuf> {
    best_times_path.and_then(|path| path.parent()).map(|dir| dir.join("last_journal.json"))
}

fn save_journal(path: Option<&PathBuf>, journal: &InputJournal) {
    let Some(path) = path else {
        return;
    };
    let result = journal.to_json().map_err(std::io::Error::other).and_then(|json| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)
    });
    if let Err(err) = result {
        log::warn!("could not save journal to {}: {err}", path.display());
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let launch = match resolve_launch_from_args(&args, runtime_seed()) {
        Ok(launch) => launch,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };
    if let SeedChoice::Generated(seed) = launch.seed {
        log::info!("no --seed given, using {}", format_seed(seed));
    }

    let mut game = match Game::new(LevelTable::standard(), launch.level, launch.seed.value()) {
        Ok(game) => game,
        Err(err) => {
            eprintln!("could not build level: {err}");
            std::process::exit(1);
        }
    };

    let best_times_path = BestTimesFile::get_default_path();
    let best_times =
        best_times_path.as_deref().map(BestTimesFile::load_or_default).unwrap_or_default();
    let last_journal_path = journal_path(best_times_path.as_ref());
    let mut app = AppState::new(&game, best_times);
    let mut audio = AudioSession::new(LogSink);
    audio.start();

    loop {
        let keys = capture_frame_input();
        if keys.pressed.contains(&KeyCode::Escape) {
            break;
        }
        if keys.pressed.contains(&KeyCode::M) {
            if audio.is_running() {
                audio.stop();
            } else {
                audio.start();
            }
        }

        let elapsed_ms = (get_frame_time() * 1_000.0).round() as u64;
        if let Err(err) = app.tick(&mut game, &keys, elapsed_ms) {
            log::error!("level generation failed: {err}");
            break;
        }

        audio.consume_log(game.log());
        audio.update_tension(game.state().tension);
        audio.advance(elapsed_ms);

        if app.best_times_changed
            && let Some(path) = &best_times_path
            && let Err(err) = app.best_times.write_atomic(path)
        {
            log::warn!("could not save best times to {}: {err}", path.display());
        }
        if let Some(journal) = &app.finished_journal {
            if let Some(outcome) = game.state().outcome() {
                log::info!(
                    "{} at tick {} hash {}",
                    reason_code(&outcome),
                    game.current_tick(),
                    format_snapshot_hash(game.snapshot_hash())
                );
            }
            save_journal(last_journal_path.as_ref(), journal);
        }

        clear_background(BLACK);
        ui_render::draw_frame(&game, &app);
        next_frame().await
    }

    audio.stop();
}
