use anyhow::{Result, bail};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use stalker_core::{
    AdvanceStopReason, CellKind, Direction, Game, GameState, Intent, LEVEL_COUNT, LevelTable,
    LogEvent, TICK_MS,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    ticks: u32,
    /// Number of consecutive seeds to run, each on every level
    #[arg(short, long, default_value_t = 1)]
    runs: u64,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_intent(rng: &mut ChaCha8Rng) -> Intent {
    let direction = choose(rng, &Direction::PRIORITY);
    choose(
        rng,
        &[
            Intent::Move(direction),
            Intent::Move(direction),
            Intent::Move(direction),
            Intent::Dash(direction),
            Intent::Bomb(direction),
            Intent::HideStart,
            Intent::HideEnd,
        ],
    )
}

fn check_invariants(state: &GameState, previous_bombs: u8, bombs_found: bool) -> Result<()> {
    let maze = &state.maze;
    if !maze.is_walkable(state.player.pos) && !state.is_terminal() {
        bail!("player stands on a blocked cell at {:?}", state.player.pos);
    }
    if maze.kind_at(state.player.pos) == CellKind::Wall {
        bail!("player inside a wall at {:?}", state.player.pos);
    }
    for (index, stalker) in state.stalkers.iter().enumerate() {
        if maze.kind_at(stalker.pos) == CellKind::Wall {
            bail!("stalker {index} inside a wall at {:?}", stalker.pos);
        }
    }
    if state.player.bombs > previous_bombs && !bombs_found {
        bail!("bomb count rose from {previous_bombs} without a pickup");
    }
    if state.is_victory && state.player.pos != maze.exit {
        bail!("victory away from the exit");
    }
    if !(0.0..=1.0).contains(&state.tension) {
        bail!("tension {} out of range", state.tension);
    }
    for alpha in &state.visibility.alpha {
        if !(0.0..=1.0).contains(alpha) {
            bail!("visibility alpha {alpha} out of range");
        }
    }
    Ok(())
}

fn fuzz_level(level: usize, seed: u64, ticks: u32) -> Result<()> {
    let mut game = Game::new(LevelTable::standard(), level, seed)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed ^ level as u64);

    let mut total_steps = 0;
    while total_steps < ticks {
        if rng.next_u64() % 2 == 0 {
            game.submit(random_intent(&mut rng));
        }
        let bombs_before = game.state().player.bombs;
        let log_len = game.log().len();
        let result = game.advance(TICK_MS);
        total_steps += result.simulated_ticks;

        let bombs_found = game.log()[log_len..]
            .iter()
            .any(|event| matches!(event, LogEvent::BombCollected { .. }));
        check_invariants(game.state(), bombs_before, bombs_found)
            .map_err(|err| err.context(format!("level {} seed {seed}", level + 1)))?;

        if let AdvanceStopReason::Finished(outcome) = result.stop_reason {
            log::info!("level {} seed {seed}: {outcome:?} after {total_steps} ticks", level + 1);
            return Ok(());
        }
    }
    log::info!("level {} seed {seed}: still running after {total_steps} ticks", level + 1);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!(
        "Starting fuzz harness on seeds {}..{} for max {} ticks per level...",
        args.seed,
        args.seed + args.runs,
        args.ticks
    );
    for seed in args.seed..args.seed + args.runs {
        for level in 0..LEVEL_COUNT {
            fuzz_level(level, seed, args.ticks)?;
        }
    }
    println!("Fuzzing completed successfully without invariant violations.");
    Ok(())
}
