use anyhow::{Context, Result};
use clap::Parser;
use stalker_core::{InputJournal, LevelTable, ReplayResult, replay_to_end};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: String,

    /// TOML level table to use instead of the built-in tiers
    #[arg(short, long)]
    levels: Option<String>,

    /// Stop after this many ticks if the level has not ended
    #[arg(short, long, default_value_t = 36_000)]
    max_ticks: u64,
}

fn load_levels(path: Option<&str>) -> Result<LevelTable> {
    let Some(path) = path else {
        return Ok(LevelTable::standard());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read level table: {path}"))?;
    let levels: LevelTable =
        toml::from_str(&raw).with_context(|| format!("Failed to parse level table: {path}"))?;
    levels.validate().with_context(|| format!("Invalid level table: {path}"))?;
    Ok(levels)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal))?;
    let journal = InputJournal::from_json(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;
    let levels = load_levels(args.levels.as_deref())?;
    log::debug!(
        "replaying {} inputs on level {} (seed {}, generation {})",
        journal.inputs.len(),
        journal.level + 1,
        journal.seed,
        journal.generation
    );

    let result: ReplayResult =
        replay_to_end(&levels, &journal, args.max_ticks).context("Replay failed")?;

    println!("Replay complete.");
    println!("Final Tick: {}", result.final_tick);
    match result.outcome {
        Some(outcome) => println!("Outcome: {outcome:?}"),
        None => println!("Outcome: unfinished after {} ticks", args.max_ticks),
    }
    println!("Snapshot Hash: 0x{:016x}", result.final_snapshot_hash);

    Ok(())
}
