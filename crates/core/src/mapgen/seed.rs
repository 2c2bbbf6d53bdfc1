//! Deterministic seed mixing and random-stream helpers for maze generation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

pub(crate) fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

/// Seed for one generation of a level within a run. `generation` counts
/// restarts and level advances so a retried level gets a fresh layout.
pub fn derive_level_seed(run_seed: u64, level: usize, generation: u64) -> u64 {
    let mut mixed = run_seed ^ 0x9E37_79B9_7F4A_7C15;
    mixed ^= (level as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    mixed ^= generation.wrapping_mul(0x94D0_49BB_1331_11EB);
    splitmix(mixed)
}

static RUNTIME_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Non-deterministic seed from wall-clock time, process id and a call counter.
pub fn runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(std::process::id());
    let counter = RUNTIME_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    splitmix(entropy)
}

fn splitmix(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

/// Uniform index in `0..bound`; `bound` must be non-zero.
pub(crate) fn roll_below(rng: &mut ChaCha8Rng, bound: usize) -> usize {
    debug_assert!(bound > 0);
    (rng.next_u64() % bound as u64) as usize
}

pub(crate) fn roll_percent(rng: &mut ChaCha8Rng, percent: u8) -> bool {
    roll_below(rng, 100) < usize::from(percent)
}

pub(crate) fn shuffle<T>(rng: &mut ChaCha8Rng, items: &mut [T]) {
    for idx in (1..items.len()).rev() {
        let swap_with = roll_below(rng, idx + 1);
        items.swap(idx, swap_with);
    }
}
