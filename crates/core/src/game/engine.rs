//! Simulation engine composition: intent queueing and per-tick advancement.

use super::*;

mod advance;
mod intent;

pub use advance::MAX_CATCH_UP_TICKS;
pub(super) use intent::PendingIntents;

#[cfg(test)]
mod tests;
