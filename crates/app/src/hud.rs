//! Text model for the heads-up display and the end-of-level screen.

use stalker_core::{DangerBand, GamePhase, GameState, LEVEL_COUNT};

/// `mm:ss`, as shown while the level is running.
pub fn format_clock(ms: u64) -> String {
    let total_seconds = ms / 1_000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// `mm:ss.cc`, as shown on the end-of-level screen.
pub fn format_precise(ms: u64) -> String {
    let centis = (ms % 1_000) / 10;
    format!("{}.{centis:02}", format_clock(ms))
}

pub fn danger_label(band: DangerBand) -> &'static str {
    match band {
        DangerBand::Calm => "CALM",
        DangerBand::Tense => "TENSE",
        DangerBand::Panic => "PANIC",
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HudModel {
    /// 1-based for display.
    pub level: usize,
    pub clock: String,
    pub danger: DangerBand,
    pub danger_fill: f32,
    pub bombs: u8,
    pub dash: String,
    pub hiding: bool,
    pub silent_step: bool,
}

impl HudModel {
    pub fn from_state(state: &GameState) -> Self {
        let dash = match state.dash_cooldown() {
            0 => "READY".to_string(),
            ticks => ticks.to_string(),
        };
        Self {
            level: state.level + 1,
            clock: format_clock(state.elapsed_ms()),
            danger: DangerBand::from_tension(state.tension),
            danger_fill: state.tension.clamp(0.0, 1.0),
            bombs: state.bombs(),
            dash,
            hiding: state.is_freeze(),
            silent_step: state.silent_step(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("LEVEL {}", self.level),
            format!("TIME {}", self.clock),
            format!("DANGER {}", danger_label(self.danger)),
            format!("BOMBS {}", self.bombs),
            format!("DASH {}", self.dash),
        ];
        if self.hiding {
            lines.push("HIDING...".to_string());
        }
        if self.silent_step {
            lines.push("SILENT STEP!".to_string());
        }
        lines
    }
}

/// Lines for the overlay shown once the level has ended.
pub fn finished_lines(state: &GameState, best_ms: Option<u64>, new_best: bool) -> Vec<String> {
    let elapsed = format_precise(state.elapsed_ms());
    match state.phase() {
        GamePhase::Running => Vec::new(),
        GamePhase::Victory => {
            let mut lines = vec![format!("LEVEL {} COMPLETE", state.level + 1), elapsed];
            if new_best {
                lines.push("NEW BEST TIME!".to_string());
            } else if let Some(best) = best_ms {
                lines.push(format!("Best: {}", format_precise(best)));
            }
            if state.level + 1 < LEVEL_COUNT {
                lines.push("[N] next level".to_string());
            }
            lines.push("[R] try again".to_string());
            lines
        }
        GamePhase::Caught => vec![
            "CAUGHT!".to_string(),
            format!("Survived: {elapsed}"),
            "[R] try again".to_string(),
        ],
    }
}
