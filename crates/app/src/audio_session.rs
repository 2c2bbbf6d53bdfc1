//! Tension-driven music parameters and sound-cue scheduling.
//!
//! The session never synthesizes anything itself. It turns the engine's
//! tension signal and event log into [`MusicParams`] updates and timed
//! [`SoundCue`]s, and hands both to an injected [`AudioSink`].

use stalker_core::{LogEvent, StalkerMode};

const BASE_BASS_HZ: f32 = 55.0;
const PAD_MAJOR_HZ: f32 = 110.0;
const PAD_MINOR_HZ: f32 = 92.5;
const ARPEGGIO_BASE_MS: f32 = 400.0;
const ARPEGGIO_MIN_MS: f32 = 150.0;
const HEARTBEAT_BASE_MS: f32 = 800.0;
const HEARTBEAT_MIN_MS: f32 = 200.0;
const HEARTBEAT_THRESHOLD: f32 = 0.3;

const CALM_NOTES: [f32; 4] = [65.41, 73.42, 82.41, 87.31];
const TENSE_NOTES: [f32; 4] = [61.74, 69.30, 77.78, 92.50];
const DANGER_NOTES: [f32; 4] = [55.0, 58.27, 65.41, 69.30];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoteSet {
    Calm,
    Tense,
    Danger,
}

impl NoteSet {
    pub fn from_tension(tension: f32) -> Self {
        if tension < 0.3 {
            Self::Calm
        } else if tension < 0.7 {
            Self::Tense
        } else {
            Self::Danger
        }
    }

    pub fn notes(self) -> &'static [f32; 4] {
        match self {
            Self::Calm => &CALM_NOTES,
            Self::Tense => &TENSE_NOTES,
            Self::Danger => &DANGER_NOTES,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MusicParams {
    pub tension: f32,
    pub bass_hz: f32,
    pub pad_hz: f32,
    pub high_layer_gain: f32,
    pub arpeggio_period_ms: u64,
    pub note_set: NoteSet,
    /// `None` while tension is below the heartbeat threshold.
    pub heartbeat_period_ms: Option<u64>,
}

impl MusicParams {
    pub fn from_tension(tension: f32) -> Self {
        let t = if tension.is_nan() { 0.0 } else { tension.clamp(0.0, 1.0) };
        Self {
            tension: t,
            bass_hz: BASE_BASS_HZ - 15.0 * t,
            pad_hz: if t < 0.5 { PAD_MAJOR_HZ } else { PAD_MINOR_HZ },
            high_layer_gain: if t > 0.6 { (t - 0.6) * 0.15 } else { 0.0 },
            arpeggio_period_ms: (ARPEGGIO_BASE_MS - 200.0 * t).max(ARPEGGIO_MIN_MS) as u64,
            note_set: NoteSet::from_tension(t),
            heartbeat_period_ms: (t >= HEARTBEAT_THRESHOLD)
                .then(|| (HEARTBEAT_BASE_MS - 600.0 * t).max(HEARTBEAT_MIN_MS) as u64),
        }
    }

    /// Arpeggio notes jump an octave once tension passes the midpoint.
    pub fn arpeggio_hz(&self, step: usize) -> f32 {
        let notes = self.note_set.notes();
        let base = notes[step % notes.len()];
        if self.tension > 0.5 { base * 2.0 } else { base }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SoundCue {
    Heartbeat { volume: f32 },
    Arpeggio { hz: f32 },
    LevelStart,
    TrapTriggered,
    TrapCollapsed,
    Pickup,
    Explosion,
    Dash,
    Freeze,
    Unfreeze,
    StalkerGrowl,
    Victory,
    Caught,
}

impl SoundCue {
    /// One-shot cue for an engine event, if it has one.
    pub fn for_event(event: &LogEvent) -> Option<Self> {
        match event {
            LogEvent::LevelStarted { .. } => Some(Self::LevelStart),
            LogEvent::TrapTriggered { .. } => Some(Self::TrapTriggered),
            LogEvent::TrapCollapsed { .. } => Some(Self::TrapCollapsed),
            LogEvent::BombCollected { .. } => Some(Self::Pickup),
            LogEvent::BombDetonated { .. } => Some(Self::Explosion),
            LogEvent::Dashed { .. } => Some(Self::Dash),
            LogEvent::HideStarted => Some(Self::Freeze),
            LogEvent::HideEnded => Some(Self::Unfreeze),
            LogEvent::StalkerModeChanged { to: StalkerMode::Pursue, .. } => {
                Some(Self::StalkerGrowl)
            }
            LogEvent::StalkerModeChanged { .. } => None,
            LogEvent::ExitReached { .. } => Some(Self::Victory),
            LogEvent::PlayerCaught { .. } => Some(Self::Caught),
        }
    }
}

pub trait AudioSink {
    fn set_music(&mut self, params: &MusicParams);
    fn play(&mut self, cue: SoundCue);
    fn silence(&mut self);
}

/// Sink for headless runs and tests that only need the schedule.
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn set_music(&mut self, _params: &MusicParams) {}
    fn play(&mut self, _cue: SoundCue) {}
    fn silence(&mut self) {}
}

/// Writes the cue stream to the `log` facade at trace level.
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn set_music(&mut self, params: &MusicParams) {
        log::trace!("music {params:?}");
    }
    fn play(&mut self, cue: SoundCue) {
        log::trace!("cue {cue:?}");
    }
    fn silence(&mut self) {
        log::trace!("audio silenced");
    }
}

pub struct AudioSession<S: AudioSink> {
    sink: S,
    running: bool,
    params: MusicParams,
    arpeggio_elapsed_ms: u64,
    arpeggio_step: usize,
    heartbeat_elapsed_ms: u64,
    log_cursor: usize,
}

impl<S: AudioSink> AudioSession<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            running: false,
            params: MusicParams::from_tension(0.0),
            arpeggio_elapsed_ms: 0,
            arpeggio_step: 0,
            heartbeat_elapsed_ms: 0,
            log_cursor: 0,
        }
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.arpeggio_elapsed_ms = 0;
        self.heartbeat_elapsed_ms = 0;
        self.arpeggio_step = 0;
        self.sink.set_music(&self.params);
        self.play_arpeggio_note();
    }

    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.params = MusicParams::from_tension(0.0);
        self.sink.silence();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn params(&self) -> &MusicParams {
        &self.params
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn update_tension(&mut self, tension: f32) {
        let next = MusicParams::from_tension(tension);
        if next == self.params {
            return;
        }
        if next.heartbeat_period_ms.is_none() {
            self.heartbeat_elapsed_ms = 0;
        }
        self.params = next;
        if self.running {
            self.sink.set_music(&self.params);
        }
    }

    /// Emits every arpeggio note and heartbeat that falls due in `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if !self.running {
            return;
        }
        self.arpeggio_elapsed_ms += elapsed_ms;
        while self.arpeggio_elapsed_ms >= self.params.arpeggio_period_ms {
            self.arpeggio_elapsed_ms -= self.params.arpeggio_period_ms;
            self.play_arpeggio_note();
        }

        let Some(period) = self.params.heartbeat_period_ms else {
            return;
        };
        self.heartbeat_elapsed_ms += elapsed_ms;
        while self.heartbeat_elapsed_ms >= period {
            self.heartbeat_elapsed_ms -= period;
            let volume = (self.params.tension * 0.2).min(0.15);
            self.sink.play(SoundCue::Heartbeat { volume });
        }
    }

    /// Plays cues for log entries not seen yet. The log is append-only, so a
    /// cursor into it is enough.
    pub fn consume_log(&mut self, log: &[LogEvent]) {
        let fresh = log.get(self.log_cursor..).unwrap_or_default();
        if self.running {
            for cue in fresh.iter().filter_map(SoundCue::for_event) {
                self.sink.play(cue);
            }
        }
        self.log_cursor = log.len();
    }

    fn play_arpeggio_note(&mut self) {
        let hz = self.params.arpeggio_hz(self.arpeggio_step);
        self.arpeggio_step = self.arpeggio_step.wrapping_add(1);
        self.sink.play(SoundCue::Arpeggio { hz });
    }
}
