//! Sound cue dispatch
//!
//! The simulation only names cues; this module maps them onto loaded sound
//! handles and hands them to whatever audio device the shell provides.

use serde::{Deserialize, Serialize};

use crate::assets::{AssetTable, SoundBank, SoundHandle};
use crate::settings::Settings;

/// Sound cues emitted by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// A run begins
    Start,
    /// Flare fired from the sun
    Flare,
    /// Asteroid or flare blew up (one of three impact sounds)
    Explosion { variant: usize },
    /// Earth destroyed by an asteroid
    ScorchedByAsteroid,
    /// Earth destroyed by the player's own flare
    ScorchedByFlare,
    /// End zoom finished
    End,
}

/// Number of interchangeable impact sounds
pub const EXPLOSION_VARIANTS: usize = 3;

/// The audio device: fire-and-forget playback
pub trait AudioSink {
    fn play(&mut self, sound: SoundHandle, volume: f32);
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    bank: SoundBank,
    /// Load-time volume per sound handle
    levels: Vec<f32>,
    /// Settings volume applied on top of every sound
    volume: f32,
}

impl AudioManager {
    /// Create a manager; `sink` is `None` when no audio device could be opened
    pub fn new(bank: SoundBank, table: &AssetTable, sink: Option<Box<dyn AudioSink>>) -> Self {
        if sink.is_none() {
            log::warn!("No audio device - audio disabled");
        }
        let levels = (0..table.sound_count())
            .map(|i| table.sound_volume(SoundHandle(i as u32)).unwrap_or(1.0))
            .collect();
        Self {
            sink,
            bank,
            levels,
            volume: Settings::default().effective_volume(),
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    pub fn is_available(&self) -> bool {
        self.sink.is_some()
    }

    /// Sound handle backing a cue
    pub fn handle_for(&self, cue: SoundCue) -> SoundHandle {
        match cue {
            SoundCue::Start => self.bank.start,
            SoundCue::Flare => self.bank.flare,
            SoundCue::Explosion { variant } => self.bank.explosions[variant % EXPLOSION_VARIANTS],
            SoundCue::ScorchedByAsteroid => self.bank.scorched_asteroid,
            SoundCue::ScorchedByFlare => self.bank.scorched_flare,
            SoundCue::End => self.bank.end,
        }
    }

    /// Final playback volume for a cue: its load volume scaled by the settings
    pub fn volume_for(&self, cue: SoundCue) -> f32 {
        let handle = self.handle_for(cue);
        let level = self.levels.get(handle.0 as usize).copied().unwrap_or(1.0);
        level * self.volume
    }

    /// Play a cue; a no-op without a device or when muted
    pub fn play(&mut self, cue: SoundCue) {
        let volume = self.volume_for(cue);
        if volume <= 0.0 {
            return;
        }
        let handle = self.handle_for(cue);
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        sink.play(handle, volume);
    }
}
