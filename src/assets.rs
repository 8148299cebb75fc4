//! Asset handle registry
//!
//! Decoding image and sound files is the presentation shell's job. The core only
//! needs stable handles plus each texture's fixed dimensions, which drive
//! collision radii and out-of-bounds tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque reference to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

/// Opaque reference to a loaded sound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SoundHandle(pub u32);

/// A texture handle together with its decoded dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture {
    pub handle: TextureHandle,
    pub size: Vec2,
}

/// Registry of everything the shell has loaded, indexed by handle
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    /// Decoded size per texture handle
    textures: Vec<Vec2>,
    /// Playback volume per sound handle
    sounds: Vec<f32>,
}

impl AssetTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoded texture and return its handle
    pub fn load_texture(&mut self, path: &str, width: u32, height: u32) -> Texture {
        let size = Vec2::new(width as f32, height as f32);
        self.textures.push(size);
        let handle = TextureHandle((self.textures.len() - 1) as u32);
        log::debug!("Loaded texture {} as {:?} ({}x{})", path, handle, width, height);
        Texture { handle, size }
    }

    /// Register a sound with its playback volume (0.0 - 1.0)
    pub fn load_sound(&mut self, path: &str, volume: f32) -> SoundHandle {
        self.sounds.push(volume.clamp(0.0, 1.0));
        let handle = SoundHandle((self.sounds.len() - 1) as u32);
        log::debug!("Loaded sound {} as {:?} (volume {:.2})", path, handle, volume);
        handle
    }

    /// Volume the sound was loaded with
    pub fn sound_volume(&self, handle: SoundHandle) -> Option<f32> {
        self.sounds.get(handle.0 as usize).copied()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn sound_count(&self) -> usize {
        self.sounds.len()
    }
}

/// Texture manifest: (path, fallback width, fallback height)
pub const SUN_TEXTURE: (&str, u32, u32) = ("assets/sun.png", 180, 180);
pub const EARTH_TEXTURE: (&str, u32, u32) = ("assets/earthwithclouds.png", 64, 64);
pub const FLARE_TEXTURE: (&str, u32, u32) = ("assets/flare.png", 24, 48);
pub const ASTEROID_TEXTURE: (&str, u32, u32) = ("assets/icyasteroid.png", 60, 60);
pub const SCORCHED_TEXTURE: (&str, u32, u32) = ("assets/scorchedearth.png", 64, 64);
pub const EXPLOSION_TEXTURE: (&str, u32, u32) = ("assets/explosion.png", 64, 64);

/// Sound manifest: (path, volume)
pub const START_SOUND: (&str, f32) = ("assets/start_1.wav", 1.0);
pub const EXPLOSION_SOUNDS: [(&str, f32); 3] = [
    ("assets/explosion_1.wav", 0.8),
    ("assets/explosion_2.wav", 0.8),
    ("assets/explosion_3.wav", 0.8),
];
pub const FLARE_SOUND: (&str, f32) = ("assets/flare.wav", 0.8);
pub const SCORCHED_ASTEROID_SOUND: (&str, f32) = ("assets/scorched_asteroid.wav", 0.8);
pub const SCORCHED_FLARE_SOUND: (&str, f32) = ("assets/scorched_flare.wav", 0.8);
pub const END_SOUND: (&str, f32) = ("assets/end_3.wav", 1.0);

/// Sound handles for every cue the simulation can emit
#[derive(Debug, Clone, Copy)]
pub struct SoundBank {
    pub start: SoundHandle,
    pub explosions: [SoundHandle; 3],
    pub flare: SoundHandle,
    pub scorched_asteroid: SoundHandle,
    pub scorched_flare: SoundHandle,
    pub end: SoundHandle,
}

/// The fixed set of assets the game uses
#[derive(Debug, Clone, Copy)]
pub struct GameAssets {
    pub sun: Texture,
    pub earth: Texture,
    pub flare: Texture,
    pub asteroid: Texture,
    pub scorched: Texture,
    pub explosion: Texture,
    pub sounds: SoundBank,
}

impl GameAssets {
    /// Load the manifest, asking `measure` for each decoded texture's dimensions
    pub fn load<F>(table: &mut AssetTable, mut measure: F) -> Self
    where
        F: FnMut(&str) -> (u32, u32),
    {
        let mut texture = |(path, _, _): (&str, u32, u32)| {
            let (w, h) = measure(path);
            table.load_texture(path, w, h)
        };
        let sun = texture(SUN_TEXTURE);
        let earth = texture(EARTH_TEXTURE);
        let flare = texture(FLARE_TEXTURE);
        let asteroid = texture(ASTEROID_TEXTURE);
        let scorched = texture(SCORCHED_TEXTURE);
        let explosion = texture(EXPLOSION_TEXTURE);

        let [e1, e2, e3] = EXPLOSION_SOUNDS;
        let sounds = SoundBank {
            start: table.load_sound(START_SOUND.0, START_SOUND.1),
            explosions: [
                table.load_sound(e1.0, e1.1),
                table.load_sound(e2.0, e2.1),
                table.load_sound(e3.0, e3.1),
            ],
            flare: table.load_sound(FLARE_SOUND.0, FLARE_SOUND.1),
            scorched_asteroid: table.load_sound(SCORCHED_ASTEROID_SOUND.0, SCORCHED_ASTEROID_SOUND.1),
            scorched_flare: table.load_sound(SCORCHED_FLARE_SOUND.0, SCORCHED_FLARE_SOUND.1),
            end: table.load_sound(END_SOUND.0, END_SOUND.1),
        };

        log::info!(
            "Loaded {} textures, {} sounds",
            table.texture_count(),
            table.sound_count()
        );

        Self {
            sun,
            earth,
            flare,
            asteroid,
            scorched,
            explosion,
            sounds,
        }
    }

    /// Load the manifest with built-in dimensions (no decoder available)
    pub fn headless(table: &mut AssetTable) -> Self {
        let fallback = |path: &str| {
            [
                SUN_TEXTURE,
                EARTH_TEXTURE,
                FLARE_TEXTURE,
                ASTEROID_TEXTURE,
                SCORCHED_TEXTURE,
                EXPLOSION_TEXTURE,
            ]
            .iter()
            .find(|(p, _, _)| *p == path)
            .map(|&(_, w, h)| (w, h))
            .unwrap_or((1, 1))
        };
        Self::load(table, fallback)
    }
}
