//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pool::EntityPool;
use super::spawn::SpawnScheduler;
use crate::assets::{GameAssets, Texture, TextureHandle};
use crate::audio::{EXPLOSION_VARIANTS, SoundCue};
use crate::consts::*;
use crate::stats::RunStats;
use crate::tuning::Tuning;
use crate::{polar_to_cartesian, wrap_degrees};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first click
    Title,
    /// Title text fading out
    TitleFade,
    /// Active gameplay
    Playing,
    /// Scorched Earth zooming to the centre
    EndZoom,
    /// End screen fading in
    EndFade,
    /// Waiting for a click to play again
    EndChoice,
}

impl GamePhase {
    /// The solar system is live: aiming, firing, orbit and entity motion
    pub fn is_running(self) -> bool {
        matches!(self, GamePhase::Title | GamePhase::TitleFade | GamePhase::Playing)
    }

    /// Asteroids spawn, survival is counted and collisions are resolved
    pub fn is_playing(self) -> bool {
        self == GamePhase::Playing
    }

    /// One of the scripted end-of-run phases
    pub fn is_ending(self) -> bool {
        matches!(self, GamePhase::EndZoom | GamePhase::EndFade | GamePhase::EndChoice)
    }
}

/// What kind of body an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Stationary orbit focus, destroys asteroids, immune itself
    Sun,
    /// The orbiting planet the player keeps alive
    Earth,
    /// Player-fired projectile
    Flare,
    /// Incoming hazard
    Asteroid,
    /// Fading visual left behind by a destroyed flare or asteroid
    Explosion,
}

/// RGBA tint, channels in 0.0 - 255.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255.0, 255.0, 255.0, 255.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channels scaled to 0.0 - 1.0 for the GPU
    pub fn to_normalized(self) -> [f32; 4] {
        [self.r / 255.0, self.g / 255.0, self.b / 255.0, self.a / 255.0]
    }
}

/// A simulated body
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub alive: bool,
    /// Centre position (pixels)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Degrees, kept in [0, 360)
    pub rotation: f32,
    /// Degrees per second
    pub rotation_delta: f32,
    pub scale: f32,
    pub tint: Color,
    texture: TextureHandle,
    size: Vec2,
}

impl Entity {
    /// Default entity for a texture: at rest, unscaled, opaque white
    pub fn new(kind: EntityKind, texture: Texture) -> Self {
        Self {
            kind,
            alive: true,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            rotation: 0.0,
            rotation_delta: 0.0,
            scale: 1.0,
            tint: Color::WHITE,
            texture: texture.handle,
            size: texture.size,
        }
    }

    pub fn at(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Unscaled texture size, fixed at creation
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Texture centre, the pivot for rotation
    pub fn origin(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Swap the texture of a fixed body (scorched Earth); size is kept
    pub(crate) fn retexture(&mut self, texture: TextureHandle) {
        self.texture = texture;
    }
}

/// Decorative background star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// Leftward drift in pixels per reference frame (0.5, 1.0 or 1.5)
    pub speed: f32,
}

impl Star {
    /// Fast stars are drawn as short streaks
    pub fn is_streak(&self) -> bool {
        self.speed > 1.0
    }
}

/// How Earth was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    Asteroid,
    Flare,
}

impl EndCause {
    /// End screen message for a run that lasted `years`
    pub fn message(self, years: f64) -> String {
        match self {
            EndCause::Asteroid => format!("You kept Earth alive for {:.1} years", years),
            EndCause::Flare => format!("You killed the Earth after just {:.1} years", years),
        }
    }

    pub fn scorch_cue(self) -> SoundCue {
        match self {
            EndCause::Asteroid => SoundCue::ScorchedByAsteroid,
            EndCause::Flare => SoundCue::ScorchedByFlare,
        }
    }
}

/// Things the shell reacts to; drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    PhaseChanged { from: GamePhase, to: GamePhase },
    FlareFired { index: usize },
    EarthScorched { cause: EndCause, years: f64 },
    NewRecord { years: f64 },
}

/// Pointer aiming state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aim {
    /// Degrees from the sun toward the pointer
    pub angle: f32,
    /// Far end of the aiming line
    pub target: Vec2,
    /// First pointer position seen, to detect movement
    pub initial_pointer: Option<Vec2>,
    /// The aiming line is only shown once the pointer has moved
    pub pointer_moved: bool,
}

impl Default for Aim {
    fn default() -> Self {
        Self {
            angle: 0.0,
            target: PLAYFIELD_CENTER,
            initial_pointer: None,
            pointer_moved: false,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub assets: GameAssets,
    /// Current phase
    pub phase: GamePhase,
    /// The sun, fixed at the playfield centre
    pub sun: Entity,
    /// Earth, orbiting the sun
    pub earth: Entity,
    /// Earth's orbit angle (degrees)
    pub orbit_angle: f32,
    /// Flares, asteroids and explosions
    pub entities: EntityPool,
    pub stars: Vec<Star>,
    pub spawner: SpawnScheduler,
    pub stats: RunStats,
    pub aim: Aim,
    /// Title text alpha (0 - 255)
    pub title_alpha: f32,
    /// End screen alpha (0 - 255)
    pub end_alpha: f32,
    /// Wall time the current run started
    pub run_start: f64,
    /// Set when Earth is lost, cleared on restart
    pub end_cause: Option<EndCause>,
    /// Where Earth ends up after the zoom
    pub zoom_target: Vec2,
    /// Events produced this frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, assets: GameAssets) -> Self {
        Self::with_tuning(seed, assets, Tuning::default())
    }

    pub fn with_tuning(seed: u64, assets: GameAssets, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                pos: Vec2::new(
                    random_int(&mut rng, 0, PLAYFIELD_W as i32 - 1) as f32,
                    random_int(&mut rng, 0, PLAYFIELD_H as i32 - 1) as f32,
                ),
                speed: random_int(&mut rng, 1, 3) as f32 / 2.0,
            })
            .collect();

        let sun = Entity::new(EntityKind::Sun, assets.sun).at(PLAYFIELD_CENTER);
        let earth = Entity::new(EntityKind::Earth, assets.earth);

        let mut state = Self {
            seed,
            rng,
            spawner: SpawnScheduler::new(&tuning),
            tuning,
            assets,
            phase: GamePhase::Title,
            sun,
            earth,
            orbit_angle: EARTH_START_ANGLE,
            entities: EntityPool::new(),
            stars,
            stats: RunStats::new(),
            aim: Aim::default(),
            title_alpha: 255.0,
            end_alpha: 0.0,
            run_start: 0.0,
            end_cause: None,
            zoom_target: PLAYFIELD_CENTER,
            events: Vec::new(),
        };
        state.place_earth();
        state
    }

    /// Uniform integer in `lo..=hi` (a reversed range is accepted)
    pub fn random_int(&mut self, lo: i32, hi: i32) -> i32 {
        random_int(&mut self.rng, lo, hi)
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play(&mut self, cue: SoundCue) {
        self.emit(GameEvent::Sound(cue));
    }

    /// One of the interchangeable impact sounds
    pub fn play_explosion(&mut self) {
        let variant = self.random_int(0, EXPLOSION_VARIANTS as i32 - 1) as usize;
        self.play(SoundCue::Explosion { variant });
    }

    /// Hand this frame's events to the shell
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from != to {
            log::info!("Phase {:?} -> {:?}", from, to);
            self.phase = to;
            self.emit(GameEvent::PhaseChanged { from, to });
        }
    }

    /// Put Earth on its orbit at the current angle
    pub fn place_earth(&mut self) {
        self.earth.pos = polar_to_cartesian(self.sun.pos, EARTH_ORBIT_RADIUS, self.orbit_angle);
    }

    /// Collision radius of the sun
    pub fn sun_radius(&self) -> f32 {
        self.sun.size().x / 3.0
    }

    /// Collision radius of Earth
    pub fn earth_radius(&self) -> f32 {
        self.earth.size().x / 4.0
    }

    /// Replace a pool entity with an explosion at its position
    pub fn explode(&mut self, index: usize) -> usize {
        let rotation = self.random_int(0, 360) as f32;
        let effect = Entity::new(EntityKind::Explosion, self.assets.explosion);
        self.entities.replace_with_effect(
            index,
            effect,
            wrap_degrees(rotation),
            self.tuning.explosion_rotation_delta,
            self.tuning.explosion_tint,
        )
    }

    /// Start (or restart) the survival clock and re-arm the spawner
    pub fn begin_run(&mut self, now: f64) {
        self.play(SoundCue::Start);
        self.run_start = now;
        self.spawner.reset(&self.tuning);
        log::info!("Run started at t={:.2}", now);
        self.set_phase(GamePhase::Playing);
    }

    /// Clear the field, restore Earth and begin a fresh run
    pub fn restart_run(&mut self, now: f64) {
        self.entities.kill_all();
        self.stats.reset_run();
        self.end_cause = None;
        self.orbit_angle = EARTH_START_ANGLE;
        self.earth.scale = 1.0;
        self.earth.vel = Vec2::ZERO;
        self.earth.retexture(self.assets.earth.handle);
        self.place_earth();
        self.begin_run(now);
    }
}

/// Uniform integer in `lo..=hi`; bounds are swapped if reversed
pub fn random_int<R: Rng>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    rng.random_range(lo..=hi)
}

#[cfg(test)]
pub(crate) fn test_state(seed: u64) -> GameState {
    use crate::assets::AssetTable;
    GameState::new(seed, GameAssets::headless(&mut AssetTable::new()))
}
