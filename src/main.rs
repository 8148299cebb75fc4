//! Solar Commander headless runner
//!
//! Steps the simulation at a fixed 60 Hz with a simple autopilot standing in
//! for the mouse, and logs what happens.
//!
//! Usage: `solar-commander [seed] [seconds]`
//! Set `SOLAR_COMMANDER_TUNING` to a JSON file to override game balance.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use solar_commander::audio::AudioManager;
    use solar_commander::render::FrameView;
    use solar_commander::sim::{EntityKind, GameEvent, GamePhase, GameState, TickInput, tick};
    use solar_commander::{AssetTable, GameAssets, Settings, Tuning, angle_between};

    const DT: f32 = 1.0 / 60.0;
    const DEFAULT_SECONDS: f64 = 120.0;
    /// Frames between autopilot shots
    const FIRE_INTERVAL: u64 = 15;
    /// Never fire within this many degrees of Earth
    const EARTH_SAFETY_ARC: f32 = 12.0;

    pub struct Options {
        pub seed: u64,
        pub seconds: f64,
    }

    impl Options {
        pub fn from_args() -> Self {
            let mut args = std::env::args().skip(1);
            let seed = match args.next().map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => seed,
                Some(Err(e)) => {
                    log::warn!("Invalid seed ({}), using 1", e);
                    1
                }
                None => 1,
            };
            let seconds = match args.next().map(|s| s.parse::<f64>()) {
                Some(Ok(secs)) if secs > 0.0 => secs,
                Some(_) => {
                    log::warn!("Invalid duration, using {} seconds", DEFAULT_SECONDS);
                    DEFAULT_SECONDS
                }
                None => DEFAULT_SECONDS,
            };
            Self { seed, seconds }
        }
    }

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("SOLAR_COMMANDER_TUNING") else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {} ({}), using defaults", path, e);
                Tuning::default()
            }
        }
    }

    /// Mouse stand-in: track the asteroid closest to Earth and shoot at it
    struct Autopilot {
        frame: u64,
    }

    impl Autopilot {
        fn input(&mut self, state: &GameState, now: f64) -> TickInput {
            self.frame += 1;
            let mut input = TickInput {
                pointer: None,
                primary_pressed: false,
                now,
            };

            match state.phase {
                GamePhase::Title => {
                    input.pointer = Some(state.earth.pos + Vec2::new(0.0, -200.0));
                    input.primary_pressed = self.frame > 30;
                }
                GamePhase::TitleFade | GamePhase::Playing => {
                    let earth = state.earth.pos;
                    let nearest = state
                        .entities
                        .iter_alive()
                        .filter(|(_, e)| e.kind == EntityKind::Asteroid)
                        .map(|(_, e)| e.pos)
                        .min_by(|a, b| {
                            a.distance_squared(earth).total_cmp(&b.distance_squared(earth))
                        });
                    if let Some(target) = nearest {
                        input.pointer = Some(target);
                        let sun = state.sun.pos;
                        let off_earth = (angle_between(sun, target) - angle_between(sun, earth))
                            .rem_euclid(360.0);
                        let safe = off_earth > EARTH_SAFETY_ARC
                            && off_earth < 360.0 - EARTH_SAFETY_ARC;
                        input.primary_pressed = safe && self.frame % FIRE_INTERVAL == 0;
                    }
                }
                GamePhase::EndChoice => {
                    input.primary_pressed = true;
                }
                GamePhase::EndZoom | GamePhase::EndFade => {}
            }
            input
        }
    }

    pub fn run(options: Options) {
        let mut table = AssetTable::new();
        let assets = GameAssets::headless(&mut table);

        let settings = Settings::default();
        let mut audio = AudioManager::new(assets.sounds, &table, None);
        audio.apply_settings(&settings);

        let mut state = GameState::with_tuning(options.seed, assets, load_tuning());
        let mut autopilot = Autopilot { frame: 0 };
        let frames = (options.seconds * 60.0).ceil() as u64;
        let mut runs = 0u32;
        let mut flares = 0u32;
        let mut now = 0.0f64;

        log::info!("Simulating {} frames with seed {}", frames, options.seed);
        for _ in 0..frames {
            now += DT as f64;
            let input = autopilot.input(&state, now);
            tick(&mut state, &input, DT);

            for event in state.drain_events() {
                match event {
                    GameEvent::Sound(cue) => audio.play(cue),
                    GameEvent::FlareFired { .. } => flares += 1,
                    GameEvent::EarthScorched { cause, years } => {
                        runs += 1;
                        log::info!("Run {}: {}", runs, cause.message(years));
                    }
                    GameEvent::NewRecord { years } => log::info!("Record: {:.2} years", years),
                    GameEvent::PhaseChanged { .. } => {}
                }
            }
        }

        let view = FrameView::capture(&state, &settings);
        log::info!(
            "Finished in {:?} after {} runs, {} flares, {} sprites on screen",
            view.phase,
            runs,
            flares,
            view.sprites.len()
        );
        log::info!(
            "Current run {:.2} years, best {:.2} years",
            state.stats.survival_years,
            state.stats.best_survival_years
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Solar Commander (headless) starting...");
    headless::run(headless::Options::from_args());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser shell; the library is driven by the host
}
