//! Per-frame update
//!
//! Runs the game phase machine and, in a fixed order, every subsystem the
//! current phase allows: aiming and firing, orbit, title fade, spawning,
//! integration, collisions, then the scripted end zoom and fade.

use glam::Vec2;

use super::collision::resolve_collisions;
use super::kinematics::{advance_orbit, drift_stars, integrate, spin_sun};
use super::spawn::update_spawns;
use super::state::{EndCause, Entity, EntityKind, GameEvent, GamePhase, GameState};
use crate::audio::SoundCue;
use crate::consts::*;
use crate::{angle_between, direction_deg, playfield_diagonal, wrap_degrees};

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in playfield pixels, if known
    pub pointer: Option<Vec2>,
    /// Primary button went down since the last frame
    pub primary_pressed: bool,
    /// Monotonic wall-clock time (seconds)
    pub now: f64,
}

/// Advance the game state by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    debug_assert!(dt.is_finite() && dt >= 0.0, "bad frame time {}", dt);

    if state.phase.is_running() {
        update_aim(state, input.pointer);

        if input.primary_pressed {
            if state.phase == GamePhase::Title {
                state.title_alpha = 255.0;
                state.set_phase(GamePhase::TitleFade);
            }
            fire_flare(state);
        }

        advance_orbit(state, dt);
        if state.phase.is_playing() {
            let run_start = state.run_start;
            state.stats.update(input.now, run_start);
        }
    }

    drift_stars(state, dt);
    spin_sun(state, dt);

    if state.phase == GamePhase::TitleFade {
        state.title_alpha -= state.tuning.title_fade_rate * dt;
        if state.title_alpha <= 0.0 {
            state.title_alpha = 0.0;
            state.begin_run(input.now);
        }
    }

    if state.phase.is_playing() {
        update_spawns(state, dt);
    }

    if state.phase.is_running() {
        let fade = state.tuning.explosion_fade_rate;
        integrate(&mut state.entities, dt, fade);
    }

    if state.phase.is_playing() {
        if let Some(cause) = resolve_collisions(state) {
            scorch_earth(state, cause);
        }
    }

    match state.phase {
        GamePhase::EndZoom => update_end_zoom(state, dt),
        GamePhase::EndFade => update_end_fade(state, dt),
        GamePhase::EndChoice => {
            if input.primary_pressed {
                state.restart_run(input.now);
            }
        }
        _ => {}
    }
}

/// Point the aiming line from the sun through the pointer
fn update_aim(state: &mut GameState, pointer: Option<Vec2>) {
    let Some(pointer) = pointer else {
        return;
    };
    match state.aim.initial_pointer {
        None => state.aim.initial_pointer = Some(pointer),
        Some(initial) => {
            if pointer.floor() != initial.floor() {
                state.aim.pointer_moved = true;
            }
        }
    }
    let sun = state.sun.pos;
    state.aim.angle = angle_between(sun, pointer);
    state.aim.target = sun + direction_deg(state.aim.angle) * playfield_diagonal();
}

/// Launch a flare from the sun along the aiming line
pub fn fire_flare(state: &mut GameState) -> usize {
    let angle = state.aim.angle;
    let mut flare = Entity::new(EntityKind::Flare, state.assets.flare).at(state.sun.pos);
    flare.vel = direction_deg(angle) * state.tuning.flare_speed;
    flare.rotation = wrap_degrees(angle + 90.0);
    let index = state.entities.add(flare);
    log::debug!("Flare idx={} fired at {:.0} degrees", index, angle);
    state.play(SoundCue::Flare);
    state.emit(GameEvent::FlareFired { index });
    index
}

/// Earth is gone: scorch it, settle the record and start the end zoom
fn scorch_earth(state: &mut GameState, cause: EndCause) {
    let years = state.stats.survival_years;
    log::info!("Earth scorched by {:?} after {:.2} years", cause, years);

    state.earth.retexture(state.assets.scorched.handle);
    state.end_cause = Some(cause);
    state.play(cause.scorch_cue());
    state.emit(GameEvent::EarthScorched { cause, years });

    if state.stats.record(years) {
        log::info!("New record: {:.2} years", years);
        state.emit(GameEvent::NewRecord { years });
    }

    state.zoom_target = PLAYFIELD_CENTER;
    state.earth.vel = (state.zoom_target - state.earth.pos) / state.tuning.end_zoom_period;
    state.set_phase(GamePhase::EndZoom);
}

/// Earth drifts to the centre while growing to the zoom scale
fn update_end_zoom(state: &mut GameState, dt: f32) {
    let earth = &mut state.earth;
    earth.pos += earth.vel * dt;
    earth.scale += state.tuning.end_zoom_scale_delta() * dt;

    if earth.scale >= state.tuning.end_zoom_scale {
        earth.vel = Vec2::ZERO;
        earth.scale = state.tuning.end_zoom_scale;
        earth.pos = state.zoom_target;
        state.play(SoundCue::End);
        state.end_alpha = 0.0;
        state.set_phase(GamePhase::EndFade);
    }
}

fn update_end_fade(state: &mut GameState, dt: f32) {
    state.end_alpha += state.tuning.end_fade_rate * dt;
    if state.end_alpha >= 255.0 {
        state.end_alpha = 255.0;
        state.set_phase(GamePhase::EndChoice);
    }
}
