//! Per-frame motion: pool integration, culling, orbit, spin and starfield

use super::pool::EntityPool;
use super::state::{Entity, EntityKind, GameState};
use crate::consts::*;
use crate::{polar_to_cartesian, wrap_degrees};

/// True once an entity's box, padded by its own size, has left the playfield
#[inline]
pub fn is_out_of_bounds(e: &Entity) -> bool {
    let size = e.size();
    e.pos.x + size.x < 0.0
        || e.pos.x - size.x > PLAYFIELD_W
        || e.pos.y + size.y < 0.0
        || e.pos.y - size.y > PLAYFIELD_H
}

/// Advance one entity by `dt` seconds, killing it if faded or out of bounds
pub fn advance_entity(e: &mut Entity, dt: f32, explosion_fade_rate: f32) {
    e.pos += e.vel * dt;
    e.rotation = wrap_degrees(e.rotation + e.rotation_delta * dt);

    let mut faded = false;
    if e.kind == EntityKind::Explosion {
        let alpha = e.tint.a - explosion_fade_rate * dt;
        if alpha <= 0.0 {
            e.tint.a = 0.0;
            faded = true;
        } else {
            e.tint.a = alpha;
        }
    }

    if faded || is_out_of_bounds(e) {
        e.alive = false;
    }
}

/// Advance every live pool entity
pub fn integrate(pool: &mut EntityPool, dt: f32, explosion_fade_rate: f32) {
    for e in pool.slots_mut().iter_mut().filter(|e| e.alive) {
        advance_entity(e, dt, explosion_fade_rate);
    }
}

/// Move Earth along its orbit
pub fn advance_orbit(state: &mut GameState, dt: f32) {
    state.orbit_angle = wrap_degrees(state.orbit_angle - EARTH_ORBIT_DELTA * dt);
    state.earth.pos = polar_to_cartesian(state.sun.pos, EARTH_ORBIT_RADIUS, state.orbit_angle);
}

pub fn spin_sun(state: &mut GameState, dt: f32) {
    state.sun.rotation = wrap_degrees(state.sun.rotation + SUN_ROTATION_DELTA * dt);
}

/// Scroll stars left; a star leaving the left edge re-enters on the right
pub fn drift_stars(state: &mut GameState, dt: f32) {
    let frames = dt * REFERENCE_FPS;
    for i in 0..state.stars.len() {
        state.stars[i].pos.x -= state.stars[i].speed * frames;
        if state.stars[i].pos.x < 0.0 {
            let y = state.random_int(0, PLAYFIELD_H as i32 - 1) as f32;
            let speed = state.random_int(1, 3) as f32 / 2.0;
            let star = &mut state.stars[i];
            star.pos.x = PLAYFIELD_W;
            star.pos.y = y;
            star.speed = speed;
        }
    }
}
