//! Circle collisions between asteroids, flares, the sun and Earth
//!
//! Each live asteroid gets at most one resolution per frame, tried in priority
//! order: sun, Earth, then any other live entity. Flares are checked against
//! Earth afterwards. Once Earth is hit nothing else is evaluated that frame.

use glam::Vec2;

use super::state::{EndCause, EntityKind, GameState};

/// Two circles touch when centres are no further apart than the sum of radii
#[inline]
pub fn circles_collide(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) <= reach * reach
}

/// What an asteroid ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidHit {
    Sun,
    Earth,
    /// Another pool entity, by slot index and kind
    Other { index: usize, kind: EntityKind },
}

/// Collision radius of a pool entity when it is the moving asteroid or flare
#[inline]
fn leading_radius(size: Vec2) -> f32 {
    size.x / 3.0
}

/// Collision radius of a pool entity being run into
#[inline]
fn other_radius(size: Vec2) -> f32 {
    size.x.min(size.y) / 3.0
}

/// First thing the asteroid in slot `index` overlaps, in priority order
pub fn find_asteroid_hit(state: &GameState, index: usize) -> Option<AsteroidHit> {
    let asteroid = &state.entities[index];
    let pos = asteroid.pos;
    let radius = leading_radius(asteroid.size());

    if circles_collide(pos, radius, state.sun.pos, state.sun_radius()) {
        return Some(AsteroidHit::Sun);
    }

    if circles_collide(pos, radius, state.earth.pos, state.earth_radius()) {
        return Some(AsteroidHit::Earth);
    }

    state
        .entities
        .iter_alive()
        .filter(|(j, _)| *j != index)
        .find(|(_, other)| circles_collide(pos, radius, other.pos, other_radius(other.size())))
        .map(|(j, other)| AsteroidHit::Other {
            index: j,
            kind: other.kind,
        })
}

/// Resolve the asteroid in slot `index`; returns the end cause if Earth was hit
fn resolve_asteroid(state: &mut GameState, index: usize) -> Option<EndCause> {
    let hit = find_asteroid_hit(state, index)?;

    // Both slots are still alive here, so the explosions below cannot recycle them
    match hit {
        AsteroidHit::Sun => {
            log::debug!("Collision: asteroid (idx={}) & sun", index);
            state.explode(index);
            state.play_explosion();
            None
        }
        AsteroidHit::Earth => {
            log::info!("Collision: asteroid (idx={}) & EARTH", index);
            state.explode(index);
            state.play_explosion();
            Some(EndCause::Asteroid)
        }
        AsteroidHit::Other { index: other, kind } => {
            log::debug!(
                "Collision: asteroid (idx={}) & {:?} (idx={})",
                index,
                kind,
                other
            );
            state.explode(index);
            state.play_explosion();
            // A flare survives the asteroid it detonates; two asteroids both go
            if kind == EntityKind::Asteroid {
                state.explode(other);
            }
            None
        }
    }
}

/// Flare in slot `index` against Earth
fn resolve_flare(state: &mut GameState, index: usize) -> Option<EndCause> {
    let flare = &state.entities[index];
    let hit = circles_collide(
        flare.pos,
        leading_radius(flare.size()),
        state.earth.pos,
        state.earth_radius(),
    );
    if !hit {
        return None;
    }
    log::info!("Collision: flare (idx={}) & EARTH", index);
    state.explode(index);
    state.play_explosion();
    Some(EndCause::Flare)
}

/// Run every collision check for this frame
///
/// Slots appended by explosions during the pass are visited too; they are
/// never asteroids or flares so they are skipped.
pub fn resolve_collisions(state: &mut GameState) -> Option<EndCause> {
    let mut i = 0;
    while i < state.entities.len() {
        if state.entities.is_alive_kind(i, EntityKind::Asteroid) {
            if let Some(cause) = resolve_asteroid(state, i) {
                return Some(cause);
            }
        }
        i += 1;
    }

    let mut i = 0;
    while i < state.entities.len() {
        if state.entities.is_alive_kind(i, EntityKind::Flare) {
            if let Some(cause) = resolve_flare(state, i) {
                return Some(cause);
            }
        }
        i += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundCue;
    use crate::consts::*;
    use crate::sim::state::{Entity, GameEvent, test_state};

    fn add(state: &mut GameState, kind: EntityKind, pos: Vec2) -> usize {
        let texture = match kind {
            EntityKind::Flare => state.assets.flare,
            EntityKind::Explosion => state.assets.explosion,
            _ => state.assets.asteroid,
        };
        state.entities.add(Entity::new(kind, texture).at(pos))
    }

    fn explosions_at(state: &GameState, pos: Vec2) -> usize {
        state
            .entities
            .iter_alive()
            .filter(|(_, e)| e.kind == EntityKind::Explosion && e.pos == pos)
            .count()
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(30.0, 40.0);
        assert!(circles_collide(a, 20.0, b, 30.0));
        assert!(!circles_collide(a, 20.0, b, 29.9));
    }

    #[test]
    fn test_asteroid_into_sun() {
        let mut state = test_state(1);
        assert_eq!(state.sun.pos, Vec2::new(300.0, 300.0));
        assert_eq!(state.sun_radius(), 60.0);
        let idx = add(&mut state, EntityKind::Asteroid, Vec2::new(300.0, 300.0));
        assert_eq!(leading_radius(state.entities[idx].size()), 20.0);

        assert_eq!(resolve_collisions(&mut state), None);
        assert!(!state.entities.is_alive(idx));
        assert_eq!(explosions_at(&state, Vec2::new(300.0, 300.0)), 1);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Sound(SoundCue::Explosion { .. })))
        );
    }

    #[test]
    fn test_sun_has_priority_over_earth() {
        let mut state = test_state(1);
        // Pull Earth in so one asteroid overlaps both bodies
        state.earth.pos = state.sun.pos + Vec2::new(70.0, 0.0);
        let pos = state.sun.pos + Vec2::new(50.0, 0.0);
        let idx = add(&mut state, EntityKind::Asteroid, pos);
        assert_eq!(find_asteroid_hit(&state, idx), Some(AsteroidHit::Sun));
        assert_eq!(resolve_collisions(&mut state), None);
        assert!(!state.entities.is_alive(idx));
    }

    #[test]
    fn test_asteroid_into_earth() {
        let mut state = test_state(1);
        let earth = state.earth.pos;
        let idx = add(&mut state, EntityKind::Asteroid, earth + Vec2::new(10.0, 0.0));
        assert_eq!(resolve_collisions(&mut state), Some(EndCause::Asteroid));
        assert!(!state.entities.is_alive(idx));
    }

    #[test]
    fn test_asteroids_destroy_each_other() {
        let mut state = test_state(1);
        let a = add(&mut state, EntityKind::Asteroid, Vec2::new(100.0, 100.0));
        let b = add(&mut state, EntityKind::Asteroid, Vec2::new(120.0, 100.0));
        assert_eq!(resolve_collisions(&mut state), None);
        assert!(!state.entities.is_alive(a));
        assert!(!state.entities.is_alive(b));
        assert_eq!(state.entities.count_kind(EntityKind::Explosion), 2);
        assert_eq!(explosions_at(&state, Vec2::new(100.0, 100.0)), 1);
        assert_eq!(explosions_at(&state, Vec2::new(120.0, 100.0)), 1);
        // One collision, one bang
        let bangs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Sound(SoundCue::Explosion { .. })))
            .count();
        assert_eq!(bangs, 1);
    }

    #[test]
    fn test_flare_survives_asteroid() {
        let mut state = test_state(1);
        let flare = add(&mut state, EntityKind::Flare, Vec2::new(100.0, 100.0));
        let asteroid = add(&mut state, EntityKind::Asteroid, Vec2::new(110.0, 100.0));
        assert_eq!(resolve_collisions(&mut state), None);
        assert!(!state.entities.is_alive(asteroid));
        assert!(state.entities.is_alive(flare));
        assert_eq!(state.entities.count_kind(EntityKind::Explosion), 1);
    }

    #[test]
    fn test_one_resolution_per_asteroid() {
        let mut state = test_state(1);
        // Middle touches both neighbours. Left resolves first and takes middle
        // with it; right then runs into the explosion middle left behind
        let left = add(&mut state, EntityKind::Asteroid, Vec2::new(100.0, 100.0));
        let right = add(&mut state, EntityKind::Asteroid, Vec2::new(180.0, 100.0));
        let middle = add(&mut state, EntityKind::Asteroid, Vec2::new(140.0, 100.0));
        assert_eq!(resolve_collisions(&mut state), None);
        assert!(!state.entities.is_alive(left));
        assert!(!state.entities.is_alive(middle));
        assert!(!state.entities.is_alive(right));
        assert_eq!(state.entities.count_kind(EntityKind::Explosion), 3);
    }

    #[test]
    fn test_flare_into_earth() {
        let mut state = test_state(1);
        let earth = state.earth.pos;
        let flare = add(&mut state, EntityKind::Flare, earth);
        assert_eq!(resolve_collisions(&mut state), Some(EndCause::Flare));
        assert!(!state.entities.is_alive(flare));
    }

    #[test]
    fn test_earth_hit_stops_further_checks() {
        let mut state = test_state(1);
        let earth = state.earth.pos;
        add(&mut state, EntityKind::Asteroid, earth);
        let later = add(&mut state, EntityKind::Asteroid, PLAYFIELD_CENTER);
        assert_eq!(resolve_collisions(&mut state), Some(EndCause::Asteroid));
        // The sun would have destroyed it, but the frame ended at Earth
        assert!(state.entities.is_alive(later));
    }

    #[test]
    fn test_distant_asteroids_untouched() {
        let mut state = test_state(1);
        let a = add(&mut state, EntityKind::Asteroid, Vec2::new(20.0, 20.0));
        let b = add(&mut state, EntityKind::Asteroid, Vec2::new(580.0, 20.0));
        assert_eq!(resolve_collisions(&mut state), None);
        assert!(state.entities.is_alive(a));
        assert!(state.entities.is_alive(b));
    }
}
