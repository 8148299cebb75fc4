//! Asteroid spawning
//!
//! Two countdown timers feed the field: ambient asteroids drifting in from a
//! random edge, and faster targeted asteroids aimed at Earth. Both re-arm to
//! an interval that shrinks with every whole year survived.

use glam::Vec2;

use super::state::{Entity, EntityKind, GameState};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{angle_between, direction_deg, wrap_degrees};

/// Playfield edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// Inclusive range of inward headings (degrees, screen space)
    pub fn inward_angles(self) -> (i32, i32) {
        match self {
            Edge::Left => (-80, 80),
            Edge::Top => (10, 170),
            Edge::Right => (100, 260),
            Edge::Bottom => (-170, -10),
        }
    }
}

/// Seconds until the next ambient asteroid after `whole_years` full orbits
pub fn ambient_interval(whole_years: u32, tuning: &Tuning) -> f32 {
    interval(whole_years, tuning.ambient_interval_offset)
}

/// Seconds until the next targeted asteroid after `whole_years` full orbits
pub fn targeted_interval(whole_years: u32, tuning: &Tuning) -> f32 {
    interval(whole_years, tuning.targeted_interval_offset)
}

fn interval(whole_years: u32, offset: u32) -> f32 {
    let level = whole_years as f64 + offset.max(1) as f64;
    (EARTH_ORBIT_PERIOD / level) as f32
}

/// Which timers expired this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnDue {
    pub ambient: bool,
    pub targeted: bool,
}

/// The two spawn countdowns
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnScheduler {
    /// Seconds until the next ambient asteroid
    pub ambient_timer: f32,
    /// Seconds until the next targeted asteroid
    pub targeted_timer: f32,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        let mut scheduler = Self {
            ambient_timer: 0.0,
            targeted_timer: 0.0,
        };
        scheduler.reset(tuning);
        scheduler
    }

    /// Re-arm for a new run: an ambient asteroid right away, a targeted one shortly after
    pub fn reset(&mut self, tuning: &Tuning) {
        self.ambient_timer = 0.0;
        self.targeted_timer = tuning.targeted_first_delay;
    }

    /// Count down; expired timers re-arm from the whole years survived
    pub fn advance(&mut self, dt: f32, whole_years: u32, tuning: &Tuning) -> SpawnDue {
        let mut due = SpawnDue::default();

        self.ambient_timer -= dt;
        if self.ambient_timer <= 0.0 {
            due.ambient = true;
            self.ambient_timer = ambient_interval(whole_years, tuning);
        }

        self.targeted_timer -= dt;
        if self.targeted_timer <= 0.0 {
            due.targeted = true;
            self.targeted_timer = targeted_interval(whole_years, tuning);
        }

        due
    }
}

/// Run the scheduler for one frame and spawn whatever is due
pub fn update_spawns(state: &mut GameState, dt: f32) {
    let level = state.stats.whole_years();
    let due = state.spawner.advance(dt, level, &state.tuning);
    if due.ambient {
        spawn_ambient(state);
    }
    if due.targeted {
        spawn_targeted(state);
    }
}

fn random_edge(state: &mut GameState) -> Edge {
    Edge::ALL[state.random_int(0, 3) as usize]
}

/// Uniform point along an edge
fn edge_point(state: &mut GameState, edge: Edge) -> Vec2 {
    let w = PLAYFIELD_W as i32;
    let h = PLAYFIELD_H as i32;
    match edge {
        Edge::Left => Vec2::new(0.0, state.random_int(0, h) as f32),
        Edge::Top => Vec2::new(state.random_int(0, w) as f32, 0.0),
        Edge::Right => Vec2::new(PLAYFIELD_W, state.random_int(0, h) as f32),
        Edge::Bottom => Vec2::new(state.random_int(0, w) as f32, PLAYFIELD_H),
    }
}

fn new_asteroid(state: &mut GameState, pos: Vec2, heading: f32, speed: f32) -> Entity {
    let mut asteroid = Entity::new(EntityKind::Asteroid, state.assets.asteroid).at(pos);
    asteroid.vel = direction_deg(heading) * speed;
    asteroid.rotation = wrap_degrees(state.random_int(0, 360) as f32);
    let (lo, hi) = (state.tuning.asteroid_spin_min, state.tuning.asteroid_spin_max);
    asteroid.rotation_delta = state.random_int(lo, hi) as f32;
    asteroid
}

/// Asteroid drifting in from a random edge at a random inward heading
pub fn spawn_ambient(state: &mut GameState) -> usize {
    let edge = random_edge(state);
    let pos = edge_point(state, edge);
    let (lo, hi) = edge.inward_angles();
    let heading = state.random_int(lo, hi) as f32;
    let speed = state.tuning.ambient_speed;
    let asteroid = new_asteroid(state, pos, heading, speed);
    let idx = state.entities.add(asteroid);
    log::debug!(
        "Ambient asteroid idx={} from {:?} at ({:.0}, {:.0}) heading {:.0}",
        idx,
        edge,
        pos.x,
        pos.y,
        heading
    );
    idx
}

/// Fast, tinted asteroid from a random edge aimed straight at Earth
pub fn spawn_targeted(state: &mut GameState) -> usize {
    let edge = random_edge(state);
    let pos = edge_point(state, edge);
    let heading = angle_between(pos, state.earth.pos);
    let speed = state.tuning.targeted_speed;
    let mut asteroid = new_asteroid(state, pos, heading, speed);
    asteroid.tint = state.tuning.targeted_tint;
    let idx = state.entities.add(asteroid);
    log::debug!(
        "Targeted asteroid idx={} from {:?} at ({:.0}, {:.0}) heading {:.0}",
        idx,
        edge,
        pos.x,
        pos.y,
        heading
    );
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::test_state;
    use proptest::prelude::*;

    #[test]
    fn test_intervals_at_start() {
        let tuning = Tuning::default();
        assert!((ambient_interval(0, &tuning) - 20.0 / 7.0).abs() < 1e-5);
        assert!((targeted_interval(0, &tuning) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_partial_year_keeps_level() {
        let mut state = test_state(3);
        state.stats.survival_years = 0.99;
        state.spawner.ambient_timer = 0.0;
        update_spawns(&mut state, 1.0 / 60.0);
        assert_eq!(state.spawner.ambient_timer, ambient_interval(0, &state.tuning));

        state.stats.survival_years = 1.0;
        state.spawner.ambient_timer = 0.0;
        update_spawns(&mut state, 1.0 / 60.0);
        assert!((state.spawner.ambient_timer - 20.0 / 8.0).abs() < 1e-5);
    }

    #[test]
    fn test_reset_arms_timers() {
        let tuning = Tuning::default();
        let mut scheduler = SpawnScheduler::new(&tuning);
        scheduler.ambient_timer = 3.0;
        scheduler.targeted_timer = 3.0;
        scheduler.reset(&tuning);
        assert_eq!(scheduler.ambient_timer, 0.0);
        assert_eq!(scheduler.targeted_timer, 0.5);
    }

    #[test]
    fn test_first_frame_spawns_ambient_only() {
        let tuning = Tuning::default();
        let mut scheduler = SpawnScheduler::new(&tuning);
        let due = scheduler.advance(1.0 / 60.0, 0, &tuning);
        assert!(due.ambient);
        assert!(!due.targeted);
        assert!((scheduler.ambient_timer - ambient_interval(0, &tuning)).abs() < 1e-6);

        // Targeted fires after its short delay
        let mut fired = false;
        for _ in 0..40 {
            fired |= scheduler.advance(1.0 / 60.0, 0, &tuning).targeted;
        }
        assert!(fired);
    }

    #[test]
    fn test_ambient_spawn_on_edge_heading_inward() {
        let mut state = test_state(11);
        for _ in 0..100 {
            let idx = spawn_ambient(&mut state);
            let a = &state.entities[idx];
            assert_eq!(a.kind, EntityKind::Asteroid);
            let on_edge = a.pos.x == 0.0
                || a.pos.y == 0.0
                || a.pos.x == PLAYFIELD_W
                || a.pos.y == PLAYFIELD_H;
            assert!(on_edge);
            assert!((a.vel.length() - state.tuning.ambient_speed).abs() < 1e-3);
            let inward = (a.pos.x == 0.0 && a.vel.x > 0.0)
                || (a.pos.y == 0.0 && a.vel.y > 0.0)
                || (a.pos.x == PLAYFIELD_W && a.vel.x < 0.0)
                || (a.pos.y == PLAYFIELD_H && a.vel.y < 0.0);
            assert!(inward);
            assert!((30.0..=50.0).contains(&a.rotation_delta));
            assert!((0.0..360.0).contains(&a.rotation));
            state.entities.kill(idx);
        }
    }

    #[test]
    fn test_targeted_spawn_aims_at_earth() {
        let mut state = test_state(5);
        let idx = spawn_targeted(&mut state);
        let a = state.entities[idx].clone();
        let to_earth = (state.earth.pos - a.pos).normalize();
        let heading = a.vel.normalize();
        assert!(heading.dot(to_earth) > 0.9999);
        assert!((a.vel.length() - state.tuning.targeted_speed).abs() < 1e-3);
        assert_eq!(a.tint, state.tuning.targeted_tint);
    }

    #[test]
    fn test_update_spawns_adds_to_pool() {
        let mut state = test_state(2);
        update_spawns(&mut state, 1.0 / 60.0);
        assert_eq!(state.entities.count_kind(EntityKind::Asteroid), 1);
    }

    proptest! {
        #[test]
        fn prop_intervals_positive_and_decreasing(years in 0u32..500) {
            let tuning = Tuning::default();
            let a0 = ambient_interval(years, &tuning);
            let a1 = ambient_interval(years + 1, &tuning);
            let t0 = targeted_interval(years, &tuning);
            let t1 = targeted_interval(years + 1, &tuning);
            prop_assert!(a0 > 0.0 && t0 > 0.0);
            prop_assert!(a1 < a0);
            prop_assert!(t1 < t0);
            // Targeted waves start sparser but tighten faster every year
            prop_assert!(a0 < t0);
            prop_assert!(t0 - t1 > a0 - a1);
        }

        #[test]
        fn prop_ambient_more_frequent_for_any_survival(years in 0.0f64..1000.0) {
            let tuning = Tuning::default();
            let stats = crate::stats::RunStats { survival_years: years, best_survival_years: 0.0 };
            let level = stats.whole_years();
            prop_assert!(ambient_interval(level, &tuning) < targeted_interval(level, &tuning));
        }
    }
}
