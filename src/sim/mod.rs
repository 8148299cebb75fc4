//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by pool slot)
//! - No rendering, audio or platform dependencies; sounds leave as events

pub mod collision;
pub mod kinematics;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{AsteroidHit, circles_collide, resolve_collisions};
pub use pool::EntityPool;
pub use spawn::{Edge, SpawnScheduler, ambient_interval, targeted_interval};
pub use state::{
    Aim, Color, EndCause, Entity, EntityKind, GameEvent, GamePhase, GameState, Star,
};
pub use tick::{TickInput, fire_flare, tick};
