//! Solar Commander - keep Earth alive
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entity pool, spawning, collisions, game phases)
//! - `assets`: Texture/sound handle registry shared with the presentation shell
//! - `audio`: Sound cue dispatch to an optional audio device
//! - `render`: Read-only per-frame view for the renderer
//! - `stats`: Survival years and the in-memory record
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod assets;
pub mod audio;
pub mod render;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use assets::{AssetTable, GameAssets, SoundHandle, Texture, TextureHandle};
pub use settings::Settings;
pub use stats::RunStats;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_W: f32 = 600.0;
    pub const PLAYFIELD_H: f32 = 600.0;
    pub const PLAYFIELD_CENTER: Vec2 = Vec2::new(PLAYFIELD_W / 2.0, PLAYFIELD_H / 2.0);

    /// Nominal frame rate the star drift speeds are expressed in
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Background stars
    pub const STAR_COUNT: usize = 100;

    /// Sun spin (degrees per second)
    pub const SUN_ROTATION_DELTA: f32 = 15.0;

    /// Earth orbit around the sun
    pub const EARTH_ORBIT_RADIUS: f32 = 180.0;
    /// Degrees per second; the orbit runs clockwise on screen (angle decreases)
    pub const EARTH_ORBIT_DELTA: f32 = 18.0;
    pub const EARTH_START_ANGLE: f32 = 45.0;
    /// Seconds per full orbit, i.e. one "year"
    pub const EARTH_ORBIT_PERIOD: f64 = 360.0 / EARTH_ORBIT_DELTA as f64;
}

/// Playfield diagonal, used as the aim line length
#[inline]
pub fn playfield_diagonal() -> f32 {
    Vec2::new(consts::PLAYFIELD_W, consts::PLAYFIELD_H).length()
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit vector for an angle in degrees (screen space, y down)
#[inline]
pub fn direction_deg(angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Convert polar (r, degrees) around `center` to cartesian
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, angle: f32) -> Vec2 {
    center + direction_deg(angle) * r
}

/// Angle in degrees of the vector from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!((wrap_degrees(370.0) - 10.0).abs() < 1e-4);
        assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
        let tiny = wrap_degrees(-1e-9);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn test_polar_round_trip_angle() {
        let center = Vec2::new(300.0, 300.0);
        let p = polar_to_cartesian(center, 180.0, 45.0);
        assert!((angle_between(center, p) - 45.0).abs() < 1e-3);
        assert!(((p - center).length() - 180.0).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_period() {
        assert!((consts::EARTH_ORBIT_PERIOD - 20.0).abs() < 1e-9);
    }
}
