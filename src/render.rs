//! Read-only frame view for the presentation shell
//!
//! The simulation never draws. Each frame the shell captures a `FrameView`
//! and turns it into draw calls; sprite records are plain `Pod` data so they
//! can be uploaded as-is.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Entity, GamePhase, GameState};

/// Colors for HUD and overlays (normalized RGBA)
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [37.0 / 255.0, 46.0 / 255.0, 52.0 / 255.0, 1.0];
    pub const AIM_LINE: [f32; 4] = [253.0 / 255.0, 249.0 / 255.0, 0.0, 96.0 / 255.0];
    pub const STAR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HEADING: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HEADING_SHADOW: [f32; 4] = [230.0 / 255.0, 41.0 / 255.0, 55.0 / 255.0, 1.0];
    pub const TEXT: [f32; 4] = [253.0 / 255.0, 249.0 / 255.0, 0.0, 1.0];
}

/// Length of a fast star's streak (pixels)
const STREAK_LENGTH: f32 = 3.0;

const HEADING_SIZE: f32 = 80.0;
const TEXT_SIZE: f32 = 20.0;
const SHADOW_OFFSET: f32 = 4.0;

/// One textured quad
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Texture handle value
    pub texture: u32,
    /// Source rect in texels: x, y, w, h
    pub src_rect: [f32; 4],
    /// Destination rect: centre x, centre y, scaled w, scaled h
    pub dest_rect: [f32; 4],
    /// Rotation pivot relative to the destination rect
    pub origin: [f32; 2],
    /// Degrees
    pub rotation: f32,
    pub tint: [f32; 4],
}

impl SpriteInstance {
    pub fn from_entity(e: &Entity) -> Self {
        let size = e.size();
        let scaled = size * e.scale;
        Self {
            texture: e.texture().0,
            src_rect: [0.0, 0.0, size.x, size.y],
            dest_rect: [e.pos.x, e.pos.y, scaled.x, scaled.y],
            origin: [scaled.x / 2.0, scaled.y / 2.0],
            rotation: e.rotation,
            tint: e.tint.to_normalized(),
        }
    }
}

/// A background star: a dot, or a short streak for fast ones
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarMark {
    pub from: Vec2,
    pub to: Vec2,
}

/// A straight line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Vec2,
    pub to: Vec2,
    pub color: [f32; 4],
}

/// A piece of text at a top-left position
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub pos: Vec2,
    pub size: f32,
    pub color: [f32; 4],
}

/// Everything the shell needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub phase: GamePhase,
    pub clear_color: [f32; 4],
    pub stars: Vec<StarMark>,
    pub aim_line: Option<Line>,
    /// Back to front
    pub sprites: Vec<SpriteInstance>,
    pub text: Vec<TextItem>,
}

impl FrameView {
    /// Build the view for the current state
    pub fn capture(state: &GameState, settings: &Settings) -> Self {
        let running = state.phase.is_running();
        let mut view = Self {
            phase: state.phase,
            clear_color: colors::BACKGROUND,
            stars: Vec::new(),
            aim_line: None,
            sprites: Vec::with_capacity(state.entities.len() + 2),
            text: Vec::new(),
        };

        if running && settings.starfield {
            view.stars = state
                .stars
                .iter()
                .map(|star| {
                    let from = star.pos.floor();
                    let to = if star.is_streak() {
                        from + Vec2::new(STREAK_LENGTH, 0.0)
                    } else {
                        from
                    };
                    StarMark { from, to }
                })
                .collect();
        }

        if running && settings.show_aim_line && state.aim.pointer_moved {
            view.aim_line = Some(Line {
                from: state.sun.pos,
                to: state.aim.target,
                color: colors::AIM_LINE,
            });
        }

        if running {
            view.sprites.push(SpriteInstance::from_entity(&state.sun));
            view.sprites.push(SpriteInstance::from_entity(&state.earth));
            view.sprites.extend(
                state
                    .entities
                    .iter_alive()
                    .map(|(_, e)| SpriteInstance::from_entity(e)),
            );
        } else if state.phase.is_ending() {
            // Only the scorched Earth is left on screen once the run is over
            view.sprites.push(SpriteInstance::from_entity(&state.earth));
        }

        view.text = overlay_text(state);
        view
    }
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], (alpha / 255.0).clamp(0.0, 1.0)]
}

/// Large heading with an offset shadow underneath
fn heading(out: &mut Vec<TextItem>, text: &str, y: f32, alpha: f32) {
    out.push(TextItem {
        text: text.to_string(),
        pos: Vec2::new(10.0 + SHADOW_OFFSET, y + SHADOW_OFFSET),
        size: HEADING_SIZE,
        color: with_alpha(colors::HEADING_SHADOW, alpha),
    });
    out.push(TextItem {
        text: text.to_string(),
        pos: Vec2::new(10.0, y),
        size: HEADING_SIZE,
        color: with_alpha(colors::HEADING, alpha),
    });
}

fn line(out: &mut Vec<TextItem>, text: String, y: f32, alpha: f32) {
    out.push(TextItem {
        text,
        pos: Vec2::new(10.0, y),
        size: TEXT_SIZE,
        color: with_alpha(colors::TEXT, alpha),
    });
}

fn overlay_text(state: &GameState) -> Vec<TextItem> {
    let mut out = Vec::new();
    let years = state.stats.survival_years;

    match state.phase {
        GamePhase::Title | GamePhase::TitleFade => {
            let alpha = state.title_alpha;
            heading(&mut out, "SOLAR", 10.0, alpha);
            heading(&mut out, "COMMANDER", 100.0, alpha);
            line(&mut out, "Keep Earth Alive".to_string(), 190.0, alpha);
            let bottom = PLAYFIELD_H;
            line(&mut out, "Protect Earth from asteroids".to_string(), bottom - 80.0, alpha);
            line(&mut out, "Use mouse to shoot solar flares".to_string(), bottom - 50.0, alpha);
        }
        GamePhase::Playing => {
            line(&mut out, format!("Earth alive: {:.2} years", years), 10.0, 255.0);
        }
        GamePhase::EndFade | GamePhase::EndChoice => {
            let alpha = state.end_alpha;
            heading(&mut out, "SCORCHED", 10.0, alpha);
            heading(&mut out, "EARTH", 100.0, alpha);
            if let Some(cause) = state.end_cause {
                line(&mut out, cause.message(years), 190.0, alpha);
            }
            let best = state.stats.best_survival_years;
            line(&mut out, format!("Record: {:.1} years", best), 220.0, alpha);
            if state.phase == GamePhase::EndChoice {
                line(&mut out, "Click to play again".to_string(), PLAYFIELD_H / 2.0, alpha);
            }
        }
        GamePhase::EndZoom => {}
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::test_state;
    use crate::sim::{EndCause, EntityKind};

    fn texts(view: &FrameView) -> Vec<&str> {
        view.text.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_sprite_instance_layout() {
        assert_eq!(std::mem::size_of::<SpriteInstance>(), 64);
        let state = test_state(1);
        let sprite = SpriteInstance::from_entity(&state.sun);
        let bytes: &[u8] = bytemuck::bytes_of(&sprite);
        assert_eq!(bytes.len(), 64);
    }

    #[test]
    fn test_scaled_sprite() {
        let mut state = test_state(1);
        state.earth.scale = 2.0;
        let sprite = SpriteInstance::from_entity(&state.earth);
        assert_eq!(sprite.src_rect, [0.0, 0.0, 64.0, 64.0]);
        assert_eq!(sprite.dest_rect[2], 128.0);
        assert_eq!(sprite.origin, [64.0, 64.0]);
        assert_eq!(sprite.dest_rect[0], state.earth.pos.x);
    }

    #[test]
    fn test_title_view() {
        let state = test_state(1);
        let view = FrameView::capture(&state, &Settings::default());
        assert_eq!(view.stars.len(), STAR_COUNT);
        // No pointer movement yet
        assert!(view.aim_line.is_none());
        assert_eq!(view.sprites.len(), 2);
        assert!(texts(&view).contains(&"COMMANDER"));
    }

    #[test]
    fn test_sprites_in_pool_order() {
        let mut state = test_state(1);
        state.set_phase(GamePhase::Playing);
        let a = crate::sim::Entity::new(EntityKind::Asteroid, state.assets.asteroid);
        state.entities.add(a.clone().at(Vec2::new(10.0, 10.0)));
        let dead = state.entities.add(a.clone().at(Vec2::new(20.0, 20.0)));
        state.entities.add(a.at(Vec2::new(30.0, 30.0)));
        state.entities.kill(dead);

        let view = FrameView::capture(&state, &Settings::default());
        assert_eq!(view.sprites.len(), 4);
        assert_eq!(view.sprites[0].texture, state.assets.sun.handle.0);
        assert_eq!(view.sprites[1].texture, state.assets.earth.handle.0);
        assert_eq!(view.sprites[2].dest_rect[0], 10.0);
        assert_eq!(view.sprites[3].dest_rect[0], 30.0);
        assert!(texts(&view).contains(&"Earth alive: 0.00 years"));
    }

    #[test]
    fn test_aim_line_respects_settings() {
        let mut state = test_state(1);
        state.aim.pointer_moved = true;
        let view = FrameView::capture(&state, &Settings::default());
        assert!(view.aim_line.is_some());

        let settings = Settings {
            show_aim_line: false,
            starfield: false,
            ..Settings::default()
        };
        let view = FrameView::capture(&state, &settings);
        assert!(view.aim_line.is_none());
        assert!(view.stars.is_empty());
    }

    #[test]
    fn test_end_choice_view() {
        let mut state = test_state(1);
        state.stats.survival_years = 1.3;
        state.stats.best_survival_years = 2.5;
        state.end_cause = Some(EndCause::Flare);
        state.end_alpha = 255.0;
        state.set_phase(GamePhase::EndChoice);

        let view = FrameView::capture(&state, &Settings::default());
        assert!(view.stars.is_empty());
        assert_eq!(view.sprites.len(), 1);
        let lines = texts(&view);
        assert!(lines.contains(&"SCORCHED"));
        assert!(lines.contains(&"You killed the Earth after just 1.3 years"));
        assert!(lines.contains(&"Record: 2.5 years"));
        assert!(lines.contains(&"Click to play again"));
        assert!(view.text.iter().all(|t| t.color[3] == 1.0));
    }

    #[test]
    fn test_end_fade_has_no_prompt() {
        let mut state = test_state(1);
        state.end_cause = Some(EndCause::Asteroid);
        state.end_alpha = 51.0;
        state.set_phase(GamePhase::EndFade);
        let view = FrameView::capture(&state, &Settings::default());
        assert!(!texts(&view).contains(&"Click to play again"));
        assert!(view.text.iter().all(|t| (t.color[3] - 0.2).abs() < 1e-6));
    }
}
