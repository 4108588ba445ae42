//! Per-frame draw policy
//!
//! Reads the game state and issues draw calls in back-to-front order: maze,
//! pellets, enemies, player, particles, HUD text, phase overlay. Never mutates
//! the state.

use glam::Vec2;

use super::{Paint, RenderSink, Sprite, TextAlign, POWER_UP_SPRITES};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Enemy, GamePhase, GameState, Hue, Player, Tile};
use crate::cell_center;

const WALL_LINE: f32 = 2.0;
const PELLET_RADIUS: f32 = 3.0;

/// Glow hints per element, scaled to zero when glow is off
const WALL_GLOW: f32 = 5.0;
const PELLET_GLOW: f32 = 8.0;
const POWER_GLOW: f32 = 15.0;
const ENEMY_GLOW: f32 = 15.0;
const PLAYER_GLOW: f32 = 25.0;
const PARTICLE_GLOW: f32 = 8.0;

/// Draw one frame. `time_ms` only drives cosmetic pulsing.
pub fn draw_frame(state: &GameState, sink: &mut impl RenderSink, settings: &Settings, time_ms: f64) {
    let field = state.field_size();
    let glow = if settings.effective_glow() { 1.0 } else { 0.0 };
    let pulse = settings.effective_pulse();

    sink.clear(field);
    draw_maze(state, sink, glow, pulse, time_ms);

    for enemy in &state.enemies {
        draw_enemy(enemy, sink, glow);
    }
    draw_player(&state.player, sink, glow, pulse, time_ms);

    for particle in state.particles.iter().take(settings.max_particles()) {
        let paint = Paint::solid(particle.hue)
            .with_alpha(particle.alpha)
            .with_glow(PARTICLE_GLOW * glow);
        sink.fill_circle(particle.pos, particle.radius, paint);
    }

    draw_hud(state, sink, field);
    draw_overlay(state, sink, field);
}

fn draw_maze(state: &GameState, sink: &mut impl RenderSink, glow: f32, pulse: bool, time_ms: f64) {
    let tile = Vec2::splat(TILE_SIZE);
    let wall = Paint::solid(Hue::Cyan).with_glow(WALL_GLOW * glow);
    let pellet = Paint::solid(Hue::Green).with_glow(PELLET_GLOW * glow);
    let scale = if pulse {
        (time_ms / 200.0).sin() as f32 * 0.2 + 1.0
    } else {
        1.0
    };

    for (cell, kind) in state.maze.cells() {
        match kind {
            Tile::Wall => sink.stroke_rect(cell.as_vec2() * TILE_SIZE, tile, WALL_LINE, wall),
            Tile::Pellet => sink.fill_circle(cell_center(cell), PELLET_RADIUS, pellet),
            Tile::PowerPellet => {
                let sprite = Sprite::PowerUp((cell.x + cell.y) as usize % POWER_UP_SPRITES);
                if sink.image_ready(sprite) {
                    let paint = Paint::solid(Hue::Pink)
                        .with_alpha(0.9)
                        .with_glow(POWER_GLOW * glow);
                    sink.draw_image(sprite, cell_center(cell), TILE_SIZE * 0.8 * scale, paint);
                }
            }
            Tile::Empty => {}
        }
    }
}

fn draw_enemy(enemy: &Enemy, sink: &mut impl RenderSink, glow: f32) {
    let hue = if enemy.frightened { Hue::Blue } else { enemy.hue };
    let body = Paint::solid(hue).with_glow(ENEMY_GLOW * glow);
    let half = ENEMY_SIZE / 2.0;

    // Dome plus skirt
    sink.fill_circle(enemy.pos, half, body);
    sink.fill_rect(enemy.pos - Vec2::new(half, 0.0), Vec2::new(ENEMY_SIZE, half), body);

    let look = enemy.heading.normalize_or_zero() * 1.5;
    for side in [-1.0, 1.0] {
        let eye = enemy.pos + Vec2::new(side * half * 0.45, -half * 0.3);
        sink.fill_circle(eye, 2.5, Paint::solid(Hue::White));
        sink.fill_circle(eye + look, 1.2, Paint::solid(Hue::Black));
    }
}

fn draw_player(player: &Player, sink: &mut impl RenderSink, glow: f32, pulse: bool, time_ms: f64) {
    if !sink.image_ready(Sprite::Mascot) {
        return;
    }

    let (size, alpha) = if player.invulnerable() {
        let flicker = if pulse {
            (time_ms / 100.0).sin() as f32 * 0.3
        } else {
            0.0
        };
        (PLAYER_SIZE * 1.1, 0.7 + flicker)
    } else {
        (PLAYER_SIZE, 1.0)
    };
    let glow = if player.powered() { PLAYER_GLOW * glow } else { 0.0 };
    let paint = Paint::solid(Hue::Pink).with_alpha(alpha).with_glow(glow);
    sink.draw_image(Sprite::Mascot, player.pos, size, paint);
}

fn draw_hud(state: &GameState, sink: &mut impl RenderSink, field: Vec2) {
    sink.draw_text(
        &format!("Level {}", state.level),
        Vec2::new(field.x - 10.0, 25.0),
        16.0,
        TextAlign::Right,
        Paint::solid(Hue::Cyan),
    );

    let power = state.player.power_timer;
    if power > 0 {
        let seconds = power.div_ceil(TICKS_PER_SECOND);
        sink.draw_text(
            &format!("POWER: {seconds}s"),
            Vec2::new(field.x / 2.0, 25.0),
            16.0,
            TextAlign::Center,
            Paint::solid(Hue::Pink),
        );
    }
}

fn draw_overlay(state: &GameState, sink: &mut impl RenderSink, field: Vec2) {
    let (title, hint) = match state.phase {
        GamePhase::Running => return,
        GamePhase::Paused => ("PAUSED", "Press SPACE to continue".to_string()),
        GamePhase::Idle => ("PAC-BOP", "Press ENTER or an arrow key to start".to_string()),
        GamePhase::GameOver => (
            "GAME OVER",
            format!("Score {}  Best {}  Press ENTER to play again", state.score, state.high_score),
        ),
    };

    let center = field / 2.0;
    sink.fill_rect(Vec2::ZERO, field, Paint::solid(Hue::Black).with_alpha(0.8));
    sink.draw_text(title, center, 48.0, TextAlign::Center, Paint::solid(Hue::Cyan));
    sink.draw_text(
        &hint,
        center + Vec2::new(0.0, 40.0),
        16.0,
        TextAlign::Center,
        Paint::solid(Hue::Cyan),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::{Particle, TickInput, tick};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Clear,
        FillRect(Paint),
        StrokeRect(Paint),
        Circle(Vec2, f32, Paint),
        Image(Sprite, Paint),
        Text(String),
    }

    /// Records every call; sprites load only when `ready` is set
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        ready: bool,
    }

    impl Recorder {
        fn loaded() -> Self {
            Self {
                ready: true,
                ..Self::default()
            }
        }

        fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(c)).count()
        }

        fn has_text(&self, needle: &str) -> bool {
            self.calls
                .iter()
                .any(|c| matches!(c, Call::Text(t) if t.contains(needle)))
        }
    }

    impl RenderSink for Recorder {
        fn clear(&mut self, _size: Vec2) {
            self.calls.push(Call::Clear);
        }
        fn fill_rect(&mut self, _min: Vec2, _size: Vec2, paint: Paint) {
            self.calls.push(Call::FillRect(paint));
        }
        fn stroke_rect(&mut self, _min: Vec2, _size: Vec2, _line_width: f32, paint: Paint) {
            self.calls.push(Call::StrokeRect(paint));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
            self.calls.push(Call::Circle(center, radius, paint));
        }
        fn draw_image(&mut self, sprite: Sprite, _center: Vec2, _size: f32, paint: Paint) {
            self.calls.push(Call::Image(sprite, paint));
        }
        fn draw_text(&mut self, text: &str, _pos: Vec2, _size: f32, _align: TextAlign, _paint: Paint) {
            self.calls.push(Call::Text(text.to_string()));
        }
        fn image_ready(&self, _sprite: Sprite) -> bool {
            self.ready
        }
    }

    fn running_state() -> GameState {
        let mut state = GameState::new(7, 0);
        state.start();
        state
    }

    fn pellet_dots(rec: &Recorder) -> usize {
        rec.count(|c| matches!(c, Call::Circle(_, r, p) if *r == PELLET_RADIUS && p.hue == Hue::Green))
    }

    #[test]
    fn test_frame_starts_with_clear_and_draws_every_wall() {
        let state = running_state();
        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::default(), 0.0);

        assert_eq!(rec.calls.first(), Some(&Call::Clear));
        let walls = state.maze.cells().filter(|(_, t)| *t == Tile::Wall).count();
        assert_eq!(rec.count(|c| matches!(c, Call::StrokeRect(_))), walls);
    }

    #[test]
    fn test_eaten_pellets_disappear() {
        let mut state = running_state();
        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::default(), 0.0);
        let before = pellet_dots(&rec);

        let cell = state
            .maze
            .cells()
            .find(|(_, t)| *t == Tile::Pellet)
            .map(|(c, _)| c)
            .unwrap();
        state.maze.consume_pellet(cell.x, cell.y);

        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::default(), 0.0);
        assert_eq!(pellet_dots(&rec), before - 1);
    }

    #[test]
    fn test_unloaded_sprites_are_skipped() {
        let state = running_state();
        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec, &Settings::default(), 0.0);
        assert_eq!(rec.count(|c| matches!(c, Call::Image(..))), 0);

        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::default(), 0.0);
        assert_eq!(
            rec.count(|c| matches!(c, Call::Image(Sprite::Mascot, _))),
            1
        );
        assert!(rec.count(|c| matches!(c, Call::Image(Sprite::PowerUp(_), _))) > 0);
    }

    #[test]
    fn test_frightened_enemies_turn_blue() {
        let mut state = running_state();
        for enemy in &mut state.enemies {
            enemy.frightened = true;
        }
        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::default(), 0.0);

        let bodies = rec.count(|c| matches!(c, Call::FillRect(p) if p.hue == Hue::Blue));
        assert_eq!(bodies, state.enemies.len());
        assert_eq!(
            rec.count(|c| matches!(c, Call::FillRect(p) if p.hue == Hue::Cyan)),
            0
        );
    }

    #[test]
    fn test_particle_draw_cap_follows_quality() {
        let mut state = running_state();
        for i in 0..100 {
            state.particles.push(Particle {
                pos: Vec2::new(i as f32, 100.0),
                vel: Vec2::ZERO,
                life: 40,
                max_life: 60,
                alpha: 0.5,
                hue: Hue::Orange,
                radius: 4.5,
            });
        }
        let sparks = |rec: &Recorder| {
            rec.count(|c| matches!(c, Call::Circle(_, r, p) if *r == 4.5 && p.hue == Hue::Orange))
        };

        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::from_preset(QualityPreset::Low), 0.0);
        assert_eq!(sparks(&rec), 64);

        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::from_preset(QualityPreset::High), 0.0);
        assert_eq!(sparks(&rec), 100);
    }

    #[test]
    fn test_low_quality_has_no_glow() {
        let mut state = running_state();
        state.player.power_timer = 100;
        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::from_preset(QualityPreset::Low), 0.0);

        let glowing = rec.count(|c| match c {
            Call::FillRect(p) | Call::StrokeRect(p) | Call::Circle(_, _, p) | Call::Image(_, p) => {
                p.glow > 0.0
            }
            _ => false,
        });
        assert_eq!(glowing, 0);
    }

    #[test]
    fn test_hud_and_overlays() {
        let mut state = GameState::new(7, 0);
        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::default(), 0.0);
        assert!(rec.has_text("PAC-BOP"));
        assert!(rec.has_text("Level 1"));

        state.start();
        state.player.power_timer = POWER_DURATION_TICKS;
        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::default(), 0.0);
        assert!(rec.has_text("POWER: 5s"));
        assert!(!rec.has_text("PAUSED"));

        tick(
            &mut state,
            &TickInput {
                pause: true,
                ..TickInput::default()
            },
        );
        let mut rec = Recorder::loaded();
        draw_frame(&state, &mut rec, &Settings::default(), 0.0);
        assert!(rec.has_text("PAUSED"));
    }

    #[test]
    fn test_reduced_motion_freezes_pulse() {
        let state = running_state();
        let mut settings = Settings::default();
        settings.reduced_motion = true;

        let frame = |time_ms: f64| {
            let mut rec = Recorder::loaded();
            draw_frame(&state, &mut rec, &settings, time_ms);
            rec.calls
        };
        assert_eq!(frame(0.0), frame(314.0));
    }
}
