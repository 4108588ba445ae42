//! Visual-only particle bursts
//!
//! Particles never affect gameplay, but they draw from the session RNG so a
//! seeded run reproduces them exactly.

use glam::Vec2;
use rand::Rng;

use super::state::{Hue, Particle};

/// Per-axis speed range (pixels/tick)
const MAX_SPEED: f32 = 3.0;
/// Lifetime range (ticks); `max_life` is the upper bound so alpha starts below 1
const MIN_LIFE: u32 = 30;
const MAX_LIFE: u32 = 60;
const MIN_RADIUS: f32 = 2.0;
const MAX_RADIUS: f32 = 6.0;

/// Hard cap on live particles; the oldest are dropped first
pub const MAX_PARTICLES: usize = 512;

fn particle<R: Rng>(pos: Vec2, hue: Hue, rng: &mut R) -> Particle {
    let vel = Vec2::new(
        rng.random_range(-MAX_SPEED..MAX_SPEED),
        rng.random_range(-MAX_SPEED..MAX_SPEED),
    );
    let life = rng.random_range(MIN_LIFE..MAX_LIFE);
    Particle {
        pos,
        vel,
        life,
        max_life: MAX_LIFE,
        alpha: life as f32 / MAX_LIFE as f32,
        hue,
        radius: rng.random_range(MIN_RADIUS..MAX_RADIUS),
    }
}

fn make_room(particles: &mut Vec<Particle>, incoming: usize) {
    let total = particles.len() + incoming;
    if total > MAX_PARTICLES {
        let excess = (total - MAX_PARTICLES).min(particles.len());
        particles.drain(..excess);
    }
}

/// Emit `count` particles from one point
pub fn spawn<R: Rng>(particles: &mut Vec<Particle>, origin: Vec2, hue: Hue, count: usize, rng: &mut R) {
    make_room(particles, count);
    particles.extend((0..count).map(|_| particle(origin, hue, rng)));
}

/// Emit `count` particles at random points inside `bounds`, hues drawn from `hues`
pub fn shower<R: Rng>(
    particles: &mut Vec<Particle>,
    bounds: Vec2,
    hues: &[Hue],
    count: usize,
    rng: &mut R,
) {
    if hues.is_empty() {
        return;
    }
    make_room(particles, count);
    for _ in 0..count {
        let pos = Vec2::new(
            rng.random_range(0.0..bounds.x),
            rng.random_range(0.0..bounds.y),
        );
        let hue = hues[rng.random_range(0..hues.len())];
        particles.push(particle(pos, hue, rng));
    }
}

/// Move, fade and cull every particle by one tick
pub fn age(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.life = p.life.saturating_sub(1);
        p.alpha = p.life as f32 / p.max_life as f32;
    }
    particles.retain(|p| p.life > 0);
}
