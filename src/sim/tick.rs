//! Fixed-step simulation tick
//!
//! Core game loop that advances the session deterministically. Hosts call
//! `tick` exactly once per animation frame; nothing else mutates `GameState`.

use super::behavior::{self, Quarry};
use super::collision::{in_contact, check_move, wrap_tunnel};
use super::maze::Tile;
use super::particles;
use super::state::{Direction, GameEvent, GamePhase, GameState, Hue};
use crate::cell_center;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Latest direction intent; becomes the player's desired direction
    pub direction: Option<Direction>,
    /// Pause toggle
    pub pause: bool,
    /// Leave `Idle`
    pub start: bool,
    /// Begin a new run after game over
    pub restart: bool,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if input.restart && state.phase == GamePhase::GameOver {
        state.restart();
        return;
    }

    if state.phase == GamePhase::Idle && (input.start || input.direction.is_some()) {
        state.start();
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::Paused);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Running;
                state.events.push(GameEvent::Resumed);
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Running {
        return;
    }

    if let Some(dir) = input.direction {
        state.player.desired = Some(dir);
    }

    step(state);
}

fn step(state: &mut GameState) {
    state.time_ticks += 1;

    advance_player(state);
    advance_enemies(state);
    particles::age(&mut state.particles);
    resolve_pickups(state);
    resolve_collisions(state);

    if state.phase != GamePhase::GameOver {
        check_level_complete(state);
    }

    sync_frightened(state);
}

/// Turn if the desired direction is open, then move or stop
fn advance_player(state: &mut GameState) {
    let maze = &state.maze;
    let player = &mut state.player;
    let speed = player.speed;

    if let Some(want) = player.desired.filter(|&d| player.dir != Some(d)) {
        let mut from = player.pos;
        // Turning onto the other axis re-centres the cross axis on the current cell
        let crosses_axis = player
            .dir
            .is_none_or(|d| d.is_horizontal() != want.is_horizontal());
        let centre = cell_center(player.cell());
        // Moving players only turn within one step of the centre
        let near_centre = player
            .dir
            .is_none_or(|d| (centre - player.pos).dot(d.as_vec2()).abs() <= speed);
        if crosses_axis {
            if want.is_horizontal() {
                from.y = centre.y;
            } else {
                from.x = centre.x;
            }
        }
        if (!crosses_axis || near_centre) && check_move(maze, from, want.as_vec2(), speed).clear {
            player.pos = from;
            player.dir = Some(want);
        }
    }

    if let Some(dir) = player.dir {
        let check = check_move(maze, player.pos, dir.as_vec2(), speed);
        if check.clear {
            player.pos = wrap_tunnel(maze, check.to);
        } else {
            player.dir = None;
        }
    }

    player.power_timer = player.power_timer.saturating_sub(1);
    player.grace_timer = player.grace_timer.saturating_sub(1);
}

/// Steer each enemy by its policy; turn at cell centres, bounce off walls
fn advance_enemies(state: &mut GameState) {
    let quarry = Quarry {
        pos: state.player.pos,
        heading: state.player.heading(),
    };
    let GameState {
        maze,
        enemies,
        rng,
        tuning,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        let aim = behavior::steer(enemy, quarry, tuning, rng);
        let speed = enemy.effective_speed(tuning.frightened_speed_factor);

        // Reaching the centre of a cell this tick: pick the open way closest to the aim
        let cell = enemy.cell();
        let centre = cell_center(cell);
        let ahead = (centre - enemy.pos).dot(enemy.heading);
        if (0.0..=speed).contains(&ahead) {
            let open: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|d| maze.is_walkable_cell(cell + d.as_ivec2()))
                .collect();
            let current = Direction::ALL
                .into_iter()
                .find(|d| d.as_vec2() == enemy.heading);
            if let Some(dir) = behavior::choose_direction(aim, current, &open) {
                enemy.pos = centre;
                enemy.heading = dir.as_vec2();
            }
        }

        let check = check_move(maze, enemy.pos, enemy.heading, speed);
        if check.clear {
            enemy.pos = wrap_tunnel(maze, check.to);
            continue;
        }

        enemy.heading = -enemy.heading;
        enemy.aim = -enemy.aim;
        let back = check_move(maze, enemy.pos, enemy.heading, speed);
        if back.clear {
            enemy.pos = wrap_tunnel(maze, back.to);
        }
        enemy.retarget_ticks = enemy.retarget_ticks.max(tuning.bounce_hold_ticks);
    }
}

/// Eat whatever pellet sits on the player's cell
fn resolve_pickups(state: &mut GameState) {
    let cell = state.player.cell();
    let centre = cell_center(cell);

    match state.maze.consume_pellet(cell.x, cell.y) {
        Tile::Pellet => {
            state.score += state.tuning.pellet_score;
            state.pellets_eaten += 1;
            particles::spawn(
                &mut state.particles,
                centre,
                Hue::Green,
                state.tuning.pellet_burst,
                &mut state.rng,
            );
            state.events.push(GameEvent::PelletEaten { cell });
        }
        Tile::PowerPellet => {
            state.score += state.tuning.power_pellet_score;
            state.pellets_eaten += 1;
            state.player.power_timer = state.tuning.power_duration_ticks;
            particles::spawn(
                &mut state.particles,
                centre,
                Hue::Pink,
                state.tuning.power_burst,
                &mut state.rng,
            );
            state.events.push(GameEvent::PowerPelletEaten { cell });
        }
        Tile::Wall | Tile::Empty => {}
    }
}

/// Player-enemy contacts; at most one life is lost per tick
fn resolve_collisions(state: &mut GameState) {
    let radius = state.tuning.collision_radius;

    for i in 0..state.enemies.len() {
        let enemy = &state.enemies[i];
        if !in_contact(state.player.pos, enemy.pos, radius) {
            continue;
        }

        if state.player.invulnerable() {
            if enemy.frightened {
                let (id, pos, hue) = (enemy.id, enemy.pos, enemy.hue);
                state.enemies[i].respawn();
                state.score += state.tuning.enemy_eaten_score;
                particles::spawn(
                    &mut state.particles,
                    pos,
                    hue,
                    state.tuning.enemy_eaten_burst,
                    &mut state.rng,
                );
                state.events.push(GameEvent::EnemyEaten { id });
                log::debug!("Enemy {id} eaten at tick {}", state.time_ticks);
            }
        } else {
            lose_life(state);
            return;
        }
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.finish();
        return;
    }

    log::debug!("Life lost, {} left", state.lives);
    state.player.respawn(state.tuning.grace_ticks);
    let spawn = state.player.spawn;
    particles::spawn(
        &mut state.particles,
        spawn,
        Hue::Pink,
        state.tuning.death_burst,
        &mut state.rng,
    );
}

/// Board cleared: bonus, next level, celebration
fn check_level_complete(state: &mut GameState) {
    if state.maze.remaining_pellets() > 0 {
        return;
    }

    state.level += 1;
    state.score += state.tuning.level_bonus;
    state.generate_level();

    let bounds = state.field_size();
    particles::shower(
        &mut state.particles,
        bounds,
        &Hue::CELEBRATION,
        state.tuning.level_shower,
        &mut state.rng,
    );

    log::info!("Level {} reached, score {}", state.level, state.score);
    state.events.push(GameEvent::LevelComplete { level: state.level });
}

/// Mirror the player's power mode onto every enemy
fn sync_frightened(state: &mut GameState) {
    let frightened = state.player.powered();
    for enemy in &mut state.enemies {
        enemy.frightened = frightened;
    }
}
