//! Enemy steering policies
//!
//! Each `Behavior` variant has one function computing the enemy's aim for this
//! tick. Pursuers re-aim every tick; wanderers only when their retarget timer
//! runs out. The timers are tick-counted so no steering happens outside the
//! simulation step.
//!
//! An aim is any unit vector. Enemies travel on the grid, so at each cell
//! centre `choose_direction` turns the aim into the open axis direction that
//! follows it best.

use glam::Vec2;
use rand::Rng;

use super::state::{Behavior, Direction, Enemy};
use crate::tuning::Tuning;

/// What an enemy can see of the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quarry {
    pub pos: Vec2,
    /// Unit heading, or zero when standing still
    pub heading: Vec2,
}

/// Update an enemy's aim for this tick and advance its retarget timer
pub fn steer<R: Rng>(enemy: &mut Enemy, quarry: Quarry, tuning: &Tuning, rng: &mut R) -> Vec2 {
    if enemy.retarget_ticks > 0 {
        enemy.retarget_ticks -= 1;
        // Wanderers hold their aim between re-rolls; pursuers hold only while bouncing
        return enemy.aim;
    }

    let aim = match enemy.behavior {
        Behavior::Chase => chase(enemy.pos, quarry),
        Behavior::Ambush => ambush(enemy.pos, quarry, tuning.ambush_lookahead),
        Behavior::Patrol => {
            enemy.retarget_ticks = tuning.patrol_interval_ticks.saturating_sub(1);
            patrol(rng)
        }
        Behavior::Random => {
            enemy.retarget_ticks = tuning.random_interval_ticks.saturating_sub(1);
            random_axis(rng)
        }
    };

    // Standing exactly on the target keeps the old aim
    if aim != Vec2::ZERO {
        enemy.aim = aim;
    }
    enemy.aim
}

/// Straight at the player
pub fn chase(from: Vec2, quarry: Quarry) -> Vec2 {
    (quarry.pos - from).normalize_or_zero()
}

/// At a point `lookahead` pixels ahead of the player along its heading
pub fn ambush(from: Vec2, quarry: Quarry, lookahead: f32) -> Vec2 {
    let target = quarry.pos + quarry.heading * lookahead;
    (target - from).normalize_or_zero()
}

/// Uniformly random direction
pub fn patrol<R: Rng>(rng: &mut R) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    Vec2::from_angle(angle)
}

/// One of the four axis directions, uniformly
pub fn random_axis<R: Rng>(rng: &mut R) -> Vec2 {
    Direction::ALL[rng.random_range(0..Direction::ALL.len())].as_vec2()
}

/// Pick the open direction best aligned with `aim`.
///
/// Turning back is only taken in a dead end. Ties go to the first entry of
/// `open`, so the choice is deterministic. `None` when nothing is open.
pub fn choose_direction(
    aim: Vec2,
    current: Option<Direction>,
    open: &[Direction],
) -> Option<Direction> {
    let back = current.map(Direction::opposite);
    let forward: Vec<Direction> = open.iter().copied().filter(|&d| Some(d) != back).collect();
    let candidates = if forward.is_empty() { open } else { &forward[..] };

    let mut best: Option<(Direction, f32)> = None;
    for &dir in candidates {
        let score = dir.as_vec2().dot(aim);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((dir, score));
        }
    }
    best.map(|(dir, _)| dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PATROL_INTERVAL_TICKS, RANDOM_INTERVAL_TICKS};
    use crate::sim::state::ENEMY_KINDS;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy(behavior: Behavior, pos: Vec2) -> Enemy {
        let kind = ENEMY_KINDS
            .iter()
            .copied()
            .find(|k| k.behavior == behavior)
            .unwrap();
        let mut e = Enemy::new(0, kind, pos, kind.speed);
        e.pos = pos;
        e
    }

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_chase_points_at_player() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = enemy(Behavior::Chase, Vec2::new(0.0, 0.0));
        let quarry = Quarry {
            pos: Vec2::new(30.0, 40.0),
            heading: Vec2::X,
        };
        let h = steer(&mut e, quarry, &Tuning::default(), &mut rng);
        assert!(approx(h, Vec2::new(0.6, 0.8)));
        assert_eq!(e.aim, h);
        assert_eq!(e.retarget_ticks, 0);
    }

    #[test]
    fn test_ambush_leads_the_player() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = enemy(Behavior::Ambush, Vec2::new(100.0, 0.0));
        // Player at origin heading down: target is (0, 50)
        let quarry = Quarry {
            pos: Vec2::ZERO,
            heading: Vec2::Y,
        };
        let h = steer(&mut e, quarry, &Tuning::default(), &mut rng);
        assert!(approx(h, Vec2::new(-100.0, 50.0).normalize()));
    }

    #[test]
    fn test_ambush_lookahead_comes_from_tuning() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = enemy(Behavior::Ambush, Vec2::new(100.0, 0.0));
        let tuning = Tuning {
            ambush_lookahead: 100.0,
            ..Tuning::default()
        };
        let quarry = Quarry {
            pos: Vec2::ZERO,
            heading: Vec2::Y,
        };
        let h = steer(&mut e, quarry, &tuning, &mut rng);
        assert!(approx(h, Vec2::new(-1.0, 1.0).normalize()));
    }

    #[test]
    fn test_pursuer_on_target_keeps_aim() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut e = enemy(Behavior::Chase, Vec2::new(10.0, 10.0));
        e.aim = Vec2::X;
        let quarry = Quarry {
            pos: Vec2::new(10.0, 10.0),
            heading: Vec2::ZERO,
        };
        assert_eq!(steer(&mut e, quarry, &Tuning::default(), &mut rng), Vec2::X);
    }

    #[test]
    fn test_random_rerolls_every_interval() {
        let mut rng = Pcg32::seed_from_u64(99);
        let tuning = Tuning::default();
        let mut e = enemy(Behavior::Random, Vec2::ZERO);
        let quarry = Quarry {
            pos: Vec2::ZERO,
            heading: Vec2::ZERO,
        };

        let first = steer(&mut e, quarry, &tuning, &mut rng);
        assert!(Direction::ALL.iter().any(|d| d.as_vec2() == first));

        // Held for the rest of the interval
        for _ in 1..RANDOM_INTERVAL_TICKS {
            assert_eq!(steer(&mut e, quarry, &tuning, &mut rng), first);
        }
        assert_eq!(e.retarget_ticks, 0);
    }

    #[test]
    fn test_patrol_holds_for_two_seconds() {
        let mut rng = Pcg32::seed_from_u64(5);
        let tuning = Tuning::default();
        let mut e = enemy(Behavior::Patrol, Vec2::ZERO);
        let quarry = Quarry {
            pos: Vec2::new(500.0, 0.0),
            heading: Vec2::ZERO,
        };
        let first = steer(&mut e, quarry, &tuning, &mut rng);
        assert!((first.length() - 1.0).abs() < 1e-5);
        assert_eq!(e.retarget_ticks, PATROL_INTERVAL_TICKS - 1);
        for _ in 1..PATROL_INTERVAL_TICKS {
            assert_eq!(steer(&mut e, quarry, &tuning, &mut rng), first);
        }
    }

    #[test]
    fn test_patrol_interval_comes_from_tuning() {
        let mut rng = Pcg32::seed_from_u64(5);
        let tuning = Tuning {
            patrol_interval_ticks: 10,
            ..Tuning::default()
        };
        let mut e = enemy(Behavior::Patrol, Vec2::ZERO);
        let quarry = Quarry {
            pos: Vec2::ZERO,
            heading: Vec2::ZERO,
        };
        steer(&mut e, quarry, &tuning, &mut rng);
        assert_eq!(e.retarget_ticks, 9);
    }

    #[test]
    fn test_random_axis_covers_all_directions() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let v = random_axis(&mut rng);
            seen.insert((v.x as i32, v.y as i32));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_choose_follows_aim_through_open_sides() {
        use Direction::*;
        // Target straight up behind a wall: pick the open side closest to it
        let aim = Vec2::new(0.3, -1.0).normalize();
        assert_eq!(choose_direction(aim, Some(Up), &[Left, Right]), Some(Right));
        assert_eq!(choose_direction(aim, Some(Up), &[Up, Left, Right]), Some(Up));
        // Never left with nothing: no aim still picks an open way
        assert_eq!(choose_direction(Vec2::ZERO, None, &[Down, Left]), Some(Down));
        assert_eq!(choose_direction(aim, Some(Up), &[]), None);
    }

    #[test]
    fn test_choose_turns_back_only_in_dead_end() {
        use Direction::*;
        // Aim points back the way we came, but a side is open
        assert_eq!(choose_direction(Vec2::X, Some(Left), &[Right, Up]), Some(Up));
        // Dead end: reversing is the only way out
        assert_eq!(choose_direction(Vec2::NEG_X, Some(Left), &[Right]), Some(Right));
    }
}
