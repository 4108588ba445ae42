//! Game state and core simulation types
//!
//! `GameState` is the single owned aggregate: the maze, every entity, the
//! particles and the session counters. Only `tick` mutates it.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::maze::{MazeGrid, MazeLayout};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{cell_center, cell_of};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Created, waiting for the first start intent
    Idle,
    /// Active gameplay
    Running,
    /// Simulation frozen, render continues
    Paused,
    /// Out of lives
    GameOver,
}

/// One of the four grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector in screen space (y grows downward)
    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::NEG_Y,
            Direction::Down => Vec2::Y,
            Direction::Left => Vec2::NEG_X,
            Direction::Right => Vec2::X,
        }
    }

    #[inline]
    pub fn as_ivec2(self) -> IVec2 {
        self.as_vec2().as_ivec2()
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Color tag shared by entities and particles; the renderer maps it to CSS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    Cyan,
    Pink,
    Green,
    Purple,
    Orange,
    /// Frightened enemies
    Blue,
    White,
    Black,
}

impl Hue {
    /// Colors used by the level-complete shower
    pub const CELEBRATION: [Hue; 4] = [Hue::Cyan, Hue::Pink, Hue::Green, Hue::Purple];
}

/// Enemy steering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Head straight for the player
    Chase,
    /// Wander, re-rolling a heading every 2 s
    Patrol,
    /// Pick an axis direction every 1 s
    Random,
    /// Aim ahead of the player
    Ambush,
}

/// Static description of an enemy type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyKind {
    pub behavior: Behavior,
    pub hue: Hue,
    /// Level 1 base speed (pixels/tick)
    pub speed: f32,
}

/// Enemy roster, assigned to spawn slots in order
pub const ENEMY_KINDS: [EnemyKind; 4] = [
    EnemyKind {
        behavior: Behavior::Chase,
        hue: Hue::Pink,
        speed: 1.5,
    },
    EnemyKind {
        behavior: Behavior::Patrol,
        hue: Hue::Purple,
        speed: 1.2,
    },
    EnemyKind {
        behavior: Behavior::Random,
        hue: Hue::Orange,
        speed: 1.8,
    },
    EnemyKind {
        behavior: Behavior::Ambush,
        hue: Hue::Cyan,
        speed: 1.0,
    },
];

/// Number of enemies on a level (1-based)
pub fn enemy_count_for_level(level: u32) -> usize {
    ((level / 2 + 2) as usize).min(MAX_ENEMIES)
}

/// The player character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Current heading (`None` = standing still)
    pub dir: Option<Direction>,
    /// Most recent input, applied once the turn is unobstructed
    pub desired: Option<Direction>,
    /// Pixels per tick
    pub speed: f32,
    /// Ticks of power mode left (0 = inactive)
    pub power_timer: u32,
    /// Ticks of respawn invulnerability left
    pub grace_timer: u32,
    pub spawn: Vec2,
}

impl Player {
    pub fn new(spawn: Vec2, speed: f32) -> Self {
        Self {
            pos: spawn,
            dir: None,
            desired: None,
            speed,
            power_timer: 0,
            grace_timer: 0,
            spawn,
        }
    }

    #[inline]
    pub fn cell(&self) -> IVec2 {
        cell_of(self.pos)
    }

    #[inline]
    pub fn powered(&self) -> bool {
        self.power_timer > 0
    }

    /// Power mode or respawn grace
    #[inline]
    pub fn invulnerable(&self) -> bool {
        self.power_timer > 0 || self.grace_timer > 0
    }

    /// Back to the spawn point, standing still, with a grace window
    pub fn respawn(&mut self, grace_ticks: u32) {
        self.pos = self.spawn;
        self.dir = None;
        self.desired = None;
        self.grace_timer = grace_ticks;
    }

    /// Heading as a vector (zero when standing still)
    pub fn heading(&self) -> Vec2 {
        self.dir.map_or(Vec2::ZERO, Direction::as_vec2)
    }
}

/// An enemy character
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub behavior: Behavior,
    pub hue: Hue,
    pub pos: Vec2,
    /// Axis-aligned unit travel direction
    pub heading: Vec2,
    /// Unit vector the behavior policy wants to follow; travel takes the open
    /// axis closest to it at each cell centre
    pub aim: Vec2,
    /// Pixels per tick before the frightened factor
    pub base_speed: f32,
    /// Mirror of `player.power_timer > 0`
    pub frightened: bool,
    pub spawn: Vec2,
    /// Ticks until the policy may pick a new heading
    pub retarget_ticks: u32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, spawn: Vec2, base_speed: f32) -> Self {
        Self {
            id,
            behavior: kind.behavior,
            hue: kind.hue,
            pos: spawn,
            heading: Vec2::NEG_Y,
            aim: Vec2::NEG_Y,
            base_speed,
            frightened: false,
            spawn,
            retarget_ticks: 0,
        }
    }

    #[inline]
    pub fn cell(&self) -> IVec2 {
        cell_of(self.pos)
    }

    /// Base speed, halved (by default) while frightened
    pub fn effective_speed(&self, frightened_factor: f32) -> f32 {
        if self.frightened {
            self.base_speed * frightened_factor
        } else {
            self.base_speed
        }
    }

    /// Return to the spawn point with cleared scratch state
    pub fn respawn(&mut self) {
        self.pos = self.spawn;
        self.heading = Vec2::NEG_Y;
        self.aim = Vec2::NEG_Y;
        self.frightened = false;
        self.retarget_ticks = 0;
    }
}

/// A short-lived visual effect particle (not gameplay-affecting)
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub life: u32,
    pub max_life: u32,
    /// `life / max_life`, refreshed as the particle ages
    pub alpha: f32,
    pub hue: Hue,
    pub radius: f32,
}

/// Notable things that happened during one tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    PelletEaten { cell: IVec2 },
    PowerPelletEaten { cell: IVec2 },
    EnemyEaten { id: u32 },
    LifeLost { lives_left: u8 },
    LevelComplete { level: u32 },
    GameOver { score: u64, new_high_score: bool },
    Restarted,
}

/// Complete session state (deterministic for a given seed and input script)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed of the current run
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub layout: MazeLayout,
    pub phase: GamePhase,
    pub score: u64,
    /// 1-based level
    pub level: u32,
    pub lives: u8,
    /// Best score known to this session (persisted by the host)
    pub high_score: u64,
    pub pellets_eaten: usize,
    pub total_pellets: usize,
    /// Simulation steps executed (pause does not advance it)
    pub time_ticks: u64,
    pub maze: MazeGrid,
    pub player: Player,
    /// Sorted by id
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session on the built-in maze with default tuning
    pub fn new(seed: u64, high_score: u64) -> Self {
        Self::with_layout(seed, MazeLayout::builtin(), Tuning::default(), high_score)
    }

    /// New session on a custom layout
    pub fn with_layout(seed: u64, layout: MazeLayout, tuning: Tuning, high_score: u64) -> Self {
        let player = Player::new(cell_center(layout.player_spawn()), tuning.player_speed);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            maze: layout.build_grid(),
            total_pellets: layout.total_pellets(),
            layout,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            lives: tuning.start_lives,
            high_score,
            pellets_eaten: 0,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            tuning,
        };
        state.generate_level();
        state
    }

    /// Rebuild the maze, player and enemies for the current level
    pub fn generate_level(&mut self) {
        self.maze = self.layout.build_grid();
        self.pellets_eaten = 0;
        self.total_pellets = self.maze.remaining_pellets();

        self.player.speed = self.tuning.player_speed;
        self.player.power_timer = 0;
        // Grace is only granted after a death
        self.player.respawn(0);

        let count = enemy_count_for_level(self.level);
        let spawns = self.layout.enemy_spawns();
        self.enemies = (0..count)
            .map(|i| {
                let kind = ENEMY_KINDS[i % ENEMY_KINDS.len()];
                let spawn = cell_center(spawns[i % spawns.len()]);
                let speed = self.tuning.enemy_speed(kind.speed, self.level);
                Enemy::new(i as u32, kind, spawn, speed)
            })
            .collect();

        self.particles.clear();
    }

    /// Idle -> Running
    pub fn start(&mut self) {
        if self.phase == GamePhase::Idle {
            self.phase = GamePhase::Running;
            self.events.push(GameEvent::Started);
        }
    }

    /// Reinitialize the run in place, keeping the high score, and start it
    pub fn restart(&mut self) {
        let seed = self.rng.random::<u64>();
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0;
        self.level = 1;
        self.lives = self.tuning.start_lives;
        self.time_ticks = 0;
        self.generate_level();
        self.phase = GamePhase::Idle;
        self.events.push(GameEvent::Restarted);
        self.start();
    }

    /// Record a finished run against the best score
    pub(crate) fn finish(&mut self) {
        self.phase = GamePhase::GameOver;
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        log::info!(
            "Game over: score {} on level {} (best {})",
            self.score,
            self.level,
            self.high_score
        );
        self.events.push(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
    }

    /// Logical size of the play field in pixels
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.maze.width() as f32, self.maze.height() as f32) * TILE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let state = GameState::new(7, 1234);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!((state.score, state.level, state.lives), (0, 1, 3));
        assert_eq!(state.high_score, 1234);
        assert_eq!(state.total_pellets, 205);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.player.pos, cell_center(IVec2::new(14, 11)));
        assert!(!state.player.invulnerable());
        assert_eq!(state.field_size(), Vec2::new(600.0, 340.0));
    }

    #[test]
    fn test_enemy_count_scales_and_caps() {
        assert_eq!(enemy_count_for_level(1), 2);
        assert_eq!(enemy_count_for_level(2), 3);
        assert_eq!(enemy_count_for_level(4), 4);
        assert_eq!(enemy_count_for_level(40), 4);
    }

    #[test]
    fn test_enemy_roster_order_and_speed() {
        let mut state = GameState::new(1, 0);
        state.level = 4;
        state.generate_level();
        let behaviors: Vec<_> = state.enemies.iter().map(|e| e.behavior).collect();
        assert_eq!(
            behaviors,
            vec![
                Behavior::Chase,
                Behavior::Patrol,
                Behavior::Random,
                Behavior::Ambush
            ]
        );
        // Three levels of +0.2 on the chaser's 1.5
        assert!((state.enemies[0].base_speed - 2.1).abs() < 1e-5);
    }

    #[test]
    fn test_invulnerable_from_power_or_grace() {
        let mut player = Player::new(Vec2::ZERO, 2.0);
        assert!(!player.invulnerable());
        player.grace_timer = 1;
        assert!(player.invulnerable() && !player.powered());
        player.grace_timer = 0;
        player.power_timer = 5;
        assert!(player.invulnerable() && player.powered());
    }

    #[test]
    fn test_frightened_halves_speed() {
        let mut enemy = Enemy::new(0, ENEMY_KINDS[0], Vec2::ZERO, 1.5);
        assert_eq!(enemy.effective_speed(0.5), 1.5);
        enemy.frightened = true;
        assert_eq!(enemy.effective_speed(0.5), 0.75);
        enemy.respawn();
        assert!(!enemy.frightened);
    }

    #[test]
    fn test_restart_keeps_high_score() {
        let mut state = GameState::new(3, 0);
        state.start();
        state.score = 4200;
        state.level = 3;
        state.lives = 0;
        state.finish();
        assert_eq!(state.high_score, 4200);

        state.restart();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!((state.score, state.level, state.lives), (0, 1, 3));
        assert_eq!(state.high_score, 4200);
        assert_eq!(state.maze.remaining_pellets(), state.total_pellets);
    }

    #[test]
    fn test_direction_vectors() {
        for dir in Direction::ALL {
            assert_eq!(dir.as_vec2() + dir.opposite().as_vec2(), Vec2::ZERO);
            assert_eq!(dir.as_vec2().length(), 1.0);
        }
        assert_eq!(Direction::Up.as_ivec2(), IVec2::new(0, -1));
    }
}
