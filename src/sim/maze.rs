//! Fixed-tile maze grid and the textual layouts it is built from
//!
//! Layout characters:
//! - `#` wall
//! - `.` pellet
//! - `o` power pellet
//! - ` ` empty floor
//! - `T` tunnel mouth (empty; marks its row as a wraparound row)
//! - `P` player spawn (empty)
//! - `G` enemy spawn (empty)

use glam::IVec2;

use crate::error::LayoutError;

/// Classification of one maze cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    Wall,
    #[default]
    Empty,
    Pellet,
    PowerPellet,
}

impl Tile {
    #[inline]
    pub fn is_pellet(self) -> bool {
        matches!(self, Tile::Pellet | Tile::PowerPellet)
    }
}

/// The built-in maze: 30x17 tiles, tunnel on row 7
pub const DEFAULT_LAYOUT: [&str; 17] = [
    "##############################",
    "#.............##.............#",
    "#o####.#####..##..#####.####o#",
    "#............................#",
    "#.####.##.##########.##.####.#",
    "#......##....####....##......#",
    "######.##### #### #####.######",
    "T     .                .     T",
    "######.## ## GGGG ## ##.######",
    "#............####............#",
    "#.####.#####.####.#####.####.#",
    "#o..##........P.........##..o#",
    "###.##.##.##########.##.##.###",
    "#......##....####....##......#",
    "#.##########.####.##########.#",
    "#............................#",
    "##############################",
];

/// Tile map with pellet bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGrid {
    width: i32,
    height: i32,
    /// Row-major tiles
    tiles: Vec<Tile>,
    /// Rows whose side exits wrap horizontally
    tunnel_rows: Vec<i32>,
    /// Pellets + power pellets still on the board
    remaining: usize,
}

impl MazeGrid {
    /// Build a grid from row-major tiles; `tiles.len()` must be `width * height`
    pub fn new(width: usize, height: usize, tiles: Vec<Tile>, tunnel_rows: Vec<i32>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        let remaining = tiles.iter().filter(|t| t.is_pellet()).count();
        Self {
            width: width as i32,
            height: height as i32,
            tiles,
            tunnel_rows,
            remaining,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tunnel_rows(&self) -> &[i32] {
        &self.tunnel_rows
    }

    #[inline]
    pub fn is_tunnel_row(&self, row: i32) -> bool {
        self.tunnel_rows.contains(&row)
    }

    /// Resolve a cell to an in-bounds index, wrapping columns on tunnel rows
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if row < 0 || row >= self.height {
            return None;
        }
        let col = if (0..self.width).contains(&col) {
            col
        } else if self.is_tunnel_row(row) {
            col.rem_euclid(self.width)
        } else {
            return None;
        };
        Some((row * self.width + col) as usize)
    }

    /// Tile at a cell; out of bounds is `Wall` except across tunnel rows
    pub fn tile_at(&self, col: i32, row: i32) -> Tile {
        self.index(col, row).map_or(Tile::Wall, |i| self.tiles[i])
    }

    #[inline]
    pub fn tile_at_cell(&self, cell: IVec2) -> Tile {
        self.tile_at(cell.x, cell.y)
    }

    #[inline]
    pub fn is_walkable(&self, col: i32, row: i32) -> bool {
        self.tile_at(col, row) != Tile::Wall
    }

    #[inline]
    pub fn is_walkable_cell(&self, cell: IVec2) -> bool {
        self.is_walkable(cell.x, cell.y)
    }

    /// Remove a pellet or power pellet, returning what was there.
    ///
    /// Returns `Tile::Empty` when the cell held no pellet.
    pub fn consume_pellet(&mut self, col: i32, row: i32) -> Tile {
        let Some(i) = self.index(col, row) else {
            return Tile::Empty;
        };
        let tile = self.tiles[i];
        if tile.is_pellet() {
            self.tiles[i] = Tile::Empty;
            self.remaining -= 1;
            tile
        } else {
            Tile::Empty
        }
    }

    /// Pellets and power pellets left on the board
    #[inline]
    pub fn remaining_pellets(&self) -> usize {
        self.remaining
    }

    /// Full scan of the board; always equal to `remaining_pellets`
    pub fn count_pellets(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_pellet()).count()
    }

    /// Iterate over `(cell, tile)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        self.tiles.iter().enumerate().map(|(i, &tile)| {
            let i = i as i32;
            (IVec2::new(i % self.width, i / self.width), tile)
        })
    }
}

/// Parsed level blueprint: the grid plus spawn points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeLayout {
    grid: MazeGrid,
    player_spawn: IVec2,
    enemy_spawns: Vec<IVec2>,
}

impl MazeLayout {
    /// Parse textual rows into a layout
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, LayoutError> {
        let first = rows.first().ok_or(LayoutError::Empty)?;
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        let mut tunnel_rows = Vec::new();
        let mut player_spawns = Vec::new();
        let mut enemy_spawns = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let cell = IVec2::new(col as i32, row as i32);
                let tile = match ch {
                    '#' => Tile::Wall,
                    '.' => Tile::Pellet,
                    'o' => Tile::PowerPellet,
                    ' ' => Tile::Empty,
                    'T' => {
                        if tunnel_rows.last() != Some(&(row as i32)) {
                            tunnel_rows.push(row as i32);
                        }
                        Tile::Empty
                    }
                    'P' => {
                        player_spawns.push(cell);
                        Tile::Empty
                    }
                    'G' => {
                        enemy_spawns.push(cell);
                        Tile::Empty
                    }
                    _ => return Err(LayoutError::UnknownCharacter { ch, col, row }),
                };
                tiles.push(tile);
            }
        }

        let player_spawn = match player_spawns.as_slice() {
            [] => return Err(LayoutError::MissingPlayerSpawn),
            [spawn] => *spawn,
            many => return Err(LayoutError::DuplicatePlayerSpawn(many.len())),
        };
        if enemy_spawns.is_empty() {
            return Err(LayoutError::MissingEnemySpawns);
        }

        Ok(Self {
            grid: MazeGrid::new(width, rows.len(), tiles, tunnel_rows),
            player_spawn,
            enemy_spawns,
        })
    }

    /// The built-in maze
    pub fn builtin() -> Self {
        match Self::parse(&DEFAULT_LAYOUT) {
            Ok(layout) => layout,
            Err(e) => unreachable!("built-in layout is invalid: {e}"),
        }
    }

    /// A fresh copy of the level's grid, all pellets restored
    pub fn build_grid(&self) -> MazeGrid {
        self.grid.clone()
    }

    pub fn player_spawn(&self) -> IVec2 {
        self.player_spawn
    }

    pub fn enemy_spawns(&self) -> &[IVec2] {
        &self.enemy_spawns
    }

    /// Pellets (of both kinds) at level start
    pub fn total_pellets(&self) -> usize {
        self.grid.remaining_pellets()
    }
}

impl Default for MazeLayout {
    fn default() -> Self {
        Self::builtin()
    }
}
