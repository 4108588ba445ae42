//! Wall probing and contact checks
//!
//! Movement is validated before it is committed: a step is allowed only when
//! both the new centre and the leading edge (centre pushed half a tile along
//! the heading) land on walkable tiles. Starting from a walkable cell this
//! keeps every entity's centre off walls, and an axis-aligned mover stops
//! exactly at the centre of the last open cell.

use glam::Vec2;

use super::maze::MazeGrid;
use crate::cell_of;
use crate::consts::TILE_SIZE;

/// Leading-edge reach; just short of half a tile so a mover can sit exactly on a centre
const LEAD: f32 = TILE_SIZE / 2.0 - 0.01;

/// Result of a move check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveCheck {
    /// Whether the step may be committed
    pub clear: bool,
    /// Position after the step (before tunnel wrapping)
    pub to: Vec2,
}

impl MoveCheck {
    pub fn blocked(from: Vec2) -> Self {
        Self {
            clear: false,
            to: from,
        }
    }
}

/// Check whether stepping `step` pixels along the unit `heading` stays off walls
pub fn check_move(maze: &MazeGrid, pos: Vec2, heading: Vec2, step: f32) -> MoveCheck {
    if heading == Vec2::ZERO || step <= 0.0 {
        return MoveCheck::blocked(pos);
    }
    let to = pos + heading * step;
    let lead = to + heading * LEAD;

    if maze.is_walkable_cell(cell_of(to)) && maze.is_walkable_cell(cell_of(lead)) {
        MoveCheck { clear: true, to }
    } else {
        MoveCheck::blocked(pos)
    }
}

/// Wrap a position horizontally when it sits on a tunnel row
pub fn wrap_tunnel(maze: &MazeGrid, pos: Vec2) -> Vec2 {
    let row = cell_of(pos).y;
    if !maze.is_tunnel_row(row) {
        return pos;
    }
    let width = maze.width() as f32 * TILE_SIZE;
    let x = pos.x.rem_euclid(width);
    Vec2::new(x, pos.y)
}

/// Circle contact between two entity centres
#[inline]
pub fn in_contact(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}
