//! Field module - the settled-cube arena and collision oracle
//!
//! Settled cubes live in a flat `Vec` arena; identity is the arena index.
//! The collision oracle works on the continuously falling pivot, so the y
//! test is a strict less-than-one-unit proximity check rather than equality.
//! x and z are lattice-snapped integers, where proximity degenerates to
//! equality.

use crate::core::pieces::PieceShape;
use crate::types::{CubeColor, GRID_DEPTH, GRID_WIDTH};

/// A settled, immovable unit cube on the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: CubeColor,
}

/// The settled-cube field.
///
/// Invariant (checked by the cascade resolver's tests, not at runtime):
/// no two cubes occupy the same coordinate at rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Field {
    cubes: Vec<Cube>,
}

impl Field {
    /// Create a new empty field
    pub fn new() -> Self {
        Self { cubes: Vec::new() }
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub(crate) fn cubes_mut(&mut self) -> &mut Vec<Cube> {
        &mut self.cubes
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Append a settled cube.
    pub fn push(&mut self, cube: Cube) {
        self.cubes.push(cube);
    }

    /// Remove every cube.
    pub fn clear(&mut self) {
        self.cubes.clear();
    }

    /// Highest settled y, or None for an empty field.
    pub fn max_y(&self) -> Option<i32> {
        self.cubes.iter().map(|c| c.y).max()
    }

    /// The cube resting at an exact lattice coordinate, if any.
    pub fn cube_at(&self, x: i32, y: i32, z: i32) -> Option<&Cube> {
        self.cubes
            .iter()
            .find(|c| c.x == x && c.y == y && c.z == z)
    }

    /// Whether a pivot x sits inside the lattice columns.
    pub fn x_in_bounds(x: i32) -> bool {
        (0..GRID_WIDTH).contains(&x)
    }

    /// Whether a pivot z sits inside the lattice rows.
    pub fn z_in_bounds(z: i32) -> bool {
        (0..GRID_DEPTH).contains(&z)
    }

    /// Whether every cube of a piece at pivot x stays within the columns.
    pub fn shape_x_in_bounds(x: i32, shape: &PieceShape) -> bool {
        shape.iter().all(|&(dx, _)| Self::x_in_bounds(x + dx as i32))
    }

    /// Collision oracle: is a piece placement blocked by settled cubes?
    ///
    /// For every offset cube the candidate is blocked if some settled cube
    /// lies strictly within one unit on all three axes. The y axis carries
    /// the sub-lattice fall position, so overlap there is a fractional band.
    pub fn is_blocked(&self, x: i32, y: f32, z: i32, shape: &PieceShape) -> bool {
        shape.iter().any(|&(dx, dy)| {
            let cx = x + dx as i32;
            let cy = y + dy as f32;
            self.cubes.iter().any(|cube| {
                cube.x == cx && cube.z == z && (cube.y as f32 - cy).abs() < 1.0
            })
        })
    }
}
