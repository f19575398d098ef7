//! Pieces module - the piece catalog
//!
//! Each of the 7 shape families has one or more precomputed rotation
//! variants, each a list of exactly 4 (x, y) cube offsets from the pivot.
//! A rotation variant is chosen at spawn time and is fixed for the piece's
//! lifetime; there is no in-flight rotation.

use crate::core::rng::SimpleRng;
use crate::types::{CubeColor, ShapeKind};

/// Offset of a single cube relative to the piece pivot
pub type CubeOffset = (i8, i8);

/// Shape of a piece - 4 cube offsets from the pivot
pub type PieceShape = [CubeOffset; 4];

/// A falling piece: one shape variant plus a color per cube.
///
/// Colors are drawn independently per cube. A single shared color would make
/// every landed piece an instant match of four, clearing itself on contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    pub shape: PieceShape,
    pub colors: [CubeColor; 4],
}

/// Get all rotation variants for a shape family
pub fn variants(kind: ShapeKind) -> &'static [PieceShape] {
    match kind {
        ShapeKind::I => &I_VARIANTS,
        ShapeKind::O => &O_VARIANTS,
        ShapeKind::T => &T_VARIANTS,
        ShapeKind::L => &L_VARIANTS,
        ShapeKind::J => &J_VARIANTS,
        ShapeKind::S => &S_VARIANTS,
        ShapeKind::Z => &Z_VARIANTS,
    }
}

const I_VARIANTS: [PieceShape; 2] = [
    // vertical
    [(0, 0), (0, 1), (0, 2), (0, 3)],
    // horizontal
    [(0, 0), (1, 0), (2, 0), (3, 0)],
];

const O_VARIANTS: [PieceShape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const T_VARIANTS: [PieceShape; 4] = [
    [(0, 0), (1, 0), (2, 0), (1, 1)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (1, 1), (0, 2)],
];

const L_VARIANTS: [PieceShape; 4] = [
    [(0, 0), (0, 1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (2, 0), (0, 1)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
    [(0, 0), (1, 0), (2, 0), (2, 1)],
];

const J_VARIANTS: [PieceShape; 4] = [
    [(1, 0), (1, 1), (1, 2), (0, 2)],
    [(0, 0), (1, 0), (2, 0), (2, 1)],
    [(0, 0), (1, 0), (0, 1), (0, 2)],
    [(0, 0), (1, 0), (2, 0), (0, 1)],
];

const S_VARIANTS: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_VARIANTS: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

/// Spawn a random piece: uniform shape family, uniform rotation variant
/// within the family, each cube colored uniformly from the 6-color palette.
pub fn spawn_piece(rng: &mut SimpleRng) -> FallingPiece {
    let kind = ShapeKind::ALL[rng.next_range(ShapeKind::ALL.len() as u32) as usize];
    let family = variants(kind);
    let shape = family[rng.next_range(family.len() as u32) as usize];
    let mut colors = [CubeColor::Red; 4];
    for color in &mut colors {
        *color = CubeColor::ALL[rng.next_range(CubeColor::ALL.len() as u32) as usize];
    }
    FallingPiece { shape, colors }
}
