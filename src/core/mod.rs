//! Core module - pure game logic with no external dependencies
//!
//! This module contains the voxel-grid engine: piece catalog, collision
//! oracle, piece/field state machine, match engine and cascade resolver.
//! It has zero dependencies on UI, persistence, or I/O.

pub mod cascade;
pub mod field;
pub mod game_state;
pub mod matcher;
pub mod pieces;
pub mod rng;

// Re-export commonly used types
pub use cascade::{resolve_cascades, CascadeOutcome};
pub use field::{Cube, Field};
pub use game_state::{ActivePiece, GameState, TickEvent};
pub use matcher::find_matches;
pub use pieces::{spawn_piece, FallingPiece, PieceShape};
pub use rng::SimpleRng;
