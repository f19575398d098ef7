//! Voxfall: a terminal 3D falling-cube puzzle.
//!
//! Pieces of four colored cubes fall into a 12x12 well. Landed cubes settle
//! onto an integer lattice; same-color groups of three or more (6-neighborhood
//! adjacency) clear and everything above re-settles, cascading until stable.
//!
//! `core` is pure game logic; `term`, `input` and `persist` are presentation
//! and I/O glue around it.

pub mod core;
pub mod input;
pub mod persist;
pub mod term;
pub mod types;
