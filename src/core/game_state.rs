//! Game state module - the piece/field state machine
//!
//! Owns the active piece, its position, the settled-cube field, the score
//! and the best score. One `tick` call per rendered frame advances gravity;
//! movement commands apply synchronously between ticks. There are no
//! ambient globals; everything routes through one `GameState` value.

use arrayvec::ArrayVec;

use crate::core::cascade::resolve_cascades;
use crate::core::field::{Cube, Field};
use crate::core::pieces::{spawn_piece, FallingPiece, PieceShape};
use crate::core::rng::SimpleRng;
use crate::types::{
    CubeColor, GameAction, CEILING_Y, FALL_SPEED, FLOOR_Y, GRID_DEPTH, GRID_WIDTH, SPAWN_X,
    SPAWN_Y, SPAWN_Z,
};

/// The active falling piece and its pivot position.
///
/// x and z are lattice-snapped; y falls continuously until landing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePiece {
    pub shape: PieceShape,
    pub colors: [CubeColor; 4],
    pub x: i32,
    pub y: f32,
    pub z: i32,
}

impl ActivePiece {
    fn spawned(piece: FallingPiece) -> Self {
        Self {
            shape: piece.shape,
            colors: piece.colors,
            x: SPAWN_X,
            y: SPAWN_Y,
            z: SPAWN_Z,
        }
    }
}

/// What happened during the last state-changing tick (consumed by observers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickEvent {
    /// The active piece merged into the field this tick.
    pub landed: bool,
    /// Cubes removed by the cascade triggered by this landing.
    pub cubes_cleared: u32,
    /// Match passes in that cascade.
    pub cascade_passes: u32,
    /// The stack reached the ceiling; field and score were reset.
    pub game_over: bool,
    /// Score at the instant before any game-over reset.
    pub final_score: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    field: Field,
    active: Option<ActivePiece>,
    rng: SimpleRng,
    score: u32,
    best_score: u32,
    last_event: Option<TickEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed and a previously
    /// persisted best score (0 when none was stored).
    pub fn new(seed: u32, best_score: u32) -> Self {
        Self {
            field: Field::new(),
            active: None,
            rng: SimpleRng::new(seed),
            score: 0,
            best_score,
            last_event: None,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Take and clear the last landing/clear/game-over event.
    pub fn take_last_event(&mut self) -> Option<TickEvent> {
        self.last_event.take()
    }

    /// Absolute lattice cells of the active piece at its snapped y
    /// (for rendering).
    pub fn active_cells(&self) -> Option<[Cube; 4]> {
        self.active.map(|active| piece_cells(&active, snap_y(active.y)))
    }

    #[cfg(test)]
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    #[cfg(test)]
    pub fn set_active(&mut self, active: ActivePiece) {
        self.active = Some(active);
    }

    /// Advance one frame of gravity.
    ///
    /// Empty -> spawn; Falling -> decrement y or land. The landing test runs
    /// against the candidate (post-decrement) position before committing it,
    /// so the piece never overlaps the field even transiently.
    pub fn tick(&mut self) {
        let Some(active) = self.active else {
            self.active = Some(ActivePiece::spawned(spawn_piece(&mut self.rng)));
            return;
        };

        let candidate_y = active.y - FALL_SPEED;
        if candidate_y < FLOOR_Y
            || self
                .field
                .is_blocked(active.x, candidate_y, active.z, &active.shape)
        {
            self.land(active);
        } else {
            self.active = Some(ActivePiece {
                y: candidate_y,
                ..active
            });
        }
    }

    /// Merge the active piece into the field, resolve cascades, and check
    /// for game-over. The piece lands at its last unblocked position with
    /// y snapped to the lattice.
    fn land(&mut self, active: ActivePiece) {
        let merged: ArrayVec<Cube, 4> = piece_cells(&active, snap_y(active.y)).into_iter().collect();
        for cube in merged {
            self.field.push(cube);
        }

        let outcome = resolve_cascades(&mut self.field);
        self.score += outcome.cubes_removed;
        if self.score > self.best_score {
            self.best_score = self.score;
        }

        self.active = None;

        let mut event = TickEvent {
            landed: true,
            cubes_cleared: outcome.cubes_removed,
            cascade_passes: outcome.passes,
            game_over: false,
            final_score: self.score,
        };

        // Game-over: the settled stack reached the ceiling. Field, score and
        // active piece reset in one step; the event carries the final score.
        if self.field.max_y().is_some_and(|y| y >= CEILING_Y) {
            event.game_over = true;
            self.field.clear();
            self.score = 0;
        }

        self.last_event = Some(event);
    }

    /// Shift the pivot one lattice unit, clamped to the grid. Blocked
    /// candidates (field collision or an offset cell leaving the columns)
    /// are silent no-ops.
    fn try_shift(&mut self, dx: i32, dz: i32) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let nx = (active.x + dx).clamp(0, GRID_WIDTH - 1);
        let nz = (active.z + dz).clamp(0, GRID_DEPTH - 1);
        if nx == active.x && nz == active.z {
            return false;
        }
        if !Field::shape_x_in_bounds(nx, &active.shape) {
            return false;
        }
        if self.field.is_blocked(nx, active.y, nz, &active.shape) {
            return false;
        }

        self.active = Some(ActivePiece {
            x: nx,
            z: nz,
            ..active
        });
        true
    }

    /// Fast-descend one lattice unit (a nudge, not a hard drop).
    fn try_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let ny = (active.y - 1.0).max(FLOOR_Y);
        if self.field.is_blocked(active.x, ny, active.z, &active.shape) {
            return false;
        }

        self.active = Some(ActivePiece { y: ny, ..active });
        true
    }

    /// Reset to an empty field with score zero. The best score survives.
    fn restart(&mut self) {
        self.field.clear();
        self.active = None;
        self.score = 0;
        self.last_event = None;
    }

    /// Apply a game action. Returns whether state changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_shift(-1, 0),
            GameAction::MoveRight => self.try_shift(1, 0),
            GameAction::MoveForward => self.try_shift(0, -1),
            GameAction::MoveBackward => self.try_shift(0, 1),
            GameAction::Drop => self.try_drop(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

/// Snap a continuous fall position to the nearest lattice step, never
/// below the floor cell.
fn snap_y(y: f32) -> i32 {
    (y.round() as i32).max(0)
}

/// Absolute cells of a piece with its pivot at an integer y.
fn piece_cells(active: &ActivePiece, pivot_y: i32) -> [Cube; 4] {
    let mut cells = [Cube {
        x: 0,
        y: 0,
        z: 0,
        color: active.colors[0],
    }; 4];
    for (i, (cell, &(dx, dy))) in cells.iter_mut().zip(active.shape.iter()).enumerate() {
        cell.x = active.x + dx as i32;
        cell.y = pivot_y + dy as i32;
        cell.z = active.z;
        cell.color = active.colors[i];
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MIN_MATCH_SIZE;

    const BAR: PieceShape = [(0, 0), (1, 0), (2, 0), (3, 0)];
    const SQUARE: PieceShape = [(0, 0), (1, 0), (0, 1), (1, 1)];

    /// Alternating colors so a piece never matches against itself.
    const MIXED: [CubeColor; 4] = [
        CubeColor::Red,
        CubeColor::Green,
        CubeColor::Red,
        CubeColor::Green,
    ];

    fn state_with_piece(x: i32, y: f32, z: i32, shape: PieceShape, colors: [CubeColor; 4]) -> GameState {
        let mut state = GameState::new(1, 0);
        state.set_active(ActivePiece {
            shape,
            colors,
            x,
            y,
            z,
        });
        state
    }

    /// Tick until the current piece lands (bounded to keep failures loud).
    fn tick_to_landing(state: &mut GameState) -> TickEvent {
        for _ in 0..100_000 {
            state.tick();
            if let Some(event) = state.take_last_event() {
                return event;
            }
        }
        panic!("piece never landed");
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345, 42);
        assert!(state.active().is_none());
        assert!(state.field().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), 42);
    }

    #[test]
    fn test_first_tick_spawns_at_top_center() {
        let mut state = GameState::new(12345, 0);
        state.tick();
        let active = state.active().unwrap();
        assert_eq!(active.x, SPAWN_X);
        assert_eq!(active.z, SPAWN_Z);
        assert_eq!(active.y, SPAWN_Y);
    }

    #[test]
    fn test_tick_decrements_y_by_fall_speed() {
        let mut state = GameState::new(12345, 0);
        state.tick();
        let y0 = state.active().unwrap().y;
        state.tick();
        let y1 = state.active().unwrap().y;
        assert!((y0 - y1 - FALL_SPEED).abs() < 1e-6);
    }

    #[test]
    fn test_bar_lands_flat_on_floor() {
        let mut state = state_with_piece(2, 5.0, 6, BAR, MIXED);
        let event = tick_to_landing(&mut state);

        assert!(event.landed);
        assert!(!event.game_over);
        assert_eq!(event.cubes_cleared, 0);
        assert_eq!(state.field().len(), 4);
        for x in 2..6 {
            assert!(
                state.field().cube_at(x, 0, 6).is_some(),
                "expected cube at ({x}, 0, 6)"
            );
        }
        assert!(state.active().is_none());
    }

    #[test]
    fn test_piece_stacks_one_above_settled_cube() {
        let column = [(0, 0), (0, 1), (0, 2), (0, 3)];
        let mut state = state_with_piece(4, 6.0, 4, column, MIXED);
        state.field_mut().push(Cube {
            x: 4,
            y: 0,
            z: 4,
            color: CubeColor::Blue,
        });
        tick_to_landing(&mut state);

        // The column rests directly on the blue cube, no overlap, no gap.
        for y in 1..=4 {
            assert!(state.field().cube_at(4, y, 4).is_some());
        }
        assert_eq!(state.field().len(), 5);
    }

    #[test]
    fn test_landing_triggers_match_and_scores() {
        // One red cube on the floor; a square with two red bottom cubes
        // completes a component of three.
        let colors = [
            CubeColor::Red,
            CubeColor::Red,
            CubeColor::Blue,
            CubeColor::Green,
        ];
        let mut state = state_with_piece(2, 3.0, 6, SQUARE, colors);
        state.field_mut().push(Cube {
            x: 1,
            y: 0,
            z: 6,
            color: CubeColor::Red,
        });
        let event = tick_to_landing(&mut state);

        assert_eq!(event.cubes_cleared as usize, MIN_MATCH_SIZE);
        assert_eq!(state.score(), event.cubes_cleared);
        assert_eq!(state.best_score(), event.cubes_cleared);
        // The two off-color cubes settle onto the floor.
        assert_eq!(state.field().len(), 2);
        assert!(state.field().cube_at(2, 0, 6).is_some());
        assert!(state.field().cube_at(3, 0, 6).is_some());
    }

    #[test]
    fn test_move_left_right() {
        let mut state = state_with_piece(5, 10.0, 5, SQUARE, MIXED);
        assert!(state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active().unwrap().x, 4);
        assert!(state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active().unwrap().x, 5);
    }

    #[test]
    fn test_move_forward_backward() {
        let mut state = state_with_piece(5, 10.0, 5, SQUARE, MIXED);
        assert!(state.apply_action(GameAction::MoveForward));
        assert_eq!(state.active().unwrap().z, 4);
        assert!(state.apply_action(GameAction::MoveBackward));
        assert_eq!(state.active().unwrap().z, 5);
    }

    #[test]
    fn test_move_clamps_at_walls() {
        let mut state = state_with_piece(0, 10.0, 0, SQUARE, MIXED);
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active().unwrap().x, 0);
        assert!(!state.apply_action(GameAction::MoveForward));
        assert_eq!(state.active().unwrap().z, 0);
    }

    #[test]
    fn test_wide_piece_cannot_leave_columns() {
        // The bar occupies x..x+3; the pivot clamp alone would let an offset
        // cell poke through the wall.
        let mut state = state_with_piece(GRID_WIDTH - 4, 10.0, 5, BAR, MIXED);
        assert!(!state.apply_action(GameAction::MoveRight));
        assert_eq!(state.active().unwrap().x, GRID_WIDTH - 4);
    }

    #[test]
    fn test_blocked_move_is_a_no_op() {
        let mut state = state_with_piece(5, 3.0, 5, SQUARE, MIXED);
        state.field_mut().push(Cube {
            x: 4,
            y: 3,
            z: 5,
            color: CubeColor::Red,
        });
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.active().unwrap().x, 5);
    }

    #[test]
    fn test_drop_steps_one_unit() {
        let mut state = state_with_piece(5, 10.0, 5, SQUARE, MIXED);
        assert!(state.apply_action(GameAction::Drop));
        assert!((state.active().unwrap().y - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_drop_blocked_by_settled_cube() {
        let mut state = state_with_piece(5, 1.5, 5, SQUARE, MIXED);
        state.field_mut().push(Cube {
            x: 5,
            y: 0,
            z: 5,
            color: CubeColor::Red,
        });
        assert!(!state.apply_action(GameAction::Drop));
    }

    #[test]
    fn test_drop_clamps_at_floor() {
        let mut state = state_with_piece(5, 0.5, 5, SQUARE, MIXED);
        assert!(state.apply_action(GameAction::Drop));
        assert!(state.active().unwrap().y >= FLOOR_Y);
    }

    #[test]
    fn test_actions_without_active_piece_are_no_ops() {
        let mut state = GameState::new(1, 0);
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::Drop));
    }

    #[test]
    fn test_game_over_resets_in_one_step() {
        let mut state = GameState::new(1, 0);
        // A pillar one below the ceiling; the landing pushes past it. The
        // pillar alternates colors disjoint from the piece's so no match
        // fires on contact.
        for y in 0..CEILING_Y - 1 {
            state.field_mut().push(Cube {
                x: 5,
                y,
                z: 5,
                color: if y % 2 == 0 {
                    CubeColor::Cyan
                } else {
                    CubeColor::Magenta
                },
            });
        }
        state.set_active(ActivePiece {
            shape: SQUARE,
            colors: MIXED,
            x: 5,
            y: CEILING_Y as f32,
            z: 5,
        });
        let event = tick_to_landing(&mut state);

        assert!(event.game_over);
        assert!(state.field().is_empty());
        assert_eq!(state.score(), 0);
        assert!(state.active().is_none());
    }

    #[test]
    fn test_game_over_event_carries_final_score() {
        // Seed a score by clearing a match first.
        let colors = [
            CubeColor::Red,
            CubeColor::Red,
            CubeColor::Blue,
            CubeColor::Green,
        ];
        let mut state = state_with_piece(2, 3.0, 6, SQUARE, colors);
        state.field_mut().push(Cube {
            x: 1,
            y: 0,
            z: 6,
            color: CubeColor::Red,
        });
        let cleared = tick_to_landing(&mut state).cubes_cleared;
        assert!(cleared > 0);
        let score_before = state.score();

        // Now force a game-over landing in an untouched corner.
        for y in 0..CEILING_Y - 1 {
            state.field_mut().push(Cube {
                x: 9,
                y,
                z: 9,
                color: if y % 2 == 0 {
                    CubeColor::Cyan
                } else {
                    CubeColor::Magenta
                },
            });
        }
        state.set_active(ActivePiece {
            shape: SQUARE,
            colors: MIXED,
            x: 9,
            y: CEILING_Y as f32,
            z: 9,
        });
        let event = tick_to_landing(&mut state);

        assert!(event.game_over);
        assert_eq!(event.final_score, score_before);
        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), score_before);
    }

    #[test]
    fn test_respawn_after_landing() {
        let mut state = state_with_piece(2, 1.0, 6, BAR, MIXED);
        tick_to_landing(&mut state);
        assert!(state.active().is_none());
        state.tick();
        assert!(state.active().is_some());
    }

    #[test]
    fn test_restart_clears_everything_but_best() {
        let mut state = GameState::new(1, 77);
        state.field_mut().push(Cube {
            x: 0,
            y: 0,
            z: 0,
            color: CubeColor::Red,
        });
        state.tick(); // spawn
        assert!(state.apply_action(GameAction::Restart));
        assert!(state.field().is_empty());
        assert!(state.active().is_none());
        assert_eq!(state.score(), 0);
        assert_eq!(state.best_score(), 77);
    }

    #[test]
    fn test_active_cells_snap_to_lattice() {
        let state = state_with_piece(3, 4.7, 6, SQUARE, MIXED);
        let cells = state.active_cells().unwrap();
        assert!(cells.iter().any(|c| c.x == 3 && c.y == 5 && c.z == 6));
        assert!(cells.iter().any(|c| c.x == 4 && c.y == 6 && c.z == 6));
    }

    #[test]
    fn test_active_cells_keep_per_cube_colors() {
        let colors = [
            CubeColor::Red,
            CubeColor::Green,
            CubeColor::Blue,
            CubeColor::Yellow,
        ];
        let state = state_with_piece(3, 4.0, 6, SQUARE, colors);
        let cells = state.active_cells().unwrap();
        for (cell, color) in cells.iter().zip(colors) {
            assert_eq!(cell.color, color);
        }
    }
}
