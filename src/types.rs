//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Lattice dimensions (x and z). The y axis is bounded only by `CEILING_Y`.
pub const GRID_WIDTH: i32 = 12;
pub const GRID_DEPTH: i32 = 12;

/// Settled cubes rest at integer y in [0, CEILING_Y).
/// A settled cube at or above CEILING_Y ends the game.
pub const CEILING_Y: i32 = 20;

/// Floor plane for the continuously falling pivot.
pub const FLOOR_Y: f32 = 0.0;

/// Units of y lost per frame tick.
pub const FALL_SPEED: f32 = 0.04;

/// Frame tick period (milliseconds), ~60 FPS.
pub const TICK_MS: u32 = 16;

/// Spawn pivot: top center of the well.
pub const SPAWN_X: i32 = GRID_WIDTH / 2;
pub const SPAWN_Z: i32 = GRID_DEPTH / 2;
pub const SPAWN_Y: f32 = CEILING_Y as f32;

/// Smallest same-color component that clears.
pub const MIN_MATCH_SIZE: usize = 3;

/// How long the game-over banner stays up (frame ticks).
pub const GAME_OVER_BANNER_TICKS: u32 = 180;

/// Cube colors - the six-color palette every piece draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl CubeColor {
    /// All palette colors in catalog order.
    pub const ALL: [CubeColor; 6] = [
        CubeColor::Red,
        CubeColor::Green,
        CubeColor::Blue,
        CubeColor::Yellow,
        CubeColor::Magenta,
        CubeColor::Cyan,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            CubeColor::Red => "red",
            CubeColor::Green => "green",
            CubeColor::Blue => "blue",
            CubeColor::Yellow => "yellow",
            CubeColor::Magenta => "magenta",
            CubeColor::Cyan => "cyan",
        }
    }
}

/// Piece shape families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    /// All shape families in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Parse shape kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveForward,
    MoveBackward,
    Drop,
    Restart,
}

impl GameAction {
    /// Parse action from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "moveleft" => Some(GameAction::MoveLeft),
            "right" | "moveright" => Some(GameAction::MoveRight),
            "forward" | "moveforward" => Some(GameAction::MoveForward),
            "backward" | "movebackward" => Some(GameAction::MoveBackward),
            "drop" => Some(GameAction::Drop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "left",
            GameAction::MoveRight => "right",
            GameAction::MoveForward => "forward",
            GameAction::MoveBackward => "backward",
            GameAction::Drop => "drop",
            GameAction::Restart => "restart",
        }
    }
}
