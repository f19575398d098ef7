//! Terminal rendering layer.
//!
//! The 3D well is shown as two orthographic projections drawn into a
//! character framebuffer: a front elevation (x across, y up) and a top-down
//! plan (x across, z down). The framebuffer is flushed to the terminal with
//! diff redraws.
//!
//! `game_view` is pure (state in, framebuffer out) so layout and projection
//! logic stay unit-testable; `renderer` owns the actual terminal I/O.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{ControlPad, GameView, Viewport};
pub use renderer::TerminalRenderer;
