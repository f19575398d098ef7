//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! The well is drawn twice: a front elevation (x across, y up, cube nearest
//! the viewer wins the cell) and a top-down plan (x across, z down, highest
//! cube wins). Portrait viewports additionally get a mouse-driven control
//! pad. This module is pure (no I/O) and unit-testable.

use crate::core::field::Cube;
use crate::core::GameState;
use crate::term::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{CubeColor, GameAction, CEILING_Y, GRID_DEPTH, GRID_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Tall-and-narrow viewports stack the views and show the control pad.
    pub fn is_portrait(&self) -> bool {
        u32::from(self.height) * 2 > u32::from(self.width)
    }
}

/// A rectangle in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.w && row >= self.y && row < self.y + self.h
    }
}

#[derive(Debug, Clone, Copy)]
struct PadButton {
    rect: Rect,
    action: GameAction,
    label: &'static str,
}

/// Mouse-clickable movement buttons shown on portrait viewports.
#[derive(Debug, Clone)]
pub struct ControlPad {
    buttons: Vec<PadButton>,
}

const BUTTON_W: u16 = 7;
const BUTTON_H: u16 = 3;

impl ControlPad {
    /// Build the pad with its top-left corner at (x, y).
    ///
    /// Layout: forward on top, left/backward/right in the middle row, a
    /// wide drop bar underneath.
    fn at(x: u16, y: u16) -> Self {
        let col = |i: u16| x + i * (BUTTON_W + 1);
        let row = |i: u16| y + i * BUTTON_H;
        let button = |cx: u16, cy: u16, w: u16, action, label| PadButton {
            rect: Rect {
                x: cx,
                y: cy,
                w,
                h: BUTTON_H,
            },
            action,
            label,
        };

        Self {
            buttons: vec![
                button(col(1), row(0), BUTTON_W, GameAction::MoveForward, "▲"),
                button(col(0), row(1), BUTTON_W, GameAction::MoveLeft, "◀"),
                button(col(1), row(1), BUTTON_W, GameAction::MoveBackward, "▼"),
                button(col(2), row(1), BUTTON_W, GameAction::MoveRight, "▶"),
                button(col(0), row(2), 3 * BUTTON_W + 2, GameAction::Drop, "DROP"),
            ],
        }
    }

    /// Total footprint of the pad.
    pub fn size() -> (u16, u16) {
        (3 * BUTTON_W + 2, 3 * BUTTON_H)
    }

    /// The action under a mouse click, if any.
    pub fn hit(&self, col: u16, row: u16) -> Option<GameAction> {
        self.buttons
            .iter()
            .find(|b| b.rect.contains(col, row))
            .map(|b| b.action)
    }
}

/// Per-projection cell contents: cube color plus whether the cube belongs
/// to the active piece.
type ProjCell = Option<(CubeColor, bool)>;

/// Rows in the front view: the well plus headroom so pieces are visible
/// from the moment they spawn at the ceiling.
pub const FRONT_ROWS: i32 = CEILING_Y + 4;

/// Front elevation: for each (x, y) column of sight, the cube nearest the
/// viewer (greatest z) wins. Indexed `[y][x]`.
pub fn front_projection(state: &GameState) -> Vec<Vec<ProjCell>> {
    let mut grid = vec![vec![None; GRID_WIDTH as usize]; FRONT_ROWS as usize];
    let mut depth = vec![vec![i32::MIN; GRID_WIDTH as usize]; FRONT_ROWS as usize];

    let mut place = |cube: &Cube, active: bool| {
        if !(0..GRID_WIDTH).contains(&cube.x) || !(0..FRONT_ROWS).contains(&cube.y) {
            return;
        }
        let (xi, yi) = (cube.x as usize, cube.y as usize);
        if cube.z >= depth[yi][xi] {
            depth[yi][xi] = cube.z;
            grid[yi][xi] = Some((cube.color, active));
        }
    };

    for cube in state.field().cubes() {
        place(cube, false);
    }
    if let Some(cells) = state.active_cells() {
        for cube in &cells {
            place(cube, true);
        }
    }
    grid
}

/// Top-down plan: for each (x, z) column, the highest cube wins.
/// Indexed `[z][x]`.
pub fn plan_projection(state: &GameState) -> Vec<Vec<ProjCell>> {
    let mut grid = vec![vec![None; GRID_WIDTH as usize]; GRID_DEPTH as usize];
    let mut height = vec![vec![i32::MIN; GRID_WIDTH as usize]; GRID_DEPTH as usize];

    let mut place = |cube: &Cube, active: bool| {
        if !(0..GRID_WIDTH).contains(&cube.x) || !(0..GRID_DEPTH).contains(&cube.z) {
            return;
        }
        let (xi, zi) = (cube.x as usize, cube.z as usize);
        if cube.y >= height[zi][xi] {
            height[zi][xi] = cube.y;
            grid[zi][xi] = Some((cube.color, active));
        }
    };

    for cube in state.field().cubes() {
        place(cube, false);
    }
    if let Some(cells) = state.active_cells() {
        for cube in &cells {
            place(cube, true);
        }
    }
    grid
}

/// Terminal renderer for the voxel well.
pub struct GameView {
    /// Well cell width in terminal columns.
    cell_w: u16,
    /// Well cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    fn front_frame_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w + 2,
            FRONT_ROWS as u16 * self.cell_h + 2,
        )
    }

    fn plan_frame_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w + 2,
            GRID_DEPTH as u16 * self.cell_h + 2,
        )
    }

    /// The control pad for a viewport, or None on landscape viewports
    /// (where the keyboard help panel is shown instead).
    pub fn control_pad(&self, viewport: Viewport) -> Option<ControlPad> {
        if !viewport.is_portrait() {
            return None;
        }
        let (pad_w, pad_h) = ControlPad::size();
        let x = viewport.width.saturating_sub(pad_w) / 2;
        let y = viewport.height.saturating_sub(pad_h + 1);
        Some(ControlPad::at(x, y))
    }

    /// Render the current game state into a framebuffer.
    ///
    /// `banner` is an optional overlay line (the main loop uses it for the
    /// game-over message, which outlives the state reset by a few seconds).
    pub fn render(&self, state: &GameState, viewport: Viewport, banner: Option<&str>) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (front_w, front_h) = self.front_frame_size();
        let (plan_w, plan_h) = self.plan_frame_size();

        // Portrait stacks the views and keeps the score on the top row,
        // clear of the control pad at the bottom.
        let (front_x, front_y, plan_x, plan_y, hud_x, hud_y) = if viewport.is_portrait() {
            let fx = viewport.width.saturating_sub(front_w) / 2;
            let px = viewport.width.saturating_sub(plan_w) / 2;
            (fx, 1, px, 1 + front_h, fx, 0)
        } else {
            let hud_w = 14;
            let total = front_w + 2 + plan_w + 2 + hud_w;
            let sx = viewport.width.saturating_sub(total) / 2;
            let sy = viewport.height.saturating_sub(front_h) / 2;
            (
                sx,
                sy,
                sx + front_w + 2,
                sy,
                sx + front_w + 2 + plan_w + 2,
                sy,
            )
        };

        let border = CellStyle::new(Rgb::gray(200), Rgb::gray(0));

        self.draw_frame(&mut fb, front_x, front_y, front_w, front_h, "FRONT", border);
        self.draw_projection(&mut fb, &front_projection(state), front_x, front_y, true);

        self.draw_frame(&mut fb, plan_x, plan_y, plan_w, plan_h, "TOP", border);
        self.draw_projection(&mut fb, &plan_projection(state), plan_x, plan_y, false);

        self.draw_hud(&mut fb, state, viewport, hud_x, hud_y);

        if let Some(pad) = self.control_pad(viewport) {
            draw_pad(&mut fb, &pad);
        }

        if let Some(text) = banner {
            self.draw_banner(&mut fb, front_x, front_y, front_w, front_h, text);
        }

        fb
    }

    fn draw_frame(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        title: &str,
        style: CellStyle,
    ) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);
        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }

        // Title inset into the top border.
        if (title.chars().count() as u16) + 2 < w {
            fb.put_str(x + 2, y, title, style.bold());
        }

        // Empty-cell dots inside the frame.
        let dots = CellStyle::new(Rgb::gray(90), Rgb::new(28, 28, 36)).dim();
        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, ' ', dots);
        for dy in 0..(h - 2) / self.cell_h {
            for dx in 0..(w - 2) / self.cell_w {
                fb.put_char(x + 1 + dx * self.cell_w, y + 1 + dy * self.cell_h, '·', dots);
            }
        }
    }

    /// Blit a projection grid into a frame. The front view flips rows so y
    /// grows upward on screen; the plan view draws z increasing downward,
    /// which makes "forward" move up the screen.
    fn draw_projection(
        &self,
        fb: &mut FrameBuffer,
        grid: &[Vec<ProjCell>],
        frame_x: u16,
        frame_y: u16,
        flip_rows: bool,
    ) {
        let rows = grid.len() as u16;
        for (gy, row) in grid.iter().enumerate() {
            for (gx, cell) in row.iter().enumerate() {
                let Some((color, active)) = cell else {
                    continue;
                };
                let style = CellStyle {
                    fg: color_rgb(*color),
                    bg: Rgb::new(28, 28, 36),
                    bold: *active,
                    dim: false,
                };
                let screen_row = if flip_rows {
                    rows - 1 - gy as u16
                } else {
                    gy as u16
                };
                let px = frame_x + 1 + gx as u16 * self.cell_w;
                let py = frame_y + 1 + screen_row * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
            }
        }
    }

    fn draw_hud(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) {
        let label = CellStyle::new(Rgb::gray(220), Rgb::gray(0)).bold();
        let value = CellStyle::new(Rgb::gray(200), Rgb::gray(0));

        if viewport.is_portrait() {
            // One compact line between the plan view and the pad.
            fb.put_str(
                x,
                y,
                &format!("SCORE {}  BEST {}", state.score(), state.best_score()),
                label,
            );
            return;
        }

        let mut row = y;
        fb.put_str(x, row, "SCORE", label);
        row = row.saturating_add(1);
        fb.put_str(x, row, &format!("{}", state.score()), value);
        row = row.saturating_add(2);

        fb.put_str(x, row, "BEST", label);
        row = row.saturating_add(1);
        fb.put_str(x, row, &format!("{}", state.best_score()), value);
        row = row.saturating_add(2);

        let help = CellStyle::new(Rgb::gray(140), Rgb::gray(0)).dim();
        for line in [
            "a/d  left/right",
            "w/s  fwd/back",
            "space drop",
            "r restart",
            "q quit",
        ] {
            if row >= viewport.height {
                break;
            }
            fb.put_str(x, row, line, help);
            row = row.saturating_add(1);
        }
    }

    fn draw_banner(
        &self,
        fb: &mut FrameBuffer,
        frame_x: u16,
        frame_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let style = CellStyle::new(Rgb::gray(255), Rgb::new(120, 20, 20)).bold();
        let text_w = text.chars().count() as u16;
        let x = frame_x + frame_w.saturating_sub(text_w) / 2;
        let y = frame_y + frame_h / 2;
        fb.put_str(x, y, text, style);
    }
}

fn draw_pad(fb: &mut FrameBuffer, pad: &ControlPad) {
    let face = CellStyle::new(Rgb::gray(230), Rgb::new(50, 50, 70)).bold();
    for button in &pad.buttons {
        let r = button.rect;
        fb.fill_rect(r.x, r.y, r.w, r.h, ' ', face);
        let label_w = button.label.chars().count() as u16;
        fb.put_str(
            r.x + r.w.saturating_sub(label_w) / 2,
            r.y + r.h / 2,
            button.label,
            face,
        );
    }
}

fn color_rgb(color: CubeColor) -> Rgb {
    match color {
        CubeColor::Red => Rgb::new(225, 75, 75),
        CubeColor::Green => Rgb::new(90, 210, 110),
        CubeColor::Blue => Rgb::new(85, 125, 235),
        CubeColor::Yellow => Rgb::new(235, 215, 85),
        CubeColor::Magenta => Rgb::new(205, 90, 210),
        CubeColor::Cyan => Rgb::new(85, 210, 215),
    }
}
