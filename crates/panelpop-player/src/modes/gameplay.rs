//! Single-player endless board: a cursor, swaps and stack raises

use super::{BACKGROUND, MENU_TEXT};
use panelpop_core::{Color, Player};
use panelpop_runtime::{Canvas, KeyboardControllerConfig, Mode, RenderContext, UpdateContext};
use winit::keyboard::KeyCode;

pub const BOARD_COLUMNS: usize = 6;
pub const BOARD_ROWS: usize = 12;

/// Rows filled when a game starts
const STARTING_ROWS: usize = 4;

const PANEL_COLORS: [Color; 5] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::from_hex(0xB040E0),
];

const CURSOR_COLOR: Color = Color::WHITE;

/// Row 0 is the top of the stack
type Board = [[Option<u8>; BOARD_COLUMNS]; BOARD_ROWS];

/// xorshift32, enough to vary panel colours
#[derive(Debug, Clone, Copy)]
struct PanelRng(u32);

impl PanelRng {
    fn next_panel(&mut self) -> u8 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x % PANEL_COLORS.len() as u32) as u8
    }
}

pub struct GameMode {
    canvas: Canvas,
    board: Board,
    /// Left column of the two-wide cursor
    cursor_x: usize,
    cursor_y: usize,
    rng: PanelRng,
    swaps: u32,
    raises: u32,
}

impl GameMode {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_seed(width, height, 0x2545_F491)
    }

    pub fn with_seed(width: usize, height: usize, seed: u32) -> Self {
        let mut game = Self {
            canvas: Canvas::new(width, height),
            board: [[None; BOARD_COLUMNS]; BOARD_ROWS],
            cursor_x: BOARD_COLUMNS / 2 - 1,
            cursor_y: BOARD_ROWS - STARTING_ROWS,
            rng: PanelRng(seed.max(1)),
            swaps: 0,
            raises: 0,
        };
        for row in BOARD_ROWS - STARTING_ROWS..BOARD_ROWS {
            game.board[row] = game.fresh_row();
        }
        game
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    pub fn panel(&self, column: usize, row: usize) -> Option<u8> {
        self.board.get(row)?.get(column).copied().flatten()
    }

    fn fresh_row(&mut self) -> [Option<u8>; BOARD_COLUMNS] {
        let mut row = [None; BOARD_COLUMNS];
        for cell in row.iter_mut() {
            *cell = Some(self.rng.next_panel());
        }
        row
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let max_x = BOARD_COLUMNS as isize - 2;
        let max_y = BOARD_ROWS as isize - 1;
        self.cursor_x = (self.cursor_x as isize + dx).clamp(0, max_x) as usize;
        self.cursor_y = (self.cursor_y as isize + dy).clamp(0, max_y) as usize;
    }

    fn swap(&mut self) {
        let row = &mut self.board[self.cursor_y];
        row.swap(self.cursor_x, self.cursor_x + 1);
        self.swaps += 1;
    }

    /// Push every row up by one and add a new bottom row. Refused when the
    /// top row is occupied.
    fn raise(&mut self) {
        if self.board[0].iter().any(Option::is_some) {
            return;
        }
        self.board.rotate_left(1);
        self.board[BOARD_ROWS - 1] = self.fresh_row();
        self.cursor_y = self.cursor_y.saturating_sub(1);
        self.raises += 1;
    }

    fn apply_controls(&mut self, keys: &KeyboardControllerConfig, ctx: &UpdateContext<'_>) {
        let input = ctx.input();
        if input.is_key_just_pressed(keys.left) {
            self.move_cursor(-1, 0);
        }
        if input.is_key_just_pressed(keys.right) {
            self.move_cursor(1, 0);
        }
        if input.is_key_just_pressed(keys.up) {
            self.move_cursor(0, -1);
        }
        if input.is_key_just_pressed(keys.down) {
            self.move_cursor(0, 1);
        }
        if input.is_key_just_pressed(keys.swap) {
            self.swap();
        }
        if input.is_key_just_pressed(keys.raise) {
            self.raise();
        }
    }

    fn cell_size(&self) -> usize {
        (self.canvas.height() / (BOARD_ROWS + 2)).max(1)
    }
}

impl Mode for GameMode {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if ctx.input().is_key_just_pressed(KeyCode::Escape) {
            ctx.return_to_title();
            return;
        }
        let keys = *ctx.key_config(Player::One);
        self.apply_controls(&keys, ctx);
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) -> &mut Canvas {
        self.canvas.clear(BACKGROUND);

        let cell = self.cell_size();
        let board_w = cell * BOARD_COLUMNS;
        let left = (self.canvas.width().saturating_sub(board_w) / 2) as i32;
        let top = cell as i32;
        let cell_i = cell as i32;
        let inner = cell.saturating_sub(2).max(1) as u32;

        self.canvas.stroke_rect(
            left - 1,
            top - 1,
            board_w as u32 + 2,
            (cell * BOARD_ROWS) as u32 + 2,
            MENU_TEXT,
        );

        for (row, cells) in self.board.iter().enumerate() {
            for (column, panel) in cells.iter().enumerate() {
                if let Some(index) = panel {
                    let x = left + column as i32 * cell_i + 1;
                    let y = top + row as i32 * cell_i + 1;
                    let color = PANEL_COLORS[*index as usize % PANEL_COLORS.len()];
                    self.canvas.fill_rect(x, y, inner, inner, color);
                }
            }
        }

        self.canvas.stroke_rect(
            left + self.cursor_x as i32 * cell_i,
            top + self.cursor_y as i32 * cell_i,
            (cell * 2) as u32,
            cell as u32,
            CURSOR_COLOR,
        );

        let hud_x = left + board_w as i32 + cell_i;
        ctx.draw_text(&mut self.canvas, &format!("Score {}", self.swaps), hud_x, top, MENU_TEXT);
        ctx.draw_text(
            &mut self.canvas,
            &format!("Raises {}", self.raises),
            hud_x,
            top + cell_i * 2,
            MENU_TEXT,
        );

        &mut self.canvas
    }
}
