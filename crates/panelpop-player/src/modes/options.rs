//! Key rebinding menu. Changes are saved when leaving.

use super::{enter_pressed, step_selection, BACKGROUND, LINE_HEIGHT, MENU_HIGHLIGHT, MENU_TEXT};
use panelpop_core::Player;
use panelpop_runtime::{Canvas, KeyAction, KeyBindings, Mode, RenderContext, UpdateContext};
use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionRow {
    Binding(Player, KeyAction),
    Back,
}

fn rows() -> Vec<OptionRow> {
    Player::ALL
        .iter()
        .flat_map(|p| KeyAction::ALL.iter().map(move |a| OptionRow::Binding(*p, *a)))
        .chain(std::iter::once(OptionRow::Back))
        .collect()
}

pub struct OptionsMenu {
    canvas: Canvas,
    rows: Vec<OptionRow>,
    selected: usize,
    /// Waiting for the key to assign to the selected row
    awaiting: bool,
    /// Copy of the live bindings taken each update, for display
    shown: KeyBindings,
}

impl OptionsMenu {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            rows: rows(),
            selected: 0,
            awaiting: false,
            shown: KeyBindings::default(),
        }
    }

    /// Start from the bindings currently in use
    pub fn with_bindings(mut self, keys: KeyBindings) -> Self {
        self.shown = keys;
        self
    }

    pub fn is_awaiting_key(&self) -> bool {
        self.awaiting
    }

    fn leave(&mut self, ctx: &mut UpdateContext<'_>) {
        ctx.save_key_configs();
        ctx.return_to_title();
    }

    fn capture(&mut self, ctx: &mut UpdateContext<'_>) {
        let Some(key) = ctx.input().last_just_pressed() else {
            return;
        };
        self.awaiting = false;
        if key == KeyCode::Escape {
            return;
        }
        if let OptionRow::Binding(player, action) = self.rows[self.selected] {
            let mut config = *ctx.key_config(player);
            config.set_key(action, key);
            ctx.set_key_config(player, config);
            tracing::debug!(%player, action = action.label(), ?key, "rebound key");
        }
    }

    fn navigate(&mut self, ctx: &mut UpdateContext<'_>) {
        let input = ctx.input();
        if input.is_key_just_pressed(KeyCode::Escape) {
            self.leave(ctx);
            return;
        }

        let len = self.rows.len();
        if input.is_key_just_pressed(KeyCode::ArrowUp) {
            self.selected = step_selection(self.selected, len, false);
        }
        if input.is_key_just_pressed(KeyCode::ArrowDown) {
            self.selected = step_selection(self.selected, len, true);
        }

        if enter_pressed(input) {
            match self.rows[self.selected] {
                OptionRow::Binding(..) => self.awaiting = true,
                OptionRow::Back => self.leave(ctx),
            }
        }
    }

    fn row_label(&self, index: usize) -> String {
        match self.rows[index] {
            OptionRow::Binding(player, action) => {
                let key = if index == self.selected && self.awaiting {
                    "...".to_string()
                } else {
                    format!("{:?}", self.shown.get(player).key(action))
                };
                format!("{player} {:<6} {key}", action.label())
            }
            OptionRow::Back => "Back".to_string(),
        }
    }
}

impl Mode for OptionsMenu {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        if self.awaiting {
            self.capture(ctx);
        } else {
            self.navigate(ctx);
        }
        for player in Player::ALL {
            self.shown.set(player, *ctx.key_config(player));
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) -> &mut Canvas {
        self.canvas.clear(BACKGROUND);
        ctx.draw_text(&mut self.canvas, "KEY BINDINGS", 16, 8, MENU_HIGHLIGHT);

        // Scroll so the selection stays on screen
        let visible =
            ((self.canvas.height() as i32 - 2 * LINE_HEIGHT) / LINE_HEIGHT).max(1) as usize;
        let first = self.selected.saturating_sub(visible - 1);
        let last = (first + visible).min(self.rows.len());

        for i in first..last {
            let y = LINE_HEIGHT * ((i - first) as i32 + 2);
            let (marker, color) = if i == self.selected {
                ("> ", MENU_HIGHLIGHT)
            } else {
                ("  ", MENU_TEXT)
            };
            let line = format!("{marker}{}", self.row_label(i));
            ctx.draw_text(&mut self.canvas, &line, 16, y, color);
        }

        &mut self.canvas
    }
}
