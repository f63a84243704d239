use super::{
    enter_pressed, step_selection, OptionsMenu, BACKGROUND, LINE_HEIGHT, MENU_HIGHLIGHT, MENU_TEXT,
};
use panelpop_core::Player;
use panelpop_runtime::{Canvas, KeyBindings, Mode, RenderContext, UpdateContext};
use winit::keyboard::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TitleEntry {
    Endless,
    Options,
}

impl TitleEntry {
    const ALL: [TitleEntry; 2] = [TitleEntry::Endless, TitleEntry::Options];

    fn label(self) -> &'static str {
        match self {
            TitleEntry::Endless => "1P Endless",
            TitleEntry::Options => "Options",
        }
    }
}

/// Start menu
pub struct TitleScreen {
    canvas: Canvas,
    selected: usize,
}

impl TitleScreen {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            selected: 0,
        }
    }
}

impl Mode for TitleScreen {
    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let keys = *ctx.key_config(Player::One);
        let input = ctx.input();

        let up = input.is_key_just_pressed(keys.up) || input.is_key_just_pressed(KeyCode::ArrowUp);
        let down =
            input.is_key_just_pressed(keys.down) || input.is_key_just_pressed(KeyCode::ArrowDown);
        let confirm = input.is_key_just_pressed(keys.swap) || enter_pressed(input);

        let len = TitleEntry::ALL.len();
        if up {
            self.selected = step_selection(self.selected, len, false);
        }
        if down {
            self.selected = step_selection(self.selected, len, true);
        }
        if !confirm {
            return;
        }

        match TitleEntry::ALL[self.selected] {
            TitleEntry::Endless => ctx.start_game(),
            TitleEntry::Options => {
                let mut shown = KeyBindings::default();
                for player in Player::ALL {
                    shown.set(player, *ctx.key_config(player));
                }
                let options = OptionsMenu::new(self.canvas.width(), self.canvas.height())
                    .with_bindings(shown);
                ctx.switch_to_state(Box::new(options));
            }
        }
    }

    fn render(&mut self, ctx: &mut RenderContext<'_>) -> &mut Canvas {
        self.canvas.clear(BACKGROUND);

        let x = (self.canvas.width() / 3) as i32;
        let top = (self.canvas.height() / 3) as i32;
        ctx.draw_text(&mut self.canvas, "PANEL POP", x, top, MENU_HIGHLIGHT);

        for (i, entry) in TitleEntry::ALL.iter().enumerate() {
            let y = top + LINE_HEIGHT * (i as i32 + 2);
            let (marker, color) = if i == self.selected {
                ("> ", MENU_HIGHLIGHT)
            } else {
                ("  ", MENU_TEXT)
            };
            ctx.draw_text(&mut self.canvas, &format!("{marker}{}", entry.label()), x, y, color);
        }

        &mut self.canvas
    }
}
