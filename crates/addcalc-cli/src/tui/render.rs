//! Draws the keypad screen
//!
//! ```text
//! ┌────────────────────────────┐
//! │                        2+3 │  equation
//! │                          5 │  input
//! │ Something went wrong       │  error / loading
//! ├────────────────────────────┤
//! │  [9]  [8]  [7]  [⌫]        │
//! │  ...                       │
//! └────────────────────────────┘
//! ```

use addcalc::keypad::{Keypad, MethodMenu};

use super::app::App;
use super::grid::TextGrid;

/// Screen width in columns
pub const WIDTH: u16 = 30;

const RIGHT: u16 = WIDTH - 3;
const KEYPAD_TOP: u16 = 5;
const CELL: u16 = 5;

const HELP: &str = "hold ⌫ / Del: clear  q: quit";

/// Renders the whole screen as lines
#[must_use]
pub fn render(app: &App) -> Vec<String> {
    let keypad = Keypad::new();
    let rows = u16::try_from(Keypad::ROWS).unwrap_or(4);
    let bottom = KEYPAD_TOP + rows;
    let menu_lines = app.session().menu().map_or(0, |menu| menu.entries().len() + 2);
    let height = bottom + 2 + u16::try_from(menu_lines).unwrap_or(0);

    let mut grid = TextGrid::new(WIDTH, height);
    grid.draw_box(0, 0, WIDTH - 1, bottom);
    grid.draw_divider(0, WIDTH - 1, 4);

    draw_display(app, &mut grid);
    for button in keypad.buttons() {
        let (Ok(row), Ok(col)) = (u16::try_from(button.row), u16::try_from(button.col)) else {
            continue;
        };
        grid.write_str(2 + col * CELL, KEYPAD_TOP + row, &format!("[{}]", button.label()));
    }
    grid.write_str(1, bottom + 1, HELP);

    if let Some(menu) = app.session().menu() {
        draw_menu(menu, &mut grid, bottom + 2);
    }
    grid.to_lines()
}

fn draw_display(app: &App, grid: &mut TextGrid) {
    let session = app.session();
    let state = session.state();
    grid.write_right(RIGHT, 1, state.equation());
    grid.write_right(RIGHT, 2, &session.input_display());

    let status = if session.is_loading() {
        Some("Loading...")
    } else {
        state.error().or_else(|| app.notice())
    };
    if let Some(status) = status {
        grid.write_str(2, 3, status);
    }
}

fn draw_menu(menu: &MethodMenu, grid: &mut TextGrid, top: u16) {
    grid.write_str(1, top, MethodMenu::TITLE);
    for (offset, entry) in (1u16..).zip(menu.entries()) {
        let suffix = if entry.enabled { "" } else { " (n/a)" };
        grid.write_str(
            1,
            top + offset,
            &format!("{}) {}{suffix}", offset, entry.label()),
        );
    }
}
