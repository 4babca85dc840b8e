pub mod markup;
pub mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

const PROMPT_ROWS: u16 = 5;
const BUTTON_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),               // Title
            Constraint::Length(PROMPT_ROWS + 2), // Prompt field
            Constraint::Length(BUTTON_HEIGHT),   // Action buttons
            Constraint::Min(3),                  // Response region
            Constraint::Length(1),               // Status line
            Constraint::Length(1),               // Bottom keymap bar
        ])
        .split(frame.area());

    widgets::render_title(frame, app, chunks[0]);
    widgets::render_prompt_field(frame, app, chunks[1]);
    widgets::render_buttons(frame, app, chunks[2]);
    widgets::render_output(frame, app, chunks[3]);
    widgets::render_status_bar(frame, app, chunks[4]);
    widgets::render_bottom_bar(frame, app, chunks[5]);

    if !app.notifications.is_empty() {
        widgets::render_notifications(frame, app, frame.area());
    }

    if app.show_help {
        widgets::render_help_window(frame, frame.area());
    }
}
