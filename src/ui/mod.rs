pub mod board_scene;
pub mod hud;
pub mod responsive;

use clover::session::SessionSnapshot;
use ratatui::{widgets::Clear, Frame};

/// Draw one frame of the game.
pub fn draw_ui(frame: &mut Frame, snapshot: &SessionSnapshot, message: &str) {
    let area = frame.size();
    if responsive::is_too_small(area) {
        responsive::render_too_small(frame, area);
        return;
    }

    frame.render_widget(Clear, area);
    board_scene::render_board(frame, area, snapshot);
    hud::render_status_line(frame, area, snapshot);
    hud::render_message(frame, area, message);
    hud::render_controls(frame, area);
    hud::render_phase_overlay(frame, area, snapshot);
}
