//! Layer rendering.
//!
//! The board is drawn inside the screen region the pointer resolver's
//! primary map is calibrated for, so a click on a drawn cell resolves to
//! that cell.

use clover::board::CellState;
use clover::pointer::{
    CameraMode, CameraState, FIRST_PERSON_PRIMARY, OVERVIEW_PRIMARY, YAW_CORRECTION_X,
    YAW_CORRECTION_Y,
};
use clover::session::{CellView, SessionSnapshot};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

/// Board bounds as fractions of the screen: `(left, top, width, height)`.
pub fn board_fraction(camera: CameraState) -> (f64, f64, f64, f64) {
    match camera.mode {
        CameraMode::FirstPerson => {
            let map = FIRST_PERSON_PRIMARY;
            (map.offset, map.offset, map.scale, map.scale)
        }
        CameraMode::Overview => {
            let map = OVERVIEW_PRIMARY;
            let yaw = camera.yaw_degrees.to_radians();
            (
                map.offset - yaw.sin() * YAW_CORRECTION_X,
                map.offset - yaw.cos() * YAW_CORRECTION_Y,
                map.scale,
                map.scale,
            )
        }
    }
}

/// First terminal column/row whose centre lies at or past `edge`.
fn first_index_at(edge: f64) -> i64 {
    (edge - 0.5).ceil() as i64
}

/// Terminal rect for cell `(row, col)`, clipped to `area`.
pub fn cell_rect(
    area: Rect,
    camera: CameraState,
    rows: usize,
    cols: usize,
    row: usize,
    col: usize,
) -> Rect {
    let (left, top, width, height) = board_fraction(camera);
    let edge_x = |c: usize| area.width as f64 * (left + width * c as f64 / cols as f64);
    let edge_y = |r: usize| area.height as f64 * (top + height * r as f64 / rows as f64);

    let x0 = first_index_at(edge_x(col)).max(0);
    let x1 = first_index_at(edge_x(col + 1)).max(x0);
    let y0 = first_index_at(edge_y(row)).max(0);
    let y1 = first_index_at(edge_y(row + 1)).max(y0);

    let rect = Rect::new(
        area.x.saturating_add(x0 as u16),
        area.y.saturating_add(y0 as u16),
        (x1 - x0) as u16,
        (y1 - y0) as u16,
    );
    rect.intersection(area)
}

/// Glyph and colours for a cell, before selection highlighting.
fn cell_display(cell: &CellView) -> (&'static str, Color, Color) {
    match cell.state {
        CellState::Flagged => ("F", Color::Red, Color::DarkGray),
        CellState::Hidden if cell.mine => ("!", Color::Magenta, Color::DarkGray),
        CellState::Hidden => ("#", Color::Gray, Color::DarkGray),
        CellState::Revealed if cell.mine => ("*", Color::White, Color::Red),
        CellState::Revealed => match cell.adjacent_mines {
            0 => (".", Color::DarkGray, Color::Reset),
            1 => ("1", Color::Blue, Color::Reset),
            2 => ("2", Color::Green, Color::Reset),
            3 => ("3", Color::Red, Color::Reset),
            4 => ("4", Color::Magenta, Color::Reset),
            5 => ("5", Color::Yellow, Color::Reset),
            6 => ("6", Color::Cyan, Color::Reset),
            7 => ("7", Color::Gray, Color::Reset),
            _ => ("8", Color::White, Color::Reset),
        },
    }
}

pub fn render_board(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) {
    for (row, cells) in snapshot.cells.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let rect = cell_rect(
                area,
                snapshot.camera,
                snapshot.height,
                snapshot.width,
                row,
                col,
            );
            if rect.width == 0 || rect.height == 0 {
                continue;
            }

            let (glyph, fg, mut bg) = cell_display(cell);
            let mut style = Style::default().fg(fg);
            if snapshot.hover == Some((row, col)) {
                bg = Color::Blue;
            }
            if snapshot.selection == (row, col) {
                bg = Color::Yellow;
                style = style.fg(Color::Black).add_modifier(Modifier::BOLD);
            }

            let mut lines = vec![Line::from(""); usize::from(rect.height.saturating_sub(1) / 2)];
            lines.push(Line::from(glyph));

            let paragraph = Paragraph::new(lines)
                .style(style.bg(bg))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, rect);
        }
    }
}
