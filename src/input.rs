//! Terminal event mapping.
//!
//! Translates crossterm key, mouse, and resize events into session commands.

use clover::challenge::ChallengeKey;
use clover::core::constants::CAMERA_YAW_STEP_DEGREES;
use clover::navigation::Direction;
use clover::pointer::Viewport;
use clover::session::{GameInput, PointerButton};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// What the main loop should do with a terminal event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Game(GameInput),
    Quit,
    Ignore,
}

/// Pointer coordinates are taken at the centre of the terminal cell.
fn pointer_position(column: u16, row: u16) -> (f64, f64) {
    (column as f64 + 0.5, row as f64 + 0.5)
}

pub fn map_event(event: &Event, defusing: bool) -> InputAction {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => map_key(key, defusing),
        Event::Mouse(mouse) => {
            let (x, y) = pointer_position(mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Moved => InputAction::Game(GameInput::PointerMoved { x, y }),
                MouseEventKind::Down(MouseButton::Left) => {
                    InputAction::Game(GameInput::PointerPressed {
                        x,
                        y,
                        button: PointerButton::Primary,
                    })
                }
                MouseEventKind::Down(MouseButton::Right) => {
                    InputAction::Game(GameInput::PointerPressed {
                        x,
                        y,
                        button: PointerButton::Secondary,
                    })
                }
                _ => InputAction::Ignore,
            }
        }
        Event::Resize(width, height) => InputAction::Game(GameInput::Resize(Viewport::new(
            *width as f64,
            *height as f64,
        ))),
        _ => InputAction::Ignore,
    }
}

/// While defusing every printable key goes to the answer buffer; only Esc
/// still quits.
fn map_key(key: &KeyEvent, defusing: bool) -> InputAction {
    if defusing {
        return match key.code {
            KeyCode::Esc => InputAction::Quit,
            KeyCode::Enter => InputAction::Game(GameInput::Challenge(ChallengeKey::Submit)),
            KeyCode::Backspace => {
                InputAction::Game(GameInput::Challenge(ChallengeKey::Backspace))
            }
            KeyCode::Char(c) => InputAction::Game(GameInput::Challenge(ChallengeKey::Char(c))),
            _ => InputAction::Ignore,
        };
    }

    let input = match key.code {
        KeyCode::Esc => return InputAction::Quit,
        KeyCode::Up => GameInput::Move(Direction::Up),
        KeyCode::Down => GameInput::Move(Direction::Down),
        KeyCode::Left => GameInput::Move(Direction::Left),
        KeyCode::Right => GameInput::Move(Direction::Right),
        KeyCode::Tab => GameInput::CycleSelection,
        KeyCode::Enter => GameInput::RevealSelected,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => return InputAction::Quit,
            'w' => GameInput::Move(Direction::Up),
            's' => GameInput::Move(Direction::Down),
            'a' => GameInput::Move(Direction::Left),
            'd' => GameInput::Move(Direction::Right),
            ' ' => GameInput::RevealSelected,
            'f' => GameInput::ToggleFlagSelected,
            'x' => GameInput::UseScanner,
            'h' => GameInput::ToggleHackMode,
            'v' => GameInput::ToggleCameraMode,
            '[' => GameInput::RotateCamera(-CAMERA_YAW_STEP_DEGREES),
            ']' => GameInput::RotateCamera(CAMERA_YAW_STEP_DEGREES),
            'r' => GameInput::Reset,
            _ => return InputAction::Ignore,
        },
        _ => return InputAction::Ignore,
    };
    InputAction::Game(input)
}
