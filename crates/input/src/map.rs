//! Mapping from terminal events to frontend commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// What a key press asks the frontend to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    /// Pop the group under the cursor
    Pop,
    Restart,
}

/// Pointer activity in terminal cell coordinates (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Hover { column: u16, row: u16 },
    Click { column: u16, row: u16 },
}

/// Map keyboard input to commands.
pub fn handle_key_event(key: KeyEvent) -> Option<InputCommand> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputCommand::CursorLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputCommand::CursorRight)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputCommand::CursorUp)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputCommand::CursorDown)
        }

        KeyCode::Char(' ') | KeyCode::Enter => Some(InputCommand::Pop),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputCommand::Restart),

        _ => None,
    }
}

/// Map mouse input to pointer events. Moves and drags hover, a left press clicks.
pub fn handle_mouse_event(event: MouseEvent) -> Option<PointerEvent> {
    let (column, row) = (event.column, event.row);
    match event.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(PointerEvent::Hover { column, row }),
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Click { column, row }),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
