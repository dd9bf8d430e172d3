//! Key handling: crossterm events become [`AppEvent`]s before any widget
//! sees them.
//!
//! Bindings depend on the [`KeyMode`]. In `Normal` mode letters are
//! shortcuts; in `Insert` mode (query bar, command bar) they are text.
//!
//! | Key(s)               | Normal             | Insert             |
//! |----------------------|--------------------|--------------------|
//! | `Ctrl+c`             | `Quit`             | `Quit`             |
//! | `q`                  | `Quit`             | `Char('q')`        |
//! | arrows               | `Move(dir)`        | `Move(dir)`        |
//! | `h` `j` `k` `l`      | `Move(dir)`        | `Char`             |
//! | `PageUp` / `Ctrl+u`  | `PageUp`           | `PageUp`           |
//! | `PageDown` / `Ctrl+d`| `PageDown`         | `PageDown`         |
//! | `]` / `[`            | `NextTab`/`PrevTab`| `Char`             |
//! | `/`                  | `FocusQuery`       | `Char('/')`        |
//! | `Tab`                | `CycleFocus`       | `CycleFocus`       |
//! | `Enter`, `Esc`, `Backspace` | same name   | same name          |

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Whether letters act as shortcuts or as typed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMode {
    Normal,
    Insert,
}

/// What a key press means to drillbook, independent of the widget that
/// ends up handling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    /// Outline ↔ query bar.
    CycleFocus,
    FocusQuery,
    PageUp,
    PageDown,
    NextTab,
    PrevTab,
    /// Cursor movement; left/right also close/open outline nodes.
    Move(Direction),
    Char(char),
    Backspace,
    Enter,
    Escape,
    Resize(u16, u16),
}

/// Translate a crossterm event. Mouse, focus and paste events, and keys
/// with no binding, give `None`.
pub fn map_event(event: &Event, mode: KeyMode) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(*w, *h)),
        Event::Key(key) => shared_binding(key)
            .or_else(|| match mode {
                KeyMode::Normal => shortcut(key),
                KeyMode::Insert => None,
            })
            .or_else(|| typed_char(key)),
        _ => None,
    }
}

/// Bindings that do not depend on the mode.
fn shared_binding(key: &KeyEvent) -> Option<AppEvent> {
    let plain = key.modifiers == KeyModifiers::NONE;
    let ctrl = key.modifiers == KeyModifiers::CONTROL;
    let event = match key.code {
        KeyCode::Char('c') if ctrl => AppEvent::Quit,
        KeyCode::Char('u') if ctrl => AppEvent::PageUp,
        KeyCode::Char('d') if ctrl => AppEvent::PageDown,
        KeyCode::PageUp => AppEvent::PageUp,
        KeyCode::PageDown => AppEvent::PageDown,
        KeyCode::Up => AppEvent::Move(Direction::Up),
        KeyCode::Down => AppEvent::Move(Direction::Down),
        KeyCode::Left => AppEvent::Move(Direction::Left),
        KeyCode::Right => AppEvent::Move(Direction::Right),
        KeyCode::Tab if plain => AppEvent::CycleFocus,
        KeyCode::Backspace if plain => AppEvent::Backspace,
        KeyCode::Enter if plain => AppEvent::Enter,
        KeyCode::Esc => AppEvent::Escape,
        _ => return None,
    };
    Some(event)
}

/// Single-letter shortcuts, normal mode only.
fn shortcut(key: &KeyEvent) -> Option<AppEvent> {
    if key.modifiers != KeyModifiers::NONE {
        return None;
    }
    let KeyCode::Char(c) = key.code else {
        return None;
    };
    Some(match c {
        'q' => AppEvent::Quit,
        '/' => AppEvent::FocusQuery,
        ']' => AppEvent::NextTab,
        '[' => AppEvent::PrevTab,
        'k' => AppEvent::Move(Direction::Up),
        'j' => AppEvent::Move(Direction::Down),
        'h' => AppEvent::Move(Direction::Left),
        'l' => AppEvent::Move(Direction::Right),
        _ => return None,
    })
}

fn typed_char(key: &KeyEvent) -> Option<AppEvent> {
    match key.code {
        KeyCode::Char(c)
            if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
        {
            Some(AppEvent::Char(c))
        }
        _ => None,
    }
}
