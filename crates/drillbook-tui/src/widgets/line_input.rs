//! Single-line text editing shared by the query bar and the command bar.
//!
//! The cursor is a byte offset that always sits on a char boundary.

use crate::event::{AppEvent, Direction};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LineInput {
    text: String,
    cursor: usize,
}

impl LineInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Byte offset of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Display columns left of the cursor, one per char.
    pub fn cursor_column(&self) -> u16 {
        self.text[..self.cursor].chars().count() as u16
    }

    /// Apply an editing event: insert, backspace, or move left/right.
    /// Returns `true` when the text changed. Other events are ignored.
    pub fn edit(&mut self, event: &AppEvent) -> bool {
        match event {
            AppEvent::Char(c) => {
                self.text.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                true
            }
            AppEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.text.remove(prev);
                self.cursor = prev;
                true
            }
            AppEvent::Move(Direction::Left) => {
                self.cursor = self.prev_boundary();
                false
            }
            AppEvent::Move(Direction::Right) => {
                self.cursor = self.next_boundary();
                false
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }
}

impl From<&str> for LineInput {
    /// An input holding `text` with the cursor at the end.
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left() -> AppEvent {
        AppEvent::Move(Direction::Left)
    }

    fn right() -> AppEvent {
        AppEvent::Move(Direction::Right)
    }

    #[test]
    fn inserts_at_the_cursor() {
        let mut input = LineInput::from("ac");
        input.edit(&left());
        assert!(input.edit(&AppEvent::Char('b')));
        assert_eq!(input.text(), "abc");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn backspace_at_start_is_not_a_change() {
        let mut input = LineInput::default();
        assert!(!input.edit(&AppEvent::Backspace));
        let mut input = LineInput::from("x");
        input.edit(&left());
        assert!(!input.edit(&AppEvent::Backspace));
        assert_eq!(input.text(), "x");
    }

    #[test]
    fn cursor_steps_over_multibyte_chars() {
        let mut input = LineInput::from("añb");
        input.edit(&left());
        input.edit(&left());
        assert_eq!(input.cursor(), 1);
        assert_eq!(input.cursor_column(), 1);
        input.edit(&right());
        assert_eq!(input.cursor(), 3);
        assert_eq!(input.cursor_column(), 2);
        assert!(input.edit(&AppEvent::Backspace));
        assert_eq!(input.text(), "ab");
    }

    #[test]
    fn movement_stops_at_both_ends() {
        let mut input = LineInput::from("ab");
        input.edit(&right());
        assert_eq!(input.cursor(), 2);
        for _ in 0..5 {
            input.edit(&left());
        }
        assert_eq!(input.cursor(), 0);
    }
}
