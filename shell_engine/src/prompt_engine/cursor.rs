// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::PromptEngine;
use crate::{CURSOR_LEFT, CURSOR_RIGHT};

const SPACE: u8 = b' ';

impl PromptEngine {
    /// Move the cursor to `position`, clamped to the current logical line. Writes one
    /// cursor left or right sequence per cell moved. Returns `false`, writing nothing,
    /// when the clamped position is where the cursor already is.
    pub fn move_cursor(&mut self, position: usize) -> bool {
        let position = position.clamp(self.current_line_start(), self.current_line_end());
        if position == self.cursor_index {
            return false;
        }

        let sequence = if position < self.cursor_index {
            CURSOR_LEFT.repeat(self.cursor_index - position)
        } else {
            CURSOR_RIGHT.repeat(position - self.cursor_index)
        };
        self.write(&sequence);
        self.cursor_index = position;
        true
    }

    pub fn move_cursor_relative(&mut self, amount: isize) -> bool {
        self.move_cursor(self.cursor_index.saturating_add_signed(amount))
    }

    pub fn move_cursor_start_of_line(&mut self) -> bool {
        self.move_cursor(self.current_line_start())
    }

    pub fn move_cursor_end_of_line(&mut self) -> bool {
        self.move_cursor(self.current_line_end())
    }

    /// Skip spaces, then non spaces, to the left.
    pub fn move_cursor_word_left(&mut self) -> bool {
        let line_start = self.current_line_start();
        if self.cursor_index == line_start {
            return false;
        }
        let position = self.word_left_position(line_start);
        self.move_cursor(position)
    }

    /// Skip spaces, then non spaces, to the right. Lands just past the end of the word.
    pub fn move_cursor_word_right(&mut self) -> bool {
        let line_end = self.current_line_end();
        if self.cursor_index == line_end {
            return false;
        }
        let bytes = self.input.as_bytes();
        let mut position = self.cursor_index;
        while position < line_end && bytes[position] == SPACE {
            position += 1;
        }
        while position < line_end && bytes[position] != SPACE {
            position += 1;
        }
        self.move_cursor(position)
    }

    pub(super) fn word_left_position(&self, line_start: usize) -> usize {
        let bytes = self.input.as_bytes();
        let mut position = self.cursor_index;
        while position > line_start && bytes[position - 1] == SPACE {
            position -= 1;
        }
        while position > line_start && bytes[position - 1] != SPACE {
            position -= 1;
        }
        position
    }
}

#[cfg(test)]
mod tests {
    use crate::prompt_engine::engine::test_helpers::engine_with_input;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_move_cursor_emits_minimal_run() {
        let (mut engine, capture, _sub) = engine_with_input("hello", 5);

        assert!(engine.move_cursor(2));
        assert_eq!(engine.cursor_index(), 2);
        assert_eq!(capture.get_copy_of_buffer_as_string(), "\x1b[D\x1b[D\x1b[D");

        capture.clear();
        assert!(engine.move_cursor(4));
        assert_eq!(capture.get_copy_of_buffer_as_string(), "\x1b[C\x1b[C");
    }

    #[test]
    fn test_move_cursor_idempotent_at_boundary() {
        let (mut engine, capture, _sub) = engine_with_input("hello", 0);

        assert!(!engine.move_cursor_start_of_line());
        assert!(!engine.move_cursor(0));
        assert!(!engine.move_cursor_relative(-1));

        assert_eq!(engine.cursor_index(), 0);
        assert_eq!(capture.get_copy_of_buffer_as_string(), "");
    }

    #[test]
    fn test_move_cursor_clamps_to_logical_line() {
        let (mut engine, capture, _sub) = engine_with_input("ab\ncd\nef", 4);

        assert!(engine.move_cursor(0));
        assert_eq!(engine.cursor_index(), 3);

        assert!(engine.move_cursor(100));
        assert_eq!(engine.cursor_index(), 5);
        assert!(!engine.move_cursor_relative(1));
        assert_eq!(capture.get_copy_of_buffer_as_string(), "\x1b[D\x1b[C\x1b[C");
    }

    #[test]
    fn test_start_and_end_of_line() {
        let (mut engine, _capture, _sub) = engine_with_input("ls -la\nfoo", 2);

        assert!(engine.move_cursor_end_of_line());
        assert_eq!(engine.cursor_index(), 6);
        assert!(!engine.move_cursor_end_of_line());
        assert!(engine.move_cursor_start_of_line());
        assert_eq!(engine.cursor_index(), 0);
    }

    #[test_case("foo bar baz", 5, 7 ; "mid word lands after word")]
    #[test_case("foo bar baz", 3, 7 ; "skips leading space")]
    #[test_case("foo   bar", 0, 3 ; "from line start")]
    #[test_case("foo bar", 4, 7 ; "last word")]
    fn test_move_cursor_word_right(input: &str, from: usize, expected: usize) {
        let (mut engine, _capture, _sub) = engine_with_input(input, from);
        assert!(engine.move_cursor_word_right());
        assert_eq!(engine.cursor_index(), expected);
    }

    #[test_case("foo bar baz", 9, 8 ; "mid word lands at word start")]
    #[test_case("foo bar baz", 8, 4 ; "from word start")]
    #[test_case("foo   bar", 6, 0 ; "skips trailing spaces")]
    fn test_move_cursor_word_left(input: &str, from: usize, expected: usize) {
        let (mut engine, _capture, _sub) = engine_with_input(input, from);
        assert!(engine.move_cursor_word_left());
        assert_eq!(engine.cursor_index(), expected);
    }

    #[test]
    fn test_word_motion_fails_at_line_boundaries() {
        let (mut engine, capture, _sub) = engine_with_input("ab cd\nef gh", 6);
        assert!(!engine.move_cursor_word_left());

        let (mut engine_end, capture_end, _sub_end) = engine_with_input("ab cd\nef gh", 5);
        assert!(!engine_end.move_cursor_word_right());

        assert_eq!(capture.get_copy_of_buffer_as_string(), "");
        assert_eq!(capture_end.get_copy_of_buffer_as_string(), "");
    }
}
