// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::PromptEngine;
use crate::{BACKSPACE_ERASE, CRLF, ERASE_TO_END_OF_LINE, INSERT_BLANK_CELL, cursor_up,
            is_char_printable};

impl PromptEngine {
    /// Insert `ch` at the cursor and advance the cursor past it. Returns `false` (and
    /// changes nothing) if `ch` is not printable ASCII or `\n`.
    ///
    /// Terminal output:
    /// - At the end of the buffer, the character (or a line break) is written as is.
    /// - Mid buffer, a printable character is preceded by an insert blank cell sequence
    ///   so the text to the right shifts over.
    /// - Mid buffer, `\n` erases the rest of the row, reprints everything after the
    ///   cursor starting on the next row, then moves the terminal cursor back to the
    ///   start of that row.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !is_char_printable(ch) {
            return false;
        }

        let at_end = self.cursor_index == self.input.len();
        let tail = self.input[self.cursor_index..].to_string();

        let mut new_input = self.input.clone();
        new_input.insert(self.cursor_index, ch);
        self.set_input(new_input);
        self.cursor_index += ch.len_utf8();

        match (ch, at_end) {
            ('\n', true) => self.write(CRLF),
            ('\n', false) => self.write(&render_line_split(&tail)),
            (_, true) => self.write(ch.encode_utf8(&mut [0; 4])),
            (_, false) => {
                self.write(INSERT_BLANK_CELL);
                self.write(ch.encode_utf8(&mut [0; 4]));
            }
        }

        true
    }

    /// Remove the character left of the cursor. Fails at the start of the buffer and at
    /// the start of a continuation line: joining lines is not supported.
    pub fn backspace(&mut self) -> bool {
        if self.cursor_index == self.current_line_start() {
            return false;
        }

        self.write(BACKSPACE_ERASE);
        self.cursor_index -= 1;
        let mut new_input = self.input.clone();
        new_input.remove(self.cursor_index);
        self.set_input(new_input);
        true
    }

    /// Remove the run of spaces, then the run of non spaces, left of the cursor,
    /// staying on the current logical line.
    pub fn delete_cursor_word_left(&mut self) -> bool {
        let line_start = self.current_line_start();
        if self.cursor_index == line_start {
            return false;
        }

        let position = self.word_left_position(line_start);
        let removed_count = self.cursor_index - position;
        self.write(&BACKSPACE_ERASE.repeat(removed_count));

        let mut new_input = self.input.clone();
        new_input.replace_range(position..self.cursor_index, "");
        self.cursor_index = position;
        self.set_input(new_input);
        true
    }
}

/// Output for a line break typed with `tail` to the right of the cursor.
fn render_line_split(tail: &str) -> String {
    let mut acc = String::from(ERASE_TO_END_OF_LINE);
    let mut row_count = 0;
    for line in tail.split('\n') {
        acc.push_str(CRLF);
        acc.push_str(line);
        acc.push_str(ERASE_TO_END_OF_LINE);
        row_count += 1;
    }
    if row_count > 1 {
        acc.push_str(&cursor_up(row_count - 1));
    }
    acc.push('\r');
    acc
}
