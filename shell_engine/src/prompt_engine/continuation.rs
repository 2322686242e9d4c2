// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

const SINGLE_QUOTE: char = '\'';
const DOUBLE_QUOTE: char = '"';
const BACKSLASH: char = '\\';

/// Whether `input` ends inside an open quote, in which case Enter inserts a newline
/// instead of submitting the line.
///
/// At most one quote is open at a time. The other quote character is plain text while
/// one is open (`"it's"` is closed). A quote right after a backslash is ignored, with a
/// one character lookback only (`\\"` still counts as escaped).
#[must_use]
pub fn should_continue_line(input: &str) -> bool {
    let mut open_quote: Option<char> = None;
    let mut previous: Option<char> = None;

    for ch in input.chars() {
        let is_quote = ch == SINGLE_QUOTE || ch == DOUBLE_QUOTE;
        if is_quote && previous != Some(BACKSLASH) {
            open_quote = match open_quote {
                None => Some(ch),
                Some(quote) if quote == ch => None,
                still_open @ Some(_) => still_open,
            };
        }
        previous = Some(ch);
    }

    open_quote.is_some()
}
