// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ESC, INPUT_ALT_B, INPUT_ALT_F, INPUT_ARROW_DOWN, INPUT_ARROW_LEFT,
            INPUT_ARROW_RIGHT, INPUT_ARROW_UP, INPUT_BACKSPACE_BS, INPUT_BACKSPACE_DEL,
            INPUT_CTRL_A, INPUT_CTRL_ARROW_LEFT, INPUT_CTRL_ARROW_RIGHT, INPUT_CTRL_B,
            INPUT_CTRL_BACKSPACE, INPUT_CTRL_C, INPUT_CTRL_E, INPUT_CTRL_F, INPUT_END,
            INPUT_ENTER, INPUT_HOME, INPUT_TAB, ShellError, is_char_printable};

/// What one input token asks the shell to do.
#[derive(Clone, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum InputAction {
    /// Ctrl+C.
    Interrupt,
    /// Submit the line, or insert a newline if the line continues.
    Enter,
    Backspace,
    DeleteWordLeft,
    /// Up and down have no editing effect here. History belongs to a collaborator.
    HistoryPrevious,
    HistoryNext,
    CursorRight,
    CursorWordRight,
    CursorLeft,
    CursorWordLeft,
    CursorLineStart,
    CursorLineEnd,
    Tab,
    /// The printable characters of the token, in order. Never empty.
    Insert(String),
    /// Nothing printable in the token.
    Ignore,
}

/// Map one token to one action.
///
/// # Errors
///
/// [`ShellError::UnrecognizedEscapeSequence`] for a token that starts with ESC and is
/// not in the table.
pub fn interpret_token(token: &str) -> Result<InputAction, ShellError> {
    Ok(match token {
        INPUT_CTRL_C => InputAction::Interrupt,
        INPUT_ENTER => InputAction::Enter,
        INPUT_BACKSPACE_DEL | INPUT_BACKSPACE_BS => InputAction::Backspace,
        INPUT_CTRL_BACKSPACE => InputAction::DeleteWordLeft,
        INPUT_ARROW_UP => InputAction::HistoryPrevious,
        INPUT_ARROW_DOWN => InputAction::HistoryNext,
        INPUT_CTRL_F | INPUT_ARROW_RIGHT => InputAction::CursorRight,
        INPUT_ALT_F | INPUT_CTRL_ARROW_RIGHT => InputAction::CursorWordRight,
        INPUT_CTRL_B | INPUT_ARROW_LEFT => InputAction::CursorLeft,
        INPUT_ALT_B | INPUT_CTRL_ARROW_LEFT => InputAction::CursorWordLeft,
        INPUT_CTRL_A | INPUT_HOME => InputAction::CursorLineStart,
        INPUT_CTRL_E | INPUT_END => InputAction::CursorLineEnd,
        INPUT_TAB => InputAction::Tab,
        _ if token.starts_with(ESC) => {
            return Err(ShellError::UnrecognizedEscapeSequence {
                sequence: token.to_string(),
            });
        }
        _ => {
            let printable: String = token.chars().filter(|ch| is_char_printable(*ch)).collect();
            if printable.is_empty() {
                InputAction::Ignore
            } else {
                InputAction::Insert(printable)
            }
        }
    })
}
