// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal control constants, split into the input tokens the interpreter recognizes
//! and the output sequences the engine emits.
//!
//! ## Input tokens
//! The host delivers exactly one of these per [`crate::Shell::write`] call. Anything
//! else that starts with ESC is rejected.
//!
//! ## Output sequences
//! - CSI = ESC [  (0x1B 0x5B)
//! - OSC = ESC ]  (0x1B 0x5D), terminated with BEL in this crate

// Skip rustfmt for rest of file to preserve manual alignment.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// ==================== Sequence Components ====================

/// ESC character (27 in decimal, 0x1B in hex).
pub const ESC: char = '\x1b';

/// Control Sequence Introducer: ESC [
pub const CSI_START: &str = "\x1b[";

/// Operating System Command start: ESC ]
pub const OSC_START: &str = "\x1b]";

/// Parameter delimiter within OSC sequences.
pub const OSC_DELIMITER: char = ';';

/// BEL (0x07). Audible bell, and the OSC terminator used by [`crate::Shell::write_osc`].
pub const BELL: &str = "\x07";

// ==================== Input Tokens: C0 Controls ====================

/// Ctrl+A: move cursor to the start of the current line.
pub const INPUT_CTRL_A: &str = "\x01";
/// Ctrl+B: move cursor one character left.
pub const INPUT_CTRL_B: &str = "\x02";
/// Ctrl+C: cancel the current line.
pub const INPUT_CTRL_C: &str = "\x03";
/// Ctrl+E: move cursor to the end of the current line.
pub const INPUT_CTRL_E: &str = "\x05";
/// Ctrl+F: move cursor one character right.
pub const INPUT_CTRL_F: &str = "\x06";
/// Shift+Backspace (BS).
pub const INPUT_BACKSPACE_BS: &str = "\x08";
/// Tab.
pub const INPUT_TAB: &str = "\x09";
/// Enter (CR).
pub const INPUT_ENTER: &str = "\r";
/// Backspace (DEL).
pub const INPUT_BACKSPACE_DEL: &str = "\x7f";

// ==================== Input Tokens: Escape Sequences ====================

/// Ctrl+Backspace: delete the word left of the cursor.
pub const INPUT_CTRL_BACKSPACE: &str = "\x1b\x7f";
/// Up arrow.
pub const INPUT_ARROW_UP: &str = "\x1b[A";
/// Down arrow.
pub const INPUT_ARROW_DOWN: &str = "\x1b[B";
/// Right arrow.
pub const INPUT_ARROW_RIGHT: &str = "\x1b[C";
/// Left arrow.
pub const INPUT_ARROW_LEFT: &str = "\x1b[D";
/// Ctrl+Right: move one word right.
pub const INPUT_CTRL_ARROW_RIGHT: &str = "\x1b[1;5C";
/// Ctrl+Left: move one word left.
pub const INPUT_CTRL_ARROW_LEFT: &str = "\x1b[1;5D";
/// Alt+F: move one word right.
pub const INPUT_ALT_F: &str = "\x1bf";
/// Alt+B: move one word left.
pub const INPUT_ALT_B: &str = "\x1bb";
/// Home.
pub const INPUT_HOME: &str = "\x1b[H";
/// End.
pub const INPUT_END: &str = "\x1b[F";

// ==================== Output Sequences ====================

/// CSI D (CUB 1): cursor one cell left.
pub const CURSOR_LEFT: &str = "\x1b[D";
/// CSI C (CUF 1): cursor one cell right.
pub const CURSOR_RIGHT: &str = "\x1b[C";
/// CSI @ (ICH 1): insert one blank cell at the cursor, shifting the row right.
pub const INSERT_BLANK_CELL: &str = "\x1b[@";
/// CSI K (EL 0): erase from the cursor to the end of the row.
pub const ERASE_TO_END_OF_LINE: &str = "\x1b[K";
/// BS followed by CSI P (DCH 1): step left and delete that cell.
pub const BACKSPACE_ERASE: &str = "\x08\x1b[P";
/// Line break written to the terminal.
pub const CRLF: &str = "\r\n";
/// SGR 31: red foreground (error display style).
pub const SGR_FG_RED: &str = "\x1b[31m";
/// SGR 0: reset all attributes.
pub const SGR_RESET: &str = "\x1b[0m";
/// Visual marker written when a line is cancelled with Ctrl+C.
pub const INTERRUPT_MARKER: &str = "^C";

/// CSI n A (CUU n): cursor up `n` rows.
#[must_use]
pub fn cursor_up(rows: usize) -> String { format!("{CSI_START}{rows}A") }

/// Prompt used when [`crate::ShellOptions`] does not name one.
pub const DEFAULT_PROMPT: &str = "> ";
