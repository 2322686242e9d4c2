// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::Diagnostic;

/// The only error that escapes [`crate::Shell::write`]. Everything else (unknown
/// commands, failing commands, editing past a boundary) is reported on the terminal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum ShellError {
    /// Control bytes in `sequence` are escaped in the message (`\u{1b}[Z`).
    #[error("Unrecognized escape sequence {}", .sequence.escape_debug())]
    #[diagnostic(
        code(r3bl_shell_engine::input::unrecognized_escape_sequence),
        help("Deliver one complete, supported escape sequence per write. Drop this token, don't resubmit it")
    )]
    UnrecognizedEscapeSequence { sequence: String },
}
