// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{Result as IoResult, Write};

use super::{BELL, EventEmitter, OSC_DELIMITER, OSC_START};

/// The write callback handed to commands. Text written here is fired verbatim on the
/// shell's did-write-data event.
///
/// Cloning is cheap and every clone writes to the same place. This also implements
/// [`std::io::Write`], so `write!` works (invalid UTF-8 is replaced).
#[derive(Clone, Debug)]
pub struct TerminalWriter {
    output: EventEmitter<String>,
}

impl TerminalWriter {
    #[must_use]
    pub fn new(output: EventEmitter<String>) -> Self { Self { output } }

    /// Empty text is not fired.
    pub fn write(&self, text: &str) {
        if !text.is_empty() {
            self.output.fire(&text.to_string());
        }
    }

    /// Emit `ESC ] <id> ; <payload> BEL`. The payload is not escaped.
    pub fn write_osc(&self, id: u32, payload: &str) {
        self.write(&format_osc(id, payload));
    }
}

#[must_use]
pub fn format_osc(id: u32, payload: &str) -> String {
    format!("{OSC_START}{id}{OSC_DELIMITER}{payload}{BELL}")
}

impl Write for TerminalWriter {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        TerminalWriter::write(self, &String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> IoResult<()> { Ok(()) }
}
