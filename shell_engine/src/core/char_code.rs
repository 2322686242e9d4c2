// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Line feed, the only control character allowed into the line buffer.
pub const CODE_LINE_FEED: u32 = 0x0A;
/// First printable ASCII code (space).
pub const CODE_PRINTABLE_FIRST: u32 = 0x20;
/// Last printable ASCII code (`~`).
pub const CODE_PRINTABLE_LAST: u32 = 0x7E;

/// Characters that may enter the line buffer: printable ASCII and `\n`. Since nothing
/// else gets in, byte offsets into the buffer are also character offsets.
#[must_use]
pub fn is_char_printable(ch: char) -> bool { is_code_printable(u32::from(ch)) }

#[must_use]
pub fn is_code_printable(code: u32) -> bool {
    code == CODE_LINE_FEED || (CODE_PRINTABLE_FIRST..=CODE_PRINTABLE_LAST).contains(&code)
}
