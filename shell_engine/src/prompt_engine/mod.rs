// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The line buffer and everything that edits it, plus prompt template resolution.
//!
//! The buffer only ever holds printable ASCII and `\n` (see
//! [`crate::is_char_printable`]), so byte offsets and character offsets are the same
//! thing throughout this module. A buffer with `\n` in it spans several logical lines;
//! cursor motion and deletion never leave the logical line the cursor is on.

// Attach sources.
pub mod continuation;
pub mod cursor;
pub mod editing;
pub mod engine;
pub mod prompt_value;
pub mod variables;

// Re-export.
pub use continuation::*;
pub use engine::*;
pub use prompt_value::*;
pub use variables::*;
