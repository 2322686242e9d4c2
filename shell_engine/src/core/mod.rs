// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Leaf utilities with no dependencies on the rest of the engine: the typed event bus,
//! the lifecycle registry, terminal control constants, the write callback handed to
//! commands, and the logging setup.

// Attach sources.
pub mod char_code;
pub mod common;
pub mod constants;
pub mod event_bus;
pub mod lifecycle;
pub mod log;
pub mod terminal_writer;

// Re-export.
pub use char_code::*;
pub use common::*;
pub use constants::*;
pub use event_bus::*;
pub use lifecycle::*;
pub use log::*;
pub use terminal_writer::*;
