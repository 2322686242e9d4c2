// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod dispatcher;
pub mod input_interpreter;
pub mod shell_core;
pub mod shell_error;
pub mod shell_events;
pub mod shell_input;
pub mod shell_options;

// Re-export.
pub use input_interpreter::*;
pub use shell_core::*;
pub use shell_error::*;
pub use shell_events::*;
pub use shell_input::*;
pub use shell_options::*;
