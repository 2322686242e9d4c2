// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod command_api;
pub mod command_registry;

// Re-export.
pub use command_api::*;
pub use command_registry::*;
