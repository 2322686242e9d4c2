// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for observing a shell from tests: [`OutputCapture`] records the terminal
//! output stream, [`EventRecorder`] records the payloads of any other event.

// Attach sources.
pub mod event_recorder;
pub mod output_capture;

// Re-export.
pub use event_recorder::*;
pub use output_capture::*;
