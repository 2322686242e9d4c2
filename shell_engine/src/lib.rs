// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_shell_engine
//!
//! An embeddable, host-agnostic shell engine. The host delivers one decoded input token
//! at a time (a printable character, or one complete escape sequence) and the engine
//! replies with a stream of raw terminal bytes that keep a remote display in sync.
//!
//! The engine never touches a rendering surface, a process table, or a filesystem.
//! Those belong to the host, and to the commands the host registers.
//!
//! # Architecture
//!
//! | Module          | Responsibility                                                    |
//! |-----------------|-------------------------------------------------------------------|
//! | `core`          | [`EventEmitter`], [`DisposableStore`], [`TerminalWriter`], logging |
//! | `prompt_engine` | [`PromptEngine`]: line buffer, cursor, continuation, prompt text  |
//! | `command`       | [`Command`], [`CommandHandler`], [`CommandRegistry`]              |
//! | `shell`         | [`Shell`]: input interpreter and the command execution protocol   |
//! | `test_fixtures` | `OutputCapture`, `EventRecorder` (`test_fixtures` feature)        |
//!
//! # Data flow
//!
//! ```text
//! host ── write(token) ──▶ interpret_token() ──▶ PromptEngine edit ──▶ control bytes
//!                                  │
//!                                  └── Enter ──▶ handler chain / CommandRegistry
//!                                                   │
//!                                                   ▼
//!                                   exit code + events ──▶ PromptEngine::reset()
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use r3bl_shell_engine::{Shell, ShellOptions, command_fn, ok};
//!
//! # async fn example() -> miette::Result<()> {
//! let mut shell = Shell::new(ShellOptions::default().with_prompt("$ "));
//! let output = Arc::new(Mutex::new(String::new()));
//! let output_clone = output.clone();
//! let _subscription = shell.events().on_did_write_data.subscribe(move |data: &String| {
//!     output_clone.lock().unwrap().push_str(data);
//! });
//!
//! let _registration = shell.register_command(
//!     "hello",
//!     command_fn(|writer, _argv| async move {
//!         writer.write("hello world");
//!         Ok(0)
//!     }),
//! );
//!
//! shell.start().await;
//! for token in ["h", "e", "l", "l", "o", "\r"] {
//!     shell.write(token).await?;
//! }
//! assert!(output.lock().unwrap().contains("hello world"));
//! ok!()
//! # }
//! ```

// Skip rustfmt for rest of file.
// https://stackoverflow.com/a/75910283/2085356
#![cfg_attr(rustfmt, rustfmt_skip)]

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach sources.
pub mod command;
pub mod core;
pub mod prompt_engine;
pub mod shell;
#[cfg(any(test, feature = "test_fixtures"))]
pub mod test_fixtures;

// Re-export.
pub use command::*;
pub use core::*;
pub use prompt_engine::*;
pub use shell::*;
#[cfg(any(test, feature = "test_fixtures"))]
pub use test_fixtures::*;

/// Syntactic sugar for `Ok(())` or `Ok(value)`.
///
/// ```rust
/// fn foo() -> std::io::Result<()> { r3bl_shell_engine::ok!() }
/// fn bar() -> std::io::Result<u8> { r3bl_shell_engine::ok!(42) }
/// ```
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}
