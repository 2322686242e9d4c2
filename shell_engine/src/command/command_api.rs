// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The contracts between the shell and the commands a host plugs into it.

use std::{fmt::{Debug, Formatter, Result as FmtResult},
          future::Future,
          marker::PhantomData,
          sync::Arc};

use async_trait::async_trait;
use futures_util::{FutureExt, future::BoxFuture};
use serde::{Deserialize, Serialize};

use crate::TerminalWriter;

pub type ExitCode = i32;

pub const EXIT_CODE_SUCCESS: ExitCode = 0;
pub const EXIT_CODE_COMMAND_NOT_FOUND: ExitCode = 1;
/// Reserved for a command that returned an error or panicked.
pub const EXIT_CODE_COMMAND_FAILED: ExitCode = -1;

/// What was submitted. Built once per submitted line. For a blank line or Ctrl+C the
/// name is empty and `argv` is `[""]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedCommand {
    pub name: String,
    pub argv: Vec<String>,
    pub command_line: String,
}

impl ExecutedCommand {
    /// The record used when no command runs.
    #[must_use]
    pub fn empty(command_line: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            argv: vec![String::new()],
            command_line: command_line.into(),
        }
    }

    /// `argv` is the submitted line, trimmed, split on single spaces. No quote handling,
    /// so `a  b` gives `["a", "", "b"]`.
    #[must_use]
    pub fn from_command_line(command_line: impl Into<String>) -> Self {
        let command_line = command_line.into();
        let argv: Vec<String> = command_line.trim().split(' ').map(str::to_string).collect();
        let name = argv.first().cloned().unwrap_or_default();
        Self {
            name,
            argv,
            command_line,
        }
    }
}

/// A named command. `argv[0]` is the command name. Write output through `writer`.
///
/// Returning `Err` (or panicking) is reported to the user in red and yields
/// [`EXIT_CODE_COMMAND_FAILED`].
#[async_trait]
pub trait Command: Send + Sync {
    async fn run(&self, writer: TerminalWriter, argv: Vec<String>) -> miette::Result<ExitCode>;
}

/// Adapts an async closure into a [`Command`]. Create it with [`command_fn`].
pub struct FnCommand<F, Fut> {
    run_fn: F,
    _phantom: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<F, Fut> Command for FnCommand<F, Fut>
where
    F: Fn(TerminalWriter, Vec<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = miette::Result<ExitCode>> + Send + 'static,
{
    async fn run(&self, writer: TerminalWriter, argv: Vec<String>) -> miette::Result<ExitCode> {
        (self.run_fn)(writer, argv).await
    }
}

impl<F, Fut> Debug for FnCommand<F, Fut> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult { f.write_str("FnCommand") }
}

pub fn command_fn<F, Fut>(run_fn: F) -> Arc<dyn Command>
where
    F: Fn(TerminalWriter, Vec<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = miette::Result<ExitCode>> + Send + 'static,
{
    Arc::new(FnCommand {
        run_fn,
        _phantom: PhantomData,
    })
}

type Runner = Box<dyn FnOnce(TerminalWriter) -> BoxFuture<'static, miette::Result<ExitCode>> + Send>;

/// A command line claimed by a [`CommandHandler`]: the record the shell reports, plus
/// the work to do. Nothing runs until the shell calls [`HandlerCommand::run`].
pub struct HandlerCommand {
    pub command: ExecutedCommand,
    runner: Runner,
}

impl HandlerCommand {
    pub fn new<F, Fut>(command: ExecutedCommand, runner: F) -> Self
    where
        F: FnOnce(TerminalWriter) -> Fut + Send + 'static,
        Fut: Future<Output = miette::Result<ExitCode>> + Send + 'static,
    {
        Self {
            command,
            runner: Box::new(move |writer| runner(writer).boxed()),
        }
    }

    /// # Errors
    ///
    /// Whatever the runner returns.
    pub async fn run(self, writer: TerminalWriter) -> miette::Result<ExitCode> {
        (self.runner)(writer).await
    }
}

impl Debug for HandlerCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("HandlerCommand")
            .field("command", &self.command)
            .finish_non_exhaustive()
    }
}

/// Intercepts submitted lines before the [`crate::CommandRegistry`] lookup. Handlers are
/// consulted most recently registered first; the first to return `Some` wins.
pub trait CommandHandler: Send + Sync {
    /// `input` is the whole submitted line, `argv` is its split form.
    fn handle_command(&self, input: &str, argv: &[String]) -> Option<HandlerCommand>;

    /// On Enter, `Some(true)` keeps the line open (a newline is inserted) and
    /// `Some(false)` submits it. `None` defers to the next handler, and finally to the
    /// open quote check.
    fn should_wrap(&self, _input: &str) -> Option<bool> { None }
}
