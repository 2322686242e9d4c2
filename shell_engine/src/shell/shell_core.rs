// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use tracing::Dispatch;

use super::{InputAction, ShellError, ShellEvents, ShellOptions, Size, TabPressedEvent,
            interpret_token};
use crate::{BELL, CRLF, Command, CommandHandler, CommandRegistry, DisposableStore,
            EngineLogger, PromptEngine, PromptValue, Registration, TerminalWriter,
            forward_event};

/// The composition root. Owns the [`PromptEngine`] and the [`CommandRegistry`], turns
/// input tokens into edits and command runs, and fires [`ShellEvents`].
///
/// Input must be delivered one token at a time: await each [`Shell::write`] before
/// sending the next token, or use [`Shell::run_input_loop`] which does that for you.
///
/// Nothing is released on drop. Call [`Shell::dispose`].
#[derive(Debug)]
pub struct Shell {
    pub(super) options: ShellOptions,
    pub(super) dimensions: Size,
    pub(super) prompt: PromptEngine,
    pub(super) commands: CommandRegistry,
    pub(super) events: ShellEvents,
    pub(super) writer: TerminalWriter,
    pub(super) disposables: DisposableStore,
    pub(super) logger: EngineLogger,
    pub(super) is_disposed: bool,
}

impl Shell {
    /// Logs go to the host's default subscriber, if any.
    #[must_use]
    pub fn new(options: ShellOptions) -> Self { Self::create(options, EngineLogger::default()) }

    /// Logs go to `dispatch` only. See [`crate::try_create_dispatch`].
    #[must_use]
    pub fn with_logger(options: ShellOptions, dispatch: Dispatch) -> Self {
        Self::create(options, EngineLogger::new(dispatch))
    }

    fn create(options: ShellOptions, logger: EngineLogger) -> Self {
        let prompt = PromptEngine::new(options.prompt.clone(), logger.clone());
        let commands = CommandRegistry::new(logger.clone());
        let events = ShellEvents::default();
        let writer = TerminalWriter::new(events.on_did_write_data.clone());

        let mut disposables = DisposableStore::new();
        {
            let from = prompt.events();
            disposables.register(forward_event(
                &from.on_did_change_prompt_input,
                &events.on_did_change_prompt_input,
            ));
            disposables.register(forward_event(
                &from.on_before_write_prompt,
                &events.on_before_write_prompt,
            ));
            disposables.register(forward_event(
                &from.on_did_write_prompt,
                &events.on_did_write_prompt,
            ));
            disposables.register(forward_event(
                &from.on_did_write_data,
                &events.on_did_write_data,
            ));
            from.register_all(&mut disposables);
        }
        events.register_all(&mut disposables);
        disposables.register(commands.clone());

        Self {
            dimensions: options.dimensions,
            options,
            prompt,
            commands,
            events,
            writer,
            disposables,
            logger,
            is_disposed: false,
        }
    }

    #[must_use]
    pub fn options(&self) -> &ShellOptions { &self.options }

    #[must_use]
    pub fn events(&self) -> &ShellEvents { &self.events }

    #[must_use]
    pub fn commands(&self) -> &CommandRegistry { &self.commands }

    #[must_use]
    pub fn prompt_input(&self) -> &str { self.prompt.input() }

    #[must_use]
    pub fn prompt_cursor_index(&self) -> usize { self.prompt.cursor_index() }

    #[must_use]
    pub fn dimensions(&self) -> Size { self.dimensions }

    #[must_use]
    pub fn is_disposed(&self) -> bool { self.is_disposed }

    /// A handle that writes to this shell's output stream.
    #[must_use]
    pub fn terminal_writer(&self) -> TerminalWriter { self.writer.clone() }

    /// Takes effect on the next prompt.
    pub fn set_prompt(&mut self, template: impl Into<PromptValue>) {
        self.prompt.set_template(template);
    }

    /// `None` removes the binding. Takes effect on the next prompt.
    pub fn set_prompt_variable(&mut self, name: impl Into<String>, value: Option<PromptValue>) {
        self.prompt.set_variable(name, value);
    }

    pub fn register_command(
        &self,
        name: impl Into<String>,
        command: Arc<dyn Command>,
    ) -> Registration {
        if self.is_disposed {
            return Registration::inert();
        }
        self.commands.register_command(name, command)
    }

    pub fn register_command_handler(&self, handler: Arc<dyn CommandHandler>) -> Registration {
        if self.is_disposed {
            return Registration::inert();
        }
        self.commands.register_command_handler(handler)
    }

    /// Store the new dimensions. Nothing is redrawn.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.dimensions = Size { columns, rows };
    }

    /// Emit `ESC ] <id> ; <payload> BEL`, byte exact.
    pub fn write_osc(&self, id: u32, payload: &str) { self.writer.write_osc(id, payload); }

    /// Write the welcome message (if any), then the first prompt.
    pub async fn start(&mut self) {
        if self.is_disposed {
            return;
        }
        if let Some(welcome_message) = &self.options.welcome_message {
            self.writer.write(&format!("{welcome_message}{CRLF}"));
        }
        self.prompt.reset(true).await;
    }

    /// Release forwarders, emitters, and registrations. The shell is inert afterwards:
    /// writes are ignored and nothing is fired.
    pub fn dispose(&mut self) {
        if self.is_disposed {
            return;
        }
        self.is_disposed = true;
        self.disposables.dispose_all();
        self.logger.scope(|| tracing::debug!("Shell disposed"));
    }

    /// Handle one input token. Editing that can't apply rings the bell.
    ///
    /// # Errors
    ///
    /// [`ShellError::UnrecognizedEscapeSequence`] if `token` starts with ESC and is not
    /// a supported sequence. The shell state is unchanged; don't resubmit the token.
    pub async fn write(&mut self, token: &str) -> Result<(), ShellError> {
        if self.is_disposed {
            self.logger
                .scope(|| tracing::debug!(token = %token.escape_debug(), "Write to disposed shell ignored"));
            return Ok(());
        }

        let action = match interpret_token(token) {
            Ok(action) => action,
            Err(error) => {
                self.logger.scope(|| tracing::warn!(%error, "Rejected input token"));
                return Err(error);
            }
        };
        self.logger.scope(|| tracing::trace!(%action, "Input action"));

        match action {
            InputAction::Interrupt => self.cancel_line().await,
            InputAction::Enter => self.handle_enter().await,
            InputAction::Backspace => {
                let result = self.prompt.backspace();
                self.bell_if_false(result);
            }
            InputAction::DeleteWordLeft => {
                let result = self.prompt.delete_cursor_word_left();
                self.bell_if_false(result);
            }
            InputAction::HistoryPrevious | InputAction::HistoryNext => self.bell(),
            InputAction::CursorRight => {
                let result = self.prompt.move_cursor_relative(1);
                self.bell_if_false(result);
            }
            InputAction::CursorLeft => {
                let result = self.prompt.move_cursor_relative(-1);
                self.bell_if_false(result);
            }
            InputAction::CursorWordRight => {
                let result = self.prompt.move_cursor_word_right();
                self.bell_if_false(result);
            }
            InputAction::CursorWordLeft => {
                let result = self.prompt.move_cursor_word_left();
                self.bell_if_false(result);
            }
            InputAction::CursorLineStart => {
                let result = self.prompt.move_cursor_start_of_line();
                self.bell_if_false(result);
            }
            InputAction::CursorLineEnd => {
                let result = self.prompt.move_cursor_end_of_line();
                self.bell_if_false(result);
            }
            InputAction::Tab => self.events.on_did_press_tab.fire(&TabPressedEvent {
                input: self.prompt.input().to_string(),
                cursor_index: self.prompt.cursor_index(),
            }),
            InputAction::Insert(text) => {
                for ch in text.chars() {
                    let result = self.prompt.insert_char(ch);
                    self.bell_if_false(result);
                }
            }
            InputAction::Ignore => {}
        }

        Ok(())
    }

    fn bell(&self) { self.writer.write(BELL); }

    fn bell_if_false(&self, result: bool) {
        if !result {
            self.bell();
        }
    }
}
