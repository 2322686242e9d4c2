// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{DisposableStore, EventEmitter, ExecutedCommand, ExitCode};

/// Payload of [`ShellEvents::on_did_execute_command`]. `exit_code` is `None` only when
/// no command ran (blank line, Ctrl+C).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteCommandEvent {
    pub command: ExecutedCommand,
    pub exit_code: Option<ExitCode>,
}

/// Payload of [`ShellEvents::on_did_press_tab`]. Completion is up to the listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabPressedEvent {
    pub input: String,
    pub cursor_index: usize,
}

/// Every event a [`crate::Shell`] fires. Subscribe through [`crate::Shell::events`].
#[derive(Clone, Debug, Default)]
pub struct ShellEvents {
    pub on_did_change_prompt_input: EventEmitter<String>,
    pub on_before_write_prompt: EventEmitter<()>,
    pub on_did_write_prompt: EventEmitter<()>,
    pub on_before_execute_command: EventEmitter<ExecutedCommand>,
    pub on_did_execute_command: EventEmitter<ExecuteCommandEvent>,
    pub on_did_press_tab: EventEmitter<TabPressedEvent>,
    /// Raw terminal output, to be written verbatim.
    pub on_did_write_data: EventEmitter<String>,
}

impl ShellEvents {
    /// Hand a handle to every emitter to `store`, so disposing the store drops all
    /// listeners.
    pub fn register_all(&self, store: &mut DisposableStore) {
        store.register(self.on_did_change_prompt_input.clone());
        store.register(self.on_before_write_prompt.clone());
        store.register(self.on_did_write_prompt.clone());
        store.register(self.on_before_execute_command.clone());
        store.register(self.on_did_execute_command.clone());
        store.register(self.on_did_press_tab.clone());
        store.register(self.on_did_write_data.clone());
    }
}
