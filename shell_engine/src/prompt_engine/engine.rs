// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::HashMap;

use super::{PromptValue, resolve_prompt_variables};
use crate::{CRLF, DEFAULT_PROMPT, DisposableStore, EngineLogger, EventEmitter, TerminalWriter};

/// Everything the prompt engine reports. The shell forwards these into its own
/// [`crate::ShellEvents`].
#[derive(Clone, Debug, Default)]
pub struct PromptEvents {
    /// The new buffer text. Fires only when the text actually changes.
    pub on_did_change_prompt_input: EventEmitter<String>,
    pub on_before_write_prompt: EventEmitter<()>,
    pub on_did_write_prompt: EventEmitter<()>,
    /// Raw terminal output, to be written verbatim.
    pub on_did_write_data: EventEmitter<String>,
}

impl PromptEvents {
    /// Hand a handle to every emitter to `store`, so disposing the store drops all
    /// listeners.
    pub fn register_all(&self, store: &mut DisposableStore) {
        store.register(self.on_did_change_prompt_input.clone());
        store.register(self.on_before_write_prompt.clone());
        store.register(self.on_did_write_prompt.clone());
        store.register(self.on_did_write_data.clone());
    }
}

/// Owns the line buffer and cursor. The editing operations live in `editing.rs`, the
/// cursor motions in `cursor.rs`.
///
/// Operations that can't apply (cursor already at the line boundary, nothing to delete)
/// return `false` and write nothing. The caller turns that into a bell.
#[derive(Debug)]
pub struct PromptEngine {
    pub(super) template: PromptValue,
    pub(super) variables: HashMap<String, PromptValue>,
    pub(super) input: String,
    pub(super) cursor_index: usize,
    pub(super) events: PromptEvents,
    pub(super) writer: TerminalWriter,
    pub(super) logger: EngineLogger,
}

impl PromptEngine {
    pub fn new(template: impl Into<PromptValue>, logger: EngineLogger) -> Self {
        let events = PromptEvents::default();
        let writer = TerminalWriter::new(events.on_did_write_data.clone());
        Self {
            template: template.into(),
            variables: HashMap::new(),
            input: String::new(),
            cursor_index: 0,
            events,
            writer,
            logger,
        }
    }

    #[must_use]
    pub fn events(&self) -> &PromptEvents { &self.events }

    #[must_use]
    pub fn input(&self) -> &str { &self.input }

    #[must_use]
    pub fn cursor_index(&self) -> usize { self.cursor_index }

    /// Takes effect on the next [`PromptEngine::reset`].
    pub fn set_template(&mut self, template: impl Into<PromptValue>) {
        self.template = template.into();
    }

    /// Bind `name`, replacing any earlier binding. `None` removes the binding.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Option<PromptValue>) {
        let name = name.into();
        match value {
            Some(value) => {
                self.variables.insert(name, value);
            }
            None => {
                self.variables.remove(&name);
            }
        }
    }

    /// Resolve the template, then the `${name}` placeholders in it. A failing async
    /// template producer is logged and [`DEFAULT_PROMPT`] is used instead.
    pub async fn resolve_prompt(&self) -> String {
        let unresolved = match self.template.resolve().await {
            Ok(text) => text,
            Err(report) => {
                self.logger.scope(|| {
                    tracing::warn!(error = %report, "Prompt template producer failed");
                });
                DEFAULT_PROMPT.to_string()
            }
        };
        resolve_prompt_variables(&unresolved, &self.variables, &self.logger).await
    }

    /// Start a new prompt cycle: clear the buffer, write a line break (unless
    /// suppressed), then write the freshly resolved prompt between the before and
    /// after prompt write events.
    pub async fn reset(&mut self, suppress_leading_newline: bool) {
        self.set_input(String::new());
        self.cursor_index = 0;
        if !suppress_leading_newline {
            self.write(CRLF);
        }
        self.events.on_before_write_prompt.fire(&());
        let prompt = self.resolve_prompt().await;
        self.write(&prompt);
        self.events.on_did_write_prompt.fire(&());
    }

    pub(super) fn write(&self, text: &str) { self.writer.write(text); }

    pub(super) fn set_input(&mut self, text: String) {
        if self.input != text {
            self.input = text;
            self.events.on_did_change_prompt_input.fire(&self.input);
        }
    }

    /// Byte offset where the logical line holding the cursor starts.
    #[must_use]
    pub fn current_line_start(&self) -> usize {
        self.input[..self.cursor_index]
            .rfind('\n')
            .map_or(0, |newline_index| newline_index + 1)
    }

    /// Byte offset where the logical line holding the cursor ends (exclusive).
    #[must_use]
    pub fn current_line_end(&self) -> usize {
        self.input[self.cursor_index..]
            .find('\n')
            .map_or(self.input.len(), |offset| self.cursor_index + offset)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventRecorder, OutputCapture};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_reset_writes_prompt_between_events() {
        let mut engine = PromptEngine::new("${user}> ", EngineLogger::default());
        engine.set_variable("user", Some(PromptValue::from("r3bl")));
        let (capture, _sub_data) = OutputCapture::attach(&engine.events().on_did_write_data);

        let order = std::sync::Arc::new(crate::StdMutex::new(vec![]));
        let order_before = order.clone();
        let capture_before = capture.clone();
        let _sub_before = engine.events().on_before_write_prompt.subscribe(move |_: &()| {
            crate::lock_or_recover(&order_before)
                .push(format!("before:{}", capture_before.get_copy_of_buffer_as_string()));
        });
        let order_after = order.clone();
        let capture_after = capture.clone();
        let _sub_after = engine.events().on_did_write_prompt.subscribe(move |_: &()| {
            crate::lock_or_recover(&order_after)
                .push(format!("after:{}", capture_after.get_copy_of_buffer_as_string()));
        });

        engine.reset(false).await;

        assert_eq!(
            *crate::lock_or_recover(&order),
            vec!["before:\r\n".to_string(), "after:\r\nr3bl> ".to_string()]
        );
    }

    #[tokio::test]
    async fn test_reset_clears_buffer_and_suppresses_newline() {
        let mut engine = PromptEngine::new("$ ", EngineLogger::default());
        assert!(engine.insert_char('x'));
        let (inputs, _sub_input) = EventRecorder::attach(&engine.events().on_did_change_prompt_input);
        let (capture, _sub_data) = OutputCapture::attach(&engine.events().on_did_write_data);

        engine.reset(true).await;

        assert_eq!(engine.input(), "");
        assert_eq!(engine.cursor_index(), 0);
        assert_eq!(inputs.events(), vec![String::new()]);
        assert_eq!(capture.get_copy_of_buffer_as_string(), "$ ");
    }

    #[tokio::test]
    async fn test_template_producer_and_variable_removal() {
        let mut engine = PromptEngine::new(PromptValue::from_fn(|| "${x}#".into()), EngineLogger::default());
        engine.set_variable("x", Some(PromptValue::from("1")));
        engine.set_variable("x", Some(PromptValue::from("2")));
        assert_eq!(engine.resolve_prompt().await, "2#");

        engine.set_variable("x", None);
        assert_eq!(engine.resolve_prompt().await, "${x}#");
    }

    #[tokio::test]
    async fn test_failing_template_falls_back_to_default_prompt() {
        let engine = PromptEngine::new(
            PromptValue::from_async_fn(|| async { Err(miette::miette!("boom")) }),
            EngineLogger::default(),
        );
        assert_eq!(engine.resolve_prompt().await, DEFAULT_PROMPT);
    }

    #[test]
    fn test_input_changed_fires_only_on_change() {
        let mut engine = PromptEngine::new("> ", EngineLogger::default());
        let (inputs, _sub) = EventRecorder::attach(&engine.events().on_did_change_prompt_input);

        engine.set_input("a".into());
        engine.set_input("a".into());
        engine.set_input(String::new());

        assert_eq!(inputs.events(), vec!["a".to_string(), String::new()]);
    }

    #[test]
    fn test_current_line_bounds() {
        let (engine, _capture, _sub) = test_helpers::engine_with_input("ab\ncde\nf", 5);
        assert_eq!(engine.current_line_start(), 3);
        assert_eq!(engine.current_line_end(), 6);

        let (engine, _capture, _sub) = test_helpers::engine_with_input("ab\ncde", 3);
        assert_eq!(engine.current_line_start(), 3);
        assert_eq!(engine.current_line_end(), 6);
    }
}
