// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap,
          fmt::{Debug, Formatter, Result as FmtResult},
          sync::Arc};

use smallvec::SmallVec;

use super::{Command, CommandHandler, HandlerCommand};
use crate::{Disposable, DisposeHandle, EngineLogger, StdMutex, lock_or_recover};

/// Handle returned by the `register_*` methods. Dispose it to undo the registration.
pub type Registration = DisposeHandle;

type HandlerId = u64;

#[derive(Default)]
struct RegistryState {
    commands: HashMap<String, Arc<dyn Command>>,
    /// In registration order. Consulted in reverse.
    handlers: Vec<(HandlerId, Arc<dyn CommandHandler>)>,
    next_handler_id: HandlerId,
}

/// Name to [`Command`] map, plus the chain of [`CommandHandler`]s consulted before it.
///
/// Cloning yields another handle to the same registry. Lookups snapshot what they need
/// and release the lock before calling into commands or handlers, so those may register
/// or unregister freely.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    state: Arc<StdMutex<RegistryState>>,
    logger: EngineLogger,
}

impl CommandRegistry {
    #[must_use]
    pub fn new(logger: EngineLogger) -> Self {
        Self {
            state: Arc::default(),
            logger,
        }
    }

    /// Registering a name again replaces the previous command. Disposing the returned
    /// handle removes the entry only if `name` still maps to this same `command`.
    pub fn register_command(
        &self,
        name: impl Into<String>,
        command: Arc<dyn Command>,
    ) -> Registration {
        let name = name.into();
        let is_replacing = lock_or_recover(&self.state)
            .commands
            .insert(name.clone(), command.clone())
            .is_some();
        self.logger.scope(|| {
            if is_replacing {
                tracing::debug!(command = %name, "Command re-registered");
            } else {
                tracing::debug!(command = %name, "Command registered");
            }
        });

        let weak_state = Arc::downgrade(&self.state);
        let logger = self.logger.clone();
        Registration::to_disposable(move || {
            let Some(state) = weak_state.upgrade() else {
                return;
            };
            let mut state = lock_or_recover(&state);
            let is_same_command = state
                .commands
                .get(&name)
                .is_some_and(|registered| Arc::ptr_eq(registered, &command));
            if is_same_command {
                state.commands.remove(&name);
                logger.scope(|| tracing::debug!(command = %name, "Command removed"));
            }
        })
    }

    /// The handler is consulted before any handler registered earlier.
    pub fn register_command_handler(&self, handler: Arc<dyn CommandHandler>) -> Registration {
        let id = {
            let mut state = lock_or_recover(&self.state);
            let id = state.next_handler_id;
            state.next_handler_id += 1;
            state.handlers.push((id, handler));
            id
        };
        self.logger
            .scope(|| tracing::debug!(handler_id = id, "Command handler registered"));

        let weak_state = Arc::downgrade(&self.state);
        Registration::to_disposable(move || {
            if let Some(state) = weak_state.upgrade() {
                lock_or_recover(&state)
                    .handlers
                    .retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        lock_or_recover(&self.state).commands.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        lock_or_recover(&self.state).commands.contains_key(name)
    }

    /// Sorted, for help listings and tab completion.
    #[must_use]
    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> =
            lock_or_recover(&self.state).commands.keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn handler_count(&self) -> usize { lock_or_recover(&self.state).handlers.len() }

    /// The first handler, most recently registered first, that claims the line.
    #[must_use]
    pub fn find_claiming_handler(&self, input: &str, argv: &[String]) -> Option<HandlerCommand> {
        self.handlers_most_recent_first()
            .into_iter()
            .find_map(|handler| handler.handle_command(input, argv))
    }

    /// The first `Some` answer, most recently registered handler first.
    #[must_use]
    pub fn should_wrap(&self, input: &str) -> Option<bool> {
        self.handlers_most_recent_first()
            .into_iter()
            .find_map(|handler| handler.should_wrap(input))
    }

    /// Remove every command and handler.
    pub fn clear(&self) {
        let mut state = lock_or_recover(&self.state);
        state.commands.clear();
        state.handlers.clear();
    }

    fn handlers_most_recent_first(&self) -> SmallVec<[Arc<dyn CommandHandler>; 4]> {
        lock_or_recover(&self.state)
            .handlers
            .iter()
            .rev()
            .map(|(_, handler)| handler.clone())
            .collect()
    }
}

impl Disposable for CommandRegistry {
    fn dispose(&mut self) { self.clear(); }
}

impl Debug for CommandRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CommandRegistry")
            .field("command_names", &self.command_names())
            .field("handler_count", &self.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EXIT_CODE_SUCCESS, ExecutedCommand, command_fn};
    use pretty_assertions::assert_eq;

    fn noop_command() -> Arc<dyn Command> { command_fn(|_, _| async { Ok(EXIT_CODE_SUCCESS) }) }

    /// Claims lines starting with `prefix`, reporting `tag` as the command name.
    struct PrefixHandler {
        prefix: &'static str,
        tag: &'static str,
        wrap: Option<bool>,
    }

    impl CommandHandler for PrefixHandler {
        fn handle_command(&self, input: &str, argv: &[String]) -> Option<HandlerCommand> {
            if !input.starts_with(self.prefix) {
                return None;
            }
            let command = ExecutedCommand {
                name: self.tag.to_string(),
                argv: argv.to_vec(),
                command_line: input.to_string(),
            };
            Some(HandlerCommand::new(command, |_| async { Ok(0) }))
        }

        fn should_wrap(&self, _input: &str) -> Option<bool> { self.wrap }
    }

    #[test]
    fn test_register_and_remove() {
        let registry = CommandRegistry::default();
        let mut registration = registry.register_command("ls", noop_command());
        assert!(registry.contains("ls"));

        registration.dispose();

        assert!(registry.get("ls").is_none());
    }

    #[test]
    fn test_stale_registration_does_not_remove_replacement() {
        let registry = CommandRegistry::default();
        let first = noop_command();
        let second = noop_command();
        let mut first_registration = registry.register_command("cd", first);
        let _second_registration = registry.register_command("cd", second.clone());

        first_registration.dispose();

        let registered = registry.get("cd").unwrap();
        assert!(Arc::ptr_eq(&registered, &second));
    }

    #[test]
    fn test_command_names_sorted() {
        let registry = CommandRegistry::default();
        let _a = registry.register_command("rm", noop_command());
        let _b = registry.register_command("echo", noop_command());
        let _c = registry.register_command("help", noop_command());

        assert_eq!(registry.command_names(), vec!["echo", "help", "rm"]);
    }

    #[test]
    fn test_most_recent_handler_wins() {
        let registry = CommandRegistry::default();
        let _older = registry.register_command_handler(Arc::new(PrefixHandler {
            prefix: "git",
            tag: "older",
            wrap: None,
        }));
        let mut newer = registry.register_command_handler(Arc::new(PrefixHandler {
            prefix: "git",
            tag: "newer",
            wrap: None,
        }));
        let argv = vec!["git".to_string(), "status".to_string()];

        let claimed = registry.find_claiming_handler("git status", &argv).unwrap();
        assert_eq!(claimed.command.name, "newer");

        newer.dispose();
        let claimed = registry.find_claiming_handler("git status", &argv).unwrap();
        assert_eq!(claimed.command.name, "older");
        assert!(registry.find_claiming_handler("ls", &["ls".to_string()]).is_none());
    }

    #[test]
    fn test_should_wrap_first_answer_wins() {
        let registry = CommandRegistry::default();
        assert_eq!(registry.should_wrap("x"), None);

        let _older = registry.register_command_handler(Arc::new(PrefixHandler {
            prefix: "",
            tag: "older",
            wrap: Some(true),
        }));
        let _undecided = registry.register_command_handler(Arc::new(PrefixHandler {
            prefix: "",
            tag: "undecided",
            wrap: None,
        }));
        assert_eq!(registry.should_wrap("x"), Some(true));

        let _newer = registry.register_command_handler(Arc::new(PrefixHandler {
            prefix: "",
            tag: "newer",
            wrap: Some(false),
        }));
        assert_eq!(registry.should_wrap("x"), Some(false));
    }

    #[test]
    fn test_clear() {
        let mut registry = CommandRegistry::default();
        let _command = registry.register_command("ls", noop_command());
        let _handler = registry.register_command_handler(Arc::new(PrefixHandler {
            prefix: "",
            tag: "any",
            wrap: None,
        }));

        Disposable::dispose(&mut registry);

        assert!(registry.command_names().is_empty());
        assert_eq!(registry.handler_count(), 0);
    }
}
