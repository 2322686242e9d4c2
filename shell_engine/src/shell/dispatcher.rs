// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The command execution protocol run on Enter and on Ctrl+C.
//!
//! Event order for every submitted line:
//! 1. before-execute, with the record of what is about to run.
//! 2. The command runs (or `<name>: command not found` is written).
//! 3. did-execute, with the settled exit code.
//! 4. A fresh prompt.
//!
//! A blank line and Ctrl+C skip step 2 and report no exit code.

use std::{any::Any, future::Future, panic::AssertUnwindSafe};

use futures_util::FutureExt;

use super::{ExecuteCommandEvent, Shell};
use crate::{CRLF, EXIT_CODE_COMMAND_FAILED, EXIT_CODE_COMMAND_NOT_FOUND, EngineLogger,
            ExecutedCommand, ExitCode, INTERRUPT_MARKER, SGR_FG_RED, SGR_RESET,
            TerminalWriter, should_continue_line};

impl Shell {
    /// Insert a newline if the line continues, otherwise submit it. Registered handlers
    /// decide first; the open quote check decides if none of them does.
    pub(super) async fn handle_enter(&mut self) {
        let input = self.prompt.input().to_string();
        let should_wrap = self
            .commands
            .should_wrap(&input)
            .unwrap_or_else(|| should_continue_line(&input));

        if should_wrap {
            self.prompt.insert_char('\n');
        } else {
            self.run_command(input).await;
        }
    }

    pub(super) async fn run_command(&mut self, input: String) {
        let parsed = ExecutedCommand::from_command_line(input.as_str());

        if parsed.name.is_empty() {
            self.report_blank_line(ExecutedCommand::empty(input)).await;
            return;
        }

        self.writer.write(CRLF);
        let name = parsed.name.clone();

        let (command, exit_code) = match self.commands.find_claiming_handler(&input, &parsed.argv) {
            Some(handler_command) => {
                let command = handler_command.command.clone();
                self.events.on_before_execute_command.fire(&command);
                let run = handler_command.run(self.writer.clone());
                let exit_code = settle(&name, run, &self.writer, &self.logger).await;
                (command, exit_code)
            }
            None => {
                self.events.on_before_execute_command.fire(&parsed);
                let exit_code = match self.commands.get(&name) {
                    Some(registered) => {
                        let run = registered.run(self.writer.clone(), parsed.argv.clone());
                        settle(&name, run, &self.writer, &self.logger).await
                    }
                    None => {
                        self.writer.write(&format!("{name}: command not found"));
                        EXIT_CODE_COMMAND_NOT_FOUND
                    }
                };
                (parsed, exit_code)
            }
        };

        self.logger.scope(|| {
            tracing::debug!(
                command = %command.name,
                command_line = %command.command_line,
                exit_code,
                "Command executed"
            );
        });
        self.events.on_did_execute_command.fire(&ExecuteCommandEvent {
            command,
            exit_code: Some(exit_code),
        });
        self.prompt.reset(false).await;
    }

    /// Ctrl+C: drop the line, mark the interruption, start a fresh prompt.
    pub(super) async fn cancel_line(&mut self) {
        let command = ExecutedCommand::empty(self.prompt.input());
        self.events.on_before_execute_command.fire(&command);
        self.writer
            .write(&format!("{SGR_FG_RED}{INTERRUPT_MARKER}{SGR_RESET}"));
        self.events.on_did_execute_command.fire(&ExecuteCommandEvent {
            command,
            exit_code: None,
        });
        self.prompt.reset(false).await;
    }

    async fn report_blank_line(&mut self, command: ExecutedCommand) {
        self.events.on_before_execute_command.fire(&command);
        self.events.on_did_execute_command.fire(&ExecuteCommandEvent {
            command,
            exit_code: None,
        });
        self.prompt.reset(false).await;
    }
}

/// Await `run` and turn every outcome into an exit code. An `Err` or a panic is written
/// to the terminal in red and yields [`EXIT_CODE_COMMAND_FAILED`].
async fn settle(
    name: &str,
    run: impl Future<Output = miette::Result<ExitCode>>,
    writer: &TerminalWriter,
    logger: &EngineLogger,
) -> ExitCode {
    let message = match AssertUnwindSafe(run).catch_unwind().await {
        Ok(Ok(exit_code)) => return exit_code,
        Ok(Err(report)) => report.to_string(),
        Err(panic_payload) => panic_message(panic_payload.as_ref()),
    };

    logger.scope(|| tracing::warn!(command = %name, error = %message, "Command failed"));
    writer.write(&render_failure(name, &message));
    EXIT_CODE_COMMAND_FAILED
}

fn panic_message(panic_payload: &(dyn Any + Send)) -> String {
    if let Some(message) = panic_payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic_payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::new()
    }
}

fn render_failure(name: &str, message: &str) -> String {
    if message.is_empty() {
        format!("{SGR_FG_RED}{name}: failed{SGR_RESET}")
    } else {
        format!("{SGR_FG_RED}{name}: {message}{SGR_RESET}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{CommandHandler, EventRecorder, HandlerCommand, OutputCapture, ShellOptions,
                StdMutex, Subscription, command_fn, lock_or_recover};
    use pretty_assertions::assert_eq;

    struct Fixture {
        shell: Shell,
        output: OutputCapture,
        before: EventRecorder<ExecutedCommand>,
        after: EventRecorder<ExecuteCommandEvent>,
        _subscriptions: Vec<Subscription>,
    }

    async fn fixture() -> Fixture {
        let mut shell = Shell::new(ShellOptions::default());
        let (output, sub_output) = OutputCapture::attach(&shell.events().on_did_write_data);
        let (before, sub_before) = EventRecorder::attach(&shell.events().on_before_execute_command);
        let (after, sub_after) = EventRecorder::attach(&shell.events().on_did_execute_command);
        shell.start().await;
        output.clear();
        Fixture {
            shell,
            output,
            before,
            after,
            _subscriptions: vec![sub_output, sub_before, sub_after],
        }
    }

    async fn submit(shell: &mut Shell, line: &str) {
        for ch in line.chars() {
            shell.write(&ch.to_string()).await.unwrap();
        }
        shell.write("\r").await.unwrap();
    }

    /// Claims any line starting with `prefix`.
    struct ClaimingHandler {
        prefix: &'static str,
        output: &'static str,
        exit_code: ExitCode,
    }

    impl CommandHandler for ClaimingHandler {
        fn handle_command(&self, input: &str, argv: &[String]) -> Option<HandlerCommand> {
            if !input.starts_with(self.prefix) {
                return None;
            }
            let output = self.output;
            let exit_code = self.exit_code;
            let command = ExecutedCommand {
                name: format!("claimed:{}", argv[0]),
                argv: argv.to_vec(),
                command_line: input.to_string(),
            };
            Some(HandlerCommand::new(command, move |writer| async move {
                writer.write(output);
                Ok(exit_code)
            }))
        }
    }

    struct WrapEverything;

    impl CommandHandler for WrapEverything {
        fn handle_command(&self, _input: &str, _argv: &[String]) -> Option<HandlerCommand> { None }

        fn should_wrap(&self, input: &str) -> Option<bool> { Some(!input.ends_with(';')) }
    }

    /// Claims every line with a runner that fails, by `Err` or by panic.
    struct FailingHandler {
        panics: bool,
    }

    impl CommandHandler for FailingHandler {
        fn handle_command(&self, input: &str, argv: &[String]) -> Option<HandlerCommand> {
            let panics = self.panics;
            let command = ExecutedCommand {
                name: argv[0].clone(),
                argv: argv.to_vec(),
                command_line: input.to_string(),
            };
            Some(HandlerCommand::new(command, move |_writer| async move {
                if panics {
                    panic!("kaboom");
                }
                Err(miette::miette!("kaboom"))
            }))
        }
    }

    #[tokio::test]
    async fn test_blank_submission() {
        let mut it = fixture().await;

        submit(&mut it.shell, "").await;

        let expected = ExecutedCommand {
            name: String::new(),
            argv: vec![String::new()],
            command_line: String::new(),
        };
        assert_eq!(it.before.events(), vec![expected.clone()]);
        assert_eq!(
            it.after.events(),
            vec![ExecuteCommandEvent {
                command: expected,
                exit_code: None
            }]
        );
        assert_eq!(it.output.get_copy_of_buffer_as_string(), "\r\n> ");
    }

    #[tokio::test]
    async fn test_whitespace_only_submission_is_blank() {
        let mut it = fixture().await;

        submit(&mut it.shell, "   ").await;

        assert_eq!(it.after.events()[0].command, ExecutedCommand::empty("   "));
        assert_eq!(it.after.events()[0].exit_code, None);
    }

    #[tokio::test]
    async fn test_command_not_found() {
        let mut it = fixture().await;

        submit(&mut it.shell, "foo").await;

        assert_eq!(
            it.output.get_copy_of_buffer_as_string(),
            "foo\r\nfoo: command not found\r\n> "
        );
        assert_eq!(it.before.events()[0], ExecutedCommand::from_command_line("foo"));
        assert_eq!(it.after.events()[0].exit_code, Some(EXIT_CODE_COMMAND_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_registered_command_gets_argv_and_exit_code() {
        let mut it = fixture().await;
        let seen_argv = Arc::new(StdMutex::new(vec![]));
        let seen_argv_clone = seen_argv.clone();
        let _registration = it.shell.register_command(
            "echo",
            command_fn(move |writer, argv| {
                let seen_argv = seen_argv_clone.clone();
                async move {
                    writer.write(&argv[1..].join(" "));
                    *lock_or_recover(&seen_argv) = argv;
                    Ok(3)
                }
            }),
        );

        submit(&mut it.shell, "echo hi  there").await;

        assert_eq!(*lock_or_recover(&seen_argv), vec!["echo", "hi", "", "there"]);
        assert!(it
            .output
            .get_copy_of_buffer_as_string()
            .ends_with("\r\nhi  there\r\n> "));
        assert_eq!(it.after.events()[0].exit_code, Some(3));
        assert_eq!(it.shell.prompt_input(), "");
    }

    #[tokio::test]
    async fn test_command_error_yields_minus_one_and_resets() {
        let mut it = fixture().await;
        let _registration = it.shell.register_command(
            "boom",
            command_fn(|_, _| async { Err(miette::miette!("disk on fire")) }),
        );

        submit(&mut it.shell, "boom").await;

        assert_eq!(
            it.output.get_copy_of_buffer_as_string(),
            "boom\r\n\x1b[31mboom: disk on fire\x1b[0m\r\n> "
        );
        assert_eq!(it.after.events()[0].exit_code, Some(EXIT_CODE_COMMAND_FAILED));
        assert_eq!(it.shell.prompt_input(), "");
    }

    #[tokio::test]
    async fn test_command_panic_yields_minus_one() {
        let mut it = fixture().await;
        let _registration = it.shell.register_command(
            "crash",
            command_fn(|_, _| async {
                if true {
                    panic!("index out of range");
                }
                Ok(0)
            }),
        );

        submit(&mut it.shell, "crash").await;

        assert!(it
            .output
            .get_copy_of_buffer_as_string()
            .contains("\x1b[31mcrash: index out of range\x1b[0m"));
        assert_eq!(it.after.events()[0].exit_code, Some(EXIT_CODE_COMMAND_FAILED));

        // The shell keeps working afterwards.
        submit(&mut it.shell, "crash").await;
        assert_eq!(it.after.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_error_message_renders_failed() {
        let mut it = fixture().await;
        let _registration = it.shell.register_command(
            "quiet",
            command_fn(|_, _| async { Err(miette::miette!("")) }),
        );

        submit(&mut it.shell, "quiet").await;

        assert!(it
            .output
            .get_copy_of_buffer_as_string()
            .contains("\x1b[31mquiet: failed\x1b[0m"));
    }

    #[tokio::test]
    async fn test_before_execute_fires_before_run() {
        let mut it = fixture().await;
        let order = Arc::new(StdMutex::new(vec![]));
        let order_before = order.clone();
        let _sub = it
            .shell
            .events()
            .on_before_execute_command
            .subscribe(move |command: &ExecutedCommand| {
                lock_or_recover(&order_before).push(format!("before:{}", command.name));
            });
        let order_run = order.clone();
        let _registration = it.shell.register_command(
            "pwd",
            command_fn(move |_, _| {
                let order_run = order_run.clone();
                async move {
                    lock_or_recover(&order_run).push("run".to_string());
                    Ok(0)
                }
            }),
        );

        submit(&mut it.shell, "pwd").await;

        assert_eq!(*lock_or_recover(&order), vec!["before:pwd", "run"]);
    }

    #[tokio::test]
    async fn test_claimed_command_error_yields_minus_one_and_resets() {
        assert_claimed_command_failure(false).await;
    }

    #[tokio::test]
    async fn test_claimed_command_panic_yields_minus_one_and_resets() {
        assert_claimed_command_failure(true).await;
    }

    async fn assert_claimed_command_failure(panics: bool) {
        let mut it = fixture().await;
        let _handler = it
            .shell
            .register_command_handler(Arc::new(FailingHandler { panics }));

        submit(&mut it.shell, "x").await;

        assert_eq!(
            it.output.get_copy_of_buffer_as_string(),
            "x\r\n\x1b[31mx: kaboom\x1b[0m\r\n> "
        );
        assert_eq!(it.before.len(), 1);
        assert_eq!(it.after.len(), 1);
        assert_eq!(it.after.events()[0].command.name, "x");
        assert_eq!(it.after.events()[0].exit_code, Some(EXIT_CODE_COMMAND_FAILED));
        assert_eq!(it.shell.prompt_input(), "");
        assert_eq!(it.shell.prompt_cursor_index(), 0);
    }

    #[tokio::test]
    async fn test_most_recent_handler_claims_before_registry() {
        let mut it = fixture().await;
        let _command = it.shell.register_command(
            "git",
            command_fn(|writer, _| async move {
                writer.write("registry");
                Ok(0)
            }),
        );
        let _older = it.shell.register_command_handler(Arc::new(ClaimingHandler {
            prefix: "git",
            output: "older",
            exit_code: 4,
        }));
        let _newer = it.shell.register_command_handler(Arc::new(ClaimingHandler {
            prefix: "git",
            output: "newer",
            exit_code: 5,
        }));

        submit(&mut it.shell, "git log").await;

        let output = it.output.get_copy_of_buffer_as_string();
        assert!(output.contains("newer"));
        assert!(!output.contains("older"));
        assert!(!output.contains("registry"));
        assert_eq!(it.before.events()[0].name, "claimed:git");
        assert_eq!(it.after.events()[0].exit_code, Some(5));
    }

    #[tokio::test]
    async fn test_open_quote_inserts_newline_instead_of_submitting() {
        let mut it = fixture().await;

        submit(&mut it.shell, "echo \"abc").await;

        assert_eq!(it.shell.prompt_input(), "echo \"abc\n");
        assert!(it.before.is_empty());

        submit(&mut it.shell, "d\"").await;

        assert_eq!(it.after.events()[0].command.command_line, "echo \"abc\nd\"");
        assert_eq!(it.shell.prompt_input(), "");
    }

    #[tokio::test]
    async fn test_handler_should_wrap_overrides_quote_check() {
        let mut it = fixture().await;
        let _handler = it.shell.register_command_handler(Arc::new(WrapEverything));

        submit(&mut it.shell, "select 1").await;
        assert_eq!(it.shell.prompt_input(), "select 1\n");

        submit(&mut it.shell, "\"unclosed;").await;
        assert_eq!(it.after.len(), 1);
        assert_eq!(it.after.events()[0].command.name, "select");
    }

    #[tokio::test]
    async fn test_ctrl_c_cancels_line() {
        let mut it = fixture().await;
        for ch in "rm -rf".chars() {
            it.shell.write(&ch.to_string()).await.unwrap();
        }
        it.output.clear();

        it.shell.write("\x03").await.unwrap();

        assert_eq!(
            it.output.get_copy_of_buffer_as_string(),
            "\x1b[31m^C\x1b[0m\r\n> "
        );
        assert_eq!(it.before.events(), vec![ExecutedCommand::empty("rm -rf")]);
        assert_eq!(it.after.events()[0].exit_code, None);
        assert_eq!(it.shell.prompt_input(), "");
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "");
    }
}
