// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::Shell;

pub type ShellInputReceiver = UnboundedReceiver<String>;

/// Cloneable sender of input tokens for [`Shell::run_input_loop`]. Event listeners can
/// hold a clone to feed tokens back in (eg: a tab completion collaborator); those are
/// handled after the token being processed settles.
#[derive(Clone, Debug)]
pub struct ShellInput {
    sender: UnboundedSender<String>,
}

impl ShellInput {
    #[must_use]
    pub fn new() -> (Self, ShellInputReceiver) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Returns `false` if the input loop is gone.
    pub fn send(&self, token: impl Into<String>) -> bool { self.sender.send(token.into()).is_ok() }

    /// Queue each character of `text` as its own token.
    pub fn send_chars(&self, text: &str) -> bool {
        text.chars().all(|ch| self.send(ch.to_string()))
    }
}

impl Shell {
    /// Feed tokens from `receiver` to [`Shell::write`], one at a time, each awaited to
    /// completion before the next is taken. A rejected token is logged and dropped.
    ///
    /// Returns once every [`ShellInput`] is dropped and the queue is drained, or once
    /// the shell is disposed.
    pub async fn run_input_loop(&mut self, mut receiver: ShellInputReceiver) {
        while let Some(token) = receiver.recv().await {
            if self.is_disposed {
                break;
            }
            if let Err(error) = self.write(&token).await {
                self.logger
                    .scope(|| tracing::error!(%error, "Dropped input token"));
            }
        }
    }
}
