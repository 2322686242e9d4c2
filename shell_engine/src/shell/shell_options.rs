// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use serde::{Deserialize, Serialize};

use crate::DEFAULT_PROMPT;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub columns: u16,
    pub rows: u16,
}

impl Default for Size {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 24,
        }
    }
}

/// Missing fields take their defaults when deserialized, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellOptions {
    /// Written once by [`crate::Shell::start`], before the first prompt.
    pub welcome_message: Option<String>,
    /// Initial prompt template. May contain `${name}` placeholders.
    pub prompt: String,
    pub dimensions: Size,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            welcome_message: None,
            prompt: DEFAULT_PROMPT.to_string(),
            dimensions: Size::default(),
        }
    }
}

impl ShellOptions {
    #[must_use]
    pub fn with_welcome_message(mut self, welcome_message: impl Into<String>) -> Self {
        self.welcome_message = Some(welcome_message.into());
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn with_dimensions(mut self, columns: u16, rows: u16) -> Self {
        self.dimensions = Size { columns, rows };
        self
    }

    /// # Errors
    ///
    /// Returns an error if `json` is not a valid options object.
    pub fn try_from_json(json: &str) -> miette::Result<Self> {
        serde_json::from_str(json).into_diagnostic()
    }
}
