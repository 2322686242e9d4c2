// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use tracing_core::LevelFilter;

/// Fields:
/// - `writer_config`: [`WriterConfig`] - where log output goes.
/// - `level`: [`tracing::Level`] - the most verbose level that is recorded.
///
/// Turn this into layers with [`crate::try_create_layers`], into a [`tracing::Dispatch`]
/// for [`crate::Shell::with_logger`] with [`crate::try_create_dispatch`], or install it
/// process wide with [`crate::try_initialize_global_logging`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level: tracing::Level,
}

impl TracingConfig {
    /// Debug level output to the given display.
    #[must_use]
    pub fn new_display(preferred_display: DisplayPreference) -> Self {
        Self {
            writer_config: WriterConfig::Display(preferred_display),
            level: tracing::Level::DEBUG,
        }
    }

    /// Debug level output to a log file at `path`.
    #[must_use]
    pub fn new_file(path: impl Into<String>) -> Self {
        Self {
            writer_config: WriterConfig::File(path.into()),
            level: tracing::Level::DEBUG,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { LevelFilter::from_level(self.level) }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    /// Log file path.
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}
