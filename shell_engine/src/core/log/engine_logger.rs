// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing::Dispatch;

/// Injectable log sink for the engine. Every log event the engine produces is emitted
/// through [`EngineLogger::scope`].
///
/// - With a [`Dispatch`], events go to that subscriber only, via
///   [`tracing::dispatcher::with_default`]. Build one with [`crate::try_create_dispatch`].
/// - Without one ([`EngineLogger::default`]), events go to whatever default subscriber
///   the host installed, if any.
#[derive(Clone, Debug, Default)]
pub struct EngineLogger {
    dispatch: Option<Dispatch>,
}

impl EngineLogger {
    #[must_use]
    pub fn new(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    #[must_use]
    pub fn has_dispatch(&self) -> bool { self.dispatch.is_some() }

    /// Run `f` with this logger's dispatch as the thread local default. Keep `f`
    /// synchronous: the scope ends when `f` returns, so it can't span an `.await`.
    pub fn scope<R>(&self, f: impl FnOnce() -> R) -> R {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, f),
            None => f(),
        }
    }
}
