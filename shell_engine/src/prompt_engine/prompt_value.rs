// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter, Result as FmtResult},
          future::Future,
          sync::Arc};

use futures_util::{FutureExt, future::BoxFuture};

type SyncProducer = Arc<dyn Fn() -> String + Send + Sync>;
type AsyncProducer = Arc<dyn Fn() -> BoxFuture<'static, miette::Result<String>> + Send + Sync>;

/// The value of a prompt template or of a prompt variable. Producers are invoked again
/// every time the prompt is reset, so the prompt can show live state (eg: the cwd).
#[derive(Clone)]
pub enum PromptValue {
    Literal(String),
    Producer(SyncProducer),
    /// May fail. Failures are logged by the caller.
    AsyncProducer(AsyncProducer),
}

impl PromptValue {
    pub fn literal(text: impl Into<String>) -> Self { Self::Literal(text.into()) }

    pub fn from_fn(producer: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Producer(Arc::new(producer))
    }

    pub fn from_async_fn<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = miette::Result<String>> + Send + 'static,
    {
        Self::AsyncProducer(Arc::new(move || producer().boxed()))
    }

    /// # Errors
    ///
    /// Only [`PromptValue::AsyncProducer`] can fail, with whatever error it returns.
    pub async fn resolve(&self) -> miette::Result<String> {
        match self {
            Self::Literal(text) => Ok(text.clone()),
            Self::Producer(producer) => Ok(producer()),
            Self::AsyncProducer(producer) => producer().await,
        }
    }
}

impl From<&str> for PromptValue {
    fn from(text: &str) -> Self { Self::Literal(text.to_string()) }
}

impl From<String> for PromptValue {
    fn from(text: String) -> Self { Self::Literal(text) }
}

impl Debug for PromptValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
            Self::AsyncProducer(_) => f.write_str("AsyncProducer(..)"),
        }
    }
}
