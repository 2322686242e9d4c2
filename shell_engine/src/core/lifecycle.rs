// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Explicit ownership of releasable resources. Nothing here runs on [`Drop`]: a
//! resource is released only when [`Disposable::dispose`] is called, either directly or
//! by [`DisposableStore::dispose_all`].

use std::fmt::{Debug, Formatter, Result as FmtResult};

/// A resource that can be released exactly once. Calling `dispose` again is a no-op.
pub trait Disposable: Send + Sync {
    fn dispose(&mut self);
}

type OnDispose = Box<dyn FnOnce() + Send + Sync>;

/// Handle returned by subscriptions and registrations. Call [`Disposable::dispose`] to
/// undo the subscription or registration. Dropping the handle leaves it in place.
#[must_use = "dropping the handle keeps the registration alive with no way to remove it"]
pub struct DisposeHandle {
    on_dispose: Option<OnDispose>,
}

impl DisposeHandle {
    pub fn to_disposable(on_dispose: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            on_dispose: Some(Box::new(on_dispose)),
        }
    }

    /// A handle with nothing to release.
    pub fn inert() -> Self { Self { on_dispose: None } }

    #[must_use]
    pub fn is_disposed(&self) -> bool { self.on_dispose.is_none() }
}

impl Disposable for DisposeHandle {
    fn dispose(&mut self) {
        if let Some(on_dispose) = self.on_dispose.take() {
            on_dispose();
        }
    }
}

impl Debug for DisposeHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DisposeHandle")
            .field("is_disposed", &self.is_disposed())
            .finish()
    }
}

/// Owned list of resources released together by [`DisposableStore::dispose_all`], in
/// registration order. Once disposed, the store is inert: anything registered later is
/// disposed on the spot.
#[derive(Default)]
pub struct DisposableStore {
    items: Vec<Box<dyn Disposable>>,
    is_disposed: bool,
}

impl DisposableStore {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, item: impl Disposable + 'static) {
        let mut item: Box<dyn Disposable> = Box::new(item);
        if self.is_disposed {
            item.dispose();
        } else {
            self.items.push(item);
        }
    }

    pub fn dispose_all(&mut self) {
        self.is_disposed = true;
        for mut item in self.items.drain(..) {
            item.dispose();
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.items.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    #[must_use]
    pub fn is_disposed(&self) -> bool { self.is_disposed }
}

impl Disposable for DisposableStore {
    fn dispose(&mut self) { self.dispose_all(); }
}

impl Debug for DisposableStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DisposableStore")
            .field("len", &self.items.len())
            .field("is_disposed", &self.is_disposed)
            .finish()
    }
}
