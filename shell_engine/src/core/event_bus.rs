// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Typed publish / subscribe.
//!
//! [`EventEmitter::fire`] takes a snapshot of the listener list, releases the lock, then
//! calls each listener in subscription order. A listener may subscribe, unsubscribe
//! (itself or others), or fire again while being called. Changes made during a fire
//! take effect from the next fire.

use std::{fmt::{Debug, Formatter, Result as FmtResult},
          sync::Arc};

use smallvec::SmallVec;

use super::{Disposable, DisposeHandle, StdMutex, lock_or_recover};

/// Handle returned by [`EventEmitter::subscribe`]. Dispose it to unsubscribe.
pub type Subscription = DisposeHandle;

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;
type ListenerId = u64;

struct EmitterState<T> {
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: ListenerId,
    is_disposed: bool,
}

/// Cloning yields another handle to the same listener list.
pub struct EventEmitter<T> {
    state: Arc<StdMutex<EmitterState<T>>>,
}

impl<T: 'static> EventEmitter<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(StdMutex::new(EmitterState {
                listeners: vec![],
                next_id: 0,
                is_disposed: false,
            })),
        }
    }

    /// Once the emitter is disposed, the listener is dropped and an inert handle is
    /// returned.
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut state = lock_or_recover(&self.state);
            if state.is_disposed {
                return Subscription::inert();
            }
            let id = state.next_id;
            state.next_id += 1;
            state.listeners.push((id, Arc::new(listener)));
            id
        };

        let weak_state = Arc::downgrade(&self.state);
        Subscription::to_disposable(move || {
            if let Some(state) = weak_state.upgrade() {
                lock_or_recover(&state)
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    pub fn fire(&self, event: &T) {
        let snapshot: SmallVec<[Listener<T>; 4]> = {
            let state = lock_or_recover(&self.state);
            state
                .listeners
                .iter()
                .map(|(_, listener)| listener.clone())
                .collect()
        };
        for listener in snapshot {
            listener(event);
        }
    }

    /// Drop every listener. Later subscriptions are refused and fires do nothing.
    pub fn dispose(&self) {
        let mut state = lock_or_recover(&self.state);
        state.is_disposed = true;
        state.listeners.clear();
    }

    #[must_use]
    pub fn listener_count(&self) -> usize { lock_or_recover(&self.state).listeners.len() }

    #[must_use]
    pub fn is_disposed(&self) -> bool { lock_or_recover(&self.state).is_disposed }
}

/// Re-fire every event of `from` on `to`. Dispose the returned handle to stop.
pub fn forward_event<T: 'static>(from: &EventEmitter<T>, to: &EventEmitter<T>) -> Subscription {
    let to = to.clone();
    from.subscribe(move |event| to.fire(event))
}

impl<T: 'static> Default for EventEmitter<T> {
    fn default() -> Self { Self::new() }
}

impl<T> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: 'static> Disposable for EventEmitter<T> {
    fn dispose(&mut self) { EventEmitter::dispose(self); }
}

impl<T: 'static> Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("EventEmitter")
            .field("listener_count", &self.listener_count())
            .field("is_disposed", &self.is_disposed())
            .finish()
    }
}
