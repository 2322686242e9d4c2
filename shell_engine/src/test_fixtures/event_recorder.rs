// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crate::{EventEmitter, StdMutex, Subscription, lock_or_recover};

/// Records a clone of every payload fired on one event. Clones share the record.
#[derive(Debug)]
pub struct EventRecorder<T> {
    events: Arc<StdMutex<Vec<T>>>,
}

impl<T: Clone + Send + 'static> EventRecorder<T> {
    pub fn attach(emitter: &EventEmitter<T>) -> (Self, Subscription) {
        let events = Arc::new(StdMutex::new(vec![]));
        let events_clone = events.clone();
        let subscription =
            emitter.subscribe(move |event: &T| lock_or_recover(&events_clone).push(event.clone()));
        (Self { events }, subscription)
    }

    #[must_use]
    pub fn events(&self) -> Vec<T> { lock_or_recover(&self.events).clone() }

    #[must_use]
    pub fn len(&self) -> usize { lock_or_recover(&self.events).len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { lock_or_recover(&self.events).is_empty() }
}

impl<T> Clone for EventRecorder<T> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
        }
    }
}
