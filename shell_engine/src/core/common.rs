// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{MutexGuard, PoisonError};

pub type StdMutex<T> = std::sync::Mutex<T>;

/// Lock the mutex, recovering the guard if a previous holder panicked. None of the state
/// guarded in this crate (listener lists, registries, capture buffers) is left half
/// updated by a panic.
pub fn lock_or_recover<T: ?Sized>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
