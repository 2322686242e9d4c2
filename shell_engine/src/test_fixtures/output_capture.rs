// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{Result, Write},
          sync::Arc};

use strip_ansi_escapes::strip;

use crate::{EventEmitter, StdMutex, Subscription, lock_or_recover};

/// You can safely clone this struct, since it only contains an `Arc<StdMutex<String>>`.
/// The inner `buffer` will not be cloned, just the [Arc] will be cloned.
///
/// The main constructors are:
/// - [`OutputCapture::attach`], to record everything fired on an output event (usually
///   [`crate::ShellEvents::on_did_write_data`]).
/// - [`OutputCapture::default`], to use it as a plain [`Write`] sink, eg: as the writer
///   of a `tracing_subscriber::fmt` subscriber.
#[derive(Clone, Debug, Default)]
pub struct OutputCapture {
    pub buffer: Arc<StdMutex<String>>,
}

impl OutputCapture {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn attach(emitter: &EventEmitter<String>) -> (Self, Subscription) {
        let capture = Self::default();
        let buffer = capture.buffer.clone();
        let subscription =
            emitter.subscribe(move |data: &String| lock_or_recover(&buffer).push_str(data));
        (capture, subscription)
    }

    #[must_use]
    pub fn get_copy_of_buffer_as_string(&self) -> String {
        lock_or_recover(&self.buffer).clone()
    }

    #[must_use]
    pub fn get_copy_of_buffer_as_string_strip_ansi(&self) -> String {
        let buffer_data = lock_or_recover(&self.buffer);
        String::from_utf8_lossy(&strip(buffer_data.as_bytes())).into_owned()
    }

    pub fn clear(&self) { lock_or_recover(&self.buffer).clear(); }
}

impl Write for OutputCapture {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        lock_or_recover(&self.buffer).push_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<()> { Ok(()) }
}
