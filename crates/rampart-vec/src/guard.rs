// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Rollback scope for filling fresh storage.

use core::mem;

use crate::raw_buffer::RawBuffer;

/// RAII guard that owns a fresh buffer while its prefix is being filled.
///
/// Elements are appended with [`InitGuard::push`] or
/// [`InitGuard::try_push_with`]. Unless the guard is consumed by
/// [`InitGuard::finish`], dropping it destroys exactly the elements written so
/// far and releases the buffer. This holds on every exit path: an `Err`
/// returned through `?`, or an unwinding panic in an element's copy.
pub(crate) struct InitGuard<T> {
    buffer: RawBuffer<T>,
    initialized: usize,
}

impl<T> InitGuard<T> {
    pub(crate) fn new(buffer: RawBuffer<T>) -> Self {
        Self {
            buffer,
            initialized: 0,
        }
    }

    /// Writes `value` into the next free slot.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is already full.
    #[inline(always)]
    pub(crate) fn push(&mut self, value: T) {
        self.buffer.write(self.initialized, value);
        self.initialized += 1;
    }

    /// Constructs the next element with `make` and writes it.
    ///
    /// A failing `make` leaves the guard as it was.
    #[inline(always)]
    pub(crate) fn try_push_with<E, F>(&mut self, make: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let value = make()?;
        self.push(value);
        Ok(())
    }

    /// Disarms the guard, handing back the buffer and its initialized length.
    pub(crate) fn finish(mut self) -> (RawBuffer<T>, usize) {
        let buffer = mem::take(&mut self.buffer);
        let len = mem::replace(&mut self.initialized, 0);

        (buffer, len)
    }
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY (PRECONDITIONS ARE MET): push() initialized exactly [0, initialized)
        unsafe { self.buffer.drop_range(0..self.initialized) }
    }
}
