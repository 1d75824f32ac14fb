// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Owned block of possibly uninitialized element slots.

use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::mem::MaybeUninit;
use core::ops::Range;
use core::ptr;

/// Contiguous storage for `capacity` slots of `T`.
///
/// `RawBuffer` never inspects its slots: dropping it releases the memory but
/// does not drop any element written into it. Tracking which slots are live is
/// the owner's job (`RampartVec` keeps them in `[0, len)`, `InitGuard` in
/// `[0, initialized)`).
///
/// A zero capacity holds no allocation. Zero-sized `T` never allocates.
pub(crate) struct RawBuffer<T> {
    slots: Vec<MaybeUninit<T>>,
}

impl<T> RawBuffer<T> {
    /// Creates an empty buffer without allocating.
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Allocates exactly `capacity` uninitialized slots.
    ///
    /// Reports allocator failure instead of aborting.
    pub(crate) fn try_allocate(capacity: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        // Fills the reserved capacity; cannot reallocate.
        slots.resize_with(capacity, MaybeUninit::uninit);

        Ok(Self { slots })
    }

    /// Number of slots.
    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Writes `value` into slot `index`.
    ///
    /// Overwriting a live slot leaks its previous value but is not unsound.
    ///
    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline(always)]
    pub(crate) fn write(&mut self, index: usize, value: T) {
        self.slots[index].write(value);
    }

    /// Moves the value out of slot `index`.
    ///
    /// # Safety
    ///
    /// Slot `index` must be initialized, and the caller must treat it as
    /// uninitialized afterwards.
    #[inline(always)]
    pub(crate) unsafe fn read(&self, index: usize) -> T {
        // SAFETY (PRECONDITIONS ARE MET): caller guarantees slot `index` is initialized
        unsafe { self.slots[index].assume_init_read() }
    }

    /// Views the first `len` slots as initialized elements.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must be initialized.
    #[inline(always)]
    pub(crate) unsafe fn assume_init_slice(&self, len: usize) -> &[T] {
        debug_assert!(len <= self.capacity());

        // SAFETY (PRECONDITIONS ARE MET): caller guarantees [0, len) is initialized,
        // MaybeUninit<T> has the same layout as T, and len <= capacity keeps the view in bounds
        unsafe { core::slice::from_raw_parts(self.slots.as_ptr().cast::<T>(), len) }
    }

    /// Mutable view of the first `len` slots as initialized elements.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` must be initialized.
    #[inline(always)]
    pub(crate) unsafe fn assume_init_slice_mut(&mut self, len: usize) -> &mut [T] {
        debug_assert!(len <= self.capacity());

        // SAFETY (PRECONDITIONS ARE MET): same as assume_init_slice, with exclusive access through &mut self
        unsafe { core::slice::from_raw_parts_mut(self.slots.as_mut_ptr().cast::<T>(), len) }
    }

    /// Drops the elements in `range` in place.
    ///
    /// # Safety
    ///
    /// Every slot in `range` must be initialized, and the caller must treat
    /// them as uninitialized afterwards.
    pub(crate) unsafe fn drop_range(&mut self, range: Range<usize>) {
        let Range { start, end } = range;
        debug_assert!(start <= end && end <= self.capacity());

        if start == end {
            return;
        }

        // SAFETY (PRECONDITIONS ARE MET): [start, end) is in bounds and initialized per caller contract
        unsafe {
            let first = self.slots.as_mut_ptr().add(start).cast::<T>();
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, end - start));
        }
    }
}

impl<T> Default for RawBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}
