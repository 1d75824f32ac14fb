// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt;
use core::mem;
use core::ops::{Deref, DerefMut};

use crate::error::{AccessError, RampartVecError};
use crate::guard::InitGuard;
use crate::raw_buffer::RawBuffer;
use crate::traits::{TryClone, TryDefault};

/// Test behaviour for injecting failures in `RampartVec` operations.
///
/// This is only available with the `test_utils` feature and allows users
/// to test error handling paths in their code by injecting failures.
///
/// The behaviour is sticky - once set, it remains active until changed.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RampartVecBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every growth fails with `AllocationFailed` before copying anything.
    FailAtAllocation,
}

/// Smallest power of two strictly greater than `capacity`.
#[inline(always)]
pub(crate) fn next_capacity(capacity: usize) -> Option<usize> {
    capacity.checked_add(1)?.checked_next_power_of_two()
}

/// Contiguous growable array with strong failure guarantees.
///
/// Elements live in `[0, len)` of a single owned buffer of `capacity` slots.
/// When a push needs room, the buffer grows to the smallest power of two
/// strictly greater than the current capacity:
///
/// 1. Allocates a new buffer
/// 2. Copies every live element into it, in index order, via [`TryClone`]
/// 3. Swaps the new buffer in
/// 4. Drops the old elements and releases the old buffer
///
/// If step 2 fails, the copies made so far are dropped and the new buffer is
/// released; the container is left exactly as it was.
///
/// # Example
///
/// ```rust
/// use rampart_vec::RampartVec;
///
/// let mut vec = RampartVec::new();
/// for i in 0..5u8 {
///     vec.push(i).unwrap();
/// }
///
/// assert_eq!(vec.as_slice(), &[0, 1, 2, 3, 4]);
/// assert_eq!(vec.capacity(), 8);
/// ```
pub struct RampartVec<T> {
    buffer: RawBuffer<T>,
    len: usize,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: RampartVecBehaviour,
}

impl<T> RampartVec<T> {
    /// Creates a new empty `RampartVec` without allocating.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::RampartVec;
    ///
    /// let vec: RampartVec<u8> = RampartVec::new();
    /// assert_eq!(vec.len(), 0);
    /// assert_eq!(vec.capacity(), 0);
    /// ```
    pub const fn new() -> Self {
        Self {
            buffer: RawBuffer::new(),
            len: 0,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: RampartVecBehaviour::None,
        }
    }

    fn from_guard(guard: InitGuard<T>) -> Self {
        let (buffer, len) = guard.finish();

        Self {
            buffer,
            len,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: RampartVecBehaviour::None,
        }
    }

    /// Changes the failure injection behaviour.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: RampartVecBehaviour) {
        self.behaviour = behaviour;
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Returns a slice over the live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY (PRECONDITIONS ARE MET): [0, len) always holds live elements
        unsafe { self.buffer.assume_init_slice(self.len) }
    }

    /// Returns a mutable slice over the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY (PRECONDITIONS ARE MET): [0, len) always holds live elements
        unsafe { self.buffer.assume_init_slice_mut(self.len) }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::OutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T, AccessError> {
        let len = self.len;

        self.as_slice()
            .get(index)
            .ok_or(AccessError::OutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::OutOfRange`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, AccessError> {
        let len = self.len;

        self.as_mut_slice()
            .get_mut(index)
            .ok_or(AccessError::OutOfRange { index, len })
    }

    /// Returns a reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Empty`] if the vector is empty.
    pub fn back(&self) -> Result<&T, AccessError> {
        self.as_slice().last().ok_or(AccessError::Empty)
    }

    /// Returns a mutable reference to the last element.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Empty`] if the vector is empty.
    pub fn back_mut(&mut self) -> Result<&mut T, AccessError> {
        self.as_mut_slice().last_mut().ok_or(AccessError::Empty)
    }

    /// Removes the last element and returns it.
    ///
    /// The element leaves the container immediately; dropping it is up to the
    /// caller. Capacity is kept.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Empty`] if the vector is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::{AccessError, RampartVec};
    ///
    /// let mut vec = RampartVec::try_from_slice(&[1u8, 2]).unwrap();
    /// assert_eq!(vec.pop(), Ok(2));
    /// assert_eq!(vec.pop(), Ok(1));
    /// assert_eq!(vec.pop(), Err(AccessError::Empty));
    /// assert_eq!(vec.capacity(), 2);
    /// ```
    pub fn pop(&mut self) -> Result<T, AccessError> {
        if self.len == 0 {
            return Err(AccessError::Empty);
        }

        self.len -= 1;

        // SAFETY (PRECONDITIONS ARE MET): slot len was live and is now past the live prefix, read exactly once
        Ok(unsafe { self.buffer.read(self.len) })
    }

    /// Drops every element past `len`, keeping capacity.
    ///
    /// Does nothing if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        // len shrinks before any drop runs: [0, len) must never hold a dropped slot.
        let old_len = mem::replace(&mut self.len, len);

        // SAFETY (PRECONDITIONS ARE MET): [len, old_len) was live and is now past the live prefix
        unsafe { self.buffer.drop_range(len..old_len) }
    }

    /// Drops every element, keeping capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Moves the contents out, leaving `self` empty and unallocated.
    ///
    /// Never allocates and never copies an element.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::RampartVec;
    ///
    /// let mut source = RampartVec::try_from_slice(&[1u8, 2, 3]).unwrap();
    /// let moved = source.take();
    ///
    /// assert_eq!(moved.as_slice(), &[1, 2, 3]);
    /// assert_eq!(source.len(), 0);
    /// assert_eq!(source.capacity(), 0);
    /// ```
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Drops the current contents of `self` and adopts `other`'s storage,
    /// leaving `other` empty and unallocated.
    pub fn move_from(&mut self, other: &mut Self) {
        *self = other.take();
    }
}

impl<T> RampartVec<T>
where
    T: TryClone,
{
    /// Creates a vector of `len` copies of `value`, with capacity exactly `len`.
    ///
    /// # Errors
    ///
    /// - [`RampartVecError::AllocationFailed`] if the storage cannot be allocated.
    /// - [`RampartVecError::Element`] if a copy fails. The copies already made
    ///   are dropped and the storage released.
    pub fn try_from_elem(len: usize, value: &T) -> Result<Self, RampartVecError<T::Error>> {
        let mut guard = InitGuard::new(Self::allocate(len)?);

        for _ in 0..len {
            guard
                .try_push_with(|| value.try_clone())
                .map_err(RampartVecError::Element)?;
        }

        Ok(Self::from_guard(guard))
    }

    /// Creates a vector holding copies of `values`, in order, with capacity
    /// exactly `values.len()`.
    ///
    /// # Errors
    ///
    /// Same as [`RampartVec::try_from_elem`].
    pub fn try_from_slice(values: &[T]) -> Result<Self, RampartVecError<T::Error>> {
        let mut guard = InitGuard::new(Self::allocate(values.len())?);

        for value in values {
            guard
                .try_push_with(|| value.try_clone())
                .map_err(RampartVecError::Element)?;
        }

        Ok(Self::from_guard(guard))
    }

    /// Copies the vector into new storage of capacity exactly `len()`.
    ///
    /// `self` is never modified, even on failure.
    ///
    /// # Errors
    ///
    /// Same as [`RampartVec::try_from_elem`].
    pub fn try_clone(&self) -> Result<Self, RampartVecError<T::Error>> {
        Self::try_from_slice(self.as_slice())
    }

    /// Copy-assigns `source` into `self`, reusing `self`'s storage when it is
    /// large enough.
    ///
    /// Overlapping elements are assigned in place with
    /// [`TryClone::try_clone_from`]; missing ones are appended.
    ///
    /// # Errors
    ///
    /// `source` is never modified. A growth failure leaves `self` unchanged.
    /// An element failure leaves `self` valid, holding the elements assigned
    /// or appended before the failure.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), RampartVecError<T::Error>> {
        if self.len > source.len {
            self.truncate(source.len);
        } else {
            self.maybe_grow_to(source.len)?;
        }

        for (slot, element) in self.as_mut_slice().iter_mut().zip(source.as_slice()) {
            slot.try_clone_from(element)
                .map_err(RampartVecError::Element)?;
        }

        for element in &source.as_slice()[self.len..] {
            self.push_clone(element)?;
        }

        Ok(())
    }

    /// Drops the current elements and appends copies of `values`, in order.
    ///
    /// Capacity is kept when it suffices.
    ///
    /// # Errors
    ///
    /// A growth failure leaves `self` empty with its capacity unchanged. An
    /// element failure leaves the copies appended before it.
    pub fn assign_from_slice(&mut self, values: &[T]) -> Result<(), RampartVecError<T::Error>> {
        self.clear();
        self.maybe_grow_to(values.len())?;

        for value in values {
            self.push_clone(value)?;
        }

        Ok(())
    }

    /// Appends `value`, growing the storage if it is full.
    ///
    /// # Errors
    ///
    /// Growth errors ([`RampartVecError::Reallocation`],
    /// [`RampartVecError::AllocationFailed`], [`RampartVecError::CapacityOverflow`])
    /// leave the vector unchanged; `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), RampartVecError<T::Error>> {
        let len = self.reserve_one()?;

        self.buffer.write(self.len, value);
        self.len = len;

        Ok(())
    }

    /// Appends a copy of `value`, growing the storage if it is full.
    ///
    /// # Errors
    ///
    /// Growth errors leave the vector unchanged. If growth succeeds but the
    /// copy fails, [`RampartVecError::Element`] is returned and the vector
    /// keeps its elements along with the grown capacity.
    pub fn push_clone(&mut self, value: &T) -> Result<(), RampartVecError<T::Error>> {
        let len = self.reserve_one()?;
        let copy = value.try_clone().map_err(RampartVecError::Element)?;

        self.buffer.write(self.len, copy);
        self.len = len;

        Ok(())
    }

    /// Constructs an element with `make` and appends it.
    ///
    /// `make` runs before any growth, so a construction failure leaves the
    /// vector untouched.
    ///
    /// # Errors
    ///
    /// [`RampartVecError::Element`] if `make` fails, otherwise the errors of
    /// [`RampartVec::push`].
    pub fn emplace_with<F>(&mut self, make: F) -> Result<(), RampartVecError<T::Error>>
    where
        F: FnOnce() -> Result<T, T::Error>,
    {
        let value = make().map_err(RampartVecError::Element)?;
        self.push(value)
    }

    /// Makes room for one more element and returns the length it will give.
    #[inline(always)]
    fn reserve_one(&mut self) -> Result<usize, RampartVecError<T::Error>> {
        let len = self
            .len
            .checked_add(1)
            .ok_or(RampartVecError::<T::Error>::CapacityOverflow)?;
        self.maybe_grow_to(len)?;

        Ok(len)
    }

    #[inline(always)]
    fn maybe_grow_to(&mut self, min_capacity: usize) -> Result<(), RampartVecError<T::Error>> {
        if self.capacity() >= min_capacity {
            return Ok(());
        }

        self.grow_to(min_capacity)
    }

    fn allocate(capacity: usize) -> Result<RawBuffer<T>, RampartVecError<T::Error>> {
        RawBuffer::try_allocate(capacity)
            .map_err(|_| RampartVecError::AllocationFailed { capacity })
    }

    fn allocate_for_growth(
        &self,
        capacity: usize,
    ) -> Result<RawBuffer<T>, RampartVecError<T::Error>> {
        #[cfg(any(test, feature = "test_utils"))]
        if matches!(self.behaviour, RampartVecBehaviour::FailAtAllocation) {
            return Err(RampartVecError::AllocationFailed { capacity });
        }

        Self::allocate(capacity)
    }

    /// Migrates into new storage of at least `min_capacity` slots.
    ///
    /// The growth rule is applied until it reaches `min_capacity`, then a single
    /// migration is done. The resulting capacity matches growing one slot at a
    /// time.
    ///
    /// # Strategy
    ///
    /// 1. Allocate the new buffer inside an `InitGuard`
    /// 2. Copy the live elements into the guard in index order
    /// 3. On success, swap the buffers and drop the old elements
    ///
    /// On a failed copy, `?` drops the guard, which drops the copies made so far
    /// and releases the new buffer. `self` is untouched up to step 3.
    #[cold]
    #[inline(never)]
    fn grow_to(&mut self, min_capacity: usize) -> Result<(), RampartVecError<T::Error>> {
        let mut capacity = self.capacity();
        while capacity < min_capacity {
            capacity = next_capacity(capacity)
                .ok_or(RampartVecError::<T::Error>::CapacityOverflow)?;
        }

        let mut guard = InitGuard::new(self.allocate_for_growth(capacity)?);

        for element in self.as_slice() {
            guard
                .try_push_with(|| element.try_clone())
                .map_err(|cause| RampartVecError::Reallocation { capacity, cause })?;
        }

        let (buffer, len) = guard.finish();
        debug_assert_eq!(len, self.len);

        let mut old = mem::replace(&mut self.buffer, buffer);

        // SAFETY (PRECONDITIONS ARE MET): the old buffer held exactly [0, len) and is no longer reachable from self
        unsafe { old.drop_range(0..len) };

        Ok(())
    }
}

impl<T> RampartVec<T>
where
    T: TryDefault,
{
    /// Creates a vector of `len` default elements, with capacity exactly `len`.
    ///
    /// # Errors
    ///
    /// - [`RampartVecError::AllocationFailed`] if the storage cannot be allocated.
    /// - [`RampartVecError::Element`] if a default construction fails. The
    ///   elements already built are dropped and the storage released.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::RampartVec;
    ///
    /// let vec = RampartVec::<u32>::try_with_len(3).unwrap();
    /// assert_eq!(vec.as_slice(), &[0, 0, 0]);
    /// assert_eq!(vec.capacity(), 3);
    /// ```
    pub fn try_with_len(len: usize) -> Result<Self, RampartVecError<T::Error>> {
        let mut guard = InitGuard::new(Self::allocate(len)?);

        for _ in 0..len {
            guard
                .try_push_with(T::try_default)
                .map_err(RampartVecError::Element)?;
        }

        Ok(Self::from_guard(guard))
    }

    /// Resizes to `new_len` elements.
    ///
    /// Shrinking drops the tail and keeps capacity. Growing makes room first,
    /// then appends default elements one at a time.
    ///
    /// # Errors
    ///
    /// A growth failure leaves the vector unchanged. A failed default
    /// construction returns [`RampartVecError::Element`] and keeps the
    /// elements appended before it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rampart_vec::RampartVec;
    ///
    /// let mut vec = RampartVec::try_from_elem(3, &2u32).unwrap();
    /// vec.resize(5).unwrap();
    /// assert_eq!(vec.as_slice(), &[2, 2, 2, 0, 0]);
    ///
    /// vec.resize(1).unwrap();
    /// assert_eq!(vec.as_slice(), &[2]);
    /// assert_eq!(vec.capacity(), 8);
    /// ```
    pub fn resize(&mut self, new_len: usize) -> Result<(), RampartVecError<T::Error>> {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.maybe_grow_to(new_len)?;

        while self.len < new_len {
            self.emplace_with(T::try_default)?;
        }

        Ok(())
    }
}

impl<T> Drop for RampartVec<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for RampartVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for RampartVec<T> {
    fn clone(&self) -> Self {
        self.try_clone()
            .expect("Failed to allocate storage while cloning RampartVec")
    }

    fn clone_from(&mut self, source: &Self) {
        self.try_clone_from(source)
            .expect("Failed to allocate storage while cloning RampartVec")
    }
}

impl<T: fmt::Debug> fmt::Debug for RampartVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RampartVec")
            .field("data", &self.as_slice())
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<T: PartialEq> PartialEq for RampartVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for RampartVec<T> {}

impl<T> Deref for RampartVec<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for RampartVec<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a RampartVec<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RampartVec<T> {
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
