// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for rampart-vec.

use thiserror::Error;

/// Error type for element access on a `RampartVec`.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AccessError {
    /// Index is not below the current length.
    #[error("Index {index} out of range for length {len}")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Length at the time of the call.
        len: usize,
    },

    /// The operation needs at least one element.
    #[error("Container is empty")]
    Empty,
}

/// Error type for `RampartVec` operations that construct, copy or allocate.
///
/// `E` is the element's [`TryClone::Error`](crate::TryClone::Error).
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum RampartVecError<E> {
    /// Element access failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Copying an element into grown storage failed.
    ///
    /// The container's storage, length, capacity and elements are unchanged.
    #[error("Reallocation to capacity {capacity} failed: {cause}")]
    Reallocation {
        /// Capacity the container was growing to.
        capacity: usize,
        /// Failure reported by the element.
        cause: E,
    },

    /// An element's own construction or assignment failed.
    #[error("Element operation failed: {0}")]
    Element(E),

    /// The allocator could not provide storage for `capacity` elements.
    #[error("Allocation of {capacity} slots failed")]
    AllocationFailed {
        /// Capacity that was requested.
        capacity: usize,
    },

    /// The next capacity would exceed `usize::MAX`.
    #[error("Capacity overflow: next capacity would exceed usize::MAX")]
    CapacityOverflow,
}
