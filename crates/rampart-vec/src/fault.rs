// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Fault-injecting element type for exercising failure paths.
//!
//! Every construction, copy and copy-assignment of a [`FaultyElement`] counts
//! as one element operation on a process-wide counter. Once the counter
//! reaches the armed threshold, that operation and every following one fail
//! with [`InjectedFault`] until [`disarm_faults`] is called.
//!
//! A second counter tracks live instances, so tests can check that a failed
//! operation neither leaked nor double-dropped an element.
//!
//! The counters are global: tests that use them must not run concurrently
//! (for instance with `#[serial_test::serial(faults)]`).
//!
//! # Example
//!
//! ```rust
//! // test_utils feature required
//! use rampart_vec::{RampartVec, RampartVecError};
//! use rampart_vec::fault::{FaultyElement, InjectedFault, arm_faults, disarm_faults};
//!
//! arm_faults(3);
//!
//! let mut vec = RampartVec::new();
//! vec.push(FaultyElement::new(1).unwrap()).unwrap(); // operation 1
//! let second = FaultyElement::new(2).unwrap(); // operation 2
//!
//! // Growing to capacity 2 copies the first element: operation 3 fails.
//! assert_eq!(
//!     vec.push(second),
//!     Err(RampartVecError::Reallocation {
//!         capacity: 2,
//!         cause: InjectedFault { operation: 3 },
//!     })
//! );
//! assert_eq!(vec.len(), 1);
//! assert_eq!(vec.capacity(), 1);
//!
//! disarm_faults();
//! ```

use core::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

use thiserror::Error;

use crate::traits::{TryClone, TryDefault};

const DISARMED: usize = usize::MAX;

static OPERATIONS: AtomicUsize = AtomicUsize::new(0);
static FAIL_AT: AtomicUsize = AtomicUsize::new(DISARMED);
static LIVE: AtomicIsize = AtomicIsize::new(0);

/// Failure reported by a [`FaultyElement`] operation.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
#[error("injected fault at element operation {operation}")]
pub struct InjectedFault {
    /// 1-based number of the failing operation since the last arm.
    pub operation: usize,
}

/// Resets the operation counter and makes operation `fail_at` (1-based), and
/// every one after it, fail.
///
/// `arm_faults(1)` makes the very next operation fail.
pub fn arm_faults(fail_at: usize) {
    OPERATIONS.store(0, Ordering::SeqCst);
    FAIL_AT.store(fail_at, Ordering::SeqCst);
}

/// Stops injecting faults and resets the operation counter.
pub fn disarm_faults() {
    OPERATIONS.store(0, Ordering::SeqCst);
    FAIL_AT.store(DISARMED, Ordering::SeqCst);
}

/// Number of element operations attempted since the last arm or disarm.
pub fn element_operations() -> usize {
    OPERATIONS.load(Ordering::SeqCst)
}

/// Number of `FaultyElement` instances currently alive.
pub fn live_elements() -> isize {
    LIVE.load(Ordering::SeqCst)
}

fn tick() -> Result<(), InjectedFault> {
    let operation = OPERATIONS.fetch_add(1, Ordering::SeqCst) + 1;

    if operation >= FAIL_AT.load(Ordering::SeqCst) {
        return Err(InjectedFault { operation });
    }

    Ok(())
}

/// Element whose construction and copies fail once the armed threshold is hit.
///
/// Not `Clone`: every copy goes through [`TryClone`] and is counted.
#[derive(Debug, PartialEq, Eq)]
pub struct FaultyElement {
    value: i32,
}

impl FaultyElement {
    /// Constructs an element holding `value`.
    ///
    /// # Errors
    ///
    /// Returns [`InjectedFault`] if this operation reaches the armed threshold.
    pub fn new(value: i32) -> Result<Self, InjectedFault> {
        tick()?;
        LIVE.fetch_add(1, Ordering::SeqCst);

        Ok(Self { value })
    }

    /// Returns the held value.
    pub fn value(&self) -> i32 {
        self.value
    }
}

impl Drop for FaultyElement {
    fn drop(&mut self) {
        LIVE.fetch_sub(1, Ordering::SeqCst);
    }
}

impl TryClone for FaultyElement {
    type Error = InjectedFault;

    fn try_clone(&self) -> Result<Self, InjectedFault> {
        Self::new(self.value)
    }

    fn try_clone_from(&mut self, source: &Self) -> Result<(), InjectedFault> {
        tick()?;
        self.value = source.value;

        Ok(())
    }
}

impl TryDefault for FaultyElement {
    fn try_default() -> Result<Self, InjectedFault> {
        Self::new(0)
    }
}
