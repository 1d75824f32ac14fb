// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable array with strong failure guarantees for fallible element types.
//!
//! `RampartVec<T>` is a contiguous, growable array whose elements may fail to
//! construct or copy. Every operation that copies elements into fresh storage
//! runs inside a rollback scope: if one copy fails, the copies already made are
//! destroyed, the fresh storage is released, and the container is left exactly
//! as it was before the call.
//!
//! # Core Guarantees
//!
//! - **Power-of-two growth**: capacity grows 0 → 1 → 2 → 4 → 8..., always to the
//!   smallest power of two strictly greater than the current capacity.
//! - **Strong growth**: a failed migration leaves length, capacity and every
//!   element untouched, and is reported as [`RampartVecError::Reallocation`].
//! - **Single owner**: moving out with [`RampartVec::take`] or
//!   [`RampartVec::move_from`] leaves the source empty and unallocated.
//! - **Fallible access**: out-of-range and empty-container access return
//!   [`AccessError`] instead of panicking.
//!
//! # Element Types
//!
//! Elements are consumed through [`TryClone`] and [`TryDefault`]. Every
//! `T: Clone` is a `TryClone` that never fails, and every `T: Clone + Default`
//! is a `TryDefault`. Types whose copies can fail implement the traits directly.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use rampart_vec::{RampartVec, RampartVecError};
//! use core::convert::Infallible;
//!
//! fn example() -> Result<(), RampartVecError<Infallible>> {
//!     let mut vec = RampartVec::try_from_slice(&[1u32, 2, 3])?;
//!     assert_eq!(vec.capacity(), 3);
//!
//!     vec.push(4)?;
//!     assert_eq!(vec.capacity(), 4);
//!
//!     vec.pop()?;
//!     vec.pop()?;
//!     assert_eq!(*vec.back()?, 2);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Fallible Elements
//!
//! ```rust
//! use rampart_vec::{RampartVec, RampartVecError, TryClone};
//!
//! #[derive(Debug)]
//! struct Ticket(u32);
//!
//! impl TryClone for Ticket {
//!     type Error = &'static str;
//!
//!     fn try_clone(&self) -> Result<Self, Self::Error> {
//!         if self.0 == 0 { Err("ticket 0 cannot be copied") } else { Ok(Ticket(self.0)) }
//!     }
//! }
//!
//! let mut vec = RampartVec::new();
//! vec.push(Ticket(0)).unwrap();
//!
//! // Growing to capacity 2 must copy Ticket(0), which fails.
//! let err = vec.push(Ticket(1)).unwrap_err();
//! assert_eq!(
//!     err,
//!     RampartVecError::Reallocation { capacity: 2, cause: "ticket 0 cannot be copied" }
//! );
//!
//! // Nothing changed.
//! assert_eq!(vec.len(), 1);
//! assert_eq!(vec.capacity(), 1);
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test_utils` feature to inject failures:
//!
//! ```toml
//! [dev-dependencies]
//! rampart-vec = { version = "*", features = ["test_utils"] }
//! ```
//!
//! This exposes `RampartVecBehaviour` for allocation failures and the
//! `fault` module, whose `FaultyElement` fails its construction and copies
//! once a shared operation counter reaches an armed threshold.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod error;
mod guard;
mod rampart_vec;
mod raw_buffer;
mod traits;

#[cfg(any(test, feature = "test_utils"))]
pub mod fault;

#[cfg(test)]
mod tests;

pub use error::{AccessError, RampartVecError};
pub use rampart_vec::RampartVec;
pub use traits::{TryClone, TryDefault};

#[cfg(any(test, feature = "test_utils"))]
pub use rampart_vec::RampartVecBehaviour;
