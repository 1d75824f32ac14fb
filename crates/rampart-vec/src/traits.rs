// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Capability traits consumed by `RampartVec`.

use core::convert::Infallible;
use core::fmt;

/// Element copy that may fail.
///
/// Every `T: Clone` implements this trait with `Error = Infallible`. Types whose
/// copies can fail (they allocate from a bounded pool, talk to a device, count
/// instances...) implement it directly and must not implement `Clone`.
pub trait TryClone: Sized {
    /// Error reported when a construction or copy fails.
    type Error: fmt::Debug + fmt::Display;

    /// Copy-constructs a new value from `self`.
    fn try_clone(&self) -> Result<Self, Self::Error>;

    /// Copy-assigns `source` into `self`.
    ///
    /// On failure `self` must still be a valid value.
    fn try_clone_from(&mut self, source: &Self) -> Result<(), Self::Error> {
        *self = source.try_clone()?;
        Ok(())
    }
}

/// Default construction that may fail.
///
/// Only required by operations that fabricate new elements
/// (`RampartVec::try_with_len` and `RampartVec::resize`).
pub trait TryDefault: TryClone {
    /// Value-constructs a default element.
    fn try_default() -> Result<Self, Self::Error>;
}

impl<T: Clone> TryClone for T {
    type Error = Infallible;

    #[inline(always)]
    fn try_clone(&self) -> Result<Self, Infallible> {
        Ok(self.clone())
    }

    #[inline(always)]
    fn try_clone_from(&mut self, source: &Self) -> Result<(), Infallible> {
        self.clone_from(source);
        Ok(())
    }
}

impl<T: Clone + Default> TryDefault for T {
    #[inline(always)]
    fn try_default() -> Result<Self, Infallible> {
        Ok(T::default())
    }
}
