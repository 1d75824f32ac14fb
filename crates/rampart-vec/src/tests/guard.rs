// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use serial_test::serial;

use crate::fault::{FaultyElement, InjectedFault, arm_faults, disarm_faults, live_elements};
use crate::guard::InitGuard;
use crate::raw_buffer::RawBuffer;

fn buffer(capacity: usize) -> RawBuffer<FaultyElement> {
    RawBuffer::try_allocate(capacity).expect("Failed to try_allocate(..)")
}

// =============================================================================
// RawBuffer
// =============================================================================

#[test]
fn test_raw_buffer_new_has_no_capacity() {
    let buffer: RawBuffer<u64> = RawBuffer::new();

    assert_eq!(buffer.capacity(), 0);
}

#[test]
fn test_raw_buffer_try_allocate_exact() {
    let buffer: RawBuffer<u64> = RawBuffer::try_allocate(5).expect("Failed to try_allocate(..)");

    assert_eq!(buffer.capacity(), 5);
}

#[test]
fn test_raw_buffer_try_allocate_too_large() {
    assert!(RawBuffer::<u64>::try_allocate(usize::MAX).is_err());
}

#[test]
fn test_raw_buffer_write_read() {
    let mut buffer: RawBuffer<u64> = RawBuffer::try_allocate(2).expect("Failed to try_allocate(..)");

    buffer.write(0, 11);
    buffer.write(1, 22);

    // SAFETY: both slots were written above
    let slice = unsafe { buffer.assume_init_slice(2) };
    assert_eq!(slice, &[11, 22]);

    // SAFETY: slot 1 was written above and is not used afterwards
    let value = unsafe { buffer.read(1) };
    assert_eq!(value, 22);
}

#[test]
#[should_panic]
fn test_raw_buffer_write_out_of_bounds_panics() {
    let mut buffer: RawBuffer<u64> = RawBuffer::try_allocate(1).expect("Failed to try_allocate(..)");

    buffer.write(1, 0);
}

// =============================================================================
// InitGuard
// =============================================================================

#[test]
#[serial(faults)]
fn test_guard_finish_keeps_elements() {
    disarm_faults();

    let mut guard = InitGuard::new(buffer(3));
    guard.push(FaultyElement::new(1).expect("Failed to new(..)"));
    guard.push(FaultyElement::new(2).expect("Failed to new(..)"));

    let (mut buffer, len) = guard.finish();

    assert_eq!(len, 2);
    assert_eq!(live_elements(), 2);

    // SAFETY: finish() reported [0, 2) as initialized
    unsafe { buffer.drop_range(0..len) };
    assert_eq!(live_elements(), 0);
}

#[test]
#[serial(faults)]
fn test_guard_drop_destroys_initialized_prefix() {
    disarm_faults();

    {
        let mut guard = InitGuard::new(buffer(4));
        guard.push(FaultyElement::new(1).expect("Failed to new(..)"));
        guard.push(FaultyElement::new(2).expect("Failed to new(..)"));
        guard.push(FaultyElement::new(3).expect("Failed to new(..)"));

        assert_eq!(live_elements(), 3);
    }

    assert_eq!(live_elements(), 0);
}

#[test]
#[serial(faults)]
fn test_guard_try_push_with_failure_rolls_back_on_drop() {
    arm_faults(3);

    let result = (|| -> Result<(), InjectedFault> {
        let mut guard = InitGuard::new(buffer(4));
        for value in 0..4 {
            guard.try_push_with(|| FaultyElement::new(value))?;
        }
        let _ = guard.finish();
        Ok(())
    })();

    assert_eq!(result, Err(InjectedFault { operation: 3 }));
    assert_eq!(live_elements(), 0);

    disarm_faults();
}
