// face-kit/src/engine.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The process-wide font engine lock and the values it guards.
//!
//! The font engine is not reentrant across faces opened from the same library context, so every
//! operation that touches a native face handle runs under one global mutex. Values that may only
//! be touched under that mutex are wrapped in an [`EngineCell`], which hands out access only in
//! exchange for a borrowed [`EngineGuard`].

use std::cell::UnsafeCell;
use std::fmt::{self, Debug, Formatter};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A 16.16 fixed-point number, the convention the font engine uses for design coordinates.
pub type Fixed = i32;

lazy_static! {
    static ref ENGINE_LOCK: Mutex<()> = Mutex::new(());
}

/// Proof that the global engine lock is held by the current thread.
///
/// At most one guard exists in the process at any time. Dropping it releases the lock.
pub struct EngineGuard {
    _guard: MutexGuard<'static, ()>,
}

/// Acquires the global engine lock.
///
/// The lock is not reentrant: acquiring it twice on the same call path deadlocks.
pub fn lock() -> EngineGuard {
    // A panic inside an engine call leaves no partially updated state behind the mutex itself.
    let guard = ENGINE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    #[cfg(test)]
    HOLDS_LOCK.with(|holds_lock| holds_lock.set(true));
    EngineGuard { _guard: guard }
}

#[cfg(test)]
thread_local! {
    static HOLDS_LOCK: std::cell::Cell<bool> = std::cell::Cell::new(false);
}

/// Whether the calling thread holds the engine lock.
#[cfg(test)]
pub(crate) fn holds_lock() -> bool {
    HOLDS_LOCK.with(|holds_lock| holds_lock.get())
}

#[cfg(test)]
impl Drop for EngineGuard {
    fn drop(&mut self) {
        HOLDS_LOCK.with(|holds_lock| holds_lock.set(false));
    }
}

impl Debug for EngineGuard {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("EngineGuard")
    }
}

/// A value that may only be accessed while the global engine lock is held.
pub struct EngineCell<T> {
    value: UnsafeCell<T>,
}

// SAFETY: the value is only reachable through `borrow_mut`, which requires a mutable borrow of the
// unique `EngineGuard`, or through `get_mut`, which requires exclusive ownership.
unsafe impl<T: Send> Sync for EngineCell<T> {}

impl<T> EngineCell<T> {
    #[inline]
    pub fn new(value: T) -> EngineCell<T> {
        EngineCell { value: UnsafeCell::new(value) }
    }

    /// Returns the guarded value for as long as `guard` stays mutably borrowed.
    #[inline]
    pub fn borrow_mut<'a>(&'a self, _guard: &'a mut EngineGuard) -> &'a mut T {
        // SAFETY: only one `EngineGuard` exists process-wide and it is mutably borrowed for `'a`,
        // so no other reference obtained through any `EngineCell` can be alive during `'a`.
        unsafe { &mut *self.value.get() }
    }

    #[inline]
    pub fn get_mut(&mut self) -> &mut T {
        self.value.get_mut()
    }
}

impl<T> Debug for EngineCell<T> {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("EngineCell { .. }")
    }
}

/// Converts a floating-point value to 16.16 fixed point, rounding to the nearest representable
/// value and saturating at the bounds of `Fixed`.
#[inline]
pub fn f32_to_fixed(value: f32) -> Fixed {
    (value * 65536.0).round() as Fixed
}

#[inline]
pub fn fixed_to_f32(value: Fixed) -> f32 {
    value as f32 / 65536.0
}

/// Builds a big-endian OpenType table tag such as `b"cmap"`.
#[inline]
pub const fn make_tag(bytes: &[u8; 4]) -> u32 {
    ((bytes[0] as u32) << 24) | ((bytes[1] as u32) << 16) | ((bytes[2] as u32) << 8) |
        (bytes[3] as u32)
}
