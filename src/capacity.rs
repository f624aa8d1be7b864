//! Grow and shrink policy for the backing arrays.
//!
//! Capacities move through two small canonical sizes before switching to
//! roughly 1.5x growth:
//!
//! ```text
//!   0 ──► BASE_SIZE ──► 2 * BASE_SIZE ──► len + len / 2 ──► ...
//! ```
//!
//! Shrinking only happens once the live count falls under a third of the
//! capacity, and never below `2 * BASE_SIZE`. The gap between the grow
//! trigger (full) and the shrink trigger (one third) keeps a set that
//! hovers around a boundary from reallocating on every call.
//!
//! # Examples
//!
//! ```rust
//! use arrayset::capacity::{BASE_SIZE, grow_capacity, shrink_capacity};
//!
//! assert_eq!(grow_capacity(0), BASE_SIZE);
//! assert_eq!(grow_capacity(BASE_SIZE), BASE_SIZE * 2);
//! assert_eq!(grow_capacity(8), 12);
//!
//! assert_eq!(shrink_capacity(3, 12), Some(BASE_SIZE * 2));
//! assert_eq!(shrink_capacity(4, 12), None);
//! ```

/// The smallest non-zero capacity of a backing array.
///
/// Arrays of exactly `BASE_SIZE` and `2 * BASE_SIZE` slots are the canonical
/// sizes recycled by [`ArrayPool`](crate::pool::ArrayPool).
pub const BASE_SIZE: usize = 4;

/// The larger of the two canonical capacities.
pub const DOUBLE_BASE_SIZE: usize = BASE_SIZE * 2;

static_assertions::const_assert!(BASE_SIZE > 0);

/// Returns the capacity to grow to when `len` live slots fill the current array.
///
/// # Examples
///
/// ```rust
/// use arrayset::capacity::grow_capacity;
///
/// assert_eq!(grow_capacity(3), 4);
/// assert_eq!(grow_capacity(7), 8);
/// assert_eq!(grow_capacity(20), 30);
/// ```
#[inline]
#[must_use]
pub const fn grow_capacity(len: usize) -> usize {
    if len >= DOUBLE_BASE_SIZE {
        len + (len >> 1)
    } else if len >= BASE_SIZE {
        DOUBLE_BASE_SIZE
    } else {
        BASE_SIZE
    }
}

/// Returns the capacity to shrink to before removing one of `len` live slots,
/// or `None` when the array should be kept.
///
/// `len` is the count *before* the removal.
#[inline]
#[must_use]
pub const fn shrink_capacity(len: usize, capacity: usize) -> Option<usize> {
    if capacity > DOUBLE_BASE_SIZE && len < capacity / 3 {
        if len > DOUBLE_BASE_SIZE {
            Some(len + (len >> 1))
        } else {
            Some(DOUBLE_BASE_SIZE)
        }
    } else {
        None
    }
}

/// Returns `true` if `capacity` is one of the two sizes the pool recycles.
#[inline]
#[must_use]
pub const fn is_canonical(capacity: usize) -> bool {
    capacity == BASE_SIZE || capacity == DOUBLE_BASE_SIZE
}
