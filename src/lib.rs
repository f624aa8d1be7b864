//! # arrayset
//!
//! A memory-compact ordered set backed by a single sorted array.
//!
//! ## Overview
//!
//! [`ArraySet`] trades the buckets of a hash set for one contiguous element
//! vector kept in sorted order. Lookups are a binary search plus a short walk
//! over elements that share a rank; inserts and removes shift the tail of the
//! array. For collections of up to a few hundred elements this costs little
//! time and saves most of a hash table's per-element overhead.
//!
//! - **Two strategies**: order by a cached `i32` key per element, or by a
//!   comparator with no cached key (see [`Indexing`]).
//! - **Collision handling**: distinct elements with the same key or rank are
//!   all kept and found through a walk over their run.
//! - **Hysteresis**: the array grows through two small canonical sizes, then
//!   by about 1.5x, and shrinks only under a third of capacity (see
//!   [`capacity`]).
//! - **Recycling pool**: arrays of the two canonical sizes are recycled
//!   through a shared, mutex-guarded [`ArrayPool`].
//!
//! ## Feature Flags
//!
//! - `fxhash`: derive hash keys with `rustc_hash::FxHasher`
//! - `ahash`: derive hash keys with fixed-seed `ahash`
//! - `serde`: `Serialize` / `Deserialize` for [`ArraySet`]
//! - `full`: `serde` and `fxhash`
//!
//! ## Example
//!
//! ```rust
//! use arrayset::prelude::*;
//!
//! let mut set: ArraySet<i32> = (1..=13).collect();
//! assert_eq!(set.len(), 13);
//! assert!(set.contains_all(&[1, 7, 13]));
//!
//! set.remove_all(&[1, 2, 3]);
//! assert_eq!(set.len(), 10);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use arrayset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cursor::Cursor;
    pub use crate::error::IndexOutOfRangeError;
    pub use crate::indexing::Indexing;
    pub use crate::locate::Position;
    pub use crate::pool::ArrayPool;
    pub use crate::set::{ArraySet, ArraySetBuilder};
    pub use crate::view::SetView;
}

pub mod capacity;
pub mod cursor;
pub mod error;
pub mod indexing;
mod locate;
pub mod pool;
mod set;
mod store;
pub mod view;

pub use cursor::Cursor;
pub use error::IndexOutOfRangeError;
pub use indexing::Indexing;
pub use locate::Position;
pub use pool::ArrayPool;
pub use set::{ArraySet, ArraySetBuilder};
pub use view::SetView;
