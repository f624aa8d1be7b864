//! Ordering strategies.
//!
//! An [`ArraySet`](crate::ArraySet) keeps its slots sorted by one of two
//! strategies, chosen when the set is built:
//!
//! - [`Indexing::Keyed`]: every element gets an `i32` key, computed once on
//!   insert and cached in a parallel key array. Searches compare cached keys
//!   and only touch elements inside a collision run.
//! - [`Indexing::Compared`]: slots are ordered by a comparator over the
//!   elements themselves. No keys are cached, which saves four bytes per slot
//!   at the price of calling the comparator on every probe.
//!
//! Either way, equality of elements is decided by `PartialEq`: the key or the
//! comparator only needs to agree with it (equal elements must have equal
//! keys, or compare as `Equal`). Distinct elements may collide freely.
//!
//! # Nullable elements
//!
//! An `Option<U>` element set treats `None` as the null element. The
//! `nullable_*` helpers key `None` as [`NULL_KEY`], so it shares a collision
//! run with any element whose key is `0` and is told apart by equality.
//!
//! ```rust
//! use arrayset::{ArraySet, Indexing};
//! use arrayset::indexing::nullable_key;
//!
//! let mut set = ArraySet::with_indexing(Indexing::keyed_by(nullable_key(|value: &i32| *value)));
//! assert!(set.insert(None));
//! assert!(set.insert(Some(0)));
//! assert!(!set.insert(None));
//! assert_eq!(set.len(), 2);
//! ```

use std::cmp::Ordering;
use std::fmt;
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
use std::hash::BuildHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Key given to the null element (`None`) by the `nullable_*` helpers.
pub const NULL_KEY: i32 = 0;

/// Shared key-extraction function.
pub type KeyFn<T> = Arc<dyn Fn(&T) -> i32 + Send + Sync>;

/// Shared total-order comparator.
pub type CompareFn<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// The ordering strategy of a set.
///
/// # Examples
///
/// ```rust
/// use arrayset::Indexing;
///
/// let keyed: Indexing<String> = Indexing::hashed();
/// assert!(keyed.is_keyed());
///
/// let compared = Indexing::compared_by(|left: &String, right: &String| left.len().cmp(&right.len()));
/// assert!(!compared.is_keyed());
/// ```
pub enum Indexing<T> {
    /// Sorted by a cached `i32` key per element.
    Keyed(KeyFn<T>),
    /// Sorted by a comparator over the elements.
    Compared(CompareFn<T>),
}

impl<T> Indexing<T> {
    /// Key-indexed strategy using `key` to derive each element's key.
    #[must_use]
    pub fn keyed_by<F>(key: F) -> Self
    where
        F: Fn(&T) -> i32 + Send + Sync + 'static,
    {
        Self::Keyed(Arc::new(key))
    }

    /// Comparator-indexed strategy.
    ///
    /// `compare` must be a total order consistent with `PartialEq`: equal
    /// elements must compare as `Equal`. Searches give unspecified results
    /// otherwise.
    #[must_use]
    pub fn compared_by<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self::Compared(Arc::new(compare))
    }

    /// Returns `true` for the key-indexed strategy.
    #[inline]
    #[must_use]
    pub const fn is_keyed(&self) -> bool {
        matches!(self, Self::Keyed(_))
    }

    /// Computes the cached key of `element`, or `None` for a comparator strategy.
    #[inline]
    pub(crate) fn key_of(&self, element: &T) -> Option<i32> {
        match self {
            Self::Keyed(key) => Some(key(element)),
            Self::Compared(_) => None,
        }
    }
}

impl<T: Hash + 'static> Indexing<T> {
    /// Key-indexed strategy keyed by each element's hash (see [`hash_key`]).
    #[must_use]
    pub fn hashed() -> Self {
        Self::keyed_by(hash_key::<T>)
    }
}

impl<U: Hash + 'static> Indexing<Option<U>> {
    /// Key-indexed strategy for nullable elements: `None` is keyed as
    /// [`NULL_KEY`], `Some(value)` by the hash of `value`.
    #[must_use]
    pub fn nullable_hashed() -> Self {
        Self::keyed_by(nullable_key(hash_key::<U>))
    }
}

impl<T> Clone for Indexing<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Keyed(key) => Self::Keyed(Arc::clone(key)),
            Self::Compared(compare) => Self::Compared(Arc::clone(compare)),
        }
    }
}

impl<T> fmt::Debug for Indexing<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyed(_) => formatter.write_str("Keyed(..)"),
            Self::Compared(_) => formatter.write_str("Compared(..)"),
        }
    }
}

/// Folds the hash of `value` into an `i32` key.
///
/// The hasher is `std`'s `DefaultHasher`, or `FxHasher` with the `fxhash`
/// feature, or fixed-seed `ahash` with the `ahash` feature. Keys are stable
/// within a build but not across hasher choices or toolchain versions.
///
/// # Examples
///
/// ```rust
/// use arrayset::indexing::hash_key;
///
/// assert_eq!(hash_key("alpha"), hash_key("alpha"));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn hash_key<T: Hash + ?Sized>(value: &T) -> i32 {
    let mut hasher = new_hasher();
    value.hash(&mut hasher);
    let hash = hasher.finish();
    ((hash ^ (hash >> 32)) as u32).cast_signed()
}

#[cfg(feature = "fxhash")]
fn new_hasher() -> impl Hasher {
    rustc_hash::FxHasher::default()
}

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
fn new_hasher() -> impl Hasher {
    ahash::RandomState::with_seeds(
        0x243f_6a88_85a3_08d3,
        0x1319_8a2e_0370_7344,
        0xa409_3822_299f_31d0,
        0x082e_fa98_ec4e_6c89,
    )
    .build_hasher()
}

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
fn new_hasher() -> impl Hasher {
    std::collections::hash_map::DefaultHasher::new()
}

/// Lifts a key function over `U` to `Option<U>`, keying `None` as [`NULL_KEY`].
pub fn nullable_key<U, F>(key: F) -> impl Fn(&Option<U>) -> i32 + Send + Sync + 'static
where
    U: 'static,
    F: Fn(&U) -> i32 + Send + Sync + 'static,
{
    move |element: &Option<U>| element.as_ref().map_or(NULL_KEY, &key)
}

/// Comparators for [`Indexing::compared_by`].
pub mod comparator {
    use std::cmp::Ordering;

    use super::NULL_KEY;

    /// Orders elements by an `i32` key.
    ///
    /// Elements with equal keys compare as `Equal` and are separated by the
    /// collision walk.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arrayset::{ArraySet, Indexing};
    /// use arrayset::indexing::{comparator, hash_key};
    ///
    /// let by_hash = comparator::by_key(|word: &String| hash_key(word));
    /// let mut set = ArraySet::with_indexing(Indexing::compared_by(by_hash));
    /// set.insert("one".to_string());
    /// assert!(set.contains(&"one".to_string()));
    /// ```
    pub fn by_key<T, F>(key: F) -> impl Fn(&T, &T) -> Ordering + Send + Sync + 'static
    where
        T: ?Sized + 'static,
        F: Fn(&T) -> i32 + Send + Sync + 'static,
    {
        move |left: &T, right: &T| key(left).cmp(&key(right))
    }

    /// Orders nullable elements by an `i32` key, ranking `None` as
    /// [`NULL_KEY`](super::NULL_KEY).
    pub fn nullable_by_key<U, F>(
        key: F,
    ) -> impl Fn(&Option<U>, &Option<U>) -> Ordering + Send + Sync + 'static
    where
        U: 'static,
        F: Fn(&U) -> i32 + Send + Sync + 'static,
    {
        move |left: &Option<U>, right: &Option<U>| {
            let left = left.as_ref().map_or(NULL_KEY, &key);
            let right = right.as_ref().map_or(NULL_KEY, &key);
            left.cmp(&right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn hash_key_is_deterministic() {
        assert_eq!(hash_key(&42_u64), hash_key(&42_u64));
        assert_eq!(hash_key("word"), hash_key(&"word".to_string()));
    }

    #[rstest]
    fn keyed_strategy_computes_keys() {
        let indexing: Indexing<i32> = Indexing::keyed_by(|value| value * 2);
        assert_eq!(indexing.key_of(&21), Some(42));
    }

    #[rstest]
    fn compared_strategy_has_no_keys() {
        let indexing: Indexing<i32> = Indexing::compared_by(|left: &i32, right: &i32| left.cmp(right));
        assert_eq!(indexing.key_of(&21), None);
    }

    #[rstest]
    fn nullable_key_maps_none_to_sentinel() {
        let key = nullable_key(|value: &i32| *value + 100);
        assert_eq!(key(&None), NULL_KEY);
        assert_eq!(key(&Some(1)), 101);
    }

    #[rstest]
    fn nullable_hashed_keys_none_as_sentinel() {
        let indexing: Indexing<Option<String>> = Indexing::nullable_hashed();
        assert_eq!(indexing.key_of(&None), Some(NULL_KEY));
        assert_eq!(
            indexing.key_of(&Some("x".to_string())),
            Some(hash_key(&"x".to_string()))
        );
    }

    #[rstest]
    fn by_key_compares_keys_only() {
        let compare = comparator::by_key(|value: &i32| value / 10);
        assert_eq!(compare(&11, &19), Ordering::Equal);
        assert_eq!(compare(&11, &21), Ordering::Less);
        assert_eq!(compare(&31, &21), Ordering::Greater);
    }

    #[rstest]
    fn nullable_by_key_ranks_none_with_zero() {
        let compare = comparator::nullable_by_key(|value: &i32| *value);
        assert_eq!(compare(&None, &Some(0)), Ordering::Equal);
        assert_eq!(compare(&None, &Some(1)), Ordering::Less);
        assert_eq!(compare(&Some(-1), &None), Ordering::Less);
    }

    #[rstest]
    fn debug_hides_closures() {
        let indexing: Indexing<u8> = Indexing::hashed();
        assert_eq!(format!("{indexing:?}"), "Keyed(..)");
    }
}
