//! The array-backed set.
//!
//! [`ArraySet`] stores its elements in one sorted vector (plus a parallel key
//! vector when key-indexed) instead of a bucket table. Every public operation
//! is a composition of four primitives: locate, insert-at, remove-at and
//! ensure-capacity.
//!
//! # Time Complexity
//!
//! | Operation         | Complexity                    |
//! |-------------------|-------------------------------|
//! | `contains`        | O(log n) + collision run      |
//! | `insert`          | O(n)                          |
//! | `remove`          | O(n)                          |
//! | `value_at`, `len` | O(1)                          |
//! | `iter`            | O(n)                          |
//! | `add_all`         | O(m · n), one pre-allocation  |
//!
//! # Examples
//!
//! ```rust
//! use arrayset::ArraySet;
//!
//! let mut set = ArraySet::new();
//! assert!(set.insert(5));
//! assert!(!set.insert(5));
//! set.add_all([6, 7, 8]);
//! assert_eq!(set.len(), 4);
//!
//! assert!(!set.remove(&55));
//! assert!(set.remove(&7));
//! assert_eq!(set.len(), 3);
//! ```

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::cursor::Cursor;
use crate::error::IndexOutOfRangeError;
use crate::indexing::Indexing;
use crate::locate::{Position, locate};
use crate::pool::ArrayPool;
use crate::store::BackingStore;
use crate::view::SetView;

/// A compact ordered set backed by a single sorted array.
///
/// Slots are kept sorted by the set's [`Indexing`] strategy and hold no two
/// equal elements. Backing vectors are allocated from, and returned to, an
/// [`ArrayPool`].
///
/// # Type Parameters
///
/// * `T` - The element type. Membership is decided by `PartialEq`.
///
/// # Examples
///
/// ```rust
/// use arrayset::ArraySet;
///
/// let mut by_value = ArraySet::with_comparator(|left: &u8, right: &u8| left.cmp(right));
/// by_value.add_all([30, 10, 20]);
/// assert_eq!(by_value.as_slice(), &[10, 20, 30]);
/// assert_eq!(by_value.to_string(), "{10, 20, 30}");
/// ```
pub struct ArraySet<T> {
    store: BackingStore<T>,
    indexing: Indexing<T>,
}

impl<T: Hash + Eq + Send + 'static> ArraySet<T> {
    /// Creates an empty, hash-keyed set on the shared pool for `T`.
    ///
    /// No memory is allocated until the first insert.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arrayset::ArraySet;
    ///
    /// let set: ArraySet<String> = ArraySet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_indexing(Indexing::hashed())
    }

    /// Creates an empty, hash-keyed set with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_pool(Indexing::hashed(), capacity, ArrayPool::shared())
    }
}

impl<T: Send + 'static> ArraySet<T> {
    /// Creates an empty set with the given strategy on the shared pool for `T`.
    #[must_use]
    pub fn with_indexing(indexing: Indexing<T>) -> Self {
        Self::with_pool(indexing, 0, ArrayPool::shared())
    }

    /// Creates an empty set ordered by `compare`.
    ///
    /// `compare` must be a total order under which equal elements compare as
    /// `Equal`. Elements that compare `Equal` but are not `==` are all kept.
    #[must_use]
    pub fn with_comparator<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        Self::with_indexing(Indexing::compared_by(compare))
    }

    /// Creates an empty set ordered by `compare` with room for `capacity` elements.
    #[must_use]
    pub fn with_capacity_and_comparator<F>(capacity: usize, compare: F) -> Self
    where
        F: Fn(&T, &T) -> std::cmp::Ordering + Send + Sync + 'static,
    {
        Self::with_pool(Indexing::compared_by(compare), capacity, ArrayPool::shared())
    }

    /// Starts configuring a set with the given strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arrayset::{ArraySet, ArrayPool, Indexing};
    /// use std::sync::Arc;
    ///
    /// let pool = Arc::new(ArrayPool::with_limit(4));
    /// let set: ArraySet<u32> = ArraySet::builder(Indexing::keyed_by(|value: &u32| value.cast_signed()))
    ///     .capacity(8)
    ///     .pool(Arc::clone(&pool))
    ///     .build();
    /// assert_eq!(set.capacity(), 8);
    /// assert!(Arc::ptr_eq(set.pool(), &pool));
    /// ```
    #[must_use]
    pub const fn builder(indexing: Indexing<T>) -> ArraySetBuilder<T> {
        ArraySetBuilder {
            indexing,
            capacity: 0,
            pool: None,
        }
    }
}

impl<T> ArraySet<T> {
    /// Creates an empty set drawing its vectors from `pool`.
    ///
    /// This is the only constructor without `Send + 'static` bounds on `T`.
    #[must_use]
    pub fn with_pool(indexing: Indexing<T>, capacity: usize, pool: Arc<ArrayPool<T>>) -> Self {
        Self {
            store: BackingStore::new(indexing.is_keyed(), capacity, pool),
            indexing,
        }
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Returns the number of slots currently allocated.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Returns the ordering strategy.
    #[inline]
    #[must_use]
    pub const fn indexing(&self) -> &Indexing<T> {
        &self.indexing
    }

    /// Returns the pool this set allocates from.
    #[inline]
    #[must_use]
    pub const fn pool(&self) -> &Arc<ArrayPool<T>> {
        self.store.pool()
    }

    /// Returns the elements in slot order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.store.elements()
    }

    /// Returns an iterator over the elements in slot order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.store.elements().iter()
    }

    /// Returns the element at `index`, or `None` if `index >= len`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.store.elements().get(index)
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    #[track_caller]
    pub fn value_at(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => out_of_range(index, self.len()),
        }
    }

    /// Removes and returns the element at `index`.
    ///
    /// The backing vectors shrink when the set falls under a third of its
    /// capacity, and are released entirely when the last element goes.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove_at(&mut self, index: usize) -> T {
        let len = self.len();
        match self.store.remove_at(index) {
            Some(value) => value,
            None => out_of_range(index, len),
        }
    }

    /// Removes and returns the element at `index`, or reports the bad index.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfRangeError`] if `index >= len`; the set is unchanged.
    pub fn try_remove_at(&mut self, index: usize) -> Result<T, IndexOutOfRangeError> {
        let len = self.len();
        self.store
            .remove_at(index)
            .ok_or(IndexOutOfRangeError { index, len })
    }

    /// Makes room for at least `minimum_capacity` elements in one allocation.
    pub fn ensure_capacity(&mut self, minimum_capacity: usize) {
        self.store.ensure_capacity(minimum_capacity);
    }

    /// Removes every element and releases the backing vectors to the pool.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Returns a cursor that can remove elements while traversing.
    pub const fn cursor(&mut self) -> Cursor<'_, T> {
        Cursor::new(self)
    }

    /// Removes every element for which `keep` returns `false`.
    ///
    /// Returns `true` if anything was removed.
    pub fn retain<F>(&mut self, mut keep: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = false;
        for index in (0..self.len()).rev() {
            if !keep(&self.store.elements()[index]) {
                self.remove_at(index);
                removed = true;
            }
        }
        removed
    }

    /// Wrapping sum of the cached keys of a key-indexed set.
    ///
    /// Returns `None` for a comparator-indexed set, which caches no keys.
    /// Equal key-indexed sets built with the same key function have equal
    /// sums; no such guarantee holds across strategies or key functions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arrayset::{ArraySet, Indexing};
    ///
    /// let mut set = ArraySet::with_indexing(Indexing::keyed_by(|value: &i32| *value));
    /// set.add_all([1, 2, 3]);
    /// assert_eq!(set.key_hash(), Some(6));
    ///
    /// let compared = ArraySet::with_comparator(|left: &i32, right: &i32| left.cmp(right));
    /// assert_eq!(compared.key_hash(), None);
    /// ```
    #[must_use]
    pub fn key_hash(&self) -> Option<i32> {
        self.indexing.is_keyed().then(|| {
            self.store
                .keys()
                .iter()
                .fold(0_i32, |sum, key| sum.wrapping_add(*key))
        })
    }
}

impl<T: PartialEq> ArraySet<T> {
    /// Looks `element` up.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arrayset::{ArraySet, Position};
    ///
    /// let mut set = ArraySet::with_comparator(|left: &i32, right: &i32| left.cmp(right));
    /// set.add_all([2, 4]);
    /// assert_eq!(set.position(&4), Position::Found(1));
    /// assert_eq!(set.position(&3), Position::Vacant(1));
    /// ```
    #[must_use]
    pub fn position(&self, element: &T) -> Position {
        self.locate_with(element, None)
    }

    /// Looks `element` up and returns the position in its raw signed form.
    ///
    /// A non-negative result is the index of the equal element. A negative
    /// result `r` means the element is absent and `!r` is its insertion
    /// index. [`ArraySet::position`] is the typed equivalent.
    #[must_use]
    pub fn index_of(&self, element: &T) -> isize {
        self.position(element).to_raw()
    }

    /// Returns `true` if the set holds an element equal to `element`.
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.position(element).is_found()
    }

    /// Returns `true` if every element yielded by `elements` is in the set.
    pub fn contains_all<'a, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        elements.into_iter().all(|element| self.contains(element))
    }

    /// Adds `value`, returning `true` if it was not already present.
    ///
    /// A duplicate is dropped and the set is left unchanged.
    pub fn insert(&mut self, value: T) -> bool {
        self.insert_full(value).1
    }

    /// Adds `value` and returns its index and whether it was newly inserted.
    ///
    /// If an equal element exists, `value` is dropped and the existing
    /// element's index is returned with `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arrayset::ArraySet;
    ///
    /// let mut set = ArraySet::with_comparator(|left: &char, right: &char| left.cmp(right));
    /// assert_eq!(set.insert_full('b'), (0, true));
    /// assert_eq!(set.insert_full('a'), (0, true));
    /// assert_eq!(set.insert_full('b'), (1, false));
    /// ```
    pub fn insert_full(&mut self, value: T) -> (usize, bool) {
        let key = self.indexing.key_of(&value);
        match self.locate_with(&value, key) {
            Position::Found(index) => (index, false),
            Position::Vacant(index) => {
                self.store.insert_at(index, value, key);
                (index, true)
            }
        }
    }

    /// Removes the element equal to `element`, returning `true` if one existed.
    pub fn remove(&mut self, element: &T) -> bool {
        self.take(element).is_some()
    }

    /// Removes and returns the element equal to `element`.
    pub fn take(&mut self, element: &T) -> Option<T> {
        match self.position(element) {
            Position::Found(index) => self.store.remove_at(index),
            Position::Vacant(_) => None,
        }
    }

    /// Adds every value, growing the backing vectors at most once up front
    /// (by the iterator's lower size bound).
    ///
    /// Returns `true` if any value was newly inserted.
    pub fn add_all<I>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        let (expected, _) = values.size_hint();
        if expected > 0 {
            self.ensure_capacity(self.len() + expected);
        }

        let mut added = false;
        for value in values {
            added |= self.insert(value);
        }
        added
    }

    /// Removes every element equal to one yielded by `elements`.
    ///
    /// Returns `true` if anything was removed.
    pub fn remove_all<'a, I>(&mut self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        let mut removed = false;
        for element in elements {
            removed |= self.remove(element);
        }
        removed
    }

    /// Removes every element that `other` does not contain.
    ///
    /// Returns `true` if anything was removed.
    pub fn retain_all<V>(&mut self, other: &V) -> bool
    where
        V: SetView<T> + ?Sized,
    {
        self.retain(|element| other.contains(element))
    }

    /// Structural equality against any set-like collection: same size and
    /// every element of `self` is a member of `other`.
    ///
    /// The strategies of the two sets do not need to match.
    #[must_use]
    pub fn set_eq<V>(&self, other: &V) -> bool
    where
        V: SetView<T> + ?Sized,
    {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }

    fn locate_with(&self, element: &T, key: Option<i32>) -> Position {
        let elements = self.store.elements();
        let matches_at = |index: usize| elements[index] == *element;
        match &self.indexing {
            Indexing::Compared(compare) => locate(
                elements.len(),
                |index| compare(&elements[index], element),
                matches_at,
            ),
            Indexing::Keyed(derive) => {
                let key = key.unwrap_or_else(|| derive(element));
                let keys = self.store.keys();
                locate(keys.len(), |index| keys[index].cmp(&key), matches_at)
            }
        }
    }
}

impl<T: Clone> ArraySet<T> {
    /// Copies the elements, in slot order, into a new vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.store.elements().to_vec()
    }

    /// Copies the elements into `buffer`, reusing its allocation.
    ///
    /// Previous contents of `buffer` are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arrayset::ArraySet;
    ///
    /// let set = ArraySet::with_capacity_and_comparator(4, |left: &i32, right: &i32| left.cmp(right));
    /// let buffer = Vec::with_capacity(16);
    /// let copied = set.to_vec_in(buffer);
    /// assert!(copied.is_empty());
    /// assert_eq!(copied.capacity(), 16);
    /// ```
    #[must_use]
    pub fn to_vec_in(&self, mut buffer: Vec<T>) -> Vec<T> {
        buffer.clear();
        buffer.extend_from_slice(self.store.elements());
        buffer
    }
}

#[track_caller]
fn out_of_range(index: usize, len: usize) -> ! {
    panic!("{}", IndexOutOfRangeError { index, len })
}

/// Configures and builds an [`ArraySet`].
///
/// Created by [`ArraySet::builder`].
#[derive(Debug)]
pub struct ArraySetBuilder<T> {
    indexing: Indexing<T>,
    capacity: usize,
    pool: Option<Arc<ArrayPool<T>>>,
}

impl<T> ArraySetBuilder<T> {
    /// Sets the initial capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Uses `pool` instead of the shared pool for `T`.
    #[must_use]
    pub fn pool(mut self, pool: Arc<ArrayPool<T>>) -> Self {
        self.pool = Some(pool);
        self
    }
}

impl<T: Send + 'static> ArraySetBuilder<T> {
    /// Builds the set.
    #[must_use]
    pub fn build(self) -> ArraySet<T> {
        let pool = self.pool.unwrap_or_else(ArrayPool::shared);
        ArraySet::with_pool(self.indexing, self.capacity, pool)
    }
}

impl<T: Hash + Eq + Send + 'static> Default for ArraySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ArraySet<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            indexing: self.indexing.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ArraySet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for ArraySet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

impl<T: PartialEq> PartialEq for ArraySet<T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.set_eq(other)
    }
}

impl<T: Eq> Eq for ArraySet<T> {}

impl<T: PartialEq> Extend<T> for ArraySet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.add_all(values);
    }
}

impl<T: Hash + Eq + Send + 'static> FromIterator<T> for ArraySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut set = Self::new();
        set.add_all(values);
        set
    }
}

impl<'a, T> IntoIterator for &'a ArraySet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for ArraySet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        self.store.take_elements().into_iter()
    }
}

static_assertions::assert_impl_all!(ArraySet<String>: Send, Sync, Clone);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ArraySet<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct ArraySetVisitor<T> {
    marker: std::marker::PhantomData<T>,
}

#[cfg(feature = "serde")]
impl<T> ArraySetVisitor<T> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::de::Visitor<'de> for ArraySetVisitor<T>
where
    T: serde::Deserialize<'de> + Hash + Eq + Send + 'static,
{
    type Value = ArraySet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        // The length hint comes from the input; grow per element instead.
        let mut set = ArraySet::new();
        while let Some(element) = seq.next_element()? {
            set.insert(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T> serde::Deserialize<'de> for ArraySet<T>
where
    T: serde::Deserialize<'de> + Hash + Eq + Send + 'static,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(ArraySetVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
