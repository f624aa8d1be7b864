//! Recycling pool for small backing arrays.
//!
//! Sets that grow, shrink, clear or drop hand their old vectors to an
//! [`ArrayPool`]. Vectors whose capacity is one of the two canonical sizes
//! ([`BASE_SIZE`] and `2 * BASE_SIZE`) are kept, empty, on a bounded free
//! list; every other vector is simply dropped. A later allocation at a
//! canonical size pops a retained vector instead of calling the allocator.
//!
//! A pool keeps separate free lists for element vectors (`Vec<T>`) and key
//! vectors (`Vec<i32>`), both behind one [`parking_lot::Mutex`]. The lock is
//! only held for a push or a pop: retired vectors are scrubbed and new ones
//! allocated outside of it.
//!
//! # Sharing
//!
//! A pool is shared by reference. Hand the same `Arc<ArrayPool<T>>` to
//! several sets with [`ArraySet::with_pool`](crate::ArraySet::with_pool), or
//! use the process-wide pool for `T` returned by [`ArrayPool::shared`].
//!
//! # Examples
//!
//! ```rust
//! use arrayset::pool::ArrayPool;
//!
//! let pool: ArrayPool<String> = ArrayPool::new();
//!
//! let mut vector = pool.acquire_elements(4);
//! vector.push("retired".to_string());
//! pool.release_elements(vector);
//! assert_eq!(pool.pooled().base_elements, 1);
//!
//! // The retained vector comes back empty.
//! let reused = pool.acquire_elements(4);
//! assert!(reused.is_empty());
//! assert_eq!(reused.capacity(), 4);
//! assert_eq!(pool.stats().hits, 1);
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

use crate::capacity::{BASE_SIZE, DOUBLE_BASE_SIZE};

/// Default number of vectors retained per canonical size and per free list.
pub const DEFAULT_POOL_LIMIT: usize = 10;

/// Free lists for one kind of vector, one per canonical size.
struct FreeList<A> {
    base: Vec<Vec<A>>,
    double: Vec<Vec<A>>,
}

impl<A> FreeList<A> {
    const fn new() -> Self {
        Self {
            base: Vec::new(),
            double: Vec::new(),
        }
    }

    fn slot(&mut self, capacity: usize) -> Option<&mut Vec<Vec<A>>> {
        match capacity {
            BASE_SIZE => Some(&mut self.base),
            DOUBLE_BASE_SIZE => Some(&mut self.double),
            _ => None,
        }
    }
}

struct PoolState<T> {
    elements: FreeList<T>,
    keys: FreeList<i32>,
    stats: PoolStats,
}

/// Counters describing how a pool has been used since it was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Acquisitions served from a free list.
    pub hits: u64,
    /// Acquisitions at a canonical size that found the free list empty.
    pub misses: u64,
    /// Released vectors that were kept.
    pub retained: u64,
    /// Released canonical vectors dropped because their free list was full.
    pub discarded: u64,
}

/// Number of vectors currently held by a pool, per free list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PooledCounts {
    /// Element vectors of capacity `BASE_SIZE`.
    pub base_elements: usize,
    /// Element vectors of capacity `2 * BASE_SIZE`.
    pub double_elements: usize,
    /// Key vectors of capacity `BASE_SIZE`.
    pub base_keys: usize,
    /// Key vectors of capacity `2 * BASE_SIZE`.
    pub double_keys: usize,
}

/// A bounded, thread-safe cache of retired backing vectors.
///
/// See the [module documentation](self) for details.
pub struct ArrayPool<T> {
    limit: usize,
    state: Mutex<PoolState<T>>,
}

impl<T> ArrayPool<T> {
    /// Creates a pool retaining at most [`DEFAULT_POOL_LIMIT`] vectors per
    /// canonical size.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_limit(DEFAULT_POOL_LIMIT)
    }

    /// Creates a pool retaining at most `limit` vectors per canonical size.
    ///
    /// A limit of zero disables recycling.
    #[must_use]
    pub const fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            state: Mutex::new(PoolState {
                elements: FreeList::new(),
                keys: FreeList::new(),
                stats: PoolStats {
                    hits: 0,
                    misses: 0,
                    retained: 0,
                    discarded: 0,
                },
            }),
        }
    }

    /// Returns the per-size retention limit.
    #[inline]
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns an empty element vector with room for exactly `capacity` slots.
    ///
    /// Reuses a retained vector when `capacity` is canonical and one is
    /// available.
    #[must_use]
    pub fn acquire_elements(&self, capacity: usize) -> Vec<T> {
        let reused = self.pop(capacity, |state| &mut state.elements);
        reused.unwrap_or_else(|| Vec::with_capacity(capacity))
    }

    /// Returns an empty key vector with room for exactly `capacity` slots.
    #[must_use]
    pub fn acquire_keys(&self, capacity: usize) -> Vec<i32> {
        let reused = self.pop(capacity, |state| &mut state.keys);
        reused.unwrap_or_else(|| Vec::with_capacity(capacity))
    }

    /// Scrubs `vector` and retains it when its capacity is canonical.
    ///
    /// The live elements are dropped before the lock is taken.
    pub fn release_elements(&self, mut vector: Vec<T>) {
        vector.clear();
        self.push(vector, |state| &mut state.elements);
    }

    /// Retains `vector` when its capacity is canonical.
    pub fn release_keys(&self, mut vector: Vec<i32>) {
        vector.clear();
        self.push(vector, |state| &mut state.keys);
    }

    /// Returns a snapshot of the usage counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.state.lock().stats
    }

    /// Returns how many vectors each free list currently holds.
    #[must_use]
    pub fn pooled(&self) -> PooledCounts {
        let state = self.state.lock();
        PooledCounts {
            base_elements: state.elements.base.len(),
            double_elements: state.elements.double.len(),
            base_keys: state.keys.base.len(),
            double_keys: state.keys.double.len(),
        }
    }

    /// Drops every retained vector.
    pub fn purge(&self) {
        let (elements, keys) = {
            let mut state = self.state.lock();
            (
                std::mem::replace(&mut state.elements, FreeList::new()),
                std::mem::replace(&mut state.keys, FreeList::new()),
            )
        };
        drop((elements, keys));
    }

    fn pop<A>(
        &self,
        capacity: usize,
        list: impl FnOnce(&mut PoolState<T>) -> &mut FreeList<A>,
    ) -> Option<Vec<A>> {
        if !crate::capacity::is_canonical(capacity) {
            return None;
        }
        let mut state = self.state.lock();
        let reused = list(&mut *state).slot(capacity).and_then(Vec::pop);
        if reused.is_some() {
            state.stats.hits += 1;
        } else {
            state.stats.misses += 1;
        }
        drop(state);

        tracing::trace!(capacity, hit = reused.is_some(), "array pool acquire");
        reused
    }

    fn push<A>(
        &self,
        vector: Vec<A>,
        list: impl FnOnce(&mut PoolState<T>) -> &mut FreeList<A>,
    ) {
        let capacity = vector.capacity();
        if !crate::capacity::is_canonical(capacity) {
            return;
        }
        let mut state = self.state.lock();
        let limit = self.limit;
        let rejected = match list(&mut *state).slot(capacity) {
            Some(slot) if slot.len() < limit => {
                slot.push(vector);
                None
            }
            _ => Some(vector),
        };
        if rejected.is_some() {
            state.stats.discarded += 1;
        } else {
            state.stats.retained += 1;
        }
        drop(state);

        tracing::trace!(capacity, retained = rejected.is_none(), "array pool release");
        drop(rejected);
    }
}

type Registry = Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

static SHARED_POOLS: LazyLock<Registry> = LazyLock::new(|| Mutex::new(HashMap::new()));

impl<T: Send + 'static> ArrayPool<T> {
    /// Returns the process-wide pool for element type `T`.
    ///
    /// Every call for the same `T` returns the same pool. Sets created with
    /// [`ArraySet::new`](crate::ArraySet::new) and the other default
    /// constructors use it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arrayset::pool::ArrayPool;
    /// use std::sync::Arc;
    ///
    /// let first = ArrayPool::<u64>::shared();
    /// let second = ArrayPool::<u64>::shared();
    /// assert!(Arc::ptr_eq(&first, &second));
    /// ```
    #[must_use]
    pub fn shared() -> Arc<Self> {
        let mut registry = SHARED_POOLS.lock();
        let entry = registry
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Arc::new(Self::new()) as Arc<dyn Any + Send + Sync>);
        match Arc::clone(entry).downcast::<Self>() {
            Ok(pool) => pool,
            // The registry is keyed by `TypeId::of::<T>()`, so the entry is
            // always an `ArrayPool<T>`; replace it if that ever stops holding.
            Err(_) => {
                let pool = Arc::new(Self::new());
                *entry = Arc::clone(&pool) as Arc<dyn Any + Send + Sync>;
                pool
            }
        }
    }
}

impl<T> Default for ArrayPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ArrayPool<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ArrayPool")
            .field("limit", &self.limit)
            .field("pooled", &self.pooled())
            .field("stats", &self.stats())
            .finish()
    }
}

static_assertions::assert_impl_all!(ArrayPool<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn acquire_from_empty_pool_allocates_exact_capacity() {
        let pool: ArrayPool<u8> = ArrayPool::new();
        let vector = pool.acquire_elements(BASE_SIZE);
        assert_eq!(vector.capacity(), BASE_SIZE);
        assert_eq!(pool.stats().misses, 1);
        assert_eq!(pool.stats().hits, 0);
    }

    #[rstest]
    fn non_canonical_sizes_bypass_the_pool() {
        let pool: ArrayPool<u8> = ArrayPool::new();
        let vector = pool.acquire_elements(12);
        assert_eq!(vector.capacity(), 12);
        pool.release_elements(vector);

        assert_eq!(pool.pooled(), PooledCounts::default());
        assert_eq!(pool.stats(), PoolStats::default());
    }

    #[rstest]
    #[case(BASE_SIZE)]
    #[case(DOUBLE_BASE_SIZE)]
    fn released_vectors_are_reused(#[case] capacity: usize) {
        let pool: ArrayPool<u32> = ArrayPool::new();
        let mut vector = pool.acquire_elements(capacity);
        vector.extend([1, 2, 3]);
        pool.release_elements(vector);

        let reused = pool.acquire_elements(capacity);
        assert!(reused.is_empty());
        assert_eq!(reused.capacity(), capacity);
        assert_eq!(pool.stats().hits, 1);
    }

    #[rstest]
    fn element_and_key_lists_are_separate() {
        let pool: ArrayPool<String> = ArrayPool::new();
        pool.release_keys(Vec::with_capacity(BASE_SIZE));
        pool.release_elements(Vec::with_capacity(DOUBLE_BASE_SIZE));

        let counts = pool.pooled();
        assert_eq!(counts.base_keys, 1);
        assert_eq!(counts.double_elements, 1);
        assert_eq!(counts.base_elements, 0);
        assert_eq!(counts.double_keys, 0);
    }

    #[rstest]
    fn pool_is_bounded_by_limit() {
        let pool: ArrayPool<u8> = ArrayPool::with_limit(2);
        for _ in 0..5 {
            pool.release_elements(Vec::with_capacity(BASE_SIZE));
        }
        assert_eq!(pool.pooled().base_elements, 2);
        assert_eq!(pool.stats().retained, 2);
        assert_eq!(pool.stats().discarded, 3);
    }

    #[rstest]
    fn zero_limit_disables_recycling() {
        let pool: ArrayPool<u8> = ArrayPool::with_limit(0);
        pool.release_elements(Vec::with_capacity(BASE_SIZE));
        assert_eq!(pool.pooled().base_elements, 0);
    }

    #[rstest]
    fn release_drops_live_elements() {
        let tracker = Arc::new(());
        let pool: ArrayPool<Arc<()>> = ArrayPool::new();
        let mut vector = pool.acquire_elements(BASE_SIZE);
        vector.push(Arc::clone(&tracker));
        vector.push(Arc::clone(&tracker));
        assert_eq!(Arc::strong_count(&tracker), 3);

        pool.release_elements(vector);
        assert_eq!(Arc::strong_count(&tracker), 1);
        assert_eq!(pool.pooled().base_elements, 1);
    }

    #[rstest]
    fn purge_empties_every_list() {
        let pool: ArrayPool<u8> = ArrayPool::new();
        pool.release_elements(Vec::with_capacity(BASE_SIZE));
        pool.release_keys(Vec::with_capacity(DOUBLE_BASE_SIZE));
        pool.purge();
        assert_eq!(pool.pooled(), PooledCounts::default());
    }

    #[rstest]
    fn shared_pool_is_per_type() {
        let bytes = ArrayPool::<i8>::shared();
        let same = ArrayPool::<i8>::shared();
        assert!(Arc::ptr_eq(&bytes, &same));

        let words = ArrayPool::<i16>::shared();
        assert_eq!(words.limit(), DEFAULT_POOL_LIMIT);
    }
}
