//! Backing store and its mutators.
//!
//! The store owns the element vector and, for key-indexed sets, the parallel
//! key vector. Both always have the same length (the live count) and are
//! resized together to the same logical capacity. The vectors are only ever
//! reallocated here, through the set's [`ArrayPool`], following the policy in
//! [`capacity`](crate::capacity); `Vec` never grows on its own because every
//! insert first makes room for one more slot.

use std::mem;
use std::sync::Arc;

use crate::capacity::{grow_capacity, shrink_capacity};
use crate::pool::ArrayPool;

pub(crate) struct BackingStore<T> {
    elements: Vec<T>,
    keys: Option<Vec<i32>>,
    capacity: usize,
    pool: Arc<ArrayPool<T>>,
}

impl<T> BackingStore<T> {
    pub(crate) fn new(keyed: bool, capacity: usize, pool: Arc<ArrayPool<T>>) -> Self {
        let mut store = Self {
            elements: Vec::new(),
            keys: keyed.then(Vec::new),
            capacity: 0,
            pool,
        };
        if capacity > 0 {
            store.resize(capacity);
        }
        store
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Cached keys, empty for a comparator-indexed store.
    #[inline]
    pub(crate) fn keys(&self) -> &[i32] {
        self.keys.as_deref().unwrap_or(&[])
    }

    #[inline]
    pub(crate) const fn pool(&self) -> &Arc<ArrayPool<T>> {
        &self.pool
    }

    pub(crate) fn ensure_capacity(&mut self, minimum_capacity: usize) {
        if self.capacity < minimum_capacity {
            self.resize(minimum_capacity);
        }
    }

    /// Inserts `element` (and its `key`, for a keyed store) at `index`,
    /// shifting `index..len` one slot to the right.
    pub(crate) fn insert_at(&mut self, index: usize, element: T, key: Option<i32>) {
        debug_assert_eq!(self.keys.is_some(), key.is_some());
        let len = self.len();
        if len >= self.capacity {
            self.resize(grow_capacity(len));
        }

        self.elements.insert(index, element);
        if let (Some(keys), Some(key)) = (self.keys.as_mut(), key) {
            keys.insert(index, key);
        }
    }

    /// Removes the slot at `index`, or returns `None` when `index >= len`.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<T> {
        let len = self.len();
        if index >= len {
            return None;
        }

        if len == 1 {
            let removed = self.elements.pop();
            tracing::trace!(from = self.capacity, "array set collapse");
            self.release();
            return removed;
        }

        if let Some(new_capacity) = shrink_capacity(len, self.capacity) {
            tracing::trace!(from = self.capacity, to = new_capacity, len, "array set shrink");

            let mut old_elements = mem::replace(
                &mut self.elements,
                self.pool.acquire_elements(new_capacity),
            );
            let removed = move_skipping(&mut old_elements, &mut self.elements, index);
            self.pool.release_elements(old_elements);

            if let Some(keys) = self.keys.as_mut() {
                let mut old_keys = mem::replace(keys, self.pool.acquire_keys(new_capacity));
                move_skipping(&mut old_keys, keys, index);
                self.pool.release_keys(old_keys);
            }

            self.capacity = new_capacity;
            return removed;
        }

        let removed = self.elements.remove(index);
        if let Some(keys) = self.keys.as_mut() {
            keys.remove(index);
        }
        Some(removed)
    }

    /// Releases both vectors to the pool if anything is stored.
    pub(crate) fn clear(&mut self) {
        if !self.elements.is_empty() {
            self.release();
        }
    }

    /// Takes the live elements out, releasing the key vector.
    pub(crate) fn take_elements(&mut self) -> Vec<T> {
        let elements = mem::take(&mut self.elements);
        if let Some(keys) = self.keys.as_mut() {
            self.pool.release_keys(mem::take(keys));
        }
        self.capacity = 0;
        elements
    }

    /// Moves every live slot into freshly acquired vectors of `new_capacity`.
    fn resize(&mut self, new_capacity: usize) {
        tracing::trace!(
            from = self.capacity,
            to = new_capacity,
            len = self.len(),
            "array set resize"
        );

        let mut old_elements = mem::replace(
            &mut self.elements,
            self.pool.acquire_elements(new_capacity),
        );
        self.elements.append(&mut old_elements);
        self.pool.release_elements(old_elements);

        if let Some(keys) = self.keys.as_mut() {
            let mut old_keys = mem::replace(keys, self.pool.acquire_keys(new_capacity));
            keys.append(&mut old_keys);
            self.pool.release_keys(old_keys);
        }

        self.capacity = new_capacity;
    }

    /// Returns both vectors to the pool and falls back to unallocated ones.
    fn release(&mut self) {
        self.pool.release_elements(mem::take(&mut self.elements));
        if let Some(keys) = self.keys.as_mut() {
            self.pool.release_keys(mem::take(keys));
        }
        self.capacity = 0;
    }
}

impl<T: Clone> Clone for BackingStore<T> {
    fn clone(&self) -> Self {
        let mut elements = self.pool.acquire_elements(self.capacity);
        elements.extend_from_slice(&self.elements);
        let keys = self.keys.as_ref().map(|keys| {
            let mut copy = self.pool.acquire_keys(self.capacity);
            copy.extend_from_slice(keys);
            copy
        });
        Self {
            elements,
            keys,
            capacity: self.capacity,
            pool: Arc::clone(&self.pool),
        }
    }
}

impl<T> Drop for BackingStore<T> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Drains `from` into `into`, skipping and returning the slot at `skip`.
///
/// `from` is left empty with its allocation intact.
fn move_skipping<A>(from: &mut Vec<A>, into: &mut Vec<A>, skip: usize) -> Option<A> {
    let mut removed = None;
    for (index, slot) in from.drain(..).enumerate() {
        if index == skip {
            removed = Some(slot);
        } else {
            into.push(slot);
        }
    }
    removed
}
