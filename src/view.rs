//! Read-only set view used for structural equality and `retain_all`.

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

use crate::ArraySet;

/// A collection that can answer "how many" and "is this a member".
///
/// [`ArraySet::set_eq`] and [`ArraySet::retain_all`] accept any `SetView`,
/// so an `ArraySet` compares equal to a `HashSet` or `BTreeSet` holding the
/// same elements.
///
/// # Examples
///
/// ```rust
/// use arrayset::ArraySet;
/// use std::collections::BTreeSet;
///
/// let set: ArraySet<i32> = [3, 1, 2].into_iter().collect();
/// let tree: BTreeSet<i32> = [1, 2, 3].into_iter().collect();
/// assert!(set.set_eq(&tree));
/// ```
pub trait SetView<T> {
    /// Number of elements in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `value` is a member.
    fn contains(&self, value: &T) -> bool;
}

impl<T: PartialEq> SetView<T> for ArraySet<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        Self::contains(self, value)
    }
}

impl<T: Hash + Eq, S: BuildHasher> SetView<T> for HashSet<T, S> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        Self::contains(self, value)
    }
}

impl<T: Ord> SetView<T> for BTreeSet<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        Self::contains(self, value)
    }
}

impl<T, V: SetView<T> + ?Sized> SetView<T> for &V {
    fn len(&self) -> usize {
        V::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        V::contains(self, value)
    }
}
