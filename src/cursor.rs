//! Slot-order traversal that can remove the element it just yielded.

use crate::ArraySet;

/// A cursor over an [`ArraySet`] in slot order.
///
/// Created by [`ArraySet::cursor`]. [`Cursor::advance`] yields the next
/// element; [`Cursor::remove_current`] removes the element most recently
/// yielded, and traversal continues with the element that followed it.
///
/// # Examples
///
/// ```rust
/// use arrayset::ArraySet;
///
/// let mut set = ArraySet::with_comparator(|left: &i32, right: &i32| left.cmp(right));
/// set.add_all(1..=6);
///
/// let mut cursor = set.cursor();
/// while let Some(value) = cursor.advance() {
///     if value % 2 == 0 {
///         cursor.remove_current();
///     }
/// }
/// assert_eq!(set.as_slice(), &[1, 3, 5]);
/// ```
#[derive(Debug)]
pub struct Cursor<'a, T> {
    set: &'a mut ArraySet<T>,
    next: usize,
    yielded: bool,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) const fn new(set: &'a mut ArraySet<T>) -> Self {
        Self {
            set,
            next: 0,
            yielded: false,
        }
    }

    /// Moves to the next slot and returns its element.
    pub fn advance(&mut self) -> Option<&T> {
        if self.next >= self.set.len() {
            self.yielded = false;
            return None;
        }
        self.next += 1;
        self.yielded = true;
        self.set.get(self.next - 1)
    }

    /// Returns the element [`Cursor::advance`] would yield next, without moving.
    pub fn peek(&self) -> Option<&T> {
        self.set.get(self.next)
    }

    /// Removes the element most recently returned by [`Cursor::advance`].
    ///
    /// Returns `None` if nothing has been yielded yet or the element was
    /// already removed.
    pub fn remove_current(&mut self) -> Option<T> {
        if !self.yielded {
            return None;
        }
        self.yielded = false;
        self.next -= 1;
        Some(self.set.remove_at(self.next))
    }

    /// Number of elements not yet yielded.
    pub fn remaining(&self) -> usize {
        self.set.len() - self.next
    }
}
