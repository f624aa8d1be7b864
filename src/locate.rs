//! Binary search with collision walk.
//!
//! Slots are sorted by *rank*: the cached key in a key-indexed set, or the
//! comparator order in a comparator-indexed one. Distinct elements may share
//! a rank, forming a contiguous *collision run*. A binary search lands on some
//! slot of the run, which is not necessarily the element being looked for, so
//! the locator walks the run in both directions comparing elements for
//! equality.
//!
//! When the element is absent the insertion point is the end of the run, so
//! repeated inserts into one run only shift the slots after it.

use std::cmp::Ordering;

/// The result of looking an element up in a set.
///
/// # Examples
///
/// ```rust
/// use arrayset::{ArraySet, Position};
///
/// let mut set = ArraySet::with_comparator(|left: &i32, right: &i32| left.cmp(right));
/// set.insert(10);
/// set.insert(30);
///
/// assert_eq!(set.position(&30), Position::Found(1));
/// assert_eq!(set.position(&20), Position::Vacant(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// An equal element lives at this index.
    Found(usize),
    /// No equal element exists; inserting at this index keeps the slots sorted.
    Vacant(usize),
}

impl Position {
    /// Returns `true` for [`Position::Found`].
    #[inline]
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the index carried by either variant.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Found(index) | Self::Vacant(index) => index,
        }
    }

    /// Encodes the position as a single signed integer.
    ///
    /// A found element at `i` encodes as `i`; an insertion point `j` encodes
    /// as `!j`, which is always negative. This is the low-level form returned
    /// by [`ArraySet::index_of`](crate::ArraySet::index_of).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use arrayset::Position;
    ///
    /// assert_eq!(Position::Found(3).to_raw(), 3);
    /// assert_eq!(Position::Vacant(0).to_raw(), -1);
    /// assert_eq!(Position::Vacant(3).to_raw(), -4);
    /// ```
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn to_raw(self) -> isize {
        // Slot indices are bounded by a `Vec` length, which never exceeds `isize::MAX`.
        match self {
            Self::Found(index) => index as isize,
            Self::Vacant(index) => !(index as isize),
        }
    }

    /// Decodes a value produced by [`Position::to_raw`].
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_raw(raw: isize) -> Self {
        if raw >= 0 {
            Self::Found(raw as usize)
        } else {
            Self::Vacant(!raw as usize)
        }
    }
}

impl From<Position> for Result<usize, usize> {
    fn from(position: Position) -> Self {
        match position {
            Position::Found(index) => Ok(index),
            Position::Vacant(index) => Err(index),
        }
    }
}

/// Locates an element among `len` sorted slots.
///
/// * `rank_at(i)` orders the slot at `i` against the candidate.
/// * `matches_at(i)` tells whether the slot at `i` holds an element equal to
///   the candidate.
pub(crate) fn locate<R, M>(len: usize, rank_at: R, matches_at: M) -> Position
where
    R: Fn(usize) -> Ordering,
    M: Fn(usize) -> bool,
{
    if len == 0 {
        return Position::Vacant(0);
    }

    let hit = match binary_search(len, &rank_at) {
        Ok(hit) => hit,
        Err(insertion) => return Position::Vacant(insertion),
    };

    if matches_at(hit) {
        return Position::Found(hit);
    }

    let mut end = hit + 1;
    while end < len && rank_at(end) == Ordering::Equal {
        if matches_at(end) {
            return Position::Found(end);
        }
        end += 1;
    }

    for index in (0..hit).rev() {
        if rank_at(index) != Ordering::Equal {
            break;
        }
        if matches_at(index) {
            return Position::Found(index);
        }
    }

    Position::Vacant(end)
}

/// Classic binary search over slot indices, mirroring `slice::binary_search_by`.
fn binary_search<R>(len: usize, rank_at: &R) -> Result<usize, usize>
where
    R: Fn(usize) -> Ordering,
{
    let mut low = 0;
    let mut high = len;
    while low < high {
        let middle = low + (high - low) / 2;
        match rank_at(middle) {
            Ordering::Less => low = middle + 1,
            Ordering::Greater => high = middle,
            Ordering::Equal => return Ok(middle),
        }
    }
    Err(low)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Slots as `(rank, identity)` pairs; a candidate matches on both.
    fn locate_in(slots: &[(i32, char)], candidate: (i32, char)) -> Position {
        locate(
            slots.len(),
            |index| slots[index].0.cmp(&candidate.0),
            |index| slots[index] == candidate,
        )
    }

    #[rstest]
    fn empty_slots_insert_at_head() {
        assert_eq!(locate_in(&[], (1, 'a')), Position::Vacant(0));
    }

    #[rstest]
    #[case((0, 'x'), Position::Vacant(0))]
    #[case((2, 'x'), Position::Vacant(1))]
    #[case((9, 'x'), Position::Vacant(3))]
    fn missing_rank_returns_insertion_point(#[case] candidate: (i32, char), #[case] expected: Position) {
        let slots = [(1, 'a'), (3, 'b'), (5, 'c')];
        assert_eq!(locate_in(&slots, candidate), expected);
    }

    #[rstest]
    fn finds_every_element_of_a_collision_run() {
        let slots = [(1, 'a'), (5, 'p'), (5, 'q'), (5, 'r'), (5, 's'), (9, 'z')];
        for (index, slot) in slots.iter().enumerate() {
            assert_eq!(locate_in(&slots, *slot), Position::Found(index));
        }
    }

    #[rstest]
    fn absent_collider_inserts_at_end_of_run() {
        let slots = [(1, 'a'), (5, 'p'), (5, 'q'), (5, 'r'), (9, 'z')];
        assert_eq!(locate_in(&slots, (5, 'x')), Position::Vacant(4));
    }

    #[rstest]
    fn run_at_the_end_of_the_slots() {
        let slots = [(1, 'a'), (5, 'p'), (5, 'q')];
        assert_eq!(locate_in(&slots, (5, 'x')), Position::Vacant(3));
        assert_eq!(locate_in(&slots, (5, 'p')), Position::Found(1));
    }

    #[rstest]
    fn every_slot_in_one_run() {
        let slots: Vec<(i32, char)> = ('a'..='h').map(|identity| (0, identity)).collect();
        for (index, slot) in slots.iter().enumerate() {
            assert_eq!(locate_in(&slots, *slot), Position::Found(index));
        }
        assert_eq!(locate_in(&slots, (0, 'z')), Position::Vacant(slots.len()));
    }

    #[rstest]
    #[case(Position::Found(0))]
    #[case(Position::Found(17))]
    #[case(Position::Vacant(0))]
    #[case(Position::Vacant(17))]
    fn raw_encoding_is_reversible(#[case] position: Position) {
        assert_eq!(Position::from_raw(position.to_raw()), position);
    }

    #[rstest]
    fn raw_vacant_is_negative() {
        assert!(Position::Vacant(0).to_raw() < 0);
        assert!(Position::Found(0).to_raw() >= 0);
    }
}
