//! Error types.
//!
//! Almost nothing in this crate fails: inserting a duplicate or removing an
//! absent element is reported through a `bool` or a
//! [`Position`](crate::Position). The one precondition a caller can break is
//! addressing a slot outside `0..len`. The panicking accessors
//! ([`ArraySet::value_at`](crate::ArraySet::value_at),
//! [`ArraySet::remove_at`](crate::ArraySet::remove_at)) fail loudly on it;
//! [`ArraySet::try_remove_at`](crate::ArraySet::try_remove_at) reports it as an
//! [`IndexOutOfRangeError`].

/// A slot index outside the live range of a set.
///
/// # Examples
///
/// ```rust
/// use arrayset::IndexOutOfRangeError;
///
/// let error = IndexOutOfRangeError { index: 7, len: 3 };
/// assert_eq!(
///     format!("{}", error),
///     "index out of range: the len is 3 but the index is 7"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfRangeError {
    /// The requested index.
    pub index: usize,
    /// The number of live slots at the time of the request.
    pub len: usize,
}

impl std::fmt::Display for IndexOutOfRangeError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "index out of range: the len is {} but the index is {}",
            self.len, self.index
        )
    }
}

impl std::error::Error for IndexOutOfRangeError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn error_is_a_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(IndexOutOfRangeError { index: 0, len: 0 });
        assert_eq!(
            error.to_string(),
            "index out of range: the len is 0 but the index is 0"
        );
    }
}
