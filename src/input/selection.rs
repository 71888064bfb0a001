//! Text selection representation.

/// A text selection as a range of *character* offsets.
///
/// The range is always normalized such that `start <= end`. A collapsed
/// selection (`start == end`) is a plain caret.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionRange {
    /// Start offset of the selection (inclusive).
    pub start: usize,
    /// End offset of the selection (exclusive). The caret sits here.
    pub end: usize,
}

impl SelectionRange {
    /// Create a new selection range; normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Collapsed selection at `offset`.
    #[inline]
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Same selection with both ends clamped to `[0, len]`.
    #[inline]
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_range_normalizes() {
        let range = SelectionRange::new(10, 5);
        assert_eq!(range.start, 5);
        assert_eq!(range.end, 10);
        assert_eq!(range.len(), 5);
    }

    #[test]
    fn caret_is_empty() {
        assert!(SelectionRange::caret(3).is_empty());
        assert!(!SelectionRange::new(3, 5).is_empty());
    }

    #[test]
    fn clamping_keeps_offsets_in_text() {
        assert_eq!(SelectionRange::new(2, 9).clamped(4), SelectionRange::new(2, 4));
        assert_eq!(SelectionRange::caret(9).clamped(4), SelectionRange::caret(4));
    }
}
