// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Strongly typed catalog positions.
//!
//! `ItemIndex` wraps a `usize` so catalog positions cannot be confused with
//! counts, depths, or category slots. It compiles down to a plain `usize`.

/// The position of an item in a catalog.
///
/// The catalog order is also the decision order of the search, so comparing
/// two indices tells which item is decided first.
///
/// # Examples
///
/// ```rust
/// use allot_model::index::ItemIndex;
///
/// let index = ItemIndex::new(3);
/// assert_eq!(index.get(), 3);
/// assert_eq!(format!("{}", index), "ItemIndex(3)");
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ItemIndex(usize);

impl ItemIndex {
    /// Creates a new `ItemIndex` from a raw catalog position.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying catalog position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.0
    }

    /// Returns the index of the item decided right after this one.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Debug for ItemIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ItemIndex({})", self.0)
    }
}

impl std::fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ItemIndex({})", self.0)
    }
}

impl From<usize> for ItemIndex {
    #[inline]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl From<ItemIndex> for usize {
    #[inline]
    fn from(index: ItemIndex) -> Self {
        index.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_get_and_conversions() {
        let index = ItemIndex::new(7);
        assert_eq!(index.get(), 7);
        assert_eq!(usize::from(index), 7);
        assert_eq!(ItemIndex::from(7usize), index);
    }

    #[test]
    fn test_next_advances_in_decision_order() {
        let first = ItemIndex::new(0);
        let second = first.next();
        assert_eq!(second.get(), 1);
        assert!(first < second);
    }

    #[test]
    fn test_display_and_debug_match() {
        let index = ItemIndex::new(12);
        assert_eq!(format!("{}", index), "ItemIndex(12)");
        assert_eq!(format!("{:?}", index), "ItemIndex(12)");
    }
}
