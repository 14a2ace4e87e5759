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

//! Include/exclude decisions over a catalog.
//!
//! A `Selection` records one binary decision per catalog item, made in catalog
//! order. While fewer decisions than items have been made the selection is
//! *partial*; once every item is decided it is *complete*. Decisions live in a
//! `FixedBitSet` indexed by catalog position, so undoing the latest decision
//! on backtrack is a single bit clear.

use crate::index::ItemIndex;
use fixedbitset::FixedBitSet;

/// A partial or complete sequence of include/exclude decisions.
///
/// Bit `i` is set iff item `i` is decided and included. Undecided positions
/// are always clear.
///
/// # Examples
///
/// ```rust
/// use allot_model::index::ItemIndex;
/// use allot_model::selection::Selection;
///
/// let mut selection = Selection::new(3);
/// selection.push(true);
/// selection.push(false);
/// assert!(!selection.is_complete());
/// selection.push(true);
/// assert!(selection.is_complete());
/// assert!(selection.is_included(ItemIndex::new(2)));
/// assert_eq!(selection.to_string(), "101");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    bits: FixedBitSet,
    decided: usize,
}

impl Selection {
    /// Creates an empty selection over `num_items` items.
    #[inline]
    pub fn new(num_items: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(num_items),
            decided: 0,
        }
    }

    /// Creates a complete selection that includes exactly the given items.
    ///
    /// # Panics
    ///
    /// Panics if any index is out of bounds.
    pub fn from_included<I>(num_items: usize, included: I) -> Self
    where
        I: IntoIterator<Item = ItemIndex>,
    {
        let mut bits = FixedBitSet::with_capacity(num_items);
        for index in included {
            assert!(
                index.get() < num_items,
                "called `Selection::from_included` with item index out of bounds: the len is {} but the index is {}",
                num_items,
                index.get()
            );
            bits.insert(index.get());
        }

        Self {
            bits,
            decided: num_items,
        }
    }

    /// Returns the number of items this selection decides over.
    #[inline]
    pub fn num_items(&self) -> usize {
        self.bits.len()
    }

    /// Returns how many items have been decided.
    #[inline]
    pub fn decided(&self) -> usize {
        self.decided
    }

    /// Returns `true` once every item has been decided.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.decided == self.bits.len()
    }

    /// Returns the index of the next item to decide, if any.
    #[inline]
    pub fn next_item(&self) -> Option<ItemIndex> {
        (!self.is_complete()).then_some(ItemIndex::new(self.decided))
    }

    /// Records the decision for the next undecided item and returns its index.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the selection is already complete.
    #[inline]
    pub fn push(&mut self, include: bool) -> ItemIndex {
        debug_assert!(
            !self.is_complete(),
            "called `Selection::push` on a complete selection of {} items",
            self.bits.len()
        );

        let index = self.decided;
        self.bits.set(index, include);
        self.decided += 1;
        ItemIndex::new(index)
    }

    /// Undoes the latest decision and returns whether it was an inclusion.
    ///
    /// Returns `None` if nothing has been decided.
    #[inline]
    pub fn pop(&mut self) -> Option<bool> {
        if self.decided == 0 {
            return None;
        }

        self.decided -= 1;
        let included = self.bits.contains(self.decided);
        self.bits.set(self.decided, false);
        Some(included)
    }

    /// Returns `true` if the item at `index` is decided and included.
    #[inline]
    pub fn is_included(&self, index: ItemIndex) -> bool {
        self.bits.contains(index.get())
    }

    /// Iterates over the included items in catalog order.
    #[inline]
    pub fn included(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.bits.ones().map(ItemIndex::new)
    }

    /// Returns the number of included items.
    #[inline]
    pub fn num_included(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Returns `true` if depth-first, include-before-exclude enumeration
    /// reaches `self` before `other`.
    ///
    /// At the first position where the two selections differ, the one that
    /// includes the item comes first. Equal selections do not precede each
    /// other.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the selections have different sizes.
    pub fn precedes_in_search_order(&self, other: &Selection) -> bool {
        debug_assert_eq!(
            self.num_items(),
            other.num_items(),
            "called `Selection::precedes_in_search_order` with selections of different sizes"
        );

        let mut difference = self.bits.clone();
        difference.symmetric_difference_with(&other.bits);
        match difference.ones().next() {
            Some(position) => self.bits.contains(position),
            None => false,
        }
    }

    /// Returns the raw bit set.
    #[inline]
    pub fn as_bitset(&self) -> &FixedBitSet {
        &self.bits
    }
}

impl std::fmt::Debug for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Selection({})", self)
    }
}

/// Renders decided positions as `1`/`0` and undecided ones as `.`.
impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use std::fmt::Write;

        for position in 0..self.bits.len() {
            let symbol = if position >= self.decided {
                '.'
            } else if self.bits.contains(position) {
                '1'
            } else {
                '0'
            };
            f.write_char(symbol)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ix(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    #[test]
    fn test_push_and_pop_restore_previous_state() {
        let mut selection = Selection::new(4);
        assert_eq!(selection.next_item(), Some(ix(0)));

        assert_eq!(selection.push(true), ix(0));
        assert_eq!(selection.push(true), ix(1));
        let snapshot = selection.clone();

        selection.push(false);
        selection.push(true);
        assert!(selection.is_complete());
        assert_eq!(selection.next_item(), None);

        assert_eq!(selection.pop(), Some(true));
        assert_eq!(selection.pop(), Some(false));
        assert_eq!(selection, snapshot);
    }

    #[test]
    fn test_pop_on_empty_returns_none() {
        let mut selection = Selection::new(2);
        assert_eq!(selection.pop(), None);
        assert_eq!(selection.decided(), 0);
    }

    #[test]
    fn test_included_iterates_in_catalog_order() {
        let selection = Selection::from_included(6, [ix(4), ix(1), ix(5)]);
        let included: Vec<_> = selection.included().collect();
        assert_eq!(included, vec![ix(1), ix(4), ix(5)]);
        assert_eq!(selection.num_included(), 3);
        assert!(selection.is_complete());
    }

    #[test]
    fn test_display_marks_undecided_positions() {
        let mut selection = Selection::new(5);
        selection.push(true);
        selection.push(false);
        assert_eq!(selection.to_string(), "10...");
        assert_eq!(format!("{:?}", selection), "Selection(10...)");
    }

    #[test]
    fn test_empty_catalog_selection_is_complete() {
        let selection = Selection::new(0);
        assert!(selection.is_complete());
        assert_eq!(selection.to_string(), "");
    }

    #[test]
    fn test_precedes_in_search_order_prefers_earlier_inclusion() {
        let a = Selection::from_included(4, [ix(0), ix(3)]); // 1001
        let b = Selection::from_included(4, [ix(1), ix(2)]); // 0110
        let c = Selection::from_included(4, [ix(0), ix(2)]); // 1010

        assert!(a.precedes_in_search_order(&b));
        assert!(!b.precedes_in_search_order(&a));
        assert!(c.precedes_in_search_order(&a));
        assert!(!a.precedes_in_search_order(&a));
    }

    #[test]
    #[should_panic(expected = "called `Selection::from_included` with item index out of bounds")]
    fn test_from_included_panics_on_out_of_bounds_index() {
        let _ = Selection::from_included(2, [ix(2)]);
    }
}
