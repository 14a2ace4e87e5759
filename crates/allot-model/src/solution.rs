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

use crate::{index::ItemIndex, selection::Selection};
use num_traits::{PrimInt, Signed};

/// A complete, feasible selection together with its objective values.
///
/// `total_return` and `total_cost` are the plain sums over the included items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<T> {
    selection: Selection,
    total_return: T,
    total_cost: T,
}

impl<T> Solution<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if `selection` is not complete.
    pub fn new(selection: Selection, total_return: T, total_cost: T) -> Self {
        assert!(
            selection.is_complete(),
            "called `Solution::new` with a partial selection: {} of {} items decided",
            selection.decided(),
            selection.num_items()
        );

        Self {
            selection,
            total_return,
            total_cost,
        }
    }

    /// Returns the underlying selection.
    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns the total expected return of the included items.
    #[inline]
    pub fn total_return(&self) -> T {
        self.total_return
    }

    /// Returns the total cost of the included items.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Returns `true` if the item at `index` is included.
    #[inline]
    pub fn is_included(&self, index: ItemIndex) -> bool {
        self.selection.is_included(index)
    }

    /// Iterates over the included items in catalog order.
    #[inline]
    pub fn included(&self) -> impl Iterator<Item = ItemIndex> + '_ {
        self.selection.included()
    }

    /// Returns the number of included items.
    #[inline]
    pub fn num_included(&self) -> usize {
        self.selection.num_included()
    }

    /// Consumes the solution and returns its selection.
    #[inline]
    pub fn into_selection(self) -> Selection {
        self.selection
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Total Return: {}", self.total_return)?;
        writeln!(f, "   Total Cost:   {}", self.total_cost)?;
        writeln!(f, "   Selection:    {}", self.selection)?;
        writeln!(f)?;

        if self.num_included() == 0 {
            writeln!(f, "   (No items selected)")?;
            return Ok(());
        }

        let included: Vec<String> = self
            .included()
            .map(|index| index.get().to_string())
            .collect();
        writeln!(f, "   Included: {}", included.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ix(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    #[test]
    fn test_new_and_accessors() {
        let selection = Selection::from_included(3, [ix(0), ix(2)]);
        let solution = Solution::new(selection.clone(), 70i64, 110i64);

        assert_eq!(solution.total_return(), 70);
        assert_eq!(solution.total_cost(), 110);
        assert_eq!(solution.selection(), &selection);
        assert!(solution.is_included(ix(2)));
        assert!(!solution.is_included(ix(1)));
        assert_eq!(solution.num_included(), 2);
        assert_eq!(solution.into_selection(), selection);
    }

    #[test]
    #[should_panic(expected = "called `Solution::new` with a partial selection")]
    fn test_new_panics_on_partial_selection() {
        let mut selection = Selection::new(2);
        selection.push(true);
        let _ = Solution::new(selection, 1i32, 1i32);
    }

    #[test]
    fn test_display_lists_included_items() {
        let solution = Solution::new(Selection::from_included(4, [ix(1), ix(3)]), 25i64, 15i64);
        let text = solution.to_string();
        assert!(text.contains("Solution Summary"));
        assert!(text.contains("Total Return: 25"));
        assert!(text.contains("Selection:    0101"));
        assert!(text.contains("Included: 1, 3"));
    }

    #[test]
    fn test_display_of_empty_selection() {
        let selection = Selection::from_included(2, std::iter::empty());
        let solution = Solution::new(selection, 0i64, 0i64);
        assert!(solution.to_string().contains("(No items selected)"));
    }
}
