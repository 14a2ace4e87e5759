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

//! The lexicographic selection objective.
//!
//! Higher total return is better; among equal returns, lower total cost is
//! better. `Objective` encodes this as a total order where *greater means
//! better*, so the best of many candidates is simply their maximum.

use allot_model::solution::Solution;
use num_traits::{PrimInt, Signed};

/// The objective value of a complete selection.
///
/// # Examples
///
/// ```rust
/// use allot_search::objective::Objective;
///
/// let cheap = Objective::new(25i64, 15i64);
/// let pricey = Objective::new(25i64, 20i64);
/// let richer = Objective::new(26i64, 90i64);
///
/// assert!(cheap.is_better_than(&pricey));
/// assert!(richer.is_better_than(&cheap));
/// assert!(!cheap.is_better_than(&cheap));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Objective<T> {
    total_return: T,
    total_cost: T,
}

impl<T> Objective<T>
where
    T: PrimInt + Signed,
{
    /// Creates a new `Objective`.
    #[inline]
    pub fn new(total_return: T, total_cost: T) -> Self {
        Self {
            total_return,
            total_cost,
        }
    }

    /// Returns the objective of a solution.
    #[inline]
    pub fn of(solution: &Solution<T>) -> Self {
        Self::new(solution.total_return(), solution.total_cost())
    }

    /// Returns the total return.
    #[inline]
    pub fn total_return(&self) -> T {
        self.total_return
    }

    /// Returns the total cost.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Returns `true` if `self` is strictly better than `other`.
    #[inline]
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.total_return > other.total_return
            || (self.total_return == other.total_return && self.total_cost < other.total_cost)
    }
}

impl<T> PartialOrd for Objective<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Objective<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.total_return
            .cmp(&other.total_return)
            .then_with(|| other.total_cost.cmp(&self.total_cost))
    }
}

impl<T> std::fmt::Display for Objective<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Objective(return: {}, cost: {})",
            self.total_return, self.total_cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_prefers_return_then_lower_cost() {
        let a = Objective::new(10i64, 5);
        let b = Objective::new(10i64, 7);
        let c = Objective::new(11i64, 100);

        assert!(a > b);
        assert!(c > a);
        assert_eq!(a.cmp(&Objective::new(10, 5)), std::cmp::Ordering::Equal);

        let best = [b, a, c].into_iter().max();
        assert_eq!(best, Some(c));
    }

    #[test]
    fn test_is_better_than_agrees_with_ordering() {
        let samples = [
            Objective::new(0i32, 0),
            Objective::new(0, 3),
            Objective::new(4, 3),
            Objective::new(4, 1),
            Objective::new(9, 9),
        ];
        for x in samples {
            for y in samples {
                assert_eq!(x.is_better_than(&y), x > y, "{x} vs {y}");
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Objective::new(25i64, 15).to_string(),
            "Objective(return: 25, cost: 15)"
        );
    }
}
