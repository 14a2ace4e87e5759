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

//! Feasibility classification of selections.
//!
//! The evaluator sorts every selection into one of three classes:
//!
//! - **fatally infeasible**: the budget or a category cost cap is exceeded.
//!   Costs never decrease as more items are decided, so no completion can
//!   recover and the subtree is pruned.
//! - **not yet feasible**: nothing is violated beyond repair, but the selection
//!   is partial or misses a category minimum count. Search continues.
//! - **feasible**: complete, within all caps, and every minimum count is met.
//!
//! Two entry points share the same checks. `FeasibilityEvaluator::evaluate`
//! recomputes everything from scratch over the decided prefix. The engine
//! instead keeps `RunningTotals` up to date as it includes and excludes items
//! and asks `fatal_violation` after each inclusion and `completion_violation`
//! at each leaf.

use allot_model::{
    category::{PerCategory, RiskCategory},
    index::ItemIndex,
    model::{Catalog, Constraints},
    selection::Selection,
};
use num_traits::{PrimInt, Signed};

/// Whether the search may descend below a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruneSignal {
    Continue,
    Prune,
}

impl std::fmt::Display for PruneSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneSignal::Continue => write!(f, "Continue"),
            PruneSignal::Prune => write!(f, "Prune"),
        }
    }
}

/// The constraint a selection violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    /// The total selected cost exceeds the budget.
    BudgetExceeded,
    /// The selected cost within a category exceeds its cap.
    CategoryCapExceeded { category: RiskCategory },
    /// A complete selection holds fewer items of a category than required.
    MinimumCountUnmet { category: RiskCategory },
}

impl Violation {
    /// Returns `true` for violations no completion can repair.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Violation::MinimumCountUnmet { .. })
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::BudgetExceeded => write!(f, "budget exceeded"),
            Violation::CategoryCapExceeded { category } => {
                write!(f, "cost cap of category {} exceeded", category)
            }
            Violation::MinimumCountUnmet { category } => {
                write!(f, "minimum count of category {} unmet", category)
            }
        }
    }
}

/// The classification of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Verdict {
    feasible: bool,
    signal: PruneSignal,
    violation: Option<Violation>,
}

impl Verdict {
    /// A complete selection that satisfies every constraint.
    #[inline]
    pub const fn feasible() -> Self {
        Self {
            feasible: true,
            signal: PruneSignal::Continue,
            violation: None,
        }
    }

    /// A partial selection without fatal violations.
    #[inline]
    pub const fn pending() -> Self {
        Self {
            feasible: false,
            signal: PruneSignal::Continue,
            violation: None,
        }
    }

    /// A selection that violates `violation`.
    #[inline]
    pub fn violated(violation: Violation) -> Self {
        let signal = if violation.is_fatal() {
            PruneSignal::Prune
        } else {
            PruneSignal::Continue
        };

        Self {
            feasible: false,
            signal,
            violation: Some(violation),
        }
    }

    /// Returns `true` iff the selection is complete and satisfies every constraint.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// Returns whether the subtree below the selection may be explored.
    #[inline]
    pub fn signal(&self) -> PruneSignal {
        self.signal
    }

    /// Returns the violated constraint, if any.
    #[inline]
    pub fn violation(&self) -> Option<Violation> {
        self.violation
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.feasible, self.violation) {
            (true, _) => write!(f, "Feasible"),
            (false, Some(violation)) => write!(f, "Infeasible({}, {})", violation, self.signal),
            (false, None) => write!(f, "Pending"),
        }
    }
}

/// Aggregates of the items included so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningTotals<T> {
    counts: PerCategory<usize>,
    costs: PerCategory<T>,
    total_cost: T,
    total_return: T,
}

impl<T> Default for RunningTotals<T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RunningTotals<T>
where
    T: PrimInt + Signed,
{
    /// Creates empty totals.
    #[inline]
    pub fn new() -> Self {
        Self {
            counts: PerCategory::splat(0),
            costs: PerCategory::splat(T::zero()),
            total_cost: T::zero(),
            total_return: T::zero(),
        }
    }

    /// Adds the item at `index` and returns its category.
    #[inline(always)]
    pub fn include(&mut self, catalog: &Catalog<T>, index: ItemIndex) -> RiskCategory {
        let category = catalog.category(index);
        let cost = catalog.cost(index);
        self.counts[category] += 1;
        self.costs[category] = self.costs[category] + cost;
        self.total_cost = self.total_cost + cost;
        self.total_return = self.total_return + catalog.expected_return(index);
        category
    }

    /// Removes the item at `index`, undoing a previous `include`.
    #[inline(always)]
    pub fn remove(&mut self, catalog: &Catalog<T>, index: ItemIndex) {
        let category = catalog.category(index);
        let cost = catalog.cost(index);
        debug_assert!(
            self.counts[category] > 0,
            "called `RunningTotals::remove` for {} with no included item of category {}",
            index,
            category
        );

        self.counts[category] -= 1;
        self.costs[category] = self.costs[category] - cost;
        self.total_cost = self.total_cost - cost;
        self.total_return = self.total_return - catalog.expected_return(index);
    }

    /// Returns the number of included items in `category`.
    #[inline]
    pub fn count(&self, category: RiskCategory) -> usize {
        self.counts[category]
    }

    /// Returns the included cost in `category`.
    #[inline]
    pub fn cost(&self, category: RiskCategory) -> T {
        self.costs[category]
    }

    /// Returns the total included cost.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Returns the total included return.
    #[inline]
    pub fn total_return(&self) -> T {
        self.total_return
    }
}

/// Classifies selections against a fixed catalog and constraint set.
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityEvaluator<'a, T> {
    catalog: &'a Catalog<T>,
    constraints: &'a Constraints<T>,
}

impl<'a, T> FeasibilityEvaluator<'a, T>
where
    T: PrimInt + Signed,
{
    /// Creates a new `FeasibilityEvaluator`.
    #[inline]
    pub fn new(catalog: &'a Catalog<T>, constraints: &'a Constraints<T>) -> Self {
        Self {
            catalog,
            constraints,
        }
    }

    /// Returns the catalog.
    #[inline]
    pub fn catalog(&self) -> &'a Catalog<T> {
        self.catalog
    }

    /// Returns the constraints.
    #[inline]
    pub fn constraints(&self) -> &'a Constraints<T> {
        self.constraints
    }

    /// Checks the caps touched by the latest inclusion of an item of `category`.
    ///
    /// The budget is checked before the category cap. Earlier inclusions were
    /// already checked, so only the updated category can newly exceed its cap.
    #[inline(always)]
    pub fn fatal_violation(
        &self,
        totals: &RunningTotals<T>,
        category: RiskCategory,
    ) -> Option<Violation> {
        if totals.total_cost() > self.constraints.budget() {
            return Some(Violation::BudgetExceeded);
        }
        if totals.cost(category) > self.constraints.max_cost(category) {
            return Some(Violation::CategoryCapExceeded { category });
        }
        None
    }

    /// Checks the minimum counts of a complete selection, in category order.
    #[inline]
    pub fn completion_violation(&self, totals: &RunningTotals<T>) -> Option<Violation> {
        RiskCategory::ALL
            .into_iter()
            .find(|&category| totals.count(category) < self.constraints.min_count(category))
            .map(|category| Violation::MinimumCountUnmet { category })
    }

    /// Classifies `selection` from scratch.
    ///
    /// Walks the decided prefix in catalog order and stops at the first fatal
    /// violation. Minimum counts are only checked once the selection is
    /// complete.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the selection is not sized for the catalog.
    pub fn evaluate(&self, selection: &Selection) -> Verdict {
        debug_assert_eq!(
            selection.num_items(),
            self.catalog.len(),
            "called `FeasibilityEvaluator::evaluate` with a selection over {} items for a catalog of {} items",
            selection.num_items(),
            self.catalog.len()
        );

        let mut totals = RunningTotals::new();
        for index in selection.included() {
            let category = totals.include(self.catalog, index);
            if let Some(violation) = self.fatal_violation(&totals, category) {
                return Verdict::violated(violation);
            }
        }

        self.verdict_for(&totals, selection.is_complete())
    }

    /// Classifies incrementally maintained totals that passed every fatal check.
    #[inline]
    pub fn verdict_for(&self, totals: &RunningTotals<T>, complete: bool) -> Verdict {
        if !complete {
            return Verdict::pending();
        }
        match self.completion_violation(totals) {
            Some(violation) => Verdict::violated(violation),
            None => Verdict::feasible(),
        }
    }
}
