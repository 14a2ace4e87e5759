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

//! Exhaustive include/exclude search.
//!
//! The engine walks the binary decision tree over the catalog in catalog
//! order, trying *include* before *exclude* for every item. Running totals are
//! updated in place on the way down and restored on the way up, so each node
//! costs O(1) apart from monitor callbacks. A subtree is cut off as soon as an
//! inclusion exceeds the budget or a category cap; minimum counts are only
//! checked on complete selections.
//!
//! Every call creates a fresh `SearchSession` holding its own best record and
//! statistics. The session is consumed by `run`, so no state leaks between
//! searches and repeated calls on the same input return the same outcome.
//!
//! Optional bound pruning drops a node when its current return plus the
//! returns of all undecided items is strictly below the best known return.
//! Equal bounds are explored, so the chosen selection never changes.

use crate::{
    eval::{FeasibilityEvaluator, PruneSignal, RunningTotals, Violation},
    incumbent::{
        BestSolutionRecord, IncumbentStore, NoSharedIncumbent, SharedIncumbent,
        SharedIncumbentAdapter,
    },
    monitor::{
        no_op::NoOperationMonitor,
        search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    },
    num::SolverNumeric,
    result::SolverOutcome,
    stats::SearchStatistics,
};
use allot_model::{
    index::ItemIndex,
    model::{Catalog, Constraints},
    selection::Selection,
    solution::Solution,
};
use std::{ops::ControlFlow, time::Instant};

/// Runs a plain exhaustive search and returns the best record.
///
/// The record is empty if no selection satisfies the constraints.
///
/// # Examples
///
/// ```rust
/// use allot_model::category::RiskCategory;
/// use allot_model::model::{CatalogBuilder, ConstraintsBuilder};
/// use allot_search::engine::search;
///
/// let mut builder = CatalogBuilder::new();
/// builder
///     .add("A", 10i64, 20, RiskCategory::Low)
///     .add("B", 5, 5, RiskCategory::Low)
///     .add("C", 100, 50, RiskCategory::High);
/// let catalog = builder.build().unwrap();
/// let constraints = ConstraintsBuilder::new()
///     .budget(15)
///     .min_count(RiskCategory::Low, 1)
///     .build()
///     .unwrap();
///
/// let record = search(&catalog, &constraints);
/// assert_eq!(record.best_return(), 25);
/// assert_eq!(record.best_cost(), Some(15));
/// ```
pub fn search<T>(catalog: &Catalog<T>, constraints: &Constraints<T>) -> BestSolutionRecord<T>
where
    T: SolverNumeric,
{
    ExhaustiveSolver::new()
        .solve(catalog, constraints, NoOperationMonitor::new())
        .into_record()
}

/// The sequential exhaustive solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExhaustiveSolver {
    bound_pruning: bool,
}

impl ExhaustiveSolver {
    /// Creates a solver without bound pruning.
    #[inline]
    pub fn new() -> Self {
        Self {
            bound_pruning: false,
        }
    }

    /// Enables or disables bound pruning.
    #[inline]
    pub fn with_bound_pruning(mut self, enabled: bool) -> Self {
        self.bound_pruning = enabled;
        self
    }

    /// Returns `true` if bound pruning is enabled.
    #[inline]
    pub fn bound_pruning(&self) -> bool {
        self.bound_pruning
    }

    /// Enumerates every selection and returns the best feasible one.
    ///
    /// The monitor observes the search and may abort it, in which case the
    /// outcome carries the best solution found so far.
    pub fn solve<T, S>(
        &self,
        catalog: &Catalog<T>,
        constraints: &Constraints<T>,
        mut monitor: S,
    ) -> SolverOutcome<T>
    where
        T: SolverNumeric,
        S: SearchMonitor<T>,
    {
        let session = SearchSession::new(
            catalog,
            constraints,
            &mut monitor,
            NoSharedIncumbent::new(),
            self.bound_pruning,
        );
        session.run(&[])
    }

    /// Like `solve`, but publishes improvements to `incumbent` and prunes
    /// against the best return it holds.
    pub fn solve_with_incumbent<T, S>(
        &self,
        catalog: &Catalog<T>,
        constraints: &Constraints<T>,
        monitor: S,
        incumbent: &SharedIncumbent<T>,
    ) -> SolverOutcome<T>
    where
        T: SolverNumeric,
        S: SearchMonitor<T>,
    {
        self.solve_from_prefix(catalog, constraints, &[], monitor, incumbent)
    }

    /// Searches only the subtree below the given leading decisions.
    ///
    /// `prefix[i]` is the decision for item `i`. A prefix that already exceeds
    /// the budget or a category cap yields an infeasible outcome.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the prefix is longer than the catalog.
    pub fn solve_from_prefix<T, S>(
        &self,
        catalog: &Catalog<T>,
        constraints: &Constraints<T>,
        prefix: &[bool],
        mut monitor: S,
        incumbent: &SharedIncumbent<T>,
    ) -> SolverOutcome<T>
    where
        T: SolverNumeric,
        S: SearchMonitor<T>,
    {
        debug_assert!(
            prefix.len() <= catalog.len(),
            "called `ExhaustiveSolver::solve_from_prefix` with {} decisions for a catalog of {} items",
            prefix.len(),
            catalog.len()
        );

        let session = SearchSession::new(
            catalog,
            constraints,
            &mut monitor,
            SharedIncumbentAdapter::new(incumbent),
            self.bound_pruning,
        );
        session.run(prefix)
    }
}

impl std::fmt::Display for ExhaustiveSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExhaustiveSolver(bound_pruning: {})", self.bound_pruning)
    }
}

/// Per-run state of a single search.
struct SearchSession<'a, T, S, I>
where
    T: SolverNumeric,
    S: SearchMonitor<T>,
    I: IncumbentStore<T>,
{
    evaluator: FeasibilityEvaluator<'a, T>,
    monitor: &'a mut S,
    incumbent: I,
    bound_pruning: bool,
    selection: Selection,
    totals: RunningTotals<T>,
    /// `suffix_returns[i]` is the sum of the returns of items `i..`.
    suffix_returns: Vec<T>,
    record: BestSolutionRecord<T>,
    stats: SearchStatistics,
    start_time: Instant,
}

impl<T, S, I> std::fmt::Debug for SearchSession<'_, T, S, I>
where
    T: SolverNumeric,
    S: SearchMonitor<T>,
    I: IncumbentStore<T>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("monitor", &self.monitor.name())
            .field("selection", &self.selection)
            .field("totals", &self.totals)
            .field("record", &self.record)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, T, S, I> SearchSession<'a, T, S, I>
where
    T: SolverNumeric,
    S: SearchMonitor<T>,
    I: IncumbentStore<T>,
{
    fn new(
        catalog: &'a Catalog<T>,
        constraints: &'a Constraints<T>,
        monitor: &'a mut S,
        incumbent: I,
        bound_pruning: bool,
    ) -> Self {
        let mut suffix_returns = vec![T::zero(); catalog.len() + 1];
        for (position, &value) in catalog.returns().iter().enumerate().rev() {
            suffix_returns[position] = suffix_returns[position + 1] + value;
        }

        Self {
            evaluator: FeasibilityEvaluator::new(catalog, constraints),
            monitor,
            incumbent,
            bound_pruning,
            selection: Selection::new(catalog.len()),
            totals: RunningTotals::new(),
            suffix_returns,
            record: BestSolutionRecord::new(),
            stats: SearchStatistics::default(),
            start_time: Instant::now(),
        }
    }

    fn run(mut self, prefix: &[bool]) -> SolverOutcome<T> {
        self.monitor
            .on_enter_search(self.evaluator.catalog(), &self.stats);

        let flow = match self.apply_prefix(prefix) {
            Some(violation) => {
                self.on_violation(violation);
                ControlFlow::Continue(())
            }
            None => self.explore(),
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        self.finalize_result(flow)
    }

    fn finalize_result(self, flow: ControlFlow<String>) -> SolverOutcome<T> {
        match (flow, self.record.into_solution()) {
            (ControlFlow::Break(reason), solution) => {
                SolverOutcome::aborted(solution, reason, self.stats)
            }
            (ControlFlow::Continue(()), Some(solution)) => {
                SolverOutcome::optimal(solution, self.stats)
            }
            (ControlFlow::Continue(()), None) => SolverOutcome::infeasible(self.stats),
        }
    }

    /// Replays fixed leading decisions. Returns the first fatal violation.
    fn apply_prefix(&mut self, prefix: &[bool]) -> Option<Violation> {
        let catalog = self.evaluator.catalog();
        for &include in prefix {
            let index = self.selection.push(include);
            if include {
                let category = self.totals.include(catalog, index);
                if let Some(violation) = self.evaluator.fatal_violation(&self.totals, category) {
                    return Some(violation);
                }
            }
        }
        None
    }

    fn explore(&mut self) -> ControlFlow<String> {
        self.stats.on_node_explored(self.selection.decided());
        self.monitor.on_node(&self.selection, &self.stats);

        if let SearchCommand::Terminate(reason) =
            self.monitor.search_command(&self.selection, &self.stats)
        {
            return ControlFlow::Break(reason);
        }

        debug_assert_eq!(
            self.evaluator.evaluate(&self.selection).signal(),
            PruneSignal::Continue,
            "entered a fatally infeasible node {}",
            self.selection
        );

        let Some(index) = self.selection.next_item() else {
            self.on_complete_selection();
            return ControlFlow::Continue(());
        };

        if self.bound_pruning && self.is_bound_dominated(index) {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.selection, PruneReason::BoundDominated, &self.stats);
            return ControlFlow::Continue(());
        }

        let catalog = self.evaluator.catalog();

        self.selection.push(true);
        let category = self.totals.include(catalog, index);
        let flow = match self.evaluator.fatal_violation(&self.totals, category) {
            Some(violation) => {
                self.on_violation(violation);
                ControlFlow::Continue(())
            }
            None => self.explore(),
        };
        self.totals.remove(catalog, index);
        self.selection.pop();
        flow?;

        self.selection.push(false);
        let flow = self.explore();
        self.selection.pop();
        flow
    }

    #[inline]
    fn is_bound_dominated(&self, next: ItemIndex) -> bool {
        let best = match self.incumbent.best_known_return() {
            Some(global) => global.max(self.record.best_return()),
            None => self.record.best_return(),
        };
        self.totals.total_return() + self.suffix_returns[next.get()] < best
    }

    #[inline]
    fn on_violation(&mut self, violation: Violation) {
        self.stats.on_violation(violation);
        self.monitor.on_prune(
            &self.selection,
            PruneReason::Infeasible(violation),
            &self.stats,
        );
    }

    fn on_complete_selection(&mut self) {
        self.stats.on_complete_selection();

        if let Some(violation) = self.evaluator.completion_violation(&self.totals) {
            self.on_violation(violation);
            return;
        }

        let total_return = self.totals.total_return();
        let total_cost = self.totals.total_cost();
        if !self.record.would_improve(total_return, total_cost) {
            return;
        }

        let solution = Solution::new(self.selection.clone(), total_return, total_cost);
        self.stats.on_solution_found();
        self.incumbent.on_solution_found(&solution);
        self.monitor.on_solution_found(&solution, &self.stats);
        self.record.try_improve(solution);
    }
}
