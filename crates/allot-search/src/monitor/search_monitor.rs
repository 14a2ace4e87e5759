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

use crate::{eval::Violation, stats::SearchStatistics};
use allot_model::{model::Catalog, selection::Selection, solution::Solution};
use num_traits::{PrimInt, Signed};

/// What a monitor asks the search to do next.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for cutting off a selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The selection violates a constraint. Minimum-count violations are
    /// reported for complete selections only.
    Infeasible(Violation),
    /// No completion can reach the best known return.
    BoundDominated,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::Infeasible(violation) => write!(f, "Infeasible({})", violation),
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
        }
    }
}

/// Trait for observing and controlling an exhaustive search.
pub trait SearchMonitor<T>
where
    T: PrimInt + Signed,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called once before the first node.
    fn on_enter_search(&mut self, catalog: &Catalog<T>, statistics: &SearchStatistics);
    /// Called once after the search finished or was aborted.
    fn on_exit_search(&mut self, statistics: &SearchStatistics);
    /// Called at every node to decide whether the search goes on.
    fn search_command(
        &mut self,
        _selection: &Selection,
        _statistics: &SearchStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called when a node is entered.
    fn on_node(&mut self, selection: &Selection, statistics: &SearchStatistics);
    /// Called when a selection is cut off.
    fn on_prune(&mut self, selection: &Selection, reason: PruneReason, statistics: &SearchStatistics);
    /// Called when a strictly better solution is recorded.
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &SearchStatistics);
}

impl<T, M> SearchMonitor<T> for &mut M
where
    T: PrimInt + Signed,
    M: SearchMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, catalog: &Catalog<T>, statistics: &SearchStatistics) {
        (**self).on_enter_search(catalog, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        (**self).on_exit_search(statistics)
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        selection: &Selection,
        statistics: &SearchStatistics,
    ) -> SearchCommand {
        (**self).search_command(selection, statistics)
    }

    #[inline(always)]
    fn on_node(&mut self, selection: &Selection, statistics: &SearchStatistics) {
        (**self).on_node(selection, statistics)
    }

    #[inline(always)]
    fn on_prune(&mut self, selection: &Selection, reason: PruneReason, statistics: &SearchStatistics) {
        (**self).on_prune(selection, reason, statistics)
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &SearchStatistics) {
        (**self).on_solution_found(solution, statistics)
    }
}

impl<T, M> SearchMonitor<T> for Box<M>
where
    T: PrimInt + Signed,
    M: SearchMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, catalog: &Catalog<T>, statistics: &SearchStatistics) {
        (**self).on_enter_search(catalog, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        (**self).on_exit_search(statistics)
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        selection: &Selection,
        statistics: &SearchStatistics,
    ) -> SearchCommand {
        (**self).search_command(selection, statistics)
    }

    #[inline(always)]
    fn on_node(&mut self, selection: &Selection, statistics: &SearchStatistics) {
        (**self).on_node(selection, statistics)
    }

    #[inline(always)]
    fn on_prune(&mut self, selection: &Selection, reason: PruneReason, statistics: &SearchStatistics) {
        (**self).on_prune(selection, reason, statistics)
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &SearchStatistics) {
        (**self).on_solution_found(solution, statistics)
    }
}

impl<T> std::fmt::Debug for dyn SearchMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn SearchMonitor<T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allot_model::category::RiskCategory;

    #[test]
    fn test_display_of_commands_and_reasons() {
        assert_eq!(SearchCommand::Continue.to_string(), "Continue");
        assert_eq!(
            SearchCommand::Terminate("done".into()).to_string(),
            "Terminate: done"
        );
        assert_eq!(
            PruneReason::Infeasible(Violation::CategoryCapExceeded {
                category: RiskCategory::Low
            })
            .to_string(),
            "Infeasible(cost cap of category Low exceeded)"
        );
        assert_eq!(PruneReason::BoundDominated.to_string(), "BoundDominated");
        assert_eq!(SearchCommand::default(), SearchCommand::Continue);
    }
}
