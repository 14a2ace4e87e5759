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

use crate::{
    monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use allot_model::{model::Catalog, selection::Selection, solution::Solution};
use num_traits::{PrimInt, Signed};
use std::sync::atomic::{AtomicU64, Ordering};

/// A monitor that terminates the search after a number of improving solutions.
///
/// The counter is shared, so several monitors (one per worker) enforce one
/// global limit.
#[derive(Debug)]
pub struct SolutionLimitMonitor<'a, T> {
    solutions_found: &'a AtomicU64,
    solution_limit: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> SolutionLimitMonitor<'a, T> {
    /// Creates a new `SolutionLimitMonitor`.
    #[inline]
    pub fn new(solutions_found: &'a AtomicU64, solution_limit: u64) -> Self {
        Self {
            solutions_found,
            solution_limit,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    fn reached_limit(&self) -> bool {
        self.solutions_found.load(Ordering::Relaxed) >= self.solution_limit
    }
}

impl<T> SearchMonitor<T> for SolutionLimitMonitor<'_, T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&mut self, _catalog: &Catalog<T>, _statistics: &SearchStatistics) {}

    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {}

    fn search_command(
        &mut self,
        _selection: &Selection,
        _statistics: &SearchStatistics,
    ) -> SearchCommand {
        if self.reached_limit() {
            SearchCommand::Terminate(format!(
                "solution limit of {} reached",
                self.solution_limit
            ))
        } else {
            SearchCommand::Continue
        }
    }

    fn on_node(&mut self, _selection: &Selection, _statistics: &SearchStatistics) {}

    fn on_prune(
        &mut self,
        _selection: &Selection,
        _reason: PruneReason,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_solution_found(&mut self, _solution: &Solution<T>, _statistics: &SearchStatistics) {
        self.solutions_found.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allot_model::index::ItemIndex;

    fn dummy_solution() -> Solution<i64> {
        Solution::new(Selection::from_included(1, [ItemIndex::new(0)]), 1, 1)
    }

    #[test]
    fn test_terminates_at_limit() {
        let counter = AtomicU64::new(0);
        let mut monitor = SolutionLimitMonitor::<i64>::new(&counter, 2);
        let stats = SearchStatistics::default();
        let selection = Selection::new(0);

        assert_eq!(monitor.search_command(&selection, &stats), SearchCommand::Continue);
        monitor.on_solution_found(&dummy_solution(), &stats);
        assert_eq!(monitor.search_command(&selection, &stats), SearchCommand::Continue);
        monitor.on_solution_found(&dummy_solution(), &stats);
        assert_eq!(
            monitor.search_command(&selection, &stats),
            SearchCommand::Terminate("solution limit of 2 reached".into())
        );
    }

    #[test]
    fn test_monitors_share_the_counter() {
        let counter = AtomicU64::new(0);
        let mut a = SolutionLimitMonitor::<i64>::new(&counter, 3);
        let mut b = SolutionLimitMonitor::<i64>::new(&counter, 3);
        let stats = SearchStatistics::default();

        a.on_solution_found(&dummy_solution(), &stats);
        b.on_solution_found(&dummy_solution(), &stats);
        assert_eq!(
            b.search_command(&Selection::new(0), &stats),
            SearchCommand::Continue
        );
        a.on_solution_found(&dummy_solution(), &stats);
        assert!(matches!(
            b.search_command(&Selection::new(0), &stats),
            SearchCommand::Terminate(_)
        ));
        assert_eq!(counter.load(Ordering::Relaxed), 3);
    }
}
