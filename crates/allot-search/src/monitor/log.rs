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
    monitor::search_monitor::{PruneReason, SearchMonitor},
    stats::SearchStatistics,
};
use allot_model::{model::Catalog, selection::Selection, solution::Solution};
use num_traits::{PrimInt, Signed};
use std::time::{Duration, Instant};

/// A monitor that reports search progress through `tracing`.
///
/// Progress lines are emitted at `info` level at most once per `log_interval`.
/// The clock is only read when `nodes_explored & clock_check_mask == 0`.
#[derive(Debug, Clone)]
pub struct LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best: Option<(T, T)>,
}

impl<T> LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
            best: None,
        }
    }

    #[inline(always)]
    fn log_progress(&mut self, selection: &Selection, stats: &SearchStatistics) {
        let now = Instant::now();
        let best = match &self.best {
            Some((total_return, total_cost)) => format!("{} @ {}", total_return, total_cost),
            None => "none".to_string(),
        };

        tracing::info!(
            elapsed = %format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32()),
            nodes = stats.nodes_explored,
            depth = selection.decided(),
            best = %best,
            complete = stats.complete_selections,
            pruned = stats.prunings_total(),
            "search progress"
        );

        self.last_log_time = now;
    }
}

impl<T> Default for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl<T> std::fmt::Display for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<T> SearchMonitor<T> for LogMonitor<T>
where
    T: std::fmt::Display + std::fmt::Debug + PrimInt + Signed,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, catalog: &Catalog<T>, _statistics: &SearchStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best = None;
        tracing::info!(
            items = catalog.len(),
            search_space = %format!("2^{}", catalog.len()),
            "search started"
        );
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        tracing::info!(
            nodes = statistics.nodes_explored,
            complete = statistics.complete_selections,
            pruned = statistics.prunings_total(),
            solutions = statistics.solutions_found,
            elapsed = ?statistics.time_total,
            "search finished"
        );
    }

    fn on_node(&mut self, selection: &Selection, statistics: &SearchStatistics) {
        if (statistics.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_progress(selection, statistics);
        }
    }

    fn on_prune(
        &mut self,
        _selection: &Selection,
        _reason: PruneReason,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &SearchStatistics) {
        self.best = Some((solution.total_return(), solution.total_cost()));
        tracing::debug!(
            total_return = %solution.total_return(),
            total_cost = %solution.total_cost(),
            selection = %solution.selection(),
            nodes = statistics.nodes_explored,
            "improved selection"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allot_model::{index::ItemIndex, model::CatalogBuilder};

    #[test]
    fn test_tracks_best_solution_and_resets_on_enter() {
        let catalog = CatalogBuilder::<i64>::new().build().unwrap();
        let stats = SearchStatistics::default();
        let mut monitor = LogMonitor::<i64>::default();

        let solution = Solution::new(Selection::from_included(1, [ItemIndex::new(0)]), 7, 3);
        monitor.on_solution_found(&solution, &stats);
        assert_eq!(monitor.best, Some((7, 3)));

        monitor.on_enter_search(&catalog, &stats);
        assert_eq!(monitor.best, None);
    }

    #[test]
    fn test_display() {
        let monitor = LogMonitor::<i32>::new(Duration::from_secs(2), 1023);
        assert_eq!(
            monitor.to_string(),
            "LogMonitor(log_interval: 2s, clock_check_mask: 1023)"
        );
    }
}
