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
use std::{
    marker::PhantomData,
    time::{Duration, Instant},
};

/// A monitor that terminates the search after a wall-clock duration.
///
/// The clock is read only every `check_interval` commands to keep the
/// per-node overhead low.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor<T> {
    time_limit: Duration,
    start_time: Option<Instant>,
    check_interval: u64,
    ops_since_last_check: u64,
    _marker: PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Creates a new `TimeLimitMonitor`.
    ///
    /// # Panics
    ///
    /// Panics if `check_interval` is zero.
    pub fn new(time_limit: Duration, check_interval: u64) -> Self {
        assert!(
            check_interval > 0,
            "called `TimeLimitMonitor::new` with a check interval of zero"
        );

        Self {
            time_limit,
            start_time: None,
            check_interval,
            ops_since_last_check: 0,
            _marker: PhantomData,
        }
    }

    /// Creates a new `TimeLimitMonitor` that reads the clock every 16384 nodes.
    #[inline]
    pub fn with_default_check_interval(time_limit: Duration) -> Self {
        Self::new(time_limit, 0x4000)
    }

    /// Returns the configured time limit.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<T> SearchMonitor<T> for TimeLimitMonitor<T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _catalog: &Catalog<T>, _statistics: &SearchStatistics) {
        self.start_time = Some(Instant::now());
        self.ops_since_last_check = 0;
    }

    fn on_exit_search(&mut self, _statistics: &SearchStatistics) {
        self.start_time = None;
    }

    fn search_command(
        &mut self,
        _selection: &Selection,
        _statistics: &SearchStatistics,
    ) -> SearchCommand {
        self.ops_since_last_check = self.ops_since_last_check.saturating_add(1);

        if self.ops_since_last_check >= self.check_interval {
            self.ops_since_last_check = 0;

            if let Some(start) = self.start_time
                && start.elapsed() >= self.time_limit
            {
                return SearchCommand::Terminate(format!(
                    "time limit of {:.2?} exceeded",
                    self.time_limit
                ));
            }
        }

        SearchCommand::Continue
    }

    fn on_node(&mut self, _selection: &Selection, _statistics: &SearchStatistics) {}

    fn on_prune(
        &mut self,
        _selection: &Selection,
        _reason: PruneReason,
        _statistics: &SearchStatistics,
    ) {
    }

    fn on_solution_found(&mut self, _solution: &Solution<T>, _statistics: &SearchStatistics) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use allot_model::model::CatalogBuilder;

    fn catalog() -> Catalog<i64> {
        CatalogBuilder::new().build().unwrap()
    }

    #[test]
    fn test_zero_limit_terminates_at_first_check() {
        let mut monitor = TimeLimitMonitor::<i64>::new(Duration::ZERO, 2);
        let stats = SearchStatistics::default();
        let selection = Selection::new(0);
        monitor.on_enter_search(&catalog(), &stats);

        assert_eq!(
            monitor.search_command(&selection, &stats),
            SearchCommand::Continue
        );
        assert!(matches!(
            monitor.search_command(&selection, &stats),
            SearchCommand::Terminate(_)
        ));
    }

    #[test]
    fn test_generous_limit_continues() {
        let mut monitor = TimeLimitMonitor::<i64>::new(Duration::from_secs(3600), 1);
        let stats = SearchStatistics::default();
        let selection = Selection::new(0);
        monitor.on_enter_search(&catalog(), &stats);
        for _ in 0..100 {
            assert_eq!(
                monitor.search_command(&selection, &stats),
                SearchCommand::Continue
            );
        }
    }

    #[test]
    fn test_no_termination_outside_a_search() {
        let mut monitor = TimeLimitMonitor::<i64>::new(Duration::ZERO, 1);
        let stats = SearchStatistics::default();
        assert_eq!(
            monitor.search_command(&Selection::new(0), &stats),
            SearchCommand::Continue
        );
    }

    #[test]
    #[should_panic(expected = "check interval of zero")]
    fn test_zero_check_interval_panics() {
        let _ = TimeLimitMonitor::<i64>::new(Duration::from_secs(1), 0);
    }
}
