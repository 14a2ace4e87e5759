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

//! Fan-out monitor.
//!
//! `CompositeMonitor` forwards every event to its children in insertion
//! order. `search_command` short-circuits on the first `Terminate`, so put
//! stricter stop conditions first.

use crate::{
    monitor::search_monitor::{PruneReason, SearchCommand, SearchMonitor},
    stats::SearchStatistics,
};
use allot_model::{model::Catalog, selection::Selection, solution::Solution};
use num_traits::{PrimInt, Signed};

/// A monitor that aggregates several monitors and forwards events to all of them.
pub struct CompositeMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    monitors: Vec<Box<dyn SearchMonitor<T> + 'a>>,
}

impl<T> Default for CompositeMonitor<'_, T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeMonitor<'a, T>
where
    T: PrimInt + Signed,
{
    /// Creates a new empty `CompositeMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of child monitors.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if there are no child monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<T> std::fmt::Debug for CompositeMonitor<'_, T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.monitors.iter().map(|m| m.name()).collect();
        f.debug_struct("CompositeMonitor")
            .field("monitors", &names)
            .finish()
    }
}

impl<T> SearchMonitor<T> for CompositeMonitor<'_, T>
where
    T: PrimInt + Signed,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, catalog: &Catalog<T>, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(catalog, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(
        &mut self,
        selection: &Selection,
        statistics: &SearchStatistics,
    ) -> SearchCommand {
        for monitor in &mut self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command(selection, statistics)
            {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }

    fn on_node(&mut self, selection: &Selection, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_node(selection, statistics);
        }
    }

    fn on_prune(&mut self, selection: &Selection, reason: PruneReason, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_prune(selection, reason, statistics);
        }
    }

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &SearchStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_solution_found(solution, statistics);
        }
    }
}
