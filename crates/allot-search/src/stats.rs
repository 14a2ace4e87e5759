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

use crate::eval::Violation;
use std::time::Duration;

/// Counters collected while enumerating selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Total nodes visited, the root included.
    pub nodes_explored: u64,
    /// Complete selections reached, feasible or not.
    pub complete_selections: u64,
    /// The deepest number of decided items reached.
    pub max_depth: u64,
    /// Inclusions pruned because the budget was exceeded.
    pub prunings_budget: u64,
    /// Inclusions pruned because a category cost cap was exceeded.
    pub prunings_category_cap: u64,
    /// Subtrees pruned because their best possible return was too low.
    pub prunings_bound: u64,
    /// Complete selections rejected for an unmet minimum count.
    pub minimum_count_rejections: u64,
    /// Strict improvements of the best solution.
    pub solutions_found: u64,
    /// Total wall-clock time of the search.
    pub time_total: Duration,
}

impl SearchStatistics {
    #[inline]
    pub fn on_node_explored(&mut self, depth: usize) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    pub fn on_complete_selection(&mut self) {
        self.complete_selections = self.complete_selections.saturating_add(1);
    }

    /// Records a rejection caused by `violation`.
    #[inline]
    pub fn on_violation(&mut self, violation: Violation) {
        let counter = match violation {
            Violation::BudgetExceeded => &mut self.prunings_budget,
            Violation::CategoryCapExceeded { .. } => &mut self.prunings_category_cap,
            Violation::MinimumCountUnmet { .. } => &mut self.minimum_count_rejections,
        };
        *counter = counter.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Returns the number of fatal prunings of any kind.
    #[inline]
    pub fn prunings_total(&self) -> u64 {
        self.prunings_budget
            .saturating_add(self.prunings_category_cap)
            .saturating_add(self.prunings_bound)
    }

    /// Adds the counters of another run. Depth and time take the maximum.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.complete_selections = self
            .complete_selections
            .saturating_add(other.complete_selections);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.prunings_budget = self.prunings_budget.saturating_add(other.prunings_budget);
        self.prunings_category_cap = self
            .prunings_category_cap
            .saturating_add(other.prunings_category_cap);
        self.prunings_bound = self.prunings_bound.saturating_add(other.prunings_bound);
        self.minimum_count_rejections = self
            .minimum_count_rejections
            .saturating_add(other.minimum_count_rejections);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.time_total = self.time_total.max(other.time_total);
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Allot Search Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Complete selections:   {}", self.complete_selections)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Prunings (budget):     {}", self.prunings_budget)?;
        writeln!(f, "  Prunings (category):   {}", self.prunings_category_cap)?;
        writeln!(f, "  Prunings (bound):      {}", self.prunings_bound)?;
        writeln!(f, "  Minimum count rejects: {}", self.minimum_count_rejections)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allot_model::category::RiskCategory;

    #[test]
    fn test_counters() {
        let mut stats = SearchStatistics::default();
        stats.on_node_explored(0);
        stats.on_node_explored(3);
        stats.on_node_explored(2);
        stats.on_complete_selection();
        stats.on_violation(Violation::BudgetExceeded);
        stats.on_violation(Violation::CategoryCapExceeded {
            category: RiskCategory::High,
        });
        stats.on_violation(Violation::MinimumCountUnmet {
            category: RiskCategory::Low,
        });
        stats.on_pruning_bound();
        stats.on_solution_found();

        assert_eq!(stats.nodes_explored, 3);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.complete_selections, 1);
        assert_eq!(stats.prunings_budget, 1);
        assert_eq!(stats.prunings_category_cap, 1);
        assert_eq!(stats.minimum_count_rejections, 1);
        assert_eq!(stats.prunings_total(), 3);
        assert_eq!(stats.solutions_found, 1);
    }

    #[test]
    fn test_merge_sums_counters_and_maxes_depth_and_time() {
        let mut a = SearchStatistics {
            nodes_explored: 10,
            max_depth: 4,
            prunings_budget: 2,
            time_total: Duration::from_millis(5),
            ..Default::default()
        };
        let b = SearchStatistics {
            nodes_explored: 7,
            max_depth: 6,
            prunings_budget: 1,
            solutions_found: 3,
            time_total: Duration::from_millis(2),
            ..Default::default()
        };

        a.merge(&b);
        assert_eq!(a.nodes_explored, 17);
        assert_eq!(a.max_depth, 6);
        assert_eq!(a.prunings_budget, 3);
        assert_eq!(a.solutions_found, 3);
        assert_eq!(a.time_total, Duration::from_millis(5));
    }

    #[test]
    fn test_display_contains_all_counters() {
        let text = SearchStatistics::default().to_string();
        assert!(text.starts_with("Allot Search Statistics:"));
        assert!(text.contains("Nodes explored:"));
        assert!(text.contains("Prunings (bound):"));
        assert!(text.contains("Total time:"));
    }
}
