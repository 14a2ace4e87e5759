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

//! # Parallel Exhaustive Search
//!
//! `ParallelSolver` splits the decision tree at a fixed depth and searches the
//! resulting subtrees on scoped worker threads.
//!
//! ## Flow
//!
//! 1. The first `split_depth` decisions are enumerated in include-first order.
//!    Prefixes that already exceed the budget or a category cap are dropped
//!    and counted as prunings.
//! 2. Workers pull prefixes from an atomic work index and run the sequential
//!    engine below each one with a fresh monitor stack (interrupt, optional
//!    solution limit, optional time limit).
//! 3. Improvements are published to a `SharedIncumbent`. It accepts a
//!    candidate only if it is strictly better, or equal in objective and
//!    earlier in sequential search order, so the final selection is the one
//!    the sequential engine would pick.
//! 4. The first worker that aborts records its reason and raises an internal
//!    halt flag that stops the others.
//!
//! Statistics of all workers are merged. Without bound pruning the node and
//! pruning counts equal those of a sequential run; improving-solution counts
//! are per worker and therefore usually higher.

use crate::{
    engine::ExhaustiveSolver,
    eval::{FeasibilityEvaluator, RunningTotals},
    incumbent::SharedIncumbent,
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor,
        solution_limit::SolutionLimitMonitor, time_limit::TimeLimitMonitor,
    },
    num::SolverNumeric,
    result::{SolverOutcome, TerminationReason},
    stats::SearchStatistics,
};
use allot_model::{
    index::ItemIndex,
    model::{Catalog, Constraints},
};
use std::{
    sync::{
        OnceLock,
        atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

const DEFAULT_SPLIT_DEPTH: usize = 8;
const TIME_CHECK_INTERVAL: u64 = 1024;

/// A multi-threaded driver around `ExhaustiveSolver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelSolver {
    num_threads: usize,
    split_depth: usize,
    bound_pruning: bool,
    time_limit: Option<Duration>,
    solution_limit: Option<u64>,
}

impl Default for ParallelSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelSolver {
    /// Creates a solver using all available cores.
    pub fn new() -> Self {
        let num_threads = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1);

        Self {
            num_threads,
            split_depth: DEFAULT_SPLIT_DEPTH,
            bound_pruning: false,
            time_limit: None,
            solution_limit: None,
        }
    }

    /// Sets the number of worker threads.
    ///
    /// # Panics
    ///
    /// Panics if `num_threads` is zero.
    #[inline]
    pub fn with_num_threads(mut self, num_threads: usize) -> Self {
        assert!(
            num_threads > 0,
            "called `ParallelSolver::with_num_threads` with zero threads"
        );
        self.num_threads = num_threads;
        self
    }

    /// Sets how many leading decisions are enumerated to form work units.
    /// Depths beyond the catalog size are clamped.
    #[inline]
    pub fn with_split_depth(mut self, split_depth: usize) -> Self {
        self.split_depth = split_depth;
        self
    }

    #[inline]
    pub fn with_bound_pruning(mut self, enabled: bool) -> Self {
        self.bound_pruning = enabled;
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    #[inline]
    pub fn with_solution_limit(mut self, solution_limit: u64) -> Self {
        self.solution_limit = Some(solution_limit);
        self
    }

    #[inline]
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    #[inline]
    pub fn split_depth(&self) -> usize {
        self.split_depth
    }

    #[inline]
    pub fn bound_pruning(&self) -> bool {
        self.bound_pruning
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn solution_limit(&self) -> Option<u64> {
        self.solution_limit
    }

    /// Searches the whole decision tree on the configured number of threads.
    pub fn solve<T>(&self, catalog: &Catalog<T>, constraints: &Constraints<T>) -> SolverOutcome<T>
    where
        T: SolverNumeric,
    {
        let stop = AtomicBool::new(false);
        self.solve_with_stop(catalog, constraints, &stop)
    }

    /// Like `solve`, but aborts once `stop` is raised by the caller.
    pub fn solve_with_stop<T>(
        &self,
        catalog: &Catalog<T>,
        constraints: &Constraints<T>,
        stop: &AtomicBool,
    ) -> SolverOutcome<T>
    where
        T: SolverNumeric,
    {
        let start_time = Instant::now();
        let deadline = self
            .time_limit
            .and_then(|limit| start_time.checked_add(limit));

        let depth = self.split_depth.min(catalog.len());
        let (prefixes, mut statistics) = enumerate_prefixes(catalog, constraints, depth);
        let num_workers = self.num_threads.min(prefixes.len());

        tracing::debug!(
            prefixes = prefixes.len(),
            depth,
            workers = num_workers,
            "parallel search started"
        );

        let shared = SharedState {
            solver: ExhaustiveSolver::new().with_bound_pruning(self.bound_pruning),
            catalog,
            constraints,
            prefixes: &prefixes,
            next_prefix: AtomicUsize::new(0),
            incumbent: SharedIncumbent::new(),
            stop,
            halt: AtomicBool::new(false),
            abort_reason: OnceLock::new(),
            solutions_found: AtomicU64::new(0),
            solution_limit: self.solution_limit,
            time_limit: self.time_limit,
            deadline,
        };

        let reports: Vec<SearchStatistics> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..num_workers)
                .map(|worker| {
                    let shared = &shared;
                    scope.spawn(move || shared.run_worker(worker))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        });

        for report in &reports {
            statistics.merge(report);
        }
        statistics.set_total_time(start_time.elapsed());

        let SharedState {
            incumbent,
            abort_reason,
            ..
        } = shared;

        match (abort_reason.into_inner(), incumbent.into_inner()) {
            (Some(reason), solution) => SolverOutcome::aborted(solution, reason, statistics),
            (None, Some(solution)) => SolverOutcome::optimal(solution, statistics),
            (None, None) => SolverOutcome::infeasible(statistics),
        }
    }
}

impl std::fmt::Display for ParallelSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ParallelSolver(num_threads: {}, split_depth: {}, bound_pruning: {})",
            self.num_threads, self.split_depth, self.bound_pruning
        )
    }
}

/// State shared by all workers of one parallel search.
struct SharedState<'a, T> {
    solver: ExhaustiveSolver,
    catalog: &'a Catalog<T>,
    constraints: &'a Constraints<T>,
    prefixes: &'a [Vec<bool>],
    next_prefix: AtomicUsize,
    incumbent: SharedIncumbent<T>,
    stop: &'a AtomicBool,
    halt: AtomicBool,
    abort_reason: OnceLock<String>,
    solutions_found: AtomicU64,
    solution_limit: Option<u64>,
    time_limit: Option<Duration>,
    deadline: Option<Instant>,
}

impl<T> SharedState<'_, T>
where
    T: SolverNumeric,
{
    fn run_worker(&self, worker: usize) -> SearchStatistics {
        let mut statistics = SearchStatistics::default();
        let mut solved = 0usize;

        while let Some(prefix) = self
            .prefixes
            .get(self.next_prefix.fetch_add(1, Ordering::Relaxed))
        {
            let remaining = self
                .deadline
                .map(|deadline| deadline.saturating_duration_since(Instant::now()));
            if remaining == Some(Duration::ZERO) {
                self.abort(format!(
                    "time limit of {:.2?} exceeded",
                    self.time_limit.unwrap_or_default()
                ));
                break;
            }

            let mut monitor = CompositeMonitor::<T>::with_capacity(4);
            monitor.add_monitor(InterruptMonitor::<T>::new(self.stop));
            monitor.add_monitor(InterruptMonitor::<T>::new(&self.halt));
            if let Some(limit) = self.solution_limit {
                monitor.add_monitor(SolutionLimitMonitor::<T>::new(&self.solutions_found, limit));
            }
            if let Some(remaining) = remaining {
                monitor.add_monitor(TimeLimitMonitor::<T>::new(remaining, TIME_CHECK_INTERVAL));
            }

            let outcome = self.solver.solve_from_prefix(
                self.catalog,
                self.constraints,
                prefix,
                monitor,
                &self.incumbent,
            );
            statistics.merge(&outcome.statistics);
            solved += 1;

            if let TerminationReason::Aborted(reason) = outcome.reason {
                self.abort(reason);
                break;
            }
        }

        tracing::debug!(
            worker,
            prefixes = solved,
            nodes = statistics.nodes_explored,
            "worker finished"
        );
        statistics
    }

    /// Records the first abort reason and stops the other workers.
    fn abort(&self, reason: String) {
        let _ = self.abort_reason.set(reason);
        self.halt.store(true, Ordering::Relaxed);
    }
}

/// Enumerates all non-fatal decision prefixes of length `depth` in
/// include-first order. Interior nodes and fatal inclusions are counted in the
/// returned statistics.
fn enumerate_prefixes<T>(
    catalog: &Catalog<T>,
    constraints: &Constraints<T>,
    depth: usize,
) -> (Vec<Vec<bool>>, SearchStatistics)
where
    T: SolverNumeric,
{
    let evaluator = FeasibilityEvaluator::new(catalog, constraints);
    let mut prefixes = Vec::with_capacity(1usize << depth.min(16));
    let mut statistics = SearchStatistics::default();
    collect_prefixes(
        &evaluator,
        depth,
        &mut Vec::with_capacity(depth),
        &mut RunningTotals::new(),
        &mut prefixes,
        &mut statistics,
    );
    (prefixes, statistics)
}

fn collect_prefixes<T>(
    evaluator: &FeasibilityEvaluator<'_, T>,
    depth: usize,
    prefix: &mut Vec<bool>,
    totals: &mut RunningTotals<T>,
    prefixes: &mut Vec<Vec<bool>>,
    statistics: &mut SearchStatistics,
) where
    T: SolverNumeric,
{
    if prefix.len() == depth {
        prefixes.push(prefix.clone());
        return;
    }

    statistics.on_node_explored(prefix.len());
    let catalog = evaluator.catalog();
    let index = ItemIndex::new(prefix.len());

    let category = totals.include(catalog, index);
    prefix.push(true);
    match evaluator.fatal_violation(totals, category) {
        Some(violation) => statistics.on_violation(violation),
        None => collect_prefixes(evaluator, depth, prefix, totals, prefixes, statistics),
    }
    prefix.pop();
    totals.remove(catalog, index);

    prefix.push(false);
    collect_prefixes(evaluator, depth, prefix, totals, prefixes, statistics);
    prefix.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{monitor::no_op::NoOperationMonitor, result::SolverResult};
    use allot_model::{
        category::RiskCategory,
        model::{CatalogBuilder, ConstraintsBuilder},
        reference::reference_problem,
    };
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn sequential(catalog: &Catalog<i64>, constraints: &Constraints<i64>) -> SolverOutcome<i64> {
        ExhaustiveSolver::new().solve(catalog, constraints, NoOperationMonitor::new())
    }

    fn random_instance(seed: u64) -> (Catalog<i64>, Constraints<i64>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rng.gen_range(0..=11);
        let mut builder = CatalogBuilder::<i64>::with_capacity(n);
        for i in 0..n {
            let category = RiskCategory::ALL[rng.gen_range(0..RiskCategory::COUNT)];
            // Few distinct values so that ties are common.
            builder.add(
                format!("item{i}"),
                rng.gen_range(0..6) * 5,
                rng.gen_range(0..4) * 10,
                category,
            );
        }
        let mut constraints = ConstraintsBuilder::<i64>::new().budget(rng.gen_range(0..120));
        for category in RiskCategory::ALL {
            constraints = constraints
                .max_cost(category, rng.gen_range(0..80))
                .min_count(category, rng.gen_range(0..2));
        }
        (builder.build().unwrap(), constraints.build().unwrap())
    }

    #[test]
    fn test_reference_matches_sequential_for_all_splits() {
        let problem = reference_problem().unwrap();
        let expected = sequential(problem.catalog(), problem.constraints());

        for threads in [1, 2, 4] {
            for split_depth in [0, 1, 3, 13, 20] {
                let outcome = ParallelSolver::new()
                    .with_num_threads(threads)
                    .with_split_depth(split_depth)
                    .solve(problem.catalog(), problem.constraints());
                assert_eq!(
                    outcome.result(),
                    expected.result(),
                    "threads {threads}, split depth {split_depth}"
                );
                assert_eq!(outcome.reason(), &TerminationReason::OptimalityProven);
            }
        }
    }

    #[test]
    fn test_node_counts_match_sequential() {
        let problem = reference_problem().unwrap();
        let expected = sequential(problem.catalog(), problem.constraints());
        let outcome = ParallelSolver::new()
            .with_num_threads(3)
            .with_split_depth(5)
            .solve(problem.catalog(), problem.constraints());

        let (a, b) = (expected.statistics(), outcome.statistics());
        assert_eq!(a.nodes_explored, b.nodes_explored);
        assert_eq!(a.complete_selections, b.complete_selections);
        assert_eq!(a.max_depth, b.max_depth);
        assert_eq!(a.prunings_budget, b.prunings_budget);
        assert_eq!(a.prunings_category_cap, b.prunings_category_cap);
        assert_eq!(a.minimum_count_rejections, b.minimum_count_rejections);
    }

    #[test]
    fn test_random_instances_match_sequential_selection() {
        for seed in 0..60 {
            let (catalog, constraints) = random_instance(seed);
            let expected = sequential(&catalog, &constraints);
            let outcome = ParallelSolver::new()
                .with_num_threads(4)
                .with_split_depth(4)
                .with_bound_pruning(seed % 2 == 0)
                .solve(&catalog, &constraints);
            assert_eq!(outcome.result(), expected.result(), "seed {seed}");
        }
    }

    #[test]
    fn test_fatal_prefixes_are_dropped() {
        let mut builder = CatalogBuilder::new();
        builder
            .add("a", 50i64, 1, RiskCategory::High)
            .add("b", 50, 1, RiskCategory::High);
        let catalog = builder.build().unwrap();
        let constraints = ConstraintsBuilder::new()
            .budget(10)
            .min_count(RiskCategory::High, 1)
            .build()
            .unwrap();

        let outcome = ParallelSolver::new()
            .with_num_threads(2)
            .with_split_depth(2)
            .solve(&catalog, &constraints);
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.statistics().prunings_budget, 2);
    }

    #[test]
    fn test_raised_stop_flag_aborts() {
        let problem = reference_problem().unwrap();
        let stop = AtomicBool::new(true);
        let outcome = ParallelSolver::new()
            .with_num_threads(2)
            .with_split_depth(3)
            .solve_with_stop(problem.catalog(), problem.constraints(), &stop);

        assert_eq!(outcome.result(), &SolverResult::Unknown);
        assert_eq!(
            outcome.reason(),
            &TerminationReason::Aborted("interrupt signal received".into())
        );
    }

    #[test]
    fn test_expired_time_limit_aborts() {
        let problem = reference_problem().unwrap();
        let outcome = ParallelSolver::new()
            .with_num_threads(2)
            .with_time_limit(Duration::ZERO)
            .solve(problem.catalog(), problem.constraints());

        assert!(!outcome.is_optimal());
        assert!(matches!(outcome.reason(), TerminationReason::Aborted(_)));
    }

    #[test]
    fn test_solution_limit_aborts_with_feasible_result() {
        let problem = reference_problem().unwrap();
        let outcome = ParallelSolver::new()
            .with_num_threads(1)
            .with_split_depth(2)
            .with_solution_limit(1)
            .solve(problem.catalog(), problem.constraints());

        assert!(outcome.is_feasible());
        assert_eq!(
            outcome.reason(),
            &TerminationReason::Aborted("solution limit of 1 reached".into())
        );
    }

    #[test]
    fn test_enumerate_prefixes_order_and_pruning() {
        let mut builder = CatalogBuilder::new();
        builder
            .add("a", 5i64, 1, RiskCategory::Low)
            .add("b", 20, 1, RiskCategory::Low)
            .add("c", 1, 1, RiskCategory::Low);
        let catalog = builder.build().unwrap();
        let constraints = ConstraintsBuilder::new().budget(10).build().unwrap();

        let (prefixes, statistics) = enumerate_prefixes(&catalog, &constraints, 2);
        assert_eq!(prefixes, vec![vec![true, false], vec![false, false]]);
        assert_eq!(statistics.prunings_budget, 2);
        assert_eq!(statistics.nodes_explored, 3);

        let (prefixes, _) = enumerate_prefixes(&catalog, &constraints, 0);
        assert_eq!(prefixes, vec![Vec::<bool>::new()]);
    }

    #[test]
    #[should_panic(expected = "zero threads")]
    fn test_zero_threads_panics() {
        let _ = ParallelSolver::new().with_num_threads(0);
    }
}
