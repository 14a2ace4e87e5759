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

use crate::{incumbent::BestSolutionRecord, stats::SearchStatistics};
use allot_model::solution::Solution;
use num_traits::{PrimInt, Signed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// Every selection was enumerated and none is feasible.
    Infeasible,
    /// Every selection was enumerated; the solution is the best one.
    Optimal(Solution<T>),
    /// The search was aborted; the solution is the best found so far.
    Feasible(Solution<T>),
    /// The search was aborted before any feasible selection was found.
    Unknown,
}

impl<T> SolverResult<T> {
    /// Returns the solution carried by this result, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    /// Consumes the result and returns its solution, if any.
    #[inline]
    pub fn into_solution(self) -> Option<Solution<T>> {
        match self {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(solution) => write!(
                f,
                "Optimal(return={}, cost={})",
                solution.total_return(),
                solution.total_cost()
            ),
            SolverResult::Feasible(solution) => write!(
                f,
                "Feasible(return={}, cost={})",
                solution.total_return(),
                solution.total_cost()
            ),
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The full decision tree was enumerated and a solution exists.
    OptimalityProven,
    /// The full decision tree was enumerated and no solution exists.
    InfeasibilityProven,
    /// The search was aborted by a monitor (time limit, interrupt, ...).
    /// The string describes the reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome<T> {
    pub result: SolverResult<T>,
    pub reason: TerminationReason,
    pub statistics: SearchStatistics,
}

impl<T> SolverOutcome<T> {
    #[inline]
    pub fn new(
        result: SolverResult<T>,
        reason: TerminationReason,
        statistics: SearchStatistics,
    ) -> Self {
        Self {
            result,
            reason,
            statistics,
        }
    }

    /// A fully enumerated search that found `solution`.
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: SearchStatistics) -> Self {
        Self::new(
            SolverResult::Optimal(solution),
            TerminationReason::OptimalityProven,
            statistics,
        )
    }

    /// A fully enumerated search without any feasible selection.
    #[inline]
    pub fn infeasible(statistics: SearchStatistics) -> Self {
        Self::new(
            SolverResult::Infeasible,
            TerminationReason::InfeasibilityProven,
            statistics,
        )
    }

    /// An aborted search with the best solution found so far, if any.
    #[inline]
    pub fn aborted<S>(solution: Option<Solution<T>>, reason: S, statistics: SearchStatistics) -> Self
    where
        S: Into<String>,
    {
        let result = match solution {
            Some(solution) => SolverResult::Feasible(solution),
            None => SolverResult::Unknown,
        };
        Self::new(result, TerminationReason::Aborted(reason.into()), statistics)
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn reason(&self) -> &TerminationReason {
        &self.reason
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        self.result.solution()
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_feasible(&self) -> bool {
        matches!(self.result, SolverResult::Feasible(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        self.result.solution().is_some()
    }

    /// Converts the outcome into the best-solution record it describes.
    #[inline]
    pub fn into_record(self) -> BestSolutionRecord<T> {
        BestSolutionRecord::from(self.result.into_solution())
    }
}

impl<T> std::fmt::Display for SolverOutcome<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:      {}", self.result)?;
        writeln!(f, "Termination: {}", self.reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allot_model::{index::ItemIndex, selection::Selection};

    fn solution() -> Solution<i64> {
        Solution::new(Selection::from_included(2, [ItemIndex::new(0)]), 20, 10)
    }

    #[test]
    fn test_constructors_pair_result_and_reason() {
        let optimal = SolverOutcome::optimal(solution(), SearchStatistics::default());
        assert!(optimal.is_optimal());
        assert!(optimal.has_solution());
        assert_eq!(optimal.reason(), &TerminationReason::OptimalityProven);

        let infeasible = SolverOutcome::<i64>::infeasible(SearchStatistics::default());
        assert!(infeasible.is_infeasible());
        assert!(!infeasible.has_solution());
        assert_eq!(infeasible.reason(), &TerminationReason::InfeasibilityProven);
    }

    #[test]
    fn test_aborted_maps_to_feasible_or_unknown() {
        let with = SolverOutcome::aborted(Some(solution()), "time", SearchStatistics::default());
        assert!(with.is_feasible());
        assert_eq!(with.reason(), &TerminationReason::Aborted("time".into()));

        let without = SolverOutcome::<i64>::aborted(None, "stop", SearchStatistics::default());
        assert_eq!(without.result(), &SolverResult::Unknown);
        assert!(without.solution().is_none());
    }

    #[test]
    fn test_into_record() {
        let record = SolverOutcome::optimal(solution(), SearchStatistics::default()).into_record();
        assert_eq!(record.best_return(), 20);

        let record = SolverOutcome::<i64>::infeasible(SearchStatistics::default()).into_record();
        assert!(!record.has_solution());
    }

    #[test]
    fn test_display() {
        let outcome = SolverOutcome::optimal(solution(), SearchStatistics::default());
        let text = outcome.to_string();
        assert!(text.contains("Result:      Optimal(return=20, cost=10)"));
        assert!(text.contains("Termination: Optimality Proven"));
        assert!(text.contains("Allot Search Statistics:"));
    }
}
