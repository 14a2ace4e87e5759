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

//! # Best Solution Holders
//!
//! - `BestSolutionRecord<T>`: the per-search record of the best complete
//!   feasible selection. It starts empty (return `0`, cost `+inf`) and is
//!   replaced only by a strictly better objective, so among exact ties the
//!   first selection found in decision order is kept. Every search creates its
//!   own record; nothing is carried over between calls.
//! - `SharedIncumbent<T>`: a mutex-guarded record shared by parallel workers.
//!   It accepts a candidate that is strictly better, or equal in objective but
//!   earlier in sequential search order. The winner therefore does not depend
//!   on thread timing. An atomic copy of the best return is kept for lock-free
//!   bound checks.
//! - `IncumbentStore<T>`: how a search session publishes its improvements and
//!   reads a global return bound. `NoSharedIncumbent` is the sequential case,
//!   `SharedIncumbentAdapter` forwards to a `SharedIncumbent`.

use crate::{num::SolverNumeric, objective::Objective};
use allot_model::solution::Solution;
use num_traits::{PrimInt, Signed};
use std::{
    marker::PhantomData,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicI64, Ordering},
    },
};

/// The best complete feasible selection found by one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestSolutionRecord<T> {
    solution: Option<Solution<T>>,
}

impl<T> Default for BestSolutionRecord<T> {
    fn default() -> Self {
        Self { solution: None }
    }
}

impl<T> From<Option<Solution<T>>> for BestSolutionRecord<T> {
    #[inline]
    fn from(solution: Option<Solution<T>>) -> Self {
        Self { solution }
    }
}

impl<T> BestSolutionRecord<T>
where
    T: PrimInt + Signed,
{
    /// Creates an empty record.
    #[inline]
    pub fn new() -> Self {
        Self { solution: None }
    }

    /// Returns `true` if a solution has been recorded.
    #[inline]
    pub fn has_solution(&self) -> bool {
        self.solution.is_some()
    }

    /// Returns the recorded solution, if any.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        self.solution.as_ref()
    }

    /// Consumes the record and returns its solution, if any.
    #[inline]
    pub fn into_solution(self) -> Option<Solution<T>> {
        self.solution
    }

    /// Returns the recorded total return, `0` while empty.
    #[inline]
    pub fn best_return(&self) -> T {
        self.solution
            .as_ref()
            .map_or_else(T::zero, |solution| solution.total_return())
    }

    /// Returns the recorded total cost, `None` (unbounded) while empty.
    #[inline]
    pub fn best_cost(&self) -> Option<T> {
        self.solution.as_ref().map(|solution| solution.total_cost())
    }

    /// Returns the recorded objective, if any.
    #[inline]
    pub fn objective(&self) -> Option<Objective<T>> {
        self.solution.as_ref().map(Objective::of)
    }

    /// Returns `true` if a selection with the given totals would replace the
    /// recorded one.
    #[inline]
    pub fn would_improve(&self, total_return: T, total_cost: T) -> bool {
        match self.objective() {
            None => true,
            Some(best) => Objective::new(total_return, total_cost).is_better_than(&best),
        }
    }

    /// Records `candidate` if it is strictly better. Returns whether it was recorded.
    #[inline]
    pub fn try_improve(&mut self, candidate: Solution<T>) -> bool {
        if !self.would_improve(candidate.total_return(), candidate.total_cost()) {
            return false;
        }
        self.solution = Some(candidate);
        true
    }
}

impl<T> std::fmt::Display for BestSolutionRecord<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.solution {
            Some(solution) => write!(
                f,
                "BestSolutionRecord(return: {}, cost: {}, selection: {})",
                solution.total_return(),
                solution.total_cost(),
                solution.selection()
            ),
            None => write!(f, "BestSolutionRecord(empty)"),
        }
    }
}

/// Sentinel for "no solution installed" in the atomic return hint.
const NO_RETURN: i64 = i64::MIN;

/// A concurrent holder for the best solution found by parallel workers.
#[derive(Debug)]
pub struct SharedIncumbent<T> {
    /// Best installed return, for lock-free reads. `NO_RETURN` while empty.
    best_return: AtomicI64,
    solution: Mutex<Option<Solution<T>>>,
}

impl<T> Default for SharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Display for SharedIncumbent<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.best_return.load(Ordering::Relaxed) {
            NO_RETURN => write!(f, "SharedIncumbent(empty)"),
            best => write!(f, "SharedIncumbent(best_return: {})", best),
        }
    }
}

impl<T> SharedIncumbent<T> {
    /// Creates a new shared incumbent with no solution installed.
    #[inline]
    pub fn new() -> Self {
        Self {
            best_return: AtomicI64::new(NO_RETURN),
            solution: Mutex::new(None),
        }
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Option<Solution<T>>> {
        // The guarded value is replaced atomically, so a poisoned lock still holds a valid record.
        self.solution.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of the installed solution, if any.
    #[inline]
    pub fn snapshot(&self) -> Option<Solution<T>>
    where
        T: Clone,
    {
        self.lock().clone()
    }

    /// Consumes the incumbent and returns the installed solution, if any.
    #[inline]
    pub fn into_inner(self) -> Option<Solution<T>> {
        self.solution
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> SharedIncumbent<T>
where
    T: SolverNumeric,
{
    /// Returns the best installed return without locking, if any.
    #[inline]
    pub fn best_return(&self) -> Option<T> {
        match self.best_return.load(Ordering::Relaxed) {
            NO_RETURN => None,
            best => T::from_i64(best),
        }
    }

    /// Attempts to install `candidate`. Returns `true` if it was installed.
    ///
    /// A candidate replaces the current solution if its objective is strictly
    /// better, or if the objectives are equal and the candidate comes first in
    /// depth-first, include-before-exclude order.
    pub fn try_install(&self, candidate: &Solution<T>) -> bool {
        let candidate_objective = Objective::of(candidate);

        let mut guard = self.lock();
        if let Some(current) = guard.as_ref() {
            let current_objective = Objective::of(current);
            let replaces = candidate_objective.is_better_than(&current_objective)
                || (candidate_objective == current_objective
                    && candidate
                        .selection()
                        .precedes_in_search_order(current.selection()));
            if !replaces {
                return false;
            }
        }

        *guard = Some(candidate.clone());
        let hint = candidate.total_return().to_i64().unwrap_or(NO_RETURN);
        self.best_return.store(hint, Ordering::Relaxed);
        true
    }
}

/// Publishes improvements of a search session and supplies a global return bound.
pub trait IncumbentStore<T>
where
    T: SolverNumeric,
{
    /// Returns the best return known outside the session, if any.
    fn best_known_return(&self) -> Option<T>;
    /// Notifies the store that the session recorded a new best solution.
    fn on_solution_found(&self, solution: &Solution<T>);
}

/// An `IncumbentStore` for isolated, single-threaded searches.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct NoSharedIncumbent<T>(PhantomData<T>);

impl<T> Default for NoSharedIncumbent<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NoSharedIncumbent<T> {
    /// Creates a new `NoSharedIncumbent`.
    #[inline(always)]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> IncumbentStore<T> for NoSharedIncumbent<T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn best_known_return(&self) -> Option<T> {
        None
    }

    #[inline(always)]
    fn on_solution_found(&self, _: &Solution<T>) {}
}

/// An `IncumbentStore` that forwards to a `SharedIncumbent`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy)]
pub struct SharedIncumbentAdapter<'a, T> {
    inner: &'a SharedIncumbent<T>,
}

impl<'a, T> SharedIncumbentAdapter<'a, T> {
    /// Creates a new `SharedIncumbentAdapter`.
    #[inline(always)]
    pub fn new(inner: &'a SharedIncumbent<T>) -> Self {
        Self { inner }
    }
}

impl<T> IncumbentStore<T> for SharedIncumbentAdapter<'_, T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn best_known_return(&self) -> Option<T> {
        self.inner.best_return()
    }

    #[inline(always)]
    fn on_solution_found(&self, solution: &Solution<T>) {
        self.inner.try_install(solution);
    }
}
