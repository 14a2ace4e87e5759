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

//! # Allot Search
//!
//! Exhaustive include/exclude search over an `allot_model` catalog.
//!
//! The engine enumerates every subset of the catalog as a binary decision
//! tree, prunes subtrees that break the budget or a category cost cap, checks
//! minimum counts on complete selections, and keeps the selection with the
//! highest expected return (lowest cost among equal returns, first found among
//! exact ties).
//!
//! ## Module map
//!
//! - `num`: the `SolverNumeric` trait alias.
//! - `objective`: the (return, cost) ordering of candidate selections.
//! - `eval`: feasibility classification and running totals.
//! - `incumbent`: per-search best record and the thread-shared incumbent.
//! - `monitor`: observation and cooperative termination.
//! - `stats`: search counters.
//! - `result`: outcomes and termination reasons.
//! - `engine`: the sequential solver and the `search` entry point.
//! - `parallel`: the multi-threaded driver.
//!
//! ## Guarantees
//!
//! - Deterministic: the same input always yields the same selection, for the
//!   sequential and the parallel solver alike.
//! - No state is kept between calls.
//! - An instance without feasible selections is a regular outcome
//!   (`SolverResult::Infeasible`), never an error.

pub mod engine;
pub mod eval;
pub mod incumbent;
pub mod monitor;
pub mod num;
pub mod objective;
pub mod parallel;
pub mod result;
pub mod stats;
