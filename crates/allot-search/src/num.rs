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

//! # Solver Numeric Trait
//!
//! Unified numeric bounds for the search components. `SolverNumeric` collects
//! the integer capabilities the engine needs into a single alias so generic
//! signatures stay short.
//!
//! - `PrimInt + Signed` for the arithmetic itself.
//! - `FromPrimitive + ToPrimitive` for the atomic return hint shared between
//!   parallel workers and for currency rendering.
//! - `Debug + Display` for logging.
//! - `Send + Sync` for the parallel driver.
//!
//! The usual choices are `i32` and `i64`. Catalog construction already proves
//! that the sum of all costs and returns fits into the chosen type.

use num_traits::{FromPrimitive, PrimInt, Signed, ToPrimitive};
use std::hash::Hash;

/// A trait alias for numeric types that can be used in the solver.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + ToPrimitive
    + std::fmt::Debug
    + std::fmt::Display
    + Send
    + Sync
    + Hash
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + ToPrimitive
        + std::fmt::Debug
        + std::fmt::Display
        + Send
        + Sync
        + Hash
{
}

#[cfg(test)]
mod tests {
    use super::SolverNumeric;

    fn assert_numeric<T: SolverNumeric>() {}

    #[test]
    fn test_signed_primitives_are_solver_numeric() {
        assert_numeric::<i8>();
        assert_numeric::<i16>();
        assert_numeric::<i32>();
        assert_numeric::<i64>();
        assert_numeric::<isize>();
    }
}
