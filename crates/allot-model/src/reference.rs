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

//! The built-in reference portfolio.
//!
//! Thirteen investment options of a logistics company, with costs and
//! returns in units of ten thousand currency units. The same instance ships
//! as `data/reference.allot` for use with `ProblemLoader`.

use crate::{
    category::PerCategory,
    model::{Catalog, ConstraintsBuilder, ModelError, Problem},
};

/// The reference instance in the text format read by `ProblemLoader`.
pub const REFERENCE_INSTANCE: &str = include_str!("../data/reference.allot");

const NAMES: [&str; 13] = [
    "Expand ZDP warehouse capacity by 5%",
    "Expand MGL warehouse capacity by 7%",
    "Purchase forklift",
    "R&D project I",
    "R&D project II",
    "Acquire new equipment",
    "Employee training",
    "Expand road freight structure",
    "Build datacenter",
    "Acquire competitor",
    "Purchase cloud services",
    "Build mobile and desktop app",
    "Outsource logistics optimization service",
];
const COSTS: [i64; 13] = [47, 40, 17, 27, 34, 23, 5, 44, 32, 80, 12, 15, 30];
const RETURNS: [i64; 13] = [41, 33, 14, 25, 32, 32, 9, 19, 12, 45, 8, 12, 38];
const RISK_CODES: [u8; 13] = [1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 1, 1, 2];

const BUDGET: i64 = 240;
const MIN_COUNTS: PerCategory<usize> = PerCategory::new(2, 2, 1);
const MAX_COSTS: PerCategory<i64> = PerCategory::new(120, 150, 90);

/// Builds the reference problem.
///
/// # Errors
///
/// Never fails for the embedded data; the `Result` surfaces the validation
/// performed by the builders.
pub fn reference_problem() -> Result<Problem<i64>, ModelError> {
    let catalog = Catalog::from_columns(
        NAMES.to_vec(),
        COSTS.to_vec(),
        RETURNS.to_vec(),
        &RISK_CODES,
    )?;
    let constraints = ConstraintsBuilder::new()
        .budget(BUDGET)
        .max_costs(MAX_COSTS)
        .min_counts(MIN_COUNTS)
        .build()?;

    Ok(Problem::new(catalog, constraints))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{category::RiskCategory, loading::ProblemLoader};

    #[test]
    fn test_reference_problem_shape() {
        let problem = reference_problem().unwrap();
        let catalog = problem.catalog();
        let constraints = problem.constraints();

        assert_eq!(catalog.len(), 13);
        assert_eq!(catalog.total_cost(), 406);
        assert_eq!(catalog.total_return(), 320);
        assert_eq!(catalog.count_in(RiskCategory::Low), 4);
        assert_eq!(catalog.count_in(RiskCategory::Medium), 6);
        assert_eq!(catalog.count_in(RiskCategory::High), 3);

        assert_eq!(constraints.budget(), 240);
        assert_eq!(constraints.max_cost(RiskCategory::Medium), 150);
        assert_eq!(constraints.min_count(RiskCategory::High), 1);
    }

    #[test]
    fn test_embedded_text_matches_programmatic_instance() {
        let loaded = ProblemLoader::<i64>::new()
            .require_budget(true)
            .from_str(REFERENCE_INSTANCE)
            .unwrap();
        assert_eq!(loaded, reference_problem().unwrap());
    }
}
