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

//! Human-readable rendering of a solution.
//!
//! `Report` aggregates a solution per risk category and renders it as a
//! sectioned text block. Monetary amounts go through `CurrencyFormat`, which
//! scales catalog units into currency units before printing.

use crate::{
    category::{PerCategory, RiskCategory},
    model::Catalog,
    solution::Solution,
};
use num_traits::{PrimInt, Signed, ToPrimitive};

/// How catalog amounts are rendered as money.
///
/// An amount `v` is printed as `"{symbol} {v * scale}"` with `decimals`
/// fractional digits.
///
/// # Examples
///
/// ```rust
/// use allot_model::report::CurrencyFormat;
///
/// let currency = CurrencyFormat::default();
/// assert_eq!(currency.format(239i64), "R$ 2390000.00");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyFormat {
    symbol: String,
    scale: f64,
    decimals: usize,
}

impl Default for CurrencyFormat {
    /// Brazilian reais, catalog units of ten thousand, two decimals.
    fn default() -> Self {
        Self {
            symbol: "R$".to_string(),
            scale: 1e4,
            decimals: 2,
        }
    }
}

impl CurrencyFormat {
    /// Creates a new `CurrencyFormat`.
    #[inline]
    pub fn new<S>(symbol: S, scale: f64, decimals: usize) -> Self
    where
        S: Into<String>,
    {
        Self {
            symbol: symbol.into(),
            scale,
            decimals,
        }
    }

    /// Returns the currency symbol.
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the factor applied to catalog amounts.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the number of fractional digits.
    #[inline]
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    /// Formats a catalog amount as money.
    pub fn format<V>(&self, value: V) -> String
    where
        V: ToPrimitive,
    {
        let amount = value.to_f64().unwrap_or(f64::NAN) * self.scale;
        if self.symbol.is_empty() {
            format!("{:.*}", self.decimals, amount)
        } else {
            format!("{} {:.*}", self.symbol, self.decimals, amount)
        }
    }
}

/// Per-category and overall aggregates of a solution.
#[derive(Debug, Clone)]
pub struct Report<'a, T> {
    catalog: &'a Catalog<T>,
    solution: &'a Solution<T>,
    counts: PerCategory<usize>,
    costs: PerCategory<T>,
    returns: PerCategory<T>,
    total_cost: T,
    total_return: T,
    currency: CurrencyFormat,
}

impl<'a, T> Report<'a, T>
where
    T: PrimInt + Signed,
{
    /// Aggregates `solution` over `catalog` using the default currency.
    ///
    /// # Panics
    ///
    /// Panics if the solution was produced for a catalog of a different size.
    pub fn new(catalog: &'a Catalog<T>, solution: &'a Solution<T>) -> Self {
        assert_eq!(
            catalog.len(),
            solution.selection().num_items(),
            "called `Report::new` with a solution over {} items for a catalog of {} items",
            solution.selection().num_items(),
            catalog.len()
        );

        let mut counts = PerCategory::splat(0usize);
        let mut costs = PerCategory::splat(T::zero());
        let mut returns = PerCategory::splat(T::zero());
        let mut total_cost = T::zero();
        let mut total_return = T::zero();

        for index in solution.included() {
            let item = catalog.item(index);
            counts[item.category] += 1;
            costs[item.category] = costs[item.category] + item.cost;
            returns[item.category] = returns[item.category] + item.expected_return;
            total_cost = total_cost + item.cost;
            total_return = total_return + item.expected_return;
        }

        Self {
            catalog,
            solution,
            counts,
            costs,
            returns,
            total_cost,
            total_return,
            currency: CurrencyFormat::default(),
        }
    }

    /// Replaces the currency used for monetary amounts.
    #[inline]
    pub fn with_currency(mut self, currency: CurrencyFormat) -> Self {
        self.currency = currency;
        self
    }

    /// Returns the number of selected items in `category`.
    #[inline]
    pub fn count(&self, category: RiskCategory) -> usize {
        self.counts[category]
    }

    /// Returns the selected cost in `category`.
    #[inline]
    pub fn cost(&self, category: RiskCategory) -> T {
        self.costs[category]
    }

    /// Returns the selected return in `category`.
    #[inline]
    pub fn expected_return(&self, category: RiskCategory) -> T {
        self.returns[category]
    }

    /// Returns the total selected cost.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Returns the total selected return.
    #[inline]
    pub fn total_return(&self) -> T {
        self.total_return
    }

    /// Iterates over the names of the selected items in catalog order.
    #[inline]
    pub fn selected_names(&self) -> impl Iterator<Item = &'a str> + 'a {
        let catalog = self.catalog;
        self.solution
            .included()
            .map(move |index| catalog.name(index))
    }
}

impl<T> std::fmt::Display for Report<'_, T>
where
    T: PrimInt + Signed,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "## OPTIONS PER RISK")?;
        for (category, count) in self.counts.iter() {
            writeln!(f, "{}: {}", category, count)?;
        }
        writeln!(f)?;

        writeln!(f, "## TOTAL COST PER RISK")?;
        for (category, cost) in self.costs.iter() {
            writeln!(f, "{}: {}", category, self.currency.format(*cost))?;
        }
        writeln!(f)?;

        writeln!(f, "## TOTAL RETURN PER RISK")?;
        for (category, value) in self.returns.iter() {
            writeln!(f, "{}: {}", category, self.currency.format(*value))?;
        }
        writeln!(f)?;

        writeln!(f, "## INVESTMENT COST")?;
        writeln!(f, "{}", self.currency.format(self.total_cost))?;
        writeln!(f)?;

        writeln!(f, "## EXPECTED TOTAL RETURN")?;
        writeln!(f, "{}", self.currency.format(self.total_return))?;
        writeln!(f)?;

        writeln!(f, "## CHOSEN OPTIONS")?;
        for name in self.selected_names() {
            writeln!(f, "{}", name)?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.solution.selection())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{index::ItemIndex, selection::Selection};

    fn catalog() -> Catalog<i64> {
        Catalog::from_columns(
            vec!["A", "B", "C", "D"],
            vec![10, 5, 100, 7],
            vec![20, 5, 50, 3],
            &[1, 1, 3, 2],
        )
        .unwrap()
    }

    fn solution(indices: &[usize], ret: i64, cost: i64) -> Solution<i64> {
        let selection = Selection::from_included(4, indices.iter().map(|&i| ItemIndex::new(i)));
        Solution::new(selection, ret, cost)
    }

    #[test]
    fn test_currency_format() {
        assert_eq!(CurrencyFormat::default().format(87i64), "R$ 870000.00");
        assert_eq!(CurrencyFormat::new("$", 1.0, 0).format(12i32), "$ 12");
        assert_eq!(CurrencyFormat::new("", 0.5, 1).format(3i64), "1.5");
    }

    #[test]
    fn test_aggregates_sum_returns_not_costs() {
        let catalog = catalog();
        let solution = solution(&[0, 1, 3], 28, 22);
        let report = Report::new(&catalog, &solution);

        assert_eq!(report.count(RiskCategory::Low), 2);
        assert_eq!(report.count(RiskCategory::Medium), 1);
        assert_eq!(report.count(RiskCategory::High), 0);
        assert_eq!(report.cost(RiskCategory::Low), 15);
        assert_eq!(report.expected_return(RiskCategory::Low), 25);
        assert_eq!(report.expected_return(RiskCategory::Medium), 3);
        assert_eq!(report.total_cost(), 22);
        assert_eq!(report.total_return(), 28);

        let names: Vec<_> = report.selected_names().collect();
        assert_eq!(names, vec!["A", "B", "D"]);
    }

    #[test]
    fn test_display_renders_all_sections() {
        let catalog = catalog();
        let solution = solution(&[0, 1], 25, 15);
        let text = Report::new(&catalog, &solution)
            .with_currency(CurrencyFormat::new("$", 1.0, 0))
            .to_string();

        assert!(text.contains("## OPTIONS PER RISK\nLow: 2\nMedium: 0\nHigh: 0\n"));
        assert!(text.contains("## TOTAL COST PER RISK\nLow: $ 15\n"));
        assert!(text.contains("## TOTAL RETURN PER RISK\nLow: $ 25\n"));
        assert!(text.contains("## INVESTMENT COST\n$ 15\n"));
        assert!(text.contains("## EXPECTED TOTAL RETURN\n$ 25\n"));
        assert!(text.contains("## CHOSEN OPTIONS\nA\nB\n"));
        assert!(text.ends_with("1100\n"));
    }

    #[test]
    #[should_panic(expected = "called `Report::new` with a solution over")]
    fn test_new_panics_on_size_mismatch() {
        let catalog = catalog();
        let selection = Selection::from_included(2, std::iter::empty());
        let solution = Solution::new(selection, 0i64, 0i64);
        let _ = Report::new(&catalog, &solution);
    }
}
