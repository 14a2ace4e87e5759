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

//! Catalog and constraint definitions.
//!
//! A `Catalog<T>` is the immutable, ordered list of investment options the
//! search decides over. It is stored as a structure of arrays (names, costs,
//! returns, categories) so the search loop touches only the columns it needs.
//! `Constraints<T>` carries the budget, the per-category cost caps, and the
//! per-category minimum counts; it is fixed for a whole search.
//!
//! Both are produced by builders that validate eagerly. Any problem with the
//! input is reported as a `ModelError` and rejects the entire configuration,
//! so the search never sees a malformed catalog. In particular construction
//! proves that the sum of all costs and the sum of all returns fit into `T`,
//! which lets the search add without overflow checks.

use crate::{
    category::{PerCategory, RiskCategory},
    index::ItemIndex,
};
use num_traits::{PrimInt, Signed};

/// The error type for invalid catalogs and constraint sets.
///
/// Every variant describes an invalid configuration. Construction fails as a
/// whole; there is no partially valid model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The attribute columns of a catalog have different lengths.
    #[error(
        "invalid configuration: column lengths differ (names: {names}, costs: {costs}, returns: {returns}, categories: {categories})"
    )]
    LengthMismatch {
        names: usize,
        costs: usize,
        returns: usize,
        categories: usize,
    },
    /// An item references a risk category that does not exist.
    #[error("invalid configuration: item {item} references unknown risk category '{category}'")]
    UnknownCategory { item: usize, category: String },
    /// An item has a negative cost.
    #[error("invalid configuration: item {item} has a negative cost")]
    NegativeCost { item: usize },
    /// An item has a negative expected return.
    #[error("invalid configuration: item {item} has a negative return")]
    NegativeReturn { item: usize },
    /// The total budget is negative.
    #[error("invalid configuration: the budget is negative")]
    NegativeBudget,
    /// A category cost cap is negative.
    #[error("invalid configuration: the cost cap of category {category} is negative")]
    NegativeCategoryCap { category: RiskCategory },
    /// A catalog-wide sum does not fit into the numeric type.
    #[error("invalid configuration: the catalog's {quantity} overflows the numeric type")]
    Overflow { quantity: &'static str },
}

/// A single investment option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<T> {
    pub name: String,
    pub cost: T,
    pub expected_return: T,
    pub category: RiskCategory,
}

impl<T> Item<T> {
    /// Creates a new `Item`.
    #[inline]
    pub fn new<S>(name: S, cost: T, expected_return: T, category: RiskCategory) -> Self
    where
        S: Into<String>,
    {
        Self {
            name: name.into(),
            cost,
            expected_return,
            category,
        }
    }
}

/// A borrowed view of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRef<'a, T> {
    pub index: ItemIndex,
    pub name: &'a str,
    pub cost: T,
    pub expected_return: T,
    pub category: RiskCategory,
}

/// The immutable, validated, ordered list of investment options.
///
/// - `costs[i]`, `returns[i]` are non-negative.
/// - `total_cost` and `total_return` are the sums over all items and are
///   representable in `T`.
///
/// Construction:
/// - Use `CatalogBuilder` or `Catalog::from_columns`.
#[derive(Clone, PartialEq, Eq)]
pub struct Catalog<T> {
    names: Vec<String>,
    costs: Vec<T>,
    returns: Vec<T>,
    categories: Vec<RiskCategory>,
    total_cost: T,
    total_return: T,
}

impl<T> Catalog<T>
where
    T: PrimInt + Signed,
{
    /// Builds a catalog from parallel attribute columns.
    ///
    /// `risk_codes` uses the one-based category codes (`1` = Low,
    /// `2` = Medium, `3` = High).
    ///
    /// # Errors
    ///
    /// Returns `ModelError::LengthMismatch` if the columns differ in length,
    /// `ModelError::UnknownCategory` for a code outside `1..=3`, and any
    /// error `CatalogBuilder::build` reports.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use allot_model::model::Catalog;
    ///
    /// let catalog = Catalog::from_columns(
    ///     vec!["A", "B"],
    ///     vec![10i64, 5],
    ///     vec![20i64, 5],
    ///     &[1, 1],
    /// )
    /// .unwrap();
    /// assert_eq!(catalog.len(), 2);
    /// ```
    pub fn from_columns<S>(
        names: Vec<S>,
        costs: Vec<T>,
        returns: Vec<T>,
        risk_codes: &[u8],
    ) -> Result<Self, ModelError>
    where
        S: Into<String>,
    {
        let n = names.len();
        if costs.len() != n || returns.len() != n || risk_codes.len() != n {
            return Err(ModelError::LengthMismatch {
                names: n,
                costs: costs.len(),
                returns: returns.len(),
                categories: risk_codes.len(),
            });
        }

        let mut builder = CatalogBuilder::with_capacity(n);
        let rows = names.into_iter().zip(costs).zip(returns).zip(risk_codes);
        for (item, (((name, cost), expected_return), &code)) in rows.enumerate() {
            let category = RiskCategory::from_code(code).ok_or(ModelError::UnknownCategory {
                item,
                category: code.to_string(),
            })?;
            builder.add_item(Item::new(name, cost, expected_return, category));
        }
        builder.build()
    }

    /// Returns the number of items in the catalog.
    #[inline]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Returns `true` if the catalog has no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Returns the name of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn name(&self, index: ItemIndex) -> &str {
        &self.names[index.get()]
    }

    /// Returns the cost of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn cost(&self, index: ItemIndex) -> T {
        self.costs[index.get()]
    }

    /// Returns the expected return of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn expected_return(&self, index: ItemIndex) -> T {
        self.returns[index.get()]
    }

    /// Returns the risk category of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn category(&self, index: ItemIndex) -> RiskCategory {
        self.categories[index.get()]
    }

    /// Returns a borrowed view of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn item(&self, index: ItemIndex) -> ItemRef<'_, T> {
        let i = index.get();
        ItemRef {
            index,
            name: &self.names[i],
            cost: self.costs[i],
            expected_return: self.returns[i],
            category: self.categories[i],
        }
    }

    /// Iterates over all items in catalog order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = ItemRef<'_, T>> + '_ {
        (0..self.len()).map(|i| self.item(ItemIndex::new(i)))
    }

    /// Returns all costs in catalog order.
    #[inline]
    pub fn costs(&self) -> &[T] {
        &self.costs
    }

    /// Returns all expected returns in catalog order.
    #[inline]
    pub fn returns(&self) -> &[T] {
        &self.returns
    }

    /// Returns all risk categories in catalog order.
    #[inline]
    pub fn categories(&self) -> &[RiskCategory] {
        &self.categories
    }

    /// Returns the sum of all item costs.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Returns the sum of all expected returns.
    #[inline]
    pub fn total_return(&self) -> T {
        self.total_return
    }

    /// Returns how many items belong to `category`.
    #[inline]
    pub fn count_in(&self, category: RiskCategory) -> usize {
        self.categories.iter().filter(|&&c| c == category).count()
    }
}

impl<T> std::fmt::Debug for Catalog<T>
where
    T: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("names", &self.names)
            .field("costs", &self.costs)
            .field("returns", &self.returns)
            .field("categories", &self.categories)
            .finish()
    }
}

impl<T> std::fmt::Display for Catalog<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Catalog(num_items: {})", self.costs.len())
    }
}

/// Incremental builder for `Catalog`.
///
/// Items are appended in decision order. Validation happens in `build`.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder<T> {
    items: Vec<Item<T>>,
}

impl<T> CatalogBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Creates an empty builder.
    #[inline]
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Creates an empty builder with room for `capacity` items.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of items added so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items were added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends an item at the end of the decision order.
    #[inline]
    pub fn add_item(&mut self, item: Item<T>) -> &mut Self {
        self.items.push(item);
        self
    }

    /// Appends an item built from its attributes.
    #[inline]
    pub fn add<S>(
        &mut self,
        name: S,
        cost: T,
        expected_return: T,
        category: RiskCategory,
    ) -> &mut Self
    where
        S: Into<String>,
    {
        self.add_item(Item::new(name, cost, expected_return, category))
    }

    /// Validates the items and builds the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NegativeCost` or `ModelError::NegativeReturn` for
    /// the first offending item, and `ModelError::Overflow` if the catalog-wide
    /// sums do not fit into `T`.
    pub fn build(self) -> Result<Catalog<T>, ModelError> {
        let n = self.items.len();
        let mut names = Vec::with_capacity(n);
        let mut costs = Vec::with_capacity(n);
        let mut returns = Vec::with_capacity(n);
        let mut categories = Vec::with_capacity(n);
        let mut total_cost = T::zero();
        let mut total_return = T::zero();

        for (index, item) in self.items.into_iter().enumerate() {
            if item.cost.is_negative() {
                return Err(ModelError::NegativeCost { item: index });
            }
            if item.expected_return.is_negative() {
                return Err(ModelError::NegativeReturn { item: index });
            }

            total_cost = total_cost
                .checked_add(&item.cost)
                .ok_or(ModelError::Overflow {
                    quantity: "total cost",
                })?;
            total_return = total_return
                .checked_add(&item.expected_return)
                .ok_or(ModelError::Overflow {
                    quantity: "total return",
                })?;

            names.push(item.name);
            costs.push(item.cost);
            returns.push(item.expected_return);
            categories.push(item.category);
        }

        Ok(Catalog {
            names,
            costs,
            returns,
            categories,
            total_cost,
            total_return,
        })
    }
}

/// The hard constraints of a search.
///
/// - `budget`: the total selected cost must not exceed it.
/// - `max_costs[c]`: the selected cost within category `c` must not exceed it.
/// - `min_counts[c]`: at least this many items of category `c` must be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints<T> {
    budget: T,
    max_costs: PerCategory<T>,
    min_counts: PerCategory<usize>,
}

impl<T> Constraints<T>
where
    T: PrimInt + Signed,
{
    /// Returns the total budget cap.
    #[inline]
    pub fn budget(&self) -> T {
        self.budget
    }

    /// Returns the cost cap of `category`.
    #[inline]
    pub fn max_cost(&self, category: RiskCategory) -> T {
        self.max_costs[category]
    }

    /// Returns all category cost caps.
    #[inline]
    pub fn max_costs(&self) -> &PerCategory<T> {
        &self.max_costs
    }

    /// Returns the minimum number of selected items in `category`.
    #[inline]
    pub fn min_count(&self, category: RiskCategory) -> usize {
        self.min_counts[category]
    }

    /// Returns all category minimum counts.
    #[inline]
    pub fn min_counts(&self) -> &PerCategory<usize> {
        &self.min_counts
    }
}

impl<T> std::fmt::Display for Constraints<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Constraints(budget: {}, max_costs: {}, min_counts: {})",
            self.budget, self.max_costs, self.min_counts
        )
    }
}

/// Builder for `Constraints` starting from **permissive bounds**.
///
/// | Field | Default | Semantics |
/// | :--- | :--- | :--- |
/// | `budget` | `T::MAX` | No total spending limit. |
/// | `max_costs` | `T::MAX` | No category spending limit. |
/// | `min_counts` | `0` | No participation requirement. |
///
/// # Examples
///
/// ```rust
/// use allot_model::category::RiskCategory;
/// use allot_model::model::ConstraintsBuilder;
///
/// let constraints = ConstraintsBuilder::<i64>::new()
///     .budget(240)
///     .max_cost(RiskCategory::Low, 120)
///     .min_count(RiskCategory::High, 1)
///     .build()
///     .unwrap();
/// assert_eq!(constraints.budget(), 240);
/// assert_eq!(constraints.max_cost(RiskCategory::Medium), i64::MAX);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstraintsBuilder<T> {
    budget: T,
    max_costs: PerCategory<T>,
    min_counts: PerCategory<usize>,
}

impl<T> Default for ConstraintsBuilder<T>
where
    T: PrimInt + Signed,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ConstraintsBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Creates a builder with no effective limits.
    #[inline]
    pub fn new() -> Self {
        Self {
            budget: T::max_value(),
            max_costs: PerCategory::splat(T::max_value()),
            min_counts: PerCategory::splat(0),
        }
    }

    /// Sets the total budget cap.
    #[inline]
    pub fn budget(mut self, budget: T) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the cost cap of one category.
    #[inline]
    pub fn max_cost(mut self, category: RiskCategory, cap: T) -> Self {
        self.max_costs[category] = cap;
        self
    }

    /// Sets the cost caps of all categories.
    #[inline]
    pub fn max_costs(mut self, caps: PerCategory<T>) -> Self {
        self.max_costs = caps;
        self
    }

    /// Sets the minimum selected count of one category.
    #[inline]
    pub fn min_count(mut self, category: RiskCategory, count: usize) -> Self {
        self.min_counts[category] = count;
        self
    }

    /// Sets the minimum selected counts of all categories.
    #[inline]
    pub fn min_counts(mut self, counts: PerCategory<usize>) -> Self {
        self.min_counts = counts;
        self
    }

    /// Validates and builds the constraints.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::NegativeBudget` or
    /// `ModelError::NegativeCategoryCap` for negative limits.
    pub fn build(self) -> Result<Constraints<T>, ModelError> {
        if self.budget.is_negative() {
            return Err(ModelError::NegativeBudget);
        }
        if let Some((category, _)) = self.max_costs.iter().find(|(_, cap)| cap.is_negative()) {
            return Err(ModelError::NegativeCategoryCap { category });
        }

        Ok(Constraints {
            budget: self.budget,
            max_costs: self.max_costs,
            min_counts: self.min_counts,
        })
    }
}

/// A catalog together with the constraints it is searched under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem<T> {
    catalog: Catalog<T>,
    constraints: Constraints<T>,
}

impl<T> Problem<T> {
    /// Creates a new `Problem`.
    #[inline]
    pub fn new(catalog: Catalog<T>, constraints: Constraints<T>) -> Self {
        Self {
            catalog,
            constraints,
        }
    }

    /// Returns the catalog.
    #[inline]
    pub fn catalog(&self) -> &Catalog<T> {
        &self.catalog
    }

    /// Returns the constraints.
    #[inline]
    pub fn constraints(&self) -> &Constraints<T> {
        &self.constraints
    }

    /// Splits the problem into its catalog and constraints.
    #[inline]
    pub fn into_parts(self) -> (Catalog<T>, Constraints<T>) {
        (self.catalog, self.constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ix(i: usize) -> ItemIndex {
        ItemIndex::new(i)
    }

    #[test]
    fn test_builder_preserves_order_and_sums() {
        let mut builder = CatalogBuilder::<i64>::new();
        builder
            .add("A", 10, 20, RiskCategory::Low)
            .add("B", 5, 5, RiskCategory::Low)
            .add("C", 100, 50, RiskCategory::High);
        let catalog = builder.build().expect("valid catalog");

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.name(ix(2)), "C");
        assert_eq!(catalog.cost(ix(0)), 10);
        assert_eq!(catalog.expected_return(ix(1)), 5);
        assert_eq!(catalog.category(ix(2)), RiskCategory::High);
        assert_eq!(catalog.total_cost(), 115);
        assert_eq!(catalog.total_return(), 75);
        assert_eq!(catalog.count_in(RiskCategory::Low), 2);
        assert_eq!(catalog.count_in(RiskCategory::Medium), 0);
    }

    #[test]
    fn test_iter_yields_views_in_catalog_order() {
        let catalog =
            Catalog::from_columns(vec!["x", "y"], vec![1i32, 2], vec![3, 4], &[2, 3]).unwrap();
        let names: Vec<_> = catalog.iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["x", "y"]);

        let second = catalog.item(ix(1));
        assert_eq!(second.index, ix(1));
        assert_eq!(second.category, RiskCategory::High);
        assert_eq!(second.expected_return, 4);
    }

    #[test]
    fn test_from_columns_rejects_length_mismatch() {
        let res = Catalog::from_columns(vec!["a", "b"], vec![1i64, 2], vec![1i64], &[1, 1]);
        assert_eq!(
            res,
            Err(ModelError::LengthMismatch {
                names: 2,
                costs: 2,
                returns: 1,
                categories: 2
            })
        );
    }

    #[test]
    fn test_from_columns_rejects_unknown_category_code() {
        let res = Catalog::from_columns(vec!["a", "b"], vec![1i64, 2], vec![1i64, 2], &[1, 4]);
        assert_eq!(
            res,
            Err(ModelError::UnknownCategory {
                item: 1,
                category: "4".to_string()
            })
        );
    }

    #[test]
    fn test_build_rejects_negative_values() {
        let mut builder = CatalogBuilder::<i64>::new();
        builder.add("ok", 1, 1, RiskCategory::Low);
        builder.add("bad", -1, 1, RiskCategory::Low);
        assert_eq!(builder.build(), Err(ModelError::NegativeCost { item: 1 }));

        let mut builder = CatalogBuilder::<i64>::new();
        builder.add("bad", 1, -3, RiskCategory::Medium);
        assert_eq!(builder.build(), Err(ModelError::NegativeReturn { item: 0 }));
    }

    #[test]
    fn test_build_rejects_overflowing_sums() {
        let mut builder = CatalogBuilder::<i8>::new();
        builder.add("a", 100, 1, RiskCategory::Low);
        builder.add("b", 100, 1, RiskCategory::Low);
        assert_eq!(
            builder.build(),
            Err(ModelError::Overflow {
                quantity: "total cost"
            })
        );
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = CatalogBuilder::<i64>::new().build().unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.total_cost(), 0);
    }

    #[test]
    fn test_constraints_defaults_are_permissive() {
        let constraints = ConstraintsBuilder::<i32>::new().build().unwrap();
        assert_eq!(constraints.budget(), i32::MAX);
        for category in RiskCategory::ALL {
            assert_eq!(constraints.max_cost(category), i32::MAX);
            assert_eq!(constraints.min_count(category), 0);
        }
    }

    #[test]
    fn test_constraints_reject_negative_limits() {
        assert_eq!(
            ConstraintsBuilder::<i64>::new().budget(-1).build(),
            Err(ModelError::NegativeBudget)
        );
        assert_eq!(
            ConstraintsBuilder::<i64>::new()
                .max_cost(RiskCategory::Medium, -5)
                .build(),
            Err(ModelError::NegativeCategoryCap {
                category: RiskCategory::Medium
            })
        );
    }

    #[test]
    fn test_error_messages_name_the_configuration_problem() {
        let err = ModelError::UnknownCategory {
            item: 3,
            category: "extreme".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid configuration: item 3 references unknown risk category 'extreme'"
        );
    }
}
