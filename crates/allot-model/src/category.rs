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

//! Risk categories and per-category storage.
//!
//! Every catalog item belongs to exactly one `RiskCategory`. Caps and minimum
//! counts are expressed per category, so the model stores them in a
//! `PerCategory<V>`: a fixed array indexed by the category itself rather
//! than by a raw slot number.
//!
//! Categories are parsed from their names (`low`, `medium`, `high`, case
//! insensitive) or from the numeric codes `1`, `2`, `3` used by older
//! instance files.

use std::str::FromStr;

/// The risk classification of an investment option.
///
/// The declaration order (`Low < Medium < High`) is the order in which
/// minimum-count constraints are checked and reports are rendered.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// The number of risk categories.
    pub const COUNT: usize = 3;

    /// All categories in check and report order.
    pub const ALL: [RiskCategory; RiskCategory::COUNT] =
        [RiskCategory::Low, RiskCategory::Medium, RiskCategory::High];

    /// Returns the storage slot of this category in `0..COUNT`.
    #[inline(always)]
    pub const fn slot(self) -> usize {
        match self {
            RiskCategory::Low => 0,
            RiskCategory::Medium => 1,
            RiskCategory::High => 2,
        }
    }

    /// Returns the one-based numeric code of this category.
    #[inline]
    pub const fn code(self) -> u8 {
        self.slot() as u8 + 1
    }

    /// Looks up a category by its one-based numeric code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use allot_model::category::RiskCategory;
    ///
    /// assert_eq!(RiskCategory::from_code(2), Some(RiskCategory::Medium));
    /// assert_eq!(RiskCategory::from_code(4), None);
    /// ```
    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(RiskCategory::Low),
            2 => Some(RiskCategory::Medium),
            3 => Some(RiskCategory::High),
            _ => None,
        }
    }

    /// Returns the display name of this category.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a token names no known risk category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown risk category '{0}'")]
pub struct UnknownCategoryError(pub String);

impl FromStr for RiskCategory {
    type Err = UnknownCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if let Ok(code) = token.parse::<u8>() {
            return RiskCategory::from_code(code)
                .ok_or_else(|| UnknownCategoryError(token.to_owned()));
        }

        RiskCategory::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownCategoryError(token.to_owned()))
    }
}

/// One value per risk category, indexed by `RiskCategory`.
///
/// # Examples
///
/// ```rust
/// use allot_model::category::{PerCategory, RiskCategory};
///
/// let mut caps = PerCategory::new(120, 150, 90);
/// caps[RiskCategory::High] += 10;
/// assert_eq!(caps[RiskCategory::High], 100);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PerCategory<V>([V; RiskCategory::COUNT]);

impl<V> PerCategory<V> {
    /// Creates a new `PerCategory` from one value per category.
    #[inline]
    pub const fn new(low: V, medium: V, high: V) -> Self {
        Self([low, medium, high])
    }

    /// Creates a new `PerCategory` holding `value` for every category.
    #[inline]
    pub fn splat(value: V) -> Self
    where
        V: Clone,
    {
        Self([value.clone(), value.clone(), value])
    }

    /// Creates a new `PerCategory` by evaluating `f` for every category.
    #[inline]
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(RiskCategory) -> V,
    {
        Self(RiskCategory::ALL.map(&mut f))
    }

    /// Iterates over `(category, value)` pairs in category order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (RiskCategory, &V)> {
        RiskCategory::ALL.into_iter().zip(self.0.iter())
    }

    /// Returns the values as a slice in category order.
    #[inline]
    pub fn as_slice(&self) -> &[V] {
        &self.0
    }
}

impl<V> std::ops::Index<RiskCategory> for PerCategory<V> {
    type Output = V;

    #[inline(always)]
    fn index(&self, category: RiskCategory) -> &Self::Output {
        &self.0[category.slot()]
    }
}

impl<V> std::ops::IndexMut<RiskCategory> for PerCategory<V> {
    #[inline(always)]
    fn index_mut(&mut self, category: RiskCategory) -> &mut Self::Output {
        &mut self.0[category.slot()]
    }
}

impl<V> std::fmt::Display for PerCategory<V>
where
    V: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{Low: {}, Medium: {}, High: {}}}",
            self.0[0], self.0[1], self.0[2]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_for_every_category() {
        for category in RiskCategory::ALL {
            assert_eq!(RiskCategory::from_code(category.code()), Some(category));
        }
        assert_eq!(RiskCategory::from_code(0), None);
    }

    #[test]
    fn test_parse_accepts_names_and_codes() {
        assert_eq!("low".parse::<RiskCategory>(), Ok(RiskCategory::Low));
        assert_eq!("MEDIUM".parse::<RiskCategory>(), Ok(RiskCategory::Medium));
        assert_eq!(" High ".parse::<RiskCategory>(), Ok(RiskCategory::High));
        assert_eq!("3".parse::<RiskCategory>(), Ok(RiskCategory::High));
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        assert_eq!(
            "extreme".parse::<RiskCategory>(),
            Err(UnknownCategoryError("extreme".to_string()))
        );
        assert_eq!(
            "7".parse::<RiskCategory>(),
            Err(UnknownCategoryError("7".to_string()))
        );
    }

    #[test]
    fn test_per_category_indexing_and_iteration_order() {
        let mut counts = PerCategory::splat(0usize);
        counts[RiskCategory::Medium] = 4;
        counts[RiskCategory::High] += 1;

        let collected: Vec<_> = counts.iter().map(|(c, v)| (c, *v)).collect();
        assert_eq!(
            collected,
            vec![
                (RiskCategory::Low, 0),
                (RiskCategory::Medium, 4),
                (RiskCategory::High, 1)
            ]
        );
    }

    #[test]
    fn test_per_category_from_fn_and_display() {
        let codes = PerCategory::from_fn(|c| c.code());
        assert_eq!(codes.as_slice(), &[1, 2, 3]);
        assert_eq!(format!("{}", codes), "{Low: 1, Medium: 2, High: 3}");
    }
}
