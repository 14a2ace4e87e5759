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

//! Problem instance loader for investment catalogs.
//!
//! This module turns a line-oriented text stream into a validated `Problem`.
//! Each non-empty line holds one directive; everything after a `#` is a
//! comment. Items are appended in the order they appear, which is the
//! decision order of the search.
//!
//! ```raw
//! budget <amount>
//! cap <category> <amount>
//! min <category> <count>
//! item <cost> <return> <category> <name...>
//! ```
//!
//! Categories are written as `low`, `medium`, `high` (case insensitive) or as
//! the numeric codes `1`, `2`, `3`. Omitted limits keep the permissive
//! defaults of `ConstraintsBuilder`. A repeated `budget`, `cap` or `min`
//! directive overrides the earlier one.
//!
//! The loader accepts any `BufRead`, file path, raw reader, or string slice.
//! Errors carry the one-based line number of the offending directive.

use crate::{
    category::{RiskCategory, UnknownCategoryError},
    model::{CatalogBuilder, ConstraintsBuilder, Item, ModelError, Problem},
};
use num_traits::{PrimInt, Signed};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::{FromStr, SplitWhitespace},
};

/// The error type for the problem loading process.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A token could not be parsed into the expected type.
    #[error("line {line}: could not parse token '{token}' as {expected}")]
    Parse {
        line: usize,
        token: String,
        expected: &'static str,
    },
    /// A token does not name a risk category.
    #[error("line {line}: {source}")]
    Category {
        line: usize,
        #[source]
        source: UnknownCategoryError,
    },
    /// The first token of a line is not a known directive.
    #[error("line {line}: unknown directive '{directive}'")]
    UnknownDirective { line: usize, directive: String },
    /// A directive ended before all of its fields were read.
    #[error("line {line}: missing field '{field}'")]
    MissingField { line: usize, field: &'static str },
    /// A directive carries more tokens than it accepts.
    #[error("line {line}: unexpected trailing token '{token}'")]
    TrailingToken { line: usize, token: String },
    /// The instance was read but does not form a valid configuration.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// A configurable loader for investment problem instances.
///
/// # Configuration
/// * `require_budget`: if set, an instance without a `budget` directive is
///   rejected instead of running with an unbounded budget.
///
/// # Examples
///
/// ```rust
/// use allot_model::loading::ProblemLoader;
///
/// let text = "
///     budget 15
///     min low 1
///     item 10 20 low A
///     item 5 5 low B
/// ";
/// let problem = ProblemLoader::<i64>::new().from_str(text).unwrap();
/// assert_eq!(problem.catalog().len(), 2);
/// assert_eq!(problem.constraints().budget(), 15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemLoader<T> {
    require_budget: bool,
    _marker: std::marker::PhantomData<T>,
}

impl<T> Default for ProblemLoader<T> {
    fn default() -> Self {
        Self {
            require_budget: false,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T> ProblemLoader<T>
where
    T: PrimInt + Signed + FromStr,
{
    /// Creates a new `ProblemLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether a missing `budget` directive is an error.
    #[inline]
    pub fn require_budget(mut self, yes: bool) -> Self {
        self.require_budget = yes;
        self
    }

    /// Loads a problem from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Problem<T>, LoadError> {
        let mut catalog = CatalogBuilder::new();
        let mut constraints = ConstraintsBuilder::new();
        let mut saw_budget = false;
        let mut last_line = 0;

        for (number, line) in rdr.lines().enumerate() {
            let line = line?;
            let mut fields = Fields::new(number + 1, strip_comment(&line));
            last_line = fields.line;

            let Some(directive) = fields.tokens.next() else {
                continue;
            };

            match directive.to_ascii_lowercase().as_str() {
                "budget" => {
                    constraints = constraints.budget(fields.number("budget")?);
                    saw_budget = true;
                }
                "cap" => {
                    let category = fields.category()?;
                    constraints = constraints.max_cost(category, fields.number("cap")?);
                }
                "min" => {
                    let category = fields.category()?;
                    constraints = constraints.min_count(category, fields.number("count")?);
                }
                "item" => {
                    let cost = fields.number("cost")?;
                    let expected_return = fields.number("return")?;
                    let category = fields.category()?;
                    let name = fields.rest("name")?;
                    catalog.add_item(Item::new(name, cost, expected_return, category));
                }
                _ => {
                    return Err(LoadError::UnknownDirective {
                        line: fields.line,
                        directive: directive.to_owned(),
                    });
                }
            }

            fields.finish()?;
        }

        if self.require_budget && !saw_budget {
            return Err(LoadError::MissingField {
                line: last_line,
                field: "budget",
            });
        }

        Ok(Problem::new(catalog.build()?, constraints.build()?))
    }

    /// Loads a problem from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Problem<T>, LoadError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a problem from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Problem<T>, LoadError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a problem from a string slice.
    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(&self, s: &str) -> Result<Problem<T>, LoadError> {
        self.from_reader(s.as_bytes())
    }
}

#[inline]
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// The remaining tokens of one directive line.
struct Fields<'a> {
    line: usize,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    #[inline]
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            tokens: text.split_whitespace(),
        }
    }

    #[inline]
    fn token(&mut self, field: &'static str) -> Result<&'a str, LoadError> {
        self.tokens.next().ok_or(LoadError::MissingField {
            line: self.line,
            field,
        })
    }

    fn number<N: FromStr>(&mut self, field: &'static str) -> Result<N, LoadError> {
        let token = self.token(field)?;
        token.parse::<N>().map_err(|_| LoadError::Parse {
            line: self.line,
            token: token.to_owned(),
            expected: std::any::type_name::<N>(),
        })
    }

    fn category(&mut self) -> Result<RiskCategory, LoadError> {
        let token = self.token("category")?;
        token.parse().map_err(|source| LoadError::Category {
            line: self.line,
            source,
        })
    }

    /// Joins all remaining tokens with single spaces.
    fn rest(&mut self, field: &'static str) -> Result<String, LoadError> {
        let words: Vec<&str> = self.tokens.by_ref().collect();
        if words.is_empty() {
            return Err(LoadError::MissingField {
                line: self.line,
                field,
            });
        }
        Ok(words.join(" "))
    }

    fn finish(mut self) -> Result<(), LoadError> {
        match self.tokens.next() {
            Some(token) => Err(LoadError::TrailingToken {
                line: self.line,
                token: token.to_owned(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::ItemIndex;

    const SMALL: &str = "
        # three options
        budget 15
        cap low 20
        cap high 100
        min low 1
        min 3 0

        item 10 20 low   A
        item 5  5  Low   B   # second
        item 100 50 3    Build a datacenter
    ";

    #[test]
    fn test_loads_catalog_and_constraints() {
        let problem = ProblemLoader::<i64>::new().from_str(SMALL).unwrap();
        let catalog = problem.catalog();
        let constraints = problem.constraints();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.name(ItemIndex::new(0)), "A");
        assert_eq!(catalog.name(ItemIndex::new(2)), "Build a datacenter");
        assert_eq!(catalog.category(ItemIndex::new(1)), RiskCategory::Low);
        assert_eq!(catalog.category(ItemIndex::new(2)), RiskCategory::High);
        assert_eq!(catalog.cost(ItemIndex::new(2)), 100);

        assert_eq!(constraints.budget(), 15);
        assert_eq!(constraints.max_cost(RiskCategory::Low), 20);
        assert_eq!(constraints.max_cost(RiskCategory::Medium), i64::MAX);
        assert_eq!(constraints.min_count(RiskCategory::Low), 1);
        assert_eq!(constraints.min_count(RiskCategory::High), 0);
    }

    #[test]
    fn test_parse_error_reports_line_and_token() {
        let err = ProblemLoader::<i64>::new()
            .from_str("budget 10\nitem ten 5 low A\n")
            .unwrap_err();
        match err {
            LoadError::Parse { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "ten");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_directive_and_category() {
        let err = ProblemLoader::<i64>::new()
            .from_str("limit 10\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::UnknownDirective { line: 1, .. }));

        let err = ProblemLoader::<i64>::new()
            .from_str("\n\ncap extreme 10\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::Category { line: 3, .. }));
        assert_eq!(err.to_string(), "line 3: unknown risk category 'extreme'");
    }

    #[test]
    fn test_missing_fields_and_trailing_tokens() {
        let err = ProblemLoader::<i64>::new()
            .from_str("item 1 2 low\n")
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField {
                line: 1,
                field: "name"
            }
        ));

        let err = ProblemLoader::<i64>::new()
            .from_str("budget 10 20\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::TrailingToken { line: 1, .. }));
    }

    #[test]
    fn test_invalid_configuration_is_wrapped() {
        let err = ProblemLoader::<i64>::new()
            .from_str("item -3 2 low A\n")
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::Model(ModelError::NegativeCost { item: 0 })
        ));

        let err = ProblemLoader::<i64>::new()
            .from_str("budget -1\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::Model(ModelError::NegativeBudget)));
    }

    #[test]
    fn test_require_budget() {
        let text = "item 1 1 low A\n";
        assert!(ProblemLoader::<i64>::new().from_str(text).is_ok());

        let err = ProblemLoader::<i64>::new()
            .require_budget(true)
            .from_str(text)
            .unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingField {
                field: "budget",
                ..
            }
        ));
    }

    #[test]
    fn test_from_path_reports_io_errors() {
        let err = ProblemLoader::<i64>::new()
            .from_path("/definitely/not/here.allot")
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
