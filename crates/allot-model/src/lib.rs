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

//! # Allot Model
//!
//! **The Core Domain Model for the Allot Investment Selection Solver.**
//!
//! This crate defines the data structures used to describe an **investment
//! selection problem**: a fixed catalog of options, each with a cost, an
//! expected return, and a risk category, searched under a total budget,
//! per-category cost caps, and per-category minimum counts. It serves as the
//! interchange layer between the problem definition and the search engine
//! (`allot_search`).
//!
//! ## Architecture
//!
//! * **`index`**: The strongly typed `ItemIndex`.
//! * **`category`**: `RiskCategory` and the category-indexed `PerCategory` storage.
//! * **`model`**: `Catalog`, `Constraints`, their builders, and `ModelError`.
//! * **`selection`**: The bit-set backed include/exclude decisions.
//! * **`solution`**: A complete feasible selection with its objective values.
//! * **`loading`**: The line-oriented instance reader.
//! * **`reference`**: The built-in thirteen-option reference portfolio.
//! * **`report`**: Per-category aggregation and currency rendering.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Catalog positions and risk categories are distinct types.
//! 2.  **Memory Layout**: The catalog is a **Structure of Arrays**, so the search
//!     reads only the columns it needs.
//! 3.  **Fail-Fast**: Builders validate eagerly, including overflow of the
//!     catalog-wide sums, so the solver never encounters an invalid state.

pub mod category;
pub mod index;
pub mod loading;
pub mod model;
pub mod reference;
pub mod report;
pub mod selection;
pub mod solution;
