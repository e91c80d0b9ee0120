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

use thiserror::Error;

/// A structural defect that makes a model unsolvable as stated.
///
/// Reported by `CpModel::validate`; solvers answer such models with a
/// `ModelInvalid` status instead of searching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("variable `{name}` has an empty domain [{lower}, {upper}]")]
    EmptyDomain { name: String, lower: i64, upper: i64 },

    #[error("interval `{name}` has a size variable that admits negative values (lower bound {lower})")]
    NegativeIntervalSize { name: String, lower: i64 },

    #[error("constraint {constraint} refers to unknown variable index {index}")]
    UnknownVariable { constraint: usize, index: usize },

    #[error("constraint {constraint} refers to unknown interval index {index}")]
    UnknownInterval { constraint: usize, index: usize },

    #[error("no-overlap constraint {constraint} has {x} x intervals but {y} y intervals")]
    MismatchedNoOverlap { constraint: usize, x: usize, y: usize },

    #[error("multiplication constraint {constraint} has {factors} factors, expected 2")]
    InvalidProductArity { constraint: usize, factors: usize },

    #[error("max-equality constraint {constraint} has no operands")]
    EmptyMaxEquality { constraint: usize },

    #[error("objective refers to unknown variable index {index}")]
    UnknownObjectiveVariable { index: usize },
}
