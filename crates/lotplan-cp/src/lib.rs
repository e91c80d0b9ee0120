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

//! # Lotplan CP
//!
//! A small declarative constraint programming layer over bounded integer
//! variables. A `CpModelBuilder` collects variables, interval tokens,
//! constraints and an objective, and produces an immutable `CpModel`. Solving happens elsewhere, behind the
//! `ConstraintSolver` trait; this crate only defines the contract and the
//! response types.
//!
//! ## Constraint vocabulary
//!
//! - linear: `lo <= Σ aᵢ·xᵢ <= hi` (also posted implicitly by every interval
//!   token as `start + size == end`)
//! - multiplication equality: `target == a · b`
//! - max equality: `target == max(x₁, …, xₙ)`
//! - no-overlap-2D: pairwise disjointness of rectangles given by one X and
//!   one Y interval token each; a rectangle with a zero-size side overlaps
//!   nothing
//!
//! ## Module map
//!
//! - `builder` / `model`: construction and the immutable model.
//! - `var`, `expr`, `constraint`: model vocabulary.
//! - `index`: typed indices.
//! - `error`: structural model defects reported by `CpModel::validate`.
//! - `response`, `stats`: what a solver returns.
//! - `solver`: the `ConstraintSolver` trait and `SolverParameters`.

pub mod builder;
pub mod constraint;
pub mod error;
pub mod expr;
pub mod index;
pub mod model;
pub mod response;
pub mod solver;
pub mod stats;
pub mod var;
