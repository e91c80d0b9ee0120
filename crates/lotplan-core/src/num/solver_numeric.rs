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
//! `SolverNumeric` collects the integer capabilities the model and the
//! solvers require into a single bound: primitive signed integer semantics,
//! lossless conversion to and from `i64` and saturating arithmetic. Generic
//! signatures across the workspace use this one trait instead of repeating
//! the list.
//!
//! In practice `i64` is the instantiated type; the `From<i64>` requirement
//! excludes the narrower integers.

use crate::num::ops::saturating_arithmetic::{
    SaturatingAddVal, SaturatingMulVal, SaturatingNegVal, SaturatingSubVal,
};
use num_traits::{FromPrimitive, PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for integer types usable as variable values.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + From<i64>
    + Into<i64>
    + std::fmt::Debug
    + std::fmt::Display
    + SaturatingAddVal
    + SaturatingSubVal
    + SaturatingMulVal
    + SaturatingNegVal
    + Send
    + Sync
    + Hash
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + From<i64>
        + Into<i64>
        + std::fmt::Debug
        + std::fmt::Display
        + SaturatingAddVal
        + SaturatingSubVal
        + SaturatingMulVal
        + SaturatingNegVal
        + Send
        + Sync
        + Hash
{
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum_saturating<T: SolverNumeric>(values: &[T]) -> T {
        values
            .iter()
            .fold(T::zero(), |acc, &v| acc.saturating_add_val(v))
    }

    #[test]
    fn test_i64_is_solver_numeric() {
        assert_eq!(sum_saturating(&[1_i64, 2, 3]), 6);
        assert_eq!(sum_saturating(&[i64::MAX, 1]), i64::MAX);
    }
}
