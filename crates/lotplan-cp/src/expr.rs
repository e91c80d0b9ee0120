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

//! Linear expressions `Σ aᵢ·xᵢ + c`.
//!
//! Expressions are plain values: they are built with `+`, `-`, `*` (by a
//! scalar) and unary `-`, and consumed by the builder when posting linear
//! constraints or the objective. Duplicate variables are allowed while
//! building and are merged by `LinearExpr::normalized`.

use crate::var::IntVar;
use lotplan_core::num::SolverNumeric;
use rustc_hash::FxHashMap;

/// A linear combination of integer variables plus a constant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearExpr<T> {
    terms: Vec<(IntVar, T)>,
    constant: T,
}

impl<T> Default for LinearExpr<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinearExpr<T>
where
    T: SolverNumeric,
{
    /// The empty expression, equal to zero.
    #[inline]
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
            constant: T::zero(),
        }
    }

    /// A constant expression.
    #[inline]
    pub fn constant(value: T) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// The expression `coefficient · var`.
    #[inline]
    pub fn term(var: IntVar, coefficient: T) -> Self {
        Self {
            terms: vec![(var, coefficient)],
            constant: T::zero(),
        }
    }

    /// The plain sum of the given variables.
    ///
    /// ```rust
    /// # use lotplan_cp::builder::CpModelBuilder;
    /// # use lotplan_cp::expr::LinearExpr;
    /// let mut b = CpModelBuilder::<i64>::new();
    /// let x = b.new_int_var(0, 5, "x");
    /// let y = b.new_int_var(0, 5, "y");
    /// let sum = LinearExpr::<i64>::sum([x, y]);
    /// assert_eq!(sum.terms().len(), 2);
    /// ```
    pub fn sum<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = IntVar>,
    {
        Self {
            terms: vars.into_iter().map(|v| (v, T::one())).collect(),
            constant: T::zero(),
        }
    }

    /// `Σ coefficient · var` over the given pairs.
    pub fn weighted_sum<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (IntVar, T)>,
    {
        Self {
            terms: terms.into_iter().collect(),
            constant: T::zero(),
        }
    }

    /// Appends a term, returning the extended expression.
    #[inline]
    pub fn with_term(mut self, var: IntVar, coefficient: T) -> Self {
        self.terms.push((var, coefficient));
        self
    }

    /// Adds to the constant part, returning the extended expression.
    #[inline]
    pub fn with_constant(mut self, value: T) -> Self {
        self.constant = self.constant.saturating_add_val(value);
        self
    }

    #[inline]
    pub fn terms(&self) -> &[(IntVar, T)] {
        &self.terms
    }

    #[inline]
    pub fn constant_term(&self) -> T {
        self.constant
    }

    #[inline]
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|&(_, c)| c.is_zero())
    }

    /// Merges duplicate variables and drops zero coefficients. The order of
    /// first appearance is kept so posting stays deterministic.
    pub fn normalized(&self) -> Self {
        let mut position: FxHashMap<IntVar, usize> = FxHashMap::default();
        let mut terms: Vec<(IntVar, T)> = Vec::with_capacity(self.terms.len());
        for &(var, coefficient) in &self.terms {
            match position.get(&var) {
                Some(&i) => terms[i].1 = terms[i].1.saturating_add_val(coefficient),
                None => {
                    position.insert(var, terms.len());
                    terms.push((var, coefficient));
                }
            }
        }
        terms.retain(|&(_, c)| !c.is_zero());
        Self {
            terms,
            constant: self.constant,
        }
    }

    /// Evaluates the expression against a full assignment indexed by
    /// variable index.
    ///
    /// # Panics
    ///
    /// Panics if a term refers to a variable outside `values`.
    pub fn evaluate(&self, values: &[T]) -> T {
        self.terms
            .iter()
            .fold(self.constant, |acc, &(var, coefficient)| {
                let index = var.index().get();
                assert!(
                    index < values.len(),
                    "called `LinearExpr::evaluate` with variable index out of bounds: the len is {} but the index is {}",
                    values.len(),
                    index
                );
                acc.saturating_add_val(coefficient.saturating_mul_val(values[index]))
            })
    }
}

impl<T> From<IntVar> for LinearExpr<T>
where
    T: SolverNumeric,
{
    #[inline]
    fn from(var: IntVar) -> Self {
        Self::term(var, T::one())
    }
}

impl<T> std::ops::Add for LinearExpr<T>
where
    T: SolverNumeric,
{
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self.terms.extend(rhs.terms);
        self.constant = self.constant.saturating_add_val(rhs.constant);
        self
    }
}

impl<T> std::ops::Neg for LinearExpr<T>
where
    T: SolverNumeric,
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            terms: self
                .terms
                .into_iter()
                .map(|(v, c)| (v, c.saturating_neg_val()))
                .collect(),
            constant: self.constant.saturating_neg_val(),
        }
    }
}

impl<T> std::ops::Sub for LinearExpr<T>
where
    T: SolverNumeric,
{
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl<T> std::ops::Mul<T> for LinearExpr<T>
where
    T: SolverNumeric,
{
    type Output = Self;

    fn mul(self, factor: T) -> Self::Output {
        Self {
            terms: self
                .terms
                .into_iter()
                .map(|(v, c)| (v, c.saturating_mul_val(factor)))
                .collect(),
            constant: self.constant.saturating_mul_val(factor),
        }
    }
}

impl<T> std::fmt::Display for LinearExpr<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for &(var, coefficient) in &self.terms {
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{}*x{}", coefficient, var.index().get())?;
            first = false;
        }
        if first || !self.constant.is_zero() {
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{}", self.constant)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::VarIndex;

    type IntegerType = i64;

    fn var(i: usize) -> IntVar {
        IntVar::new(VarIndex::new(i))
    }

    #[test]
    fn test_sum_and_evaluate() {
        let e = LinearExpr::<IntegerType>::sum([var(0), var(1), var(2)]);
        assert_eq!(e.evaluate(&[1, 2, 3]), 6);
    }

    #[test]
    fn test_scaling_and_subtraction() {
        // 10 * (p0 + p1) - (b0 + b1)
        let parking = LinearExpr::<IntegerType>::sum([var(0), var(1)]) * 10;
        let buildings = LinearExpr::sum([var(2), var(3)]);
        let e = parking - buildings;
        assert_eq!(e.evaluate(&[3, 1, 20, 15]), 5);
        assert_eq!(e.terms()[2], (var(2), -1));
    }

    #[test]
    fn test_normalized_merges_and_drops_zero() {
        let e = LinearExpr::<IntegerType>::term(var(0), 2)
            .with_term(var(1), 3)
            .with_term(var(0), -2)
            .with_constant(4);
        let n = e.normalized();
        assert_eq!(n.terms(), &[(var(1), 3)]);
        assert_eq!(n.constant_term(), 4);
        assert_eq!(n.evaluate(&[100, 2]), 10);
    }

    #[test]
    fn test_constant_expression() {
        let e = LinearExpr::<IntegerType>::constant(7);
        assert!(e.is_constant());
        assert_eq!(e.evaluate(&[]), 7);
        assert_eq!(format!("{}", e), "7");
    }

    #[test]
    fn test_display() {
        let e = LinearExpr::<IntegerType>::from(var(1)).with_constant(-2);
        assert_eq!(format!("{}", e), "1*x1 + -2");
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_evaluate_panics_on_short_assignment() {
        let e = LinearExpr::<IntegerType>::from(var(3));
        let _ = e.evaluate(&[1, 2]);
    }
}
