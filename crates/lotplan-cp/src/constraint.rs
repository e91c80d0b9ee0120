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

use crate::{expr::LinearExpr, model::CpModel, var::{IntVar, IntervalVar}};
use lotplan_core::{math::interval::ClosedOpenInterval, num::SolverNumeric};
use smallvec::SmallVec;

/// `lower <= Σ aᵢ·xᵢ <= upper` with the constant folded into the bounds.
///
/// An unbounded side is stored as `T::min_value()` / `T::max_value()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearConstraint<T> {
    terms: Vec<(IntVar, T)>,
    lower: T,
    upper: T,
}

impl<T> LinearConstraint<T>
where
    T: SolverNumeric,
{
    /// Builds `lower <= expr <= upper`. Duplicate variables in `expr` are
    /// merged.
    pub fn new(expr: &LinearExpr<T>, lower: T, upper: T) -> Self {
        let normalized = expr.normalized();
        let constant = normalized.constant_term();
        let shift = |bound: T| {
            if bound == T::min_value() || bound == T::max_value() {
                bound
            } else {
                bound.saturating_sub_val(constant)
            }
        };
        Self {
            terms: normalized.terms().to_vec(),
            lower: shift(lower),
            upper: shift(upper),
        }
    }

    #[inline]
    pub fn terms(&self) -> &[(IntVar, T)] {
        &self.terms
    }

    #[inline]
    pub fn lower(&self) -> T {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> T {
        self.upper
    }

    /// `Σ aᵢ·vᵢ` for a full assignment.
    pub fn activity(&self, values: &[T]) -> T {
        self.terms.iter().fold(T::zero(), |acc, &(var, c)| {
            acc.saturating_add_val(c.saturating_mul_val(values[var.index().get()]))
        })
    }
}

/// A constraint stored in a `CpModel`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint<T> {
    Linear(LinearConstraint<T>),
    /// `target == Π factors`. Valid models have exactly two factors.
    MultiplicationEquality {
        target: IntVar,
        factors: SmallVec<[IntVar; 2]>,
    },
    /// `target == max(operands)`.
    MaxEquality { target: IntVar, operands: Vec<IntVar> },
    /// Rectangle `k` spans `x_intervals[k] × y_intervals[k]`; no two
    /// rectangles overlap.
    NoOverlap2D {
        x_intervals: Vec<IntervalVar>,
        y_intervals: Vec<IntervalVar>,
    },
}

impl<T> Constraint<T>
where
    T: SolverNumeric,
{
    /// A short name of the constraint kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Constraint::Linear(_) => "Linear",
            Constraint::MultiplicationEquality { .. } => "MultiplicationEquality",
            Constraint::MaxEquality { .. } => "MaxEquality",
            Constraint::NoOverlap2D { .. } => "NoOverlap2D",
        }
    }

    /// Every variable the constraint reads, in a stable order. Interval
    /// tokens contribute start, size and end.
    pub fn variables(&self, model: &CpModel<T>) -> Vec<IntVar> {
        match self {
            Constraint::Linear(lin) => lin.terms().iter().map(|&(v, _)| v).collect(),
            Constraint::MultiplicationEquality { target, factors } => {
                std::iter::once(*target).chain(factors.iter().copied()).collect()
            }
            Constraint::MaxEquality { target, operands } => {
                std::iter::once(*target).chain(operands.iter().copied()).collect()
            }
            Constraint::NoOverlap2D {
                x_intervals,
                y_intervals,
            } => x_intervals
                .iter()
                .chain(y_intervals.iter())
                .flat_map(|&iv| {
                    let data = model.interval(iv);
                    [data.start(), data.size(), data.end()]
                })
                .collect(),
        }
    }

    /// Checks the constraint against a full assignment.
    ///
    /// # Panics
    ///
    /// Panics if `values` does not cover every variable of the model.
    pub fn is_satisfied(&self, model: &CpModel<T>, values: &[T]) -> bool {
        let value = |v: IntVar| values[v.index().get()];
        match self {
            Constraint::Linear(lin) => {
                let activity = lin.activity(values);
                lin.lower() <= activity && activity <= lin.upper()
            }
            Constraint::MultiplicationEquality { target, factors } => {
                let product = factors
                    .iter()
                    .fold(T::one(), |acc, &f| acc.saturating_mul_val(value(f)));
                product == value(*target)
            }
            Constraint::MaxEquality { target, operands } => operands
                .iter()
                .map(|&o| value(o))
                .max()
                .is_some_and(|m| m == value(*target)),
            Constraint::NoOverlap2D {
                x_intervals,
                y_intervals,
            } => {
                let rect = |iv: IntervalVar| {
                    let data = model.interval(iv);
                    ClosedOpenInterval::try_new(value(data.start()), value(data.end()))
                };
                let mut rects = Vec::with_capacity(x_intervals.len());
                for (&x, &y) in x_intervals.iter().zip(y_intervals.iter()) {
                    match (rect(x), rect(y)) {
                        (Some(rx), Some(ry)) => rects.push((rx, ry)),
                        _ => return false,
                    }
                }
                rects.iter().enumerate().all(|(i, (xi, yi))| {
                    rects[i + 1..]
                        .iter()
                        .all(|(xj, yj)| !(xi.overlaps(*xj) && yi.overlaps(*yj)))
                })
            }
        }
    }
}

impl<T> std::fmt::Display for Constraint<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Linear(lin) => write!(
                f,
                "Linear({} terms, [{}, {}])",
                lin.terms().len(),
                lin.lower(),
                lin.upper()
            ),
            Constraint::MultiplicationEquality { target, factors } => {
                write!(f, "MultiplicationEquality({} = Π{} factors)", target, factors.len())
            }
            Constraint::MaxEquality { target, operands } => {
                write!(f, "MaxEquality({} = max of {})", target, operands.len())
            }
            Constraint::NoOverlap2D { x_intervals, .. } => {
                write!(f, "NoOverlap2D({} rectangles)", x_intervals.len())
            }
        }
    }
}
