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

//! # Constraint Model Builder
//!
//! `CpModelBuilder` is the only way to create a `CpModel`. Every `new_*`
//! method returns a `Copy` handle; every `add_*` method returns the index of
//! the posted constraint.
//!
//! ## Usage
//!
//! ```rust
//! use lotplan_cp::builder::CpModelBuilder;
//! use lotplan_cp::expr::LinearExpr;
//!
//! let mut b = CpModelBuilder::<i64>::new();
//! let w = b.new_int_var(0, 10, "w");
//! let h = b.new_int_var(0, 10, "h");
//! let area = b.new_int_var(0, 100, "area");
//! b.add_multiplication_equality(area, [w, h]);
//! b.add_le(LinearExpr::sum([w, h]), LinearExpr::constant(12));
//! b.maximize(area);
//!
//! let model = b.build();
//! assert_eq!(model.num_vars(), 3);
//! assert!(model.validate().is_ok());
//! ```

use crate::{
    constraint::{Constraint, LinearConstraint},
    expr::LinearExpr,
    index::{ConstraintIndex, IntervalIndex, VarIndex},
    model::{CpModel, Objective, ObjectiveSense},
    var::{IntVar, IntVarData, IntervalVar, IntervalVarData},
};
use lotplan_core::{math::bounds::Bounds, num::SolverNumeric};
use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
pub struct CpModelBuilder<T> {
    vars: Vec<IntVarData<T>>,
    intervals: Vec<IntervalVarData>,
    constraints: Vec<Constraint<T>>,
    objective: Option<Objective<T>>,
    names: FxHashMap<String, IntVar>,
    constants: FxHashMap<T, IntVar>,
}

impl<T> Default for CpModelBuilder<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CpModelBuilder<T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            vars: Vec::new(),
            intervals: Vec::new(),
            constraints: Vec::new(),
            objective: None,
            names: FxHashMap::default(),
            constants: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Creates an integer variable with domain `[lower, upper]`.
    ///
    /// An empty domain is accepted here and reported by
    /// `CpModel::validate`.
    pub fn new_int_var<S>(&mut self, lower: T, upper: T, name: S) -> IntVar
    where
        S: Into<String>,
    {
        let var = IntVar::new(VarIndex::new(self.vars.len()));
        let name = name.into();
        self.names.entry(name.clone()).or_insert(var);
        self.vars.push(IntVarData::new(Bounds::new(lower, upper), name));
        var
    }

    /// Returns a variable fixed to `value`. Repeated calls with the same
    /// value share one variable.
    pub fn new_constant(&mut self, value: T) -> IntVar {
        if let Some(&var) = self.constants.get(&value) {
            return var;
        }
        let var = self.new_int_var(value, value, format!("const({})", value));
        self.constants.insert(value, var);
        var
    }

    /// Creates an interval token over existing variables and posts
    /// `start + size == end`.
    pub fn new_interval_var<S>(&mut self, start: IntVar, size: IntVar, end: IntVar, name: S) -> IntervalVar
    where
        S: Into<String>,
    {
        let link = LinearExpr::from(start) + LinearExpr::from(size) - LinearExpr::from(end);
        self.add_linear(&link, T::zero(), T::zero());

        let interval = IntervalVar::new(IntervalIndex::new(self.intervals.len()));
        self.intervals
            .push(IntervalVarData::new(start, size, end, name.into()));
        interval
    }

    /// Creates an interval token with literal start and size.
    pub fn new_fixed_interval<S>(&mut self, start: T, size: T, name: S) -> IntervalVar
    where
        S: Into<String>,
    {
        let s = self.new_constant(start);
        let z = self.new_constant(size);
        let e = self.new_constant(start.saturating_add_val(size));
        self.new_interval_var(s, z, e, name)
    }

    fn push(&mut self, constraint: Constraint<T>) -> ConstraintIndex {
        let index = ConstraintIndex::new(self.constraints.len());
        self.constraints.push(constraint);
        index
    }

    /// Posts `lower <= expr <= upper`.
    pub fn add_linear(&mut self, expr: &LinearExpr<T>, lower: T, upper: T) -> ConstraintIndex {
        self.push(Constraint::Linear(LinearConstraint::new(expr, lower, upper)))
    }

    /// Posts `lhs == rhs`.
    pub fn add_eq<L, R>(&mut self, lhs: L, rhs: R) -> ConstraintIndex
    where
        L: Into<LinearExpr<T>>,
        R: Into<LinearExpr<T>>,
    {
        let diff = lhs.into() - rhs.into();
        self.add_linear(&diff, T::zero(), T::zero())
    }

    /// Posts `lhs >= rhs`.
    pub fn add_ge<L, R>(&mut self, lhs: L, rhs: R) -> ConstraintIndex
    where
        L: Into<LinearExpr<T>>,
        R: Into<LinearExpr<T>>,
    {
        let diff = lhs.into() - rhs.into();
        self.add_linear(&diff, T::zero(), T::max_value())
    }

    /// Posts `lhs <= rhs`.
    pub fn add_le<L, R>(&mut self, lhs: L, rhs: R) -> ConstraintIndex
    where
        L: Into<LinearExpr<T>>,
        R: Into<LinearExpr<T>>,
    {
        let diff = lhs.into() - rhs.into();
        self.add_linear(&diff, T::min_value(), T::zero())
    }

    /// Posts `target == Π factors`. Only two factors are supported; other
    /// arities are reported by `CpModel::validate`.
    pub fn add_multiplication_equality<I>(&mut self, target: IntVar, factors: I) -> ConstraintIndex
    where
        I: IntoIterator<Item = IntVar>,
    {
        self.push(Constraint::MultiplicationEquality {
            target,
            factors: factors.into_iter().collect(),
        })
    }

    /// Posts `target == max(operands)`.
    pub fn add_max_equality<I>(&mut self, target: IntVar, operands: I) -> ConstraintIndex
    where
        I: IntoIterator<Item = IntVar>,
    {
        self.push(Constraint::MaxEquality {
            target,
            operands: operands.into_iter().collect(),
        })
    }

    /// Posts pairwise disjointness of the rectangles `x[k] × y[k]`.
    pub fn add_no_overlap_2d<X, Y>(&mut self, x_intervals: X, y_intervals: Y) -> ConstraintIndex
    where
        X: IntoIterator<Item = IntervalVar>,
        Y: IntoIterator<Item = IntervalVar>,
    {
        self.push(Constraint::NoOverlap2D {
            x_intervals: x_intervals.into_iter().collect(),
            y_intervals: y_intervals.into_iter().collect(),
        })
    }

    /// Sets the objective to maximize `expr`, replacing any earlier one.
    pub fn maximize<E>(&mut self, expr: E)
    where
        E: Into<LinearExpr<T>>,
    {
        self.objective = Some(Objective::new(expr.into(), ObjectiveSense::Maximize));
    }

    /// Sets the objective to minimize `expr`, replacing any earlier one.
    pub fn minimize<E>(&mut self, expr: E)
    where
        E: Into<LinearExpr<T>>,
    {
        self.objective = Some(Objective::new(expr.into(), ObjectiveSense::Minimize));
    }

    #[inline]
    pub fn find_var(&self, name: &str) -> Option<IntVar> {
        self.names.get(name).copied()
    }

    /// Freezes the builder into an immutable model.
    pub fn build(self) -> CpModel<T> {
        CpModel {
            vars: self.vars,
            intervals: self.intervals,
            constraints: self.constraints,
            objective: self.objective,
            names: self.names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    type IntegerType = i64;

    #[test]
    fn test_interval_posts_link_constraint() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let s = b.new_int_var(0, 10, "s");
        let z = b.new_int_var(0, 10, "z");
        let e = b.new_int_var(0, 10, "e");
        let iv = b.new_interval_var(s, z, e, "iv");
        let model = b.build();

        assert_eq!(model.num_constraints(), 1);
        assert_eq!(model.interval(iv).start(), s);
        assert!(model.is_feasible(&[2, 3, 5]));
        assert!(!model.is_feasible(&[2, 3, 6]));
    }

    #[test]
    fn test_constants_are_shared() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let a = b.new_constant(5);
        let c = b.new_constant(5);
        let d = b.new_constant(6);
        assert_eq!(a, c);
        assert_ne!(a, d);
        assert_eq!(b.num_vars(), 2);
    }

    #[test]
    fn test_fixed_interval_uses_literal_end() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let iv = b.new_fixed_interval(10, 7, "flood_x");
        let model = b.build();
        let data = model.interval(iv);
        assert_eq!(model.var_bounds(data.end()).lower(), 17);
        assert!(model.var_bounds(data.size()).is_fixed());
    }

    #[test]
    fn test_find_var_by_name() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let x = b.new_int_var(0, 1, "x");
        let model = b.build();
        assert_eq!(model.find_var("x"), Some(x));
        assert_eq!(model.find_var("y"), None);
        assert_eq!(model.var_name(x), "x");
    }

    #[test]
    fn test_ge_and_le_semantics() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let x = b.new_int_var(0, 10, "x");
        let y = b.new_int_var(0, 10, "y");
        b.add_ge(LinearExpr::from(x) * 10, y);
        b.add_le(x, LinearExpr::constant(3));
        let model = b.build();
        assert!(model.is_feasible(&[1, 10]));
        assert!(!model.is_feasible(&[0, 1]));
        assert!(!model.is_feasible(&[4, 0]));
    }

    #[test]
    fn test_validate_reports_empty_domain() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        b.new_int_var(0, -5, "building_0_x_start");
        let err = b.build().validate().unwrap_err();
        assert_eq!(
            err,
            ModelError::EmptyDomain {
                name: "building_0_x_start".to_string(),
                lower: 0,
                upper: -5
            }
        );
    }

    #[test]
    fn test_validate_reports_product_arity() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let t = b.new_int_var(0, 10, "t");
        let a = b.new_int_var(0, 10, "a");
        b.add_multiplication_equality(t, [a]);
        assert!(matches!(
            b.build().validate(),
            Err(ModelError::InvalidProductArity { factors: 1, .. })
        ));
    }

    #[test]
    fn test_validate_reports_mismatched_no_overlap() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let x0 = b.new_fixed_interval(0, 1, "x0");
        let x1 = b.new_fixed_interval(1, 1, "x1");
        let y0 = b.new_fixed_interval(0, 1, "y0");
        b.add_no_overlap_2d([x0, x1], [y0]);
        assert!(matches!(
            b.build().validate(),
            Err(ModelError::MismatchedNoOverlap { x: 2, y: 1, .. })
        ));
    }

    #[test]
    fn test_validate_reports_negative_interval_size() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let s = b.new_int_var(0, 5, "s");
        let z = b.new_int_var(-1, 5, "z");
        let e = b.new_int_var(0, 5, "e");
        b.new_interval_var(s, z, e, "iv");
        assert!(matches!(
            b.build().validate(),
            Err(ModelError::NegativeIntervalSize { lower: -1, .. })
        ));
    }

    #[test]
    fn test_no_overlap_zero_size_is_compatible() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let ax = b.new_fixed_interval(0, 5, "ax");
        let ay = b.new_fixed_interval(0, 5, "ay");
        let bx = b.new_fixed_interval(2, 0, "bx");
        let by = b.new_fixed_interval(2, 2, "by");
        b.add_no_overlap_2d([ax, bx], [ay, by]);
        let model = b.build();
        let values: Vec<IntegerType> = model.vars().map(|v| model.var_bounds(v).lower()).collect();
        assert!(model.is_feasible(&values));
    }

    #[test]
    fn test_no_overlap_detects_overlap() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let ax = b.new_fixed_interval(0, 5, "ax");
        let ay = b.new_fixed_interval(0, 5, "ay");
        let bx = b.new_fixed_interval(4, 3, "bx");
        let by = b.new_fixed_interval(4, 3, "by");
        let c = b.add_no_overlap_2d([ax, bx], [ay, by]);
        let model = b.build();
        let values: Vec<IntegerType> = model.vars().map(|v| model.var_bounds(v).lower()).collect();
        assert_eq!(model.first_violation(&values), Ok(Some(c)));
    }
}
