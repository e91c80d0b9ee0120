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


//! # Model Loading
//!
//! `LoadedModel::load` copies a `CpModel` into a fresh Pumpkin solver:
//!
//! - every variable becomes a bounded integer with the same domain;
//! - linear constraints become one or two `≤` rows, or one `=` row when
//!   both sides meet;
//! - multiplication and max equalities map onto the engine's own
//!   `times` and `maximum` constraints;
//! - each pair of rectangles in a no-overlap-2D constraint becomes a clause
//!   over half-reified separations (left, right, below, above) plus one
//!   escape literal per side that may shrink to zero;
//! - the objective is channelled into a dedicated variable. A model without
//!   an objective is given a constant one, so every run is an optimisation
//!   run.
//!
//! The engine works on `i32`. Any bound or coefficient outside that range is
//! reported as `TranslationError::ValueOutOfRange`.

use crate::error::TranslationError;
use lotplan_cp::{
    constraint::{Constraint, LinearConstraint},
    model::{CpModel, ObjectiveSense},
    stats::SearchStatistics,
    var::{IntVar, IntervalVar},
};
use lotplan_core::num::SolverNumeric;
use pumpkin_solver::{
    Solver, constraints,
    results::{OptimisationResult, ProblemSolution},
    termination::TerminationCondition,
    variables::{AffineView, DomainId, Literal, TransformableVariable},
};

#[inline]
fn narrow<T>(value: T, what: &'static str) -> Result<i32, TranslationError>
where
    T: SolverNumeric,
{
    let wide: i64 = value.into();
    i32::try_from(wide).map_err(|_| TranslationError::ValueOutOfRange { what, value: wide })
}

#[inline]
fn negate(value: i32, what: &'static str) -> Result<i32, TranslationError> {
    value
        .checked_neg()
        .ok_or(TranslationError::ValueOutOfRange {
            what,
            value: i64::from(value),
        })
}

/// One axis of a rectangle as engine variables.
#[derive(Clone, Copy, Debug)]
struct Axis {
    start: DomainId,
    size: DomainId,
    end: DomainId,
    may_vanish: bool,
}

/// What the engine reported, with values in model variable order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineOutcome {
    /// The search space was exhausted; the values are optimal.
    Proven(Vec<i64>),
    /// The termination condition fired after at least one solution.
    Stopped(Vec<i64>),
    /// The search space holds no solution.
    Unsatisfiable,
    /// The termination condition fired before any solution.
    Unknown,
}

/// A Pumpkin solver holding a translated `CpModel`.
pub struct LoadedModel {
    solver: Solver,
    domains: Vec<DomainId>,
    objective: DomainId,
    sense: ObjectiveSense,
    statistics: SearchStatistics,
    site: (usize, &'static str),
}

impl LoadedModel {
    /// Loads `model` into a fresh engine.
    ///
    /// The model is expected to have passed `CpModel::validate`.
    pub fn load<T>(model: &CpModel<T>) -> Result<Self, TranslationError>
    where
        T: SolverNumeric,
    {
        let mut solver = Solver::default();
        let mut statistics = SearchStatistics::default();

        let mut domains = Vec::with_capacity(model.num_vars());
        for var in model.vars() {
            let bounds = model.var_bounds(var);
            let lower = narrow(bounds.lower(), "lower bound")?;
            let upper = narrow(bounds.upper(), "upper bound")?;
            domains.push(solver.new_bounded_integer(lower, upper));
            statistics.on_variable_created();
        }

        // Placeholder until the objective is posted below.
        let objective = solver.new_bounded_integer(0, 0);
        statistics.on_variable_created();

        let mut loaded = Self {
            solver,
            domains,
            objective,
            sense: ObjectiveSense::Maximize,
            statistics,
            site: (0, "Model"),
        };

        for (index, constraint) in model.constraints().iter().enumerate() {
            loaded.site = (index, constraint.kind_name());
            loaded.post_constraint(model, constraint)?;
        }

        loaded.site = (model.num_constraints(), "Objective");
        loaded.post_objective(model)?;

        Ok(loaded)
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    #[inline]
    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    /// Runs the engine under `termination` and reads the best solution back
    /// in model variable order.
    pub fn run<Tm>(&mut self, termination: &mut Tm) -> EngineOutcome
    where
        Tm: TerminationCondition,
    {
        let mut brancher = self.solver.default_brancher_over_all_propositional_variables();
        let result = match self.sense {
            ObjectiveSense::Maximize => self.solver.maximise(&mut brancher, termination, self.objective),
            ObjectiveSense::Minimize => self.solver.minimise(&mut brancher, termination, self.objective),
        };

        match result {
            OptimisationResult::Optimal(solution) => EngineOutcome::Proven(self.read_values(&solution)),
            OptimisationResult::Satisfiable(solution) => EngineOutcome::Stopped(self.read_values(&solution)),
            OptimisationResult::Unsatisfiable => EngineOutcome::Unsatisfiable,
            OptimisationResult::Unknown => EngineOutcome::Unknown,
        }
    }

    fn read_values<S>(&self, solution: &S) -> Vec<i64>
    where
        S: ProblemSolution,
    {
        self.domains
            .iter()
            .map(|&domain| i64::from(solution.get_integer_value(domain)))
            .collect()
    }

    #[inline]
    fn domain(&self, var: IntVar) -> DomainId {
        self.domains[var.index().get()]
    }

    #[inline]
    fn root_failure(&self) -> TranslationError {
        TranslationError::RootInfeasible {
            constraint: self.site.0,
            kind: self.site.1,
        }
    }

    #[inline]
    fn posted<E>(&mut self, result: Result<(), E>) -> Result<(), TranslationError> {
        match result {
            Ok(()) => {
                self.statistics.on_constraint_posted();
                Ok(())
            }
            Err(_) => Err(self.root_failure()),
        }
    }

    fn post_constraint<T>(&mut self, model: &CpModel<T>, constraint: &Constraint<T>) -> Result<(), TranslationError>
    where
        T: SolverNumeric,
    {
        match constraint {
            Constraint::Linear(linear) => self.post_linear(linear),
            Constraint::MultiplicationEquality { target, factors } => {
                let (a, b) = (self.domain(factors[0]), self.domain(factors[1]));
                let target = self.domain(*target);
                let result = self.solver.add_constraint(constraints::times(a, b, target)).post();
                self.posted(result)
            }
            Constraint::MaxEquality { target, operands } => {
                let array: Vec<DomainId> = operands.iter().map(|&v| self.domain(v)).collect();
                let target = self.domain(*target);
                let result = self.solver.add_constraint(constraints::maximum(array, target)).post();
                self.posted(result)
            }
            Constraint::NoOverlap2D {
                x_intervals,
                y_intervals,
            } => self.post_no_overlap(model, x_intervals, y_intervals),
        }
    }

    fn scaled_terms<T>(&self, terms: &[(IntVar, T)], negated: bool) -> Result<Vec<AffineView<DomainId>>, TranslationError>
    where
        T: SolverNumeric,
    {
        terms
            .iter()
            .map(|&(var, coefficient)| {
                let scale = narrow(coefficient, "coefficient")?;
                let scale = if negated { negate(scale, "coefficient")? } else { scale };
                Ok(self.domain(var).scaled(scale))
            })
            .collect()
    }

    fn post_linear<T>(&mut self, linear: &LinearConstraint<T>) -> Result<(), TranslationError>
    where
        T: SolverNumeric,
    {
        let lower = (linear.lower() != T::min_value())
            .then(|| narrow(linear.lower(), "lower bound"))
            .transpose()?;
        let upper = (linear.upper() != T::max_value())
            .then(|| narrow(linear.upper(), "upper bound"))
            .transpose()?;

        if linear.terms().is_empty() {
            let holds = lower.is_none_or(|l| l <= 0) && upper.is_none_or(|u| u >= 0);
            return if holds { Ok(()) } else { Err(self.root_failure()) };
        }

        if let (Some(l), Some(u)) = (lower, upper) {
            if l == u {
                let terms = self.scaled_terms(linear.terms(), false)?;
                let result = self.solver.add_constraint(constraints::equals(terms, l)).post();
                return self.posted(result);
            }
        }

        if let Some(u) = upper {
            let terms = self.scaled_terms(linear.terms(), false)?;
            let result = self
                .solver
                .add_constraint(constraints::less_than_or_equals(terms, u))
                .post();
            self.posted(result)?;
        }
        if let Some(l) = lower {
            let terms = self.scaled_terms(linear.terms(), true)?;
            let rhs = negate(l, "lower bound")?;
            let result = self
                .solver
                .add_constraint(constraints::less_than_or_equals(terms, rhs))
                .post();
            self.posted(result)?;
        }
        Ok(())
    }

    fn axis<T>(&self, model: &CpModel<T>, interval: IntervalVar) -> Axis
    where
        T: SolverNumeric,
    {
        let data = model.interval(interval);
        Axis {
            start: self.domain(data.start()),
            size: self.domain(data.size()),
            end: self.domain(data.end()),
            may_vanish: model.var_bounds(data.size()).lower() <= T::zero(),
        }
    }

    fn post_no_overlap<T>(
        &mut self,
        model: &CpModel<T>,
        x_intervals: &[IntervalVar],
        y_intervals: &[IntervalVar],
    ) -> Result<(), TranslationError>
    where
        T: SolverNumeric,
    {
        let rects: Vec<(Axis, Axis)> = x_intervals
            .iter()
            .zip(y_intervals.iter())
            .map(|(&x, &y)| (self.axis(model, x), self.axis(model, y)))
            .collect();

        for (i, a) in rects.iter().enumerate() {
            for b in &rects[i + 1..] {
                self.post_disjoint(a, b)?;
            }
        }
        Ok(())
    }

    /// `a` and `b` are separated along some axis, or one of them is empty.
    fn post_disjoint(&mut self, a: &(Axis, Axis), b: &(Axis, Axis)) -> Result<(), TranslationError> {
        let mut clause = Vec::with_capacity(8);
        for (before, after) in [(a.0, b.0), (b.0, a.0), (a.1, b.1), (b.1, a.1)] {
            clause.push(self.precedes(before, after)?);
        }
        for axis in [a.0, a.1, b.0, b.1] {
            if axis.may_vanish {
                clause.push(self.vanishes(axis)?);
            }
        }
        let result = self.solver.add_clause(clause);
        self.posted(result)
    }

    /// A literal implying `before.end <= after.start`.
    fn precedes(&mut self, before: Axis, after: Axis) -> Result<Literal, TranslationError> {
        let literal = self.solver.new_literal();
        self.statistics.on_literal_created();
        let terms = vec![before.end.scaled(1), after.start.scaled(-1)];
        let result = self
            .solver
            .add_constraint(constraints::less_than_or_equals(terms, 0))
            .implied_by(literal);
        self.posted(result)?;
        Ok(literal)
    }

    /// A literal implying `axis.size <= 0`.
    fn vanishes(&mut self, axis: Axis) -> Result<Literal, TranslationError> {
        let literal = self.solver.new_literal();
        self.statistics.on_literal_created();
        let terms = vec![axis.size.scaled(1)];
        let result = self
            .solver
            .add_constraint(constraints::less_than_or_equals(terms, 0))
            .implied_by(literal);
        self.posted(result)?;
        Ok(literal)
    }

    /// Channels the objective expression into `self.objective`.
    fn post_objective<T>(&mut self, model: &CpModel<T>) -> Result<(), TranslationError>
    where
        T: SolverNumeric,
    {
        let Some(objective) = model.objective() else {
            return Ok(());
        };
        let expr = objective.expr().normalized();
        let constant: i64 = expr.constant_term().into();

        let (mut lower, mut upper) = (constant, constant);
        for &(var, coefficient) in expr.terms() {
            let bounds = model.var_bounds(var);
            let coefficient: i64 = coefficient.into();
            let at_lower = coefficient.saturating_mul(bounds.lower().into());
            let at_upper = coefficient.saturating_mul(bounds.upper().into());
            lower = lower.saturating_add(at_lower.min(at_upper));
            upper = upper.saturating_add(at_lower.max(at_upper));
        }
        let lower = narrow(lower, "objective lower bound")?;
        let upper = narrow(upper, "objective upper bound")?;

        self.objective = self.solver.new_bounded_integer(lower, upper);
        self.statistics.on_variable_created();
        self.sense = objective.sense();

        let mut terms = self.scaled_terms(expr.terms(), false)?;
        terms.push(self.objective.scaled(-1));
        let rhs = negate(narrow(constant, "objective constant")?, "objective constant")?;
        let result = self.solver.add_constraint(constraints::equals(terms, rhs)).post();
        self.posted(result)
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("domains", &self.domains.len())
            .field("sense", &self.sense)
            .field("statistics", &self.statistics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotplan_cp::{builder::CpModelBuilder, expr::LinearExpr};

    type IntegerType = i64;

    #[test]
    fn test_load_counts_variables_and_constraints() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let x = b.new_int_var(0, 10, "x");
        let y = b.new_int_var(0, 10, "y");
        b.add_le(LinearExpr::sum([x, y]), LinearExpr::constant(12));
        let loaded = LoadedModel::load(&b.build()).unwrap();
        assert_eq!(loaded.num_domains(), 2);
        // Two model variables plus the constant objective.
        assert_eq!(loaded.statistics().variables_created, 3);
        assert_eq!(loaded.statistics().constraints_posted, 1);
    }

    #[test]
    fn test_no_overlap_pair_creates_separation_literals() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let ax = b.new_fixed_interval(0, 2, "ax");
        let ay = b.new_fixed_interval(0, 2, "ay");
        let s = b.new_int_var(0, 8, "s");
        let z = b.new_int_var(0, 3, "z");
        let e = b.new_int_var(0, 11, "e");
        let bx = b.new_interval_var(s, z, e, "bx");
        let by = b.new_fixed_interval(0, 2, "by");
        b.add_no_overlap_2d([ax, bx], [ay, by]);
        let loaded = LoadedModel::load(&b.build()).unwrap();
        // Four separations plus one escape for the only side that may be empty.
        assert_eq!(loaded.statistics().literals_created, 5);
    }

    #[test]
    fn test_wide_bound_is_out_of_range() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        b.new_int_var(0, 1 << 40, "wide");
        let err = LoadedModel::load(&b.build()).unwrap_err();
        assert_eq!(
            err,
            TranslationError::ValueOutOfRange {
                what: "upper bound",
                value: 1 << 40
            }
        );
    }

    #[test]
    fn test_violated_constant_row_fails_at_root() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        b.add_ge(LinearExpr::constant(1), LinearExpr::constant(2));
        let err = LoadedModel::load(&b.build()).unwrap_err();
        assert_eq!(
            err,
            TranslationError::RootInfeasible {
                constraint: 0,
                kind: "Linear"
            }
        );
    }
}
