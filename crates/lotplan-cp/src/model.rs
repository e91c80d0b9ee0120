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

//! The immutable constraint model.
//!
//! A `CpModel` is produced by `CpModelBuilder::build` and never changes
//! afterwards. Solvers read it, copy the initial domains into their own
//! search state and report values indexed by `IntVar`.

use crate::{
    constraint::Constraint,
    error::ModelError,
    expr::LinearExpr,
    index::ConstraintIndex,
    var::{IntVar, IntVarData, IntervalVar, IntervalVarData},
};
use lotplan_core::{math::bounds::Bounds, num::SolverNumeric};
use rustc_hash::FxHashMap;

/// Direction of optimization.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

impl std::fmt::Display for ObjectiveSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectiveSense::Minimize => write!(f, "Minimize"),
            ObjectiveSense::Maximize => write!(f, "Maximize"),
        }
    }
}

/// A linear objective.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Objective<T> {
    expr: LinearExpr<T>,
    sense: ObjectiveSense,
}

impl<T> Objective<T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn new(expr: LinearExpr<T>, sense: ObjectiveSense) -> Self {
        Self { expr, sense }
    }

    #[inline]
    pub fn expr(&self) -> &LinearExpr<T> {
        &self.expr
    }

    #[inline]
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }
}

#[derive(Clone, Debug)]
pub struct CpModel<T> {
    pub(crate) vars: Vec<IntVarData<T>>,
    pub(crate) intervals: Vec<IntervalVarData>,
    pub(crate) constraints: Vec<Constraint<T>>,
    pub(crate) objective: Option<Objective<T>>,
    pub(crate) names: FxHashMap<String, IntVar>,
}

impl<T> CpModel<T>
where
    T: SolverNumeric,
{
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    #[inline]
    pub fn num_intervals(&self) -> usize {
        self.intervals.len()
    }

    #[inline]
    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Iterates over all variable handles in creation order.
    pub fn vars(&self) -> impl Iterator<Item = IntVar> + '_ {
        (0..self.vars.len()).map(|i| IntVar::new(i.into()))
    }

    /// Returns the initial domain of a variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` does not belong to this model.
    #[inline]
    pub fn var_bounds(&self, var: IntVar) -> Bounds<T> {
        let index = var.index().get();
        assert!(
            index < self.vars.len(),
            "called `CpModel::var_bounds` with variable index out of bounds: the len is {} but the index is {}",
            self.vars.len(),
            index
        );
        self.vars[index].bounds()
    }

    /// Returns the name of a variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` does not belong to this model.
    #[inline]
    pub fn var_name(&self, var: IntVar) -> &str {
        let index = var.index().get();
        assert!(
            index < self.vars.len(),
            "called `CpModel::var_name` with variable index out of bounds: the len is {} but the index is {}",
            self.vars.len(),
            index
        );
        self.vars[index].name()
    }

    /// Looks up a variable by name; the first variable created with that
    /// name wins.
    #[inline]
    pub fn find_var(&self, name: &str) -> Option<IntVar> {
        self.names.get(name).copied()
    }

    /// # Panics
    ///
    /// Panics if `interval` does not belong to this model.
    #[inline]
    pub fn interval(&self, interval: IntervalVar) -> &IntervalVarData {
        let index = interval.index().get();
        assert!(
            index < self.intervals.len(),
            "called `CpModel::interval` with interval index out of bounds: the len is {} but the index is {}",
            self.intervals.len(),
            index
        );
        &self.intervals[index]
    }

    #[inline]
    pub fn constraints(&self) -> &[Constraint<T>] {
        &self.constraints
    }

    #[inline]
    pub fn constraint(&self, index: ConstraintIndex) -> Option<&Constraint<T>> {
        self.constraints.get(index.get())
    }

    #[inline]
    pub fn objective(&self) -> Option<&Objective<T>> {
        self.objective.as_ref()
    }

    /// Checks the model for structural defects.
    ///
    /// Infeasibility is not a defect: a model whose constraints contradict
    /// each other is valid and simply has no solution.
    pub fn validate(&self) -> Result<(), ModelError> {
        for data in &self.vars {
            let b = data.bounds();
            if b.is_empty() {
                return Err(ModelError::EmptyDomain {
                    name: data.name().to_string(),
                    lower: b.lower().into(),
                    upper: b.upper().into(),
                });
            }
        }

        let num_vars = self.vars.len();
        for data in &self.intervals {
            let size = self.vars[data.size().index().get()].bounds();
            if size.lower() < T::zero() {
                return Err(ModelError::NegativeIntervalSize {
                    name: data.name().to_string(),
                    lower: size.lower().into(),
                });
            }
        }

        for (ci, constraint) in self.constraints.iter().enumerate() {
            self.validate_constraint(ci, constraint)?;
        }

        if let Some(objective) = &self.objective {
            if let Some(&(v, _)) = objective
                .expr()
                .terms()
                .iter()
                .find(|(v, _)| v.index().get() >= num_vars)
            {
                return Err(ModelError::UnknownObjectiveVariable {
                    index: v.index().get(),
                });
            }
        }

        Ok(())
    }

    fn validate_constraint(&self, ci: usize, constraint: &Constraint<T>) -> Result<(), ModelError> {
        let num_vars = self.vars.len();
        let check_var = |v: IntVar| {
            if v.index().get() < num_vars {
                Ok(())
            } else {
                Err(ModelError::UnknownVariable {
                    constraint: ci,
                    index: v.index().get(),
                })
            }
        };

        match constraint {
            Constraint::Linear(lin) => {
                for &(v, _) in lin.terms() {
                    check_var(v)?;
                }
            }
            Constraint::MultiplicationEquality { target, factors } => {
                if factors.len() != 2 {
                    return Err(ModelError::InvalidProductArity {
                        constraint: ci,
                        factors: factors.len(),
                    });
                }
                check_var(*target)?;
                for &f in factors {
                    check_var(f)?;
                }
            }
            Constraint::MaxEquality { target, operands } => {
                if operands.is_empty() {
                    return Err(ModelError::EmptyMaxEquality { constraint: ci });
                }
                check_var(*target)?;
                for &o in operands {
                    check_var(o)?;
                }
            }
            Constraint::NoOverlap2D {
                x_intervals,
                y_intervals,
            } => {
                if x_intervals.len() != y_intervals.len() {
                    return Err(ModelError::MismatchedNoOverlap {
                        constraint: ci,
                        x: x_intervals.len(),
                        y: y_intervals.len(),
                    });
                }
                if let Some(iv) = x_intervals
                    .iter()
                    .chain(y_intervals.iter())
                    .find(|iv| iv.index().get() >= self.intervals.len())
                {
                    return Err(ModelError::UnknownInterval {
                        constraint: ci,
                        index: iv.index().get(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Returns the first constraint violated by a full assignment, or a
    /// variable whose value lies outside its domain (reported as `Err` with
    /// the variable), or `Ok(None)` if the assignment is feasible.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` differs from `num_vars()`.
    pub fn first_violation(&self, values: &[T]) -> Result<Option<ConstraintIndex>, IntVar> {
        assert_eq!(
            values.len(),
            self.vars.len(),
            "called `CpModel::first_violation` with an assignment of the wrong length"
        );
        for var in self.vars() {
            if !self.var_bounds(var).contains(values[var.index().get()]) {
                return Err(var);
            }
        }
        Ok(self
            .constraints
            .iter()
            .position(|c| !c.is_satisfied(self, values))
            .map(ConstraintIndex::new))
    }

    /// Returns `true` if a full assignment satisfies every domain and
    /// constraint.
    #[inline]
    pub fn is_feasible(&self, values: &[T]) -> bool {
        matches!(self.first_violation(values), Ok(None))
    }
}

impl<T> std::fmt::Display for CpModel<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let objective = match &self.objective {
            Some(o) => o.sense().to_string(),
            None => "None".to_string(),
        };
        write!(
            f,
            "CpModel(vars: {}, intervals: {}, constraints: {}, objective: {})",
            self.vars.len(),
            self.intervals.len(),
            self.constraints.len(),
            objective
        )
    }
}
