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

//! What a solver hands back.
//!
//! `SolverResponse` pairs a `SolverResult` (the status plus, when one was
//! found, the best assignment) with the reason the search stopped and its
//! statistics. Values can only be read through an `Assignment`, which only
//! exists for the `Optimal` and `Feasible` outcomes.

use crate::{stats::SearchStatistics, var::IntVar};
use lotplan_core::num::SolverNumeric;

/// A value for every variable of a model, indexed by `IntVar`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<T> {
    values: Vec<T>,
    objective_value: Option<T>,
}

impl<T> Assignment<T>
where
    T: Copy,
{
    #[inline]
    pub fn new(values: Vec<T>, objective_value: Option<T>) -> Self {
        Self {
            values,
            objective_value,
        }
    }

    /// Returns the value of a variable.
    ///
    /// # Panics
    ///
    /// Panics if `var` is out of bounds for this assignment.
    #[inline]
    pub fn value(&self, var: IntVar) -> T {
        let index = var.index().get();
        assert!(
            index < self.values.len(),
            "called `Assignment::value` with variable index out of bounds: the len is {} but the index is {}",
            self.values.len(),
            index
        );
        self.values[index]
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn num_vars(&self) -> usize {
        self.values.len()
    }

    /// The objective value, `None` for pure satisfaction models.
    #[inline]
    pub fn objective_value(&self) -> Option<T> {
        self.objective_value
    }
}

/// The five outcomes a solve can end in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SolveStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
    ModelInvalid,
}

impl SolveStatus {
    /// `true` for `Optimal` and `Feasible`.
    #[inline]
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Feasible => write!(f, "FEASIBLE"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unknown => write!(f, "UNKNOWN"),
            SolveStatus::ModelInvalid => write!(f, "MODEL_INVALID"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// We have found a solution and proven its optimality.
    Optimal(Assignment<T>),
    /// We have found a solution, but not proven its optimality.
    Feasible(Assignment<T>),
    /// We have proven that no solution exists.
    Infeasible,
    /// The search stopped without a solution and without a proof.
    Unknown,
    /// The model is structurally defective; no search was attempted.
    ModelInvalid(String),
}

impl<T> SolverResult<T> {
    #[inline]
    pub fn status(&self) -> SolveStatus {
        match self {
            SolverResult::Optimal(_) => SolveStatus::Optimal,
            SolverResult::Feasible(_) => SolveStatus::Feasible,
            SolverResult::Infeasible => SolveStatus::Infeasible,
            SolverResult::Unknown => SolveStatus::Unknown,
            SolverResult::ModelInvalid(_) => SolveStatus::ModelInvalid,
        }
    }

    #[inline]
    pub fn assignment(&self) -> Option<&Assignment<T>> {
        match self {
            SolverResult::Optimal(a) | SolverResult::Feasible(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the assignment of an `Optimal` result.
    ///
    /// # Panics
    ///
    /// Panics if the result is not `Optimal`.
    #[inline]
    pub fn unwrap_optimal(&self) -> &Assignment<T> {
        match self {
            SolverResult::Optimal(a) => a,
            other => panic!(
                "called `SolverResult::unwrap_optimal` on a {} result",
                other.status()
            ),
        }
    }

    /// Returns the assignment of an `Optimal` or `Feasible` result.
    ///
    /// # Panics
    ///
    /// Panics if the result carries no assignment.
    #[inline]
    pub fn unwrap_feasible(&self) -> &Assignment<T> {
        match self {
            SolverResult::Optimal(a) | SolverResult::Feasible(a) => a,
            other => panic!(
                "called `SolverResult::unwrap_feasible` on a {} result",
                other.status()
            ),
        }
    }
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Optimal(a) | SolverResult::Feasible(a) => match a.objective_value() {
                Some(obj) => write!(f, "{}(objective={})", self.status(), obj),
                None => write!(f, "{}", self.status()),
            },
            SolverResult::ModelInvalid(msg) => write!(f, "{}({})", self.status(), msg),
            _ => write!(f, "{}", self.status()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search space was exhausted with at least one solution.
    OptimalityProven,
    /// The search space was exhausted without a solution.
    InfeasibilityProven,
    /// A search limit stopped the search. The string describes the limit.
    Aborted(String),
    /// Validation rejected the model.
    InvalidModel(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
            TerminationReason::InvalidModel(reason) => write!(f, "Invalid Model: {}", reason),
        }
    }
}

/// The full answer of a `ConstraintSolver`.
#[derive(Debug, Clone)]
pub struct SolverResponse<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: SearchStatistics,
}

impl<T> SolverResponse<T>
where
    T: Copy,
{
    #[inline]
    pub fn optimal(assignment: Assignment<T>, statistics: SearchStatistics) -> Self {
        Self {
            result: SolverResult::Optimal(assignment),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: SearchStatistics) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// A search stopped by a limit: `Feasible` with the incumbent if there
    /// is one, `Unknown` otherwise.
    #[inline]
    pub fn aborted<R>(assignment: Option<Assignment<T>>, reason: R, statistics: SearchStatistics) -> Self
    where
        R: Into<String>,
    {
        let result = match assignment {
            Some(a) => SolverResult::Feasible(a),
            None => SolverResult::Unknown,
        };
        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    #[inline]
    pub fn model_invalid<R>(reason: R) -> Self
    where
        R: Into<String>,
    {
        let reason = reason.into();
        Self {
            result: SolverResult::ModelInvalid(reason.clone()),
            termination_reason: TerminationReason::InvalidModel(reason),
            statistics: SearchStatistics::default(),
        }
    }

    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    #[inline]
    pub fn status(&self) -> SolveStatus {
        self.result.status()
    }

    #[inline]
    pub fn has_solution(&self) -> bool {
        self.status().has_solution()
    }

    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    #[inline]
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// The value of `var` in the best assignment, if there is one.
    #[inline]
    pub fn value(&self, var: IntVar) -> Option<T> {
        self.result.assignment().map(|a| a.value(var))
    }

    #[inline]
    pub fn objective_value(&self) -> Option<T> {
        self.result.assignment().and_then(|a| a.objective_value())
    }
}

impl<T> std::fmt::Display for SolverResponse<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Result:      {}", self.result)?;
        writeln!(f, "Termination: {}", self.termination_reason)?;
        write!(f, "{}", self.statistics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::VarIndex;

    type IntegerType = i64;

    fn assignment() -> Assignment<IntegerType> {
        Assignment::new(vec![3, 4, 12], Some(12))
    }

    #[test]
    fn test_aborted_with_solution_is_feasible() {
        let r = SolverResponse::aborted(Some(assignment()), "time limit", SearchStatistics::default());
        assert_eq!(r.status(), SolveStatus::Feasible);
        assert_eq!(r.objective_value(), Some(12));
        assert_eq!(
            r.termination_reason(),
            &TerminationReason::Aborted("time limit".to_string())
        );
    }

    #[test]
    fn test_aborted_without_solution_is_unknown() {
        let r = SolverResponse::<IntegerType>::aborted(None, "time limit", SearchStatistics::default());
        assert_eq!(r.status(), SolveStatus::Unknown);
        assert!(!r.has_solution());
        assert_eq!(r.value(IntVar::new(VarIndex::new(0))), None);
    }

    #[test]
    fn test_optimal_reads_values() {
        let r = SolverResponse::optimal(assignment(), SearchStatistics::default());
        assert!(r.has_solution());
        assert_eq!(r.value(IntVar::new(VarIndex::new(1))), Some(4));
        assert_eq!(format!("{}", r.result()), "OPTIMAL(objective=12)");
    }

    #[test]
    fn test_model_invalid() {
        let r = SolverResponse::<IntegerType>::model_invalid("empty domain");
        assert_eq!(r.status(), SolveStatus::ModelInvalid);
        assert_eq!(format!("{}", r.result()), "MODEL_INVALID(empty domain)");
    }

    #[test]
    #[should_panic(expected = "unwrap_optimal")]
    fn test_unwrap_optimal_panics_on_infeasible() {
        let r = SolverResult::<IntegerType>::Infeasible;
        let _ = r.unwrap_optimal();
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::Optimal.to_string(), "OPTIMAL");
        assert_eq!(SolveStatus::ModelInvalid.to_string(), "MODEL_INVALID");
        assert!(SolveStatus::Feasible.has_solution());
        assert!(!SolveStatus::Unknown.has_solution());
    }
}
