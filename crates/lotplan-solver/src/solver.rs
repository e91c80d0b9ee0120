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


//! # Pumpkin-Backed Constraint Solver
//!
//! `PumpkinSolver` implements `ConstraintSolver` by validating the model,
//! loading it into a fresh Pumpkin instance and mapping the engine's verdict
//! onto `SolverResponse`:
//!
//! | engine                       | response        |
//! |------------------------------|-----------------|
//! | invalid model / out of range | `ModelInvalid`  |
//! | root failure, unsatisfiable  | `Infeasible`    |
//! | optimal                      | `Optimal`       |
//! | budget hit with a solution   | `Feasible`      |
//! | budget hit without one       | `Unknown`       |
//!
//! The wall-clock budget covers loading; the engine receives what is left.

use crate::translate::{EngineOutcome, LoadedModel};
use lotplan_core::num::SolverNumeric;
use lotplan_cp::{
    model::CpModel,
    response::{Assignment, SolverResponse},
    solver::{ConstraintSolver, SolverParameters},
    stats::SearchStatistics,
};
use pumpkin_solver::termination::{Indefinite, TimeBudget};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default)]
pub struct PumpkinSolver;

impl PumpkinSolver {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

fn assignment<T>(model: &CpModel<T>, values: Vec<i64>) -> Assignment<T>
where
    T: SolverNumeric,
{
    let values: Vec<T> = values.into_iter().map(<T as From<i64>>::from).collect();
    debug_assert!(
        model.is_feasible(&values),
        "engine returned an assignment that violates the model"
    );
    let objective = model.objective().map(|o| o.expr().evaluate(&values));
    Assignment::new(values, objective)
}

fn report(statistics: &SearchStatistics, parameters: &SolverParameters) {
    if parameters.log_search_progress() {
        log::info!("{}", statistics);
    } else {
        log::debug!("{}", statistics);
    }
}

impl<T> ConstraintSolver<T> for PumpkinSolver
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "Pumpkin"
    }

    fn solve(&mut self, model: &CpModel<T>, parameters: &SolverParameters) -> SolverResponse<T> {
        let start = Instant::now();

        if let Err(err) = model.validate() {
            log::warn!("Rejecting model: {}", err);
            return SolverResponse::model_invalid(err.to_string());
        }

        let mut loaded = match LoadedModel::load(model) {
            Ok(loaded) => loaded,
            Err(err) if err.is_infeasibility() => {
                log::info!("Model is infeasible while loading: {}", err);
                let mut statistics = SearchStatistics::default();
                statistics.set_loading_time(start.elapsed());
                statistics.set_total_time(start.elapsed());
                return SolverResponse::infeasible(statistics);
            }
            Err(err) => {
                log::warn!("Rejecting model: {}", err);
                return SolverResponse::model_invalid(err.to_string());
            }
        };

        let mut statistics = loaded.statistics().clone();
        statistics.set_loading_time(start.elapsed());
        log::debug!(
            "Loaded {} into {} engine variables and {} constraints",
            model,
            statistics.variables_created,
            statistics.constraints_posted
        );

        let outcome = match parameters.max_time() {
            Some(limit) => {
                let remaining = limit.saturating_sub(start.elapsed());
                loaded.run(&mut TimeBudget::starting_now(remaining))
            }
            None => loaded.run(&mut Indefinite),
        };
        statistics.set_total_time(start.elapsed());

        let response = match outcome {
            EngineOutcome::Proven(values) => {
                statistics.on_solution_found();
                SolverResponse::optimal(assignment(model, values), statistics)
            }
            EngineOutcome::Stopped(values) => {
                statistics.on_solution_found();
                let reason = time_limit_reason(parameters.max_time());
                SolverResponse::aborted(Some(assignment(model, values)), reason, statistics)
            }
            EngineOutcome::Unsatisfiable => SolverResponse::infeasible(statistics),
            EngineOutcome::Unknown => {
                let reason = time_limit_reason(parameters.max_time());
                SolverResponse::aborted(None, reason, statistics)
            }
        };

        report(response.statistics(), parameters);
        response
    }
}

fn time_limit_reason(limit: Option<Duration>) -> String {
    match limit {
        Some(limit) => format!("Time limit of {:.2?} reached", limit),
        None => "Engine stopped without a verdict".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotplan_cp::{
        builder::CpModelBuilder,
        expr::LinearExpr,
        response::{SolveStatus, TerminationReason},
    };

    type IntegerType = i64;

    fn solve(model: &CpModel<IntegerType>) -> SolverResponse<IntegerType> {
        let parameters = SolverParameters::default();
        PumpkinSolver::new().solve(model, &parameters)
    }

    #[test]
    fn test_maximizes_product() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let w = b.new_int_var(0, 10, "w");
        let h = b.new_int_var(0, 10, "h");
        let area = b.new_int_var(0, 100, "area");
        b.add_multiplication_equality(area, [w, h]);
        b.add_le(LinearExpr::sum([w, h]), LinearExpr::constant(12));
        b.maximize(area);
        let model = b.build();

        let response = solve(&model);
        assert_eq!(response.status(), SolveStatus::Optimal);
        assert_eq!(response.objective_value(), Some(36));
        assert_eq!(response.value(w), Some(6));
        assert_eq!(response.termination_reason(), &TerminationReason::OptimalityProven);
    }

    #[test]
    fn test_max_equality_tracks_largest() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let a = b.new_int_var(0, 4, "a");
        let c = b.new_int_var(0, 9, "c");
        let m = b.new_int_var(0, 9, "m");
        b.add_max_equality(m, [a, c]);
        b.add_le(m, LinearExpr::constant(5));
        b.maximize(LinearExpr::sum([a, c]));
        let model = b.build();

        let response = solve(&model);
        assert_eq!(response.status(), SolveStatus::Optimal);
        assert_eq!(response.objective_value(), Some(9));
        assert_eq!(response.value(m), Some(5));
    }

    #[test]
    fn test_minimize_with_constant_offset() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let x = b.new_int_var(-5, 5, "x");
        b.add_ge(x, LinearExpr::constant(-2));
        b.minimize(LinearExpr::from(x) * 3 + LinearExpr::constant(10));
        let model = b.build();

        let response = solve(&model);
        assert_eq!(response.status(), SolveStatus::Optimal);
        assert_eq!(response.value(x), Some(-2));
        assert_eq!(response.objective_value(), Some(4));
    }

    #[test]
    fn test_model_without_objective_is_solved() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let x = b.new_int_var(0, 3, "x");
        b.add_eq(x, LinearExpr::constant(2));
        let model = b.build();

        let response = solve(&model);
        assert_eq!(response.status(), SolveStatus::Optimal);
        assert_eq!(response.value(x), Some(2));
        assert_eq!(response.objective_value(), None);
    }

    #[test]
    fn test_contradicting_rows_are_infeasible() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let x = b.new_int_var(0, 10, "x");
        b.add_ge(x, LinearExpr::constant(5));
        b.add_le(x, LinearExpr::constant(3));
        let model = b.build();

        let response = solve(&model);
        assert_eq!(response.status(), SolveStatus::Infeasible);
        assert!(!response.has_solution());
    }

    #[test]
    fn test_squares_do_not_fit_a_narrow_strip() {
        // Two 3x3 squares need a strip of width 6.
        let build = |width: IntegerType| {
            let mut b = CpModelBuilder::<IntegerType>::new();
            let mut xs = Vec::new();
            let mut ys = Vec::new();
            for k in 0..2 {
                let s = b.new_int_var(0, width, format!("x{k}_start"));
                let z = b.new_constant(3);
                let e = b.new_int_var(0, width, format!("x{k}_end"));
                xs.push(b.new_interval_var(s, z, e, format!("x{k}")));
                ys.push(b.new_fixed_interval(0, 3, format!("y{k}")));
            }
            b.add_no_overlap_2d(xs, ys);
            b.build()
        };

        assert_eq!(solve(&build(5)).status(), SolveStatus::Infeasible);

        let model = build(6);
        let response = solve(&model);
        assert_eq!(response.status(), SolveStatus::Optimal);
        let values = response.result().assignment().unwrap().values().to_vec();
        assert!(model.is_feasible(&values));
    }

    #[test]
    fn test_empty_rectangle_may_sit_inside_another() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let ax = b.new_fixed_interval(0, 4, "ax");
        let ay = b.new_fixed_interval(0, 4, "ay");
        let s = b.new_int_var(0, 4, "s");
        let z = b.new_int_var(0, 4, "z");
        let e = b.new_int_var(0, 4, "e");
        let bx = b.new_interval_var(s, z, e, "bx");
        let by = b.new_fixed_interval(0, 4, "by");
        b.add_no_overlap_2d([ax, bx], [ay, by]);
        b.add_eq(s, LinearExpr::constant(2));
        let model = b.build();

        let response = solve(&model);
        assert_eq!(response.status(), SolveStatus::Optimal);
        assert_eq!(response.value(z), Some(0));
    }

    #[test]
    fn test_invalid_model_is_rejected() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        b.new_int_var(0, -1, "broken");
        let response = solve(&b.build());
        assert_eq!(response.status(), SolveStatus::ModelInvalid);
        assert!(matches!(
            response.termination_reason(),
            TerminationReason::InvalidModel(msg) if msg.contains("broken")
        ));
    }

    #[test]
    fn test_out_of_range_model_is_rejected() {
        let mut b = CpModelBuilder::<IntegerType>::new();
        let x = b.new_int_var(0, 1 << 40, "x");
        b.maximize(x);
        let response = solve(&b.build());
        assert_eq!(response.status(), SolveStatus::ModelInvalid);
    }

    #[test]
    fn test_name() {
        let solver = PumpkinSolver::new();
        assert_eq!(ConstraintSolver::<IntegerType>::name(&solver), "Pumpkin");
    }
}
