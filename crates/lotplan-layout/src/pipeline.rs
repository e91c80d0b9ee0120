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

//! # Planning Pipeline
//!
//! Build, solve, extract. `plan_lot` runs the three steps against any
//! `ConstraintSolver`; `solve_lot` is the shortcut with `PumpkinSolver` and
//! the configuration's own time budget.

use crate::{
    config::LotConfig,
    error::LayoutError,
    extract::{LayoutPlan, PlanStatus, ResultExtractor},
    layout::LayoutModel,
};
use lotplan_cp::solver::{ConstraintSolver, SolverParameters};
use lotplan_solver::PumpkinSolver;

/// A plan together with whether its yield is proven optimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// No layout has a higher yield.
    Proven(LayoutPlan),
    /// A limit stopped the search; better layouts may exist.
    Unproven(LayoutPlan),
}

impl PlanOutcome {
    #[inline]
    pub fn plan(&self) -> &LayoutPlan {
        match self {
            PlanOutcome::Proven(plan) | PlanOutcome::Unproven(plan) => plan,
        }
    }

    #[inline]
    pub fn into_plan(self) -> LayoutPlan {
        match self {
            PlanOutcome::Proven(plan) | PlanOutcome::Unproven(plan) => plan,
        }
    }

    #[inline]
    pub fn is_proven(&self) -> bool {
        matches!(self, PlanOutcome::Proven(_))
    }
}

/// Plans a lot with the given solver and limits.
pub fn plan_lot(
    config: &LotConfig,
    solver: &mut dyn ConstraintSolver<i64>,
    parameters: &SolverParameters,
) -> Result<PlanOutcome, LayoutError> {
    let layout = LayoutModel::build(config)?;
    log::info!("solving {} with {} ({})", layout, solver.name(), parameters);

    let response = solver.solve(layout.model(), parameters);
    log::debug!("solver response:\n{}", response);

    let plan = ResultExtractor::new(&layout).extract(&response)?;
    log::info!("lot yield {} ({})", plan.lot_yield, plan.status);

    Ok(match plan.status {
        PlanStatus::Optimal => PlanOutcome::Proven(plan),
        PlanStatus::Feasible => PlanOutcome::Unproven(plan),
    })
}

/// Plans a lot with a `PumpkinSolver` under `config.solver_parameters()`.
pub fn solve_lot(config: &LotConfig) -> Result<PlanOutcome, LayoutError> {
    let mut solver = PumpkinSolver::new();
    plan_lot(config, &mut solver, &config.solver_parameters())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::ZoneRect,
        error::ConfigError,
        verify::verify_plan,
    };
    use lotplan_cp::{
        constraint::Constraint,
        model::CpModel,
        response::SolverResponse,
        stats::SearchStatistics,
    };
    use lotplan_solver::translate::LoadedModel;

    /// Stops before finding anything.
    struct OutOfTime;

    impl ConstraintSolver<i64> for OutOfTime {
        fn name(&self) -> &str {
            "OutOfTime"
        }

        fn solve(&mut self, _model: &CpModel<i64>, _parameters: &SolverParameters) -> SolverResponse<i64> {
            SolverResponse::aborted(None, "Time limit of 0ns reached", SearchStatistics::default())
        }
    }

    fn strip() -> LotConfig {
        LotConfig {
            width: 4,
            height: 1,
            num_buildings: 1,
            num_parking_lots: 1,
            flood_zone: ZoneRect::new(3, 0, 1, 1),
            utility_pole: ZoneRect::new(0, 0, 1, 1),
            ..LotConfig::default()
        }
    }

    /// Both zones inside a 5x5 lot, leaving 17 cells for buildings and park.
    fn crowded(min_building_area: i64) -> LotConfig {
        LotConfig {
            width: 5,
            height: 5,
            flood_zone: ZoneRect::new(0, 0, 2, 2),
            utility_pole: ZoneRect::new(3, 3, 2, 2),
            min_building_area,
            ..LotConfig::default()
        }
    }

    fn fits(zone: &ZoneRect, config: &LotConfig) -> bool {
        zone.x >= 0 && zone.y >= 0 && zone.end_x() <= config.width && zone.end_y() <= config.height
    }

    #[test]
    fn test_tiny_strip_is_solved_optimally() {
        let config = strip();
        let outcome = solve_lot(&config).expect("the strip has a layout");
        assert!(outcome.is_proven());

        let plan = outcome.into_plan();
        assert_eq!(plan.lot_yield, 1);
        verify_plan(&plan, &config).expect("plan satisfies every rule");

        // Only the parking lot may cover the pole cell.
        let parking = &plan.rects[1];
        assert_eq!((parking.start_x, parking.area), (0, 1));
    }

    #[test]
    fn test_reference_lot_within_default_budget() {
        let config = LotConfig::default();
        let parameters = config.solver_parameters();
        assert_eq!(parameters.max_time(), Some(std::time::Duration::from_secs(5)));

        let outcome =
            plan_lot(&config, &mut PumpkinSolver::new(), &parameters).expect("the reference lot has a layout");
        let plan = outcome.plan();
        assert!(matches!(plan.status, PlanStatus::Optimal | PlanStatus::Feasible));
        assert!(plan.lot_yield > 0);
        verify_plan(plan, &config).expect("plan satisfies every rule");
    }

    #[test]
    fn test_small_lot_with_required_buildings_is_infeasible() {
        // The default zones lie outside a 5x5 lot.
        let config = LotConfig {
            width: 5,
            height: 5,
            min_building_area: 1,
            ..LotConfig::default()
        };
        assert!(matches!(solve_lot(&config), Err(LayoutError::Infeasible)));
    }

    #[test]
    fn test_buildings_larger_than_free_space_are_infeasible() {
        // Five buildings of at least 6 cells need 30 of the 17 free cells.
        let config = crowded(6);
        assert!(fits(&config.flood_zone, &config));
        assert!(fits(&config.utility_pole, &config));

        let layout = LayoutModel::build(&config).expect("valid config");
        assert!(layout.model().validate().is_ok());
        assert!(LoadedModel::load(layout.model()).is_ok());

        assert!(matches!(solve_lot(&config), Err(LayoutError::Infeasible)));
    }

    #[test]
    fn test_crowded_lot_with_small_buildings_is_solvable() {
        let config = crowded(1);
        let outcome = solve_lot(&config).expect("small buildings fit");
        assert!(outcome.plan().lot_yield >= 5);
        verify_plan(outcome.plan(), &config).expect("plan satisfies every rule");
    }

    #[test]
    fn test_no_room_between_obstacles_is_infeasible() {
        let config = LotConfig {
            width: 2,
            height: 1,
            num_buildings: 1,
            num_parking_lots: 1,
            flood_zone: ZoneRect::new(1, 0, 1, 1),
            utility_pole: ZoneRect::new(0, 0, 1, 1),
            min_building_area: 1,
            ..LotConfig::default()
        };
        assert!(matches!(solve_lot(&config), Err(LayoutError::Infeasible)));
    }

    #[test]
    fn test_minimum_area_above_lot_area_is_infeasible() {
        let config = LotConfig {
            min_building_area: 60 * 40 + 1,
            ..LotConfig::default()
        };
        assert!(matches!(solve_lot(&config), Err(LayoutError::Infeasible)));
    }

    #[test]
    fn test_pole_inside_flood_zone() {
        let config = LotConfig {
            utility_pole: ZoneRect::new(11, 22, 3, 3),
            ..LotConfig::default()
        };

        let layout = LayoutModel::build(&config).expect("valid config");
        let pole = layout.utility_pole().x().interval;
        let flood = layout.flood_zone().x().interval;
        for constraint in layout.model().constraints() {
            if let Constraint::NoOverlap2D { x_intervals, .. } = constraint {
                assert!(!(x_intervals.contains(&pole) && x_intervals.contains(&flood)));
            }
        }

        let outcome = solve_lot(&config).expect("overlapping zones are allowed");
        assert!(outcome.plan().lot_yield > 0);
        verify_plan(outcome.plan(), &config).expect("plan satisfies every rule");
    }

    #[test]
    fn test_same_inputs_same_yield() {
        let config = LotConfig {
            width: 5,
            height: 2,
            num_buildings: 1,
            num_parking_lots: 1,
            flood_zone: ZoneRect::new(4, 1, 1, 1),
            utility_pole: ZoneRect::new(0, 0, 1, 1),
            ..LotConfig::default()
        };
        let first = solve_lot(&config).expect("a layout is found");
        let second = solve_lot(&config).expect("a layout is found");
        assert!(first.is_proven() && second.is_proven());
        assert_eq!(first.plan().lot_yield, second.plan().lot_yield);
    }

    #[test]
    fn test_negative_bounds_are_an_invalid_model() {
        let config = LotConfig {
            width: -1,
            ..LotConfig::default()
        };
        assert!(matches!(solve_lot(&config), Err(LayoutError::InvalidModel(_))));
    }

    #[test]
    fn test_rejected_config_is_reported() {
        let config = LotConfig {
            num_buildings: 0,
            ..LotConfig::default()
        };
        assert!(matches!(
            solve_lot(&config),
            Err(LayoutError::Config(ConfigError::NoBuildings))
        ));
    }

    #[test]
    fn test_budget_without_solution_is_reported() {
        match plan_lot(&strip(), &mut OutOfTime, &SolverParameters::default()) {
            Err(LayoutError::NoSolutionFound(reason)) => assert!(reason.contains("Time limit of 0ns")),
            other => panic!("expected NoSolutionFound, got {:?}", other),
        }
    }
}
