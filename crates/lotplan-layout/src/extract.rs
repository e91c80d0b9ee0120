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

//! Reading a solved model back into rectangles.
//!
//! `ResultExtractor` maps a `SolverResponse` onto a `LayoutPlan`. Only the
//! `Optimal` and `Feasible` statuses carry values; every other status turns
//! into a `LayoutError` and no value is ever read from it.

use crate::{
    entity::{EntityKind, FixedZone, RectangleEntity},
    error::LayoutError,
    layout::LayoutModel,
};
use lotplan_cp::response::{Assignment, SolverResponse, SolverResult};
use serde::Serialize;

/// One placed rectangle of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedRect {
    pub kind: EntityKind,
    pub name: String,
    pub start_x: i64,
    pub start_y: i64,
    pub size_x: i64,
    pub size_y: i64,
    pub area: i64,
}

impl PlacedRect {
    #[inline]
    pub fn end_x(&self) -> i64 {
        self.start_x.saturating_add(self.size_x)
    }

    #[inline]
    pub fn end_y(&self) -> i64 {
        self.start_y.saturating_add(self.size_y)
    }

    fn from_entity(entity: &RectangleEntity, assignment: &Assignment<i64>) -> Self {
        Self {
            kind: entity.kind(),
            name: entity.name().to_string(),
            start_x: assignment.value(entity.x().start),
            start_y: assignment.value(entity.y().start),
            size_x: assignment.value(entity.x().size),
            size_y: assignment.value(entity.y().size),
            area: assignment.value(entity.area()),
        }
    }

    fn from_zone(zone: &FixedZone) -> Self {
        let rect = zone.rect();
        Self {
            kind: zone.kind(),
            name: zone.kind().entity_name(0),
            start_x: rect.x,
            start_y: rect.y,
            size_x: rect.width,
            size_y: rect.height,
            area: rect.width.saturating_mul(rect.height),
        }
    }
}

impl std::fmt::Display for PlacedRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at ({}, {}) {}x{} area {}",
            self.name, self.start_x, self.start_y, self.size_x, self.size_y, self.area
        )
    }
}

/// Whether a plan is known to be optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Optimal,
    Feasible,
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatus::Optimal => write!(f, "OPTIMAL"),
            PlanStatus::Feasible => write!(f, "FEASIBLE"),
        }
    }
}

/// A solved lot: every rectangle, the yield and how good it is known to be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutPlan {
    pub width: i64,
    pub height: i64,
    pub status: PlanStatus,
    pub lot_yield: i64,
    pub rects: Vec<PlacedRect>,
}

impl LayoutPlan {
    /// The rectangles of one kind, in index order.
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &PlacedRect> + '_ {
        self.rects.iter().filter(move |r| r.kind == kind)
    }

    #[inline]
    pub fn is_proven(&self) -> bool {
        self.status == PlanStatus::Optimal
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl std::fmt::Display for LayoutPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "LayoutPlan({}x{}, {}, yield {})",
            self.width, self.height, self.status, self.lot_yield
        )?;
        for rect in &self.rects {
            writeln!(f, "  {}", rect)?;
        }
        Ok(())
    }
}

/// Reads plans out of responses to one `LayoutModel`.
#[derive(Debug, Clone, Copy)]
pub struct ResultExtractor<'a> {
    layout: &'a LayoutModel,
}

impl<'a> ResultExtractor<'a> {
    #[inline]
    pub fn new(layout: &'a LayoutModel) -> Self {
        Self { layout }
    }

    pub fn extract(&self, response: &SolverResponse<i64>) -> Result<LayoutPlan, LayoutError> {
        let (status, assignment) = match response.result() {
            SolverResult::Optimal(a) => (PlanStatus::Optimal, a),
            SolverResult::Feasible(a) => (PlanStatus::Feasible, a),
            SolverResult::Infeasible => return Err(LayoutError::Infeasible),
            SolverResult::Unknown => {
                return Err(LayoutError::NoSolutionFound(
                    response.termination_reason().to_string(),
                ));
            }
            SolverResult::ModelInvalid(reason) => return Err(LayoutError::InvalidModel(reason.clone())),
        };

        let mut rects: Vec<PlacedRect> = self
            .layout
            .rectangles()
            .map(|e| PlacedRect::from_entity(e, assignment))
            .collect();
        rects.push(PlacedRect::from_zone(self.layout.flood_zone()));
        rects.push(PlacedRect::from_zone(self.layout.utility_pole()));

        Ok(LayoutPlan {
            width: self.layout.width(),
            height: self.layout.height(),
            status,
            lot_yield: assignment.value(self.layout.lot_yield()),
            rects,
        })
    }
}
