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

//! Geometric entities of a lot layout
//!
//! A `RectangleEntity` is a variable rectangle: per axis a start, a size and
//! an end bound by an interval token, plus an area variable tied to the two
//! sizes by a multiplication equality. A `FixedZone` is the same shape with
//! literal coordinates, used for the flood zone and the utility pole.
//!
//! Variable names follow `{entity}_{axis}_{part}`, e.g. `building_0_x_start`,
//! `parking_lots_1_area` or `park_y_size`.

use crate::config::ZoneRect;
use lotplan_cp::{
    builder::CpModelBuilder,
    expr::LinearExpr,
    var::{IntVar, IntervalVar},
};
use serde::{Deserialize, Serialize};

/// What a rectangle on the lot is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Building,
    ParkingLot,
    Park,
    FloodZone,
    UtilityPole,
}

impl EntityKind {
    /// The name prefix used for variables and plan entries.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            EntityKind::Building => "building",
            EntityKind::ParkingLot => "parking_lots",
            EntityKind::Park => "park",
            EntityKind::FloodZone => "flood_zone",
            EntityKind::UtilityPole => "utility_pole",
        }
    }

    /// Returns `true` for kinds with literal coordinates.
    #[inline]
    pub const fn is_fixed(&self) -> bool {
        matches!(self, EntityKind::FloodZone | EntityKind::UtilityPole)
    }

    /// The name of the `index`-th entity of this kind. The park and the
    /// fixed zones are singletons and carry no index.
    pub fn entity_name(&self, index: usize) -> String {
        match self {
            EntityKind::Building | EntityKind::ParkingLot => format!("{}_{}", self.label(), index),
            _ => self.label().to_string(),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Building => "Building",
            EntityKind::ParkingLot => "ParkingLot",
            EntityKind::Park => "Park",
            EntityKind::FloodZone => "FloodZone",
            EntityKind::UtilityPole => "UtilityPole",
        };
        write!(f, "{}", name)
    }
}

/// The variables of one axis of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisVars {
    pub start: IntVar,
    pub size: IntVar,
    pub end: IntVar,
    pub interval: IntervalVar,
}

impl AxisVars {
    /// Creates `start, size, end ∈ [0, bound]` linked by an interval token.
    fn new(model: &mut CpModelBuilder<i64>, name: &str, axis: &str, bound: i64) -> Self {
        let start = model.new_int_var(0, bound, format!("{}_{}_start", name, axis));
        let size = model.new_int_var(0, bound, format!("{}_{}_size", name, axis));
        let end = model.new_int_var(0, bound, format!("{}_{}_end", name, axis));
        let interval = model.new_interval_var(start, size, end, format!("{}_{}", name, axis));
        Self {
            start,
            size,
            end,
            interval,
        }
    }

    /// Binds literal coordinates and posts `0 <= start` and `end <= bound`.
    fn fixed(model: &mut CpModelBuilder<i64>, name: &str, axis: &str, start: i64, size: i64, bound: i64) -> Self {
        let start_var = model.new_constant(start);
        let size_var = model.new_constant(size);
        let end_var = model.new_constant(start.saturating_add(size));
        let interval = model.new_interval_var(start_var, size_var, end_var, format!("{}_{}", name, axis));
        model.add_ge(start_var, LinearExpr::constant(0));
        model.add_le(end_var, LinearExpr::constant(bound));
        Self {
            start: start_var,
            size: size_var,
            end: end_var,
            interval,
        }
    }
}

/// A rectangle whose position and size the solver chooses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectangleEntity {
    name: String,
    kind: EntityKind,
    index: usize,
    x: AxisVars,
    y: AxisVars,
    area: IntVar,
}

impl RectangleEntity {
    /// Creates the variables of the `index`-th entity of `kind` inside a
    /// `bound_x × bound_y` lot and posts `area == x_size · y_size`.
    pub fn new(model: &mut CpModelBuilder<i64>, kind: EntityKind, index: usize, bound_x: i64, bound_y: i64) -> Self {
        let name = kind.entity_name(index);
        let x = AxisVars::new(model, &name, "x", bound_x);
        let y = AxisVars::new(model, &name, "y", bound_y);
        let area = model.new_int_var(0, bound_x.saturating_mul(bound_y), format!("{}_area", name));
        model.add_multiplication_equality(area, [x.size, y.size]);
        Self {
            name,
            kind,
            index,
            x,
            y,
            area,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn x(&self) -> &AxisVars {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &AxisVars {
        &self.y
    }

    #[inline]
    pub fn area(&self) -> IntVar {
        self.area
    }
}

impl std::fmt::Display for RectangleEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.name)
    }
}

/// A rectangle with literal coordinates that must lie inside the lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedZone {
    kind: EntityKind,
    rect: ZoneRect,
    x: AxisVars,
    y: AxisVars,
}

impl FixedZone {
    pub fn new(model: &mut CpModelBuilder<i64>, kind: EntityKind, rect: ZoneRect, bound_x: i64, bound_y: i64) -> Self {
        let name = kind.entity_name(0);
        let x = AxisVars::fixed(model, &name, "x", rect.x, rect.width, bound_x);
        let y = AxisVars::fixed(model, &name, "y", rect.y, rect.height, bound_y);
        Self { kind, rect, x, y }
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    #[inline]
    pub fn rect(&self) -> ZoneRect {
        self.rect
    }

    #[inline]
    pub fn x(&self) -> &AxisVars {
        &self.x
    }

    #[inline]
    pub fn y(&self) -> &AxisVars {
        &self.y
    }
}

impl std::fmt::Display for FixedZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotplan_cp::constraint::Constraint;

    #[test]
    fn test_entity_names() {
        assert_eq!(EntityKind::Building.entity_name(3), "building_3");
        assert_eq!(EntityKind::ParkingLot.entity_name(1), "parking_lots_1");
        assert_eq!(EntityKind::Park.entity_name(0), "park");
        assert_eq!(EntityKind::UtilityPole.entity_name(0), "utility_pole");
        assert!(EntityKind::FloodZone.is_fixed());
        assert!(!EntityKind::Park.is_fixed());
    }

    #[test]
    fn test_rectangle_variables() {
        let mut b = CpModelBuilder::<i64>::new();
        let entity = RectangleEntity::new(&mut b, EntityKind::Building, 2, 60, 40);
        let model = b.build();

        assert_eq!(model.num_vars(), 7);
        assert_eq!(model.num_intervals(), 2);
        assert_eq!(model.find_var("building_2_x_start"), Some(entity.x().start));
        assert_eq!(model.find_var("building_2_y_end"), Some(entity.y().end));
        assert_eq!(model.find_var("building_2_area"), Some(entity.area()));
        assert_eq!(model.var_bounds(entity.y().size).upper(), 40);
        assert_eq!(model.var_bounds(entity.area()).upper(), 2400);

        let products = model
            .constraints()
            .iter()
            .filter(|c| matches!(c, Constraint::MultiplicationEquality { .. }))
            .count();
        assert_eq!(products, 1);
    }

    #[test]
    fn test_fixed_zone_posts_containment() {
        let mut b = CpModelBuilder::<i64>::new();
        let zone = FixedZone::new(&mut b, EntityKind::FloodZone, ZoneRect::new(10, 20, 7, 12), 60, 40);
        let model = b.build();

        // A solution must reproduce the literal rectangle.
        let data = model.interval(zone.x().interval);
        assert_eq!(model.var_bounds(data.start()).lower(), 10);
        assert_eq!(model.var_bounds(data.end()).lower(), 17);
        assert_eq!(model.var_bounds(zone.y().end).lower(), 32);
        // Two interval links plus two containment bounds per axis.
        assert_eq!(model.num_constraints(), 6);
        assert_eq!(format!("{}", zone), "FloodZone((10, 20) 7x12)");
    }
}
