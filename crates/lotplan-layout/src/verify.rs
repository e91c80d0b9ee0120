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

//! Independent re-check of an extracted plan.
//!
//! `verify_plan` works only on the `PlacedRect`s of a `LayoutPlan` and the
//! `LotConfig` it was planned for; it never consults the constraint model.
//! A plan that passes is a valid lot layout regardless of how it was found.

use crate::{
    config::LotConfig,
    entity::EntityKind,
    extract::{LayoutPlan, PlacedRect},
    layout::PARKING_RATIO,
};
use lotplan_core::math::interval::ClosedOpenInterval;

/// The first rule a plan breaks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanViolation {
    #[error("expected {expected} {kind} rectangles, found {found}")]
    EntityCount {
        kind: EntityKind,
        expected: usize,
        found: usize,
    },
    #[error("{name} has a negative size or overflows")]
    NegativeSize { name: String },
    #[error("{name} lies outside the {width}x{height} lot")]
    OutOfBounds { name: String, width: i64, height: i64 },
    #[error("{name} reports area {area} but spans {size_x}x{size_y}")]
    AreaMismatch {
        name: String,
        area: i64,
        size_x: i64,
        size_y: i64,
    },
    #[error("{first} overlaps {second}")]
    Overlap { first: String, second: String },
    #[error("{larger} (area {larger_area}) is smaller than {smaller} (area {smaller_area})")]
    OrderViolated {
        larger: String,
        larger_area: i64,
        smaller: String,
        smaller_area: i64,
    },
    #[error("parking area {parking} cannot serve building area {buildings}")]
    ParkingRatio { parking: i64, buildings: i64 },
    #[error("park area {park} is below the largest building area {largest}")]
    ParkTooSmall { park: i64, largest: i64 },
    #[error("reported yield {reported} differs from the building area sum {actual}")]
    YieldMismatch { reported: i64, actual: i64 },
    #[error("{name} has area {area}, below the minimum of {minimum}")]
    BelowMinimumArea { name: String, area: i64, minimum: i64 },
}

/// The X and Y extents of a rectangle.
fn extents(rect: &PlacedRect) -> Result<(ClosedOpenInterval<i64>, ClosedOpenInterval<i64>), PlanViolation> {
    let negative = || PlanViolation::NegativeSize {
        name: rect.name.clone(),
    };
    let x = ClosedOpenInterval::from_start_len(rect.start_x, rect.size_x).ok_or_else(negative)?;
    let y = ClosedOpenInterval::from_start_len(rect.start_y, rect.size_y).ok_or_else(negative)?;
    Ok((x, y))
}

fn overlap(a: &PlacedRect, b: &PlacedRect) -> Result<(), PlanViolation> {
    let (ax, ay) = extents(a)?;
    let (bx, by) = extents(b)?;
    if ax.overlaps(bx) && ay.overlaps(by) {
        return Err(PlanViolation::Overlap {
            first: a.name.clone(),
            second: b.name.clone(),
        });
    }
    Ok(())
}

fn check_count(plan: &LayoutPlan, kind: EntityKind, expected: usize) -> Result<(), PlanViolation> {
    let found = plan.of_kind(kind).count();
    if found != expected {
        return Err(PlanViolation::EntityCount { kind, expected, found });
    }
    Ok(())
}

fn check_order(rects: &[&PlacedRect]) -> Result<(), PlanViolation> {
    for pair in rects.windows(2) {
        if pair[0].area < pair[1].area {
            return Err(PlanViolation::OrderViolated {
                larger: pair[0].name.clone(),
                larger_area: pair[0].area,
                smaller: pair[1].name.clone(),
                smaller_area: pair[1].area,
            });
        }
    }
    Ok(())
}

/// Checks a plan against every layout rule and returns the first violation.
pub fn verify_plan(plan: &LayoutPlan, config: &LotConfig) -> Result<(), PlanViolation> {
    check_count(plan, EntityKind::Building, config.num_buildings)?;
    check_count(plan, EntityKind::ParkingLot, config.num_parking_lots)?;
    check_count(plan, EntityKind::Park, 1)?;
    check_count(plan, EntityKind::FloodZone, 1)?;
    check_count(plan, EntityKind::UtilityPole, 1)?;

    let out_of_bounds = |rect: &PlacedRect| PlanViolation::OutOfBounds {
        name: rect.name.clone(),
        width: config.width,
        height: config.height,
    };
    let lot_x = ClosedOpenInterval::try_new(0, config.width);
    let lot_y = ClosedOpenInterval::try_new(0, config.height);
    for rect in &plan.rects {
        let (x, y) = extents(rect)?;
        match (lot_x, lot_y) {
            (Some(lx), Some(ly)) if lx.contains_interval(x) && ly.contains_interval(y) => {}
            _ => return Err(out_of_bounds(rect)),
        }
        if rect.size_x.checked_mul(rect.size_y) != Some(rect.area) {
            return Err(PlanViolation::AreaMismatch {
                name: rect.name.clone(),
                area: rect.area,
                size_x: rect.size_x,
                size_y: rect.size_y,
            });
        }
    }

    let batch: Vec<&PlacedRect> = plan
        .rects
        .iter()
        .filter(|r| r.kind != EntityKind::UtilityPole)
        .collect();
    for (i, a) in batch.iter().enumerate() {
        for b in &batch[i + 1..] {
            overlap(a, b)?;
        }
    }
    for pole in plan.of_kind(EntityKind::UtilityPole) {
        for rect in plan
            .rects
            .iter()
            .filter(|r| matches!(r.kind, EntityKind::Building | EntityKind::Park))
        {
            overlap(pole, rect)?;
        }
    }

    let buildings: Vec<&PlacedRect> = plan.of_kind(EntityKind::Building).collect();
    let parking: Vec<&PlacedRect> = plan.of_kind(EntityKind::ParkingLot).collect();
    check_order(&buildings)?;
    check_order(&parking)?;

    let building_sum = buildings.iter().fold(0i64, |acc, r| acc.saturating_add(r.area));
    let parking_sum = parking.iter().fold(0i64, |acc, r| acc.saturating_add(r.area));
    if parking_sum.saturating_mul(PARKING_RATIO) < building_sum {
        return Err(PlanViolation::ParkingRatio {
            parking: parking_sum,
            buildings: building_sum,
        });
    }

    let largest = buildings.iter().map(|r| r.area).max().unwrap_or(0);
    for park in plan.of_kind(EntityKind::Park) {
        if park.area < largest {
            return Err(PlanViolation::ParkTooSmall {
                park: park.area,
                largest,
            });
        }
    }

    if let Some(small) = buildings.iter().find(|r| r.area < config.min_building_area) {
        return Err(PlanViolation::BelowMinimumArea {
            name: small.name.clone(),
            area: small.area,
            minimum: config.min_building_area,
        });
    }

    if plan.lot_yield != building_sum {
        return Err(PlanViolation::YieldMismatch {
            reported: plan.lot_yield,
            actual: building_sum,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::ZoneRect, extract::PlanStatus};

    fn rect(kind: EntityKind, name: &str, x: i64, y: i64, w: i64, h: i64) -> PlacedRect {
        PlacedRect {
            kind,
            name: name.to_string(),
            start_x: x,
            start_y: y,
            size_x: w,
            size_y: h,
            area: w * h,
        }
    }

    fn config() -> LotConfig {
        LotConfig {
            width: 10,
            height: 4,
            num_buildings: 2,
            num_parking_lots: 1,
            flood_zone: ZoneRect::new(8, 0, 2, 2),
            utility_pole: ZoneRect::new(0, 0, 2, 2),
            ..LotConfig::default()
        }
    }

    /// A hand-made valid plan: the parking lot sits on the pole.
    fn plan() -> LayoutPlan {
        LayoutPlan {
            width: 10,
            height: 4,
            status: PlanStatus::Optimal,
            lot_yield: 6,
            rects: vec![
                rect(EntityKind::Building, "building_0", 2, 0, 2, 2),
                rect(EntityKind::Building, "building_1", 4, 0, 1, 2),
                rect(EntityKind::ParkingLot, "parking_lots_0", 0, 0, 1, 1),
                rect(EntityKind::Park, "park", 5, 0, 3, 4),
                rect(EntityKind::FloodZone, "flood_zone", 8, 0, 2, 2),
                rect(EntityKind::UtilityPole, "utility_pole", 0, 0, 2, 2),
            ],
        }
    }

    #[test]
    fn test_valid_plan_passes() {
        assert_eq!(verify_plan(&plan(), &config()), Ok(()));
    }

    #[test]
    fn test_detects_overlap() {
        let mut plan = plan();
        plan.rects[1].start_x = 3;
        assert_eq!(
            verify_plan(&plan, &config()),
            Err(PlanViolation::Overlap {
                first: "building_0".to_string(),
                second: "building_1".to_string(),
            })
        );
    }

    #[test]
    fn test_pole_may_share_space_with_flood_zone() {
        let mut config = config();
        config.utility_pole = ZoneRect::new(8, 0, 1, 1);
        let mut plan = plan();
        plan.rects[5] = rect(EntityKind::UtilityPole, "utility_pole", 8, 0, 1, 1);
        assert_eq!(verify_plan(&plan, &config), Ok(()));
    }

    #[test]
    fn test_detects_building_on_pole() {
        let mut plan = plan();
        plan.rects[1] = rect(EntityKind::Building, "building_1", 1, 1, 1, 1);
        assert!(matches!(
            verify_plan(&plan, &config()),
            Err(PlanViolation::Overlap { .. })
        ));
    }

    #[test]
    fn test_detects_ratio_and_park_size() {
        let mut plan = plan();
        plan.rects[2] = rect(EntityKind::ParkingLot, "parking_lots_0", 0, 0, 0, 0);
        assert_eq!(
            verify_plan(&plan, &config()),
            Err(PlanViolation::ParkingRatio {
                parking: 0,
                buildings: 6,
            })
        );

        let mut plan = self::plan();
        plan.rects[3] = rect(EntityKind::Park, "park", 5, 0, 1, 3);
        assert_eq!(
            verify_plan(&plan, &config()),
            Err(PlanViolation::ParkTooSmall { park: 3, largest: 4 })
        );
    }

    #[test]
    fn test_detects_order_and_yield() {
        let mut plan = plan();
        plan.rects.swap(0, 1);
        assert!(matches!(
            verify_plan(&plan, &config()),
            Err(PlanViolation::OrderViolated { .. })
        ));

        let mut plan = self::plan();
        plan.lot_yield = 7;
        assert_eq!(
            verify_plan(&plan, &config()),
            Err(PlanViolation::YieldMismatch { reported: 7, actual: 6 })
        );
    }

    #[test]
    fn test_detects_geometry_errors() {
        let mut plan = plan();
        plan.rects[3].size_y = 5;
        plan.rects[3].area = 15;
        assert!(matches!(
            verify_plan(&plan, &config()),
            Err(PlanViolation::OutOfBounds { .. })
        ));

        let mut plan = self::plan();
        plan.rects[0].area = 5;
        assert!(matches!(
            verify_plan(&plan, &config()),
            Err(PlanViolation::AreaMismatch { .. })
        ));

        let mut plan = self::plan();
        plan.rects[2].size_x = -1;
        assert_eq!(
            verify_plan(&plan, &config()),
            Err(PlanViolation::NegativeSize {
                name: "parking_lots_0".to_string(),
            })
        );
    }

    #[test]
    fn test_detects_minimum_area_and_counts() {
        let config = LotConfig {
            min_building_area: 3,
            ..config()
        };
        assert!(matches!(
            verify_plan(&plan(), &config),
            Err(PlanViolation::BelowMinimumArea { area: 2, minimum: 3, .. })
        ));

        let mut plan = plan();
        plan.rects.remove(1);
        assert_eq!(
            verify_plan(&plan, &self::config()),
            Err(PlanViolation::EntityCount {
                kind: EntityKind::Building,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_huge_area_sums_saturate() {
        // Four quadrants of a 2^32 square, each of area 2^62; the zones sit
        // in an extra strip below.
        let half: i64 = 1 << 31;
        let config = LotConfig {
            width: 2 * half,
            height: 2 * half + 1,
            num_buildings: 2,
            num_parking_lots: 1,
            flood_zone: ZoneRect::new(0, 2 * half, 1, 1),
            utility_pole: ZoneRect::new(1, 2 * half, 1, 1),
            ..LotConfig::default()
        };
        let mut plan = LayoutPlan {
            width: config.width,
            height: config.height,
            status: PlanStatus::Feasible,
            lot_yield: i64::MAX,
            rects: vec![
                rect(EntityKind::Building, "building_0", 0, 0, half, half),
                rect(EntityKind::Building, "building_1", half, 0, half, half),
                rect(EntityKind::ParkingLot, "parking_lots_0", 0, half, half, half),
                rect(EntityKind::Park, "park", half, half, half, half),
                rect(EntityKind::FloodZone, "flood_zone", 0, 2 * half, 1, 1),
                rect(EntityKind::UtilityPole, "utility_pole", 1, 2 * half, 1, 1),
            ],
        };
        assert_eq!(verify_plan(&plan, &config), Ok(()));

        plan.lot_yield = 0;
        assert_eq!(
            verify_plan(&plan, &config),
            Err(PlanViolation::YieldMismatch {
                reported: 0,
                actual: i64::MAX,
            })
        );
    }
}
