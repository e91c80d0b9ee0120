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

//! # Layout Model
//!
//! `LayoutModel::build` turns a `LotConfig` into a `CpModel<i64>`:
//!
//! 1. one `RectangleEntity` per building, parking lot and the park, and one
//!    `FixedZone` each for the flood zone and the utility pole;
//! 2. a single no-overlap-2D over buildings, parking lots, park and flood
//!    zone, plus pairwise no-overlap-2D between the pole and every building
//!    and between the pole and the park;
//! 3. area ordering within buildings and within parking lots, the parking
//!    ratio `10 · Σ parking >= Σ buildings` and `park >= max(buildings)`;
//! 4. `lot_yield == Σ buildings`, maximized.
//!
//! The pole is not part of the batch: parking may sit on top
//! of it, and it may lie inside the flood zone.

use crate::{
    config::LotConfig,
    entity::{EntityKind, FixedZone, RectangleEntity},
    error::LayoutError,
};
use lotplan_cp::{
    builder::CpModelBuilder,
    expr::LinearExpr,
    model::CpModel,
    var::IntVar,
};

/// Parking area required per unit of building area, as `PARKING_RATIO · Σ
/// parking >= Σ buildings`.
pub const PARKING_RATIO: i64 = 10;

/// The built model together with handles to every entity.
#[derive(Debug, Clone)]
pub struct LayoutModel {
    model: CpModel<i64>,
    width: i64,
    height: i64,
    buildings: Vec<RectangleEntity>,
    parking_lots: Vec<RectangleEntity>,
    park: RectangleEntity,
    flood_zone: FixedZone,
    utility_pole: FixedZone,
    largest_building: IntVar,
    lot_yield: IntVar,
}

impl LayoutModel {
    /// Builds the model for a configuration.
    ///
    /// Fails only when the configuration itself is rejected. Geometric
    /// impossibilities are left to the solver, and negative bounds produce
    /// a model that the solver reports as invalid.
    pub fn build(config: &LotConfig) -> Result<Self, LayoutError> {
        config.validate()?;

        let (bx, by) = (config.width, config.height);
        let area_bound = bx.saturating_mul(by);
        let mut b = CpModelBuilder::<i64>::new();

        let buildings: Vec<RectangleEntity> = (0..config.num_buildings)
            .map(|i| RectangleEntity::new(&mut b, EntityKind::Building, i, bx, by))
            .collect();
        let parking_lots: Vec<RectangleEntity> = (0..config.num_parking_lots)
            .map(|i| RectangleEntity::new(&mut b, EntityKind::ParkingLot, i, bx, by))
            .collect();
        let park = RectangleEntity::new(&mut b, EntityKind::Park, 0, bx, by);
        let flood_zone = FixedZone::new(&mut b, EntityKind::FloodZone, config.flood_zone, bx, by);
        let utility_pole = FixedZone::new(&mut b, EntityKind::UtilityPole, config.utility_pole, bx, by);

        // Batch disjointness. The pole is handled pairwise below.
        let batch: Vec<&RectangleEntity> = buildings
            .iter()
            .chain(parking_lots.iter())
            .chain(std::iter::once(&park))
            .collect();
        b.add_no_overlap_2d(
            batch
                .iter()
                .map(|e| e.x().interval)
                .chain(std::iter::once(flood_zone.x().interval)),
            batch
                .iter()
                .map(|e| e.y().interval)
                .chain(std::iter::once(flood_zone.y().interval)),
        );
        for entity in buildings.iter().chain(std::iter::once(&park)) {
            b.add_no_overlap_2d(
                [utility_pole.x().interval, entity.x().interval],
                [utility_pole.y().interval, entity.y().interval],
            );
        }

        for pair in buildings.windows(2) {
            b.add_ge(pair[0].area(), pair[1].area());
        }
        for pair in parking_lots.windows(2) {
            b.add_ge(pair[0].area(), pair[1].area());
        }

        let building_sum = LinearExpr::sum(buildings.iter().map(|e| e.area()));
        let parking_ratio = LinearExpr::weighted_sum(parking_lots.iter().map(|e| (e.area(), PARKING_RATIO)));
        b.add_ge(parking_ratio, building_sum.clone());

        let largest_building = b.new_int_var(0, area_bound, "largest_building");
        b.add_max_equality(largest_building, buildings.iter().map(|e| e.area()));
        b.add_ge(park.area(), largest_building);

        if config.min_building_area > 0 {
            for building in &buildings {
                b.add_ge(building.area(), LinearExpr::constant(config.min_building_area));
            }
        }

        let lot_yield = b.new_int_var(0, area_bound, "lot_yield");
        b.add_eq(lot_yield, building_sum);
        b.maximize(lot_yield);

        let model = b.build();
        log::debug!("built layout model for {}: {}", config, model);

        Ok(Self {
            model,
            width: bx,
            height: by,
            buildings,
            parking_lots,
            park,
            flood_zone,
            utility_pole,
            largest_building,
            lot_yield,
        })
    }

    #[inline]
    pub fn model(&self) -> &CpModel<i64> {
        &self.model
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.height
    }

    #[inline]
    pub fn buildings(&self) -> &[RectangleEntity] {
        &self.buildings
    }

    #[inline]
    pub fn parking_lots(&self) -> &[RectangleEntity] {
        &self.parking_lots
    }

    #[inline]
    pub fn park(&self) -> &RectangleEntity {
        &self.park
    }

    #[inline]
    pub fn flood_zone(&self) -> &FixedZone {
        &self.flood_zone
    }

    #[inline]
    pub fn utility_pole(&self) -> &FixedZone {
        &self.utility_pole
    }

    #[inline]
    pub fn largest_building(&self) -> IntVar {
        self.largest_building
    }

    #[inline]
    pub fn lot_yield(&self) -> IntVar {
        self.lot_yield
    }

    /// Every variable rectangle in placement order: buildings, parking lots,
    /// park.
    pub fn rectangles(&self) -> impl Iterator<Item = &RectangleEntity> + '_ {
        self.buildings
            .iter()
            .chain(self.parking_lots.iter())
            .chain(std::iter::once(&self.park))
    }
}

impl std::fmt::Display for LayoutModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LayoutModel(buildings: {}, parking_lots: {}, {})",
            self.buildings.len(),
            self.parking_lots.len(),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use lotplan_cp::{constraint::Constraint, model::ObjectiveSense, var::IntervalVar};

    fn no_overlaps(model: &CpModel<i64>) -> Vec<(&[IntervalVar], &[IntervalVar])> {
        model
            .constraints()
            .iter()
            .filter_map(|c| match c {
                Constraint::NoOverlap2D {
                    x_intervals,
                    y_intervals,
                } => Some((x_intervals.as_slice(), y_intervals.as_slice())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_default_model_shape() {
        let layout = LayoutModel::build(&LotConfig::default()).expect("default config is valid");
        let model = layout.model();

        assert_eq!(layout.buildings().len(), 5);
        assert_eq!(layout.parking_lots().len(), 2);
        assert_eq!(layout.rectangles().count(), 8);
        assert!(model.validate().is_ok());

        let objective = model.objective().expect("objective declared");
        assert_eq!(objective.sense(), ObjectiveSense::Maximize);
        assert_eq!(objective.expr().terms(), &[(layout.lot_yield(), 1)]);

        // One batch plus one pole pair per building and for the park.
        let sets = no_overlaps(model);
        assert_eq!(sets.len(), 1 + 5 + 1);
        assert_eq!(sets[0].0.len(), 9);
        assert!(sets[1..].iter().all(|(xs, _)| xs.len() == 2));
    }

    #[test]
    fn test_pole_is_never_paired_with_flood_zone_or_parking() {
        let layout = LayoutModel::build(&LotConfig::default()).expect("default config is valid");
        let pole = layout.utility_pole().x().interval;
        let flood = layout.flood_zone().x().interval;
        let parking: Vec<IntervalVar> = layout.parking_lots().iter().map(|p| p.x().interval).collect();

        for (xs, _) in no_overlaps(layout.model()) {
            if xs.contains(&pole) {
                assert!(!xs.contains(&flood));
                assert!(parking.iter().all(|p| !xs.contains(p)));
            }
        }
    }

    #[test]
    fn test_variable_names() {
        let layout = LayoutModel::build(&LotConfig::default()).expect("default config is valid");
        let model = layout.model();
        assert!(model.find_var("building_4_y_size").is_some());
        assert!(model.find_var("parking_lots_1_area").is_some());
        assert!(model.find_var("park_x_end").is_some());
        assert_eq!(model.find_var("lot_yield"), Some(layout.lot_yield()));
        assert_eq!(model.find_var("largest_building"), Some(layout.largest_building()));
    }

    #[test]
    fn test_min_building_area_adds_floors() {
        let base = LayoutModel::build(&LotConfig::default()).expect("valid");
        let config = LotConfig {
            min_building_area: 4,
            ..LotConfig::default()
        };
        let floored = LayoutModel::build(&config).expect("valid");
        assert_eq!(
            floored.model().num_constraints(),
            base.model().num_constraints() + 5
        );
    }

    #[test]
    fn test_rejected_config() {
        let config = LotConfig {
            num_parking_lots: 0,
            ..LotConfig::default()
        };
        assert!(matches!(
            LayoutModel::build(&config),
            Err(LayoutError::Config(ConfigError::NoParkingLots))
        ));
    }

    #[test]
    fn test_negative_bound_builds_invalid_model() {
        let config = LotConfig {
            width: -3,
            ..LotConfig::default()
        };
        let layout = LayoutModel::build(&config).expect("negative bounds pass config validation");
        assert!(layout.model().validate().is_err());
    }
}
