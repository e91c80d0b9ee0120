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

//! Lot configuration
//!
//! `LotConfig` carries every input of a planning run: the lot bounds, the
//! entity counts, the two fixed zones and the search budget. It
//! deserializes from JSON with every field optional; missing fields take
//! the reference values (a 60×40 lot with 5 buildings, 2 parking lots, a
//! 7×12 flood zone at (10, 20), a 5×5 utility pole at (40, 30), 5 seconds).
//!
//! ```rust
//! use lotplan_layout::config::LotConfig;
//!
//! let config = LotConfig::from_json_str(r#"{ "width": 30, "num_buildings": 3 }"#).unwrap();
//! assert_eq!(config.width, 30);
//! assert_eq!(config.height, 40);
//! assert_eq!(config.num_buildings, 3);
//! ```

use crate::error::ConfigError;
use lotplan_cp::solver::SolverParameters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// An axis-aligned rectangle with literal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl ZoneRect {
    #[inline]
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn end_x(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    pub const fn end_y(&self) -> i64 {
        self.y.saturating_add(self.height)
    }
}

impl std::fmt::Display for ZoneRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.x, self.y, self.width, self.height
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LotConfig {
    /// Lot extent along X.
    pub width: i64,
    /// Lot extent along Y.
    pub height: i64,
    pub num_buildings: usize,
    pub num_parking_lots: usize,
    pub flood_zone: ZoneRect,
    pub utility_pole: ZoneRect,
    /// Lower bound on every building area. `0` keeps zero-size buildings
    /// legal.
    pub min_building_area: i64,
    /// Wall-clock budget of the solve, in seconds.
    pub time_limit_secs: f64,
}

impl Default for LotConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            num_buildings: 5,
            num_parking_lots: 2,
            flood_zone: ZoneRect::new(10, 20, 7, 12),
            utility_pole: ZoneRect::new(40, 30, 5, 5),
            min_building_area: 0,
            time_limit_secs: 5.0,
        }
    }
}

impl LotConfig {
    /// Rejects configurations no model can be built for.
    ///
    /// Lot bounds are not checked here: a negative bound produces an empty
    /// domain, which the solver reports as an invalid model.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_buildings == 0 {
            return Err(ConfigError::NoBuildings);
        }
        if self.num_parking_lots == 0 {
            return Err(ConfigError::NoParkingLots);
        }
        if !(self.time_limit_secs.is_finite() && self.time_limit_secs > 0.0) {
            return Err(ConfigError::InvalidTimeLimit(self.time_limit_secs));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded lot config from {}", path.display());
        Self::from_json_str(&text)
    }

    /// The time budget, or `None` if `time_limit_secs` is not a positive
    /// finite number.
    pub fn time_limit(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.time_limit_secs)
            .ok()
            .filter(|d| !d.is_zero())
    }

    /// Default solver parameters with this configuration's time budget.
    pub fn solver_parameters(&self) -> SolverParameters {
        match self.time_limit() {
            Some(limit) => SolverParameters::default().with_time_limit(limit),
            None => SolverParameters::default(),
        }
    }
}

impl std::fmt::Display for LotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LotConfig({}x{}, buildings: {}, parking lots: {}, flood zone: {}, utility pole: {})",
            self.width,
            self.height,
            self.num_buildings,
            self.num_parking_lots,
            self.flood_zone,
            self.utility_pole
        )
    }
}
