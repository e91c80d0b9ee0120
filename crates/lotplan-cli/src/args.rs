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

//! Command line flags.
//!
//! Every lot parameter can come from a JSON config file (`--config`) and be
//! overridden by an individual flag. Flags left out keep the file's value,
//! or the reference value when there is no file.

use crate::render::DEFAULT_SCALE;
use clap::Parser;
use lotplan_cp::solver::SolverParameters;
use lotplan_layout::{config::LotConfig, error::ConfigError};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lotplan", version, about = "Plans buildings, parking and a park on a lot")]
pub struct Args {
    /// JSON file with the lot configuration.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Lot width.
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i64>,

    /// Lot height.
    #[arg(long, allow_negative_numbers = true)]
    pub height: Option<i64>,

    /// Number of buildings.
    #[arg(long)]
    pub buildings: Option<usize>,

    /// Number of parking lots.
    #[arg(long)]
    pub parking_lots: Option<usize>,

    /// Minimum area of every building.
    #[arg(long)]
    pub min_building_area: Option<i64>,

    /// Search time budget in seconds.
    #[arg(long, value_name = "SECONDS")]
    pub time_limit: Option<f64>,

    /// Log search progress.
    #[arg(long)]
    pub log_search: bool,

    /// Write the plan as an SVG image.
    #[arg(long, value_name = "PATH")]
    pub svg: Option<PathBuf>,

    /// Pixels per lot unit in the SVG image.
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_SCALE)]
    pub scale: i64,

    /// Print the plan as a character grid.
    #[arg(long)]
    pub ascii: bool,

    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,

    /// Re-check the plan against every layout rule.
    #[arg(long)]
    pub verify: bool,
}

impl Args {
    /// The config file (or the defaults) with every given flag applied.
    pub fn lot_config(&self) -> Result<LotConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => LotConfig::from_json_file(path)?,
            None => LotConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(n) = self.buildings {
            config.num_buildings = n;
        }
        if let Some(n) = self.parking_lots {
            config.num_parking_lots = n;
        }
        if let Some(area) = self.min_building_area {
            config.min_building_area = area;
        }
        if let Some(secs) = self.time_limit {
            config.time_limit_secs = secs;
        }
        Ok(config)
    }

    pub fn solver_parameters(&self, config: &LotConfig) -> SolverParameters {
        config
            .solver_parameters()
            .with_log_search_progress(self.log_search)
    }
}
