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

//! # Lotplan Layout
//!
//! The lot layout domain on top of the constraint model. A `LotConfig`
//! describes the lot, the entity counts and two fixed zones; `LayoutModel`
//! turns it into a `CpModel` whose objective is the total building area;
//! `ResultExtractor` reads a solved response back into a `LayoutPlan`.
//!
//! ```rust,no_run
//! use lotplan_layout::{config::LotConfig, pipeline::solve_lot};
//!
//! let outcome = solve_lot(&LotConfig::default()).expect("reference lot");
//! println!("Yield: {}", outcome.plan().lot_yield);
//! ```
//!
//! ## Module map
//!
//! - `config`: `LotConfig` and the fixed-zone rectangles.
//! - `entity`: variable rectangles and fixed zones.
//! - `layout`: constraint generation and the objective.
//! - `extract`: `LayoutPlan` and `ResultExtractor`.
//! - `verify`: an independent check of a plan.
//! - `pipeline`: build, solve and extract in one call.
//! - `error`: `ConfigError` and `LayoutError`.

pub mod config;
pub mod entity;
pub mod error;
pub mod extract;
pub mod layout;
pub mod pipeline;
pub mod verify;
