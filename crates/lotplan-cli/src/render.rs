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

//! # Plan Rendering
//!
//! A `Renderer` writes a `LayoutPlan` to any `io::Write`. Two renderers
//! exist: `SvgRenderer` draws the lot as a scalable image with the Y axis
//! pointing up, and `AsciiRenderer` prints one character per lot cell.

use lotplan_layout::{
    entity::EntityKind,
    extract::{LayoutPlan, PlacedRect},
};
use std::io::Write;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write the rendered plan")]
    Io(#[from] std::io::Error),
    #[error("a {width}x{height} lot cannot be rendered")]
    InvalidExtent { width: i64, height: i64 },
}

pub trait Renderer {
    fn name(&self) -> &str;

    fn render(&self, plan: &LayoutPlan, out: &mut dyn Write) -> Result<(), RenderError>;
}

impl std::fmt::Debug for dyn Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Renderer({})", self.name())
    }
}

/// Paint order: later kinds are drawn over earlier ones. The pole may sit
/// on parking and on the flood zone, so it comes last.
const PAINT_ORDER: [EntityKind; 5] = [
    EntityKind::FloodZone,
    EntityKind::Building,
    EntityKind::ParkingLot,
    EntityKind::Park,
    EntityKind::UtilityPole,
];

fn painted(plan: &LayoutPlan) -> impl Iterator<Item = &PlacedRect> + '_ {
    PAINT_ORDER.into_iter().flat_map(move |kind| plan.of_kind(kind))
}

fn extent(plan: &LayoutPlan) -> Result<(usize, usize), RenderError> {
    let invalid = || RenderError::InvalidExtent {
        width: plan.width,
        height: plan.height,
    };
    let width = usize::try_from(plan.width).map_err(|_| invalid())?;
    let height = usize::try_from(plan.height).map_err(|_| invalid())?;
    Ok((width, height))
}

/// Pixels per lot unit when no scale is given.
pub const DEFAULT_SCALE: i64 = 10;

/// SVG output with one unit of the lot drawn as `scale` pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgRenderer {
    scale: i64,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE }
    }
}

impl SvgRenderer {
    /// Scales below one pixel are raised to one.
    #[inline]
    pub fn new(scale: i64) -> Self {
        Self { scale: scale.max(1) }
    }

    pub fn fill(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Building => "royalblue",
            EntityKind::ParkingLot => "grey",
            EntityKind::Park => "limegreen",
            EntityKind::FloodZone => "red",
            EntityKind::UtilityPole => "orange",
        }
    }
}

impl Renderer for SvgRenderer {
    fn name(&self) -> &str {
        "SvgRenderer"
    }

    fn render(&self, plan: &LayoutPlan, out: &mut dyn Write) -> Result<(), RenderError> {
        extent(plan)?;
        let s = self.scale;
        let (w, h) = (plan.width * s, plan.height * s);

        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        )?;
        writeln!(out, "  <title>Lot plan, yield {} ({})</title>", plan.lot_yield, plan.status)?;
        writeln!(
            out,
            r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="white" stroke="black"/>"#
        )?;
        for rect in painted(plan).filter(|r| r.size_x > 0 && r.size_y > 0) {
            // SVG grows downwards; the lot's Y axis points up.
            let y = (plan.height - rect.end_y()) * s;
            writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="black"><title>{}</title></rect>"#,
                rect.start_x * s,
                y,
                rect.size_x * s,
                rect.size_y * s,
                Self::fill(rect.kind),
                rect
            )?;
        }
        writeln!(out, "</svg>")?;
        Ok(())
    }
}

/// One character per lot cell, top row first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AsciiRenderer;

impl AsciiRenderer {
    pub fn symbol(kind: EntityKind) -> char {
        match kind {
            EntityKind::Building => 'B',
            EntityKind::ParkingLot => 'P',
            EntityKind::Park => 'G',
            EntityKind::FloodZone => 'F',
            EntityKind::UtilityPole => 'U',
        }
    }
}

impl Renderer for AsciiRenderer {
    fn name(&self) -> &str {
        "AsciiRenderer"
    }

    fn render(&self, plan: &LayoutPlan, out: &mut dyn Write) -> Result<(), RenderError> {
        let (width, height) = extent(plan)?;
        let mut grid = vec![vec!['.'; width]; height];

        for rect in painted(plan) {
            let symbol = Self::symbol(rect.kind);
            let clamp = |v: i64, hi: usize| usize::try_from(v.max(0)).map_or(hi, |v| v.min(hi));
            for y in clamp(rect.start_y, height)..clamp(rect.end_y(), height) {
                for cell in &mut grid[y][clamp(rect.start_x, width)..clamp(rect.end_x(), width)] {
                    *cell = symbol;
                }
            }
        }

        for row in grid.iter().rev() {
            writeln!(out, "{}", row.iter().collect::<String>())?;
        }
        Ok(())
    }
}
