//! The five figure generators plus shared drawing helpers.
//!
//! Each generator is a linear pipeline: load (or compile in) records, derive
//! presentation values, resolve layout, draw with Plotters, export one PNG.
//! The helpers below cover primitives Plotters has no built-in for:
//! multi-line text blocks, arrows, and star markers.

use std::error::Error;
use std::path::Path;

use plotters::coord::CoordTranslate;
use plotters::element::ComposedElement;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::AppError;

pub mod competency;
pub mod cost;
pub mod palette;
pub mod performance;
pub mod sensitivity;
pub mod taxonomy;

/// Vertical alignment of a multi-line text block relative to its anchor.
#[derive(Debug, Clone, Copy)]
pub(crate) enum VAlign {
    Top,
    Center,
    Bottom,
}

/// Map a failed render to the user-facing error.
///
/// The bitmap backend only writes the file when `present` succeeds, so a
/// failure here leaves no partial output behind.
pub(crate) fn render_error(path: &Path, err: Box<dyn Error>) -> AppError {
    AppError::io(format!("Failed to render '{}': {err}", path.display()))
}

/// Draw a `\n`-separated text block anchored at a data coordinate.
///
/// Line offsets are in backend pixels so the block keeps its shape at any
/// data scale; `v` selects whether the anchor is the block's top edge,
/// vertical center, or bottom edge.
pub(crate) fn draw_multiline<DB, CT>(
    area: &DrawingArea<DB, CT>,
    text: &str,
    at: (f64, f64),
    line_px: i32,
    font: &TextStyle<'_>,
    h: HPos,
    v: VAlign,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let lines: Vec<&str> = text.split('\n').collect();
    let n = lines.len() as i32;
    let vpos = match v {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    };
    let style = font.pos(Pos::new(h, vpos));

    for (i, line) in lines.iter().enumerate() {
        let i = i as i32;
        let dy = match v {
            VAlign::Top => i * line_px,
            VAlign::Center => (2 * i - (n - 1)) * line_px / 2,
            VAlign::Bottom => -(n - 1 - i) * line_px,
        };
        let element = EmptyElement::at(at) + Text::new((*line).to_string(), (0, dy), style.clone());
        area.draw(&element)?;
    }
    Ok(())
}

/// Filled box with a separate stroked border.
pub(crate) fn draw_box<DB, CT>(
    area: &DrawingArea<DB, CT>,
    corners: [(f64, f64); 2],
    fill: RGBAColor,
    edge: RGBColor,
    stroke_px: u32,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    area.draw(&Rectangle::new(corners, fill.filled()))?;
    area.draw(&Rectangle::new(
        corners,
        ShapeStyle {
            color: edge.to_rgba(),
            filled: false,
            stroke_width: stroke_px,
        },
    ))?;
    Ok(())
}

/// Vertical arrow from `(x, y_from)` to `(x, y_to)` with a filled head.
///
/// Assumes a y-up cartesian coordinate system.
pub(crate) fn draw_varrow<DB, CT>(
    area: &DrawingArea<DB, CT>,
    x: f64,
    y_from: f64,
    y_to: f64,
    color: RGBColor,
    stroke_px: u32,
    head_px: i32,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    CT: CoordTranslate<From = (f64, f64)>,
{
    area.draw(&PathElement::new(
        vec![(x, y_from), (x, y_to)],
        color.stroke_width(stroke_px),
    ))?;

    // Backend pixels grow downward, so an upward-pointing head has its base
    // corners at positive dy.
    let dy = if y_to > y_from { head_px } else { -head_px };
    let half = (head_px * 2) / 3;
    let head = EmptyElement::at((x, y_to))
        + Polygon::new(vec![(0, 0), (-half, dy), (half, dy)], color.filled());
    area.draw(&head)?;
    Ok(())
}

/// Ten-vertex star outline in backend pixels, point up, centered on (0, 0).
pub(crate) fn star_coords(outer_px: f64, inner_px: f64) -> Vec<(i32, i32)> {
    let mut pts = Vec::with_capacity(10);
    for k in 0..10 {
        let r = if k % 2 == 0 { outer_px } else { inner_px };
        let ang = -std::f64::consts::FRAC_PI_2 + k as f64 * std::f64::consts::PI / 5.0;
        pts.push(((r * ang.cos()).round() as i32, (r * ang.sin()).round() as i32));
    }
    pts
}

/// Star marker element anchored at a data coordinate.
pub(crate) fn star_marker<DB>(
    at: (f64, f64),
    outer_px: f64,
    fill: RGBColor,
    edge: RGBColor,
    stroke_px: u32,
) -> ComposedElement<(f64, f64), DB, Polygon<(i32, i32)>, PathElement<(i32, i32)>>
where
    DB: DrawingBackend,
{
    let pts = star_coords(outer_px, outer_px * 0.4);
    let mut outline = pts.clone();
    outline.push(pts[0]);
    EmptyElement::at(at)
        + Polygon::new(pts, fill.filled())
        + PathElement::new(outline, edge.stroke_width(stroke_px))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_has_ten_vertices_point_up() {
        let pts = star_coords(50.0, 20.0);
        assert_eq!(pts.len(), 10);
        // First vertex is the upward tip (negative pixel y).
        assert_eq!(pts[0].0, 0);
        assert_eq!(pts[0].1, -50);
    }
}
