//! Figure 3: cost-effectiveness scatter on a log cost axis.
//!
//! Bubble area scales with impact-per-$1000, color follows the same value on
//! a YlOrRd ramp, and a dashed quadratic trend is fitted to the physical-lab
//! points only. The remote lab sits far off that trend, which is the point
//! of the figure.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::HPos;
use plotters::style::{FontStyle, RGBAColor};

use crate::data::{self, OPTIMAL_COST_INDEX};
use crate::domain::{CostPoint, FigureStyle};
use crate::error::AppError;
use crate::figures::{
    draw_box, draw_multiline, palette, render_error, star_coords, star_marker, VAlign,
};
use crate::layout::LabelOffsets;
use crate::math::poly::{self, PolyFit};
use crate::stats;

pub const OUTPUT_NAME: &str = "Figure3_Cost_Effectiveness.png";

/// 14in x 9in at 300 DPI.
const WIDTH: u32 = 4200;
const HEIGHT: u32 = 2700;

/// Leading entries of [`data::cost_points`] that are physical labs; only
/// these feed the trend fit.
const PHYSICAL_LAB_COUNT: usize = 5;

/// What the report prints about this figure.
#[derive(Debug, Clone)]
pub struct CostSummary {
    pub labels: Vec<String>,
    pub impacts: Vec<f64>,
    /// Index of the largest impact-per-$1000 value.
    pub argmax_index: usize,
    /// Index of the editorially chosen optimum (the starred point).
    pub optimal_index: usize,
}

pub fn generate(out_dir: &Path, style: &FigureStyle) -> Result<(PathBuf, CostSummary), AppError> {
    let points = data::cost_points();
    let summary = derive(&points)?;

    let trend_points: Vec<(f64, f64)> = points[..PHYSICAL_LAB_COUNT]
        .iter()
        .map(|p| (p.cost, p.effect))
        .collect();
    let trend = poly::fit(&trend_points, 2)?;

    let path = out_dir.join(OUTPUT_NAME);
    draw(&path, &points, &summary, &trend, style).map_err(|e| render_error(&path, e))?;
    Ok((path, summary))
}

/// Impacts plus the argmax/editorial-optimum pair.
fn derive(points: &[CostPoint]) -> Result<CostSummary, AppError> {
    let impacts = points
        .iter()
        .map(|p| {
            stats::impact_per_1000(p.effect, p.cost).ok_or_else(|| {
                AppError::computation(format!("Non-positive cost for '{}'", flatten(p.label)))
            })
        })
        .collect::<Result<Vec<f64>, AppError>>()?;

    let argmax_index = impacts
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .ok_or_else(|| AppError::computation("Cost-effectiveness table is empty."))?;

    if OPTIMAL_COST_INDEX >= points.len() {
        return Err(AppError::computation(
            "Optimal-point index is out of range for the cost table.",
        ));
    }

    Ok(CostSummary {
        labels: points.iter().map(|p| flatten(p.label)).collect(),
        impacts,
        argmax_index,
        optimal_index: OPTIMAL_COST_INDEX,
    })
}

fn flatten(label: &str) -> String {
    label.replace('\n', " ")
}

/// Bubble radius in pixels for a marker whose *area* encodes the impact.
fn bubble_radius_px(impact: f64, style: &FigureStyle) -> i32 {
    let area_pt2 = impact * 400.0;
    let radius_pt = (area_pt2 / std::f64::consts::PI).sqrt();
    (style.px(radius_pt) as i32).max(6)
}

fn draw(
    path: &Path,
    points: &[CostPoint],
    summary: &CostSummary,
    trend: &PolyFit,
    style: &FigureStyle,
) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let font = |pt: f64| TextStyle::from((style.font_family, style.px(pt) as i32).into_font());
    let bold = |pt: f64| {
        TextStyle::from(
            (style.font_family, style.px(pt) as i32)
                .into_font()
                .style(FontStyle::Bold),
        )
    };
    let lh = |pt: f64| (style.px(pt) * 1.3) as i32;

    // Reserve the right strip for the impact colorbar.
    let (main, colorbar) = root.split_horizontally(3650);

    let mut chart = ChartBuilder::on(&main)
        .caption(
            "Cost-Effectiveness Analysis: Technology Integration Models",
            bold(18.0),
        )
        .margin(40)
        .x_label_area_size(180)
        .y_label_area_size(220)
        .build_cartesian_2d((200.0..60_000.0).log_scale(), 0.50..1.05)?;

    chart
        .configure_mesh()
        .bold_line_style(BLACK.mix(0.12))
        .light_line_style(TRANSPARENT)
        .x_desc("Cost per Student (USD)")
        .y_desc("Effect Size (Hedges' d)")
        .x_label_formatter(&|v| format!("${}", group_thousands(*v as i64)))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .label_style(font(13.0))
        .axis_desc_style(bold(16.0))
        .draw()?;

    let (lo, hi) = impact_bounds(&summary.impacts);

    // Dashed quadratic over the physical-lab cost span.
    let span_lo = points[0].cost;
    let span_hi = points[PHYSICAL_LAB_COUNT - 1].cost;
    let trend_color = RED.mix(0.5);
    chart
        .draw_series(DashedLineSeries::new(
            trend.sample(span_lo, span_hi, 120).into_iter(),
            20,
            14,
            trend_color.stroke_width(style.px(2.5) as u32),
        ))?
        .label("Physical Labs Trend (quadratic)")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 45, y)], trend_color.stroke_width(8))
        });

    // Bubbles, colored and sized by impact.
    for (i, p) in points.iter().enumerate() {
        let t = palette::normalize(summary.impacts[i], lo, hi);
        let fill = palette::ylorrd(t).mix(0.7);
        let r = bubble_radius_px(summary.impacts[i], style);
        chart.draw_series(std::iter::once(Circle::new(
            (p.cost, p.effect),
            r,
            fill.filled(),
        )))?;
        chart.draw_series(std::iter::once(Circle::new(
            (p.cost, p.effect),
            r,
            BLACK.stroke_width(style.px(2.0) as u32),
        )))?;
    }

    // Star on the editorial optimum.
    let gold = RGBColor(255, 215, 0);
    let dark_gold = RGBColor(184, 134, 11);
    let opt = &points[summary.optimal_index];
    let star_r = style.px(16.0);
    chart
        .draw_series(std::iter::once(star_marker(
            (opt.cost, opt.effect),
            star_r,
            gold,
            dark_gold,
            style.px(2.5) as u32,
        )))?
        .label("Optimal ROI: Remote Lab")
        .legend(move |(x, y)| {
            EmptyElement::at((x + 20, y)) + Polygon::new(star_coords(22.0, 8.8), gold.filled())
        });

    let area = chart.plotting_area();

    // Per-point labels with tuned offsets; index 4 (Industrial) would
    // collide with its own bubble at the default offset.
    let offsets = LabelOffsets::new((0.0, 0.03)).with_override(4, (3000.0, -0.03));
    for (i, p) in points.iter().enumerate() {
        let (dx, dy) = offsets.get(i);
        let anchor = (p.cost + dx, p.effect + dy);
        let text = format!(
            "{}\n${}\nd = {:.2}",
            p.label,
            group_thousands(p.cost as i64),
            p.effect
        );
        let v = if offsets.is_override(i) {
            VAlign::Top
        } else {
            VAlign::Bottom
        };
        label_with_backdrop(area, &text, anchor, lh(12.0), &font(12.0), v, style)?;
    }

    // Takeaway panel, lower right of the data region.
    draw_box(
        area,
        [(2800.0, 0.515), (56_000.0, 0.615)],
        palette::hex_color("#fff4e6").mix(0.8),
        palette::hex_color("#ff9900"),
        style.px(1.5) as u32,
    )?;
    draw_multiline(
        area,
        "Remote labs deliver 89% of industrial-grade effect\nat 3.75% of the cost",
        (12_500.0, 0.565),
        lh(14.0),
        &bold(14.0).color(&palette::hex_color("#8a4b00")),
        HPos::Center,
        VAlign::Center,
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .label_font(font(13.0))
        .draw()?;

    draw_colorbar(&colorbar, lo, hi, style)?;

    root.present()?;
    Ok(())
}

/// Min/max of the impact series for colormap normalization.
fn impact_bounds(impacts: &[f64]) -> (f64, f64) {
    let lo = impacts.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = impacts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (lo, hi)
}

/// Vertical gradient strip serving as the impact colorbar.
fn draw_colorbar<DB>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    lo: f64,
    hi: f64,
    style: &FigureStyle,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let font = |pt: f64| TextStyle::from((style.font_family, style.px(pt) as i32).into_font());
    let bold = |pt: f64| {
        TextStyle::from(
            (style.font_family, style.px(pt) as i32)
                .into_font()
                .style(FontStyle::Bold),
        )
    };

    let mut bar = ChartBuilder::on(area)
        .margin_top(300)
        .margin_bottom(300)
        .margin_left(60)
        .set_label_area_size(LabelAreaPosition::Right, 360)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;

    bar.configure_mesh()
        .disable_x_axis()
        .disable_mesh()
        .y_desc("Impact per $1,000 Invested")
        .y_label_formatter(&|v| format!("{v:.2}"))
        .label_style(font(12.0))
        .axis_desc_style(bold(14.0))
        .draw()?;

    const STEPS: usize = 256;
    let span = hi - lo;
    for k in 0..STEPS {
        let y0 = lo + span * k as f64 / STEPS as f64;
        let y1 = lo + span * (k + 1) as f64 / STEPS as f64;
        let color = palette::ylorrd(k as f64 / (STEPS - 1) as f64);
        bar.draw_series(std::iter::once(Rectangle::new(
            [(0.0, y0), (1.0, y1)],
            color.filled(),
        )))?;
    }
    bar.draw_series(std::iter::once(Rectangle::new(
        [(0.0, lo), (1.0, hi)],
        ShapeStyle {
            color: BLACK.to_rgba(),
            filled: false,
            stroke_width: style.px(1.0) as u32,
        },
    )))?;
    Ok(())
}

/// Multi-line label over a translucent white backdrop.
fn label_with_backdrop<DB, CT>(
    area: &DrawingArea<DB, CT>,
    text: &str,
    anchor: (f64, f64),
    line_px: i32,
    font: &TextStyle<'_>,
    v: VAlign,
    style: &FigureStyle,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    CT: plotters::coord::CoordTranslate<From = (f64, f64)>,
{
    let n = text.split('\n').count() as i32;
    let half_w = style.px(40.0) as i32;
    let pad = style.px(4.0) as i32;
    let block = n * line_px + 2 * pad;
    let corners = match v {
        VAlign::Bottom => [(-half_w, -block), (half_w, pad)],
        VAlign::Top => [(-half_w, -pad), (half_w, block)],
        VAlign::Center => [(-half_w, -block / 2), (half_w, block / 2)],
    };
    let backdrop: RGBAColor = WHITE.mix(0.85);
    area.draw(
        &(EmptyElement::at(anchor) + Rectangle::new(corners, backdrop.filled())),
    )?;
    draw_multiline(area, text, anchor, line_px, font, HPos::Center, v)?;
    Ok(())
}

/// `12000` -> `12,000`.
fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impacts_match_paper_table() {
        let summary = derive(&data::cost_points()).unwrap();
        let expect = [1.18, 0.8, 0.1943, 0.0608, 0.0235, 0.5933];
        for (got, want) in summary.impacts.iter().zip(expect) {
            assert!((got - want).abs() < 5e-4, "{got} vs {want}");
        }
    }

    #[test]
    fn argmax_differs_from_editorial_optimum() {
        let summary = derive(&data::cost_points()).unwrap();
        // Level-1 kits win on raw impact; the starred point is the remote lab.
        assert_eq!(summary.argmax_index, 0);
        assert_eq!(summary.optimal_index, 5);
    }

    #[test]
    fn non_positive_cost_is_a_computation_error() {
        let points = vec![CostPoint {
            label: "Broken",
            cost: 0.0,
            effect: 0.5,
        }];
        let err = derive(&points).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn bubble_radius_grows_with_impact_and_has_a_floor() {
        let style = FigureStyle::print();
        assert!(bubble_radius_px(1.18, &style) > bubble_radius_px(0.59, &style));
        assert_eq!(bubble_radius_px(0.0001, &style), 6);
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(500), "500");
        assert_eq!(group_thousands(1500), "1,500");
        assert_eq!(group_thousands(40000), "40,000");
    }
}
