//! Figure 4: HRC training-performance dashboard (2x2 panels).
//!
//! Panels a-c are per-metric time series with a rolling average and a mean
//! line; panel d is the throughput/workload trade-off scatter colored by
//! safety, with the Pareto-optimal episodes starred.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontStyle;

use crate::domain::{FigureStyle, Observation};
use crate::error::AppError;
use crate::figures::{palette, render_error, star_coords, star_marker};
use crate::io::ingest;
use crate::stats::{self, pareto_indices, rolling_mean, ParetoThresholds};

pub const OUTPUT_NAME: &str = "Figure4_HRC_Performance.png";
pub const DEFAULT_CSV: &str = "HRC_Aggregated_Fanuc.csv";

/// Episodes beyond this are ignored (the published run length).
pub const EPISODE_LIMIT: usize = 200;
/// Rolling-average window, in episodes.
pub const ROLLING_WINDOW: usize = 20;

/// 16in x 11in at 300 DPI.
const WIDTH: u32 = 4800;
const HEIGHT: u32 = 3300;

const THROUGHPUT_COLOR: &str = "#2E86AB";
const WORKLOAD_COLOR: &str = "#A23B72";
const SAFETY_COLOR: &str = "#F18F01";

/// Safety colormap bounds for panel d (percent).
const SAFETY_VMIN: f64 = 90.0;
const SAFETY_VMAX: f64 = 100.0;

/// What the report prints about this figure.
#[derive(Debug, Clone)]
pub struct PerformanceSummary {
    pub episodes: usize,
    pub mean_throughput: f64,
    pub mean_workload: f64,
    pub mean_safety: f64,
    pub pareto_count: usize,
}

/// Derived series handed to the renderer.
struct Derived {
    episodes: Vec<f64>,
    throughput: Vec<f64>,
    workload: Vec<f64>,
    safety: Vec<f64>,
    roll_throughput: Vec<Option<f64>>,
    roll_workload: Vec<Option<f64>>,
    roll_safety: Vec<Option<f64>>,
    pareto: Vec<usize>,
    summary: PerformanceSummary,
}

pub fn generate(
    csv_path: &Path,
    out_dir: &Path,
    style: &FigureStyle,
) -> Result<(PathBuf, PerformanceSummary), AppError> {
    let rows = ingest::load_observations(csv_path)?;
    let derived = derive(&rows)?;
    let path = out_dir.join(OUTPUT_NAME);
    draw(&path, &derived, style).map_err(|e| render_error(&path, e))?;
    Ok((path, derived.summary))
}

fn derive(rows: &[Observation]) -> Result<Derived, AppError> {
    let rows = &rows[..rows.len().min(EPISODE_LIMIT)];

    let episodes: Vec<f64> = rows.iter().map(|o| o.episode as f64).collect();
    let throughput: Vec<f64> = rows.iter().map(|o| o.throughput).collect();
    let workload = stats::rescale(&rows.iter().map(|o| o.workload).collect::<Vec<_>>(), 100.0);
    let safety = stats::rescale(&rows.iter().map(|o| o.safety).collect::<Vec<_>>(), 100.0);

    let mean_of = |series: &[f64], name: &str| {
        stats::mean(series)
            .ok_or_else(|| AppError::computation(format!("Empty {name} series after ingest.")))
    };
    let mean_throughput = mean_of(&throughput, "throughput")?;
    let mean_workload = mean_of(&workload, "workload")?;
    let mean_safety = mean_of(&safety, "safety")?;

    let cuts = ParetoThresholds::from_series(&throughput, &workload, &safety)
        .ok_or_else(|| AppError::computation("Pareto thresholds undefined for this dataset."))?;
    let pareto = pareto_indices(&throughput, &workload, &safety, &cuts);

    Ok(Derived {
        roll_throughput: rolling_mean(&throughput, ROLLING_WINDOW),
        roll_workload: rolling_mean(&workload, ROLLING_WINDOW),
        roll_safety: rolling_mean(&safety, ROLLING_WINDOW),
        summary: PerformanceSummary {
            episodes: rows.len(),
            mean_throughput,
            mean_workload,
            mean_safety,
            pareto_count: pareto.len(),
        },
        episodes,
        throughput,
        workload,
        safety,
        pareto,
    })
}

fn draw(path: &Path, d: &Derived, style: &FigureStyle) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let bold = |pt: f64| {
        TextStyle::from(
            (style.font_family, style.px(pt) as i32)
                .into_font()
                .style(FontStyle::Bold),
        )
    };

    let (title_area, body) = root.split_vertically(200);
    title_area.draw(&Text::new(
        "Human-Robot Collaboration Training Performance".to_string(),
        ((WIDTH / 2) as i32, 100),
        bold(20.0).pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;

    let panels = body.split_evenly((2, 2));

    let x_max = d.episodes.last().copied().unwrap_or(1.0) + 1.0;

    metric_panel(
        &panels[0],
        style,
        MetricPanel {
            title: "(a) Task Throughput Over Training",
            y_desc: "Throughput (tasks/min)",
            y_range: 4.5..7.0,
            series: &d.throughput,
            rolling: &d.roll_throughput,
            color: palette::hex_color(THROUGHPUT_COLOR),
            mean: d.summary.mean_throughput,
            mean_label: format!("Mean: {:.2} tasks/min", d.summary.mean_throughput),
            mean_above: false,
            legend: SeriesLabelPosition::LowerRight,
            x_max,
        },
    )?;
    metric_panel(
        &panels[1],
        style,
        MetricPanel {
            title: "(b) Human Workload Over Training",
            y_desc: "Workload (0-100, lower is better)",
            y_range: 60.0..90.0,
            series: &d.workload,
            rolling: &d.roll_workload,
            color: palette::hex_color(WORKLOAD_COLOR),
            mean: d.summary.mean_workload,
            mean_label: format!("Mean: {:.1}", d.summary.mean_workload),
            mean_above: true,
            legend: SeriesLabelPosition::UpperRight,
            x_max,
        },
    )?;
    metric_panel(
        &panels[2],
        style,
        MetricPanel {
            title: "(c) Safety Stop Avoidance",
            y_desc: "Safety Performance (%)",
            y_range: 85.0..101.0,
            series: &d.safety,
            rolling: &d.roll_safety,
            color: palette::hex_color(SAFETY_COLOR),
            mean: d.summary.mean_safety,
            mean_label: format!("Mean: {:.1}%", d.summary.mean_safety),
            mean_above: false,
            legend: SeriesLabelPosition::LowerRight,
            x_max,
        },
    )?;
    tradeoff_panel(&panels[3], d, style)?;

    root.present()?;
    Ok(())
}

struct MetricPanel<'a> {
    title: &'static str,
    y_desc: &'static str,
    y_range: std::ops::Range<f64>,
    series: &'a [f64],
    rolling: &'a [Option<f64>],
    color: RGBColor,
    mean: f64,
    mean_label: String,
    /// Place the mean annotation above the line instead of below.
    mean_above: bool,
    legend: SeriesLabelPosition,
    x_max: f64,
}

fn metric_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    style: &FigureStyle,
    p: MetricPanel<'_>,
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

    let y_floor = p.y_range.start;
    let mut chart = ChartBuilder::on(area)
        .caption(p.title, bold(15.0))
        .margin(30)
        .x_label_area_size(140)
        .y_label_area_size(180)
        .build_cartesian_2d(0.0..p.x_max, p.y_range.clone())?;

    chart
        .configure_mesh()
        .bold_line_style(BLACK.mix(0.12))
        .light_line_style(TRANSPARENT)
        .x_desc("Training Episode")
        .y_desc(p.y_desc)
        .label_style(font(12.0))
        .axis_desc_style(bold(14.0))
        .draw()?;

    let xs = || (1..=p.series.len()).map(|i| i as f64);

    chart
        .draw_series(
            AreaSeries::new(
                xs().zip(p.series.iter().copied()),
                y_floor,
                p.color.mix(0.25),
            )
            .border_style(p.color.stroke_width(style.px(1.5) as u32)),
        )?
        .label("Per-episode")
        .legend({
            let c = p.color;
            move |(x, y)| PathElement::new(vec![(x, y), (x + 45, y)], c.stroke_width(8))
        });

    let roll_pts: Vec<(f64, f64)> = xs()
        .zip(p.rolling.iter())
        .filter_map(|(x, r)| r.map(|v| (x, v)))
        .collect();
    chart
        .draw_series(DashedLineSeries::new(
            roll_pts.into_iter(),
            18,
            12,
            RED.stroke_width(style.px(2.5) as u32),
        ))?
        .label(format!("{ROLLING_WINDOW}-Episode Moving Avg"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 45, y)], RED.stroke_width(8)));

    // Dotted mean line plus its annotation.
    let mean_color = p.color.mix(0.9);
    chart.draw_series(DashedLineSeries::new(
        vec![(0.0, p.mean), (p.x_max, p.mean)].into_iter(),
        6,
        10,
        mean_color.stroke_width(style.px(2.0) as u32),
    ))?;

    let span = p.y_range.end - p.y_range.start;
    let dy = span * 0.04;
    let label_y = if p.mean_above {
        p.mean + dy
    } else {
        p.mean - dy
    };
    let text_style = bold(13.0)
        .color(&p.color)
        .pos(Pos::new(HPos::Left, VPos::Center));
    chart.plotting_area().draw(
        &(EmptyElement::at((p.x_max * 0.03, label_y))
            + Text::new(p.mean_label.clone(), (0, 0), text_style)),
    )?;

    chart
        .configure_series_labels()
        .position(p.legend)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .label_font(font(12.0))
        .draw()?;
    Ok(())
}

fn tradeoff_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    d: &Derived,
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

    let (main, colorbar) = area.split_horizontally(1950);

    let mut chart = ChartBuilder::on(&main)
        .caption("(d) Throughput-Workload Trade-off", bold(15.0))
        .margin(30)
        .x_label_area_size(140)
        .y_label_area_size(180)
        .build_cartesian_2d(5.0..7.0, 60.0..90.0)?;

    chart
        .configure_mesh()
        .bold_line_style(BLACK.mix(0.12))
        .light_line_style(TRANSPARENT)
        .x_desc("Throughput (tasks/min)")
        .y_desc("Workload (lower is better)")
        .label_style(font(12.0))
        .axis_desc_style(bold(14.0))
        .draw()?;

    chart.draw_series(d.throughput.iter().zip(&d.workload).zip(&d.safety).map(
        |((&t, &w), &s)| {
            let c = palette::rdylgn(palette::normalize(s, SAFETY_VMIN, SAFETY_VMAX));
            Circle::new((t, w), style.px(3.5) as i32, c.mix(0.8).filled())
        },
    ))?;

    let gold = RGBColor(255, 215, 0);
    let dark_gold = RGBColor(184, 134, 11);
    chart
        .draw_series(d.pareto.iter().map(|&i| {
            star_marker(
                (d.throughput[i], d.workload[i]),
                style.px(9.0),
                gold,
                dark_gold,
                style.px(1.5) as u32,
            )
        }))?
        .label(format!("Pareto-optimal ({} episodes)", d.pareto.len()))
        .legend(move |(x, y)| {
            EmptyElement::at((x + 20, y)) + Polygon::new(star_coords(20.0, 8.0), gold.filled())
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .label_font(font(12.0))
        .draw()?;

    // Safety colorbar.
    let mut bar = ChartBuilder::on(&colorbar)
        .margin_top(220)
        .margin_bottom(180)
        .margin_left(40)
        .set_label_area_size(LabelAreaPosition::Right, 260)
        .build_cartesian_2d(0.0..1.0, SAFETY_VMIN..SAFETY_VMAX)?;
    bar.configure_mesh()
        .disable_x_axis()
        .disable_mesh()
        .y_desc("Safety (%)")
        .y_label_formatter(&|v| format!("{v:.0}"))
        .label_style(font(11.0))
        .axis_desc_style(bold(13.0))
        .draw()?;

    const STEPS: usize = 256;
    let span = SAFETY_VMAX - SAFETY_VMIN;
    for k in 0..STEPS {
        let y0 = SAFETY_VMIN + span * k as f64 / STEPS as f64;
        let y1 = SAFETY_VMIN + span * (k + 1) as f64 / STEPS as f64;
        let color = palette::rdylgn(k as f64 / (STEPS - 1) as f64);
        bar.draw_series(std::iter::once(Rectangle::new(
            [(0.0, y0), (1.0, y1)],
            color.filled(),
        )))?;
    }
    bar.draw_series(std::iter::once(Rectangle::new(
        [(0.0, SAFETY_VMIN), (1.0, SAFETY_VMAX)],
        ShapeStyle {
            color: BLACK.to_rgba(),
            filled: false,
            stroke_width: style.px(1.0) as u32,
        },
    )))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_rows(n: usize) -> Vec<Observation> {
        (1..=n)
            .map(|i| {
                let t = i as f64 / n as f64;
                Observation {
                    episode: i as u32,
                    throughput: 5.0 + 1.5 * t,
                    workload: 0.85 - 0.2 * t,
                    safety: 0.90 + 0.08 * t,
                }
            })
            .collect()
    }

    #[test]
    fn derivation_caps_at_episode_limit() {
        let d = derive(&synthetic_rows(250)).unwrap();
        assert_eq!(d.summary.episodes, EPISODE_LIMIT);
        assert_eq!(d.throughput.len(), EPISODE_LIMIT);
        assert_eq!(d.roll_throughput.len(), EPISODE_LIMIT);
    }

    #[test]
    fn workload_and_safety_are_percent_scaled() {
        let d = derive(&synthetic_rows(50)).unwrap();
        assert!(d.workload.iter().all(|&v| (60.0..=90.0).contains(&v)));
        assert!(d.safety.iter().all(|&v| (85.0..=101.0).contains(&v)));
    }

    #[test]
    fn rolling_series_warm_up_is_empty() {
        let d = derive(&synthetic_rows(100)).unwrap();
        assert!(d.roll_throughput[..ROLLING_WINDOW - 1]
            .iter()
            .all(Option::is_none));
        assert!(d.roll_throughput[ROLLING_WINDOW - 1].is_some());
    }

    #[test]
    fn pareto_episodes_come_from_the_good_corner() {
        // Monotone improvement: the Pareto set is the tail of the run.
        let d = derive(&synthetic_rows(100)).unwrap();
        assert!(d.summary.pareto_count > 0);
        let cut = d.throughput.len() * 3 / 4;
        assert!(d.pareto.iter().all(|&i| i >= cut - 1));
    }
}
