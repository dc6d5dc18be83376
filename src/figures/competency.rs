//! Figure 6: competency-progression diagram (Dreyfus ladder with aligned
//! technology and pedagogy columns).

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::HPos;
use plotters::style::FontStyle;

use crate::data;
use crate::domain::{CompetencyLevel, FigureStyle};
use crate::error::AppError;
use crate::figures::{draw_box, draw_multiline, draw_varrow, palette, render_error, VAlign};
use crate::layout::StackSpec;

pub const OUTPUT_NAME: &str = "Figure6_Competency_Progression.png";

/// 16in x 11in at 300 DPI.
const WIDTH: u32 = 4800;
const HEIGHT: u32 = 3300;

/// Left-column ladder; rows keep a constant width (the ladder does not
/// taper like the taxonomy pyramid).
const STACK: StackSpec = StackSpec {
    center_x: 1.75,
    base_y: 1.8,
    step: 1.8,
    box_height: 1.4,
    w_max: 3.5,
    w_delta: 0.0,
};

/// Aligned column spans on the shared x axis.
const TECH_SPAN: (f64, f64) = (4.0, 7.2);
const PEDAGOGY_SPAN: (f64, f64) = (7.7, 11.5);
const DURATION_X: f64 = 12.0;
const HEADER_Y: f64 = 10.9;

pub fn generate(out_dir: &Path, style: &FigureStyle) -> Result<PathBuf, AppError> {
    let levels = data::competency_levels();
    let path = out_dir.join(OUTPUT_NAME);
    draw(&path, &levels, style).map_err(|e| render_error(&path, e))?;
    Ok(path)
}

fn draw(path: &Path, levels: &[CompetencyLevel], style: &FigureStyle) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let chart = ChartBuilder::on(&root).build_cartesian_2d(-0.2..13.3, 0.1..12.8)?;
    let area = chart.plotting_area();

    let font = |pt: f64| TextStyle::from((style.font_family, style.px(pt) as i32).into_font());
    let bold = |pt: f64| {
        TextStyle::from(
            (style.font_family, style.px(pt) as i32)
                .into_font()
                .style(FontStyle::Bold),
        )
    };
    let italic = |pt: f64| {
        TextStyle::from(
            (style.font_family, style.px(pt) as i32)
                .into_font()
                .style(FontStyle::Italic),
        )
    };
    let lh = |pt: f64| (style.px(pt) * 1.3) as i32;

    draw_multiline(
        area,
        "Competency Progression Model: Robotics Education Pathway",
        (6.55, 12.7),
        lh(20.0),
        &bold(20.0),
        HPos::Center,
        VAlign::Top,
    )?;
    draw_multiline(
        area,
        "Dreyfus-aligned skill development with matched technology and pedagogy",
        (6.55, 12.15),
        lh(16.0),
        &italic(16.0),
        HPos::Center,
        VAlign::Top,
    )?;

    column_headers(area, style)?;

    // Expert on top: level i occupies display row (n - 1 - i).
    let n = levels.len();
    for (i, level) in levels.iter().enumerate() {
        let bx = STACK.level_box(n - 1 - i);
        let fill = palette::hex_color(level.color).mix(0.85);

        draw_box(
            area,
            [(bx.x_left, bx.y_bottom), (bx.x_right(), bx.y_top())],
            fill,
            BLACK,
            style.px(2.0) as u32,
        )?;
        draw_multiline(
            area,
            level.key,
            (bx.x_left + 0.15, bx.y_top() - 0.15),
            lh(15.0),
            &bold(15.0),
            HPos::Left,
            VAlign::Top,
        )?;
        draw_multiline(
            area,
            level.name,
            (bx.x_center() + 0.35, bx.y_top() - 0.15),
            lh(15.0),
            &bold(15.0),
            HPos::Center,
            VAlign::Top,
        )?;
        draw_multiline(
            area,
            level.description,
            (bx.x_center(), bx.y_center() - 0.25),
            lh(12.0),
            &font(12.0),
            HPos::Center,
            VAlign::Center,
        )?;

        // Matched technology tier.
        draw_box(
            area,
            [(TECH_SPAN.0, bx.y_bottom), (TECH_SPAN.1, bx.y_top())],
            palette::hex_color("#5b9bd5").mix(0.8),
            BLACK,
            style.px(1.5) as u32,
        )?;
        draw_multiline(
            area,
            level.tech_level,
            ((TECH_SPAN.0 + TECH_SPAN.1) / 2.0, bx.y_center()),
            lh(13.0),
            &bold(13.0),
            HPos::Center,
            VAlign::Center,
        )?;

        // Matched pedagogy.
        draw_box(
            area,
            [(PEDAGOGY_SPAN.0, bx.y_bottom), (PEDAGOGY_SPAN.1, bx.y_top())],
            palette::hex_color("#70ad47").mix(0.8),
            BLACK,
            style.px(1.5) as u32,
        )?;
        draw_multiline(
            area,
            level.pedagogy,
            ((PEDAGOGY_SPAN.0 + PEDAGOGY_SPAN.1) / 2.0, bx.y_center()),
            lh(12.0),
            &font(12.0),
            HPos::Center,
            VAlign::Center,
        )?;

        // Duration tag.
        let tag_w = style.px(38.0) as i32;
        let tag_h = style.px(11.0) as i32;
        area.draw(
            &(EmptyElement::at((DURATION_X + 0.45, bx.y_center()))
                + Rectangle::new(
                    [(-tag_w, -tag_h), (tag_w, tag_h)],
                    palette::hex_color("#ffd300").mix(0.6).filled(),
                )),
        )?;
        draw_multiline(
            area,
            level.duration,
            (DURATION_X + 0.45, bx.y_center()),
            lh(14.0),
            &bold(14.0),
            HPos::Center,
            VAlign::Center,
        )?;
    }

    // Upward progression arrows between adjacent ladder rows.
    let arrow = palette::hex_color("#e74c3c");
    for row in 1..n {
        let lower = STACK.level_box(row - 1);
        let upper = STACK.level_box(row);
        draw_varrow(
            area,
            STACK.center_x,
            lower.y_top(),
            upper.y_bottom,
            arrow,
            style.px(3.0) as u32,
            40,
        )?;
    }

    // Footnote panel.
    draw_box(
        area,
        [(0.3, 0.2), (12.8, 1.35)],
        palette::hex_color("#fff4e6").mix(0.7),
        palette::hex_color("#ff9900"),
        style.px(1.5) as u32,
    )?;
    draw_multiline(
        area,
        "Progression through levels follows the Dreyfus model of skill acquisition.\n\
         Technology complexity and pedagogical autonomy increase together; durations are cumulative\n\
         estimates for a standard engineering curriculum with regular laboratory access.",
        (6.55, 0.775),
        lh(14.0),
        &italic(14.0),
        HPos::Center,
        VAlign::Center,
    )?;

    root.present()?;
    Ok(())
}

/// Boxed column headers above the ladder.
fn column_headers<DB, CT>(
    area: &DrawingArea<DB, CT>,
    style: &FigureStyle,
) -> Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    CT: plotters::coord::CoordTranslate<From = (f64, f64)>,
{
    let bold = |pt: f64| {
        TextStyle::from(
            (style.font_family, style.px(pt) as i32)
                .into_font()
                .style(FontStyle::Bold),
        )
    };
    let lh = |pt: f64| (style.px(pt) * 1.3) as i32;

    let headers: [(&str, f64, &str); 4] = [
        ("Competency Level\n& Characteristics", STACK.center_x, "#d4ddf5"),
        (
            "Technology\nLevel",
            (TECH_SPAN.0 + TECH_SPAN.1) / 2.0,
            "#77b5fe",
        ),
        (
            "Pedagogical\nApproaches",
            (PEDAGOGY_SPAN.0 + PEDAGOGY_SPAN.1) / 2.0,
            "#3cb371",
        ),
        ("Typical\nDuration", DURATION_X + 0.45, "#fed83a"),
    ];

    for (text, cx, color) in headers {
        let half_w = style.px(52.0) as i32;
        let half_h = style.px(24.0) as i32;
        area.draw(
            &(EmptyElement::at((cx, HEADER_Y))
                + Rectangle::new(
                    [(-half_w, -half_h), (half_w, half_h)],
                    palette::hex_color(color).mix(0.6).filled(),
                )),
        )?;
        draw_multiline(
            area,
            text,
            (cx, HEADER_Y),
            lh(14.0),
            &bold(14.0),
            HPos::Center,
            VAlign::Center,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_rows_do_not_overlap_the_headers() {
        let n = data::competency_levels().len();
        // Top row (Expert) must finish below the header band.
        let top = STACK.level_box(n - 1);
        assert!(top.y_top() < HEADER_Y - 0.4);
    }

    #[test]
    fn ladder_keeps_constant_width() {
        for i in 0..5 {
            let bx = STACK.level_box(i);
            assert!((bx.width - 3.5).abs() < 1e-12);
        }
    }

    #[test]
    fn columns_do_not_collide() {
        assert!(STACK.level_box(0).x_right() < TECH_SPAN.0);
        assert!(TECH_SPAN.1 < PEDAGOGY_SPAN.0);
        assert!(PEDAGOGY_SPAN.1 < DURATION_X);
    }
}
