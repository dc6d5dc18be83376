//! Figure 2: technology-complexity taxonomy pyramid.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::HPos;
use plotters::style::{FontStyle, FontTransform};

use crate::data;
use crate::domain::{FigureStyle, TechLevel};
use crate::error::AppError;
use crate::figures::{draw_box, draw_multiline, draw_varrow, palette, render_error, VAlign};
use crate::layout::StackSpec;

pub const OUTPUT_NAME: &str = "Figure2_Technology_Taxonomy.png";

/// 14in x 10in at 300 DPI.
const WIDTH: u32 = 4200;
const HEIGHT: u32 = 3000;

/// Pyramid geometry tuned for exactly five levels.
const STACK: StackSpec = StackSpec {
    center_x: 5.0,
    base_y: 2.0,
    step: 1.8,
    box_height: 1.6,
    w_max: 8.0,
    w_delta: 1.0,
};

pub fn generate(out_dir: &Path, style: &FigureStyle) -> Result<PathBuf, AppError> {
    let levels = data::taxonomy_levels();
    let path = out_dir.join(OUTPUT_NAME);
    draw(&path, &levels, style).map_err(|e| render_error(&path, e))?;
    Ok(path)
}

fn draw(path: &Path, levels: &[TechLevel], style: &FigureStyle) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let chart = ChartBuilder::on(&root).build_cartesian_2d(0.0..10.0, 0.0..11.8)?;
    let area = chart.plotting_area();

    let font = |pt: f64| TextStyle::from((style.font_family, style.px(pt) as i32).into_font());
    let bold = |pt: f64| {
        TextStyle::from(
            (style.font_family, style.px(pt) as i32)
                .into_font()
                .style(FontStyle::Bold),
        )
    };
    let lh = |pt: f64| (style.px(pt) * 1.3) as i32;

    draw_multiline(
        area,
        "ARC Framework: Technology Complexity Taxonomy",
        (5.0, 11.7),
        lh(20.0),
        &bold(20.0),
        HPos::Center,
        VAlign::Top,
    )?;

    for (i, level) in levels.iter().enumerate() {
        let bx = STACK.level_box(i);
        draw_box(
            area,
            [(bx.x_left, bx.y_bottom), (bx.x_right(), bx.y_top())],
            palette::hex_color(level.color).mix(0.85),
            BLACK,
            style.px(2.5) as u32,
        )?;

        // The top level is narrow enough that the side texts collide at the
        // default size; shrink and tuck them in.
        let (body_pt, examples_x) = if i == levels.len() - 1 {
            (12.0, bx.x_left + 0.3)
        } else {
            (14.0, bx.x_left + 0.4)
        };

        draw_multiline(
            area,
            level.key,
            (bx.x_left + 0.3, bx.y_top() - 0.25),
            lh(17.0),
            &bold(17.0),
            HPos::Left,
            VAlign::Top,
        )?;
        draw_multiline(
            area,
            level.name,
            (bx.x_center(), bx.y_center() + 0.15),
            lh(16.0),
            &bold(16.0),
            HPos::Center,
            VAlign::Center,
        )?;
        draw_multiline(
            area,
            level.examples,
            (examples_x, bx.y_bottom + 0.15),
            lh(body_pt),
            &font(body_pt),
            HPos::Left,
            VAlign::Bottom,
        )?;
        draw_multiline(
            area,
            level.cost_range,
            (bx.x_right() - 0.4, bx.y_top() - 0.25),
            lh(body_pt),
            &font(body_pt),
            HPos::Right,
            VAlign::Top,
        )?;
        draw_multiline(
            area,
            level.effect_label,
            (bx.x_right() - 0.4, bx.y_bottom + 0.15),
            lh(13.0),
            &bold(13.0),
            HPos::Right,
            VAlign::Bottom,
        )?;
    }

    // Progression arrows up the shared axis.
    for i in 0..levels.len().saturating_sub(1) {
        draw_varrow(
            area,
            STACK.center_x,
            STACK.level_box(i).y_top(),
            STACK.level_box(i + 1).y_bottom,
            RED,
            style.px(3.5) as u32,
            45,
        )?;
    }

    // Rotated side annotations.
    let side_color = RGBColor(0x33, 0x33, 0x33);
    let left_style = TextStyle::from(
        (style.font_family, style.px(18.0) as i32)
            .into_font()
            .style(FontStyle::Bold)
            .transform(FontTransform::Rotate270),
    )
    .color(&side_color);
    let right_style = TextStyle::from(
        (style.font_family, style.px(18.0) as i32)
            .into_font()
            .style(FontStyle::Bold)
            .transform(FontTransform::Rotate90),
    )
    .color(&side_color);
    area.draw(&Text::new(
        "Increasing Complexity".to_string(),
        (0.4, 7.2),
        left_style,
    ))?;
    area.draw(&Text::new(
        "Increasing Effect Size".to_string(),
        (9.7, 4.8),
        right_style,
    ))?;

    // Footnote panel.
    draw_box(
        area,
        [(1.05, 0.15), (8.95, 1.4)],
        palette::hex_color("#fff4e6").mix(0.7),
        palette::hex_color("#ff9900"),
        style.px(1.5) as u32,
    )?;
    let note = TextStyle::from(
        (style.font_family, style.px(15.0) as i32)
            .into_font()
            .style(FontStyle::Italic),
    );
    draw_multiline(
        area,
        "Effect sizes (Hedges' d) based on meta-analysis of 52 studies (2019-2025).\n\
         Cost ranges represent typical per-student investment for educational institutions.\n\
         Progression pathway: Students advance through levels as competency increases.",
        (5.0, 0.775),
        lh(15.0),
        &note,
        HPos::Center,
        VAlign::Center,
    )?;

    root.present()?;
    Ok(())
}
