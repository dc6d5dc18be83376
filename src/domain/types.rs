//! Shared presentation-record types.
//!
//! These are deliberately dumb data carriers: each figure generator loads
//! (or compiles in) a list of them, derives summary values, and hands the
//! results to the renderer. Nothing here is mutated after construction.

/// One tier of the technology-complexity taxonomy (pyramid figure).
///
/// Insertion order is significant: index 0 is the bottom (widest) level.
#[derive(Debug, Clone)]
pub struct TechLevel {
    pub key: &'static str,
    pub name: &'static str,
    /// Newline-separated example systems, rendered as stacked lines.
    pub examples: &'static str,
    pub cost_range: &'static str,
    pub effect_label: &'static str,
    /// Fill color as a `#rrggbb` hex string.
    pub color: &'static str,
}

/// One point of the cost-effectiveness scatter.
#[derive(Debug, Clone)]
pub struct CostPoint {
    pub label: &'static str,
    /// Per-student cost in USD. Strictly positive by construction.
    pub cost: f64,
    /// Effect size (Hedges' d) from the meta-analysis; opaque input.
    pub effect: f64,
}

/// One row of the HRC training-episode time series.
///
/// `workload` and `safety` are stored as the raw 0-1 fractions from the CSV;
/// percentage rescaling happens in the derivation step, never in place.
#[derive(Debug, Clone)]
pub struct Observation {
    pub episode: u32,
    pub throughput: f64,
    pub workload: f64,
    pub safety: f64,
}

/// One row of the sensitivity-analysis CSV (one parameter at one setting).
#[derive(Debug, Clone)]
pub struct SensitivityRow {
    pub parameter: String,
    /// Multiplier applied to the parameter: 0.9, 1.0 (baseline), or 1.1.
    pub value: f64,
    pub throughput: f64,
    pub workload: f64,
    pub safety: f64,
    pub std_throughput: f64,
    pub std_workload: f64,
    pub std_safety: f64,
}

impl SensitivityRow {
    pub fn is_baseline(&self) -> bool {
        (self.value - 1.0).abs() < 1e-9
    }
}

/// A run of consecutive sensitivity rows sharing one parameter.
#[derive(Debug, Clone)]
pub struct SensitivityGroup {
    pub label: String,
    /// Row index of the first member (inclusive).
    pub start: usize,
    /// Row index one past the last member.
    pub end: usize,
    /// Shading color for the group background, `#rrggbb`.
    pub color: &'static str,
}

/// One level of the competency-progression model (Dreyfus-style).
#[derive(Debug, Clone)]
pub struct CompetencyLevel {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub tech_level: &'static str,
    pub pedagogy: &'static str,
    pub duration: &'static str,
    pub color: &'static str,
}

/// Immutable styling passed explicitly to every renderer.
///
/// Keeping this a plain value (instead of process-global plotting state)
/// means two figures can never observe each other's font settings.
#[derive(Debug, Clone, Copy)]
pub struct FigureStyle {
    pub font_family: &'static str,
    /// Pixels per typographic point at the target raster resolution.
    pub px_per_pt: f64,
}

impl FigureStyle {
    /// 300-DPI print style: 1pt = 300/72 px.
    pub fn print() -> Self {
        Self {
            font_family: "serif",
            px_per_pt: 300.0 / 72.0,
        }
    }

    /// Convert a typographic point size to backend pixels.
    pub fn px(&self, pt: f64) -> f64 {
        pt * self.px_per_pt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_style_matches_300_dpi() {
        let style = FigureStyle::print();
        // 12pt text at 300 DPI is 50px.
        assert!((style.px(12.0) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn baseline_detection() {
        let mut row = SensitivityRow {
            parameter: "fatigueRate".to_string(),
            value: 1.0,
            throughput: 0.0,
            workload: 0.0,
            safety: 0.0,
            std_throughput: 0.0,
            std_workload: 0.0,
            std_safety: 0.0,
        };
        assert!(row.is_baseline());
        row.value = 0.9;
        assert!(!row.is_baseline());
    }
}
