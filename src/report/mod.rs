//! Formatted terminal output for the figure pipelines.
//!
//! Formatting lives in one place so:
//! - derivation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use std::path::Path;

use crate::figures::cost::CostSummary;
use crate::figures::performance::PerformanceSummary;
use crate::figures::sensitivity::SensitivitySummary;

/// One "Saved: ..." block shared by every figure.
pub fn format_saved(path: &Path) -> String {
    let mut out = String::new();
    out.push_str(&format!("Saved: {}\n", path.display()));
    out.push_str("Resolution: 300 DPI\n");
    out
}

pub fn format_taxonomy_summary(path: &Path, levels: usize) -> String {
    let mut out = String::new();
    out.push_str("=== Figure 2 - Technology Complexity Taxonomy ===\n");
    out.push_str(&format!("Levels: {levels}\n"));
    out.push_str(&format_saved(path));
    out
}

/// Impact table plus the argmax/editorial-optimum comparison.
pub fn format_cost_summary(path: &Path, summary: &CostSummary) -> String {
    let mut out = String::new();
    out.push_str("=== Figure 3 - Cost-Effectiveness Analysis ===\n");
    out.push_str("Impact per $1,000 invested:\n");
    for (label, impact) in summary.labels.iter().zip(&summary.impacts) {
        out.push_str(&format!("  {label:<24} {impact:>8.4}\n"));
    }
    out.push_str(&format!(
        "Highest impact: {} ({:.4})\n",
        summary.labels[summary.argmax_index], summary.impacts[summary.argmax_index]
    ));
    out.push_str(&format!(
        "Starred optimum: {} ({:.4})\n",
        summary.labels[summary.optimal_index], summary.impacts[summary.optimal_index]
    ));
    out.push_str(&format_saved(path));
    out
}

pub fn format_performance_summary(path: &Path, summary: &PerformanceSummary) -> String {
    let mut out = String::new();
    out.push_str("=== Figure 4 - HRC Training Performance ===\n");
    out.push_str(&format!("Episodes: {}\n", summary.episodes));
    out.push_str(&format!(
        "Mean throughput: {:.2} tasks/min\n",
        summary.mean_throughput
    ));
    out.push_str(&format!("Mean workload:   {:.1}\n", summary.mean_workload));
    out.push_str(&format!("Mean safety:     {:.1}%\n", summary.mean_safety));
    out.push_str(&format!(
        "Pareto-optimal episodes: {}\n",
        summary.pareto_count
    ));
    out.push_str(&format_saved(path));
    out
}

pub fn format_sensitivity_summary(path: &Path, summary: &SensitivitySummary) -> String {
    let mut out = String::new();
    out.push_str("=== Figure 5 - Sensitivity Analysis ===\n");
    out.push_str(&format!(
        "Rows: {} across {} parameter groups\n",
        summary.rows,
        summary.groups.len()
    ));
    for group in &summary.groups {
        out.push_str(&format!("  - {group}\n"));
    }
    out.push_str(&format_saved(path));
    out
}

pub fn format_competency_summary(path: &Path, levels: usize) -> String {
    let mut out = String::new();
    out.push_str("=== Figure 6 - Competency Progression Model ===\n");
    out.push_str(&format!("Levels: {levels}\n"));
    out.push_str(&format_saved(path));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn saved_block_names_path_and_resolution() {
        let out = format_saved(&PathBuf::from("out/Figure2_Technology_Taxonomy.png"));
        assert!(out.contains("Figure2_Technology_Taxonomy.png"));
        assert!(out.contains("300 DPI"));
    }

    #[test]
    fn cost_summary_prints_both_optima() {
        let summary = CostSummary {
            labels: vec!["Level 1: Kits".into(), "Remote Lab (Level 5)".into()],
            impacts: vec![1.18, 0.5933],
            argmax_index: 0,
            optimal_index: 1,
        };
        let out = format_cost_summary(&PathBuf::from("fig3.png"), &summary);
        assert!(out.contains("Highest impact: Level 1: Kits"));
        assert!(out.contains("Starred optimum: Remote Lab (Level 5)"));
    }

    #[test]
    fn performance_summary_rounds_like_the_paper() {
        let summary = PerformanceSummary {
            episodes: 200,
            mean_throughput: 5.873,
            mean_workload: 71.24,
            mean_safety: 96.58,
            pareto_count: 14,
        };
        let out = format_performance_summary(&PathBuf::from("fig4.png"), &summary);
        assert!(out.contains("5.87 tasks/min"));
        assert!(out.contains("71.2"));
        assert!(out.contains("96.6%"));
        assert!(out.contains("Pareto-optimal episodes: 14"));
    }
}
