//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that
//! parses arguments, dispatches to the requested figure pipeline, and prints
//! its summary.

use std::path::Path;

use clap::Parser;

use crate::cli::{AllArgs, Cli, Command, OutputArgs, PerformanceArgs, SensitivityArgs};
use crate::domain::FigureStyle;
use crate::error::AppError;
use crate::figures;
use crate::report;

/// Entry point for the `arcfig` binary.
pub fn run() -> Result<(), AppError> {
    // A bare `arcfig` regenerates the whole figure set, like `arcfig all`.
    //
    // Clap requires a subcommand name, so we rewrite the argv list before
    // parsing instead of special-casing the dispatch below.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    let style = FigureStyle::print();

    match cli.command {
        Command::Taxonomy(args) => handle_taxonomy(&args, &style),
        Command::Cost(args) => handle_cost(&args, &style),
        Command::Performance(args) => handle_performance(&args, &style),
        Command::Sensitivity(args) => handle_sensitivity(&args, &style),
        Command::Competency(args) => handle_competency(&args, &style),
        Command::All(args) => handle_all(&args, &style),
    }
}

fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let wants_passthrough = argv
        .iter()
        .skip(1)
        .any(|a| matches!(a.as_str(), "-h" | "--help" | "-V" | "--version"));
    let has_subcommand = argv.iter().skip(1).any(|a| !a.starts_with('-'));
    if !wants_passthrough && !has_subcommand {
        argv.insert(1, "all".to_string());
    }
    argv
}

fn ensure_out_dir(dir: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::io(format!(
            "Failed to create output directory '{}': {e}",
            dir.display()
        ))
    })
}

fn handle_taxonomy(args: &OutputArgs, style: &FigureStyle) -> Result<(), AppError> {
    ensure_out_dir(&args.out_dir)?;
    let path = figures::taxonomy::generate(&args.out_dir, style)?;
    let levels = crate::data::taxonomy_levels().len();
    print!("{}", report::format_taxonomy_summary(&path, levels));
    Ok(())
}

fn handle_cost(args: &OutputArgs, style: &FigureStyle) -> Result<(), AppError> {
    ensure_out_dir(&args.out_dir)?;
    let (path, summary) = figures::cost::generate(&args.out_dir, style)?;
    print!("{}", report::format_cost_summary(&path, &summary));
    Ok(())
}

fn handle_performance(args: &PerformanceArgs, style: &FigureStyle) -> Result<(), AppError> {
    ensure_out_dir(&args.output.out_dir)?;
    let (path, summary) = figures::performance::generate(&args.csv, &args.output.out_dir, style)?;
    print!("{}", report::format_performance_summary(&path, &summary));
    Ok(())
}

fn handle_sensitivity(args: &SensitivityArgs, style: &FigureStyle) -> Result<(), AppError> {
    ensure_out_dir(&args.output.out_dir)?;
    let (path, summary) = figures::sensitivity::generate(&args.csv, &args.output.out_dir, style)?;
    print!("{}", report::format_sensitivity_summary(&path, &summary));
    Ok(())
}

fn handle_competency(args: &OutputArgs, style: &FigureStyle) -> Result<(), AppError> {
    ensure_out_dir(&args.out_dir)?;
    let path = figures::competency::generate(&args.out_dir, style)?;
    let levels = crate::data::competency_levels().len();
    print!("{}", report::format_competency_summary(&path, levels));
    Ok(())
}

/// Generate every figure; the first failure aborts the batch.
fn handle_all(args: &AllArgs, style: &FigureStyle) -> Result<(), AppError> {
    let output = args.output.clone();
    handle_taxonomy(&output, style)?;
    println!();
    handle_cost(&output, style)?;
    println!();
    handle_performance(
        &PerformanceArgs {
            csv: args.performance_csv.clone(),
            output: output.clone(),
        },
        style,
    )?;
    println!();
    handle_sensitivity(
        &SensitivityArgs {
            csv: args.sensitivity_csv.clone(),
            output: output.clone(),
        },
        style,
    )?;
    println!();
    handle_competency(&output, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewritten(args: &[&str]) -> Vec<String> {
        rewrite_args(args.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn bare_invocation_becomes_all() {
        assert_eq!(rewritten(&["arcfig"]), vec!["arcfig", "all"]);
    }

    #[test]
    fn explicit_subcommands_pass_through() {
        assert_eq!(rewritten(&["arcfig", "taxonomy"]), vec!["arcfig", "taxonomy"]);
        assert_eq!(
            rewritten(&["arcfig", "performance", "--csv", "x.csv"]),
            vec!["arcfig", "performance", "--csv", "x.csv"]
        );
    }

    #[test]
    fn help_and_version_are_not_rewritten() {
        assert_eq!(rewritten(&["arcfig", "--help"]), vec!["arcfig", "--help"]);
        assert_eq!(rewritten(&["arcfig", "-V"]), vec!["arcfig", "-V"]);
    }
}
