//! Command-line parsing for the figure generator.
//!
//! Argument parsing and command dispatch stay separate from the derivation
//! and rendering code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::figures::{performance, sensitivity};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "arcfig",
    version,
    about = "Publication-figure generator for the ARC robotics-education framework"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands, one per figure plus `all`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Figure 2: technology-complexity taxonomy pyramid.
    Taxonomy(OutputArgs),
    /// Figure 3: cost-effectiveness scatter with trend and optimum star.
    Cost(OutputArgs),
    /// Figure 4: HRC training-performance dashboard (reads the episode CSV).
    Performance(PerformanceArgs),
    /// Figure 5: parameter-sensitivity grouped bars (reads the sweep CSV).
    Sensitivity(SensitivityArgs),
    /// Figure 6: competency-progression diagram.
    Competency(OutputArgs),
    /// Generate all five figures in order.
    All(AllArgs),
}

/// Options shared by the literal-data figures.
#[derive(Debug, Parser, Clone)]
pub struct OutputArgs {
    /// Directory the PNG is written into.
    #[arg(short = 'o', long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Debug, Parser, Clone)]
pub struct PerformanceArgs {
    /// HRC episode time-series CSV.
    #[arg(long, default_value = performance::DEFAULT_CSV)]
    pub csv: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct SensitivityArgs {
    /// Sensitivity-sweep CSV.
    #[arg(long, default_value = sensitivity::DEFAULT_CSV)]
    pub csv: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser, Clone)]
pub struct AllArgs {
    /// HRC episode time-series CSV.
    #[arg(long, default_value = performance::DEFAULT_CSV)]
    pub performance_csv: PathBuf,

    /// Sensitivity-sweep CSV.
    #[arg(long, default_value = sensitivity::DEFAULT_CSV)]
    pub sensitivity_csv: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_filenames() {
        let cli = Cli::parse_from(["arcfig", "performance"]);
        match cli.command {
            Command::Performance(args) => {
                assert_eq!(args.csv, PathBuf::from("HRC_Aggregated_Fanuc.csv"));
                assert_eq!(args.output.out_dir, PathBuf::from("."));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn all_accepts_both_csv_overrides() {
        let cli = Cli::parse_from([
            "arcfig",
            "all",
            "--performance-csv",
            "hrc.csv",
            "--sensitivity-csv",
            "sweep.csv",
            "-o",
            "out",
        ]);
        match cli.command {
            Command::All(args) => {
                assert_eq!(args.performance_csv, PathBuf::from("hrc.csv"));
                assert_eq!(args.sensitivity_csv, PathBuf::from("sweep.csv"));
                assert_eq!(args.output.out_dir, PathBuf::from("out"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn every_subcommand_parses() {
        for name in ["taxonomy", "cost", "performance", "sensitivity", "competency", "all"] {
            Cli::parse_from(["arcfig", name]);
        }
    }
}
