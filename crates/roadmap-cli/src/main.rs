//! Roadmap table toolkit CLI.
//!
//! Provides the `roadmap` binary with subcommands for materializing node
//! tables from roadmap graph documents, validating them against the content
//! files on disk, reconciling drift, and printing hierarchy statistics.
//!
//! Uses the same `roadmap_pipeline` entry points end to end, so batch runs
//! and individual steps behave identically. Reports are printed as JSON to
//! stdout for machine-readable output.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use roadmap_pipeline::{
    hierarchy_stats_all, materialize_all, reconcile_all, run, validate_all, PipelineConfig,
};

/// Roadmap table materialization and reconciliation tools.
#[derive(Parser)]
#[command(name = "roadmap", about = "Roadmap table materialization and reconciliation tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Paths shared by every subcommand.
#[derive(Args)]
struct CommonArgs {
    /// Roadmaps root directory (one subdirectory per roadmap).
    #[arg(short, long)]
    roadmaps_dir: PathBuf,

    /// Output directory for the node tables (default: ./csv_output).
    #[arg(short, long, default_value = "./csv_output")]
    output_dir: PathBuf,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Materialize node tables from the graph documents.
    Materialize {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Validate persisted tables against the content files on disk.
    Validate {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Repair persisted tables until they validate clean.
    Reconcile {
        #[command(flatten)]
        common: CommonArgs,

        /// Bound on repair passes per roadmap.
        #[arg(long, default_value_t = roadmap_pipeline::run::DEFAULT_MAX_REPAIR_PASSES)]
        max_passes: usize,
    },
    /// Materialize, reconcile, and re-validate in one run.
    Run {
        #[command(flatten)]
        common: CommonArgs,

        /// Bound on repair passes per roadmap.
        #[arg(long, default_value_t = roadmap_pipeline::run::DEFAULT_MAX_REPAIR_PASSES)]
        max_passes: usize,
    },
    /// Print per-roadmap hierarchy statistics from the persisted tables.
    Stats {
        #[command(flatten)]
        common: CommonArgs,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Materialize { common } => cmd_materialize(config(common, None)),
        Commands::Validate { common } => cmd_validate(config(common, None)),
        Commands::Reconcile { common, max_passes } => {
            cmd_reconcile(config(common, Some(max_passes)))
        }
        Commands::Run { common, max_passes } => cmd_run(config(common, Some(max_passes))),
        Commands::Stats { common } => cmd_stats(config(common, None)),
    };
    process::exit(exit_code);
}

fn config(common: CommonArgs, max_passes: Option<usize>) -> PipelineConfig {
    let mut cfg = PipelineConfig::new(common.roadmaps_dir, common.output_dir);
    if let Some(max_passes) = max_passes {
        cfg.max_repair_passes = max_passes;
    }
    cfg
}

/// Exit codes: 0 = success/clean, 1 = batch error,
/// 2 = defects found or repair did not converge.
fn cmd_materialize(cfg: PipelineConfig) -> i32 {
    match materialize_all(&cfg) {
        Ok(summary) => {
            print_json(&summary);
            if summary.skipped_count() > 0 {
                2
            } else {
                0
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_validate(cfg: PipelineConfig) -> i32 {
    match validate_all(&cfg) {
        Ok(report) => {
            print_json(&report);
            if report.report.is_clean() {
                0
            } else {
                2
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_reconcile(cfg: PipelineConfig) -> i32 {
    match reconcile_all(&cfg) {
        Ok(report) => {
            print_json(&report);
            if report.nonconvergent > 0 {
                2
            } else {
                0
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_run(cfg: PipelineConfig) -> i32 {
    match run(&cfg) {
        Ok(report) => {
            let defective = report.materialize.skipped_count() > 0
                || report.reconcile.nonconvergent > 0
                || !report.validation.report.is_clean();
            print_json(&report);
            if defective {
                2
            } else {
                0
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_stats(cfg: PipelineConfig) -> i32 {
    match hierarchy_stats_all(&cfg) {
        Ok(stats) => {
            print_json(&stats);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize report: {}\"}}", e));
    println!("{}", json);
}
