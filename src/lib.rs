//! Benchmark harness comparing scalar, auto-vectorized and intrinsic builds
//! of the TSVC numerical kernels.
//!
//! The pipeline is a strict linear sequence: run each strategy's executable a
//! fixed number of times, reduce the collected samples to per-function median
//! runtimes, then write the comparison report (console summary, JSON artifact
//! and grouped bar chart). Exposed as a library so the integration tests can
//! drive the pipeline end to end.

pub mod chart;
pub mod config;
pub mod parser;
pub mod report;
pub mod runner;
pub mod stats;

use anyhow::Result;
use config::{HarnessConfig, Strategy};
use report::ComparisonReport;
use std::collections::HashMap;

/// Run one strategy: invoke its executable, collect samples, aggregate.
fn run_strategy(config: &HarnessConfig, strategy: Strategy) -> Result<HashMap<String, f64>> {
    tracing::info!("Running {}", strategy);
    let executable = config.executable_path(strategy);
    let samples = runner::collect_samples(&executable, config.runs, &config.functions)?;
    stats::aggregate(&config.functions, config.runs, &samples)
}

/// Run the full pipeline for every strategy and write the report artifacts.
///
/// Returns the report so callers can inspect the medians.
pub fn run_harness(config: &HarnessConfig) -> Result<ComparisonReport> {
    tracing::info!("Running {} times", config.runs);

    let report = ComparisonReport {
        compiler: config.compiler.clone(),
        runs: config.runs,
        functions: config.functions.clone(),
        scalar_medians: run_strategy(config, Strategy::Scalar)?,
        auto_vec_medians: run_strategy(config, Strategy::AutoVec)?,
        intrinsic_medians: run_strategy(config, Strategy::Intrinsic)?,
    };

    println!("\n{}", report.summary());

    report.save_json(&config.report_path)?;
    tracing::info!("Report saved to: {}", config.report_path.display());

    chart::save_chart(&report, &config.chart_path)?;
    tracing::info!("Chart saved to: {}", config.chart_path.display());

    Ok(report)
}
