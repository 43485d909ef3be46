//! Comparison report: per-strategy medians tables, console summary and the
//! JSON artifact.

use crate::config::Strategy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Aggregated results of one full harness invocation: one medians table per
/// strategy over a shared set of function identifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub compiler: String,
    pub runs: usize,
    /// Function identifiers in configured order; all three tables carry
    /// exactly this key set.
    pub functions: Vec<String>,
    pub scalar_medians: HashMap<String, f64>,
    pub auto_vec_medians: HashMap<String, f64>,
    pub intrinsic_medians: HashMap<String, f64>,
}

impl ComparisonReport {
    /// Medians table for `strategy`.
    #[must_use]
    pub fn medians(&self, strategy: Strategy) -> &HashMap<String, f64> {
        match strategy {
            Strategy::Scalar => &self.scalar_medians,
            Strategy::AutoVec => &self.auto_vec_medians,
            Strategy::Intrinsic => &self.intrinsic_medians,
        }
    }

    /// Median runtime for one function under one strategy. A function absent
    /// from that strategy's table is fatal.
    pub fn median_for(&self, strategy: Strategy, function: &str) -> Result<f64> {
        self.medians(strategy)
            .get(function)
            .copied()
            .with_context(|| {
                format!(
                    "no {} median recorded for function `{}`",
                    strategy, function
                )
            })
    }

    /// Human-readable comparison block printed to stdout after a run.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Vectorization Comparison: {}\n", self.compiler));
        s.push_str(&format!(
            "Runs per strategy: {} | Functions: {}\n",
            self.runs,
            self.functions.len()
        ));
        s.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

        for function in &self.functions {
            s.push_str(&format!("\n{}:\n", function));
            for strategy in Strategy::ALL {
                if let Some(value) = self.medians(strategy).get(function) {
                    s.push_str(&format!("  {:<10} {:.6}s\n", strategy.label(), value));
                }
            }

            let scalar = self.scalar_medians.get(function);
            let intrinsic = self.intrinsic_medians.get(function);
            if let (Some(scalar), Some(intrinsic)) = (scalar, intrinsic) {
                if *intrinsic > 0.0 {
                    s.push_str(&format!(
                        "  speedup (scalar/intrinsic): {:.2}x\n",
                        scalar / intrinsic
                    ));
                }
            }
        }

        s
    }

    /// Serialize the full report to `path`, overwriting any existing file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}
