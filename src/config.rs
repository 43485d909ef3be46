//! Harness configuration and the fixed strategy axis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The three code-generation strategies under comparison.
///
/// Presentation order is fixed: scalar, auto_vec, intrinsic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Scalar,
    AutoVec,
    Intrinsic,
}

impl Strategy {
    /// All strategies in presentation order.
    pub const ALL: [Self; 3] = [Self::Scalar, Self::AutoVec, Self::Intrinsic];

    /// File name of the benchmark executable built with this strategy.
    #[must_use]
    pub fn executable_name(self) -> &'static str {
        match self {
            Self::Scalar => "tsvc_scalar_relaxed",
            Self::AutoVec => "tsvc_auto_vec_relaxed",
            Self::Intrinsic => "tsvc_intrinsic_relaxed",
        }
    }

    /// Short label used in the summary, chart legend and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::AutoVec => "auto_vec",
            Self::Intrinsic => "intrinsic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Harness configuration.
///
/// The binary always runs with `HarnessConfig::default()`; there are no
/// flags, environment variables or config files. Tests construct their own
/// values to point at fixture executables and temp artifact paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Compiler name selecting the executable subdirectory under `bin_root`.
    pub compiler: String,
    /// Benchmark runs per strategy.
    pub runs: usize,
    /// Kernel function identifiers to track in each run's output.
    pub functions: Vec<String>,
    /// Directory holding one subdirectory of executables per compiler.
    pub bin_root: PathBuf,
    /// Chart artifact path, overwritten on every run.
    pub chart_path: PathBuf,
    /// JSON report artifact path, overwritten on every run.
    pub report_path: PathBuf,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            compiler: "clang".to_string(),
            runs: 15,
            functions: vec!["s271".to_string(), "s274".to_string()],
            bin_root: PathBuf::from("bin"),
            chart_path: PathBuf::from("result.svg"),
            report_path: PathBuf::from("result.json"),
        }
    }
}

impl HarnessConfig {
    /// Path of the executable measuring `strategy` under this configuration.
    #[must_use]
    pub fn executable_path(&self, strategy: Strategy) -> PathBuf {
        self.bin_root
            .join(&self.compiler)
            .join(strategy.executable_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn executable_paths_follow_compiler_layout() {
        let config = HarnessConfig::default();
        assert_eq!(
            config.executable_path(Strategy::Scalar),
            Path::new("bin/clang/tsvc_scalar_relaxed")
        );
        assert_eq!(
            config.executable_path(Strategy::AutoVec),
            Path::new("bin/clang/tsvc_auto_vec_relaxed")
        );
        assert_eq!(
            config.executable_path(Strategy::Intrinsic),
            Path::new("bin/clang/tsvc_intrinsic_relaxed")
        );
    }

    #[test]
    fn strategy_order_is_fixed() {
        let labels: Vec<&str> = Strategy::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["scalar", "auto_vec", "intrinsic"]);
    }
}
