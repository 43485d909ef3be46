//! Sequential invocation of a strategy's benchmark executable.

use crate::parser::parse_timing;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

/// Run the executable once, blocking until exit, and capture its stdout as
/// UTF-8 text. Spawn failure, non-zero exit and non-UTF-8 output are fatal.
pub fn capture_run(executable: &Path) -> Result<String> {
    let output = Command::new(executable)
        .output()
        .with_context(|| format!("failed to run benchmark executable {}", executable.display()))?;

    if !output.status.success() {
        bail!(
            "benchmark executable {} exited with {}",
            executable.display(),
            output.status
        );
    }

    String::from_utf8(output.stdout)
        .with_context(|| format!("non-UTF-8 output from {}", executable.display()))
}

/// Run the executable `runs` times, extracting one sample per configured
/// function from each run's output.
///
/// Runs are strictly sequential so no two measurements contend for the CPU.
pub fn collect_samples(
    executable: &Path,
    runs: usize,
    functions: &[String],
) -> Result<HashMap<String, Vec<f64>>> {
    let mut samples: HashMap<String, Vec<f64>> = HashMap::new();

    let progress = ProgressBar::new(runs as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("=>-"),
    );
    if let Some(name) = executable.file_name() {
        progress.set_message(name.to_string_lossy().into_owned());
    }

    for _ in 0..runs {
        let stdout = capture_run(executable)?;
        for function in functions {
            let elapsed = parse_timing(&stdout, function)?;
            samples.entry(function.clone()).or_default().push(elapsed);
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    Ok(samples)
}
