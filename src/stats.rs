//! Median aggregation over raw timing samples.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;

/// Exact median: the middle element of the sorted sequence for odd lengths,
/// the mean of the two middle elements for even lengths.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn median(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Reduce one strategy's keyed sample lists to a per-function medians table.
///
/// Enforces the collection invariant: every configured function must have
/// exactly `runs` samples. A missing function or a count mismatch is fatal.
pub fn aggregate(
    functions: &[String],
    runs: usize,
    samples: &HashMap<String, Vec<f64>>,
) -> Result<HashMap<String, f64>> {
    let mut medians = HashMap::new();

    for function in functions {
        let collected = samples
            .get(function)
            .with_context(|| format!("no samples collected for function `{}`", function))?;

        if collected.len() != runs {
            bail!(
                "function `{}` has {} samples, expected {}",
                function,
                collected.len(),
                runs
            );
        }

        let value = median(collected)
            .with_context(|| format!("median undefined for function `{}`", function))?;
        medians.insert(function.clone(), value);
    }

    Ok(medians)
}
