//! Timing extraction from benchmark output.

use anyhow::{Context, Result};

/// Extract the elapsed seconds reported for `function` from one run's output.
///
/// The output is treated as a whitespace-delimited token stream. The first
/// token containing `function` as a substring marks the entry, and the token
/// immediately following it is parsed as the timing. First match wins.
///
/// The substring policy tolerates decorated names in the executable output
/// (e.g. `s271:`), but it is ambiguous when one configured identifier is a
/// substring of another (e.g. `s1` and `s10`); configured identifiers must
/// only ever match their own entry.
pub fn parse_timing(output: &str, function: &str) -> Result<f64> {
    let tokens: Vec<&str> = output.split_whitespace().collect();

    let position = tokens
        .iter()
        .position(|token| token.contains(function))
        .with_context(|| format!("function `{}` not found in benchmark output", function))?;

    let raw = tokens.get(position + 1).with_context(|| {
        format!("no timing token follows `{}` in benchmark output", function)
    })?;

    raw.parse::<f64>()
        .with_context(|| format!("malformed timing `{}` for function `{}`", raw, function))
}
