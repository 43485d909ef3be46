//! Grouped bar chart rendering.
//!
//! The chart is hand-built SVG markup: one group per function identifier in
//! configured order, one bar per strategy within each group, value labels on
//! every bar, a wrapped title, a "Runtime(s)" axis and a strategy legend.

use crate::config::Strategy;
use crate::report::ComparisonReport;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 50.0;
const TITLE_WRAP_COLUMNS: usize = 60;
const Y_TICKS: usize = 4;

/// Bar fill per strategy, in `Strategy::ALL` order.
const STRATEGY_COLORS: [&str; 3] = ["#36a2eb", "#ff6384", "#4bc0c0"];

/// One chart group: a function identifier and its medians in strategy order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarGroup {
    pub function: String,
    pub medians: [f64; 3],
}

/// Chart data in render order: one group per function identifier, preserving
/// the configured order, with three medians per group in strategy order.
/// A function missing from any strategy's table is fatal.
pub fn bar_groups(report: &ComparisonReport) -> Result<Vec<BarGroup>> {
    report
        .functions
        .iter()
        .map(|function| {
            let mut medians = [0.0; 3];
            for (slot, strategy) in medians.iter_mut().zip(Strategy::ALL) {
                *slot = report.median_for(strategy, function)?;
            }
            Ok(BarGroup {
                function: function.clone(),
                medians,
            })
        })
        .collect()
}

/// Render the comparison chart as an SVG document.
pub fn render_chart(report: &ComparisonReport) -> Result<String> {
    let groups = bar_groups(report)?;
    if groups.is_empty() {
        bail!("no functions to chart");
    }

    let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let base_y = HEIGHT - MARGIN_BOTTOM;

    let max_median = groups
        .iter()
        .flat_map(|group| group.medians.iter().copied())
        .fold(0.0_f64, f64::max);
    // Headroom above the tallest bar keeps its value label inside the frame.
    let y_max = if max_median > 0.0 {
        max_median * 1.15
    } else {
        1.0
    };
    let scale = plot_height / y_max;

    let group_width = plot_width / groups.len() as f64;
    let bar_width = group_width / 4.0;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" font-family="sans-serif">"#,
        WIDTH, HEIGHT, WIDTH, HEIGHT
    );
    let _ = writeln!(
        svg,
        r#"<rect width="{}" height="{}" fill="white"/>"#,
        WIDTH, HEIGHT
    );

    let title = format!(
        "Comparison between scalar, auto_vec and intrinsic TSVC kernels ({})",
        report.compiler
    );
    for (line_index, line) in wrap_title(&title, TITLE_WRAP_COLUMNS).iter().enumerate() {
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="15">{}</text>"#,
            WIDTH / 2.0,
            24.0 + line_index as f64 * 18.0,
            xml_escape(line)
        );
    }

    for tick in 0..=Y_TICKS {
        let value = y_max * tick as f64 / Y_TICKS as f64;
        let y = base_y - value * scale;
        if tick > 0 {
            let _ = writeln!(
                svg,
                r##"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#dddddd"/>"##,
                MARGIN_LEFT,
                y,
                WIDTH - MARGIN_RIGHT,
                y
            );
        }
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" font-size="11">{}</text>"#,
            MARGIN_LEFT - 8.0,
            y + 4.0,
            format_seconds(value)
        );
    }

    let _ = writeln!(
        svg,
        r##"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#333333"/>"##,
        MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, base_y
    );
    let _ = writeln!(
        svg,
        r##"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="#333333"/>"##,
        MARGIN_LEFT,
        base_y,
        WIDTH - MARGIN_RIGHT,
        base_y
    );
    let _ = writeln!(
        svg,
        r#"<text x="20" y="{:.2}" transform="rotate(-90 20 {:.2})" text-anchor="middle" font-size="13">Runtime(s)</text>"#,
        MARGIN_TOP + plot_height / 2.0,
        MARGIN_TOP + plot_height / 2.0
    );

    for (group_index, group) in groups.iter().enumerate() {
        let group_left = MARGIN_LEFT + group_index as f64 * group_width;
        let first_bar_x = group_left + bar_width / 2.0;

        for (bar_index, value) in group.medians.iter().enumerate() {
            let x = first_bar_x + bar_index as f64 * bar_width;
            let height = value * scale;
            let y = base_y - height;
            let _ = writeln!(
                svg,
                r#"<rect class="bar" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                x,
                y,
                bar_width,
                height,
                STRATEGY_COLORS[bar_index]
            );
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="11">{}</text>"#,
                x + bar_width / 2.0,
                y - 4.0,
                format_seconds(*value)
            );
        }

        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="12">{}</text>"#,
            group_left + group_width / 2.0,
            base_y + 18.0,
            xml_escape(&group.function)
        );
    }

    for (legend_index, strategy) in Strategy::ALL.iter().enumerate() {
        let y = MARGIN_TOP + 10.0 + legend_index as f64 * 18.0;
        let _ = writeln!(
            svg,
            r#"<rect x="{:.2}" y="{:.2}" width="12" height="12" fill="{}"/>"#,
            WIDTH - MARGIN_RIGHT - 110.0,
            y - 10.0,
            STRATEGY_COLORS[legend_index]
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" font-size="12">{}</text>"#,
            WIDTH - MARGIN_RIGHT - 92.0,
            y,
            strategy.label()
        );
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Render the chart and write it to `path`, overwriting any existing file.
pub fn save_chart(report: &ComparisonReport, path: &Path) -> Result<()> {
    let svg = render_chart(report)?;
    std::fs::write(path, svg)
        .with_context(|| format!("failed to write chart to {}", path.display()))?;
    Ok(())
}

/// Greedy word wrap for the chart title.
fn wrap_title(title: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in title.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Seconds formatted for labels, with trailing zeros trimmed.
fn format_seconds(value: f64) -> String {
    let mut formatted = format!("{:.3}", value);
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }
    formatted
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn report_with(values: &[(&str, [f64; 3])]) -> ComparisonReport {
        let mut scalar = HashMap::new();
        let mut auto_vec = HashMap::new();
        let mut intrinsic = HashMap::new();
        let mut functions = Vec::new();

        for (function, medians) in values {
            functions.push((*function).to_string());
            scalar.insert((*function).to_string(), medians[0]);
            auto_vec.insert((*function).to_string(), medians[1]);
            intrinsic.insert((*function).to_string(), medians[2]);
        }

        ComparisonReport {
            compiler: "clang".to_string(),
            runs: 15,
            functions,
            scalar_medians: scalar,
            auto_vec_medians: auto_vec,
            intrinsic_medians: intrinsic,
        }
    }

    fn bar_heights(svg: &str) -> Vec<String> {
        svg.match_indices("class=\"bar\"")
            .map(|(index, _)| {
                let rest = &svg[index..];
                let start = rest.find("height=\"").unwrap() + "height=\"".len();
                let length = rest[start..].find('"').unwrap();
                rest[start..start + length].to_string()
            })
            .collect()
    }

    #[test]
    fn bar_groups_preserve_configured_order() {
        let report = report_with(&[
            ("s271", [8.0, 4.0, 2.0]),
            ("s274", [3.0, 1.5, 0.75]),
        ]);

        let groups = bar_groups(&report).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].function, "s271");
        assert_eq!(groups[0].medians, [8.0, 4.0, 2.0]);
        assert_eq!(groups[1].function, "s274");
        assert_eq!(groups[1].medians, [3.0, 1.5, 0.75]);
    }

    #[test]
    fn bar_groups_reject_function_missing_from_a_table() {
        let mut report = report_with(&[("s271", [8.0, 4.0, 2.0])]);
        report.intrinsic_medians.remove("s271");

        let err = bar_groups(&report).unwrap_err();
        assert!(err.to_string().contains("intrinsic"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let report = report_with(&[
            ("s271", [8.0, 4.0, 2.0]),
            ("s274", [3.0, 1.5, 0.75]),
        ]);

        let first = render_chart(&report).unwrap();
        let second = render_chart(&report).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn equal_medians_render_equal_bars() {
        let report = report_with(&[("s271", [2.0, 2.0, 2.0])]);

        let svg = render_chart(&report).unwrap();
        let heights = bar_heights(&svg);
        assert_eq!(heights.len(), 3);
        assert_eq!(heights[0], heights[1]);
        assert_eq!(heights[1], heights[2]);
    }

    #[test]
    fn chart_carries_axes_labels_and_legend() {
        let report = report_with(&[("s271", [8.0, 4.0, 2.0])]);

        let svg = render_chart(&report).unwrap();
        assert!(svg.contains("Runtime(s)"));
        assert!(svg.contains(">s271<"));
        for strategy in Strategy::ALL {
            assert!(svg.contains(&format!(">{}<", strategy.label())));
        }
        // Value label for the scalar bar.
        assert!(svg.contains(">8<"));
    }

    #[test]
    fn empty_function_set_is_fatal() {
        let report = report_with(&[]);
        assert!(render_chart(&report).is_err());
    }

    #[test]
    fn titles_wrap_at_the_column_budget() {
        let title = "Comparison between scalar, auto_vec and intrinsic TSVC kernels (clang)";
        let lines = wrap_title(title, 60);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.len() <= 60));
        assert_eq!(lines.join(" "), title);
    }

    #[test]
    fn short_titles_stay_on_one_line() {
        assert_eq!(wrap_title("short title", 60), vec!["short title"]);
    }

    #[test]
    fn seconds_format_trims_trailing_zeros() {
        assert_eq!(format_seconds(7.5), "7.5");
        assert_eq!(format_seconds(11.0), "11");
        assert_eq!(format_seconds(3.2), "3.2");
        assert_eq!(format_seconds(0.125), "0.125");
        assert_eq!(format_seconds(0.0), "0");
    }
}
