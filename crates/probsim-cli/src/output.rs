//! Output formats and table rendering using comfy-table.

use clap::ValueEnum;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use probsim::Estimate;

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Human,
    /// JSON output for tooling.
    Json,
}

/// Formats an estimate with its 95% interval.
pub fn format_estimate(estimate: &Estimate) -> String {
    let (low, high) = estimate.confidence_95();
    format!("{estimate}  (95% CI {low:.4}..{high:.4})")
}

/// Creates a table with one row per labelled estimate.
pub fn estimate_table(label: &str, rows: &[(String, Estimate)]) -> Table {
    let mut table = Table::new();

    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        [label, "Estimate", "Std. error", "95% CI"]
            .into_iter()
            .map(|title| Cell::new(title).add_attribute(Attribute::Bold)),
    );

    for (name, estimate) in rows {
        let (low, high) = estimate.confidence_95();
        table.add_row(vec![
            Cell::new(name).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.4}", estimate.value())),
            Cell::new(format!("{:.5}", estimate.standard_error())),
            Cell::new(format!("{low:.4}..{high:.4}")),
        ]);
    }

    table
}

/// Prints a JSON value on stdout.
pub fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_line_includes_interval() {
        let estimate = Estimate::from_counts(1, 2).expect("valid");
        let line = format_estimate(&estimate);
        assert!(line.starts_with("0.5000 ± 0.6930"));
        assert!(line.contains("95% CI 0.0000..1.0000"));
    }

    #[test]
    fn table_has_row_per_estimate() {
        let rows = vec![
            ("stay".to_string(), Estimate::from_counts(1, 3).expect("valid")),
            ("switch".to_string(), Estimate::from_counts(2, 3).expect("valid")),
        ];
        let rendered = estimate_table("Strategy", &rows).to_string();
        assert!(rendered.contains("stay"));
        assert!(rendered.contains("switch"));
        assert!(rendered.contains("0.6667"));
    }
}
