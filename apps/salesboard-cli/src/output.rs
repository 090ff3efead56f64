//! Report rendering: JSON envelope or terminal table.

use chrono::{DateTime, Utc};
use comfy_table::{presets, Table};
use salesboard_core::{ReportEntry, ReportSummary};
use serde::Serialize;

use crate::error::{CliError, CliResult};

/// JSON document printed by `--format json`.
///
/// `generated_at` lives only here; the entries are identical across runs.
#[derive(Debug, Serialize)]
pub struct ReportEnvelope<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: &'a ReportSummary,
    pub sellers: &'a [ReportEntry],
}

pub fn render_json(
    entries: &[ReportEntry],
    summary: &ReportSummary,
    generated_at: DateTime<Utc>,
) -> CliResult<String> {
    let envelope = ReportEnvelope {
        generated_at,
        summary,
        sellers: entries,
    };
    serde_json::to_string_pretty(&envelope).map_err(|e| CliError::Render(e.to_string()))
}

pub fn render_table(entries: &[ReportEntry], summary: &ReportSummary) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL).set_header(vec![
        "#", "Seller", "Name", "Revenue", "Profit", "Sales", "Bonus", "Top products",
    ]);

    for (rank, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            entry.seller_id.clone(),
            entry.name.clone(),
            format!("{:.2}", entry.revenue),
            format!("{:.2}", entry.profit),
            entry.sales_count.to_string(),
            format!("{:.2}", entry.bonus),
            top_products_cell(entry),
        ]);
    }

    format!(
        "{table}\n{} sellers, {} sales, revenue {:.2}, profit {:.2}, bonuses {:.2}",
        summary.sellers,
        summary.total_sales,
        summary.total_revenue,
        summary.total_profit,
        summary.total_bonus
    )
}

/// First three top products as `SKU×qty`.
fn top_products_cell(entry: &ReportEntry) -> String {
    let shown: Vec<String> = entry
        .top_products
        .iter()
        .take(3)
        .map(|p| format!("{}×{}", p.sku, p.quantity))
        .collect();
    let hidden = entry.top_products.len().saturating_sub(shown.len());
    if hidden > 0 {
        format!("{} (+{hidden})", shown.join(", "))
    } else {
        shown.join(", ")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
