use std::fmt::Write as _;

use anyhow::Result;
use matledger_platform::{DashboardView, OutputFormat, PurchaseHistoryView};
use rust_decimal::Decimal;

pub fn render_dashboard(view: &DashboardView, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(view)?);
    }

    if view.materials.is_empty() {
        return Ok("no materials registered yet".to_string());
    }

    let mut out = String::new();
    writeln!(
        out,
        "{:>4}  {:<24} {:>12} {:>12} {:>14}",
        "id", "material", "weight kg", "price/kg", "stock value"
    )?;
    for material in &view.materials {
        writeln!(
            out,
            "{:>4}  {:<24} {:>12} {:>12} {:>14}",
            material.id.to_string(),
            material.name,
            money(material.weight),
            money(material.price_per_kg),
            money(material.stock_value),
        )?;
    }
    write!(out, "inventory value: {}", money(view.inventory_value))?;

    Ok(out)
}

pub fn render_history(view: &PurchaseHistoryView, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(view)?);
    }

    let mut out = String::new();
    write!(out, "{} (#{})", view.name, view.material_id)?;
    if view.purchases.is_empty() {
        write!(out, "\n  no purchases yet")?;
    }
    for line in &view.purchases {
        write!(
            out,
            "\n  [{}] {} kg @ {} -> {} kg @ {}",
            line.sequence,
            money(line.weight),
            money(line.price_per_kg),
            money(line.running_weight),
            money(line.running_price_per_kg),
        )?;
    }

    Ok(out)
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
