//! Table rendering for command output.

use anyhow::Result;
use defi_tools_domain::metrics::impermanent_loss::IlOutput;
use defi_tools_domain::strategies::{
    BuyHold, LiquidityFarming, ReturnStrategy, SingleAssetStaking, StrategyResult,
};
use defi_tools_domain::value_objects::Percentage;
use defi_tools_simulation::monte_carlo::IlDistribution;
use defi_tools_simulation::scenario::{ScenarioInput, ScenarioResult};
use defi_tools_simulation::surface::{PriceGrid, SurfaceConfig};
use prettytable::{Table, row};

fn pct(fraction: f64) -> Result<String> {
    Ok(Percentage::from_fraction(fraction)?.to_string())
}

pub fn iloss_table(ratio: f64, output: &IlOutput) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Price Ratio", "Impermanent Loss"]);
    table.add_row(row![format!("{ratio:.6}"), output]);
    table
}

pub fn strategy_table(result: &StrategyResult) -> Result<Table> {
    let report = result.report()?;

    let mut table = Table::new();
    table.set_titles(row!["Strategy", "Return", "Annualized"]);

    // A zero-length period has no annualized figure.
    let yearly = result.annualized().ok();
    let annual = |f: Option<f64>| -> Result<String> {
        match f {
            Some(v) => pct(v),
            None => Ok("-".to_string()),
        }
    };

    table.add_row(row![BuyHold.name(), report.buy_hold, annual(yearly.map(|y| y.buy_hold))?]);
    table.add_row(row![
        SingleAssetStaking.name(),
        report.stake,
        annual(yearly.map(|y| y.stake))?
    ]);
    table.add_row(row![
        LiquidityFarming.name(),
        report.farm,
        annual(yearly.map(|y| y.farm))?
    ]);
    table.add_row(row!["Impermanent Loss", pct(result.impermanent_loss)?, ""]);
    table.add_row(row!["Best", report.best, ""]);
    Ok(table)
}

pub fn surface_table(config: &SurfaceConfig, grid: &PriceGrid) -> Result<Table> {
    let mut table = Table::new();
    table.set_titles(row!["Metric", "Value"]);
    table.add_row(row!["Steps per axis", config.range_steps]);
    table.add_row(row!["Cells", grid.len()]);
    table.add_row(row!["Missing cells", grid.missing_count()]);
    table.add_row(row![
        "Base range",
        format!(
            "{:.4} .. {:.4}",
            config.range_low * config.reference_base,
            config.range_high * config.reference_base
        )
    ]);
    table.add_row(row![
        "Quote range",
        format!(
            "{:.4} .. {:.4}",
            config.range_low * config.reference_quote,
            config.range_high * config.reference_quote
        )
    ]);
    if let Some((base, quote, il)) = grid.worst_cell() {
        table.add_row(row![
            "Deepest loss",
            format!("{} at base {base:.4} / quote {quote:.4}", pct(il)?)
        ]);
    }
    Ok(table)
}

pub fn scenario_table(input: &ScenarioInput, result: &ScenarioResult) -> Result<Table> {
    let mut table = Table::new();
    table.set_titles(row!["Metric", "Value"]);
    table.add_row(row!["Initial value", format!("{:.2}", input.initial_value)]);
    table.add_row(row![
        "Base price",
        format!("{:.4} -> {:.4}", input.reference_base, result.final_base_price)
    ]);
    table.add_row(row![
        "Quote price",
        format!("{:.4} -> {:.4}", input.reference_quote, result.final_quote_price)
    ]);
    table.add_row(row!["Price ratio", format!("{:.6}", result.price_ratio)]);
    table.add_row(row!["Hold value", format!("{:.2}", result.hold_value)]);
    table.add_row(row!["Final value", format!("{:.2}", result.final_value)]);
    table.add_row(row!["Impermanent loss", pct(result.iloss)?]);
    Ok(table)
}

pub fn monte_carlo_table(dist: &IlDistribution) -> Result<Table> {
    let mut table = Table::new();
    table.set_titles(row!["Metric", "Impermanent Loss"]);
    table.add_row(row!["Mean", pct(dist.mean_il)?]);
    table.add_row(row!["Median", pct(dist.median_il)?]);
    table.add_row(row!["5th percentile", pct(dist.worst_5pct_il)?]);
    table.add_row(row!["Worst", pct(dist.worst_il)?]);
    table.add_row(row!["Iterations", dist.iterations]);
    Ok(table)
}
