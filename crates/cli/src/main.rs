//! Command Line Interface for the DeFi tools.
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use defi_tools_domain::enums::IlOutputMode;
use defi_tools_domain::metrics::impermanent_loss::{
    IlOutput, calculate_il_constant_product, format_il,
};
use defi_tools_domain::strategies::{StrategyInputs, compare_strategies};
use defi_tools_domain::value_objects::PriceRatio;
use defi_tools_simulation::prelude::*;
use defi_tools_simulation::surface::{DEFAULT_RANGE_HIGH, DEFAULT_RANGE_LOW, DEFAULT_RANGE_STEPS};
use dotenv::dotenv;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "defi-tools")]
#[command(about = "Impermanent loss and LP strategy tools", long_about = None)]
struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Impermanent loss for a price ratio or a pair of returns
    Iloss {
        /// Price ratio (1 + ΔA) / (1 + ΔB); takes precedence over the variations
        #[arg(long)]
        ratio: Option<f64>,

        /// Asset A variation in percent (10 = 10%)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        var_a: f64,

        /// Asset B variation in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        var_b: f64,

        /// Entry price (token1/token0); used with --current-price instead of a ratio
        #[arg(long, requires = "current_price", conflicts_with = "ratio")]
        entry_price: Option<Decimal>,

        /// Current price (token1/token0)
        #[arg(long, requires = "entry_price")]
        current_price: Option<Decimal>,

        /// Print the raw fraction instead of a percentage
        #[arg(long)]
        numeric: bool,
    },
    /// Compare buy & hold, staking and farming over a period
    Compare {
        /// Days for the strategy
        #[arg(short, long)]
        days: f64,

        /// Asset A variation in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        var_a: f64,

        /// Asset B variation in percent
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        var_b: f64,

        /// Daily reward percent of the single-asset pool for A
        #[arg(long, default_value_t = 0.0)]
        rw_pool_a: f64,

        /// Daily reward percent of the single-asset pool for B
        #[arg(long, default_value_t = 0.0)]
        rw_pool_b: f64,

        /// Daily reward percent of the A/B farm
        #[arg(long, default_value_t = 0.0)]
        rw_pool_ab: f64,

        /// Daily trading fee percent earned by the A/B pool
        #[arg(long, default_value_t = 0.0)]
        fees_ab: f64,
    },
    /// Impermanent loss surface over a grid of base/quote prices
    Surface {
        /// Current base asset price
        #[arg(long)]
        ref_base: f64,

        /// Current quote asset price
        #[arg(long)]
        ref_quote: f64,

        /// Samples per axis
        #[arg(long, env = "DEFI_TOOLS_RANGE_STEPS", default_value_t = DEFAULT_RANGE_STEPS)]
        range_steps: usize,

        /// Lowest multiplier of the reference prices
        #[arg(long, env = "DEFI_TOOLS_RANGE_LOW", default_value_t = DEFAULT_RANGE_LOW)]
        range_low: f64,

        /// Highest multiplier of the reference prices
        #[arg(long, env = "DEFI_TOOLS_RANGE_HIGH", default_value_t = DEFAULT_RANGE_HIGH)]
        range_high: f64,
    },
    /// Pooled position value after a target price move
    Scenario {
        /// Current base asset price
        #[arg(long)]
        ref_base: f64,

        /// Current quote asset price
        #[arg(long)]
        ref_quote: f64,

        /// Capital deposited, split evenly between both assets
        #[arg(long, default_value = "100")]
        initial_value: String,

        /// Base asset move in percent
        #[arg(long, allow_hyphen_values = true)]
        base_pct_change: String,

        /// Quote asset move in percent
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        quote_pct_change: String,
    },
    /// Monte Carlo distribution of impermanent loss under GBM prices
    MonteCarlo {
        /// Current base asset price
        #[arg(long)]
        price_base: f64,

        /// Current quote asset price
        #[arg(long, default_value_t = 1.0)]
        price_quote: f64,

        /// Annualized base volatility (0.8 = 80%)
        #[arg(long, default_value_t = 0.8)]
        vol_base: f64,

        /// Annualized quote volatility
        #[arg(long, default_value_t = 0.0)]
        vol_quote: f64,

        /// Annualized base drift
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        drift_base: f64,

        /// Annualized quote drift
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        drift_quote: f64,

        /// Horizon in days, one step per day
        #[arg(short, long, default_value_t = 30)]
        days: usize,

        /// Number of simulated paths
        #[arg(short, long, default_value_t = 1000)]
        iterations: usize,

        /// RNG seed
        #[arg(long, env = "DEFI_TOOLS_SEED", default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Iloss {
            ratio,
            var_a,
            var_b,
            entry_price,
            current_price,
            numeric,
        } => {
            let mode = if numeric {
                IlOutputMode::Fraction
            } else {
                IlOutputMode::Percentage
            };

            let (ratio, output) = match (entry_price, current_price) {
                (Some(entry), Some(current)) => {
                    info!(%entry, %current, ?mode, "computing impermanent loss from prices");
                    let il = calculate_il_constant_product(entry, current)
                        .context("invalid entry or current price")?;
                    let ratio = (current / entry)
                        .to_f64()
                        .context("price ratio overflows f64")?;
                    (ratio, IlOutput::from_decimal(il, mode)?)
                }
                _ => {
                    let ratio = match ratio {
                        Some(r) => PriceRatio::new(r),
                        None => PriceRatio::from_returns(var_a, var_b),
                    }
                    .context("invalid price ratio")?;
                    info!(ratio = ratio.value(), ?mode, "computing impermanent loss");
                    (ratio.value(), format_il(ratio.value(), mode)?)
                }
            };

            emit(json, &output, || Ok(render::iloss_table(ratio, &output)))
        }
        Commands::Compare {
            days,
            var_a,
            var_b,
            rw_pool_a,
            rw_pool_b,
            rw_pool_ab,
            fees_ab,
        } => {
            let inputs = StrategyInputs::new(days)
                .with_variations(var_a, var_b)
                .with_staking_rewards(rw_pool_a, rw_pool_b)
                .with_farm_rewards(rw_pool_ab, fees_ab);
            info!(days, var_a, var_b, "comparing strategies");

            let result = compare_strategies(&inputs).context("strategy comparison failed")?;
            emit(json, &result, || render::strategy_table(&result))
        }
        Commands::Surface {
            ref_base,
            ref_quote,
            range_steps,
            range_low,
            range_high,
        } => {
            let config = SurfaceConfig::new(ref_base, ref_quote)
                .with_range_steps(range_steps)
                .with_range(range_low, range_high);
            info!(range_steps, range_low, range_high, "simulating impermanent loss surface");

            let grid = simulate_surface(&config).context("surface simulation failed")?;
            emit(json, &grid, || render::surface_table(&config, &grid))
        }
        Commands::Scenario {
            ref_base,
            ref_quote,
            initial_value,
            base_pct_change,
            quote_pct_change,
        } => {
            let input = ScenarioInput::parse(
                ref_base,
                ref_quote,
                &initial_value,
                &base_pct_change,
                &quote_pct_change,
            )
            .context("invalid scenario")?;
            info!(?input, "evaluating scenario");

            let result = evaluate_scenario(&input).context("scenario evaluation failed")?;
            emit(json, &result, || render::scenario_table(&input, &result))
        }
        Commands::MonteCarlo {
            price_base,
            price_quote,
            vol_base,
            vol_quote,
            drift_base,
            drift_quote,
            days,
            iterations,
            seed,
        } => {
            let dt = 1.0 / 365.0;
            let mc = IlMonteCarlo::new(
                GbmParams::new(price_base, drift_base, vol_base, dt),
                GbmParams::new(price_quote, drift_quote, vol_quote, dt),
                days,
                iterations,
            )
            .with_seed(seed);
            info!(days, iterations, seed, "running impermanent loss monte carlo");

            let dist = mc.run().context("monte carlo run failed")?;
            emit(json, &dist, || render::monte_carlo_table(&dist))
        }
    }
}

fn emit<T, F>(json: bool, value: &T, table: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce() -> Result<prettytable::Table>,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        table()?.printstd();
    }
    Ok(())
}
