//! Impermanent loss surface over a grid of hypothetical prices.
//!
//! Both reference prices are swept over the same multiplicative range and
//! every (base, quote) pair gets its own impermanent loss. The grid is
//! descriptive context for charts; authoritative numbers for a concrete move
//! come from [`crate::scenario::evaluate_scenario`].

use defi_tools_domain::error::{DomainError, DomainResult, ensure_finite, ensure_positive};
use defi_tools_domain::metrics::impermanent_loss::impermanent_loss;
use defi_tools_domain::value_objects::PriceRatio;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Samples per axis.
pub const DEFAULT_RANGE_STEPS: usize = 300;
/// Lowest multiplier of the reference price (1%).
pub const DEFAULT_RANGE_LOW: f64 = 0.01;
/// Highest multiplier of the reference price (300%).
pub const DEFAULT_RANGE_HIGH: f64 = 3.0;

/// Configuration of a surface run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Current price of the base asset.
    pub reference_base: f64,
    /// Current price of the quote asset.
    pub reference_quote: f64,
    /// Number of samples per axis; the grid holds `range_steps²` cells.
    pub range_steps: usize,
    /// Lowest multiplier applied to both reference prices.
    pub range_low: f64,
    /// Highest multiplier applied to both reference prices.
    pub range_high: f64,
}

impl SurfaceConfig {
    /// Creates a config sweeping 1%..300% of both prices in 300 steps.
    #[must_use]
    pub fn new(reference_base: f64, reference_quote: f64) -> Self {
        Self {
            reference_base,
            reference_quote,
            range_steps: DEFAULT_RANGE_STEPS,
            range_low: DEFAULT_RANGE_LOW,
            range_high: DEFAULT_RANGE_HIGH,
        }
    }

    /// Sets the number of samples per axis.
    #[must_use]
    pub fn with_range_steps(mut self, range_steps: usize) -> Self {
        self.range_steps = range_steps;
        self
    }

    /// Sets the multiplier range.
    #[must_use]
    pub fn with_range(mut self, range_low: f64, range_high: f64) -> Self {
        self.range_low = range_low;
        self.range_high = range_high;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_positive("reference_base", self.reference_base)?;
        ensure_positive("reference_quote", self.reference_quote)?;
        if self.range_steps == 0 {
            return Err(DomainError::invalid("range_steps", "must be at least 1"));
        }
        ensure_positive("range_low", self.range_low)?;
        ensure_finite("range_high", self.range_high)?;
        if self.range_high < self.range_low {
            return Err(DomainError::invalid(
                "range_high",
                format!("{} is below range_low {}", self.range_high, self.range_low),
            ));
        }
        Ok(())
    }
}

/// One sampled price pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub base_price: f64,
    pub quote_price: f64,
    /// `None` when the pair does not yield a finite impermanent loss.
    pub il: Option<f64>,
}

impl GridCell {
    pub fn is_missing(&self) -> bool {
        self.il.is_none()
    }
}

/// Row-major grid: base prices are the outer axis, quote prices the inner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceGrid {
    pub base_prices: Vec<f64>,
    pub quote_prices: Vec<f64>,
    pub cells: Vec<GridCell>,
}

impl PriceGrid {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell at base index `i` and quote index `j`.
    pub fn cell(&self, i: usize, j: usize) -> Option<&GridCell> {
        if i >= self.base_prices.len() || j >= self.quote_prices.len() {
            return None;
        }
        self.cells.get(i * self.quote_prices.len() + j)
    }

    /// Cells with a finite loss as `(base_price, quote_price, il)`, skipping
    /// the missing ones.
    pub fn finite_cells(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.cells
            .iter()
            .filter_map(|c| c.il.map(|il| (c.base_price, c.quote_price, il)))
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// The finite cell with the deepest loss.
    pub fn worst_cell(&self) -> Option<(f64, f64, f64)> {
        self.finite_cells().min_by(|a, b| a.2.total_cmp(&b.2))
    }
}

/// `steps` evenly spaced values from `low` to `high`, both ends included.
/// A single step yields `[low]`.
pub fn linspace(low: f64, high: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![low],
        _ => {
            let step = (high - low) / (steps - 1) as f64;
            (0..steps)
                .map(|i| if i == steps - 1 { high } else { low + step * i as f64 })
                .collect()
        }
    }
}

/// Builds the impermanent loss surface described by `config`.
///
/// # Errors
///
/// `InvalidArgument` for non-positive reference prices, zero `range_steps`
/// or an empty or non-positive multiplier range.
pub fn simulate_surface(config: &SurfaceConfig) -> DomainResult<PriceGrid> {
    config.validate()?;

    let multipliers = linspace(config.range_low, config.range_high, config.range_steps);
    let base_prices: Vec<f64> = multipliers.iter().map(|m| m * config.reference_base).collect();
    let quote_prices: Vec<f64> = multipliers.iter().map(|m| m * config.reference_quote).collect();

    let mut cells = Vec::with_capacity(base_prices.len() * quote_prices.len());
    for &base_price in &base_prices {
        for &quote_price in &quote_prices {
            let ratio = (base_price / config.reference_base) / (quote_price / config.reference_quote);
            let il = PriceRatio::new(ratio)
                .ok()
                .map(|r| impermanent_loss(r).fraction)
                .filter(|il| il.is_finite());
            cells.push(GridCell {
                base_price,
                quote_price,
                il,
            });
        }
    }

    let grid = PriceGrid {
        base_prices,
        quote_prices,
        cells,
    };

    let missing = grid.missing_count();
    if missing > 0 {
        warn!(missing, "impermanent loss surface has cells without a finite value");
    }
    debug!(
        steps = config.range_steps,
        cells = grid.len(),
        "built impermanent loss surface"
    );

    Ok(grid)
}
