//! Buy & hold, single-asset staking and liquidity-pool farming over a fixed horizon.
//!
//! Every strategy reads the same [`StrategyContext`]: the caller's inputs plus
//! the buy & hold return and the impermanent loss implied by the two asset
//! returns. [`compare_strategies`] evaluates staking against farming.

pub mod buy_hold;
pub mod farming;
pub mod staking;

pub use buy_hold::BuyHold;
pub use farming::LiquidityFarming;
pub use staking::SingleAssetStaking;

use crate::enums::BestStrategy;
use crate::error::{DomainError, DomainResult, ensure_finite};
use crate::metrics::ImpermanentLoss;
use crate::metrics::impermanent_loss::impermanent_loss;
use crate::metrics::returns::annualize;
use crate::value_objects::{Percentage, PriceRatio};
use serde::{Deserialize, Serialize};

/// Inputs to a strategy comparison.
///
/// Every percentage is a plain number where `10` means 10%. Reward and fee
/// rates are daily.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyInputs {
    /// Length of the period in days.
    pub days: f64,
    /// Return of asset A over the period.
    pub var_a: f64,
    /// Return of asset B over the period.
    pub var_b: f64,
    /// Daily reward rate of the single-asset pool for A.
    pub rw_pool_a: f64,
    /// Daily reward rate of the single-asset pool for B.
    pub rw_pool_b: f64,
    /// Daily reward rate of the A/B farm.
    pub rw_pool_ab: f64,
    /// Daily trading fee yield of the A/B pool.
    pub fees_ab: f64,
}

impl StrategyInputs {
    /// Inputs for a `days` long period with every rate at zero.
    #[must_use]
    pub fn new(days: f64) -> Self {
        Self {
            days,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_variations(mut self, var_a: f64, var_b: f64) -> Self {
        self.var_a = var_a;
        self.var_b = var_b;
        self
    }

    #[must_use]
    pub fn with_staking_rewards(mut self, rw_pool_a: f64, rw_pool_b: f64) -> Self {
        self.rw_pool_a = rw_pool_a;
        self.rw_pool_b = rw_pool_b;
        self
    }

    #[must_use]
    pub fn with_farm_rewards(mut self, rw_pool_ab: f64, fees_ab: f64) -> Self {
        self.rw_pool_ab = rw_pool_ab;
        self.fees_ab = fees_ab;
        self
    }

    /// Checks every field is finite and the period is not negative.
    pub fn validate(&self) -> DomainResult<()> {
        ensure_finite("days", self.days)?;
        ensure_finite("var_a", self.var_a)?;
        ensure_finite("var_b", self.var_b)?;
        ensure_finite("rw_pool_a", self.rw_pool_a)?;
        ensure_finite("rw_pool_b", self.rw_pool_b)?;
        ensure_finite("rw_pool_ab", self.rw_pool_ab)?;
        ensure_finite("fees_ab", self.fees_ab)?;
        if self.days < 0.0 {
            return Err(DomainError::invalid("days", "period length cannot be negative"));
        }
        Ok(())
    }
}

/// Shared inputs and derived quantities handed to each strategy.
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext {
    pub inputs: StrategyInputs,
    /// Return of an equal-weighted unpooled holding, as a fraction.
    pub buy_hold: f64,
    /// Loss of the pooled position against holding.
    pub impermanent_loss: ImpermanentLoss,
}

impl StrategyContext {
    pub fn from_inputs(inputs: StrategyInputs) -> DomainResult<Self> {
        inputs.validate()?;
        let ratio = PriceRatio::from_returns(inputs.var_a, inputs.var_b)?;

        Ok(Self {
            inputs,
            buy_hold: (0.5 * inputs.var_a + 0.5 * inputs.var_b) / 100.0,
            impermanent_loss: impermanent_loss(ratio),
        })
    }
}

/// A way of deploying the capital whose period return can be evaluated.
pub trait ReturnStrategy {
    /// Return over the period as a fraction.
    fn period_return(&self, context: &StrategyContext) -> f64;

    /// Returns the name of the strategy.
    fn name(&self) -> &'static str;
}

/// Outcome of [`compare_strategies`]. All returns are fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Period the returns were earned over.
    pub days: f64,
    pub buy_hold: f64,
    pub stake: f64,
    pub farm: f64,
    /// Impermanent loss applied to the farm's buy & hold base.
    pub impermanent_loss: f64,
    pub best: BestStrategy,
}

/// Strategy returns scaled to a year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualizedReturns {
    pub buy_hold: f64,
    pub stake: f64,
    pub farm: f64,
}

/// Display strings for a [`StrategyResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyReport {
    pub buy_hold: String,
    pub stake: String,
    pub farm: String,
    pub best: BestStrategy,
}

impl StrategyResult {
    /// How much farming beats staking by (negative when staking wins).
    pub fn margin(&self) -> f64 {
        self.farm - self.stake
    }

    /// Returns scaled from the compared period to 365 days.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a zero-day period.
    pub fn annualized(&self) -> DomainResult<AnnualizedReturns> {
        Ok(AnnualizedReturns {
            buy_hold: annualize(self.buy_hold, self.days)?,
            stake: annualize(self.stake, self.days)?,
            farm: annualize(self.farm, self.days)?,
        })
    }

    /// Formats the returns as two-decimal percentages.
    pub fn report(&self) -> DomainResult<StrategyReport> {
        Ok(StrategyReport {
            buy_hold: Percentage::from_fraction(self.buy_hold)?.to_string(),
            stake: Percentage::from_fraction(self.stake)?.to_string(),
            farm: Percentage::from_fraction(self.farm)?.to_string(),
            best: self.best,
        })
    }
}

/// Compares buy & hold, staking and farming for two assets.
///
/// Farming wins only when it strictly beats staking; ties go to staking.
///
/// # Errors
///
/// * `DivisionByZero` when `var_b` is -100%.
/// * `InvalidArgument` for non-finite inputs, a negative period or a
///   non-positive price ratio.
pub fn compare_strategies(inputs: &StrategyInputs) -> DomainResult<StrategyResult> {
    let context = StrategyContext::from_inputs(*inputs)?;

    let buy_hold = BuyHold.period_return(&context);
    let stake = SingleAssetStaking.period_return(&context);
    let farm = LiquidityFarming.period_return(&context);

    let best = if farm > stake {
        BestStrategy::Farm
    } else {
        BestStrategy::Stake
    };

    Ok(StrategyResult {
        days: inputs.days,
        buy_hold,
        stake,
        farm,
        impermanent_loss: context.impermanent_loss.fraction,
        best,
    })
}
