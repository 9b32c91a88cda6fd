//! Both assets supplied to an A/B liquidity pool and farmed.

use super::{ReturnStrategy, StrategyContext};
use crate::metrics::returns::accrued;

/// Liquidity provision plus farm rewards and trading fees.
///
/// The buy & hold return is diminished by the impermanent loss before the
/// daily reward and fee rates are added.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiquidityFarming;

impl ReturnStrategy for LiquidityFarming {
    fn period_return(&self, context: &StrategyContext) -> f64 {
        let inputs = &context.inputs;
        let pooled = context.buy_hold * (1.0 + context.impermanent_loss.fraction);
        pooled + accrued(inputs.rw_pool_ab + inputs.fees_ab, inputs.days)
    }

    fn name(&self) -> &'static str {
        "Farm"
    }
}
