//! Holding both assets in a wallet.

use super::{ReturnStrategy, StrategyContext};

/// Equal-weighted holding of both assets, no rewards.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuyHold;

impl ReturnStrategy for BuyHold {
    fn period_return(&self, context: &StrategyContext) -> f64 {
        context.buy_hold
    }

    fn name(&self) -> &'static str {
        "Buy & Hold"
    }
}
