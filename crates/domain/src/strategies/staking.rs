//! Each asset staked in its own single-asset reward pool.

use super::{ReturnStrategy, StrategyContext};

/// Holds both assets and stakes each in its own pool.
///
/// Half of the capital sits in each pool, so each daily reward rate is
/// weighted by `0.5`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleAssetStaking;

impl ReturnStrategy for SingleAssetStaking {
    fn period_return(&self, context: &StrategyContext) -> f64 {
        let inputs = &context.inputs;
        context.buy_hold + 0.5 * inputs.days * (inputs.rw_pool_a / 100.0 + inputs.rw_pool_b / 100.0)
    }

    fn name(&self) -> &'static str {
        "Stake"
    }
}
