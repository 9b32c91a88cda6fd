use crate::error::DomainResult;
use crate::value_objects::Percentage;
use serde::{Deserialize, Serialize};

pub mod impermanent_loss;
pub mod returns;

/// Impermanent loss of a 50/50 constant-product position for a given ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpermanentLoss {
    /// The price ratio the loss was computed for.
    pub price_ratio: f64,
    /// Loss against holding, in `[-1, 0]`. Mathematically above -1; at ratios
    /// beyond roughly `1e32` (or below `1e-32`) it rounds to exactly `-1.0`.
    pub fraction: f64,
}

impl ImpermanentLoss {
    /// Display form of the loss, e.g. `-5.72%`.
    pub fn as_percentage(&self) -> DomainResult<Percentage> {
        Percentage::from_fraction(self.fraction)
    }

    /// Value of the pooled position given what the unpooled assets are worth.
    pub fn lp_value(&self, hold_value: f64) -> f64 {
        hold_value * (1.0 + self.fraction)
    }

    /// Amount lost versus holding (non-positive).
    pub fn value_loss(&self, hold_value: f64) -> f64 {
        hold_value * self.fraction
    }
}
