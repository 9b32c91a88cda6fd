use serde::{Deserialize, Serialize};
use std::fmt;

/// Winner of a strategy comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BestStrategy {
    Farm,
    Stake,
}

impl fmt::Display for BestStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestStrategy::Farm => write!(f, "Farm"),
            BestStrategy::Stake => write!(f, "Stake"),
        }
    }
}

/// How an impermanent loss value is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IlOutputMode {
    /// Raw fraction, e.g. `-0.0572`.
    #[default]
    Fraction,
    /// Display percentage with two decimals, e.g. `-5.72%`.
    Percentage,
}
