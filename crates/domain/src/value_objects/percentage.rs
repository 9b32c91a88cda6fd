use crate::error::{DomainError, DomainResult};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fraction meant for display, e.g. `0.1` renders as `10.00%`.
///
/// Numeric results stay `f64` fractions; this type is the presentation
/// counterpart and is never fed back into a computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    /// Wraps a fraction (`0.1` is ten percent).
    pub fn from_fraction(fraction: f64) -> DomainResult<Self> {
        if fraction == 0.0 {
            return Ok(Self(Decimal::ZERO));
        }
        Decimal::from_f64(fraction)
            .map(Self)
            .ok_or_else(|| DomainError::invalid("fraction", format!("{fraction} cannot be displayed")))
    }

    pub fn as_fraction(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{pct:.2}%")
    }
}
