use crate::error::{DomainError, DomainResult, ensure_finite, ensure_positive};
use serde::{Deserialize, Serialize};

/// Relative performance of asset A against asset B over a period:
/// `(1 + ΔA) / (1 + ΔB)`. Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct PriceRatio(f64);

impl PriceRatio {
    /// The ratio of an unchanged pair.
    pub const UNCHANGED: Self = Self(1.0);

    pub fn new(ratio: f64) -> DomainResult<Self> {
        ensure_positive("ratio", ratio).map(Self)
    }

    /// Builds the ratio from percentage returns (`10` means +10%).
    pub fn from_returns(var_a: f64, var_b: f64) -> DomainResult<Self> {
        let var_a = ensure_finite("var_a", var_a)?;
        let var_b = ensure_finite("var_b", var_b)?;

        let denominator = var_b / 100.0 + 1.0;
        if denominator == 0.0 {
            return Err(DomainError::DivisionByZero { field: "var_b" });
        }

        Self::new((var_a / 100.0 + 1.0) / denominator)
    }

    /// Builds the ratio from entry and final prices of both assets.
    pub fn from_prices(entry_a: f64, final_a: f64, entry_b: f64, final_b: f64) -> DomainResult<Self> {
        let relative_a = ensure_positive("final_a", final_a)? / ensure_positive("entry_a", entry_a)?;
        let relative_b = ensure_positive("final_b", final_b)? / ensure_positive("entry_b", entry_b)?;
        Self::new(relative_a / relative_b)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Same move seen from the other asset.
    pub fn invert(&self) -> DomainResult<Self> {
        Self::new(1.0 / self.0)
    }

    /// `|ln(ratio)|`, the distance from an unchanged pair.
    pub fn log_distance(&self) -> f64 {
        self.0.ln().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_returns() {
        let ratio = PriceRatio::from_returns(50.0, -20.0).unwrap();
        assert!((ratio.value() - 1.875).abs() < 1e-12);

        assert_eq!(PriceRatio::from_returns(10.0, 10.0).unwrap(), PriceRatio::UNCHANGED);
    }

    #[test]
    fn test_minus_hundred_denominator_is_division_by_zero() {
        let err = PriceRatio::from_returns(10.0, -100.0).unwrap_err();
        assert_eq!(err, DomainError::DivisionByZero { field: "var_b" });
    }

    #[test]
    fn test_non_positive_ratio_rejected() {
        assert!(PriceRatio::new(0.0).unwrap_err().is_invalid_argument());
        assert!(PriceRatio::new(-2.0).unwrap_err().is_invalid_argument());
        assert!(PriceRatio::new(f64::INFINITY).unwrap_err().is_invalid_argument());
        // A -100% numerator leaves nothing to compare against.
        assert!(PriceRatio::from_returns(-100.0, 0.0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_from_prices_and_invert() {
        let ratio = PriceRatio::from_prices(100.0, 200.0, 1.0, 1.0).unwrap();
        assert_eq!(ratio.value(), 2.0);
        assert_eq!(ratio.invert().unwrap().value(), 0.5);
        assert!((ratio.log_distance() - 2f64.ln()).abs() < 1e-12);

        assert!(PriceRatio::from_prices(0.0, 200.0, 1.0, 1.0).is_err());
    }
}
