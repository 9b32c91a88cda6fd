use crate::enums::IlOutputMode;
use crate::error::{DomainError, DomainResult};
use crate::metrics::ImpermanentLoss;
use crate::value_objects::{Percentage, PriceRatio};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::Serialize;
use std::fmt;

/// Impermanent loss for a constant product pool.
/// formula: 2 * sqrt(price_ratio) / (1 + price_ratio) - 1
///
/// The result is `0` at an unchanged ratio and negative otherwise;
/// `IL(r) == IL(1/r)`.
pub fn impermanent_loss(ratio: PriceRatio) -> ImpermanentLoss {
    let r = ratio.value();
    let fraction = 2.0 * (r.sqrt() / (1.0 + r)) - 1.0;

    ImpermanentLoss {
        price_ratio: r,
        // rounding can push a near-unchanged ratio a hair above zero
        fraction: fraction.min(0.0),
    }
}

/// Impermanent loss as a fraction for a raw ratio.
///
/// # Errors
///
/// `InvalidArgument` when `ratio` is not a finite number greater than zero.
pub fn calculate_il(ratio: f64) -> DomainResult<f64> {
    Ok(impermanent_loss(PriceRatio::new(ratio)?).fraction)
}

/// Impermanent loss in the caller's chosen output mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IlOutput {
    Fraction(f64),
    Percentage(Percentage),
}

impl IlOutput {
    /// The numeric fraction, if this output is numeric.
    pub fn fraction(&self) -> Option<f64> {
        match self {
            IlOutput::Fraction(f) => Some(*f),
            IlOutput::Percentage(_) => None,
        }
    }

    /// Wraps a Decimal loss, e.g. from [`calculate_il_constant_product`], in `mode`.
    pub fn from_decimal(il: Decimal, mode: IlOutputMode) -> DomainResult<Self> {
        match mode {
            IlOutputMode::Fraction => il
                .to_f64()
                .map(IlOutput::Fraction)
                .ok_or_else(|| DomainError::invalid("il", "impermanent loss overflows f64")),
            IlOutputMode::Percentage => Ok(IlOutput::Percentage(Percentage(il))),
        }
    }
}

impl fmt::Display for IlOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IlOutput::Fraction(v) => write!(f, "{v}"),
            IlOutput::Percentage(p) => write!(f, "{p}"),
        }
    }
}

/// Computes the impermanent loss for `ratio` and returns it in `mode`.
pub fn format_il(ratio: f64, mode: IlOutputMode) -> DomainResult<IlOutput> {
    let il = impermanent_loss(PriceRatio::new(ratio)?);
    match mode {
        IlOutputMode::Fraction => Ok(IlOutput::Fraction(il.fraction)),
        IlOutputMode::Percentage => il.as_percentage().map(IlOutput::Percentage),
    }
}

/// Impermanent loss between an entry and a current price (token1/token0).
///
/// # Returns
///
/// * `Decimal` - The impermanent loss as a negative fraction (e.g., -0.05 for 5% loss)
pub fn calculate_il_constant_product(
    entry_price: Decimal,
    current_price: Decimal,
) -> DomainResult<Decimal> {
    if entry_price <= Decimal::ZERO {
        return Err(DomainError::invalid("entry_price", "must be greater than zero"));
    }
    if current_price <= Decimal::ZERO {
        return Err(DomainError::invalid("current_price", "must be greater than zero"));
    }

    let ratio_f64 = (current_price / entry_price)
        .to_f64()
        .ok_or_else(|| DomainError::invalid("current_price", "price ratio overflows f64"))?;

    let il = impermanent_loss(PriceRatio::new(ratio_f64)?);
    Decimal::from_f64(il.fraction)
        .ok_or_else(|| DomainError::invalid("current_price", "impermanent loss overflows Decimal"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE_RATIOS: [f64; 9] = [1e-6, 0.01, 0.25, 0.5, 0.9, 1.1, 2.0, 4.0, 1e6];

    #[test]
    fn test_unchanged_ratio_has_no_loss() {
        assert_eq!(calculate_il(1.0).unwrap(), 0.0);
    }

    #[test]
    fn test_known_values() {
        // Price doubles: IL = 2*sqrt(2)/3 - 1 = -0.0572
        assert!((calculate_il(2.0).unwrap() + 0.057190958).abs() < 1e-8);
        assert!((calculate_il(4.0).unwrap() + 0.2).abs() < 1e-12);
        assert!((calculate_il(9.0).unwrap() + 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_symmetry() {
        for r in SAMPLE_RATIOS {
            let il = calculate_il(r).unwrap();
            let il_inv = calculate_il(1.0 / r).unwrap();
            assert!((il - il_inv).abs() < 1e-12, "ratio {r}: {il} vs {il_inv}");
        }
    }

    #[test]
    fn test_never_positive_and_bounded() {
        for r in SAMPLE_RATIOS {
            let il = calculate_il(r).unwrap();
            assert!(il <= 0.0);
            assert!(il >= -1.0);
        }
        // Tiny moves around 1 stay clamped at zero or below.
        for r in [1.0 + 1e-15, 1.0 - 1e-15, 1.000_000_1] {
            assert!(calculate_il(r).unwrap() <= 0.0);
        }
    }

    #[test]
    fn test_monotonic_in_log_distance() {
        let ratios = [1.0, 1.5, 2.0, 3.0, 10.0, 100.0];
        for pair in ratios.windows(2) {
            let closer = impermanent_loss(PriceRatio::new(pair[0]).unwrap());
            let farther = impermanent_loss(PriceRatio::new(pair[1]).unwrap());
            assert!(farther.fraction < closer.fraction);
        }
    }

    #[test]
    fn test_non_positive_ratio_is_invalid_argument() {
        assert!(calculate_il(0.0).unwrap_err().is_invalid_argument());
        assert!(calculate_il(-1.0).unwrap_err().is_invalid_argument());
        assert!(calculate_il(f64::NAN).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_output_modes() {
        let numeric = format_il(2.0, IlOutputMode::Fraction).unwrap();
        assert!((numeric.fraction().unwrap() + 0.0572).abs() < 1e-4);

        let display = format_il(2.0, IlOutputMode::Percentage).unwrap();
        assert_eq!(display.fraction(), None);
        assert_eq!(display.to_string(), "-5.72%");

        assert_eq!(format_il(1.0, IlOutputMode::Percentage).unwrap().to_string(), "0.00%");
    }

    #[test]
    fn test_calculate_il_constant_product() {
        let il = calculate_il_constant_product(dec!(100), dec!(200)).unwrap();
        let diff = (il - dec!(-0.05719)).abs();
        assert!(diff < dec!(0.0001));

        let display = IlOutput::from_decimal(il, IlOutputMode::Percentage).unwrap();
        assert_eq!(display.to_string(), "-5.72%");
        let numeric = IlOutput::from_decimal(il, IlOutputMode::Fraction).unwrap();
        assert!((numeric.fraction().unwrap() + 0.05719).abs() < 1e-4);

        assert!(calculate_il_constant_product(dec!(0), dec!(200)).is_err());
        assert!(calculate_il_constant_product(dec!(100), dec!(-1)).is_err());
    }

    #[test]
    fn test_value_helpers() {
        let il = impermanent_loss(PriceRatio::new(4.0).unwrap());
        assert!((il.lp_value(1000.0) - 800.0).abs() < 1e-9);
        assert!((il.value_loss(1000.0) + 200.0).abs() < 1e-9);
        assert_eq!(il.as_percentage().unwrap().to_string(), "-20.00%");
    }
}
