//! Closed-form evaluation of a single target price move.
//!
//! Half of the initial capital buys each asset at its reference price; the
//! position is then valued at the moved prices and diminished by the
//! impermanent loss of the move. No grid lookup is involved.

use defi_tools_domain::error::{DomainError, DomainResult, ensure_finite, ensure_positive};
use defi_tools_domain::metrics::impermanent_loss::impermanent_loss;
use defi_tools_domain::value_objects::percent_change::parse_number;
use defi_tools_domain::value_objects::{PercentChange, PriceRatio};
use serde::{Deserialize, Serialize};

/// A target move of both assets away from their reference prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub reference_base: f64,
    pub reference_quote: f64,
    /// Capital deposited, split evenly between both assets.
    pub initial_value: f64,
    /// Base asset move in percent (`10` means +10%).
    pub base_pct_change: f64,
    /// Quote asset move in percent.
    pub quote_pct_change: f64,
}

impl ScenarioInput {
    #[must_use]
    pub fn new(
        reference_base: f64,
        reference_quote: f64,
        initial_value: f64,
        base_pct_change: f64,
        quote_pct_change: f64,
    ) -> Self {
        Self {
            reference_base,
            reference_quote,
            initial_value,
            base_pct_change,
            quote_pct_change,
        }
    }

    /// Builds an input from user supplied text.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` naming the first field that is not numeric.
    pub fn parse(
        reference_base: f64,
        reference_quote: f64,
        initial_value: &str,
        base_pct_change: &str,
        quote_pct_change: &str,
    ) -> DomainResult<Self> {
        let initial_value = parse_number("initial_value", initial_value)?;
        let base: PercentChange = base_pct_change.parse().map_err(|_| {
            DomainError::invalid("base_pct_change", format!("`{base_pct_change}` is not numeric"))
        })?;
        let quote: PercentChange = quote_pct_change.parse().map_err(|_| {
            DomainError::invalid("quote_pct_change", format!("`{quote_pct_change}` is not numeric"))
        })?;

        Ok(Self::new(
            reference_base,
            reference_quote,
            initial_value,
            base.value(),
            quote.value(),
        ))
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_positive("reference_base", self.reference_base)?;
        ensure_positive("reference_quote", self.reference_quote)?;
        let initial_value = ensure_finite("initial_value", self.initial_value)?;
        if initial_value < 0.0 {
            return Err(DomainError::invalid("initial_value", "cannot be negative"));
        }
        self.base_change()?;
        self.quote_change()?;
        Ok(())
    }

    /// The base asset move as a [`PercentChange`].
    pub fn base_change(&self) -> DomainResult<PercentChange> {
        PercentChange::new(ensure_finite("base_pct_change", self.base_pct_change)?)
    }

    /// The quote asset move as a [`PercentChange`].
    pub fn quote_change(&self) -> DomainResult<PercentChange> {
        PercentChange::new(ensure_finite("quote_pct_change", self.quote_pct_change)?)
    }
}

/// Outcome of [`evaluate_scenario`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub price_ratio: f64,
    pub final_base_price: f64,
    pub final_quote_price: f64,
    /// What the two assets would be worth unpooled.
    pub hold_value: f64,
    /// What the pooled position is worth.
    pub final_value: f64,
    /// Impermanent loss of the move, as a fraction.
    pub iloss: f64,
}

impl ScenarioResult {
    /// Amount lost against holding (non-positive).
    pub fn loss_vs_hold(&self) -> f64 {
        self.final_value - self.hold_value
    }
}

/// Evaluates the pooled position value after the target move.
///
/// # Errors
///
/// * `InvalidArgument` for non-finite inputs, non-positive reference prices,
///   a negative initial value or a move that takes a price to zero or below.
/// * `DivisionByZero` when the quote asset moves by exactly -100%.
pub fn evaluate_scenario(input: &ScenarioInput) -> DomainResult<ScenarioResult> {
    input.validate()?;

    let half = input.initial_value / 2.0;
    let qty_base = half / input.reference_base;
    let qty_quote = half / input.reference_quote;

    let final_base_price = input.reference_base * input.base_change()?.growth_factor();
    let final_quote_price = input.reference_quote * input.quote_change()?.growth_factor();

    if final_quote_price == 0.0 {
        return Err(DomainError::DivisionByZero {
            field: "quote_pct_change",
        });
    }
    if final_quote_price < 0.0 {
        return Err(DomainError::invalid("quote_pct_change", "cannot be below -100%"));
    }
    if final_base_price <= 0.0 {
        return Err(DomainError::invalid("base_pct_change", "must be above -100%"));
    }

    let ratio = PriceRatio::new(
        (final_base_price / input.reference_base) / (final_quote_price / input.reference_quote),
    )?;
    let il = impermanent_loss(ratio);

    // extreme but finite moves can overflow the position value
    let hold_value = ensure_finite(
        "hold_value",
        final_base_price * qty_base + final_quote_price * qty_quote,
    )?;
    let final_value = ensure_finite("final_value", il.lp_value(hold_value))?;

    Ok(ScenarioResult {
        price_ratio: ratio.value(),
        final_base_price,
        final_quote_price,
        hold_value,
        final_value,
        iloss: il.fraction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_move_preserves_value() {
        let result = evaluate_scenario(&ScenarioInput::new(100.0, 1.0, 100.0, 0.0, 0.0)).unwrap();
        assert_eq!(result.price_ratio, 1.0);
        assert_eq!(result.iloss, 0.0);
        assert_eq!(result.final_value, 100.0);
        assert_eq!(result.loss_vs_hold(), 0.0);
    }

    #[test]
    fn test_base_quadruples() {
        let result =
            evaluate_scenario(&ScenarioInput::new(100.0, 1.0, 1000.0, 300.0, 0.0)).unwrap();

        assert_eq!(result.final_base_price, 400.0);
        assert_eq!(result.final_quote_price, 1.0);
        assert!((result.price_ratio - 4.0).abs() < 1e-12);
        // hold: 5 units * 400 + 500 units * 1
        assert!((result.hold_value - 2500.0).abs() < 1e-9);
        assert!((result.iloss + 0.2).abs() < 1e-12);
        assert!((result.final_value - 2000.0).abs() < 1e-9);
        assert!((result.loss_vs_hold() + 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_moves_have_no_loss() {
        let result =
            evaluate_scenario(&ScenarioInput::new(50.0, 2.0, 100.0, -30.0, -30.0)).unwrap();
        assert!(result.iloss.abs() < 1e-12);
        assert!((result.final_value - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_numeric_change_is_invalid_argument() {
        let err = ScenarioInput::parse(100.0, 1.0, "100", "abc", "0").unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid("base_pct_change", "`abc` is not numeric")
        );

        let err = ScenarioInput::parse(100.0, 1.0, "lots", "0", "0").unwrap_err();
        assert!(err.is_invalid_argument());

        let nan = ScenarioInput::new(100.0, 1.0, 100.0, f64::NAN, 0.0);
        assert!(evaluate_scenario(&nan).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_parse_accepts_percent_suffix() {
        let input = ScenarioInput::parse(100.0, 1.0, "100", "25%", "-10").unwrap();
        assert_eq!(input.base_pct_change, 25.0);
        assert_eq!(input.quote_pct_change, -10.0);
        assert!(evaluate_scenario(&input).is_ok());
    }

    #[test]
    fn test_overflowing_position_value_is_an_error() {
        // ratio 1e300: hold value overflows and the loss rounds to -100%
        let input = ScenarioInput::new(1.0, 1.0, 1e10, 1e302, 0.0);
        let err = evaluate_scenario(&input).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("hold_value"));
    }

    #[test]
    fn test_moves_use_growth_factors() {
        let input = ScenarioInput::new(100.0, 2.0, 100.0, 10.0, -20.0);
        assert_eq!(input.base_change().unwrap().growth_factor(), 1.1);
        assert_eq!(input.quote_change().unwrap().growth_factor(), 0.8);

        let result = evaluate_scenario(&input).unwrap();
        assert!((result.final_base_price - 110.0).abs() < 1e-9);
        assert!((result.final_quote_price - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_total_loss_of_quote_is_division_by_zero() {
        let input = ScenarioInput::new(100.0, 1.0, 100.0, 10.0, -100.0);
        assert_eq!(
            evaluate_scenario(&input).unwrap_err(),
            DomainError::DivisionByZero {
                field: "quote_pct_change"
            }
        );
    }

    #[test]
    fn test_invalid_prices_and_moves() {
        assert!(evaluate_scenario(&ScenarioInput::new(0.0, 1.0, 100.0, 0.0, 0.0)).is_err());
        assert!(evaluate_scenario(&ScenarioInput::new(100.0, -1.0, 100.0, 0.0, 0.0)).is_err());
        assert!(evaluate_scenario(&ScenarioInput::new(100.0, 1.0, -5.0, 0.0, 0.0)).is_err());
        assert!(evaluate_scenario(&ScenarioInput::new(100.0, 1.0, 100.0, -100.0, 0.0)).is_err());
        assert!(evaluate_scenario(&ScenarioInput::new(100.0, 1.0, 100.0, 0.0, -150.0)).is_err());
    }
}
