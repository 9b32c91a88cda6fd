use crate::error::{DomainError, DomainResult, ensure_finite};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A percentage return where `10` means +10% and `-100` means total loss.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct PercentChange(f64);

impl PercentChange {
    pub fn new(pct: f64) -> DomainResult<Self> {
        ensure_finite("percent_change", pct).map(Self)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `10` -> `1.1`.
    pub fn growth_factor(&self) -> f64 {
        1.0 + self.0 / 100.0
    }
}

impl FromStr for PercentChange {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_number("percent_change", s.trim().trim_end_matches('%')).and_then(Self::new)
    }
}

/// Parses user supplied text into a finite number, naming `field` on failure.
pub fn parse_number(field: &'static str, text: &str) -> DomainResult<f64> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| DomainError::invalid(field, format!("`{text}` is not numeric")))?;
    ensure_finite(field, value)
}
