use crate::error::{DomainError, DomainResult, ensure_finite};

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Scales a return earned over `days` to a 365-day year (simple, no compounding).
pub fn annualize(period_return: f64, days: f64) -> DomainResult<f64> {
    let days = ensure_finite("days", days)?;
    if days <= 0.0 {
        return Err(DomainError::invalid("days", "cannot annualize a zero-length period"));
    }
    Ok(ensure_finite("period_return", period_return)? * (DAYS_PER_YEAR / days))
}

/// Reward accrued at a daily percentage rate over `days`, as a fraction.
pub fn accrued(daily_rate_pct: f64, days: f64) -> f64 {
    days * (daily_rate_pct / 100.0)
}
