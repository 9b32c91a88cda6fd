use defi_tools_domain::error::{DomainError, DomainResult, ensure_finite, ensure_positive};
use defi_tools_domain::metrics::ImpermanentLoss;
use defi_tools_domain::metrics::impermanent_loss::impermanent_loss;
use defi_tools_domain::value_objects::PriceRatio;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

pub trait PricePathGenerator {
    /// Returns `steps + 1` prices, starting with the initial price.
    fn generate(&mut self, steps: usize) -> Vec<f64>;
}

/// Parameters of a geometric Brownian motion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GbmParams {
    pub initial_price: f64,
    pub drift: f64,      // annualized drift (mu)
    pub volatility: f64, // annualized volatility (sigma)
    pub time_step: f64,  // time step in years (dt) e.g. 1/365 for daily
}

impl GbmParams {
    pub fn new(initial_price: f64, drift: f64, volatility: f64, time_step: f64) -> Self {
        Self {
            initial_price,
            drift,
            volatility,
            time_step,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        ensure_positive("initial_price", self.initial_price)?;
        ensure_finite("drift", self.drift)?;
        if ensure_finite("volatility", self.volatility)? < 0.0 {
            return Err(DomainError::invalid("volatility", "cannot be negative"));
        }
        ensure_positive("time_step", self.time_step)?;
        Ok(())
    }
}

/// Seeded GBM path generator; successive calls continue the same random stream.
pub struct GeometricBrownianMotion {
    pub params: GbmParams,
    rng: StdRng,
    normal: Normal<f64>,
}

impl GeometricBrownianMotion {
    pub fn new(params: GbmParams, seed: u64) -> DomainResult<Self> {
        params.validate()?;
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| DomainError::invalid("volatility", e.to_string()))?;
        Ok(Self {
            params,
            rng: StdRng::seed_from_u64(seed),
            normal,
        })
    }
}

impl PricePathGenerator for GeometricBrownianMotion {
    fn generate(&mut self, steps: usize) -> Vec<f64> {
        let mut prices = Vec::with_capacity(steps + 1);
        prices.push(self.params.initial_price);

        let dt = self.params.time_step;
        let drift_term = (self.params.drift - 0.5 * self.params.volatility.powi(2)) * dt;
        let vol_term = self.params.volatility * dt.sqrt();

        let mut current_price = self.params.initial_price;
        for _ in 0..steps {
            let z = self.normal.sample(&mut self.rng);
            current_price *= (drift_term + vol_term * z).exp();
            prices.push(current_price);
        }

        prices
    }
}

/// Replays a fixed price series.
pub struct DeterministicPricePath {
    pub prices: Vec<f64>,
}

impl PricePathGenerator for DeterministicPricePath {
    fn generate(&mut self, _steps: usize) -> Vec<f64> {
        self.prices.clone()
    }
}

/// Impermanent loss between the first and last price of two paths.
///
/// # Errors
///
/// `InvalidArgument` when either path is empty or ends on a price that
/// does not give a positive finite ratio.
pub fn terminal_il<B, Q>(base: &mut B, quote: &mut Q, steps: usize) -> DomainResult<ImpermanentLoss>
where
    B: PricePathGenerator,
    Q: PricePathGenerator,
{
    let base_path = base.generate(steps);
    let quote_path = quote.generate(steps);

    let (Some(&entry_base), Some(&final_base)) = (base_path.first(), base_path.last()) else {
        return Err(DomainError::invalid("base_path", "price path is empty"));
    };
    let (Some(&entry_quote), Some(&final_quote)) = (quote_path.first(), quote_path.last()) else {
        return Err(DomainError::invalid("quote_path", "price path is empty"));
    };

    let ratio = PriceRatio::from_prices(entry_base, final_base, entry_quote, final_quote)?;
    Ok(impermanent_loss(ratio))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gbm_generation() {
        let params = GbmParams::new(100.0, 0.0, 0.2, 1.0 / 365.0);
        let mut gbm = GeometricBrownianMotion::new(params, 7).unwrap();
        let path = gbm.generate(10);

        assert_eq!(path.len(), 11); // initial + 10 steps
        assert_eq!(path[0], 100.0);
        assert!(path.iter().all(|p| *p > 0.0));

        // Check that prices are not all same (unless vol is 0)
        let all_same = path.iter().all(|p| *p == 100.0);
        assert!(!all_same);
    }

    #[test]
    fn test_gbm_same_seed_same_path() {
        let params = GbmParams::new(10.0, 0.1, 0.5, 1.0 / 365.0);
        let a = GeometricBrownianMotion::new(params, 42).unwrap().generate(20);
        let b = GeometricBrownianMotion::new(params, 42).unwrap().generate(20);
        assert_eq!(a, b);
    }

    #[test]
    fn test_gbm_rejects_bad_params() {
        assert!(GeometricBrownianMotion::new(GbmParams::new(0.0, 0.0, 0.2, 0.1), 1).is_err());
        assert!(GeometricBrownianMotion::new(GbmParams::new(1.0, 0.0, -0.2, 0.1), 1).is_err());
        assert!(GeometricBrownianMotion::new(GbmParams::new(1.0, 0.0, 0.2, 0.0), 1).is_err());
    }

    #[test]
    fn test_terminal_il_from_deterministic_paths() {
        let mut base = DeterministicPricePath {
            prices: vec![100.0, 150.0, 400.0],
        };
        let mut quote = DeterministicPricePath {
            prices: vec![1.0, 1.0, 1.0],
        };
        let il = terminal_il(&mut base, &mut quote, 2).unwrap();
        assert!((il.price_ratio - 4.0).abs() < 1e-12);
        assert!((il.fraction + 0.2).abs() < 1e-12);

        let mut empty = DeterministicPricePath { prices: vec![] };
        assert!(terminal_il(&mut empty, &mut quote, 2).is_err());
    }
}
