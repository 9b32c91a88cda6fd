//! Simulation layer: impermanent loss surfaces, target scenarios and
//! Monte Carlo estimates over stochastic price paths.

pub mod monte_carlo;
pub mod prelude;
pub mod price_path;
pub mod scenario;
pub mod surface;
