//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use defi_tools_simulation::prelude::*;
//! ```

// Monte Carlo
pub use crate::monte_carlo::{IlDistribution, IlMonteCarlo};

// Price path generators
pub use crate::price_path::{
    DeterministicPricePath, GbmParams, GeometricBrownianMotion, PricePathGenerator, terminal_il,
};

// Target scenario
pub use crate::scenario::{ScenarioInput, ScenarioResult, evaluate_scenario};

// Surface
pub use crate::surface::{GridCell, PriceGrid, SurfaceConfig, simulate_surface};
