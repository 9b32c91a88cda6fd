//! Domain layer for the DeFi tools workspace.
//!
//! Pure, synchronous math over externally supplied prices: the constant-product
//! impermanent loss model, the buy & hold / staking / farming comparison and
//! the value objects shared with the simulation crate.

pub mod enums;
pub mod error;
pub mod metrics;
pub mod strategies;
pub mod value_objects;
