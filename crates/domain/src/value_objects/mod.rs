pub mod percent_change;
pub mod percentage;
pub mod price_ratio;

pub use percent_change::PercentChange;
pub use percentage::Percentage;
pub use price_ratio::PriceRatio;
