pub mod distribution;
pub mod percentage;
pub mod pool_snapshot;
pub mod position_config;
pub mod price_range;
pub mod price_series;

pub use distribution::DistributionParameters;
pub use percentage::Percentage;
pub use pool_snapshot::{PoolMetrics, PoolSnapshot};
pub use position_config::{PositionConfig, RangePlan};
pub use price_range::PriceRange;
pub use price_series::PriceSeries;
