//! Re-export of foundational types from `greencast-types`.
// Consolidated so downstream crates can depend on `greencast-core` only.

pub use greencast_types::{Capability, ConnectorKey};
pub use greencast_types::{CacheConfig, FetchStrategy, GreencastConfig, RefreshFailurePolicy};
pub use greencast_types::{CombinedPoint, ForecastPoint, HistoricalPoint};
pub use greencast_types::{ForecastEnvelope, ForecastRecord, SalesRecord};
pub use greencast_types::{ParamKind, QueryParameters};
