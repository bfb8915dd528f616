pub mod abbreviations;
pub mod health;
pub mod helpers;
pub mod types;

pub use abbreviations::abbreviation_routes;
pub use health::{AppStartTime, HealthService, health_routes};
pub use helpers::{json_config, query_config};
