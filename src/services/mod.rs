/// HTTP health and liveness endpoints
pub mod health;
/// Recurring eviction of expired callback entries
pub mod sweeper;
