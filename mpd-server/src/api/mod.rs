//! HTTP API handlers for mpd-server
//!
//! Handlers only parse the request and delegate to the pipeline or the
//! summary aggregator.

pub mod artifacts;
pub mod dashboard;
pub mod health;
pub mod parameters;

pub use artifacts::artifact_routes;
pub use dashboard::dashboard_routes;
pub use health::{health_routes, root_routes};
pub use parameters::parameter_routes;
