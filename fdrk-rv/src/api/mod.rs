//! HTTP API handlers for fdrk-rv

pub mod health;
pub mod rankings;

pub use health::health_routes;
pub use rankings::{get_rankings, serve_index};
