//! HTTP API handlers for fdrk-fe

pub mod browse;
pub mod health;
pub mod submit;
pub mod ui;

pub use browse::browse_routes;
pub use health::health_routes;
pub use submit::submission_routes;
pub use ui::ui_routes;
