mod health;
mod metrics;
mod validate;

pub use health::health_handler;
pub use metrics::metrics_handler;
pub use validate::validate_handler;
