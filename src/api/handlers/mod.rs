//! HTTP request handlers.

pub mod health;
pub mod links;
pub mod metrics;
pub mod redirect;

pub use health::health_handler;
pub use links::{create_link_handler, delete_link_handler};
pub use metrics::metrics_handler;
pub use redirect::redirect_handler;
