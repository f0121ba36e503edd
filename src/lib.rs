//! # Short URL
//!
//! A URL shortener that maps user-chosen aliases to destination URLs, stored
//! in Redis. Each alias is protected by an admin password set at creation;
//! only its holder can delete the alias.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, key namespace, and the store trait
//! - **Application Layer** ([`application`]) - Alias registry and startup bootstrap
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory stores
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Store layout
//!
//! - `short:<alias>` - destination URL
//! - `admin:pw:<alias>` - SHA-512 hex digest of the admin password
//! - `conf:addr` - listen address, written with a default on first run
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run -- --redis redis://localhost:6379
//!
//! curl -X POST localhost:8000/docs -H 'content-type: application/json' \
//!      -d '{"url": "https://example.com/docs", "admin_pw": "secret"}'
//! curl -i localhost:8000/docs
//! curl -X DELETE localhost:8000/docs -H 'content-type: application/json' \
//!      -d '{"admin_pw": "secret"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortLinkRegistry;
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::domain::repositories::KeyValueStore;
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::{MemoryStore, RedisStore};
    pub use crate::state::AppState;
}
