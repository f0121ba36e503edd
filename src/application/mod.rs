//! Application layer services implementing business logic.
//!
//! Services consume the store trait and give HTTP handlers and the admin CLI
//! a single API.
//!
//! - [`services::link_registry::ShortLinkRegistry`] - Alias creation, lookup and deletion
//! - [`services::bootstrap::resolve_listen_addr`] - Listen address persisted in the store

pub mod services;
