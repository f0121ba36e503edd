//! Business logic services for the application layer.

pub mod bootstrap;
pub mod link_registry;

pub use bootstrap::resolve_listen_addr;
pub use link_registry::ShortLinkRegistry;
