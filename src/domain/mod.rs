//! Domain layer containing entities, the key namespace, and the store contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`namespace`] - Key format of every value written to the store
//! - [`repositories`] - Storage trait implemented by the infrastructure layer
//!
//! The domain layer has no dependency on Axum or on a concrete store client.

pub mod entities;
pub mod namespace;
pub mod repositories;
