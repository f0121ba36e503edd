//! Helpers shared across layers.
//!
//! - [`password`] - Admin password hashing and verification
//! - [`validation`] - Alias and destination URL validation

pub mod password;
pub mod validation;
