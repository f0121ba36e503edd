//! Core domain entities.
//!
//! Entities are plain data structures; persistence is expressed as key-value
//! pairs (see [`crate::domain::namespace`]).
//!
//! - [`Link`] - A registered alias and its destination
//! - [`NewLink`] - Input for registering a link, with the hashed credential

pub mod link;

pub use link::{Link, NewLink};
