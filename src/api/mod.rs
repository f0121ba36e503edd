//! HTTP API layer.
//!
//! Translates HTTP requests into registry operations and renders results.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`extract`] - JSON-or-form body extractor
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
