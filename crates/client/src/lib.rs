//! HTTP client for the hospital backend REST API.
//!
//! [`ApiClient`] is the single gateway every other crate goes through
//! to reach the backend: call queue reads/writes, QR data resolution
//! for the public bedside page, and push-subscription negotiation.
//! It is cheap to clone (the underlying connection pool is shared)
//! and carries an optional bearer token for the authenticated
//! nurse-session endpoints.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
