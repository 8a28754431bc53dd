//! HTTP API layer for slimfit-rs.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: users, habits, challenges and the admin panel
//! - **Extractors**: authentication via [`extractors::AuthUser`]
//! - **Middleware**: bearer-token authentication
//!
//! Built on Axum 0.8 with Tower middleware stack.

// Allow dead_code for API compatibility fields in request structs
#![allow(dead_code)]

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
