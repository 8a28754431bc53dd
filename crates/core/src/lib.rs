//! Core business logic for slimfit-rs.

pub mod services;

pub use services::*;

/// Generate a unique ID using ULID.
#[must_use]
pub fn generate_id() -> String {
    slimfit_common::IdGenerator::new().generate()
}
