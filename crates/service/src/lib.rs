//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from the HTTP surface.
//! - Reuses validation and domain types in the `models` crate.
//! - Hosts the platform stats adapters that normalize upstream data.

pub mod auth;
pub mod errors;
pub mod profile;
pub mod runtime;
pub mod stats;
pub mod storage;
