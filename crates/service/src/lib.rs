//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access: each entity has a repository
//!   trait with a SeaORM implementation and a service enforcing the rules.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod authz;
pub mod auth;
pub mod users;
pub mod clinic;
pub mod picture;
pub mod legal;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
