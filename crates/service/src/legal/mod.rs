//! Legal and regulatory identifiers, one record per user.

pub mod repository;
pub mod service;

pub use service::LegalService;
