//! Clinic listings owned by users.

pub mod repository;
pub mod service;

pub use service::ClinicService;
