//! User profiles, the admin listing and account removal.

pub mod repository;
pub mod service;

pub use service::{UserProfile, UserService};
