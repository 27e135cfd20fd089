pub mod errors;
pub mod db;
pub mod user;
pub mod clinic;
pub mod clinic_picture;
pub mod profile_picture;
pub mod legal_information;

#[cfg(test)]
mod tests;
