//! Profile and clinic pictures: file storage plus the rows that point at it.

pub mod repository;
pub mod service;
pub mod storage;

pub use service::PictureService;
pub use storage::{ImageKind, ImageStore, StoredImage, UploadedImage};
