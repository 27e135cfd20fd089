//! On-disk image storage.
//!
//! Files live under `<root>/profile_pictures` and `<root>/clinic_pictures`
//! and are named `<uuid-hex>.<ext>`. Only the bare file name is stored in the
//! database; lookups by name refuse anything that is not a plain file name.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Profile,
    Clinic,
}

impl ImageKind {
    pub fn subdir(self) -> &'static str {
        match self {
            ImageKind::Profile => "profile_pictures",
            ImageKind::Clinic => "clinic_pictures",
        }
    }
}

/// One file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Bytes of a stored image plus the content type to serve it with.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn dir(&self, kind: ImageKind) -> PathBuf {
        self.root.join(kind.subdir())
    }

    /// The declared content type must be `image/*`.
    pub fn validate(image: &UploadedImage) -> Result<(), ServiceError> {
        let ct = image.content_type.as_deref().unwrap_or("").trim().to_ascii_lowercase();
        if !ct.starts_with("image/") {
            return Err(ServiceError::Validation(format!(
                "file {} is not an image (content type '{}')",
                image.file_name.as_deref().unwrap_or("<unnamed>"),
                ct
            )));
        }
        Ok(())
    }

    /// Validate and write one image, returning its stored file name.
    pub async fn store(&self, kind: ImageKind, image: &UploadedImage) -> Result<String, ServiceError> {
        Self::validate(image)?;
        let dir = self.dir(kind);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::Storage(format!("create {}: {e}", dir.display())))?;

        let ext = extension_for(image.file_name.as_deref(), image.content_type.as_deref());
        let name = format!("{}.{}", Uuid::new_v4().simple(), ext);
        let path = dir.join(&name);
        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", path.display())))?;
        debug!(file = %name, kind = kind.subdir(), size = image.bytes.len(), "image_stored");
        Ok(name)
    }

    /// Write every image or none: a failure removes files already written.
    pub async fn store_all(&self, kind: ImageKind, images: &[UploadedImage]) -> Result<Vec<String>, ServiceError> {
        for image in images {
            Self::validate(image)?;
        }
        let mut written = Vec::with_capacity(images.len());
        for image in images {
            match self.store(kind, image).await {
                Ok(name) => written.push(name),
                Err(e) => {
                    self.remove_all(kind, &written).await;
                    return Err(e);
                }
            }
        }
        Ok(written)
    }

    pub async fn read(&self, kind: ImageKind, name: &str) -> Result<StoredImage, ServiceError> {
        if !is_plain_file_name(name) {
            return Err(ServiceError::not_found("image"));
        }
        let path = self.dir(kind).join(name);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(StoredImage { bytes, content_type: content_type_for(name) }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ServiceError::not_found("image")),
            Err(e) => Err(ServiceError::Storage(format!("read {}: {e}", path.display()))),
        }
    }

    /// Best effort: a missing file is not an error, other failures are logged.
    pub async fn remove(&self, kind: ImageKind, name: &str) {
        if !is_plain_file_name(name) {
            return;
        }
        let path = self.dir(kind).join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => debug!(file = %name, kind = kind.subdir(), "image_removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(file = %name, error = %e, "failed to remove image"),
        }
    }

    pub async fn remove_all(&self, kind: ImageKind, names: &[String]) {
        for name in names {
            self.remove(kind, name).await;
        }
    }
}

/// A single path component without separators or dot segments.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(&['/', '\\', '\0'][..])
        && !name.starts_with('.')
}

pub fn content_type_for(name: &str) -> String {
    mime_guess::from_path(name).first_or_octet_stream().essence_str().to_string()
}

/// Extension of the client name when it is short and alphanumeric, else one
/// derived from the content type, else `bin`.
pub fn extension_for(file_name: Option<&str>, content_type: Option<&str>) -> String {
    let from_name = file_name
        .and_then(|n| Path::new(n).extension())
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| !e.is_empty() && e.len() <= 10 && e.chars().all(|c| c.is_ascii_alphanumeric()));
    if let Some(ext) = from_name {
        return ext;
    }
    let ct = content_type.unwrap_or("").trim().to_ascii_lowercase();
    match ct.as_str() {
        "image/jpeg" | "image/jpg" => return "jpg".into(),
        "image/png" => return "png".into(),
        "image/gif" => return "gif".into(),
        "image/webp" => return "webp".into(),
        _ => {}
    }
    mime_guess::get_mime_extensions_str(&ct)
        .and_then(|exts| exts.first())
        .map(|e| e.to_string())
        .unwrap_or_else(|| "bin".into())
}
