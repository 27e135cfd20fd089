//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::{Path, PathBuf};

use tracing::info;

/// Sub-directories of the image root, one per picture owner kind.
pub const IMAGE_SUBDIRS: [&str; 2] = ["profile_pictures", "clinic_pictures"];

/// Ensure the image directory tree exists, creating it when missing.
pub async fn ensure_env(image_dir: &str) -> anyhow::Result<Vec<PathBuf>> {
    let root = Path::new(image_dir);
    let mut created = Vec::with_capacity(IMAGE_SUBDIRS.len());
    for sub in IMAGE_SUBDIRS {
        let dir = root.join(sub);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
        created.push(dir);
    }
    info!(%image_dir, "image directories ready");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_all_image_subdirs() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("images");
        let dirs = ensure_env(root.to_str().unwrap()).await.unwrap();
        assert_eq!(dirs.len(), 2);
        for d in dirs {
            assert!(d.is_dir());
        }
        // idempotent
        ensure_env(root.to_str().unwrap()).await.unwrap();
    }
}
