//! Filesystem storage for uploaded book pictures

use image::ImageFormat;
use std::path::{Component, Path, PathBuf};

use crate::domain::DomainError;

#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a stored file name under the media root. Names that would
    /// escape the root resolve to `None`.
    pub fn path_for(&self, file_name: &str) -> Option<PathBuf> {
        let relative = Path::new(file_name);
        let is_plain = !file_name.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        is_plain.then(|| self.root.join(relative))
    }

    /// Check that `bytes` is a picture and write it under a fresh name.
    /// Returns the stored file name.
    pub async fn save_image(&self, bytes: &[u8]) -> Result<String, DomainError> {
        let format = sniff_image(bytes)?;
        let extension = format.extensions_str().first().copied().unwrap_or("img");
        let file_name = format!("{}.{}", uuid::Uuid::new_v4(), extension);

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.root.join(&file_name), bytes).await?;

        tracing::info!("Stored image {} ({} bytes)", file_name, bytes.len());
        Ok(file_name)
    }

    /// Best-effort removal; a missing file is not an error.
    pub async fn remove(&self, file_name: &str) {
        if let Some(path) = self.path_for(file_name) {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to remove {:?}: {}", path, e);
                }
            }
        }
    }
}

/// Accept PNG, JPEG, GIF and WebP payloads that actually decode.
pub fn sniff_image(bytes: &[u8]) -> Result<ImageFormat, DomainError> {
    let invalid = || DomainError::Validation("Upload a valid image".to_string());

    let format = image::guess_format(bytes).map_err(|_| invalid())?;
    if !matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::WebP
    ) {
        return Err(invalid());
    }

    image::load_from_memory_with_format(bytes, format).map_err(|_| invalid())?;
    Ok(format)
}
