//! Media store
//!
//! Images arrive as data URLs (`data:image/<ext>;base64,<payload>`). They are
//! decoded, sniffed with `image::guess_format` and written under
//! `<media_dir>/<kind>/<uuid>.<ext>`. Stored paths are media-relative.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::ImageFormat;

use crate::utils::{AppError, AppResult, ErrorCode};

/// Accepted image formats
const SUPPORTED_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
];

/// Subdirectory an image is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Recipe,
    Avatar,
}

impl MediaKind {
    pub const fn dir(&self) -> &'static str {
        match self {
            Self::Recipe => "recipes",
            Self::Avatar => "avatars",
        }
    }
}

/// A decoded image that has not been written yet
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

impl DecodedImage {
    pub fn extension(&self) -> &'static str {
        self.format.extensions_str().first().copied().unwrap_or("img")
    }
}

/// Local filesystem media store
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: Arc<PathBuf>,
    public_url: Arc<str>,
    max_bytes: usize,
}

impl MediaStore {
    pub fn new(root: PathBuf, public_url: String, max_bytes: usize) -> Self {
        Self {
            root: Arc::new(root),
            public_url: public_url.into(),
            max_bytes,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the media directories
    pub async fn init(&self) -> AppResult<()> {
        for kind in [MediaKind::Recipe, MediaKind::Avatar] {
            tokio::fs::create_dir_all(self.root.join(kind.dir()))
                .await
                .map_err(|e| {
                    AppError::with_message(
                        ErrorCode::FileStorageFailed,
                        format!("Cannot create media directory: {e}"),
                    )
                })?;
        }
        Ok(())
    }

    /// Decode and check a data URL without touching the filesystem
    pub fn decode(&self, data_url: &str) -> AppResult<DecodedImage> {
        let invalid = || AppError::new(ErrorCode::InvalidImageFile);

        let rest = data_url.trim().strip_prefix("data:").ok_or_else(invalid)?;
        let (header, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
        if !header.starts_with("image/") {
            return Err(invalid());
        }
        // base64 expands by 4/3; reject oversized payloads before decoding
        if payload.len() / 4 * 3 > self.max_bytes + 3 {
            return Err(self.too_large());
        }

        let bytes = STANDARD.decode(payload.trim()).map_err(|_| invalid())?;
        if bytes.is_empty() {
            return Err(invalid());
        }
        if bytes.len() > self.max_bytes {
            return Err(self.too_large());
        }

        let format = image::guess_format(&bytes).map_err(|_| invalid())?;
        if !SUPPORTED_FORMATS.contains(&format) {
            return Err(AppError::with_message(
                ErrorCode::UnsupportedImageFormat,
                format!("Unsupported format: {format:?}. Supported: png, jpeg, gif, webp"),
            ));
        }
        Ok(DecodedImage { bytes, format })
    }

    fn too_large(&self) -> AppError {
        AppError::with_message(
            ErrorCode::ImageTooLarge,
            format!("Image is too large (max {} bytes)", self.max_bytes),
        )
    }

    /// Write an image; returns its media-relative path
    pub async fn save(&self, kind: MediaKind, image: &DecodedImage) -> AppResult<String> {
        let file_name = format!("{}.{}", uuid::Uuid::new_v4(), image.extension());
        let relative = format!("{}/{}", kind.dir(), file_name);
        let path = self.root.join(kind.dir()).join(&file_name);

        tokio::fs::write(&path, &image.bytes).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write image");
            AppError::new(ErrorCode::FileStorageFailed)
        })?;

        tracing::info!(path = %relative, bytes = image.bytes.len(), "Image stored");
        Ok(relative)
    }

    /// Remove a stored image; failures are logged and swallowed
    pub async fn remove(&self, relative: &str) {
        let Some(path) = self.resolve(relative) else {
            tracing::warn!(path = %relative, "Refusing to remove path outside media root");
            return;
        };
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %relative, error = %e, "Failed to remove image");
        }
    }

    /// Absolute public URL of a stored image
    pub fn url(&self, relative: &str) -> String {
        format!("{}/media/{}", self.public_url, relative)
    }

    fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let path = Path::new(relative);
        let safe = path
            .components()
            .all(|c| matches!(c, std::path::Component::Normal(_)));
        (safe && !relative.is_empty()).then(|| self.root.join(path))
    }
}
