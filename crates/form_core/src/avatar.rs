//! Avatar intake: type and size checks, then an async read into a data URL.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use shared::{
    domain::{AvatarMime, MAX_AVATAR_BYTES},
    error::AvatarError,
};

const UNKNOWN_MIME: &str = "application/octet-stream";

/// What is known about a file before its content is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl AvatarCandidate {
    /// Type is checked before size, so a GIF is a type violation at any size.
    pub fn check(&self) -> Result<AvatarMime, AvatarError> {
        let mime =
            AvatarMime::from_mime(&self.mime_type).ok_or_else(|| AvatarError::UnsupportedType {
                mime: self.mime_type.clone(),
            })?;
        check_size(self.size_bytes)?;
        Ok(mime)
    }
}

fn check_size(size: u64) -> Result<(), AvatarError> {
    if size > MAX_AVATAR_BYTES {
        return Err(AvatarError::TooLarge { size });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAvatar {
    pub data_url: String,
    pub mime_type: AvatarMime,
    pub size_bytes: u64,
    pub file_name: String,
}

pub fn encode_data_url(mime: AvatarMime, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime.as_str(), STANDARD.encode(bytes))
}

/// Inverse of [`encode_data_url`]; `None` for anything that is not a base64
/// data URL of an accepted avatar type.
pub fn decode_data_url(data_url: &str) -> Option<(AvatarMime, Vec<u8>)> {
    let rest = data_url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let mime = AvatarMime::from_mime(mime)?;
    let bytes = STANDARD.decode(payload).ok()?;
    Some((mime, bytes))
}

#[async_trait]
pub trait AvatarSource: Send + Sync {
    async fn describe(&self) -> Result<AvatarCandidate, AvatarError>;
    async fn read(&self) -> Result<Vec<u8>, AvatarError>;
}

fn unreadable(err: impl std::fmt::Display) -> AvatarError {
    AvatarError::Unreadable {
        reason: err.to_string(),
    }
}

pub fn mime_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(UNKNOWN_MIME)
        .to_string()
}

fn display_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("avatar")
        .to_string()
}

/// A file picked from disk; its MIME type is derived from the extension.
#[derive(Debug, Clone)]
pub struct FsAvatarSource {
    path: PathBuf,
}

impl FsAvatarSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AvatarSource for FsAvatarSource {
    async fn describe(&self) -> Result<AvatarCandidate, AvatarError> {
        let metadata = tokio::fs::metadata(&self.path).await.map_err(unreadable)?;
        if !metadata.is_file() {
            return Err(unreadable(format!("{} is not a file", self.path.display())));
        }
        Ok(AvatarCandidate {
            file_name: display_file_name(&self.path),
            mime_type: mime_for_path(&self.path),
            size_bytes: metadata.len(),
        })
    }

    async fn read(&self) -> Result<Vec<u8>, AvatarError> {
        tokio::fs::read(&self.path).await.map_err(unreadable)
    }
}

/// Bytes already in memory, e.g. a dropped file that carries its own MIME string.
#[derive(Debug, Clone)]
pub struct MemoryAvatarSource {
    file_name: String,
    mime_type: String,
    bytes: Arc<[u8]>,
}

impl MemoryAvatarSource {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl AvatarSource for MemoryAvatarSource {
    async fn describe(&self) -> Result<AvatarCandidate, AvatarError> {
        Ok(AvatarCandidate {
            file_name: self.file_name.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.bytes.len() as u64,
        })
    }

    async fn read(&self) -> Result<Vec<u8>, AvatarError> {
        Ok(self.bytes.to_vec())
    }
}

/// Checks the candidate, reads it, and encodes it. Nothing is read when the
/// candidate is rejected.
pub async fn load_avatar(source: &dyn AvatarSource) -> Result<UploadedAvatar, AvatarError> {
    let candidate = source.describe().await?;
    let mime = candidate.check()?;
    let bytes = source.read().await?;

    // The file may have grown between metadata and read.
    let size_bytes = bytes.len() as u64;
    check_size(size_bytes)?;

    tracing::debug!(
        file_name = %candidate.file_name,
        mime = %mime,
        size_bytes,
        "avatar decoded"
    );

    Ok(UploadedAvatar {
        data_url: encode_data_url(mime, &bytes),
        mime_type: mime,
        size_bytes,
        file_name: candidate.file_name,
    })
}

#[cfg(test)]
#[path = "tests/avatar_tests.rs"]
mod tests;
