//! Backend commands queued from UI to backend worker.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use form_core::{avatar::mime_for_path, AvatarSource, FsAvatarSource, MemoryAvatarSource};
use shared::domain::SelectionId;

/// A file the user picked or dropped, before anything has been read.
#[derive(Debug, Clone)]
pub enum AvatarPick {
    Path(PathBuf),
    Dropped {
        name: String,
        mime: String,
        bytes: Arc<[u8]>,
    },
}

impl AvatarPick {
    /// Dropped bytes without a MIME string fall back to the file name's extension.
    pub fn into_source(self) -> Box<dyn AvatarSource> {
        match self {
            Self::Path(path) => Box::new(FsAvatarSource::new(path)),
            Self::Dropped { name, mime, bytes } => {
                let mime = if mime.trim().is_empty() {
                    mime_for_path(Path::new(&name))
                } else {
                    mime
                };
                Box::new(MemoryAvatarSource::new(name, mime, bytes))
            }
        }
    }
}

pub enum BackendCommand {
    DecodeAvatar {
        selection: SelectionId,
        pick: AvatarPick,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::DecodeAvatar { .. } => "decode_avatar",
        }
    }
}
