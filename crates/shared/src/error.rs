use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::MAX_AVATAR_BYTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    UnsupportedType,
    TooLarge,
    Unreadable,
    MissingAvatar,
}

/// A blocking, user-facing message. The host must have it dismissed before
/// the form accepts further interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: AlertKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn missing_avatar() -> Self {
        Self::new(AlertKind::MissingAvatar, "Please upload an avatar image")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    #[error("unsupported avatar type '{mime}'")]
    UnsupportedType { mime: String },
    #[error("avatar is {size} bytes, limit is {limit}", limit = MAX_AVATAR_BYTES)]
    TooLarge { size: u64 },
    #[error("avatar could not be read: {reason}")]
    Unreadable { reason: String },
}

impl AvatarError {
    pub fn kind(&self) -> AlertKind {
        match self {
            Self::UnsupportedType { .. } => AlertKind::UnsupportedType,
            Self::TooLarge { .. } => AlertKind::TooLarge,
            Self::Unreadable { .. } => AlertKind::Unreadable,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedType { .. } => "Please upload a JPG or PNG image.",
            Self::TooLarge { .. } => "File size must be less than 500KB.",
            Self::Unreadable { .. } => "Could not read the selected file.",
        }
    }
}

impl From<&AvatarError> for Alert {
    fn from(value: &AvatarError) -> Self {
        Alert::new(value.kind(), value.user_message())
    }
}

impl From<AvatarError> for Alert {
    fn from(value: AvatarError) -> Self {
        Alert::from(&value)
    }
}
