//! Bridge → UI events and error modeling for the ticket GUI controller.

use form_core::UploadedAvatar;
use shared::{domain::SelectionId, error::AvatarError};

pub enum UiEvent {
    Info(String),
    AvatarDecoded {
        selection: SelectionId,
        result: Result<UploadedAvatar, AvatarError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BridgeStartup,
}

impl UiErrorContext {
    fn label(self) -> &'static str {
        match self {
            Self::BridgeStartup => "Startup",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            context,
            message: message.into(),
        }
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_line(&self) -> String {
        format!("{}: {}", self.context.label(), self.message)
    }
}
