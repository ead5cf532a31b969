//! Folds bridge events into the form state.

use form_core::{AvatarCompletion, FormState};

use crate::controller::events::UiEvent;

pub fn apply_ui_event(form: &mut FormState, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::Info(message) => *status = message,
        UiEvent::AvatarDecoded { selection, result } => {
            match form.complete_avatar_selection(selection, result) {
                AvatarCompletion::Applied => {
                    if let Some(avatar) = form.avatar() {
                        *status = format!("Avatar ready: {}", avatar.file_name);
                    }
                }
                AvatarCompletion::Rejected(alert) => *status = alert.message,
                AvatarCompletion::Held | AvatarCompletion::Stale => {}
            }
        }
        UiEvent::Error(err) => {
            tracing::warn!(context = ?err.context(), "{}", err.message());
            *status = err.status_line();
        }
    }
}

#[cfg(test)]
mod tests {
    use form_core::{encode_data_url, Settings, UploadedAvatar};
    use shared::{
        domain::{AvatarMime, SelectionId},
        error::{AlertKind, AvatarError},
    };

    use super::*;
    use crate::controller::events::{UiError, UiErrorContext};

    fn avatar(name: &str) -> UploadedAvatar {
        UploadedAvatar {
            data_url: encode_data_url(AvatarMime::Jpeg, b"jpeg"),
            mime_type: AvatarMime::Jpeg,
            size_bytes: 4,
            file_name: name.to_string(),
        }
    }

    #[test]
    fn applies_latest_decode_and_updates_status() {
        let mut form = FormState::new(Settings::default().event());
        let mut status = String::new();
        let selection = form.begin_avatar_selection().expect("selection");

        apply_ui_event(
            &mut form,
            &mut status,
            UiEvent::AvatarDecoded {
                selection,
                result: Ok(avatar("me.jpg")),
            },
        );

        assert_eq!(form.avatar(), Some(&avatar("me.jpg")));
        assert_eq!(status, "Avatar ready: me.jpg");
    }

    #[test]
    fn stale_decode_leaves_state_and_status_alone() {
        let mut form = FormState::new(Settings::default().event());
        let mut status = "Ready".to_string();
        form.begin_avatar_selection();

        apply_ui_event(
            &mut form,
            &mut status,
            UiEvent::AvatarDecoded {
                selection: SelectionId(99),
                result: Ok(avatar("old.jpg")),
            },
        );

        assert!(form.avatar().is_none());
        assert_eq!(status, "Ready");
    }

    #[test]
    fn rejected_decode_raises_alert() {
        let mut form = FormState::new(Settings::default().event());
        let mut status = String::new();
        let selection = form.begin_avatar_selection().expect("selection");

        apply_ui_event(
            &mut form,
            &mut status,
            UiEvent::AvatarDecoded {
                selection,
                result: Err(AvatarError::TooLarge { size: 600_000 }),
            },
        );

        assert_eq!(form.alert().map(|a| a.kind), Some(AlertKind::TooLarge));
        assert_eq!(status, "File size must be less than 500KB.");
    }

    #[test]
    fn bridge_errors_become_status_lines() {
        let mut form = FormState::new(Settings::default().event());
        let mut status = String::new();
        apply_ui_event(
            &mut form,
            &mut status,
            UiEvent::Error(UiError::from_message(
                UiErrorContext::BridgeStartup,
                "failed to build decode runtime",
            )),
        );
        assert_eq!(status, "Startup: failed to build decode runtime");
        assert!(form.alert().is_none());
    }
}
