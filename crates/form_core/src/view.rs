//! Pure projection of [`FormState`] into what a host draws.

use shared::{
    domain::{FieldKind, MAX_AVATAR_BYTES},
    error::Alert,
};

use crate::form::{FieldStatus, FormState, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldVisual {
    Neutral,
    Error,
    Valid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub kind: FieldKind,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub value: String,
    pub visual: FieldVisual,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarPanel {
    Placeholder { hint: String },
    Decoding,
    Preview {
        data_url: String,
        file_name: String,
        /// A replacement is being decoded; the current preview stays until it lands.
        replacing: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeView {
    pub hero_visible: bool,
    pub avatar: AvatarPanel,
    pub fields: Vec<FieldView>,
    pub alert: Option<Alert>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketView {
    pub hero_visible: bool,
    pub congrats_name: String,
    pub email: String,
    pub full_name: String,
    pub github_username: String,
    pub avatar_data_url: String,
    pub ticket_number: String,
    pub event_name: String,
    pub event_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Intake(IntakeView),
    Ticket(TicketView),
}

pub fn upload_hint() -> String {
    format!(
        "Upload your photo (JPG or PNG, max size: {}KB).",
        MAX_AVATAR_BYTES / 1024
    )
}

fn field_view(form: &FormState, kind: FieldKind) -> FieldView {
    let (visual, error) = match form.status(kind) {
        FieldStatus::Untouched => (FieldVisual::Neutral, None),
        FieldStatus::Invalid(message) => (FieldVisual::Error, Some(message.clone())),
        FieldStatus::Valid => (FieldVisual::Valid, None),
    };
    FieldView {
        kind,
        label: kind.label(),
        placeholder: kind.placeholder(),
        value: form.value(kind).to_string(),
        visual,
        error,
    }
}

fn avatar_panel(form: &FormState) -> AvatarPanel {
    match (form.avatar(), form.pending_selection()) {
        (Some(avatar), pending) => AvatarPanel::Preview {
            data_url: avatar.data_url.clone(),
            file_name: avatar.file_name.clone(),
            replacing: pending.is_some(),
        },
        (None, Some(_)) => AvatarPanel::Decoding,
        (None, None) => AvatarPanel::Placeholder {
            hint: upload_hint(),
        },
    }
}

pub fn project(form: &FormState) -> Screen {
    match form.view() {
        ViewState::Intake => Screen::Intake(IntakeView {
            hero_visible: true,
            avatar: avatar_panel(form),
            fields: FieldKind::ALL
                .into_iter()
                .map(|kind| field_view(form, kind))
                .collect(),
            alert: form.alert().cloned(),
        }),
        ViewState::Ticket(ticket) => Screen::Ticket(TicketView {
            hero_visible: false,
            congrats_name: ticket.full_name.clone(),
            email: ticket.email.clone(),
            full_name: ticket.full_name.clone(),
            github_username: ticket.github_username.clone(),
            avatar_data_url: ticket.avatar.data_url.clone(),
            ticket_number: ticket.ticket_number.to_string(),
            event_name: ticket.event.name.clone(),
            event_line: ticket.event.line(),
        }),
    }
}
