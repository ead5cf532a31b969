//! Form state and the Intake → Ticket state machine.
//!
//! All mutation goes through [`FormState`]; hosts render it through
//! [`crate::view::project`] and never keep their own copy of field or avatar
//! state.

use std::collections::BTreeMap;

use rand::Rng;
use shared::{
    domain::{FieldKind, PerField, SelectionId},
    error::{Alert, AvatarError},
    summary::{EventDetails, SubmissionReport},
};

use crate::{
    avatar::UploadedAvatar,
    ticket::{generate_ticket_number, Ticket},
    validation::validate_field,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldStatus {
    #[default]
    Untouched,
    Invalid(String),
    Valid,
}

impl FieldStatus {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Invalid(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Intake,
    Ticket(Ticket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Issued(Ticket),
    FieldsInvalid(Vec<FieldKind>),
    MissingAvatar,
    AlreadyIssued,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarCompletion {
    Applied,
    Rejected(Alert),
    /// Decoded fine, but a newer selection is still in flight. Applied later
    /// only if every newer selection fails.
    Held,
    /// A newer selection (or a removal) superseded this one.
    Stale,
}

#[derive(Debug, Clone)]
pub struct FormState {
    values: PerField<String>,
    statuses: PerField<FieldStatus>,
    avatar: Option<UploadedAvatar>,
    /// Selections whose decode has not reported back, oldest first.
    in_flight: Vec<SelectionId>,
    last_selection: SelectionId,
    /// Newest successful decode waiting on newer in-flight selections.
    held: Option<(SelectionId, UploadedAvatar)>,
    alert: Option<Alert>,
    view: ViewState,
    event: EventDetails,
}

impl FormState {
    pub fn new(event: EventDetails) -> Self {
        Self {
            values: PerField::default(),
            statuses: PerField::default(),
            avatar: None,
            in_flight: Vec::new(),
            last_selection: SelectionId::default(),
            held: None,
            alert: None,
            view: ViewState::Intake,
            event,
        }
    }

    pub fn value(&self, kind: FieldKind) -> &str {
        self.values.get(kind)
    }

    /// Editing does not touch the field's status; it is recomputed on submit.
    pub fn value_mut(&mut self, kind: FieldKind) -> &mut String {
        self.values.get_mut(kind)
    }

    pub fn set_value(&mut self, kind: FieldKind, value: impl Into<String>) {
        *self.values.get_mut(kind) = value.into();
    }

    pub fn status(&self, kind: FieldKind) -> &FieldStatus {
        self.statuses.get(kind)
    }

    pub fn show_error(&mut self, kind: FieldKind, message: impl Into<String>) {
        *self.statuses.get_mut(kind) = FieldStatus::Invalid(message.into());
    }

    /// Clears an invalid mark; a valid mark survives.
    pub fn hide_error(&mut self, kind: FieldKind) {
        let status = self.statuses.get_mut(kind);
        if matches!(status, FieldStatus::Invalid(_)) {
            *status = FieldStatus::Untouched;
        }
    }

    pub fn show_valid(&mut self, kind: FieldKind) {
        *self.statuses.get_mut(kind) = FieldStatus::Valid;
    }

    pub fn avatar(&self) -> Option<&UploadedAvatar> {
        self.avatar.as_ref()
    }

    /// The newest selection still being decoded.
    pub fn pending_selection(&self) -> Option<SelectionId> {
        self.in_flight.last().copied()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn dismiss_alert(&mut self) -> Option<Alert> {
        self.alert.take()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        match &self.view {
            ViewState::Ticket(ticket) => Some(ticket),
            ViewState::Intake => None,
        }
    }

    pub fn event(&self) -> &EventDetails {
        &self.event
    }

    /// Starts a new avatar selection. Returns `None` once the ticket is issued.
    pub fn begin_avatar_selection(&mut self) -> Option<SelectionId> {
        if self.ticket().is_some() {
            return None;
        }
        self.last_selection = self.last_selection.next();
        self.in_flight.push(self.last_selection);
        Some(self.last_selection)
    }

    /// Applies a finished decode if no newer selection is still in flight;
    /// otherwise the result is held in case every newer selection fails.
    /// Applying drops every older selection. A rejection keeps the current
    /// avatar and leaves other in-flight selections alone.
    pub fn complete_avatar_selection(
        &mut self,
        selection: SelectionId,
        result: Result<UploadedAvatar, AvatarError>,
    ) -> AvatarCompletion {
        let Some(position) = self.in_flight.iter().position(|id| *id == selection) else {
            tracing::debug!(
                selection = selection.0,
                latest = self.last_selection.0,
                "ignoring stale avatar decode"
            );
            return AvatarCompletion::Stale;
        };
        self.in_flight.remove(position);

        match result {
            Ok(avatar) if self.in_flight.iter().any(|id| *id > selection) => {
                if self.held.as_ref().is_none_or(|(held, _)| *held < selection) {
                    self.held = Some((selection, avatar));
                }
                AvatarCompletion::Held
            }
            Ok(avatar) => {
                self.apply_avatar(selection, avatar);
                AvatarCompletion::Applied
            }
            Err(err) => {
                tracing::debug!(selection = selection.0, error = %err, "avatar rejected");
                let alert = Alert::from(&err);
                self.alert = Some(alert.clone());
                self.release_held();
                AvatarCompletion::Rejected(alert)
            }
        }
    }

    fn apply_avatar(&mut self, selection: SelectionId, avatar: UploadedAvatar) {
        self.avatar = Some(avatar);
        self.in_flight.retain(|id| *id > selection);
        if self.held.as_ref().is_some_and(|(held, _)| *held <= selection) {
            self.held = None;
        }
    }

    /// Applies the held decode once nothing newer is left in flight.
    fn release_held(&mut self) {
        let ready = self
            .held
            .as_ref()
            .is_some_and(|(held, _)| self.in_flight.iter().all(|id| id < held));
        if !ready {
            return;
        }
        if let Some((selection, avatar)) = self.held.take() {
            tracing::debug!(selection = selection.0, "applying held avatar decode");
            self.apply_avatar(selection, avatar);
        }
    }

    /// Drops a selection whose decode never started (e.g. the worker queue
    /// was unavailable). Other selections are unaffected.
    pub fn cancel_avatar_selection(&mut self, selection: SelectionId) {
        self.in_flight.retain(|id| *id != selection);
        self.release_held();
    }

    /// Returns to the placeholder. The next selection may be the same file.
    pub fn remove_avatar(&mut self) -> bool {
        self.in_flight.clear();
        self.held = None;
        self.avatar.take().is_some()
    }

    pub fn submit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> SubmitOutcome {
        if self.ticket().is_some() {
            return SubmitOutcome::AlreadyIssued;
        }

        for kind in FieldKind::ALL {
            self.hide_error(kind);
        }

        let mut failed = Vec::new();
        for kind in FieldKind::ALL {
            let result = validate_field(kind, self.value(kind));
            if result.is_valid {
                self.show_valid(kind);
            } else {
                self.show_error(kind, result.message);
                failed.push(kind);
            }
        }
        if !failed.is_empty() {
            return SubmitOutcome::FieldsInvalid(failed);
        }

        let Some(avatar) = self.avatar.clone() else {
            self.alert = Some(Alert::missing_avatar());
            return SubmitOutcome::MissingAvatar;
        };

        let ticket = Ticket {
            full_name: self.value(FieldKind::FullName).to_string(),
            email: self.value(FieldKind::Email).to_string(),
            github_username: self.value(FieldKind::GithubUsername).to_string(),
            avatar,
            ticket_number: generate_ticket_number(rng),
            event: self.event.clone(),
        };

        tracing::info!(
            full_name = %ticket.full_name,
            email = %ticket.email,
            github_username = %ticket.github_username,
            avatar_uploaded = true,
            ticket_number = %ticket.ticket_number,
            "ticket generated successfully"
        );

        self.in_flight.clear();
        self.held = None;
        self.view = ViewState::Ticket(ticket.clone());
        SubmitOutcome::Issued(ticket)
    }

    /// Serializable account of where the flow stands.
    pub fn report(&self) -> SubmissionReport {
        if let Some(ticket) = self.ticket() {
            return SubmissionReport::Issued {
                ticket: ticket.summary(),
            };
        }
        if let Some(alert) = &self.alert {
            return SubmissionReport::Alert(alert.clone());
        }
        let errors: BTreeMap<FieldKind, String> = self
            .statuses
            .iter()
            .filter_map(|(kind, status)| status.error_message().map(|m| (kind, m.to_string())))
            .collect();
        SubmissionReport::FieldsInvalid { errors }
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
