use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{FieldKind, TicketNumber},
    error::Alert,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub name: String,
    pub date: String,
    pub location: String,
}

impl EventDetails {
    pub fn line(&self) -> String {
        format!("{} / {}", self.date, self.location)
    }
}

/// Serializable view of an issued ticket. The avatar payload is reduced to
/// its size so summaries stay small enough to log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    pub full_name: String,
    pub email: String,
    pub github_username: String,
    pub avatar_uploaded: bool,
    pub avatar_bytes: u64,
    pub ticket_number: TicketNumber,
    pub ticket_label: String,
    pub event: EventDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionReport {
    Issued { ticket: TicketSummary },
    FieldsInvalid { errors: BTreeMap<FieldKind, String> },
    Alert(Alert),
}

impl SubmissionReport {
    pub fn is_issued(&self) -> bool {
        matches!(self, Self::Issued { .. })
    }
}
