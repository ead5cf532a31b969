use rand::Rng;
use shared::{
    domain::TicketNumber,
    summary::{EventDetails, TicketSummary},
};

use crate::avatar::UploadedAvatar;

/// Display-only record produced by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub full_name: String,
    pub email: String,
    pub github_username: String,
    pub avatar: UploadedAvatar,
    pub ticket_number: TicketNumber,
    pub event: EventDetails,
}

/// Uniform over `#00000..=#99999`; not unique across tickets.
pub fn generate_ticket_number<R: Rng + ?Sized>(rng: &mut R) -> TicketNumber {
    TicketNumber(rng.random_range(0..=TicketNumber::MAX))
}

impl Ticket {
    pub fn summary(&self) -> TicketSummary {
        TicketSummary {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            github_username: self.github_username.clone(),
            avatar_uploaded: true,
            avatar_bytes: self.avatar.size_bytes,
            ticket_number: self.ticket_number,
            ticket_label: self.ticket_number.to_string(),
            event: self.event.clone(),
        }
    }
}
