//! Avatar intake, field validation, and the Intake → Ticket flow.
//!
//! Hosts own a [`FormState`], feed it user actions, run avatar decodes
//! through [`load_avatar`], and draw whatever [`view::project`] returns.

pub mod avatar;
pub mod config;
pub mod form;
pub mod ticket;
pub mod validation;
pub mod view;

pub use avatar::{
    decode_data_url, encode_data_url, load_avatar, AvatarCandidate, AvatarSource, FsAvatarSource,
    MemoryAvatarSource, UploadedAvatar,
};
pub use config::{load_settings, Settings};
pub use form::{AvatarCompletion, FieldStatus, FormState, SubmitOutcome, ViewState};
pub use ticket::{generate_ticket_number, Ticket};
pub use validation::{
    validate_email, validate_field, validate_full_name, validate_github_username,
    ValidationResult,
};
pub use view::{project, Screen};
