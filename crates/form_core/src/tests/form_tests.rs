use super::*;
use rand::{rngs::StdRng, SeedableRng};
use shared::{domain::AvatarMime, error::AlertKind};

use crate::avatar::encode_data_url;

fn event() -> EventDetails {
    EventDetails {
        name: "Coding Conf".to_string(),
        date: "Jan 31, 2025".to_string(),
        location: "Austin, TX".to_string(),
    }
}

fn png_avatar(name: &str) -> UploadedAvatar {
    UploadedAvatar {
        data_url: encode_data_url(AvatarMime::Png, name.as_bytes()),
        mime_type: AvatarMime::Png,
        size_bytes: name.len() as u64,
        file_name: name.to_string(),
    }
}

fn filled_form() -> FormState {
    let mut form = FormState::new(event());
    form.set_value(FieldKind::FullName, "Ada Lovelace");
    form.set_value(FieldKind::Email, "ada@x.com");
    form.set_value(FieldKind::GithubUsername, "@ada");
    form
}

fn accept_avatar(form: &mut FormState, name: &str) {
    let selection = form.begin_avatar_selection().expect("selection");
    assert_eq!(
        form.complete_avatar_selection(selection, Ok(png_avatar(name))),
        AvatarCompletion::Applied
    );
}

#[test]
fn empty_submission_reports_three_inline_errors_and_no_alert() {
    let mut form = FormState::new(event());
    let outcome = form.submit(&mut StdRng::seed_from_u64(1));

    assert_eq!(outcome, SubmitOutcome::FieldsInvalid(FieldKind::ALL.to_vec()));
    assert_eq!(
        form.status(FieldKind::FullName),
        &FieldStatus::Invalid("Full name is required".to_string())
    );
    assert_eq!(
        form.status(FieldKind::Email),
        &FieldStatus::Invalid("Email address is required".to_string())
    );
    assert_eq!(
        form.status(FieldKind::GithubUsername),
        &FieldStatus::Invalid("GitHub username is required".to_string())
    );
    assert!(form.alert().is_none());
    assert_eq!(form.view(), &ViewState::Intake);
}

#[test]
fn failures_accumulate_and_passing_fields_are_marked_valid() {
    let mut form = filled_form();
    form.set_value(FieldKind::Email, "a@b");
    let outcome = form.submit(&mut StdRng::seed_from_u64(1));

    assert_eq!(outcome, SubmitOutcome::FieldsInvalid(vec![FieldKind::Email]));
    assert_eq!(form.status(FieldKind::FullName), &FieldStatus::Valid);
    assert_eq!(form.status(FieldKind::GithubUsername), &FieldStatus::Valid);
    assert!(form.alert().is_none());
}

#[test]
fn resubmission_clears_fixed_errors() {
    let mut form = filled_form();
    form.set_value(FieldKind::GithubUsername, "ada");
    form.submit(&mut StdRng::seed_from_u64(1));
    assert!(matches!(
        form.status(FieldKind::GithubUsername),
        FieldStatus::Invalid(_)
    ));

    form.set_value(FieldKind::GithubUsername, "@ada");
    // Editing alone leaves the stale status until the next submit.
    assert!(matches!(
        form.status(FieldKind::GithubUsername),
        FieldStatus::Invalid(_)
    ));

    let outcome = form.submit(&mut StdRng::seed_from_u64(1));
    assert_eq!(outcome, SubmitOutcome::MissingAvatar);
    assert_eq!(form.status(FieldKind::GithubUsername), &FieldStatus::Valid);
}

#[test]
fn valid_fields_without_avatar_raise_blocking_alert() {
    let mut form = filled_form();
    let outcome = form.submit(&mut StdRng::seed_from_u64(1));

    assert_eq!(outcome, SubmitOutcome::MissingAvatar);
    assert_eq!(form.alert(), Some(&Alert::missing_avatar()));
    assert_eq!(form.view(), &ViewState::Intake);

    assert_eq!(form.dismiss_alert(), Some(Alert::missing_avatar()));
    assert!(form.alert().is_none());
}

#[test]
fn complete_submission_issues_ticket() {
    let mut form = filled_form();
    accept_avatar(&mut form, "ada.png");

    let SubmitOutcome::Issued(ticket) = form.submit(&mut StdRng::seed_from_u64(9)) else {
        panic!("expected a ticket");
    };
    assert_eq!(ticket.full_name, "Ada Lovelace");
    assert_eq!(ticket.email, "ada@x.com");
    assert_eq!(ticket.github_username, "@ada");
    assert_eq!(ticket.avatar, png_avatar("ada.png"));
    assert_eq!(ticket.event, event());
    assert_eq!(form.ticket(), Some(&ticket));

    assert_eq!(
        form.submit(&mut StdRng::seed_from_u64(9)),
        SubmitOutcome::AlreadyIssued
    );
    assert_eq!(form.begin_avatar_selection(), None);
}

#[test]
fn stale_decode_never_replaces_newer_selection() {
    let mut form = FormState::new(event());
    let first = form.begin_avatar_selection().expect("first");
    let second = form.begin_avatar_selection().expect("second");
    assert!(second > first);

    assert_eq!(
        form.complete_avatar_selection(second, Ok(png_avatar("second.png"))),
        AvatarCompletion::Applied
    );
    assert_eq!(
        form.complete_avatar_selection(first, Ok(png_avatar("first.png"))),
        AvatarCompletion::Stale
    );
    assert_eq!(form.avatar(), Some(&png_avatar("second.png")));
}

#[test]
fn completion_after_removal_is_ignored() {
    let mut form = FormState::new(event());
    let selection = form.begin_avatar_selection().expect("selection");
    assert!(!form.remove_avatar());
    assert_eq!(form.pending_selection(), None);

    assert_eq!(
        form.complete_avatar_selection(selection, Ok(png_avatar("late.png"))),
        AvatarCompletion::Stale
    );
    assert!(form.avatar().is_none());
}

#[test]
fn rejected_decode_keeps_previous_avatar_and_alerts() {
    let mut form = FormState::new(event());
    accept_avatar(&mut form, "keep.png");

    let selection = form.begin_avatar_selection().expect("selection");
    let completion = form.complete_avatar_selection(
        selection,
        Err(AvatarError::UnsupportedType {
            mime: "image/gif".to_string(),
        }),
    );

    let AvatarCompletion::Rejected(alert) = completion else {
        panic!("expected rejection");
    };
    assert_eq!(alert.kind, AlertKind::UnsupportedType);
    assert_eq!(form.alert(), Some(&alert));
    assert_eq!(form.avatar(), Some(&png_avatar("keep.png")));
}

#[test]
fn remove_returns_to_placeholder_and_allows_same_file_again() {
    let mut form = FormState::new(event());
    accept_avatar(&mut form, "same.png");
    assert!(form.remove_avatar());
    assert!(form.avatar().is_none());

    accept_avatar(&mut form, "same.png");
    assert_eq!(form.avatar(), Some(&png_avatar("same.png")));
}

#[test]
fn hide_error_keeps_valid_mark() {
    let mut form = FormState::new(event());
    form.show_valid(FieldKind::Email);
    form.hide_error(FieldKind::Email);
    assert_eq!(form.status(FieldKind::Email), &FieldStatus::Valid);

    form.show_error(FieldKind::Email, "bad");
    form.hide_error(FieldKind::Email);
    assert_eq!(form.status(FieldKind::Email), &FieldStatus::Untouched);
}

#[test]
fn report_follows_state() {
    let mut form = FormState::new(event());
    form.set_value(FieldKind::FullName, "Ada");
    form.submit(&mut StdRng::seed_from_u64(3));
    let SubmissionReport::FieldsInvalid { errors } = form.report() else {
        panic!("expected field errors");
    };
    assert_eq!(errors.len(), 3);
    assert_eq!(
        errors[&FieldKind::FullName],
        "Please enter both first name and last name"
    );

    let mut form = filled_form();
    form.submit(&mut StdRng::seed_from_u64(3));
    assert_eq!(form.report(), SubmissionReport::Alert(Alert::missing_avatar()));

    form.dismiss_alert();
    accept_avatar(&mut form, "ada.png");
    form.submit(&mut StdRng::seed_from_u64(3));
    let SubmissionReport::Issued { ticket } = form.report() else {
        panic!("expected ticket");
    };
    assert!(ticket.avatar_uploaded);
    assert_eq!(ticket.ticket_label, ticket.ticket_number.to_string());
}

#[test]
fn cancelling_an_undispatched_selection_only_clears_that_selection() {
    let mut form = FormState::new(event());
    accept_avatar(&mut form, "kept.png");
    let selection = form.begin_avatar_selection().expect("selection");

    form.cancel_avatar_selection(SelectionId(selection.0 + 1));
    assert_eq!(form.pending_selection(), Some(selection));

    form.cancel_avatar_selection(selection);
    assert_eq!(form.pending_selection(), None);
    assert_eq!(form.avatar(), Some(&png_avatar("kept.png")));
}

#[test]
fn rejected_newer_selection_leaves_older_decode_in_flight() {
    let mut form = FormState::new(event());
    let good = form.begin_avatar_selection().expect("good");
    let gif = form.begin_avatar_selection().expect("gif");

    let rejected = form.complete_avatar_selection(
        gif,
        Err(AvatarError::UnsupportedType {
            mime: "image/gif".to_string(),
        }),
    );
    assert!(matches!(rejected, AvatarCompletion::Rejected(_)));
    assert_eq!(form.pending_selection(), Some(good));

    assert_eq!(
        form.complete_avatar_selection(good, Ok(png_avatar("a.png"))),
        AvatarCompletion::Applied
    );
    assert_eq!(form.avatar(), Some(&png_avatar("a.png")));
    assert_eq!(form.pending_selection(), None);
}

#[test]
fn older_decode_waits_while_newer_selection_is_in_flight() {
    let mut form = FormState::new(event());
    let older = form.begin_avatar_selection().expect("older");
    let newer = form.begin_avatar_selection().expect("newer");

    assert_eq!(
        form.complete_avatar_selection(older, Ok(png_avatar("older.png"))),
        AvatarCompletion::Held
    );
    assert!(form.avatar().is_none());
    assert_eq!(form.pending_selection(), Some(newer));

    assert_eq!(
        form.complete_avatar_selection(newer, Ok(png_avatar("newer.png"))),
        AvatarCompletion::Applied
    );
    assert_eq!(form.avatar(), Some(&png_avatar("newer.png")));

    form.remove_avatar();
    assert!(form.avatar().is_none());
}

#[test]
fn held_decode_lands_when_newer_selection_is_rejected() {
    let mut form = FormState::new(event());
    accept_avatar(&mut form, "current.png");
    let good = form.begin_avatar_selection().expect("good");
    let gif = form.begin_avatar_selection().expect("gif");

    assert_eq!(
        form.complete_avatar_selection(good, Ok(png_avatar("a.png"))),
        AvatarCompletion::Held
    );
    assert_eq!(form.avatar(), Some(&png_avatar("current.png")));

    let rejected = form.complete_avatar_selection(
        gif,
        Err(AvatarError::TooLarge { size: 600_000 }),
    );
    assert!(matches!(rejected, AvatarCompletion::Rejected(_)));
    assert_eq!(form.avatar(), Some(&png_avatar("a.png")));
    assert_eq!(form.pending_selection(), None);
}

#[test]
fn held_decode_lands_when_newer_selection_is_cancelled() {
    let mut form = FormState::new(event());
    let good = form.begin_avatar_selection().expect("good");
    let undispatched = form.begin_avatar_selection().expect("undispatched");
    form.complete_avatar_selection(good, Ok(png_avatar("a.png")));

    form.cancel_avatar_selection(undispatched);
    assert_eq!(form.avatar(), Some(&png_avatar("a.png")));
}

#[test]
fn removal_discards_held_decode() {
    let mut form = FormState::new(event());
    let good = form.begin_avatar_selection().expect("good");
    let newer = form.begin_avatar_selection().expect("newer");
    form.complete_avatar_selection(good, Ok(png_avatar("a.png")));

    form.remove_avatar();
    let unreadable = Err(AvatarError::Unreadable {
        reason: "gone".to_string(),
    });
    assert_eq!(
        form.complete_avatar_selection(newer, unreadable),
        AvatarCompletion::Stale
    );
    assert!(form.avatar().is_none());
}
