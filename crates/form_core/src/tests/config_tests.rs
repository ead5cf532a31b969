use super::*;

use std::collections::HashMap;

#[test]
fn partial_file_keeps_remaining_defaults() {
    let settings = parse_settings("event_name = \"Rust Nation\"\n").expect("parse");
    assert_eq!(settings.event_name, "Rust Nation");
    assert_eq!(settings.event_date, Settings::default().event_date);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn rejects_malformed_file() {
    assert!(parse_settings("event_name = ").is_err());
}

#[test]
fn env_overrides_win_and_blank_values_are_ignored() {
    let env: HashMap<&str, &str> = [
        ("TICKET__EVENT_LOCATION", "Berlin"),
        ("TICKET__EVENT_NAME", "   "),
        ("TICKET__LOG_FILTER", "form_core=debug"),
    ]
    .into_iter()
    .collect();

    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |name| env.get(name).map(|v| v.to_string()));

    assert_eq!(settings.event_location, "Berlin");
    assert_eq!(settings.event_name, "Coding Conf");
    assert_eq!(settings.log_filter, "form_core=debug");
}

#[test]
fn explicit_file_must_exist() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = load_settings(Some(&dir.path().join("missing.toml"))).expect_err("missing");
    assert!(format!("{err:#}").contains("failed to read config file"));
}

#[test]
fn explicit_file_is_loaded() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("ticket.toml");
    fs::write(
        &path,
        "event_name = \"Coding Conf\"\nevent_date = \"Feb 1, 2026\"\n",
    )
    .expect("write");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.event().line().split(" / ").next(), Some("Feb 1, 2026"));
}

#[test]
fn event_flags_override_only_what_is_given() {
    let mut settings = Settings::default();
    settings.apply_event_flags(Some("Rust Nation".to_string()), None, None);
    assert_eq!(settings.event_name, "Rust Nation");
    assert_eq!(settings.event_date, "Jan 31, 2025");
    assert_eq!(settings.event_location, "Austin, TX");
}
