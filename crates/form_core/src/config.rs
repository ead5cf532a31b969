use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;
use shared::summary::EventDetails;

pub const DEFAULT_CONFIG_FILE: &str = "ticket.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub event_name: String,
    pub event_date: String,
    pub event_location: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            event_name: "Coding Conf".into(),
            event_date: "Jan 31, 2025".into(),
            event_location: "Austin, TX".into(),
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn event(&self) -> EventDetails {
        EventDetails {
            name: self.event_name.clone(),
            date: self.event_date.clone(),
            location: self.event_location.clone(),
        }
    }

    /// Command-line values win over the file and environment.
    pub fn apply_event_flags(
        &mut self,
        name: Option<String>,
        date: Option<String>,
        location: Option<String>,
    ) {
        if let Some(name) = name {
            self.event_name = name;
        }
        if let Some(date) = date {
            self.event_date = date;
        }
        if let Some(location) = location {
            self.event_location = location;
        }
    }
}

/// Defaults, then the TOML file, then `TICKET__*` environment overrides.
///
/// Without an explicit path a missing or malformed `ticket.toml` falls back
/// to defaults; an explicit path must exist and parse.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match explicit_path {
        Some(path) => read_settings_file(path)?,
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.exists() {
                read_settings_file(&path).unwrap_or_else(|err| {
                    tracing::warn!("ignoring {DEFAULT_CONFIG_FILE}: {err:#}");
                    Settings::default()
                })
            } else {
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, |name| std::env::var(name).ok());
    Ok(settings)
}

fn read_settings_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    parse_settings(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))
}

pub fn parse_settings(raw: &str) -> anyhow::Result<Settings> {
    Ok(toml::from_str::<Settings>(raw)?)
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(v) = read("TICKET__EVENT_NAME") {
        settings.event_name = v;
    }
    if let Some(v) = read("TICKET__EVENT_DATE") {
        settings.event_date = v;
    }
    if let Some(v) = read("TICKET__EVENT_LOCATION") {
        settings.event_location = v;
    }
    if let Some(v) = read("TICKET__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
