//! Field validators. Every validator is pure and re-evaluated on each call.

use once_cell::sync::OnceCell;
use regex_lite::Regex;
use shared::domain::FieldKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: String::new(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }
}

/// Whitespace as browsers see it: the `\s` class and what `trim()` strips.
const BROWSER_WHITESPACE: &str = concat!(
    "\t\n\u{000B}\u{000C}\r \u{00A0}\u{1680}",
    "\u{2000}\u{2001}\u{2002}\u{2003}\u{2004}\u{2005}",
    "\u{2006}\u{2007}\u{2008}\u{2009}\u{200A}",
    "\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}",
);

fn is_browser_whitespace(c: char) -> bool {
    BROWSER_WHITESPACE.contains(c)
}

fn browser_trim(value: &str) -> &str {
    value.trim_matches(is_browser_whitespace)
}

/// Lengths are counted in UTF-16 code units, as browser strings count them.
fn browser_len(value: &str) -> usize {
    value.encode_utf16().count()
}

pub fn validate_full_name(name: &str) -> ValidationResult {
    let trimmed = browser_trim(name);
    if trimmed.is_empty() {
        return ValidationResult::invalid("Full name is required");
    }

    // Only the ASCII space separates parts; tabs stay inside a part.
    let parts: Vec<&str> = trimmed.split(' ').filter(|part| !part.is_empty()).collect();
    if parts.len() < 2 {
        return ValidationResult::invalid("Please enter both first name and last name");
    }

    if parts.iter().any(|part| browser_len(part) < 2) {
        return ValidationResult::invalid("Each name part must be at least 2 characters");
    }

    ValidationResult::valid()
}

fn email_pattern() -> &'static Regex {
    static EMAIL_RE: OnceCell<Regex> = OnceCell::new();
    EMAIL_RE.get_or_init(|| {
        let atom = format!("[^{BROWSER_WHITESPACE}@]+");
        Regex::new(&format!(r"^{atom}@{atom}\.{atom}$")).expect("valid email regex")
    })
}

/// Permissive: one `@`, a dot somewhere after it, no whitespace of any kind.
pub fn validate_email(email: &str) -> ValidationResult {
    if email.is_empty() {
        return ValidationResult::invalid("Email address is required");
    }

    if !email_pattern().is_match(email) {
        return ValidationResult::invalid("Please enter a valid email address");
    }

    ValidationResult::valid()
}

pub fn validate_github_username(username: &str) -> ValidationResult {
    let trimmed = browser_trim(username);
    if trimmed.is_empty() {
        return ValidationResult::invalid("GitHub username is required");
    }

    if !trimmed.starts_with('@') {
        return ValidationResult::invalid("GitHub username must start with @");
    }

    if browser_len(trimmed) < 2 {
        return ValidationResult::invalid("GitHub username must be at least 2 characters");
    }

    ValidationResult::valid()
}

pub fn validate_field(kind: FieldKind, value: &str) -> ValidationResult {
    match kind {
        FieldKind::FullName => validate_full_name(value),
        FieldKind::Email => validate_email(value),
        FieldKind::GithubUsername => validate_github_username(value),
    }
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
