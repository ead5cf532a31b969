use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        pub struct $name(pub $inner);
    };
}

id_newtype!(SelectionId, u64);
id_newtype!(TicketNumber, u32);

impl SelectionId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Largest accepted avatar payload, in bytes.
pub const MAX_AVATAR_BYTES: u64 = 512_000;

impl TicketNumber {
    pub const MAX: u32 = 99_999;
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:05}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvatarMime {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl AvatarMime {
    /// Exact match only: `image/jpg` and parameterised forms are not accepted.
    pub fn from_mime(raw: &str) -> Option<Self> {
        match raw {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for AvatarMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    FullName,
    Email,
    GithubUsername,
}

impl FieldKind {
    pub const ALL: [FieldKind; 3] = [
        FieldKind::FullName,
        FieldKind::Email,
        FieldKind::GithubUsername,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email Address",
            Self::GithubUsername => "GitHub Username",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::FullName => "",
            Self::Email => "example@email.com",
            Self::GithubUsername => "@yourusername",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::GithubUsername => "github_username",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::FullName => 0,
            Self::Email => 1,
            Self::GithubUsername => 2,
        }
    }
}

/// One value per [`FieldKind`], indexed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerField<T> {
    values: [T; 3],
}

impl<T> PerField<T> {
    pub fn get(&self, kind: FieldKind) -> &T {
        &self.values[kind.index()]
    }

    pub fn get_mut(&mut self, kind: FieldKind) -> &mut T {
        &mut self.values[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKind, &T)> {
        FieldKind::ALL.into_iter().zip(self.values.iter())
    }
}
