//! Contact Records

use std::str::FromStr;

use jiff::Timestamp;

use crate::{domain::errors::UnknownVariant, uuids::TypedUuid};

/// Contact UUID
pub type ContactUuid = TypedUuid<ContactRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
}

impl ContactStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

impl FromStr for ContactStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            other => Err(UnknownVariant::new("contact status", other)),
        }
    }
}

/// Contact Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRecord {
    pub uuid: ContactUuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: Timestamp,
}
