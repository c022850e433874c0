//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::errors::UnknownVariant, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownVariant::new("user role", other)),
        }
    }
}

/// Postal address, stored as JSON on users and orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// User Record
#[derive(Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub address: Option<Address>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRecord {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("uuid", &self.uuid)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .finish_non_exhaustive()
    }
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub uuid: UserUuid,
    pub email: String,
    pub role: UserRole,
}

impl Requester {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<&UserRecord> for Requester {
    fn from(user: &UserRecord) -> Self {
        Self {
            uuid: user.uuid,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_stored_values() {
        assert_eq!("admin".parse(), Ok(UserRole::Admin));
        assert_eq!("customer".parse(), Ok(UserRole::Customer));
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn debug_output_omits_password_hash() {
        let user = UserRecord {
            uuid: UserUuid::new(),
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role: UserRole::Customer,
            is_active: true,
            address: None,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        };

        assert!(!format!("{user:?}").contains("argon2id"));
    }
}
