//! Account Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::users::{
    Session,
    data::ProfileUpdate,
    records::{Address, UserRecord},
};

/// Postal address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressPayload {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

impl From<Address> for AddressPayload {
    fn from(address: Address) -> Self {
        Self {
            street: address.street,
            city: address.city,
            state: address.state,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Self {
            street: payload.street,
            city: payload.city,
            state: payload.state,
            postal_code: payload.postal_code,
            country: payload.country,
        }
    }
}

/// User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub id: Uuid,

    pub email: String,

    pub first_name: String,

    pub last_name: String,

    /// `customer` or `admin`
    pub role: String,

    pub is_active: bool,

    /// The date and time the account was created
    pub created_at: String,

    pub address: Option<AddressPayload>,
}

impl From<&UserRecord> for UserResponse {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.uuid.into_uuid(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.as_str().to_string(),
            is_active: user.is_active,
            created_at: user.created_at.to_string(),
            address: user.address.clone().map(Into::into),
        }
    }
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self::from(&user)
    }
}

/// Token Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TokenResponse {
    /// Bearer token for the `Authorization` header
    pub access_token: String,

    /// Always `bearer`
    pub token_type: String,

    pub user: UserResponse,
}

impl From<Session> for TokenResponse {
    fn from(session: Session) -> Self {
        Self {
            access_token: session.token,
            token_type: "bearer".to_string(),
            user: session.user.into(),
        }
    }
}

/// Partial profile update; omitted fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<AddressPayload>,
}

impl From<UpdateUserRequest> for ProfileUpdate {
    fn from(request: UpdateUserRequest) -> Self {
        ProfileUpdate {
            first_name: request.first_name,
            last_name: request.last_name,
            address: request.address.map(Into::into),
        }
    }
}
