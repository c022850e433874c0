//! Contact Models

use std::str::FromStr;

use salvo::{http::StatusError, oapi::ToSchema};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::contacts::{
    data::NewContact,
    records::{ContactRecord, ContactStatus},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactResponse {
    /// The unique identifier of the message
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// `new`, `read` or `replied`
    pub status: String,
    /// The date and time the message was received
    pub created_at: String,
}

impl From<ContactRecord> for ContactResponse {
    fn from(contact: ContactRecord) -> Self {
        ContactResponse {
            id: contact.uuid.into_uuid(),
            name: contact.name,
            email: contact.email,
            subject: contact.subject,
            message: contact.message,
            status: contact.status.as_str().to_string(),
            created_at: contact.created_at.to_string(),
        }
    }
}

/// Contact Form Submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<CreateContactRequest> for NewContact {
    fn from(request: CreateContactRequest) -> Self {
        NewContact {
            name: request.name,
            email: request.email,
            subject: request.subject,
            message: request.message,
        }
    }
}

/// Contact Status Update Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ContactStatusRequest {
    /// One of `new`, `read`, `replied`
    pub status: String,
}

pub(crate) fn parse_status(value: &str) -> Result<ContactStatus, StatusError> {
    ContactStatus::from_str(value)
        .map_err(|unknown| StatusError::bad_request().brief(unknown.to_string()))
}
