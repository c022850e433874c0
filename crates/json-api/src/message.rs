//! Plain acknowledgement body.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// Acknowledgement Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
