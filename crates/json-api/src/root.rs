//! API Banner Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Service banner
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BannerResponse {
    pub message: String,
    pub version: String,
}

/// API Banner Handler
#[endpoint(tags("health"), summary = "API banner")]
pub(crate) async fn handler() -> Json<BannerResponse> {
    Json(BannerResponse {
        message: "Poppy & Teal Macramé Store API".to_string(),
        version: "1.0.0".to_string(),
    })
}
