//! Update Profile Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    auth::{
        into_status_error,
        models::{UpdateUserRequest, UserResponse},
    },
    extensions::*,
    state::State,
};

/// Update Profile Handler
///
/// Updates the signed-in user's names and address.
#[endpoint(
    tags("auth"),
    summary = "Update Profile",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Profile updated"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unauthorized"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.profile", skip(json, depot), fields(user_uuid = tracing::field::Empty), err)]
pub(crate) async fn handler(
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?.uuid;

    tracing::Span::current().record("user_uuid", tracing::field::display(user));

    let updated = state
        .app
        .accounts
        .update_profile(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::domain::users::{
        AccountsServiceError, MockAccountsService, data::ProfileUpdate, records::UserRole,
    };

    use crate::test_helpers::{Mocks, TEST_CUSTOMER_UUID, customer_service, make_address, make_user};

    use super::*;

    fn make_service(accounts: MockAccountsService) -> Service {
        customer_service(
            Mocks {
                accounts,
                ..Mocks::default()
            },
            Router::with_path("auth/profile").put(handler),
        )
    }

    #[tokio::test]
    async fn test_profile_forwards_partial_update() -> TestResult {
        let mut updated = make_user(TEST_CUSTOMER_UUID, UserRole::Customer);

        updated.first_name = "Grace".to_string();
        updated.address = Some(make_address());

        let mut accounts = MockAccountsService::new();

        accounts
            .expect_update_profile()
            .once()
            .withf(|user, update| {
                *user == TEST_CUSTOMER_UUID
                    && *update
                        == ProfileUpdate {
                            first_name: Some("Grace".to_string()),
                            last_name: None,
                            address: Some(make_address()),
                        }
            })
            .return_once(move |_, _| Ok(updated));

        let mut res = TestClient::put("http://example.com/auth/profile")
            .json(&json!({
                "first_name": "Grace",
                "address": {
                    "street": "1 Loom Lane",
                    "city": "Bath",
                    "state": "Somerset",
                    "postal_code": "BA1 1AA",
                    "country": "UK",
                },
            }))
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: UserResponse = res.take_json().await?;

        assert_eq!(body.first_name, "Grace");
        assert_eq!(body.address.map(|a| a.city), Some("Bath".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn test_profile_missing_user_returns_404() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_update_profile()
            .once()
            .return_once(|_, _| Err(AccountsServiceError::NotFound));

        let res = TestClient::put("http://example.com/auth/profile")
            .json(&json!({}))
            .send(&make_service(accounts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
