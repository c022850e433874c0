//! User List Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use storefront_app::domain::admin::USERS_PAGE;

use crate::{admin::into_status_error, auth::models::UserResponse, extensions::*, state::State};

/// User List Handler
///
/// Users in creation order.
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Users"),
        (status_code = StatusCode::FORBIDDEN, description = "Not enough permissions"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    skip: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<UserResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .admin
        .list_users(skip.into_page(limit, USERS_PAGE))
        .await
        .map_err(into_status_error)?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::domain::{
        admin::MockAdminService, pagination::Page, users::records::UserRole,
    };

    use crate::test_helpers::{Mocks, TEST_ADMIN_UUID, TEST_CUSTOMER_UUID, admin_service, make_user};

    use super::*;

    #[tokio::test]
    async fn test_users_are_listed_without_password_hashes() -> TestResult {
        let users = vec![
            make_user(TEST_ADMIN_UUID, UserRole::Admin),
            make_user(TEST_CUSTOMER_UUID, UserRole::Customer),
        ];

        let mut admin = MockAdminService::new();

        admin
            .expect_list_users()
            .once()
            .withf(|page| *page == Page { skip: 0, limit: 100 })
            .return_once(move |_| Ok(users));

        let service = admin_service(
            Mocks {
                admin,
                ..Mocks::default()
            },
            Router::with_path("admin/users").get(handler),
        );

        let mut res = TestClient::get("http://example.com/admin/users?limit=1000")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body = res.take_string().await?;

        assert!(!body.contains("argon2"));

        let users: Vec<UserResponse> = serde_json::from_str(&body)?;

        assert_eq!(users.len(), 2);

        Ok(())
    }
}
