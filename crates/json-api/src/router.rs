//! App Router

use salvo::Router;

use crate::{
    admin,
    auth::{self, middleware::require_admin},
    contacts, orders, products, root,
};

/// Routes served under `/api`.
pub fn app_router() -> Router {
    Router::with_path("api")
        .get(root::handler)
        .push(auth_router())
        .push(products_router())
        .push(orders_router())
        .push(contacts_router())
        .push(admin_router())
}

fn auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("register").post(auth::handlers::register::handler))
        .push(Router::with_path("login").post(auth::handlers::login::handler))
        .push(Router::with_path("forgot-password").post(auth::handlers::forgot_password::handler))
        .push(Router::with_path("reset-password").post(auth::handlers::reset_password::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("me").get(auth::handlers::me::handler))
                .push(Router::with_path("profile").put(auth::handlers::profile::handler)),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::handlers::index::handler)
        .push(Router::with_path("featured").get(products::handlers::featured::handler))
        .push(Router::with_path("categories").get(products::handlers::categories::handler))
        .push(Router::with_path("search/{query}").get(products::handlers::search::handler))
        .push(Router::with_path("{product}").get(products::handlers::get::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .hoop(require_admin)
                .post(products::handlers::create::handler)
                .push(
                    Router::with_path("{product}")
                        .put(products::handlers::update::handler)
                        .delete(products::handlers::delete::handler),
                ),
        )
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("admin/all")
                .hoop(require_admin)
                .get(orders::handlers::all::handler),
        )
        .push(
            Router::with_path("{order}/status")
                .hoop(require_admin)
                .put(orders::handlers::update_status::handler),
        )
        .get(orders::handlers::index::handler)
        .post(orders::handlers::create::handler)
        .push(Router::with_path("{order}").get(orders::handlers::get::handler))
}

fn contacts_router() -> Router {
    Router::with_path("contact")
        .post(contacts::handlers::create::handler)
        .push(
            Router::with_path("admin")
                .hoop(auth::middleware::handler)
                .hoop(require_admin)
                .push(Router::with_path("all").get(contacts::handlers::index::handler))
                .push(
                    Router::with_path("{contact}")
                        .get(contacts::handlers::get::handler)
                        .push(
                            Router::with_path("status")
                                .put(contacts::handlers::update_status::handler),
                        ),
                ),
        )
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(auth::middleware::handler)
        .hoop(require_admin)
        .push(Router::with_path("dashboard").get(admin::handlers::dashboard::handler))
        .push(
            Router::with_path("users")
                .get(admin::handlers::users::handler)
                .push(
                    Router::with_path("{user}")
                        .put(admin::handlers::update_user::handler)
                        .push(
                            Router::with_path("toggle-status")
                                .put(admin::handlers::toggle_status::handler),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use storefront_app::domain::{
        catalog::MockCatalogService,
        users::{
            AccountsServiceError, MockAccountsService,
            records::{UserRole, UserUuid},
        },
    };

    use crate::test_helpers::{Mocks, make_user};

    use super::*;

    fn service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    fn accounts_for(role: UserRole) -> MockAccountsService {
        let user = make_user(UserUuid::new(), role);
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_authenticate()
            .once()
            .return_once(move |_| Ok(user));

        accounts
    }

    #[tokio::test]
    async fn test_banner_is_public() -> TestResult {
        let mut res = TestClient::get("http://example.com/api")
            .send(&service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(res.take_string().await?.contains("Poppy & Teal"));

        Ok(())
    }

    #[tokio::test]
    async fn test_catalog_reads_are_public() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_categories()
            .once()
            .return_once(|| Ok(vec![]));

        let res = TestClient::get("http://example.com/api/products/categories")
            .send(&service(Mocks {
                catalog,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_orders_require_bearer_token() -> TestResult {
        let res = TestClient::get("http://example.com/api/orders")
            .send(&service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() -> TestResult {
        let mut accounts = MockAccountsService::new();

        accounts
            .expect_authenticate()
            .once()
            .return_once(|_| Err(AccountsServiceError::InvalidToken));

        let res = TestClient::get("http://example.com/api/auth/me")
            .add_header(AUTHORIZATION, "Bearer stale", true)
            .send(&service(Mocks {
                accounts,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_create_products() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create_product().never();

        let res = TestClient::post("http://example.com/api/products")
            .add_header(AUTHORIZATION, "Bearer customer", true)
            .json(&serde_json::json!({
                "name": "Sneaky",
                "description": "",
                "price": 1.0,
                "category": "Wall Art",
                "image": "/x.jpg",
            }))
            .send(&service(Mocks {
                accounts: accounts_for(UserRole::Customer),
                catalog,
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_open_dashboard() -> TestResult {
        let res = TestClient::get("http://example.com/api/admin/dashboard")
            .add_header(AUTHORIZATION, "Bearer customer", true)
            .send(&service(Mocks {
                accounts: accounts_for(UserRole::Customer),
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_cannot_list_all_orders() -> TestResult {
        let res = TestClient::get("http://example.com/api/orders/admin/all")
            .add_header(AUTHORIZATION, "Bearer customer", true)
            .send(&service(Mocks {
                accounts: accounts_for(UserRole::Customer),
                ..Mocks::default()
            }))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_reaches_contact_inbox() -> TestResult {
        let mut mocks = Mocks {
            accounts: accounts_for(UserRole::Admin),
            ..Mocks::default()
        };

        mocks
            .contacts
            .expect_list_contacts()
            .once()
            .return_once(|_, _| Ok(vec![]));

        let res = TestClient::get("http://example.com/api/contact/admin/all")
            .add_header(AUTHORIZATION, "Bearer admin", true)
            .send(&service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
