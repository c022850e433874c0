//! Auth middleware.

use std::sync::Arc;

use salvo::{http::header::AUTHORIZATION, prelude::*};

use storefront_app::domain::users::AccountsServiceError;

use crate::{auth::errors::into_status_error, extensions::*, state::State};

/// Resolve the bearer token to an active user and store it in the depot.
#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_bearer_token(req) else {
        res.render(StatusError::unauthorized().brief("Could not validate credentials"));

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(error) => {
            res.render(error);

            return;
        }
    };

    let user = match state.app.accounts.authenticate(token).await {
        Ok(user) => user,
        Err(AccountsServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Could not validate credentials"));

            return;
        }
        Err(error) => {
            res.render(into_status_error(error));

            return;
        }
    };

    if !user.is_active {
        res.render(StatusError::bad_request().brief("Inactive user"));

        return;
    }

    depot.insert_current_user(user);

    ctrl.call_next(req, depot, res).await;
}

/// Reject callers whose resolved role is not admin.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.current_user_or_401() {
        Ok(user) if user.is_admin() => {}
        Ok(_) => {
            res.render(StatusError::forbidden().brief("Not enough permissions"));

            return;
        }
        Err(error) => {
            res.render(error);

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
