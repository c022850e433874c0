//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::domain::users::records::{Requester, UserRecord};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_current_user(&mut self, user: UserRecord);

    fn current_user_or_401(&self) -> Result<&UserRecord, StatusError>;

    fn requester_or_401(&self) -> Result<Requester, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: UserRecord) {
        self.inject(user);
    }

    fn current_user_or_401(&self) -> Result<&UserRecord, StatusError> {
        self.obtain::<UserRecord>().map_err(|_ignored| {
            StatusError::unauthorized().brief("Could not validate credentials")
        })
    }

    fn requester_or_401(&self) -> Result<Requester, StatusError> {
        self.current_user_or_401().map(Requester::from)
    }
}
