//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use storefront_app::auth::UserUuid;

use crate::errors::ApiError;

const USER_UUID_DEPOT_KEY: &str = "user_uuid";

/// Helpers for reading request state and the authenticated caller.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn insert_user_uuid(&mut self, user: UserUuid);

    fn user_uuid_or_401(&self) -> Result<UserUuid, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_ignored| ApiError::internal())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_DEPOT_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, ApiError> {
        self.get::<UserUuid>(USER_UUID_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| ApiError::unauthorized("Authentication credentials were not provided"))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn inserted_user_is_returned() -> TestResult {
        let user = UserUuid::new();
        let mut depot = Depot::new();

        depot.insert_user_uuid(user);

        assert_eq!(depot.user_uuid_or_401().map_err(|error| format!("{error:?}"))?, user);

        Ok(())
    }

    #[test]
    fn missing_user_is_unauthorized() {
        let result = Depot::new().user_uuid_or_401();

        assert!(
            result.is_err_and(|error| error.status() == salvo::http::StatusCode::UNAUTHORIZED),
            "expected 401"
        );
    }
}
