//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::domain::accounts::records::Caller;

const CALLER_DEPOT_KEY: &str = "caller";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the authenticated caller for downstream handlers.
    fn insert_caller(&mut self, caller: Caller);

    /// The authenticated caller, or 401 when the auth middleware did not run.
    fn caller_or_401(&self) -> Result<Caller, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_caller(&mut self, caller: Caller) {
        self.insert(CALLER_DEPOT_KEY, caller);
    }

    fn caller_or_401(&self) -> Result<Caller, StatusError> {
        self.get::<Caller>(CALLER_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
