//! Account Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::accounts::AccountsServiceError;

pub(crate) fn into_status_error(error: AccountsServiceError) -> StatusError {
    match error {
        AccountsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Username is already taken")
        }
        AccountsServiceError::NotFound => StatusError::not_found().brief("Account not found"),
        AccountsServiceError::InvalidReference
        | AccountsServiceError::MissingRequiredData
        | AccountsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid account payload")
        }
        AccountsServiceError::Sql(source) => {
            error!("account storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn taken_username_maps_to_409() {
        let status = into_status_error(AccountsServiceError::AlreadyExists);

        assert_eq!(status.code, StatusCode::CONFLICT);
    }

    #[test]
    fn invalid_username_maps_to_400() {
        let status = into_status_error(AccountsServiceError::InvalidData);

        assert_eq!(status.code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let status = into_status_error(AccountsServiceError::Sql(sqlx::Error::PoolClosed));

        assert_eq!(status.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
