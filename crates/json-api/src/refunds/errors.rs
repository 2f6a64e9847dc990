//! Refund Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::refunds::RefundsServiceError;

pub(crate) fn into_status_error(error: RefundsServiceError) -> StatusError {
    match error {
        RefundsServiceError::AlreadyExists | RefundsServiceError::DuplicateRefund => {
            StatusError::conflict().brief("Purchase already has a refund request")
        }
        RefundsServiceError::NotFound => {
            StatusError::not_found().brief("Refund or purchase not found")
        }
        RefundsServiceError::WindowExpired => {
            StatusError::unprocessable_entity().brief("Refund window has expired")
        }
        RefundsServiceError::Forbidden => {
            StatusError::forbidden().brief("Refund review requires staff")
        }
        RefundsServiceError::InvalidReference
        | RefundsServiceError::MissingRequiredData
        | RefundsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid refund payload")
        }
        RefundsServiceError::Sql(source) => {
            error!("refund storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn expired_window_maps_to_422() {
        let status = into_status_error(RefundsServiceError::WindowExpired);

        assert_eq!(status.code, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn duplicate_refund_maps_to_409() {
        let status = into_status_error(RefundsServiceError::DuplicateRefund);

        assert_eq!(status.code, StatusCode::CONFLICT);
    }
}
