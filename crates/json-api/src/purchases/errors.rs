//! Purchase Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::purchases::PurchasesServiceError;

pub(crate) fn into_status_error(error: PurchasesServiceError) -> StatusError {
    match error {
        PurchasesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Purchase already exists")
        }
        PurchasesServiceError::InsufficientStock => {
            StatusError::conflict().brief("Not enough stock")
        }
        PurchasesServiceError::InsufficientFunds => {
            StatusError::conflict().brief("Not enough funds in wallet")
        }
        PurchasesServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        PurchasesServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        PurchasesServiceError::InvalidReference
        | PurchasesServiceError::MissingRequiredData
        | PurchasesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid purchase payload")
        }
        PurchasesServiceError::Sql(source) => {
            error!("purchase storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
