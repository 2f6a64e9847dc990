//! Purchases service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::purchases::rules::PurchaseRejection;

#[derive(Debug, Error)]
pub enum PurchasesServiceError {
    #[error("purchase already exists")]
    AlreadyExists,

    #[error("purchase or product not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("quantity must be at least one")]
    InvalidQuantity,

    #[error("not enough stock")]
    InsufficientStock,

    #[error("not enough funds")]
    InsufficientFunds,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for PurchasesServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PurchaseRejection> for PurchasesServiceError {
    fn from(rejection: PurchaseRejection) -> Self {
        match rejection {
            PurchaseRejection::InvalidQuantity => Self::InvalidQuantity,
            PurchaseRejection::InsufficientStock => Self::InsufficientStock,
            PurchaseRejection::InsufficientFunds => Self::InsufficientFunds,
        }
    }
}
