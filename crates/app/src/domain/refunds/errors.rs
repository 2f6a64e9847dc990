//! Refunds service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{accounts::records::NotStaff, refunds::rules::RefundRejection};

#[derive(Debug, Error)]
pub enum RefundsServiceError {
    #[error("refund already exists")]
    AlreadyExists,

    #[error("refund or purchase not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("purchase already has a refund request")]
    DuplicateRefund,

    #[error("refund window has expired")]
    WindowExpired,

    #[error("refund resolution requires staff")]
    Forbidden,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for RefundsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            // One refund per purchase: a racing request lost on the unique key.
            Some(ErrorKind::UniqueViolation) => Self::DuplicateRefund,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<RefundRejection> for RefundsServiceError {
    fn from(rejection: RefundRejection) -> Self {
        match rejection {
            RefundRejection::WindowExpired => Self::WindowExpired,
            RefundRejection::DuplicateRefund => Self::DuplicateRefund,
        }
    }
}

impl From<NotStaff> for RefundsServiceError {
    fn from(_error: NotStaff) -> Self {
        Self::Forbidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_keep_their_kind() {
        assert!(matches!(
            RefundsServiceError::from(RefundRejection::WindowExpired),
            RefundsServiceError::WindowExpired
        ));
        assert!(matches!(
            RefundsServiceError::from(RefundRejection::DuplicateRefund),
            RefundsServiceError::DuplicateRefund
        ));
    }

    #[test]
    fn customers_are_forbidden() {
        assert!(matches!(
            RefundsServiceError::from(NotStaff),
            RefundsServiceError::Forbidden
        ));
    }
}
