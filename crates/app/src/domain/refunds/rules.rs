//! Refund admission rules.

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

use crate::{database::to_stored_precision, domain::refunds::policy::RefundResubmission};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RefundRejection {
    #[error("refund window has expired")]
    WindowExpired,

    #[error("purchase already has a refund request")]
    DuplicateRefund,
}

/// Accept requests made no later than `window` after the purchase.
///
/// Both instants are compared at stored precision, so a purchase time read
/// back from the database lines up with the request time it was stamped from.
///
/// # Errors
///
/// Returns [`RefundRejection::WindowExpired`] once `window` has fully elapsed.
pub fn check_refund_window(
    purchased_at: Timestamp,
    requested_at: Timestamp,
    window: SignedDuration,
) -> Result<(), RefundRejection> {
    let elapsed =
        to_stored_precision(requested_at).duration_since(to_stored_precision(purchased_at));

    if elapsed > window {
        return Err(RefundRejection::WindowExpired);
    }

    Ok(())
}

/// # Errors
///
/// Returns [`RefundRejection::DuplicateRefund`] when a refund for this
/// purchase was already rejected and the policy denies a second request.
pub const fn check_resubmission(
    policy: RefundResubmission,
    refund_rejected_at: Option<Timestamp>,
) -> Result<(), RefundRejection> {
    match (policy, refund_rejected_at) {
        (RefundResubmission::Deny, Some(_)) => Err(RefundRejection::DuplicateRefund),
        (RefundResubmission::Allow, _) | (RefundResubmission::Deny, None) => Ok(()),
    }
}
