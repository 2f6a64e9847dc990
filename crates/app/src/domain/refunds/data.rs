//! Refunds Data

use jiff::Timestamp;

use crate::domain::{purchases::records::PurchaseUuid, refunds::records::RefundUuid};

/// New Refund Request Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewRefund {
    pub uuid: RefundUuid,
    pub purchase_uuid: PurchaseUuid,

    /// Server-assigned request time, measured against the refund window.
    pub requested_at: Timestamp,
}

/// Staff decision on a pending refund.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundDecision {
    /// Restore stock and wallet, then remove the purchase.
    Approve,

    /// Drop the request and keep the purchase.
    Reject,
}
