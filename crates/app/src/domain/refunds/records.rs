//! Refund Records

use jiff::Timestamp;

use crate::{domain::purchases::records::PurchaseUuid, uuids::TypedUuid};

/// Refund UUID
pub type RefundUuid = TypedUuid<RefundRecord>;

/// A pending refund request. Resolved refunds are deleted.
#[derive(Debug, Clone)]
pub struct RefundRecord {
    pub uuid: RefundUuid,
    pub purchase_uuid: PurchaseUuid,
    pub created_at: Timestamp,
}
