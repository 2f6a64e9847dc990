//! Purchases Data

use jiff::Timestamp;

use crate::domain::{products::records::ProductUuid, purchases::records::PurchaseUuid};

/// New Purchase Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    pub uuid: PurchaseUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,

    /// Server-assigned purchase time.
    pub purchased_at: Timestamp,
}
