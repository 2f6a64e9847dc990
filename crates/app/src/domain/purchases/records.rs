//! Purchase Records

use jiff::Timestamp;

use crate::{
    domain::{accounts::records::AccountUuid, products::records::ProductUuid},
    uuids::TypedUuid,
};

/// Purchase UUID
pub type PurchaseUuid = TypedUuid<PurchaseRecord>;

/// Purchase Record
#[derive(Debug, Clone)]
pub struct PurchaseRecord {
    pub uuid: PurchaseUuid,
    pub account_uuid: AccountUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u64,

    /// Product price captured when the purchase was made.
    pub unit_price: u64,

    /// `quantity * unit_price`, debited from the wallet.
    pub total: u64,

    pub created_at: Timestamp,

    /// Set when staff rejected a refund for this purchase.
    pub refund_rejected_at: Option<Timestamp>,
}
