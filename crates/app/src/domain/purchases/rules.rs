//! Purchase admission rules.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PurchaseRejection {
    #[error("quantity must be at least one")]
    InvalidQuantity,

    #[error("not enough stock")]
    InsufficientStock,

    #[error("not enough funds")]
    InsufficientFunds,
}

/// Reject quantities that can never be bought.
///
/// # Errors
///
/// Returns [`PurchaseRejection::InvalidQuantity`] for zero.
pub const fn check_quantity(quantity: u64) -> Result<(), PurchaseRejection> {
    if quantity == 0 {
        return Err(PurchaseRejection::InvalidQuantity);
    }

    Ok(())
}

/// Decide whether `quantity` units at `unit_price` can be bought given the
/// current `stock` and `wallet`, returning the total to debit.
///
/// Stock is checked before funds.
///
/// # Errors
///
/// Returns the first rule the purchase breaks. A total that overflows is
/// never affordable.
pub fn check_purchase(
    quantity: u64,
    stock: u64,
    unit_price: u64,
    wallet: u64,
) -> Result<u64, PurchaseRejection> {
    check_quantity(quantity)?;

    if quantity > stock {
        return Err(PurchaseRejection::InsufficientStock);
    }

    let total = quantity
        .checked_mul(unit_price)
        .ok_or(PurchaseRejection::InsufficientFunds)?;

    if total > wallet {
        return Err(PurchaseRejection::InsufficientFunds);
    }

    Ok(total)
}
