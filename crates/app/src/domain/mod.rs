//! Storefront Domain Concerns

pub mod accounts;
pub mod products;
pub mod purchases;
pub mod refunds;
