//! Catalog field validation.

use thiserror::Error;

use crate::domain::products::data::{NewProduct, ProductUpdate};

/// Longest accepted product name.
pub const MAX_NAME_CHARS: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidProduct {
    #[error("product name is blank")]
    BlankName,

    #[error("product name exceeds {MAX_NAME_CHARS} characters")]
    NameTooLong,

    #[error("product price must be positive")]
    ZeroPrice,
}

/// Validate the editable fields shared by creation and update.
///
/// # Errors
///
/// Returns the first field that fails validation.
pub fn validate_details(name: &str, price: u64) -> Result<(), InvalidProduct> {
    if name.trim().is_empty() {
        return Err(InvalidProduct::BlankName);
    }

    if name.chars().count() > MAX_NAME_CHARS {
        return Err(InvalidProduct::NameTooLong);
    }

    if price == 0 {
        return Err(InvalidProduct::ZeroPrice);
    }

    Ok(())
}

impl NewProduct {
    /// # Errors
    ///
    /// See [`validate_details`].
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        validate_details(&self.name, self.price)
    }
}

impl ProductUpdate {
    /// # Errors
    ///
    /// See [`validate_details`].
    pub fn validate(&self) -> Result<(), InvalidProduct> {
        validate_details(&self.name, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_named_positive_priced_product() {
        assert_eq!(validate_details("Teapot", 1), Ok(()));
    }

    #[test]
    fn rejects_blank_name() {
        assert_eq!(validate_details(" \t", 100), Err(InvalidProduct::BlankName));
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "x".repeat(MAX_NAME_CHARS + 1);

        assert_eq!(validate_details(&name, 100), Err(InvalidProduct::NameTooLong));
        assert_eq!(validate_details(&name[1..], 100), Ok(()));
    }

    #[test]
    fn rejects_zero_price() {
        assert_eq!(validate_details("Teapot", 0), Err(InvalidProduct::ZeroPrice));
    }
}
