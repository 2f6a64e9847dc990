//! Account Records

use jiff::Timestamp;
use thiserror::Error;

use crate::uuids::TypedUuid;

/// Account UUID
pub type AccountUuid = TypedUuid<AccountRecord>;

/// Account Record
#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub uuid: AccountUuid,
    pub username: String,

    /// Wallet balance in minor currency units.
    pub wallet: u64,

    pub staff: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The authenticated account on whose behalf a core operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub account: AccountUuid,
    staff: bool,
}

impl Caller {
    #[must_use]
    pub const fn customer(account: AccountUuid) -> Self {
        Self {
            account,
            staff: false,
        }
    }

    #[must_use]
    pub const fn staff(account: AccountUuid) -> Self {
        Self {
            account,
            staff: true,
        }
    }

    /// Staff may manage the catalog and resolve refunds.
    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.staff
    }

    /// # Errors
    ///
    /// Returns [`NotStaff`] for customer callers.
    pub const fn require_staff(&self) -> Result<(), NotStaff> {
        if self.staff { Ok(()) } else { Err(NotStaff) }
    }
}

/// A staff-only operation was invoked by a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("operation requires staff")]
pub struct NotStaff;

impl From<&AccountRecord> for Caller {
    fn from(account: &AccountRecord) -> Self {
        Self {
            account: account.uuid,
            staff: account.staff,
        }
    }
}
