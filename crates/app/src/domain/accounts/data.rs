//! Account Data

use crate::domain::accounts::records::AccountUuid;

/// Longest accepted username.
pub const MAX_USERNAME_CHARS: usize = 150;

/// New Account Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub uuid: AccountUuid,
    pub username: String,

    /// SHA-256 hex digest of the account's bearer token.
    pub token_hash: String,

    /// Only the administrative CLI creates staff accounts.
    pub staff: bool,
}

impl NewAccount {
    /// Whether the username is non-blank and within the length limit.
    #[must_use]
    pub fn has_valid_username(&self) -> bool {
        let chars = self.username.chars().count();

        !self.username.trim().is_empty() && chars <= MAX_USERNAME_CHARS
    }
}
