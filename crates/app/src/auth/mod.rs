//! Authentication
//!
//! Bearer tokens are issued once and only their SHA-256 digest is stored.

mod token;

pub use token::*;
