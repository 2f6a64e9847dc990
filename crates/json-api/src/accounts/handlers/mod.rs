//! Account Handlers

pub(crate) mod create;
pub(crate) mod me;
