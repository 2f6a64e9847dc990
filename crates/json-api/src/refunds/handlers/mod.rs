//! Refund Handlers

pub(crate) mod approve;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod reject;
mod resolve;
