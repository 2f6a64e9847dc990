pub mod data;
pub mod errors;
pub mod policy;
pub mod records;
pub(crate) mod repository;
pub mod rules;
pub mod service;

pub use errors::RefundsServiceError;
pub use service::*;
