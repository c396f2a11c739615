//! Admin
//!
//! Paginated change lists with filters, derived columns and bulk actions, plus autocomplete
//! lookups for foreign key fields.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::AdminServiceError;
pub use service::*;
