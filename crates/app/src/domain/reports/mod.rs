//! Reports
//!
//! Grouped aggregates over the catalog and order history, catalog statistics, and a read-only
//! escape hatch for ad hoc SQL.

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::ReportsServiceError;
pub use service::*;
