//! Storefront Domain Concerns

pub mod admin;
pub mod carts;
pub mod collections;
pub mod customers;
pub mod orders;
pub mod products;
pub mod query;
pub mod reports;
pub mod tags;
pub mod users;
