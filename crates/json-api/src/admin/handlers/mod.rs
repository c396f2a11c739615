//! Admin Handlers

pub(crate) mod autocomplete;
pub(crate) mod clear_inventory;
pub(crate) mod collections;
pub(crate) mod customers;
pub(crate) mod orders;
pub(crate) mod products;
pub(crate) mod update_price;
