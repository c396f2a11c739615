//! Tag Handlers

pub(crate) mod get;
