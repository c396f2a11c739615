//! Customers Data

use crate::domain::{
    customers::records::{CustomerField, Membership},
    query::Query,
};

/// Filter, ordering and window over customers.
pub type CustomerQuery = Query<CustomerField>;

/// New Customer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub membership: Membership,
}

/// Customer Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub membership: Membership,
}
