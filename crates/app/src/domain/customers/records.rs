//! Customer Records

use std::str::FromStr;

use thiserror::Error;

use crate::{
    domain::{
        query::QueryField,
        tags::{ContentType, Taggable},
    },
    ids::TypedId,
};

/// Customer ID
pub type CustomerId = TypedId<CustomerRecord>;

/// Customer Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRecord {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub membership: Membership,
}

impl CustomerRecord {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Taggable for CustomerRecord {
    fn content_type() -> ContentType {
        ContentType::Customer
    }
}

/// Membership tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Membership {
    #[default]
    Bronze,
    Silver,
    Gold,
}

impl Membership {
    /// Single letter code stored in the database.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Bronze => "B",
            Self::Silver => "S",
            Self::Gold => "G",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown membership: {0}")]
pub struct UnknownMembership(pub String);

impl FromStr for Membership {
    type Err = UnknownMembership;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "B" | "bronze" | "Bronze" => Ok(Self::Bronze),
            "S" | "silver" | "Silver" => Ok(Self::Silver),
            "G" | "gold" | "Gold" => Ok(Self::Gold),
            other => Err(UnknownMembership(other.to_owned())),
        }
    }
}

/// Filterable and sortable customer columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomerField {
    Id,
    FirstName,
    LastName,
    Email,
    Membership,
}

impl QueryField for CustomerField {
    const ID: Self = Self::Id;

    fn column(self) -> &'static str {
        match self {
            Self::Id => "customers.id",
            Self::FirstName => "customers.first_name",
            Self::LastName => "customers.last_name",
            Self::Email => "customers.email",
            Self::Membership => "customers.membership",
        }
    }
}
