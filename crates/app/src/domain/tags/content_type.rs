//! Content Types

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entity types that tags and likes can attach to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Product,
    Collection,
    Customer,
    Order,
}

impl ContentType {
    pub const ALL: [Self; 4] = [Self::Product, Self::Collection, Self::Customer, Self::Order];

    /// Model name stored in the registry.
    #[must_use]
    pub const fn model(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Collection => "collection",
            Self::Customer => "customer",
            Self::Order => "order",
        }
    }

    /// Backing table of the entity.
    pub(crate) const fn table(self) -> &'static str {
        match self {
            Self::Product => "products",
            Self::Collection => "collections",
            Self::Customer => "customers",
            Self::Order => "orders",
        }
    }
}

impl Display for ContentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.model())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown content type: {0}")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|content_type| content_type.model() == s)
            .ok_or_else(|| UnknownContentType(s.to_owned()))
    }
}
