//! Reports Data

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

/// What each summary row is grouped by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupBy {
    /// Products per collection.
    Collection,

    /// Orders and order items per customer.
    Customer,
}

/// Column an aggregate is computed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    UnitPrice,
    Inventory,
    Quantity,
    LineTotal,
}

impl Metric {
    pub(crate) const fn expression(self) -> &'static str {
        match self {
            Self::UnitPrice => "products.unit_price",
            Self::Inventory => "products.inventory",
            Self::Quantity => "order_items.quantity",
            Self::LineTotal => "order_items.quantity * order_items.unit_price",
        }
    }

    /// Whether the metric exists for rows of the grouping.
    #[must_use]
    pub const fn applies_to(self, group_by: GroupBy) -> bool {
        matches!(
            (self, group_by),
            (Self::UnitPrice | Self::Inventory, GroupBy::Collection)
                | (Self::Quantity | Self::LineTotal, GroupBy::Customer)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregate {
    /// Products per collection, or distinct orders per customer.
    Count,
    Min(Metric),
    Max(Metric),
    Avg(Metric),
    Sum(Metric),
}

impl Aggregate {
    #[must_use]
    pub const fn metric(self) -> Option<Metric> {
        match self {
            Self::Count => None,
            Self::Min(metric) | Self::Max(metric) | Self::Avg(metric) | Self::Sum(metric) => {
                Some(metric)
            }
        }
    }
}

impl Display for Aggregate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Count => f.write_str("count"),
            Self::Min(metric) => write!(f, "min({metric:?})"),
            Self::Max(metric) => write!(f, "max({metric:?})"),
            Self::Avg(metric) => write!(f, "avg({metric:?})"),
            Self::Sum(metric) => write!(f, "sum({metric:?})"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown grouping: {0}")]
pub struct UnknownGroupBy(pub String);

impl FromStr for GroupBy {
    type Err = UnknownGroupBy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "collection" => Ok(Self::Collection),
            "customer" => Ok(Self::Customer),
            other => Err(UnknownGroupBy(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_apply_to_their_own_grouping_only() {
        assert!(Metric::UnitPrice.applies_to(GroupBy::Collection));
        assert!(Metric::LineTotal.applies_to(GroupBy::Customer));
        assert!(!Metric::Inventory.applies_to(GroupBy::Customer));
        assert!(!Metric::Quantity.applies_to(GroupBy::Collection));
    }

    #[test]
    fn count_has_no_metric() {
        assert_eq!(Aggregate::Count.metric(), None);
        assert_eq!(
            Aggregate::Avg(Metric::UnitPrice).metric(),
            Some(Metric::UnitPrice)
        );
    }
}
