//! Report Records

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

/// Result of an aggregate. Averages are fractional; everything else is integral.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AggregateValue {
    Int(i64),
    Float(f64),
}

impl Display for AggregateValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:.2}"),
        }
    }
}

/// One row of a grouped summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupSummary {
    pub group_id: i64,
    pub label: String,

    /// `None` when the group has no rows to aggregate (except for counts, which are zero).
    pub value: Option<AggregateValue>,
}

/// Price and inventory statistics over a set of products.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ProductStats {
    pub count: u64,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub avg_price: Option<f64>,
    pub total_inventory: u64,
}

/// A raw result row: column names with their values, in select order.
pub type RawRow = Vec<(String, serde_json::Value)>;
