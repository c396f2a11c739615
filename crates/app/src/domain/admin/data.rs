//! Admin Data

use std::str::FromStr;

use jiff::{Timestamp, ToSpan, civil::Date, tz::TimeZone};
use thiserror::Error;

use crate::domain::{
    collections::records::CollectionId,
    products::records::ProductField,
    query::{OrderBy, Predicate, QueryField},
};

/// Rows per page of the product change list.
pub const PRODUCT_PAGE_SIZE: u32 = 10;

/// Rows per page of the other change lists.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

pub const AUTOCOMPLETE_LIMIT: u32 = 20;

/// Products with less stock than this are reported as low.
pub const LOW_INVENTORY_THRESHOLD: u32 = 10;

/// Relative `last_update` windows, resolved against a supplied clock in UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LastUpdateFilter {
    Today,
    Past7Days,
    ThisMonth,
    ThisYear,
}

impl LastUpdateFilter {
    /// Half-open range from the start of the window to the start of the day after it ends.
    ///
    /// # Errors
    ///
    /// Returns an error when the window falls outside jiff's supported range.
    pub fn predicate(self, now: Timestamp) -> Result<Predicate<ProductField>, jiff::Error> {
        let today = now.to_zoned(TimeZone::UTC).date();

        let (first_day, last_day) = match self {
            Self::Today => (today, today),
            Self::Past7Days => (today.checked_sub(7.days())?, today),
            Self::ThisMonth => (today.first_of_month(), today.last_of_month()),
            Self::ThisYear => (today.first_of_year(), today.last_of_year()),
        };

        Ok(
            Predicate::gte(ProductField::LastUpdate, start_of(first_day)?)
                & Predicate::lt(ProductField::LastUpdate, start_of(last_day.tomorrow()?)?),
        )
    }
}

fn start_of(date: Date) -> Result<Timestamp, jiff::Error> {
    Ok(date.to_zoned(TimeZone::UTC)?.timestamp())
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown filter value: {0}")]
pub struct UnknownFilterValue(pub String);

impl FromStr for LastUpdateFilter {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "past_7_days" => Ok(Self::Past7Days),
            "this_month" => Ok(Self::ThisMonth),
            "this_year" => Ok(Self::ThisYear),
            other => Err(UnknownFilterValue(other.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InventoryFilter {
    /// Below [`LOW_INVENTORY_THRESHOLD`].
    Low,
}

impl InventoryFilter {
    #[must_use]
    pub fn predicate(self) -> Predicate<ProductField> {
        match self {
            Self::Low => Predicate::lt(ProductField::Inventory, LOW_INVENTORY_THRESHOLD),
        }
    }
}

impl FromStr for InventoryFilter {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" | "<10" => Ok(Self::Low),
            other => Err(UnknownFilterValue(other.to_owned())),
        }
    }
}

/// Product change list request. Pages are numbered from 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChangeListParams {
    pub page: u32,
    pub collection: Option<CollectionId>,
    pub last_update: Option<LastUpdateFilter>,
    pub inventory: Option<InventoryFilter>,

    /// Defaults to title ascending when empty.
    pub ordering: Vec<OrderBy<ProductField>>,

    /// Clock the relative date filters are resolved against.
    pub now: Timestamp,
}

impl ProductChangeListParams {
    #[must_use]
    pub fn new(now: Timestamp) -> Self {
        Self {
            page: 1,
            collection: None,
            last_update: None,
            inventory: None,
            ordering: Vec::new(),
            now,
        }
    }
}

/// Sortable collection change list columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectionChangeField {
    Id,
    Title,
    ProductCount,
}

impl QueryField for CollectionChangeField {
    const ID: Self = Self::Id;

    fn column(self) -> &'static str {
        match self {
            Self::Id => "collections.id",
            Self::Title => "collections.title",
            Self::ProductCount => "product_count",
        }
    }
}

impl FromStr for CollectionChangeField {
    type Err = UnknownFilterValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "product_count" => Ok(Self::ProductCount),
            other => Err(UnknownFilterValue(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn bounds(filter: LastUpdateFilter, now: &str) -> Result<Predicate<ProductField>, jiff::Error> {
        filter.predicate(now.parse()?)
    }

    fn range(start: &str, end: &str) -> Result<Predicate<ProductField>, jiff::Error> {
        let start: Timestamp = start.parse()?;
        let end: Timestamp = end.parse()?;

        Ok(Predicate::gte(ProductField::LastUpdate, start)
            & Predicate::lt(ProductField::LastUpdate, end))
    }

    #[test]
    fn today_covers_the_current_utc_day() -> TestResult {
        assert_eq!(
            bounds(LastUpdateFilter::Today, "2026-03-15T18:45:00Z")?,
            range("2026-03-15T00:00:00Z", "2026-03-16T00:00:00Z")?
        );

        Ok(())
    }

    #[test]
    fn past_seven_days_includes_today() -> TestResult {
        assert_eq!(
            bounds(LastUpdateFilter::Past7Days, "2026-03-15T18:45:00Z")?,
            range("2026-03-08T00:00:00Z", "2026-03-16T00:00:00Z")?
        );

        Ok(())
    }

    #[test]
    fn this_month_and_year_span_whole_periods() -> TestResult {
        assert_eq!(
            bounds(LastUpdateFilter::ThisMonth, "2026-02-10T08:00:00Z")?,
            range("2026-02-01T00:00:00Z", "2026-03-01T00:00:00Z")?
        );
        assert_eq!(
            bounds(LastUpdateFilter::ThisYear, "2026-12-31T23:59:59Z")?,
            range("2026-01-01T00:00:00Z", "2027-01-01T00:00:00Z")?
        );

        Ok(())
    }

    #[test]
    fn filter_values_parse() {
        assert_eq!("past_7_days".parse(), Ok(LastUpdateFilter::Past7Days));
        assert_eq!("<10".parse(), Ok(InventoryFilter::Low));
        assert_eq!(
            "yesterday".parse::<LastUpdateFilter>(),
            Err(UnknownFilterValue("yesterday".to_string()))
        );
    }

    #[test]
    fn low_inventory_is_below_ten() {
        assert_eq!(
            InventoryFilter::Low.predicate(),
            Predicate::lt(ProductField::Inventory, 10_u32)
        );
    }
}
