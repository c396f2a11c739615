//! Declarative Queries
//!
//! Filters are expressed as a [`Predicate`] tree over a closed set of fields, ordered with
//! [`OrderBy`] clauses and bounded with a limit/offset. The compiler lowers a [`Query`] into
//! bound SQL, so values never reach the statement text.

pub(crate) mod compile;
mod ordering;
mod predicate;

pub use ordering::{Direction, OrderBy, ParseOrderingError};
pub use predicate::{Case, CompareOp, Operand, Predicate, Value};

use smallvec::SmallVec;

/// A column that can be filtered and sorted on.
pub trait QueryField: Copy + std::fmt::Debug + PartialEq + Send + Sync + 'static {
    /// Primary key column, appended to every ordering so results are deterministic.
    const ID: Self;

    /// Qualified SQL column expression.
    fn column(self) -> &'static str;
}

/// Filter, ordering and window over a single entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Query<F> {
    pub filter: Option<Predicate<F>>,
    pub order_by: SmallVec<[OrderBy<F>; 2]>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl<F> Default for Query<F> {
    fn default() -> Self {
        Self {
            filter: None,
            order_by: SmallVec::new(),
            limit: None,
            offset: None,
        }
    }
}

impl<F: QueryField> Query<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter; repeated calls are combined with AND.
    #[must_use]
    pub fn filter(mut self, predicate: Predicate<F>) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing & predicate,
            None => predicate,
        });

        self
    }

    #[must_use]
    pub fn order_by(mut self, order: OrderBy<F>) -> Self {
        self.order_by.push(order);
        self
    }

    #[must_use]
    pub fn asc(self, field: F) -> Self {
        self.order_by(OrderBy::asc(field))
    }

    #[must_use]
    pub fn desc(self, field: F) -> Self {
        self.order_by(OrderBy::desc(field))
    }

    /// Flip the direction of every ordering clause.
    #[must_use]
    pub fn reversed(mut self) -> Self {
        for order in &mut self.order_by {
            *order = order.reversed();
        }

        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }
}
