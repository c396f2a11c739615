//! Predicate expression tree.

use std::ops::{BitAnd, BitOr, Not};

use jiff::{Timestamp, civil::Date, tz::TimeZone};

/// Literal operand of a comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Text(String),
    Timestamp(Timestamp),
}

impl Value {
    /// Monetary amount in minor units. Amounts beyond `i64::MAX` saturate.
    #[must_use]
    pub fn amount(amount: u64) -> Self {
        Self::Int(i64::try_from(amount).unwrap_or(i64::MAX))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    pub(crate) const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

/// Right-hand side of a comparison: a literal or another column of the same entity.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand<F> {
    Value(Value),
    Field(F),
}

/// Text matching case sensitivity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Case {
    Sensitive,
    Insensitive,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate<F> {
    /// Every child holds. An empty list is true.
    And(Vec<Self>),

    /// At least one child holds. An empty list is false.
    Or(Vec<Self>),

    Not(Box<Self>),

    Compare {
        field: F,
        op: CompareOp,
        operand: Operand<F>,
    },

    /// Inclusive on both ends.
    Between { field: F, low: Value, high: Value },

    /// An empty set matches nothing.
    In { field: F, values: Vec<Value> },

    IsNull(F),

    Contains { field: F, value: String, case: Case },

    StartsWith { field: F, value: String, case: Case },
}

impl<F> Predicate<F> {
    fn compare(field: F, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare {
            field,
            op,
            operand: Operand::Value(value.into()),
        }
    }

    #[must_use]
    pub fn eq(field: F, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(field: F, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ne, value)
    }

    #[must_use]
    pub fn lt(field: F, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    #[must_use]
    pub fn lte(field: F, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lte, value)
    }

    #[must_use]
    pub fn gt(field: F, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    #[must_use]
    pub fn gte(field: F, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gte, value)
    }

    /// Compare two columns of the same row.
    #[must_use]
    pub const fn compare_fields(field: F, op: CompareOp, other: F) -> Self {
        Self::Compare {
            field,
            op,
            operand: Operand::Field(other),
        }
    }

    #[must_use]
    pub fn between(field: F, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::Between {
            field,
            low: low.into(),
            high: high.into(),
        }
    }

    #[must_use]
    pub fn in_<V: Into<Value>>(field: F, values: impl IntoIterator<Item = V>) -> Self {
        Self::In {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub const fn is_null(field: F) -> Self {
        Self::IsNull(field)
    }

    #[must_use]
    pub fn contains(field: F, value: impl Into<String>) -> Self {
        Self::Contains {
            field,
            value: value.into(),
            case: Case::Sensitive,
        }
    }

    #[must_use]
    pub fn icontains(field: F, value: impl Into<String>) -> Self {
        Self::Contains {
            field,
            value: value.into(),
            case: Case::Insensitive,
        }
    }

    #[must_use]
    pub fn starts_with(field: F, value: impl Into<String>) -> Self {
        Self::StartsWith {
            field,
            value: value.into(),
            case: Case::Sensitive,
        }
    }

    #[must_use]
    pub fn istarts_with(field: F, value: impl Into<String>) -> Self {
        Self::StartsWith {
            field,
            value: value.into(),
            case: Case::Insensitive,
        }
    }

    /// Timestamp column falls within the given calendar year (UTC).
    ///
    /// # Errors
    ///
    /// Returns an error when the year is outside jiff's supported range.
    pub fn in_year(field: F, year: i16) -> Result<Self, jiff::Error>
    where
        F: Copy,
    {
        let start = start_of_year(year)?;

        match year.checked_add(1).map(start_of_year) {
            Some(Ok(end)) => Ok(Self::gte(field, start) & Self::lt(field, end)),
            _ => Ok(Self::gte(field, start)),
        }
    }
}

fn start_of_year(year: i16) -> Result<Timestamp, jiff::Error> {
    Ok(Date::new(year, 1, 1)?.to_zoned(TimeZone::UTC)?.timestamp())
}

impl<F> BitAnd for Predicate<F> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        match self {
            Self::And(mut children) => {
                children.push(rhs);
                Self::And(children)
            }
            lhs => Self::And(vec![lhs, rhs]),
        }
    }
}

impl<F> BitOr for Predicate<F> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        match self {
            Self::Or(mut children) => {
                children.push(rhs);
                Self::Or(children)
            }
            lhs => Self::Or(vec![lhs, rhs]),
        }
    }
}

impl<F> Not for Predicate<F> {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other)),
        }
    }
}
