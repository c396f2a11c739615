//! Ordering clauses.

use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub(crate) const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrderBy<F> {
    pub field: F,
    pub direction: Direction,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown ordering field: {0}")]
pub struct ParseOrderingError(pub String);

impl<F> OrderBy<F> {
    #[must_use]
    pub const fn asc(field: F) -> Self {
        Self {
            field,
            direction: Direction::Asc,
        }
    }

    #[must_use]
    pub const fn desc(field: F) -> Self {
        Self {
            field,
            direction: Direction::Desc,
        }
    }

    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            field: self.field,
            direction: self.direction.reversed(),
        }
    }
}

impl<F> OrderBy<F>
where
    F: FromStr,
{
    /// Parse a comma separated list such as `unit_price,-title`; a leading `-` sorts descending.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown field.
    pub fn parse_list(input: &str) -> Result<Vec<Self>, ParseOrderingError> {
        input
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (direction, name) = match part.strip_prefix('-') {
                    Some(name) => (Direction::Desc, name),
                    None => (Direction::Asc, part),
                };

                name.parse::<F>()
                    .map(|field| Self { field, direction })
                    .map_err(|_unknown| ParseOrderingError(name.to_owned()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Field {
        Price,
        Title,
    }

    impl FromStr for Field {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "price" => Ok(Self::Price),
                "title" => Ok(Self::Title),
                _ => Err(()),
            }
        }
    }

    #[test]
    fn parse_list_reads_directions() {
        let parsed = OrderBy::<Field>::parse_list("price, -title");

        assert_eq!(
            parsed,
            Ok(vec![OrderBy::asc(Field::Price), OrderBy::desc(Field::Title)])
        );
    }

    #[test]
    fn parse_list_rejects_unknown_fields() {
        let parsed = OrderBy::<Field>::parse_list("price,-colour");

        assert_eq!(parsed, Err(ParseOrderingError("colour".to_string())));
    }

    #[test]
    fn reversing_flips_direction() {
        assert_eq!(
            OrderBy::asc(Field::Title).reversed(),
            OrderBy::desc(Field::Title)
        );
    }
}
