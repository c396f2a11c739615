//! Lowering of queries into bound SQL.

use sqlx::{QueryBuilder, Sqlite};

use crate::database::encode_timestamp;

use super::{Case, Direction, Operand, OrderBy, Predicate, Query, QueryField, Value};

/// Append `WHERE`, `ORDER BY` and `LIMIT`/`OFFSET` clauses for `query`.
pub(crate) fn push_query<F: QueryField>(builder: &mut QueryBuilder<'_, Sqlite>, query: &Query<F>) {
    push_where(builder, query.filter.as_ref());
    push_order_by(builder, &query.order_by);
    push_window(builder, query.limit, query.offset);
}

pub(crate) fn push_where<F: QueryField>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    filter: Option<&Predicate<F>>,
) {
    if let Some(filter) = filter {
        builder.push(" WHERE ");
        push_predicate(builder, filter);
    }
}

/// The primary key is always the final sort key.
pub(crate) fn push_order_by<F: QueryField>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    order_by: &[OrderBy<F>],
) {
    builder.push(" ORDER BY ");

    for order in order_by.iter().filter(|order| order.field != F::ID) {
        builder.push(order.field.column());
        builder.push(" ");
        builder.push(order.direction.as_sql());
        builder.push(", ");
    }

    let id_direction = order_by
        .iter()
        .find(|order| order.field == F::ID)
        .or_else(|| order_by.last())
        .map_or(Direction::Asc, |order| order.direction);

    builder.push(F::ID.column());
    builder.push(" ");
    builder.push(id_direction.as_sql());
}

pub(crate) fn push_window(
    builder: &mut QueryBuilder<'_, Sqlite>,
    limit: Option<u32>,
    offset: Option<u32>,
) {
    match (limit, offset) {
        (None, None) => {}
        (Some(limit), None) => {
            builder.push(" LIMIT ");
            builder.push_bind(i64::from(limit));
        }
        (limit, Some(offset)) => {
            builder.push(" LIMIT ");
            builder.push_bind(limit.map_or(-1, i64::from));
            builder.push(" OFFSET ");
            builder.push_bind(i64::from(offset));
        }
    }
}

pub(crate) fn push_predicate<F: QueryField>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    predicate: &Predicate<F>,
) {
    match predicate {
        Predicate::And(children) => push_junction(builder, children, " AND ", "1 = 1"),
        Predicate::Or(children) => push_junction(builder, children, " OR ", "1 = 0"),
        Predicate::Not(inner) => {
            builder.push("NOT (");
            push_predicate(builder, inner);
            builder.push(")");
        }
        Predicate::Compare { field, op, operand } => {
            builder.push(field.column());
            builder.push(" ");
            builder.push(op.as_sql());
            builder.push(" ");

            match operand {
                Operand::Value(value) => push_value(builder, value),
                Operand::Field(other) => {
                    builder.push(other.column());
                }
            }
        }
        Predicate::Between { field, low, high } => {
            builder.push(field.column());
            builder.push(" BETWEEN ");
            push_value(builder, low);
            builder.push(" AND ");
            push_value(builder, high);
        }
        Predicate::In { field, values } => {
            if values.is_empty() {
                builder.push("1 = 0");
                return;
            }

            builder.push(field.column());
            builder.push(" IN (");

            for (index, value) in values.iter().enumerate() {
                if index > 0 {
                    builder.push(", ");
                }

                push_value(builder, value);
            }

            builder.push(")");
        }
        Predicate::IsNull(field) => {
            builder.push(field.column());
            builder.push(" IS NULL");
        }
        Predicate::Contains { field, value, case } => match case {
            Case::Sensitive => {
                builder.push("instr(");
                builder.push(field.column());
                builder.push(", ");
                builder.push_bind(value.clone());
                builder.push(") > 0");
            }
            Case::Insensitive => {
                builder.push("instr(lower(");
                builder.push(field.column());
                builder.push("), lower(");
                builder.push_bind(value.clone());
                builder.push(")) > 0");
            }
        },
        Predicate::StartsWith { field, value, case } => {
            let (open, close) = match case {
                Case::Sensitive => ("", ""),
                Case::Insensitive => ("lower(", ")"),
            };

            builder.push(open);
            builder.push("substr(");
            builder.push(field.column());
            builder.push(", 1, length(");
            builder.push_bind(value.clone());
            builder.push("))");
            builder.push(close);
            builder.push(" = ");
            builder.push(open);
            builder.push_bind(value.clone());
            builder.push(close);
        }
    }
}

fn push_junction<F: QueryField>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    children: &[Predicate<F>],
    separator: &str,
    empty: &str,
) {
    if children.is_empty() {
        builder.push(empty);
        return;
    }

    builder.push("(");

    for (index, child) in children.iter().enumerate() {
        if index > 0 {
            builder.push(separator);
        }

        push_predicate(builder, child);
    }

    builder.push(")");
}

fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: &Value) {
    match value {
        Value::Int(value) => {
            builder.push_bind(*value);
        }
        Value::Text(value) => {
            builder.push_bind(value.clone());
        }
        Value::Timestamp(value) => {
            builder.push_bind(encode_timestamp(*value));
        }
    }
}
