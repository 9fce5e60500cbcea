use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    btree,
    disk::DiskError,
    pager::{Pager, Source},
    record::{self, RecordError, Value},
    schema::{Column, TableSchema},
};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("no such table: {0}")]
    TableNotFound(String),

    #[error("no such column: {column} (in table {table})")]
    ColumnNotFound { table: String, column: String },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Disk(#[from] DiskError),
}

/// Columns to produce for each row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    /// Every column, in the order of the schema.
    All,
    /// The named columns, in the requested order.
    Columns(Vec<String>),
}

/// Only include rows where the column's raw value is exactly `expected`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    pub column: String,
    pub expected: Vec<u8>,
}

/// A query against a single table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    pub table: String,
    pub projection: Projection,
    pub predicate: Option<Predicate>,
    /// Produce the number of matching rows, rather than the rows themselves.
    pub count_only: bool,
}

impl Query {
    /// Build a query from the text of each result column. If the first result column is a call to
    /// `count`, the query will count rows instead.
    pub fn new(
        table: impl ToString,
        result_columns: Vec<String>,
        predicate: Option<Predicate>,
    ) -> Self {
        let count_only = result_columns
            .first()
            .is_some_and(|column| column.to_lowercase().starts_with("count"));

        let projection = if result_columns.iter().all(|column| column == "*") {
            Projection::All
        } else {
            Projection::Columns(result_columns)
        };

        Self {
            table: table.to_string(),
            projection,
            predicate,
            count_only,
        }
    }
}

/// Values of a single row, in the order of the projected columns.
pub type Values = Vec<Value>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryOutput {
    Count(u64),
    Rows {
        /// The projected columns.
        columns: Vec<Column>,
        rows: Vec<Values>,
    },
}

/// Resolve each projected column to its position within the schema. A `*` within a list of
/// columns expands to every column.
fn resolve_projection(
    schema: &TableSchema,
    projection: &Projection,
) -> Result<Vec<usize>, QueryError> {
    let names = match projection {
        Projection::All => return Ok((0..schema.columns.len()).collect()),
        Projection::Columns(names) => names,
    };

    let mut positions = Vec::with_capacity(names.len());
    for name in names {
        if name == "*" {
            positions.extend(0..schema.columns.len());
            continue;
        }

        positions.push(
            schema
                .position(name)
                .ok_or_else(|| QueryError::ColumnNotFound {
                    table: schema.table_name.clone(),
                    column: name.clone(),
                })?,
        );
    }

    Ok(positions)
}

/// Run a query against the table with the provided schema and root page.
///
/// Every column is checked against the schema before anything is read. Rows are produced in the
/// order of the table's b-tree.
pub fn run<S: Source>(
    pager: &mut Pager<S>,
    schema: &TableSchema,
    root_page: u32,
    projection: &Projection,
    predicate: Option<&Predicate>,
    count_only: bool,
) -> Result<QueryOutput, QueryError> {
    let filter = predicate
        .map(|predicate| {
            schema
                .position(&predicate.column)
                .map(|position| (position, predicate.expected.as_slice()))
                .ok_or_else(|| QueryError::ColumnNotFound {
                    table: schema.table_name.clone(),
                    column: predicate.column.clone(),
                })
        })
        .transpose()?;

    // The projection is irrelevant when counting, so it isn't validated.
    let positions = if count_only {
        Vec::new()
    } else {
        resolve_projection(schema, projection)?
    };

    debug!(
        table = %schema.table_name,
        root_page,
        ?positions,
        filter = ?filter.map(|(position, _)| position),
        count_only,
        "running query"
    );

    let mut count = 0;
    let mut rows = Vec::new();

    btree::walk(pager, root_page, |source| -> Result<(), QueryError> {
        let row = record::decode_table_row(source, schema)?;

        if let Some((position, expected)) = filter {
            if row.value(position).map(|value| value.bytes.as_slice()) != Some(expected) {
                return Ok(());
            }
        }

        trace!(rowid = row.rowid, "row matched");

        if count_only {
            count += 1;
        } else {
            rows.push(
                positions
                    .iter()
                    .map(|position| row.value(*position).cloned().unwrap_or_default())
                    .collect(),
            );
        }

        Ok(())
    })?;

    if count_only {
        return Ok(QueryOutput::Count(count));
    }

    Ok(QueryOutput::Rows {
        columns: positions
            .iter()
            .map(|position| schema.columns[*position].clone())
            .collect(),
        rows,
    })
}
