use thiserror::Error;
use tracing::debug;

use crate::{
    command::{SelectStatement, parse_command},
    disk::DiskError,
    pager::{Pager, Source},
    query::{self, Predicate, Query, QueryError, QueryOutput},
    schema::{Catalog, SchemaError, Table},
};

/// Name of the schema holding the tables of the database file.
const MAIN_SCHEMA: &str = "main";

#[derive(Debug, Error)]
pub enum CtxError {
    #[error("failed to parse statement: {0}")]
    Parse(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Disk(#[from] DiskError),
}

/// Summary of the database, as reported by `.dbinfo`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatabaseInfo {
    pub page_size: u32,
    /// Number of tables in the schema table, including internal tables.
    pub table_count: usize,
}

/// An open database, with its catalog loaded.
#[derive(Debug)]
pub struct Ctx<S> {
    pager: Pager<S>,
    catalog: Catalog,
}

impl<S: Source> Ctx<S> {
    /// Read the header and load the catalog from the schema table.
    pub fn open(source: S) -> Result<Self, CtxError> {
        let mut pager = Pager::open(source)?;
        let catalog = Catalog::load(&mut pager)?;

        debug!(
            tables = catalog.tables().count(),
            indexes = catalog.indexes().count(),
            "loaded catalog"
        );

        Ok(Self { pager, catalog })
    }

    pub fn info(&self) -> DatabaseInfo {
        DatabaseInfo {
            page_size: self.pager.page_size(),
            table_count: self.catalog.tables().count(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Parse and run a `SELECT` statement.
    pub fn execute(&mut self, sql: &str) -> Result<QueryOutput, CtxError> {
        let statement = parse_command::<SelectStatement>(sql).map_err(CtxError::Parse)?;
        let (query, table) = plan(&self.catalog, &statement)?;

        debug!(?query, "planned query");

        Ok(query::run(
            &mut self.pager,
            &table.schema,
            table.root_page,
            &query.projection,
            query.predicate.as_ref(),
            query.count_only,
        )?)
    }
}

/// Resolve a statement into a query against a table of the catalog, without checking the table's
/// columns.
pub fn plan<'c>(
    catalog: &'c Catalog,
    statement: &SelectStatement,
) -> Result<(Query, &'c Table), QueryError> {
    let name = statement.table.name.to_lowercase();

    // Only tables stored in the database file can be read.
    if let Some(schema) = &statement.table.schema {
        if !schema.eq_ignore_ascii_case(MAIN_SCHEMA) {
            return Err(QueryError::TableNotFound(format!(
                "{}.{name}",
                schema.to_lowercase()
            )));
        }
    }

    let table = catalog
        .table(&name)
        .ok_or_else(|| QueryError::TableNotFound(name.clone()))?;

    let predicate = statement.where_clause.as_ref().map(|clause| Predicate {
        column: clause.column.to_lowercase(),
        expected: clause.value.as_str().as_bytes().to_vec(),
    });

    let query = Query::new(
        name,
        statement
            .result_columns
            .iter()
            .map(|column| column.text())
            .collect(),
        predicate,
    );

    Ok((query, table))
}
