//! The catalog of tables and indexes in a database, built from the schema table on the first page.

use thiserror::Error;
use tracing::debug;

use crate::{
    btree,
    command::{CreateTableStatement, TableConstraint, parse_command},
    disk::DiskError,
    pager::{FIRST_PAGE, Pager, Source},
    record::{self, RecordError, SchemaKind, SchemaRow},
};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid schema for table {table}: {message}")]
    Ddl { table: String, message: String },

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Disk(#[from] DiskError),
}

/// A column of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Lower case name of the column.
    pub name: String,
    pub declared_type: String,
    /// The column is an alias of the rowid (`INTEGER PRIMARY KEY`), and its value is never stored
    /// in the record.
    pub is_rowid_alias: bool,
}

impl Column {
    pub fn new(name: impl AsRef<str>, declared_type: impl ToString, is_rowid_alias: bool) -> Self {
        Self {
            name: name.as_ref().to_lowercase(),
            declared_type: declared_type.to_string(),
            is_rowid_alias,
        }
    }

    /// Whether values of this column are stored as integers, following SQLite's affinity rules.
    pub fn has_integer_affinity(&self) -> bool {
        self.declared_type.to_ascii_uppercase().contains("INT")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    /// Columns, in the order they are declared (and stored).
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Build the schema from the `CREATE TABLE` statement stored in the schema table.
    pub fn from_sql(table_name: &str, sql: &str) -> Result<Self, SchemaError> {
        let statement =
            parse_command::<CreateTableStatement>(sql).map_err(|message| SchemaError::Ddl {
                table: table_name.to_string(),
                message,
            })?;

        // A single column table level primary key also makes an alias.
        let primary_key = statement
            .constraints
            .iter()
            .find_map(|constraint| match constraint {
                TableConstraint::PrimaryKey(columns) if columns.len() == 1 => {
                    Some(columns[0].to_lowercase())
                }
                _ => None,
            });

        let columns = statement
            .columns
            .iter()
            .map(|column| {
                let name = column.name.to_lowercase();
                let primary_key =
                    column.primary_key || primary_key.as_deref() == Some(name.as_str());

                Column::new(
                    &name,
                    &column.type_name,
                    primary_key && column.type_name.eq_ignore_ascii_case("integer"),
                )
            })
            .collect();

        Ok(Self {
            table_name: table_name.to_string(),
            columns,
        })
    }

    /// Position of the column named `name`, ignoring case.
    pub fn position(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.columns.iter().position(|column| column.name == name)
    }
}

#[derive(Clone, Debug)]
pub struct Table {
    pub name: String,
    pub root_page: u32,
    pub schema: TableSchema,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Index {
    pub name: String,
    pub table_name: String,
    pub root_page: u32,
}

/// Every table and index in the database, in the order they appear in the schema table.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    tables: Vec<Table>,
    indexes: Vec<Index>,
}

impl Catalog {
    /// Read every row of the schema table.
    pub fn load<S: Source>(pager: &mut Pager<S>) -> Result<Self, SchemaError> {
        let mut rows = Vec::new();

        btree::walk(pager, FIRST_PAGE, |source| -> Result<(), SchemaError> {
            rows.push(record::decode_schema_record(source)?);
            Ok(())
        })?;

        Self::from_rows(rows)
    }

    pub fn from_rows(rows: impl IntoIterator<Item = SchemaRow>) -> Result<Self, SchemaError> {
        let mut catalog = Self::default();

        for row in rows {
            match row.kind {
                SchemaKind::Table => {
                    let schema = TableSchema::from_sql(&row.name, &row.sql)?;
                    debug!(
                        table = %row.name,
                        root_page = row.root_page,
                        columns = schema.columns.len(),
                        "registered table"
                    );

                    catalog.tables.push(Table {
                        name: row.name,
                        root_page: row.root_page,
                        schema,
                    });
                }
                SchemaKind::Index => {
                    debug!(
                        index = %row.name,
                        table = %row.table_name,
                        root_page = row.root_page,
                        "registered index"
                    );

                    catalog.indexes.push(Index {
                        name: row.name,
                        table_name: row.table_name,
                        root_page: row.root_page,
                    });
                }
                SchemaKind::View | SchemaKind::Trigger => {
                    debug!(kind = ?row.kind, name = %row.name, "ignoring schema object");
                }
            }
        }

        Ok(catalog)
    }

    /// Find a table by name, ignoring case.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| table.name.eq_ignore_ascii_case(name))
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.iter()
    }

    pub fn indexes(&self) -> impl Iterator<Item = &Index> {
        self.indexes.iter()
    }
}
