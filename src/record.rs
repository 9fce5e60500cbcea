//! Decoding of the records stored in the cells of table b-tree leaf pages.
//!
//! A cell is made up of the payload size, the rowid, and then the record itself. The record
//! begins with a header (its own size followed by a serial type code per column), followed by
//! the body containing the value of each column.

use std::io::Read;

use thiserror::Error;
use tracing::trace;

use crate::{
    disk::{DiskError, read_vec, serial_type, var_int::VarInt},
    schema::TableSchema,
};

/// Number of columns in a row of the schema table.
pub const SCHEMA_COLUMN_COUNT: usize = 5;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record has {found} columns, expected {expected}")]
    ColumnCountMismatch { expected: usize, found: usize },

    #[error("unknown schema object type: {0}")]
    UnknownSchemaKind(String),

    #[error("root page out of range: {0}")]
    InvalidRootPage(u64),

    #[error(transparent)]
    Disk(#[from] DiskError),
}

/// The type of object that a schema row describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    Table,
    Index,
    View,
    Trigger,
}

impl TryFrom<&[u8]> for SchemaKind {
    type Error = RecordError;

    fn try_from(kind: &[u8]) -> Result<Self, Self::Error> {
        Ok(match kind {
            b"table" => Self::Table,
            b"index" => Self::Index,
            b"view" => Self::View,
            b"trigger" => Self::Trigger,
            kind => {
                return Err(RecordError::UnknownSchemaKind(
                    String::from_utf8_lossy(kind).into_owned(),
                ));
            }
        })
    }
}

/// A row of the schema table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaRow {
    pub kind: SchemaKind,
    pub name: String,
    pub table_name: String,
    pub root_page: u32,
    pub sql: String,
}

/// Bytes of a single column, along with the serial type code they were stored with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Value {
    pub serial_type: u64,
    pub bytes: Vec<u8>,
}

impl Value {
    /// Text, with the serial type SQLite would store it with.
    pub fn text(text: impl Into<Vec<u8>>) -> Self {
        let bytes = text.into();

        Self {
            serial_type: 13 + 2 * bytes.len() as u64,
            bytes,
        }
    }

    /// Whether the value was stored as a big endian integer.
    pub fn is_integer(&self) -> bool {
        matches!(self.serial_type, 1..=6)
    }
}

/// A row of a table, with values in the same order as the table's columns.
#[derive(Clone, Debug)]
pub struct Row {
    pub rowid: i64,
    values: Vec<Value>,
}

impl Row {
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// Read the start of a cell, producing the payload size and the rowid.
fn read_cell_prefix(source: &mut impl Read) -> Result<(u64, i64), DiskError> {
    let (payload_size, _) = VarInt::read(source)?;
    let (rowid, _) = VarInt::read(source)?;

    Ok((*payload_size, *rowid as i64))
}

/// Read a record which must contain exactly `expected` columns, producing the value of each
/// column.
fn read_record(source: &mut impl Read, expected: usize) -> Result<Vec<Value>, RecordError> {
    let (header_size, header_size_length) = VarInt::read(source)?;

    let mut remaining = header_size.saturating_sub(u64::from(header_size_length));
    let mut codes = Vec::with_capacity(expected);
    while remaining > 0 {
        let (code, length) = VarInt::read(source)?;
        remaining = remaining.saturating_sub(u64::from(length));
        codes.push(*code);
    }

    if codes.len() != expected {
        return Err(RecordError::ColumnCountMismatch {
            expected,
            found: codes.len(),
        });
    }

    Ok(codes
        .into_iter()
        .map(|code| -> Result<_, DiskError> {
            Ok(Value {
                serial_type: code,
                bytes: read_vec(source, serial_type::resolve(code))?,
            })
        })
        .collect::<Result<_, _>>()?)
}

/// Interpret bytes as a big endian unsigned integer.
fn be_unsigned(bytes: &[u8]) -> Option<u64> {
    if bytes.len() > size_of::<u64>() {
        return None;
    }

    Some(bytes.iter().fold(0, |n, b| (n << 8) | u64::from(*b)))
}

/// Decode a cell of the schema table. The source must be positioned at the start of the cell.
pub fn decode_schema_record(source: &mut impl Read) -> Result<SchemaRow, RecordError> {
    let (payload_size, rowid) = read_cell_prefix(source)?;
    trace!(payload_size, rowid, "decoding schema record");

    let [kind, name, table_name, root_page, sql]: [Value; SCHEMA_COLUMN_COUNT] =
        read_record(source, SCHEMA_COLUMN_COUNT)?
            .try_into()
            .map_err(|values: Vec<_>| RecordError::ColumnCountMismatch {
                expected: SCHEMA_COLUMN_COUNT,
                found: values.len(),
            })?;

    let root_page =
        be_unsigned(&root_page.bytes).ok_or(RecordError::InvalidRootPage(u64::MAX))?;

    Ok(SchemaRow {
        kind: SchemaKind::try_from(kind.bytes.as_slice())?,
        name: String::from_utf8_lossy(&name.bytes).into_owned(),
        table_name: String::from_utf8_lossy(&table_name.bytes).into_owned(),
        root_page: u32::try_from(root_page).map_err(|_| RecordError::InvalidRootPage(root_page))?,
        sql: String::from_utf8_lossy(&sql.bytes).into_owned(),
    })
}

/// Decode a cell of a table's b-tree. The source must be positioned at the start of the cell.
///
/// Any rowid alias column will contain the decimal representation of the rowid, rather than the
/// value stored in the record.
pub fn decode_table_row(source: &mut impl Read, schema: &TableSchema) -> Result<Row, RecordError> {
    let (payload_size, rowid) = read_cell_prefix(source)?;
    trace!(payload_size, rowid, table = %schema.table_name, "decoding row");

    let mut values = read_record(source, schema.columns.len())?;

    for (column, value) in schema.columns.iter().zip(&mut values) {
        if column.is_rowid_alias {
            *value = Value::text(rowid.to_string());
        }
    }

    Ok(Row { rowid, values })
}
