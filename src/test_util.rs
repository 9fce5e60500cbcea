//! Builders for small databases, assembled byte by byte.
//!
//! Only the serial types which are decoded faithfully are produced: `NULL`, integers of 1 to 4
//! bytes, BLOBs and text.

use std::io::Cursor;

use crate::disk::{header::HEADER_SIZE, page::PageType, var_int::VarInt};

const MAGIC: &[u8; 16] = b"SQLite format 3\0";

#[derive(Clone, Debug)]
pub enum FixtureValue {
    Null,
    Int(i64),
    Blob(Vec<u8>),
    Text(String),
}

impl FixtureValue {
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }

    /// Serial type code and body of the value.
    fn encode(&self) -> (u64, Vec<u8>) {
        match self {
            Self::Null => (0, Vec::new()),
            Self::Int(n) => {
                let width = (1..=4)
                    .find(|width| {
                        let bits = width * 8;
                        (-(1 << (bits - 1))..(1 << (bits - 1))).contains(n)
                    })
                    .expect("integer fixtures must fit in 4 bytes");

                (width as u64, n.to_be_bytes()[8 - width..].to_vec())
            }
            Self::Blob(blob) => (12 + 2 * blob.len() as u64, blob.clone()),
            Self::Text(text) => (13 + 2 * text.len() as u64, text.as_bytes().to_vec()),
        }
    }
}

fn var_int(n: u64) -> Vec<u8> {
    VarInt::from(n).encode()
}

/// Encode a record, with a header followed by the body.
pub fn record(values: &[FixtureValue]) -> Vec<u8> {
    let (codes, body): (Vec<_>, Vec<_>) = values.iter().map(FixtureValue::encode).unzip();
    let codes = codes.into_iter().flat_map(var_int).collect::<Vec<_>>();

    // The header size includes its own varint.
    let mut header_size = codes.len() + 1;
    if var_int(header_size as u64).len() > 1 {
        header_size += 1;
    }

    let mut record = var_int(header_size as u64);
    record.extend(codes);
    record.extend(body.concat());
    record
}

/// A row of the schema table, where the table name matches the object's name.
pub fn schema_record(kind: &str, name: &str, root_page: i64, sql: &str) -> Vec<u8> {
    record(&[
        FixtureValue::text(kind),
        FixtureValue::text(name),
        FixtureValue::text(name),
        FixtureValue::Int(root_page),
        FixtureValue::text(sql),
    ])
}

pub fn leaf_table_cell(rowid: i64, record: &[u8]) -> Vec<u8> {
    let mut cell = var_int(record.len() as u64);
    cell.extend(var_int(rowid as u64));
    cell.extend(record);
    cell
}

pub fn interior_table_cell(left_child: u32, key: i64) -> Vec<u8> {
    let mut cell = left_child.to_be_bytes().to_vec();
    cell.extend(var_int(key as u64));
    cell
}

/// Build a page, placing cells at the end of the page in reverse order, with pointers in the
/// order provided. The header of the first page is placed after the database header.
pub fn page(
    page_number: u32,
    page_size: usize,
    page_type: PageType,
    right_most_child: Option<u32>,
    cells: &[Vec<u8>],
) -> Vec<u8> {
    let mut page = vec![0; page_size];

    let mut header = vec![u8::from(page_type), 0, 0];
    header.extend((cells.len() as u16).to_be_bytes());
    let content_offset_position = header.len();
    header.extend([0, 0, 0]);
    if let Some(right_most_child) = right_most_child {
        header.extend(right_most_child.to_be_bytes());
    }

    let mut content_offset = page_size;
    for cell in cells {
        content_offset -= cell.len();
        page[content_offset..content_offset + cell.len()].copy_from_slice(cell);
        header.extend((content_offset as u16).to_be_bytes());
    }
    header[content_offset_position..content_offset_position + 2]
        .copy_from_slice(&(content_offset as u16).to_be_bytes());

    let header_start = if page_number == 1 { HEADER_SIZE } else { 0 };
    page[header_start..header_start + header.len()].copy_from_slice(&header);

    page
}

/// Join the pages into a database, writing the database header over the start of the first page.
pub fn database(page_size: u16, pages: Vec<Vec<u8>>) -> Cursor<Vec<u8>> {
    let mut bytes = pages.concat();
    if bytes.len() < HEADER_SIZE {
        bytes.resize(HEADER_SIZE, 0);
    }

    bytes[..MAGIC.len()].copy_from_slice(MAGIC);
    bytes[16..18].copy_from_slice(&page_size.to_be_bytes());

    Cursor::new(bytes)
}

/// A database holding a single table, `apples(id integer primary key, name text)`, with two rows
/// on root page 2.
pub fn apples_database() -> Cursor<Vec<u8>> {
    const PAGE_SIZE: usize = 4096;

    let apple = |rowid, name| {
        leaf_table_cell(rowid, &record(&[FixtureValue::Null, FixtureValue::text(name)]))
    };

    database(
        PAGE_SIZE as u16,
        vec![
            page(
                1,
                PAGE_SIZE,
                PageType::LeafTable,
                None,
                &[leaf_table_cell(
                    1,
                    &schema_record(
                        "table",
                        "apples",
                        2,
                        "CREATE TABLE apples(id integer primary key, name text)",
                    ),
                )],
            ),
            page(
                2,
                PAGE_SIZE,
                PageType::LeafTable,
                None,
                &[apple(1, "fuji"), apple(2, "gala")],
            ),
        ],
    )
}
