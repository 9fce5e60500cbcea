//! Decoders for the binary structures of a SQLite file. Every reader consumes bytes from a
//! [`Read`] source which the caller has already positioned.

pub mod header;
pub mod page;
pub mod serial_type;
pub mod var_int;

use std::io::{self, Read};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiskError {
    #[error("unexpected end of database file")]
    Truncated,

    #[error("unsupported page type: {0:#04x}")]
    UnsupportedPageType(u8),

    #[error("invalid page number: {0}")]
    InvalidPageNumber(u32),

    #[error(transparent)]
    Io(io::Error),
}

impl From<io::Error> for DiskError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => Self::Truncated,
            _ => Self::Io(error),
        }
    }
}

/// Read exactly `N` bytes from the source.
pub fn read_array<const N: usize>(source: &mut impl Read) -> Result<[u8; N], DiskError> {
    let mut buf = [0; N];
    source.read_exact(&mut buf)?;
    Ok(buf)
}

/// Read exactly `length` bytes from the source into a new buffer.
pub fn read_vec(source: &mut impl Read, length: u64) -> Result<Vec<u8>, DiskError> {
    let mut buf = Vec::new();
    source.by_ref().take(length).read_to_end(&mut buf)?;

    if (buf.len() as u64) < length {
        return Err(DiskError::Truncated);
    }

    Ok(buf)
}
