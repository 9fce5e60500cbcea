use std::{io::Read, mem::offset_of};

use static_assertions::const_assert_eq;
use tracing::debug;
use zerocopy::{FromBytes, big_endian::U16};

use super::{DiskError, read_array};

/// Size of the database header at the start of the file.
pub const HEADER_SIZE: usize = 100;

/// Raw database header, as it is stored at the start of the file. Only the fields which are used
/// are broken out.
///
/// See [SQLite Documentation](https://www.sqlite.org/fileformat2.html#the_database_header).
#[derive(Clone, Debug, FromBytes)]
#[repr(C)]
struct RawDbHeader {
    /// Should be `SQLite format 3\000`, however this is never checked.
    header_string: [u8; 16],
    /// Size of each page. `1` represents 65536.
    page_size: U16,
    /// Everything else in the header.
    _remainder: [u8; 82],
}
const_assert_eq!(size_of::<RawDbHeader>(), HEADER_SIZE);
const_assert_eq!(offset_of!(RawDbHeader, page_size), 16);

/// Fields of the database header required to read the file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatabaseHeader {
    page_size: u16,
}

impl DatabaseHeader {
    /// Read the header, consuming exactly [`HEADER_SIZE`] bytes from the source.
    pub fn read(source: &mut impl Read) -> Result<Self, DiskError> {
        let bytes = read_array::<HEADER_SIZE>(source)?;
        let header = RawDbHeader::read_from_bytes(&bytes).map_err(|_| DiskError::Truncated)?;

        debug!(
            header_string = %String::from_utf8_lossy(&header.header_string),
            page_size = header.page_size.get(),
            "read database header"
        );

        Ok(Self {
            page_size: header.page_size.get(),
        })
    }

    /// Size of each page in bytes.
    pub fn page_size(&self) -> u32 {
        match self.page_size {
            1 => 65536,
            n => u32::from(n),
        }
    }
}
