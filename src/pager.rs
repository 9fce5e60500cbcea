use std::{
    fmt::Debug,
    io::{Read, Seek, SeekFrom},
};

use tracing::{debug, trace};

use crate::disk::{
    DiskError,
    header::{DatabaseHeader, HEADER_SIZE},
    page::PageHeader,
};

/// Page number of the page which holds the database header and the schema table.
pub const FIRST_PAGE: u32 = 1;

/// Anything that a database can be read from.
pub trait Source: Read + Seek + Debug {}
impl<T> Source for T where T: Read + Seek + Debug {}

/// Owns the source of a database, and translates page numbers into positions within it.
///
/// Nothing is cached, so every request will seek and read from the source again.
#[derive(Debug)]
pub struct Pager<S> {
    source: S,
    header: DatabaseHeader,
}

impl<S: Source> Pager<S> {
    /// Read the database header from the start of the source, and prepare to read pages from it.
    pub fn open(mut source: S) -> Result<Self, DiskError> {
        source.seek(SeekFrom::Start(0))?;
        let header = DatabaseHeader::read(&mut source)?;

        debug!(page_size = header.page_size(), "opened database");

        Ok(Self { source, header })
    }

    pub fn page_size(&self) -> u32 {
        self.header.page_size()
    }

    /// Absolute offset of the start of a page. Pages are numbered from 1.
    pub fn page_offset(&self, page_number: u32) -> Result<u64, DiskError> {
        if page_number == 0 {
            return Err(DiskError::InvalidPageNumber(page_number));
        }

        Ok(u64::from(page_number - 1) * u64::from(self.page_size()))
    }

    /// Read the header of a page. The first page's header is located after the database header.
    pub fn read_page_header(&mut self, page_number: u32) -> Result<PageHeader, DiskError> {
        let mut offset = self.page_offset(page_number)?;
        if page_number == FIRST_PAGE {
            offset += HEADER_SIZE as u64;
        }

        trace!(page_number, offset, "reading page header");

        PageHeader::read(self.seek(offset)?)
    }

    /// Position the source at an absolute offset, and provide it for reading.
    pub fn seek(&mut self, offset: u64) -> Result<&mut S, DiskError> {
        self.source.seek(SeekFrom::Start(offset))?;
        Ok(&mut self.source)
    }
}
