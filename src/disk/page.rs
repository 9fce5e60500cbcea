use std::io::Read;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use static_assertions::const_assert_eq;
use zerocopy::{FromBytes, big_endian::*};

use super::{DiskError, read_array};

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum PageType {
    InteriorIndex = 0x02,
    InteriorTable = 0x05,
    LeafIndex = 0x0a,
    LeafTable = 0x0d,
}

impl PageType {
    pub fn is_interior(&self) -> bool {
        matches!(self, Self::InteriorIndex | Self::InteriorTable)
    }
}

/// Page header which is present at the start of every page. This structure represents the raw
/// binary stored on disk, and has not had any validation on any of its fields.
#[derive(Clone, Debug, FromBytes)]
#[repr(C)]
struct RawPageHeader {
    /// Flag indicating the type of the page.
    page_type: u8,
    /// Start of the first freeblock on the page.
    first_freeblock: U16,
    /// Number of cells in the page.
    cell_count: U16,
    /// Start of the cell content area.
    cell_content_offset: U16,
    /// Number of fragmented free bytes in the cell content area.
    fragmented_free_bytes: u8,
}
const_assert_eq!(size_of::<RawPageHeader>(), 8);

/// A page header, along with the cell pointer array that follows it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageHeader {
    pub page_type: PageType,
    pub first_freeblock: u16,
    pub cell_count: u16,
    pub cell_content_offset: u16,
    pub fragmented_free_bytes: u8,
    /// Page containing keys greater than every cell on this page. Only present for interior
    /// pages.
    pub right_most_child: Option<u32>,
    /// Page relative offsets of each cell, in the order they appear on disk.
    pub cell_pointers: Vec<u16>,
}

impl PageHeader {
    /// Read the header and cell pointers from the source, which must be positioned at the start
    /// of the page header.
    pub fn read(source: &mut impl Read) -> Result<Self, DiskError> {
        let header = RawPageHeader::read_from_bytes(&read_array::<8>(source)?)
            .map_err(|_| DiskError::Truncated)?;

        let page_type = PageType::try_from_primitive(header.page_type)
            .map_err(|e| DiskError::UnsupportedPageType(e.number))?;

        let right_most_child = if page_type.is_interior() {
            Some(U32::from_bytes(read_array(source)?).get())
        } else {
            None
        };

        let cell_count = header.cell_count.get();
        let cell_pointers = (0..cell_count)
            .map(|_| Ok(U16::from_bytes(read_array(source)?).get()))
            .collect::<Result<Vec<_>, DiskError>>()?;

        Ok(Self {
            page_type,
            first_freeblock: header.first_freeblock.get(),
            cell_count,
            cell_content_offset: header.cell_content_offset.get(),
            fragmented_free_bytes: header.fragmented_free_bytes,
            right_most_child,
            cell_pointers,
        })
    }
}
