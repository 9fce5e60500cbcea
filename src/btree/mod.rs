use tracing::{trace, warn};

use crate::{
    disk::{DiskError, page::PageType, read_array},
    pager::{Pager, Source},
};

/// Traverse a table b-tree from its root page, calling `visit` for every cell on each leaf page.
/// The source provided to `visit` is positioned at the start of the cell.
///
/// Pages are visited depth first. Children of an interior page are visited in the order of the
/// cell pointers, followed by the right most child, so cells are visited in key order.
pub fn walk<S: Source, E: From<DiskError>>(
    pager: &mut Pager<S>,
    root_page: u32,
    mut visit: impl FnMut(&mut S) -> Result<(), E>,
) -> Result<(), E> {
    let mut stack = vec![root_page];

    while let Some(page_number) = stack.pop() {
        let page_offset = pager.page_offset(page_number)?;
        let header = pager.read_page_header(page_number)?;

        trace!(
            page_number,
            page_type = ?header.page_type,
            cell_count = header.cell_count,
            "visiting page"
        );

        match header.page_type {
            PageType::LeafTable => {
                for pointer in header.cell_pointers {
                    visit(pager.seek(page_offset + u64::from(pointer))?)?;
                }
            }
            PageType::LeafIndex => {
                warn!(page_number, "skipping index page within table b-tree");
            }
            PageType::InteriorTable | PageType::InteriorIndex => {
                // Capture the current end of the stack, so each child is inserted before its
                // preceding sibling and popped after it.
                let insert_point = stack.len();

                for pointer in header.cell_pointers {
                    let source = pager.seek(page_offset + u64::from(pointer))?;
                    let left_child = u32::from_be_bytes(read_array(source)?);
                    stack.insert(insert_point, left_child);
                }

                if let Some(right_most_child) = header.right_most_child {
                    stack.insert(insert_point, right_most_child);
                }
            }
        }
    }

    Ok(())
}
