use serde::{Deserialize, Serialize};

/// Metadata about one slice of a larger, already fetched result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Zero-based index of the current page
    pub page_index: u64,
    /// Number of elements per page
    pub page_size: u64,
    /// Number of elements across all pages
    pub total_elements: u64,
    /// Number of pages
    pub total_pages: u64,
    pub has_previous: bool,
    pub has_next: bool,
    /// The result set was fetched without paging
    #[serde(default)]
    pub unpaged: bool,
}

impl PageDescriptor {
    /// Creates a descriptor for a paged request, deriving page count and
    /// navigation flags from the totals.
    pub fn new(page_index: u64, page_size: u64, total_elements: u64) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_elements.div_ceil(page_size)
        };
        Self {
            page_index,
            page_size,
            total_elements,
            total_pages,
            has_previous: page_index > 0,
            has_next: page_index.saturating_add(1) < total_pages,
            unpaged: false,
        }
    }

    /// Creates a descriptor for a result set returned in a single slice.
    pub fn unpaged(total_elements: u64) -> Self {
        Self {
            page_index: 0,
            page_size: total_elements,
            total_elements,
            total_pages: u64::from(total_elements > 0),
            has_previous: false,
            has_next: false,
            unpaged: true,
        }
    }

    /// Whether the page holds no elements at all
    pub fn is_empty(&self) -> bool {
        self.total_elements == 0
    }
}
