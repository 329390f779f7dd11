/// Offset-based page request
///
/// # Example
/// ```
/// use autofin_db::repository::pagination::PageRequest;
///
/// let first = PageRequest::new(10, 0);
/// let second = PageRequest::for_page(10, 2);
/// assert_eq!(second.offset, 10);
/// assert_eq!(first.page_number(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Request for a 1-based page number; page 0 is treated as page 1.
    pub fn for_page(page_size: usize, page_number: usize) -> Self {
        Self {
            limit: page_size,
            offset: (page_number.max(1) - 1) * page_size,
        }
    }

    pub fn page_number(&self) -> usize {
        page_number(self.limit, self.offset)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(20, 0)
    }
}

/// Page of rows together with the total row count
///
/// # Example
/// ```
/// use autofin_db::repository::pagination::Page;
///
/// let page = Page::new(vec!["a", "b"], 5, 2, 2);
/// assert!(page.has_more());
/// assert_eq!(page.page_number(), 2);
/// assert_eq!(page.total_pages(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }

    pub fn page_number(&self) -> usize {
        page_number(self.limit, self.offset)
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.total.div_ceil(self.limit)
        }
    }
}

fn page_number(limit: usize, offset: usize) -> usize {
    if limit == 0 {
        1
    } else {
        offset / limit + 1
    }
}
