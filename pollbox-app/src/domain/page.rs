use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u64 = 10;
const MAX_PAGE_SIZE: u64 = 100;

/// Normalized pagination request; page is 1-based.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: Option<u64>, page_size: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64, total_pages: u64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.page_size,
            total,
            total_pages,
            has_next_page: request.page < total_pages,
            has_previous_page: request.page > 1 && total_pages > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_caps() {
        let req = PageRequest::new(None, None);
        assert_eq!((req.page, req.page_size), (1, 10));

        let req = PageRequest::new(Some(0), Some(500));
        assert_eq!((req.page, req.page_size), (1, 100));

        let req = PageRequest::new(Some(3), Some(0));
        assert_eq!((req.page, req.page_size), (3, 1));
    }

    #[test]
    fn page_flags_over_25_items() {
        // 25 items at page_size 10 paginate 10/10/5
        let pages = [
            (1, 10, true, false),
            (2, 10, true, true),
            (3, 5, false, true),
        ];
        for (page, len, next, prev) in pages {
            let req = PageRequest::new(Some(page), Some(10));
            let items: Vec<u32> = vec![0; len];
            let paged = Paginated::new(items, req, 25, 3);
            assert_eq!(paged.total, 25);
            assert_eq!(paged.total_pages, 3);
            assert_eq!(paged.has_next_page, next, "page {page}");
            assert_eq!(paged.has_previous_page, prev, "page {page}");
        }
    }

    #[test]
    fn empty_listing_has_no_pages() {
        let paged: Paginated<u32> = Paginated::new(vec![], PageRequest::default(), 0, 0);
        assert!(!paged.has_next_page);
        assert!(!paged.has_previous_page);
    }
}
