//! Page slicing over in-memory ordered collections.

use serde::Serialize;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Zero-based page index plus page size. The size is never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_index: usize,
    page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl PageRequest {
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    pub const fn page_index(self) -> usize {
        self.page_index
    }

    pub const fn page_size(self) -> usize {
        self.page_size
    }
}

/// A contiguous window over a larger ordered collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page_index: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<'_, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn next_request(&self) -> Option<PageRequest> {
        self.has_next
            .then(|| PageRequest::new(self.page_index + 1, self.page_size))
    }

    pub fn previous_request(&self) -> Option<PageRequest> {
        self.has_previous
            .then(|| PageRequest::new(self.page_index - 1, self.page_size))
    }
}

/// Slice `items` according to `request`.
///
/// An index past the last page yields an empty page rather than an error.
pub fn paginate<T>(items: &[T], request: PageRequest) -> Page<'_, T> {
    let total_items = items.len();
    let page_size = request.page_size();
    let page_index = request.page_index();

    let total_pages = total_items.div_ceil(page_size);
    let start_index = page_index.saturating_mul(page_size).min(total_items);
    let end_index = start_index.saturating_add(page_size).min(total_items);

    Page {
        items: &items[start_index..end_index],
        page_index,
        page_size,
        total_items,
        total_pages,
        start_index,
        end_index,
        has_next: page_index.saturating_add(1) < total_pages,
        has_previous: page_index > 0,
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn numbers(count: usize) -> Vec<usize> {
        (0..count).collect()
    }

    #[test]
    fn first_page_of_partial_collection() {
        let items = numbers(25);
        let page = paginate(&items, PageRequest::new(0, 10));

        assert_eq!(page.start_index, 0);
        assert_eq!(page.end_index, 10);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(!page.has_previous);
        assert_eq!(page.items, &items[0..10]);
    }

    #[test]
    fn last_page_is_short() {
        let items = numbers(25);
        let page = paginate(&items, PageRequest::new(2, 10));

        assert_eq!(page.start_index, 20);
        assert_eq!(page.end_index, 25);
        assert!(!page.has_next);
        assert!(page.has_previous);
        assert_eq!(page.items, &[20, 21, 22, 23, 24]);
    }

    #[test]
    fn empty_collection_has_no_pages() {
        let items: Vec<u8> = Vec::new();
        let page = paginate(&items, PageRequest::default());

        assert_eq!(page.total_pages, 0);
        assert!(page.is_empty());
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn index_past_end_yields_empty_page() {
        let items = numbers(5);
        let page = paginate(&items, PageRequest::new(7, 2));

        assert!(page.is_empty());
        assert_eq!(page.start_index, 5);
        assert_eq!(page.end_index, 5);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn zero_page_size_is_clamped_to_one() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page_size(), 1);

        let items = numbers(3);
        let page = paginate(&items, request);
        assert_eq!(page.items, &[0]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn navigation_requests_follow_flags() {
        let items = numbers(25);
        let first = paginate(&items, PageRequest::new(0, 10));
        assert_eq!(first.previous_request(), None);
        assert_eq!(first.next_request(), Some(PageRequest::new(1, 10)));

        let last = paginate(&items, PageRequest::new(2, 10));
        assert_eq!(last.next_request(), None);
        assert_eq!(last.previous_request(), Some(PageRequest::new(1, 10)));
    }

    #[quickcheck]
    fn slice_matches_bounds(total: u16, index: u16, size: u8) -> bool {
        let items = numbers(usize::from(total));
        let page = paginate(&items, PageRequest::new(usize::from(index), usize::from(size)));

        page.len() == page.end_index - page.start_index
            && page.start_index <= page.end_index
            && page.end_index <= page.total_items
            && page.page_size >= 1
    }
}
